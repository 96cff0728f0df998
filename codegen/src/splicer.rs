use crate::{error::PtransError, generator::CodeGenerator};
use tracing::debug;

/// A target document's original text paired with its candidate post-edit
/// text. Exists only long enough to be compared and, if different,
/// persisted.
#[derive(Debug)]
pub struct SourceSets {
    original: String,
    modified: String,
}

impl SourceSets {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn modified(&self) -> &str {
        &self.modified
    }

    /// The regeneration decision: true when the two texts differ only in
    /// whitespace (re-indentation, blank lines), meaning no backup or
    /// overwrite is needed. Any token-level change makes this false.
    pub fn is_no_op(&self) -> bool {
        raw_code(&self.original) == raw_code(&self.modified)
    }
}

fn raw_code(source: &str) -> String {
    source.chars().filter(|c| !c.is_whitespace()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Wrap,
    Unwrap,
}

/// Replaces the bodies of the generator's wrap and unwrap methods inside
/// `source`, leaving every other line untouched.
///
/// The source is streamed line by line. A line whose trimmed content starts
/// with one of the two exact method signatures enters tracked-body mode
/// with a brace depth of 1 (the signature's own opening brace); while
/// tracked, original lines are discarded and braces are tallied per line.
/// When the depth returns to 0 the slot's generated fragment is emitted
/// followed by a single closing-brace line.
///
/// Brace counting is purely textual (at most one increment and one
/// decrement per line) and will miscount braces inside string or comment
/// literals. The bodies being replaced are generated and brace-balanced by
/// construction, so this limitation is accepted rather than papered over
/// with a real tokenizer.
///
/// Both signatures must be found exactly; otherwise the whole operation
/// fails and no document is produced.
pub fn splice_generated(
    gen: &dyn CodeGenerator,
    source: &str,
    packet_types: &[String],
) -> Result<SourceSets, PtransError> {
    let mut modified = String::with_capacity(source.len());

    let mut skip_slot: Option<Slot> = None;
    let mut brackets: i32 = 0;

    let mut generated_wrap = false;
    let mut generated_unwrap = false;

    for line in source.lines() {
        let trimmed = line.trim();

        if skip_slot.is_none() {
            modified.push_str(line);
            modified.push('\n');
        }

        if trimmed.starts_with(gen.wrap_signature()) {
            skip_slot = Some(Slot::Wrap);
            brackets = 1;
        } else if trimmed.starts_with(gen.unwrap_signature()) {
            skip_slot = Some(Slot::Unwrap);
            brackets = 1;
        } else if let Some(slot) = skip_slot {
            if line.contains('{') {
                brackets += 1;
            }

            if line.contains('}') {
                brackets -= 1;

                if brackets == 0 {
                    skip_slot = None;

                    let body = match slot {
                        Slot::Wrap => {
                            generated_wrap = true;
                            gen.generate_wrap_body(packet_types)
                        }
                        Slot::Unwrap => {
                            generated_unwrap = true;
                            gen.generate_unwrap_body(packet_types)
                        }
                    };

                    modified.push_str(&body);
                    modified.push_str("    }\n");

                    debug!(target_lang = gen.target_name(), slot = ?slot, "generated method body");
                }
            }
        }
    }

    if !generated_wrap {
        return Err(PtransError::SignatureNotFound {
            target:    gen.target_name(),
            signature: gen.wrap_signature(),
        });
    }

    if !generated_unwrap {
        return Err(PtransError::SignatureNotFound {
            target:    gen.target_name(),
            signature: gen.unwrap_signature(),
        });
    }

    Ok(SourceSets {
        original: source.to_string(),
        modified,
    })
}
