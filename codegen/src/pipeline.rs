use crate::{error::PtransError, generator::CodeGenerator, splicer::splice_generated};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// What `regenerate_file` did to the target document.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The document already matched the generated output modulo whitespace;
    /// nothing was written.
    Unchanged,
    /// The original was renamed to `backup` and the spliced text written in
    /// its place.
    Rewritten { backup: PathBuf },
}

/// Regenerates the dispatch bodies inside one target source file.
///
/// On a whitespace-equivalent result the file is left completely untouched
/// (timestamps included). Otherwise the original is renamed (not copied) to
/// its sibling backup path, replacing any stale backup, and the modified
/// text is written to the original path.
pub fn regenerate_file(
    gen: &dyn CodeGenerator,
    src_path: &Path,
    packet_types: &[String],
) -> Result<Outcome, PtransError> {
    let original = fs::read_to_string(src_path)?;
    let sources = splice_generated(gen, &original, packet_types)?;

    if sources.is_no_op() {
        info!(
            target_lang = gen.target_name(),
            path = %src_path.display(),
            "no code generation needed, file is already schema-compatible"
        );
        return Ok(Outcome::Unchanged);
    }

    let backup = backup_path(src_path);
    info!(
        target_lang = gen.target_name(),
        backup = %backup.display(),
        "saving source file backup"
    );
    fs::rename(src_path, &backup)?;
    fs::write(src_path, sources.modified())?;

    info!(
        target_lang = gen.target_name(),
        path = %src_path.display(),
        "inserted generated code in the original source file"
    );

    Ok(Outcome::Rewritten { backup })
}

/// Sibling backup path for a target document: file stem + `_BACKUP`, same
/// extension, same directory. Deterministic, so each document owns exactly
/// one backup slot.
pub fn backup_path(src_path: &Path) -> PathBuf {
    let stem = src_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match src_path.extension() {
        Some(ext) => format!("{}_BACKUP.{}", stem, ext.to_string_lossy()),
        None => format!("{}_BACKUP", stem),
    };

    src_path.with_file_name(name)
}
