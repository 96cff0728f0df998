use crate::{convert::snake_to_camel, error::PtransError, utils::quote};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// The single wrapper message carrying one enumerated packet per instance.
/// Excluded from the declared-message set and from the enumeration.
pub const PACKET_WRAPPER_CLASS_NAME: &str = "PacketWrapper";

/// Opening marker of the packet enumeration inside the wrapper message.
pub const ONEOF_SPEC_START: &str = "oneof packet {";

lazy_static! {
    static ref MESSAGE_DECL: Regex =
        Regex::new(r"^message\s+([A-Za-z_][A-Za-z0-9_]*)").unwrap();
    static ref LINE_COMMENT: Regex = Regex::new(r"^//").unwrap();
}

/// The ordered list of packet types enumerated in the schema.
///
/// Order is the textual order of the `oneof packet {...}` block and is
/// preserved end-to-end: it becomes the dispatch order of the generated
/// switch/if-chain in both target languages.
#[derive(Debug, PartialEq, Serialize)]
pub struct ProtoSchema {
    pub packet_types: Vec<String>,
}

/// Parses `packets.proto` text into the ordered packet-type list and
/// validates it against the `message` declarations found in the same file.
///
/// Only two constructs are interpreted: `message <Name> {` declarations and
/// the entries of the `oneof packet {...}` enumeration. Everything else
/// (field types, imports, options) is ignored. The enumeration is expected
/// to be the last block in the file; once the opener is seen the scanner
/// stays in enumeration mode.
pub fn parse_proto_schema(text: &str) -> Result<ProtoSchema, PtransError> {
    let mut declared_classes: Vec<String> = Vec::new();
    let mut packet_types: Vec<String> = Vec::new();
    let mut oneof_started = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if let Some(caps) = MESSAGE_DECL.captures(line) {
            let class = caps[1].to_string();
            if class != PACKET_WRAPPER_CLASS_NAME {
                declared_classes.push(class);
            }
        } else if line.starts_with(ONEOF_SPEC_START) {
            oneof_started = true;
        } else if oneof_started && !line.is_empty() {
            if line.contains("/*") || line.contains("*/") {
                return Err(PtransError::BlockCommentInOneof);
            }
            if !LINE_COMMENT.is_match(line) && line.contains('=') && line.contains(';') {
                let packet_type = match line.split_whitespace().nth(1) {
                    Some(tok) => tok.to_string(),
                    None => {
                        return Err(PtransError::MalformedOneofEntry { line: quote(line) })
                    }
                };

                debug!(
                    packet = %packet_type,
                    class = %snake_to_camel(&packet_type),
                    "detected packet specification"
                );

                if !declared_classes.contains(&snake_to_camel(&packet_type)) {
                    return Err(PtransError::UndeclaredPacket {
                        class: snake_to_camel(&packet_type),
                        packet: packet_type,
                    });
                }

                packet_types.push(packet_type);
            }
        }
    }

    for class in &declared_classes {
        let enumerated = packet_types
            .iter()
            .any(|packet| &snake_to_camel(packet) == class);

        if !enumerated {
            return Err(PtransError::UnenumeratedMessage {
                class: class.clone(),
            });
        }
    }

    Ok(ProtoSchema { packet_types })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"
syntax = "proto3";

// Player movement.
message MovePlayer {
    float x = 1;
    float y = 2;
}

message ChatMessage {
    string text = 1;
}

message PacketWrapper {
    uint32 sequence     = 1;
    uint32 ack          = 2;
    uint32 ack_bitfield = 3;

    oneof packet {
        MovePlayer move_player   = 4;
        ChatMessage chat_message = 5;
    }
}
"#;

    #[test]
    fn test_parse_well_formed() {
        let schema = parse_proto_schema(WELL_FORMED).expect("parse failed");
        assert_eq!(schema.packet_types, vec!["move_player", "chat_message"]);
    }

    #[test]
    fn test_enumeration_order_is_textual_order() {
        let text = r#"
message B { bool x = 1; }
message A { bool x = 1; }
message PacketWrapper {
    oneof packet {
        B b = 1;
        A a = 2;
    }
}
"#;
        let schema = parse_proto_schema(text).expect("parse failed");
        assert_eq!(schema.packet_types, vec!["b", "a"]);
    }

    #[test]
    fn test_declared_but_unenumerated_fails() {
        let text = r#"
message Ping { uint32 id = 1; }
message MovePlayer { float x = 1; }
message PacketWrapper {
    oneof packet {
        MovePlayer move_player = 1;
    }
}
"#;
        let err = parse_proto_schema(text).unwrap_err();
        match err {
            PtransError::UnenumeratedMessage { class } => assert_eq!(class, "Ping"),
            other => panic!("expected UnenumeratedMessage, got {:?}", other),
        }
    }

    #[test]
    fn test_enumerated_but_undeclared_fails() {
        let text = r#"
message MovePlayer { float x = 1; }
message PacketWrapper {
    oneof packet {
        MovePlayer move_player = 1;
        Ping ping              = 2;
    }
}
"#;
        let err = parse_proto_schema(text).unwrap_err();
        match err {
            PtransError::UndeclaredPacket { packet, class } => {
                assert_eq!(packet, "ping");
                assert_eq!(class, "Ping");
            }
            other => panic!("expected UndeclaredPacket, got {:?}", other),
        }
    }

    #[test]
    fn test_block_comment_inside_oneof_fails() {
        let text = r#"
message MovePlayer { float x = 1; }
message PacketWrapper {
    oneof packet {
        /* not allowed here */
        MovePlayer move_player = 1;
    }
}
"#;
        let err = parse_proto_schema(text).unwrap_err();
        assert!(matches!(err, PtransError::BlockCommentInOneof));
    }

    #[test]
    fn test_line_comments_and_blanks_inside_oneof_are_skipped() {
        let text = r#"
message MovePlayer { float x = 1; }
message PacketWrapper {
    oneof packet {
        // movement
        MovePlayer move_player = 1;

    }
}
"#;
        let schema = parse_proto_schema(text).expect("parse failed");
        assert_eq!(schema.packet_types, vec!["move_player"]);
    }

    #[test]
    fn test_entry_without_identifier_token_fails() {
        let text = r#"
message PacketWrapper {
    oneof packet {
        x=1;
    }
}
"#;
        let err = parse_proto_schema(text).unwrap_err();
        assert!(matches!(err, PtransError::MalformedOneofEntry { .. }));
    }

    #[test]
    fn test_wrapper_is_excluded_from_declared_set() {
        // PacketWrapper itself must not be required to appear in the oneof.
        let schema = parse_proto_schema(WELL_FORMED).expect("parse failed");
        assert!(!schema.packet_types.iter().any(|p| p == "packet_wrapper"));
    }
}
