/// Converts an underscore_case identifier to its CamelCase message name.
///
/// Splits on `_`, uppercases the first letter of each segment (ASCII only)
/// and concatenates with no separator; the rest of each segment is kept
/// verbatim. Schema validation and both code generators must agree on this
/// mapping, so it lives here and nowhere else.
pub fn snake_to_camel(snake: &str) -> String {
    let mut camel = String::with_capacity(snake.len());
    let mut next_uppercase = true;

    for ch in snake.chars() {
        if ch == '_' {
            next_uppercase = true;
        } else if next_uppercase {
            camel.push(ch.to_ascii_uppercase());
            next_uppercase = false;
        } else {
            camel.push(ch);
        }
    }

    camel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_conversion() {
        assert_eq!(snake_to_camel("move_player"), "MovePlayer");
        assert_eq!(snake_to_camel("chat_message"), "ChatMessage");
        assert_eq!(snake_to_camel("ping"), "Ping");
    }

    #[test]
    fn test_preserves_inner_casing() {
        assert_eq!(snake_to_camel("session_ID"), "SessionID");
        assert_eq!(snake_to_camel("udp_v2"), "UdpV2");
    }

    #[test]
    fn test_idempotent_without_underscores() {
        let once = snake_to_camel("MovePlayer");
        assert_eq!(snake_to_camel(&once), once);
        assert_eq!(once, "MovePlayer");
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(snake_to_camel(""), "");
        assert_eq!(snake_to_camel("_"), "");
        assert_eq!(snake_to_camel("__leading"), "Leading");
    }
}
