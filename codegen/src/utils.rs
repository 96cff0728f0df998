use serde_json;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}
