use serde_json::{Map, Value};

/// Best-effort recovery of the first JSON object embedded anywhere in
/// free-form model output.
///
/// Scans for balanced-brace candidate substrings (string literals and
/// escapes respected), attempts a strict parse on each, and returns the
/// first candidate that parses to an object. Returns `None` when no
/// candidate parses.
pub fn first_json_object(text: &str) -> Option<Map<String, Value>> {
    let bytes = text.as_bytes();

    for (start, _) in text.char_indices().filter(|&(_, c)| c == '{') {
        let Some(end) = balanced_end(bytes, start) else {
            continue;
        };
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text[start..end]) {
            return Some(map);
        }
    }

    None
}

/// Byte offset one past the brace that balances `bytes[start]`, or `None`
/// if the input ends first.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_object_with_surrounding_prose() {
        let text = r#"Sure! {"executive_summary":"X","key_findings":["a"],"recommendations":["b"]} hope that helps"#;
        let map = first_json_object(text).expect("object");
        assert_eq!(map["executive_summary"], "X");
        assert_eq!(map["key_findings"][0], "a");
    }

    #[test]
    fn skips_unparseable_candidates() {
        let text = r#"{not json} and then {"ok": true}"#;
        let map = first_json_object(text).expect("object");
        assert_eq!(map["ok"], true);
    }

    #[test]
    fn handles_nested_objects() {
        let text = r#"prefix {"outer": {"inner": 1}} suffix"#;
        let map = first_json_object(text).expect("object");
        assert_eq!(map["outer"]["inner"], 1);
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let text = r#"{"note": "odd } brace", "n": 2}"#;
        let map = first_json_object(text).expect("object");
        assert_eq!(map["n"], 2);
    }

    #[test]
    fn returns_none_without_object() {
        assert!(first_json_object("no json here").is_none());
        assert!(first_json_object("[1, 2, 3]").is_none());
        assert!(first_json_object("{truncated").is_none());
    }
}
