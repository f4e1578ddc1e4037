use serde_json::Value;

use super::plain_text;

/// Print just the key answer value from the output.
///
/// Looks for well-known fields in order of priority, then falls back to the
/// first field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["monthly_payment", "valid"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return plain_text(val, "null");
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, plain_text(val, "null"));
        }
    }

    plain_text(result_obj, "null")
}
