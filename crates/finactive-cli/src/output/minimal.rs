use serde_json::Value;

use super::format_cell;

/// Print just the key answer value from the output.
///
/// Looks for well-known fields in the result (descending into `metrics`),
/// then falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    let metrics = result_obj.get("metrics").unwrap_or(result_obj);

    let priority_keys = ["net_worth", "clients", "assessed"];

    for obj in [metrics, result_obj] {
        if let Value::Object(map) = obj {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_cell(val));
                        return;
                    }
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_cell(val));
            return;
        }
    }

    println!("{}", format_cell(result_obj));
}
