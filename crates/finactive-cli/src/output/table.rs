use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, format_cell};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", format_cell(value));
        return;
    };

    if let Some(result) = map.get("result") {
        print_fields(result);
        print_envelope_notes(map);
    } else if let Some(Value::Array(rows)) = map.get("results") {
        print_rows(rows);
        let totals: Vec<String> = map
            .iter()
            .filter(|(k, _)| k.as_str() != "results")
            .map(|(k, v)| format!("{}: {}", k, format_cell(v)))
            .collect();
        println!("\n{}", totals.join(", "));
    } else {
        print_fields(value);
    }
}

fn print_fields(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        builder.push_record([key, format_cell(&val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                .collect();
            builder.push_record(cells);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
