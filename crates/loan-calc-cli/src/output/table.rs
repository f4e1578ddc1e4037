use loan_calc_core::CURRENCY_LABEL;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{plain_text, MONEY_FIELDS};

/// Format output as a two-column table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_table(result, map),
            _ => println!("{}", field_table(map)),
        },
        _ => println!("{}", plain_text(value, "null")),
    }
}

fn print_result_table(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    println!("{}", field_table(result));

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

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), table_cell(key, val)]);
    }
    builder.build()
}

fn table_cell(key: &str, value: &Value) -> String {
    let text = plain_text(value, "null");
    if MONEY_FIELDS.contains(&key) {
        format!("{} {}", CURRENCY_LABEL, text)
    } else {
        text
    }
}
