use serde_json::Value;
use std::io;

use super::plain_text;

/// Write output as two-column CSV (`field,value`) to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let fields = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        _ => {
            wtr.write_record([plain_text(value, "")])?;
            return wtr.flush().map_err(csv::Error::from);
        }
    };

    wtr.write_record(["field", "value"])?;
    for (key, val) in fields {
        wtr.write_record([key.as_str(), &plain_text(val, "")])?;
    }
    wtr.flush().map_err(csv::Error::from)
}
