use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON to stdout, newline terminated.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        eprintln!("JSON write error: {}", e);
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_is_pretty_and_terminated() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "monthly_payment": "88848.79" })).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\n  \"monthly_payment\": \"88848.79\"\n}\n"
        );
    }
}
