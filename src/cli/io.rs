//! JSON output for the CLI
//!
//! Every command writes a single JSON object to stdout:
//! `{"status": "ok", "data": ...}`.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let stdout = io::stdout();
    write_response_to(&mut stdout.lock(), data)
}

/// Write a success response to `out`
pub fn write_response_to(out: &mut impl Write, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_envelope() {
        let mut out = Vec::new();
        write_response_to(&mut out, json!({"total": 2})).unwrap();

        let written: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(written, json!({"status": "ok", "data": {"total": 2}}));
    }
}
