//! Stdio message framing.
//!
//! Requests normally arrive with `Content-Length` headers. Some clients send
//! bare newline-delimited JSON instead; the first such line switches replies
//! to ND-JSON for the rest of the process.

use serde_json::json;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static RAW_JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Preview length of message bodies in trace logs.
const PREVIEW_BYTES: usize = 200;

pub fn read_message<R: BufRead>(reader: &mut R) -> anyhow::Result<Vec<u8>> {
    let mut line = String::new();
    let mut content_length: Option<usize> = None;
    let mut header_lines = 0usize;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            anyhow::bail!("eof");
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            if header_lines == 0 {
                // Blank separator lines between ND-JSON messages.
                continue;
            }
            break;
        }
        header_lines += 1;
        if header_lines == 1 && trimmed.starts_with('{') {
            if !RAW_JSON_MODE.swap(true, Ordering::Relaxed) {
                tracing::debug!("client sends bare JSON lines; replying in ND-JSON");
            }
            return Ok(trimmed.as_bytes().to_vec());
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = Some(value.trim().parse::<usize>()?);
            }
        }
    }
    let len = content_length.ok_or_else(|| anyhow::anyhow!("missing Content-Length"))?;
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    tracing::trace!(
        content_length = len,
        preview = %String::from_utf8_lossy(&body[..len.min(PREVIEW_BYTES)]),
        "framed message read"
    );
    Ok(body)
}

pub fn write_response<W: Write>(
    writer: &mut W,
    id: serde_json::Value,
    result: serde_json::Value,
) -> anyhow::Result<()> {
    write_message(writer, &json!({"jsonrpc": "2.0", "id": id, "result": result}))
}

pub fn write_error<W: Write>(
    writer: &mut W,
    id: serde_json::Value,
    code: i64,
    message: &str,
) -> anyhow::Result<()> {
    write_message(
        writer,
        &json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}}),
    )
}

fn write_message<W: Write>(writer: &mut W, v: &serde_json::Value) -> anyhow::Result<()> {
    let body = serde_json::to_string(v)?;
    let force_ndjson = std::env::var("MCP_FORCE_NDJSON").ok().as_deref() == Some("1");
    if force_ndjson || RAW_JSON_MODE.load(Ordering::Relaxed) {
        writeln!(writer, "{body}")?;
    } else {
        write!(writer, "Content-Length: {}\r\n\r\n{}", body.len(), body)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[test]
    fn reads_content_length_frames() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let framed = format!(
            "Content-Length: {}\r\nContent-Type: application/json\r\n\r\n{}",
            body.len(),
            body
        );
        let mut reader = BufReader::new(Cursor::new(framed.into_bytes()));
        let msg = read_message(&mut reader).unwrap();
        assert_eq!(msg, body.as_bytes());
        assert!(read_message(&mut reader).is_err(), "eof after one frame");
    }

    #[test]
    fn accepts_bare_json_lines() {
        let input = "{\"jsonrpc\":\"2.0\",\"id\":1}\n\n{\"jsonrpc\":\"2.0\",\"id\":2}\n";
        let mut reader = BufReader::new(Cursor::new(input.as_bytes().to_vec()));
        let first: serde_json::Value = serde_json::from_slice(&read_message(&mut reader).unwrap()).unwrap();
        let second: serde_json::Value = serde_json::from_slice(&read_message(&mut reader).unwrap()).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(second["id"], 2);
    }

    #[test]
    fn missing_length_is_an_error() {
        let mut reader = BufReader::new(Cursor::new(b"X-Other: 1\r\n\r\n{}".to_vec()));
        assert!(read_message(&mut reader).is_err());
    }

    #[test]
    fn error_replies_carry_code_and_message() {
        let mut out = Vec::new();
        write_error(&mut out, json!(7), -32601, "method not found").unwrap();
        let text = String::from_utf8(out).unwrap();
        let json_start = text.find('{').unwrap();
        let v: serde_json::Value = serde_json::from_str(text[json_start..].trim()).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["error"]["code"], -32601);
        assert_eq!(v["error"]["message"], "method not found");
    }
}
