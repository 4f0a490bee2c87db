//! Plain-text extraction from uploaded documents.

use crate::errors::ExtractError;
use std::path::Path;

#[cfg(feature = "extract-docx")]
use quick_xml::events::Event;
#[cfg(feature = "extract-docx")]
use quick_xml::Reader as XmlReader;

/// Extract whitespace-normalised text from a PDF, DOCX or plain-text file.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let raw = match ext.as_str() {
        "pdf" => extract_pdf(path)?,
        "docx" => extract_docx(path)?,
        "doc" => return Err(ExtractError::Unsupported(ext)),
        _ => extract_plain_text(path)?,
    };

    let mut out = String::with_capacity(raw.len());
    let mut last_space = true;
    push_clean_text(&mut out, &raw, &mut last_space);
    let text = out.trim_end().to_string();
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    tracing::debug!(path = %path.display(), chars = text.chars().count(), "text extracted");
    Ok(text)
}

fn extract_plain_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::Io(format!("{}: {e}", path.display())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(feature = "extract-pdf")]
fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Parse {
        format: "pdf",
        message: e.to_string(),
    })
}

#[cfg(not(feature = "extract-pdf"))]
fn extract_pdf(_path: &Path) -> Result<String, ExtractError> {
    Err(ExtractError::Unsupported("pdf".into()))
}

#[cfg(feature = "extract-docx")]
fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    use std::io::Read;

    let parse = |message: String| ExtractError::Parse {
        format: "docx",
        message,
    };
    let file = std::fs::File::open(path)
        .map_err(|e| ExtractError::Io(format!("{}: {e}", path.display())))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| parse(e.to_string()))?;
    let mut doc = archive
        .by_name("word/document.xml")
        .map_err(|e| parse(format!("word/document.xml: {e}")))?;
    let mut xml = String::new();
    doc.read_to_string(&mut xml)
        .map_err(|e| parse(e.to_string()))?;
    text_from_document_xml(&xml).map_err(parse)
}

#[cfg(not(feature = "extract-docx"))]
fn extract_docx(_path: &Path) -> Result<String, ExtractError> {
    Err(ExtractError::Unsupported("docx".into()))
}

/// Text of the `w:t` runs in a WordprocessingML body. Run whitespace is kept,
/// tabs and breaks become spaces, and paragraphs end with a space.
#[cfg(feature = "extract-docx")]
fn text_from_document_xml(xml: &str) -> Result<String, String> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut last_space = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(start)) if ends_with_tag(start.name().as_ref(), b"t") => in_text = true,
            Ok(Event::End(end)) if ends_with_tag(end.name().as_ref(), b"t") => in_text = false,
            Ok(Event::Text(text)) if in_text => {
                let text = text.unescape().map_err(|e| e.to_string())?;
                push_clean_text(&mut out, &text, &mut last_space);
            }
            Ok(Event::Empty(tag))
                if ends_with_tag(tag.name().as_ref(), b"tab")
                    || ends_with_tag(tag.name().as_ref(), b"br") =>
            {
                push_clean_text(&mut out, " ", &mut last_space);
            }
            Ok(Event::End(end)) if ends_with_tag(end.name().as_ref(), b"p") => {
                push_clean_text(&mut out, " ", &mut last_space);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

/// Matches `tag` with or without a namespace prefix (`w:p`).
#[cfg(feature = "extract-docx")]
fn ends_with_tag(name: &[u8], tag: &[u8]) -> bool {
    name == tag
        || (name.len() > tag.len() + 1
            && name.ends_with(tag)
            && name[name.len() - tag.len() - 1] == b':')
}

fn push_clean_text(out: &mut String, text: &str, last_space: &mut bool) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !*last_space {
                out.push(' ');
                *last_space = true;
            }
        } else {
            out.push(ch);
            *last_space = false;
        }
    }
}
