use crate::value::{BlockValue, FieldValue, StreamValue};

/// Convert CMS markup to markdown. Plain text passes through unchanged.
pub fn to_markdown(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }
    html2md::parse_html(markup).trim().to_string()
}

/// Convert an ordered block stream into one markdown string.
///
/// Rich-text blocks convert their markup; mapping blocks emit one
/// `**key**: value` line per text or rich-text entry; plain-text blocks pass
/// through verbatim; anything else contributes nothing. Blocks are joined
/// with a blank line.
pub fn stream_to_markdown(stream: &StreamValue) -> String {
    let mut parts: Vec<String> = Vec::new();
    for block in stream.blocks() {
        match &block.value {
            BlockValue::RichText(rich) => parts.push(to_markdown(&rich.source)),
            BlockValue::Mapping(entries) => {
                let mut lines: Vec<String> = Vec::new();
                for (key, value) in entries {
                    match value {
                        FieldValue::Text(text) => lines.push(format!("**{key}**: {text}")),
                        FieldValue::RichText(rich) => {
                            lines.push(format!("**{key}**: {}", to_markdown(&rich.source)));
                        }
                        _ => {}
                    }
                }
                if !lines.is_empty() {
                    parts.push(lines.join("\n"));
                }
            }
            BlockValue::Text(text) => parts.push(text.clone()),
            BlockValue::Other(_) => {}
        }
    }
    parts.join("\n\n")
}
