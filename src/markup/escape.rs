//! Text escaping for markup output

/// Escapes text content and attribute values
///
/// The five XML entities are replaced, and newline, carriage return and tab
/// become numeric character references so that no raw whitespace control
/// characters reach the output.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Splits verbatim text into CDATA section contents
///
/// A literal `]]>` cannot appear inside a CDATA section, so it is split
/// across two adjacent sections. Text without a terminator yields a single
/// section, including empty text.
pub fn verbatim_segments(input: &str) -> Vec<String> {
    let parts: Vec<&str> = input.split("]]>").collect();
    let last = parts.len() - 1;
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let prefix = if i > 0 { ">" } else { "" };
            let suffix = if i < last { "]]" } else { "" };
            format!("{prefix}{part}{suffix}")
        })
        .collect()
}

/// Makes text safe to place inside a comment
///
/// Comments may not contain `--`, so every such run is broken up.
pub fn sanitize_comment(input: &str) -> String {
    let mut out = input.to_string();
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    out
}
