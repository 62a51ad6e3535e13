// crates/country-card-core/src/html.rs

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape everything except `<code>` / `</code>` tags.
///
/// Admin notice messages may wrap shell commands in `<code>`; nothing else
/// gets through.
pub fn escape_allow_code(input: &str) -> String {
    const OPEN: &str = "<code>";
    const CLOSE: &str = "</code>";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while !rest.is_empty() {
        let next_tag = [OPEN, CLOSE]
            .into_iter()
            .filter_map(|tag| rest.find(tag).map(|at| (at, tag)))
            .min_by_key(|(at, _)| *at);
        match next_tag {
            Some((at, tag)) => {
                out.push_str(&escape(&rest[..at]));
                out.push_str(tag);
                rest = &rest[at + tag.len()..];
            }
            None => {
                out.push_str(&escape(rest));
                break;
            }
        }
    }
    out
}
