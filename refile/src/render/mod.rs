//! Typed render structures for the replace form and the file-upload widget.
//!
//! The host framework renders arbitrary nested render trees; here the two
//! elements this subsystem touches are described as explicit structs with
//! visibility flags and weights, rendered to markup strings for the AJAX
//! command payloads.

pub mod form;
pub mod widget;

/// Derive a stable DOM/CSS identifier from a form-type identifier:
/// lowercased, with runs of anything outside `[a-z0-9]` collapsed to a
/// single `-`.
pub fn html_id(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    id
}

/// Minimal HTML escaping for text interpolated into markup.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_id_normalizes_form_identifiers() {
        assert_eq!(html_id("file_replace_form"), "file-replace-form");
        assert_eq!(html_id("File.Replace__Form"), "file-replace-form");
        assert_eq!(html_id("_leading"), "leading");
    }

    #[test]
    fn escape_covers_markup_metacharacters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
