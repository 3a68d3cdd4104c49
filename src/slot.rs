//! Rewrites the layout slot of a fragment. A layout marks where the next,
//! more specific fragment goes with `{{block "layout.html" .}}` (or
//! `{{template "layout.html" .}}`). Every layout in a chain uses that same
//! name, so before a fragment joins the shared template set its slot
//! references are renamed to a name unique to that fragment.
//!
//! Only the name argument of `block` and `template` actions is touched;
//! text outside actions, comments and every other name are copied as is.

/// The result of [`rename`].
#[derive(Debug, PartialEq, Eq)]
pub struct Renamed {
    pub text: String,

    /// How many slot references were rewritten.
    pub count: usize,
}

/// Replaces references to the template `slot` in `text` with `renamed`.
pub fn rename(text: &str, slot: &str, renamed: &str) -> Renamed {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        let body_start = open + 2;
        let body_end = match action_end(&rest[body_start..]) {
            Some(end) => body_start + end,
            None => break,
        };
        out.push_str(&rest[..body_start]);
        let body = &rest[body_start..body_end];
        match rename_action(body, slot, renamed) {
            Some(body) => {
                out.push_str(&body);
                count += 1;
            }
            None => out.push_str(body),
        }
        out.push_str("}}");
        rest = &rest[body_end + 2..];
    }
    out.push_str(rest);
    Renamed { text: out, count }
}

// Finds the `}}` closing an action, skipping over quoted strings and
// comments.
fn action_end(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = quoted_end(bytes, i)?,
            b'`' => i = i + 1 + body[i + 1..].find('`')?,
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = i + 2 + body[i + 2..].find("*/")? + 1,
            b'}' if bytes.get(i + 1) == Some(&b'}') => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

// The index of the quote closing the string that opens at `start`.
fn quoted_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

// Rewrites `block "<slot>" ...` and `template "<slot>" ...` actions; `None`
// leaves the action alone.
fn rename_action(body: &str, slot: &str, renamed: &str) -> Option<String> {
    let trimmed = body.strip_prefix('-').unwrap_or(body);
    let offset = body.len() - trimmed.trim_start().len();
    let action = &body[offset..];

    let keyword_len = ["block", "template"]
        .iter()
        .find(|keyword| action.starts_with(*keyword))
        .map(|keyword| keyword.len())?;
    let args = &action[keyword_len..];
    let name = args.trim_start();
    if name.len() == args.len() {
        // `blocked`, `templates`, ...: not the keyword.
        return None;
    }

    let name_start = offset + keyword_len + (args.len() - name.len());
    let name_len = match name.as_bytes().first()? {
        b'"' => quoted_end(name.as_bytes(), 0)? + 1,
        b'`' => name[1..].find('`')? + 2,
        _ => return None,
    };
    let literal = &name[1..name_len - 1];
    if literal != slot {
        return None;
    }

    Some(format!(
        "{}{:?}{}",
        &body[..name_start],
        renamed,
        &body[name_start + name_len..]
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rename_block_and_template() {
        let renamed = rename(
            r#"header {{block "layout.html" .}}x{{end}} {{template "layout.html" .Inner}} footer"#,
            "layout.html",
            "layout.html@views",
        );
        assert_eq!(
            renamed.text,
            r#"header {{block "layout.html@views" .}}x{{end}} {{template "layout.html@views" .Inner}} footer"#
        );
        assert_eq!(renamed.count, 2);
    }

    #[test]
    fn test_other_names_and_text_untouched() {
        let text = r#"layout.html {{block "content" .}}{{end}}{{define "layout.html"}}d{{end}}{{.layout}}"#;
        let renamed = rename(text, "layout.html", "slot");
        assert_eq!(renamed.text, text);
        assert_eq!(renamed.count, 0);
    }

    #[test]
    fn test_trim_markers_and_raw_strings() {
        let renamed = rename("a {{- block `base.html` . -}}{{end}} b", "base.html", "s");
        assert_eq!(renamed.text, r#"a {{- block "s" . -}}{{end}} b"#);
        assert_eq!(renamed.count, 1);
    }

    #[test]
    fn test_braces_inside_strings_and_comments() {
        let text = r#"{{/* {{template "layout.html" .}} */}}{{printf "}}"}}{{template "layout.html" .}}"#;
        let renamed = rename(text, "layout.html", "s");
        assert_eq!(
            renamed.text,
            r#"{{/* {{template "layout.html" .}} */}}{{printf "}}"}}{{template "s" .}}"#
        );
        assert_eq!(renamed.count, 1);
    }

    #[test]
    fn test_unterminated_action_is_copied() {
        let renamed = rename(r#"x {{template "layout.html" ."#, "layout.html", "s");
        assert_eq!(renamed.text, r#"x {{template "layout.html" ."#);
        assert_eq!(renamed.count, 0);
    }
}
