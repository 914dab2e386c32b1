//! `{placeholder}` substitution for menu texts.

use crate::error::DialogueError;
use fitbot_sessions::SessionData;

/// Render a menu text.
///
/// `{contact}` and `{CONTACT}` expand to the session's display name
/// (as-is and upper-cased). Any other `{key}` expands to the form value
/// stored under `key`; a missing key is an error. `{{` and `}}` are
/// literal braces, and braces that do not wrap a plain identifier are
/// copied through untouched.
pub fn render(template: &str, contact: &str, data: &SessionData) -> Result<String, DialogueError> {
    let mut out = String::with_capacity(template.len());
    for piece in pieces(template) {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Key(key) => out.push_str(&lookup(key, contact, data)?),
        }
    }
    Ok(out)
}

/// Double every brace so `text` renders back to itself.
pub fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

fn lookup(key: &str, contact: &str, data: &SessionData) -> Result<String, DialogueError> {
    match key {
        "contact" => Ok(contact.to_string()),
        "CONTACT" => Ok(contact.to_uppercase()),
        _ => data
            .get(key)
            .map(|v| v.to_string())
            .ok_or_else(|| DialogueError::MissingField(key.to_string())),
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

enum Piece<'a> {
    Text(&'a str),
    Key(&'a str),
}

fn pieces(template: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(|c| c == '{' || c == '}') {
        if pos > 0 {
            out.push(Piece::Text(&rest[..pos]));
        }
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push(Piece::Text(&tail[..1]));
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('{') {
            let after = &tail[1..];
            if let Some(close) = after.find('}') {
                let key = &after[..close];
                if is_identifier(key) {
                    out.push(Piece::Key(key));
                    rest = &after[close + 1..];
                    continue;
                }
            }
        }
        out.push(Piece::Text(&tail[..1]));
        rest = &tail[1..];
    }

    if !rest.is_empty() {
        out.push(Piece::Text(rest));
    }
    out
}

/// Placeholder keys used by a template, in order of appearance.
pub(crate) fn placeholders(template: &str) -> Vec<&str> {
    pieces(template)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Key(key) => Some(key),
            Piece::Text(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitbot_core::value::Scalar;

    fn data(pairs: &[(&str, &str)]) -> SessionData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Scalar::from(*v)))
            .collect()
    }

    #[test]
    fn test_contact_placeholders() {
        let out = render("Olá {contact}! *{CONTACT}*", "Ana Paula", &data(&[])).unwrap();
        assert_eq!(out, "Olá Ana Paula! *ANA PAULA*");
    }

    #[test]
    fn test_data_placeholders() {
        let d = data(&[("time", "TERÇA - 14:00 às 15:00"), ("name", "João")]);
        let out = render("{name} em {time}", "x", &d).unwrap();
        assert_eq!(out, "João em TERÇA - 14:00 às 15:00");
    }

    #[test]
    fn test_missing_field_is_error() {
        let err = render("Horário: {time}", "x", &data(&[])).unwrap_err();
        assert!(matches!(err, DialogueError::MissingField(ref k) if k == "time"));
    }

    #[test]
    fn test_non_identifier_braces_pass_through() {
        let out = render("{ } {a-b} {unclosed", "x", &data(&[])).unwrap();
        assert_eq!(out, "{ } {a-b} {unclosed");
    }

    #[test]
    fn test_emoji_text_untouched() {
        let out = render("1️⃣  PLANOS 💪", "x", &data(&[])).unwrap();
        assert_eq!(out, "1️⃣  PLANOS 💪");
    }

    #[test]
    fn test_placeholders_listed() {
        assert_eq!(placeholders("{contact} {time} { } {name}"), vec!["contact", "time", "name"]);
        assert!(placeholders("{{time}} {{contact}}").is_empty());
    }

    #[test]
    fn test_doubled_braces_are_literal() {
        let out = render("{{time}} for {contact} }}", "Ana", &data(&[])).unwrap();
        assert_eq!(out, "{time} for Ana }");
    }

    #[test]
    fn test_escaped_text_renders_verbatim() {
        let name = "Academia {Centro} }{ {{x}}";
        let out = render(&format!("*{}*", escape(name)), "x", &data(&[])).unwrap();
        assert_eq!(out, format!("*{name}*"));
    }
}
