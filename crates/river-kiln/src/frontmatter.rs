//! YAML frontmatter: splitting, reading `previous`, rewriting `previous`
//!
//! Frontmatter is the block fenced by `---` lines at the very top of a note.
//! Both LF and CRLF line endings are accepted, and a leading byte-order mark
//! is skipped.

use serde_yaml::Value;

const FENCE: &str = "---";
const PREVIOUS_KEY: &str = "previous";

/// A note split into its frontmatter block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Raw YAML between the fences, `None` when the note has no frontmatter
    pub frontmatter: Option<&'a str>,
    pub body: &'a str,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    yaml_start: usize,
    yaml_end: usize,
    body_start: usize,
}

fn locate(content: &str) -> Option<Bounds> {
    let bom = if content.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };
    let head = &content[bom..];
    let opening = if head.starts_with("---\n") {
        4
    } else if head.starts_with("---\r\n") {
        5
    } else {
        return None;
    };

    let yaml_start = bom + opening;
    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        if trim_newline(line) == FENCE {
            return Some(Bounds {
                yaml_start,
                yaml_end: offset,
                body_start: offset + line.len(),
            });
        }
        offset += line.len();
    }

    None
}

fn trim_newline(line: &str) -> &str {
    line.trim_end_matches(&['\r', '\n'][..])
}

/// Split a note into frontmatter and body.
///
/// An opening fence without a closing one is not frontmatter; the whole
/// content is then body.
pub fn split_frontmatter(content: &str) -> Split<'_> {
    match locate(content) {
        Some(bounds) => Split {
            frontmatter: Some(&content[bounds.yaml_start..bounds.yaml_end]),
            body: &content[bounds.body_start..],
        },
        None => Split {
            frontmatter: None,
            body: content,
        },
    }
}

/// Raw text of the `previous` field.
///
/// Scalars come back as written. The unquoted form `previous: [[note]]`,
/// which YAML reads as a nested sequence, comes back as `[[note]]`.
pub fn read_previous(yaml: &str) -> Result<Option<String>, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_yaml::from_str(yaml)?;
    Ok(value.get(PREVIOUS_KEY).and_then(previous_text))
}

fn previous_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Sequence(outer) => match outer.as_slice() {
            [Value::Sequence(inner)] => match inner.as_slice() {
                [single] => previous_text(single).map(|text| format!("[[{}]]", text)),
                _ => None,
            },
            _ => None,
        },
        Value::Tagged(tagged) => previous_text(&tagged.value),
        Value::Null | Value::Mapping(_) => None,
    }
}

/// Replace the `previous` field of a note, leaving every other byte alone.
///
/// An existing `previous` line (and any indented or list continuation of a
/// multi-line value) is replaced in place; otherwise the field is appended to
/// the frontmatter, which is created when missing.
pub fn rewrite_previous(content: &str, rendered: &str) -> String {
    let line = previous_line(rendered);

    let Some(bounds) = locate(content) else {
        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
        return format!("{FENCE}{newline}{line}{newline}{FENCE}{newline}{content}");
    };

    let newline = if content[..bounds.body_start].contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    };
    let yaml = &content[bounds.yaml_start..bounds.yaml_end];

    let mut out = String::with_capacity(content.len() + line.len());
    out.push_str(&content[..bounds.yaml_start]);

    let mut written = false;
    let mut skipping = false;
    for raw in yaml.split_inclusive('\n') {
        let text = trim_newline(raw);
        if skipping {
            if is_continuation(text) {
                continue;
            }
            skipping = false;
        }
        if is_previous_key(text) {
            if !written {
                out.push_str(&line);
                out.push_str(newline);
                written = true;
            }
            skipping = true;
            continue;
        }
        out.push_str(raw);
    }
    if !written {
        out.push_str(&line);
        out.push_str(newline);
    }

    out.push_str(&content[bounds.yaml_end..]);
    out
}

fn previous_line(rendered: &str) -> String {
    let plain = !rendered.is_empty()
        && rendered
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if plain {
        format!("{PREVIOUS_KEY}: {rendered}")
    } else {
        let escaped = rendered.replace('\\', "\\\\").replace('"', "\\\"");
        format!("{PREVIOUS_KEY}: \"{escaped}\"")
    }
}

fn is_previous_key(line: &str) -> bool {
    line.strip_prefix(PREVIOUS_KEY)
        .is_some_and(|rest| rest.trim_start().starts_with(':'))
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t') || line == "-" || line.starts_with("- ")
}
