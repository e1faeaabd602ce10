use std::sync::LazyLock;

use regex::Regex;

use crate::domain::relay::value_objects::MAX_CAPTION_CHARS;

static JSON_OBJECT_SPAN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").ok());

/// First brace-delimited span of a reply: from the first `{` to the last `}`.
pub fn extract_json_object(reply: &str) -> Option<&str> {
    JSON_OBJECT_SPAN
        .as_ref()?
        .find(reply)
        .map(|m| m.as_str())
}

/// Candidate JSON objects in a reply, most likely first.
///
/// The widest `{ ... }` span comes first, followed by every top-level
/// balanced object in order of appearance. Duplicates are skipped.
pub fn extract_json_candidates(reply: &str) -> Vec<&str> {
    let mut candidates = Vec::new();

    if let Some(span) = extract_json_object(reply) {
        candidates.push(span);
    }

    for object in balanced_objects(reply) {
        if !candidates.contains(&object) {
            candidates.push(object);
        }
    }

    candidates
}

fn balanced_objects(text: &str) -> Vec<&str> {
    let mut objects = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = idx;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    objects.push(&text[start..=idx]);
                }
            }
            _ => {}
        }
    }

    objects
}

/// Caption sent with the relayed photo: `"<label>:\n<reply>"`, cut to the
/// bot API caption limit.
pub fn relay_caption(label: &str, reply: &str) -> String {
    let caption = format!("{}:\n{}", label, reply);
    if caption.chars().count() <= MAX_CAPTION_CHARS {
        return caption;
    }

    caption.chars().take(MAX_CAPTION_CHARS).collect()
}
