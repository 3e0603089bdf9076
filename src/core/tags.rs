/// Classifies one token: `+tag`/`tag` are included, `-tag`/`!tag` excluded.
fn classify(tag: &str) -> (&str, bool) {
    match tag.as_bytes().first() {
        Some(b'+') => (&tag[1..], true),
        Some(b'-') | Some(b'!') => (&tag[1..], false),
        _ => (tag, true),
    }
}

/// Splits a comma-separated tag expression into `(tags_include, tags_exclude)`.
///
/// Every token lands in exactly one of the two lists; an empty token is kept
/// as an empty include entry.
pub fn split_tags(tags: &str) -> (String, String) {
    if tags.is_empty() {
        return (String::new(), String::new());
    }

    let mut include = Vec::new();
    let mut exclude = Vec::new();

    for tag in tags.split(',') {
        match classify(tag) {
            (bare, true) => include.push(bare),
            (bare, false) => exclude.push(bare),
        }
    }

    (include.join(","), exclude.join(","))
}
