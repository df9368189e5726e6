//! Text-level filtering of root-key sections in YAML documents.
//!
//! A root line is any non-blank line with no leading whitespace. Each root
//! line decides whether the section it starts is selected: its text must
//! begin with one of the target keys immediately followed by `:`. Every
//! line of a filtered-out section is replaced with an empty line, never
//! removed, so the output always has the same line count as the input and
//! stays line-addressable for diffs. Blank lines are not root lines; they
//! inherit the decision of the section they sit in.
//!
//! This is a purely syntactic transform. It does not understand block
//! scalars, anchors, or flow-style nesting: a flush-left continuation line
//! (for example inside a multi-line block scalar) is misclassified as a new
//! root key. Known limitation, kept for compatibility with the documents
//! this is used on.

/// Blank out the sections of the named root keys, keeping everything else.
pub fn remove_root_keys(input: &[u8], keys: &[&str]) -> Vec<u8> {
    filter_root_keys(input, keys, false)
}

/// Keep only the sections of the named root keys, blanking everything else.
pub fn keep_root_keys(input: &[u8], keys: &[&str]) -> Vec<u8> {
    filter_root_keys(input, keys, true)
}

fn filter_root_keys(input: &[u8], keys: &[&str], keep: bool) -> Vec<u8> {
    let text = String::from_utf8_lossy(input);
    let mut out: Vec<&str> = Vec::new();
    let mut selected = false;

    for line in text.split('\n') {
        let is_blank = line.trim().is_empty();
        let is_root = !is_blank && !line.starts_with(|c: char| c.is_whitespace());

        if is_root {
            selected = keys
                .iter()
                .any(|key| line.strip_prefix(key).is_some_and(|rest| rest.starts_with(':')));
        }

        let blank_out = if keep { !selected } else { selected };
        out.push(if blank_out { "" } else { line });
    }

    out.join("\n").into_bytes()
}
