//! Category name canonicalization used by card writes.

/// Title-cases `s`: a cased letter that follows another cased letter is
/// lower-cased, any other cased letter takes its title-case form. Digits,
/// punctuation and uncased letters (CJK, for instance) end a word.
///
/// `"machine-learning"` becomes `"Machine-Learning"`, `"rUST 2024"` becomes
/// `"Rust 2024"`, `"straße"` stays `"Straße"` and `"ßa"` becomes `"Ssa"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = is_cased(c);
        if !cased {
            out.push(c);
        } else if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            push_title(&mut out, c);
        }
        prev_cased = cased;
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || digraph_title(c).is_some()
}

/// Latin digraphs with a dedicated title-case letter distinct from upper.
fn digraph_title(c: char) -> Option<char> {
    match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    }
}

/// Multi-char upper mappings (`ß` -> `SS`) keep only the head upper-cased.
fn push_title(out: &mut String, c: char) {
    if let Some(title) = digraph_title(c) {
        out.push(title);
        return;
    }
    let mut upper = c.to_uppercase();
    if let Some(head) = upper.next() {
        out.push(head);
        out.extend(upper.flat_map(char::to_lowercase));
    }
}

/// Title-cases every name and drops repeats, keeping first-seen order.
pub fn canonical_category_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let canonical = title_case(name.as_ref());
        if !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    out
}
