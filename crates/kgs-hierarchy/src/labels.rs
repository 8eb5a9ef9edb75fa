//! State labels and titles.

/// Letter label for the state at `index`: `A`..`Z`, then `AA`, `AB`, ...
pub fn state_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// `"State {label}"`.
pub fn state_title(label: &str) -> String {
    format!("State {label}")
}

/// `"State {label} of {owner}"` with the owner's first letter lower-cased.
pub fn full_state_title(label: &str, owner: &str) -> String {
    format!("State {label} of {}", uncapitalize(owner))
}

pub(crate) fn uncapitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
