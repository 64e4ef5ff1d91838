//! Type signature decoding: `[Post!]!` → wrappers + bare label.

/// Marks a value as non-nullable when it trails a signature.
pub const REQUIRED_MARKER: char = '!';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<'a> {
    pub label: &'a str,
    pub is_optional: bool,
    pub list_depth: usize,
    pub is_list_value_optional: bool,
}

/// Returns `None` when the signature is not a (possibly wrapped) name.
pub fn decode(raw: &str) -> Option<Signature<'_>> {
    let raw = raw.trim();
    let is_optional = !raw.ends_with(REQUIRED_MARKER);

    let unwrapped = raw.trim_end_matches(REQUIRED_MARKER);
    let list_depth = unwrapped.chars().take_while(|c| *c == '[').count();
    let label = unwrapped
        .trim_start_matches('[')
        .trim_end_matches([']', REQUIRED_MARKER]);

    // a list element is required when `!` sits right before the closing bracket
    let is_list_value_optional = list_depth > 0
        && unwrapped
            .strip_suffix(']')
            .is_some_and(|inner| !inner.ends_with(REQUIRED_MARKER));

    let closing = unwrapped.chars().filter(|c| *c == ']').count();
    let well_formed = !label.is_empty()
        && label.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
        && closing == list_depth
        && (list_depth == 0 || unwrapped.ends_with(']'));

    well_formed.then_some(Signature { label, is_optional, list_depth, is_list_value_optional })
}
