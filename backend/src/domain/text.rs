//! Text helpers shared by entity validation and patch merging.

/// Whether `value` is empty once surrounding whitespace is removed.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Keep a patch value only when it carries non-blank text.
///
/// Blank strings mean "leave unchanged"; they never clear a field.
pub(crate) fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|text| !is_blank(text))
}
