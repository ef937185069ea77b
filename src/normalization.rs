/// Normalizes a display name by stripping surrounding whitespace and
/// composing it into Unicode Normalization Form C.
///
/// ```
/// use video_catalog::normalization::normalize_name;
/// assert_eq!(normalize_name(" yoga\u{0301} "), "yog\u{00e1}");
/// ```
pub fn normalize_name(name: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    name.as_ref().trim().nfc().collect()
}

/// Returns `None` for text that is empty once trimmed.
pub fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
