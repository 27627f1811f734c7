/// Identity key for a row field: surrounding whitespace and byte-order
/// marks removed, lower-cased.
pub(crate) fn normalize_field(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.trim().to_lowercase()
}
