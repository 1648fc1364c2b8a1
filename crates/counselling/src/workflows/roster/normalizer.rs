/// Canonical form of a roster header: invisible characters stripped, whitespace collapsed,
/// lower-cased. Spreadsheet exports vary all three.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Trimmed cell value, `None` when the cell is blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(|value| value.replace(['\u{feff}', '\u{200b}'], ""))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_header(value)
}
