/// Parse the comma-separated tag field of the edit form, dropping empty entries
pub fn parse_tags(tags_str: &str) -> Vec<String> {
    tags_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Inverse of [`parse_tags`] for pre-filling the form
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}
