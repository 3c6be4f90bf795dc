/// Trim the ends and collapse every whitespace run into a single space
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn word_count(raw: &str) -> usize {
    raw.split_whitespace().count()
}
