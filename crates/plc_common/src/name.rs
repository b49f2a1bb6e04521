//! Parsing of `<prefix>_<index>` names used throughout the input formats.

/// Parses `name` as `<prefix>_<index>` and returns the index.
///
/// Used for instance names (`inst_12`), net names (`net_3`) and pin names
/// (`I_0`, `O_1`).
pub fn parse_indexed_name(name: &str, prefix: &str) -> Option<u32> {
    let rest = name.strip_prefix(prefix)?.strip_prefix('_')?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_index() {
        assert_eq!(parse_indexed_name("I_3", "I"), Some(3));
        assert_eq!(parse_indexed_name("inst_1200", "inst"), Some(1200));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(parse_indexed_name("I3", "I"), None);
        assert_eq!(parse_indexed_name("I_-1", "I"), None);
        assert_eq!(parse_indexed_name("O_1", "I"), None);
        assert_eq!(parse_indexed_name("I_", "I"), None);
    }
}
