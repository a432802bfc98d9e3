/// Collapse every run of whitespace to a single space and trim both ends.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join the non-empty items with single spaces.
pub fn join_nonempty<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(part);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::{join_nonempty, normalize_whitespace};

    #[test]
    fn collapses_newlines_and_indentation() {
        assert_eq!(normalize_whitespace("Hello\n\n  world"), "Hello world");
    }

    #[test]
    fn trims_and_handles_blank_input() {
        assert_eq!(normalize_whitespace("  \t a  b \n"), "a b");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn join_skips_empty_parts() {
        assert_eq!(join_nonempty(["a", "", "b"]), "a b");
        assert_eq!(join_nonempty(Vec::<String>::new()), "");
    }
}
