/// Reduce a raw path to its canonical logical key: forward slashes only, no
/// leading or trailing slash, no doubled separators.
///
/// Every path goes through this before becoming a map key on either side, so
/// the local and Mega inventories are comparable by exact string equality.
/// An empty or all-slash input reduces to the empty string; callers treat
/// that as the root and skip it.
pub fn normalize(raw: &str) -> String {
    raw.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_separators_and_runs() {
        assert_eq!(normalize("\\a//b\\c/"), "a/b/c");
    }

    #[test]
    fn test_leading_and_trailing_slashes_stripped() {
        assert_eq!(normalize("///photos/2023///"), "photos/2023");
    }

    #[test]
    fn test_already_normalized_is_untouched() {
        assert_eq!(normalize("docs/report.txt"), "docs/report.txt");
    }

    #[test]
    fn test_empty_and_all_slash_reduce_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("/"), "");
        assert_eq!(normalize("\\\\//"), "");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["\\a//b\\c/", "//x", "a/b", "", "///"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
