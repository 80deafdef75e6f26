use regex::Regex;
use std::sync::LazyLock;

static DRIVE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]:").unwrap());

/// Checks that `name` names an entry directly beneath the root.
///
/// This is a plain textual test and must run before the name is joined onto the root:
/// parent segments, absolute paths, nested paths and drive prefixes are all refused.
pub fn is_valid_entry_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.starts_with('/')
        && !name.starts_with('\\')
        && !name.contains(['/', '\\', '\0'])
        && !DRIVE_PREFIX.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["notes.txt", "a", "config.json", ".hidden", "with space.md", "dash-and_under"] {
            assert!(is_valid_entry_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_traversal_and_absolute_names() {
        for name in [
            "",
            "..",
            "../etc/passwd",
            "a..b",
            "/etc/passwd",
            "\\windows",
            "nested/file.txt",
            "nested\\file.txt",
            "C:evil",
            "nul\0byte",
        ] {
            assert!(!is_valid_entry_name(name), "{name:?} should be rejected");
        }
    }
}
