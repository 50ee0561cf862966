use similar::TextDiff;

/// Lines of context around each hunk
const CONTEXT_LINES: usize = 3;

/// Unified diff of two texts; empty when they are identical
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    if old == new {
        return String::new();
    }

    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header(old_label, new_label)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_yield_empty_diff() {
        assert_eq!(unified_diff("a\nb\n", "a\nb\n", "x", "y"), "");
    }

    #[test]
    fn test_changed_line_is_reported() {
        let diff = unified_diff("- noto\n- zram\n", "- roboto\n- zram\n", "HEAD~1", "HEAD");
        assert!(diff.starts_with("--- HEAD~1\n+++ HEAD\n"));
        assert!(diff.contains("-- noto\n"));
        assert!(diff.contains("+- roboto\n"));
    }
}
