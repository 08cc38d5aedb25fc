//! Task-checkbox marker grammar.
//!
//! A list item whose content starts with exactly `[ ]`, `[x]` or `[X]`,
//! followed by a single space and then content, becomes a checkbox. Any
//! deviation — extra interior spaces, no separating space, marker not at
//! the very start — is left as literal text.

/// Checkbox markup for a checked/unchecked task item.
pub(crate) fn checkbox_html(checked: bool) -> &'static str {
    if checked {
        r#"<input type="checkbox" checked disabled>"#
    } else {
        r#"<input type="checkbox" disabled>"#
    }
}

/// Try to split a leading task marker off list-item text.
///
/// Returns the checked state and the remaining content (space separator
/// stripped), or `None` when the text does not begin with a well-formed
/// marker.
pub(crate) fn parse_task_marker(text: &str) -> Option<(bool, &str)> {
    let checked = match text.get(..3)? {
        "[ ]" => false,
        "[x]" | "[X]" => true,
        _ => return None,
    };
    let rest = text[3..].strip_prefix(' ')?;
    if rest.is_empty() {
        return None;
    }
    Some((checked, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_markers() {
        assert_eq!(parse_task_marker("[ ] task"), Some((false, "task")));
        assert_eq!(parse_task_marker("[x] task"), Some((true, "task")));
        assert_eq!(parse_task_marker("[X] task"), Some((true, "task")));
    }

    #[test]
    fn test_too_many_spaces() {
        assert_eq!(parse_task_marker("[  ] task"), None);
        assert_eq!(parse_task_marker("[x ] task"), None);
    }

    #[test]
    fn test_no_spaces() {
        assert_eq!(parse_task_marker("[]task"), None);
        assert_eq!(parse_task_marker("[x]task"), None);
    }

    #[test]
    fn test_marker_not_at_start() {
        assert_eq!(parse_task_marker("Not a task [ ] here"), None);
    }

    #[test]
    fn test_marker_without_content() {
        assert_eq!(parse_task_marker("[x]"), None);
        assert_eq!(parse_task_marker("[x] "), None);
    }

    #[test]
    fn test_non_ascii_text_does_not_panic() {
        assert_eq!(parse_task_marker("émoji first"), None);
    }
}
