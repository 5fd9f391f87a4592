const LIST_ITEM_MAX_CHARS: usize = 90;
const LIST_ITEM_KEEP_CHARS: usize = 87;

/// Single-line label for the history list
///
/// Whitespace runs collapse to one space, long items are cut with `...`, and
/// favorites get a star prefix.
pub fn format_list_item(item: &str, favorite: bool) -> String {
    let one_line = item.split_whitespace().collect::<Vec<_>>().join(" ");

    let label = if one_line.chars().count() > LIST_ITEM_MAX_CHARS {
        let mut cut: String = one_line.chars().take(LIST_ITEM_KEEP_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        one_line
    };

    let prefix = if favorite { "★ " } else { "  " };
    format!("{}{}", prefix, label)
}

/// Reverse the order of lines in `text`, joining them with `\n`
///
/// Lines end at any of the breaks in [`split_lines`].
pub fn reverse_lines(text: &str) -> String {
    let mut lines = split_lines(text);
    lines.reverse();
    lines.join("\n")
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on `\n`, `\r\n`, a lone `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL and the Unicode line and paragraph separators
///
/// A trailing break does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r'
            && let Some(&(next_idx, '\n')) = chars.peek()
        {
            chars.next();
            start = next_idx + 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_collapses_whitespace() {
        assert_eq!(format_list_item("  a\n\tb   c ", false), "  a b c");
    }

    #[test]
    fn test_format_favorite_prefix() {
        assert_eq!(format_list_item("pinned", true), "★ pinned");
    }

    #[test]
    fn test_format_exactly_ninety_chars_untouched() {
        let item = "x".repeat(90);
        assert_eq!(format_list_item(&item, false), format!("  {}", item));
    }

    #[test]
    fn test_format_truncates_long_items() {
        let item = "y".repeat(91);
        let label = format_list_item(&item, false);
        assert_eq!(label, format!("  {}...", "y".repeat(87)));
    }

    #[test]
    fn test_format_truncates_by_chars_not_bytes() {
        let item = "é".repeat(100);
        let label = format_list_item(&item, false);
        assert!(label.ends_with("..."));
        assert_eq!(label.chars().count(), 2 + 87 + 3);
    }

    #[test]
    fn test_reverse_lines() {
        assert_eq!(reverse_lines("one\ntwo\nthree"), "three\ntwo\none");
    }

    #[test]
    fn test_reverse_lines_crlf() {
        assert_eq!(reverse_lines("a\r\nb"), "b\na");
    }

    #[test]
    fn test_reverse_lines_lone_carriage_return() {
        assert_eq!(reverse_lines("a\rb"), "b\na");
    }

    #[test]
    fn test_reverse_lines_unicode_separators() {
        assert_eq!(reverse_lines("a\u{2028}b\u{2029}c"), "c\nb\na");
        assert_eq!(reverse_lines("a\x0bb\x0cc\u{85}d"), "d\nc\nb\na");
    }

    #[test]
    fn test_split_lines_edges() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("\n\nb"), vec!["", "", "b"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r"), vec!["a"]);
    }

    #[test]
    fn test_reverse_lines_single_line() {
        assert_eq!(reverse_lines("only"), "only");
    }
}
