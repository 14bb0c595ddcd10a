//! Column arithmetic and whitespace rewriting
//!
//! Indent runs are measured the way they are written: a tab advances
//! `tab_size` columns and every other character one. Columns of printed
//! source text use display width so wide characters count double.

use unicode_width::UnicodeWidthChar;
use weave_core::tree::{Comment, CommentStyle, Space};
use weave_core::TabsAndIndentsStyle;

/// Width of an indent run
pub fn measure(indent: &str, tab_size: usize) -> usize {
    let mut size = 0;
    for c in indent.chars() {
        size += if c == '\t' { tab_size } else { 1 };
        if c == '\n' || c == '\r' {
            size = 0;
        }
    }
    size
}

/// Display width of a run of source text on one line
pub fn column_width(text: &str, tab_size: usize) -> usize {
    text.chars()
        .map(|c| match c {
            '\t' => tab_size,
            _ => c.width().unwrap_or(0),
        })
        .sum()
}

/// Display width of the spaces and tabs that start `line`
pub fn leading_whitespace_width(line: &str, tab_size: usize) -> usize {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    column_width(&line[..end], tab_size)
}

/// Indent run of exactly `width` columns, tabs first when enabled
pub fn indentation(width: usize, style: &TabsAndIndentsStyle) -> String {
    if style.use_tab_character && style.tab_size > 0 {
        let mut run = "\t".repeat(width / style.tab_size);
        run.push_str(&" ".repeat(width % style.tab_size));
        run
    } else {
        " ".repeat(width)
    }
}

/// Rewrite the whitespace in front of the next token to sit at `column`.
///
/// Earlier runs that start a new line (the leading whitespace before a
/// comment, suffixes of earlier comments) and the continuation lines of block
/// comments move by the same amount. Returns `None` when the space has no
/// newline or already ends in the style's own indent run for `column`; a line
/// at the right column written with other indent characters is rewritten.
pub fn indent_to(space: &Space, column: usize, style: &TabsAndIndentsStyle) -> Option<Space> {
    if !space.has_newline() {
        return None;
    }
    let current = measure(space.indent(), style.tab_size);
    if current == column && space.indent() == indentation(column, style) {
        return None;
    }
    let delta = column as isize - current as isize;

    let comments = space.comments();
    if comments.is_empty() {
        return Some(space.with_whitespace(replace_indent(space.whitespace(), column, style)));
    }

    let last = comments.len() - 1;
    let comments = comments
        .iter()
        .enumerate()
        .map(|(index, comment)| {
            let text = match comment.style {
                CommentStyle::Block => shift_lines(&comment.text, delta, style),
                CommentStyle::Line => comment.text.clone(),
            };
            let suffix = if index == last {
                replace_indent(&comment.suffix, column, style)
            } else {
                shift_run(&comment.suffix, delta, style)
            };
            Comment::new(comment.style, text, suffix)
        })
        .collect();
    Some(Space::new(
        shift_run(space.whitespace(), delta, style),
        comments,
    ))
}

/// Replace everything after the last newline of `run` with an indent of
/// `width`
fn replace_indent(run: &str, width: usize, style: &TabsAndIndentsStyle) -> String {
    let cut = run.rfind('\n').map_or(0, |newline| newline + 1);
    let mut out = run[..cut].to_string();
    out.push_str(&indentation(width, style));
    out
}

fn shifted(width: usize, delta: isize) -> usize {
    (width as isize + delta).max(0) as usize
}

/// Move the indent after the last newline of `run` by `delta`; runs without
/// a newline are returned unchanged
fn shift_run(run: &str, delta: isize, style: &TabsAndIndentsStyle) -> String {
    match run.rfind('\n') {
        Some(newline) => {
            let width = measure(&run[newline + 1..], style.tab_size);
            replace_indent(run, shifted(width, delta), style)
        }
        None => run.to_string(),
    }
}

/// Move the leading whitespace of every line after the first by `delta`.
/// Blank lines are left alone.
fn shift_lines(text: &str, delta: isize, style: &TabsAndIndentsStyle) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;
    let mut out = String::with_capacity(text.len());
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let content_start = line
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(line.len());
        let blank = content_start == line.len() && index != last;
        if index == 0 || blank {
            out.push_str(line);
            continue;
        }
        let width = measure(&line[..content_start], style.tab_size);
        out.push_str(&indentation(shifted(width, delta), style));
        out.push_str(&line[content_start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spaces() -> TabsAndIndentsStyle {
        TabsAndIndentsStyle::default()
    }

    fn tabs() -> TabsAndIndentsStyle {
        TabsAndIndentsStyle::tabs(4)
    }

    #[test]
    fn test_measure_counts_tabs() {
        assert_eq!(measure("  ", 4), 2);
        assert_eq!(measure("\t  ", 4), 6);
        assert_eq!(measure("\t\t", 2), 4);
    }

    #[test]
    fn test_column_width_uses_display_width() {
        assert_eq!(column_width("foo(", 4), 4);
        assert_eq!(column_width("名前(", 4), 5);
        assert_eq!(leading_whitespace_width("\t  x", 4), 6);
    }

    #[test]
    fn test_indentation_tabs_then_spaces() {
        assert_eq!(indentation(6, &tabs()), "\t  ");
        assert_eq!(indentation(6, &spaces()), "      ");
        assert_eq!(indentation(0, &tabs()), "");
    }

    #[test]
    fn test_indent_to_without_newline_is_unchanged() {
        assert!(indent_to(&Space::format(" "), 8, &spaces()).is_none());
    }

    #[test]
    fn test_indent_to_already_aligned_is_unchanged() {
        assert!(indent_to(&Space::format("\n    "), 4, &spaces()).is_none());
        assert!(indent_to(&Space::format("\n\t"), 4, &tabs()).is_none());
    }

    #[test]
    fn test_indent_to_keeps_blank_lines() {
        let space = indent_to(&Space::format("\n\n  "), 4, &spaces()).unwrap();
        assert_eq!(space.to_string(), "\n\n    ");
    }

    #[test]
    fn test_indent_to_shifts_preceding_line_comment() {
        let space = Space::format("\n  // note\n  ");
        let moved = indent_to(&space, 4, &spaces()).unwrap();
        assert_eq!(moved.to_string(), "\n    // note\n    ");
    }

    #[test]
    fn test_indent_to_leaves_trailing_comment_on_its_line() {
        let space = Space::format(" // same line\n  ");
        let moved = indent_to(&space, 8, &spaces()).unwrap();
        assert_eq!(moved.to_string(), " // same line\n        ");
    }

    #[test]
    fn test_indent_to_shifts_block_comment_lines() {
        let space = Space::format("\n  /*\n   * a\n\n   */\n  ");
        let moved = indent_to(&space, 4, &spaces()).unwrap();
        assert_eq!(moved.to_string(), "\n    /*\n     * a\n\n     */\n    ");
    }

    #[test]
    fn test_negative_delta_never_removes_comment_text() {
        let space = Space::format("\n        /*\n  x\n        */\n        ");
        let moved = indent_to(&space, 0, &spaces()).unwrap();
        assert_eq!(moved.to_string(), "\n/*\nx\n*/\n");
    }

    #[test]
    fn test_indent_to_normalizes_indent_characters_at_same_column() {
        let moved = indent_to(&Space::format("\n    "), 4, &tabs()).unwrap();
        assert_eq!(moved.whitespace(), "\n\t");

        let moved = indent_to(&Space::format("\n\t"), 4, &spaces()).unwrap();
        assert_eq!(moved.whitespace(), "\n    ");

        let moved = indent_to(&Space::format("\n// note\n\t"), 4, &spaces()).unwrap();
        assert_eq!(moved.to_string(), "\n// note\n    ");
    }

    #[test]
    fn test_indent_to_converts_to_tabs() {
        let moved = indent_to(&Space::format("\n  "), 8, &tabs()).unwrap();
        assert_eq!(moved.whitespace(), "\n\t\t");
    }
}
