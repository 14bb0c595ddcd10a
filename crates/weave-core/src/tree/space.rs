//! Whitespace and comments between two tokens
//!
//! A [`Space`] is the lossless record of everything that separates two tokens:
//! the raw whitespace that follows the previous token, then any number of
//! comments, each carrying the whitespace that follows it (its suffix).
//!
//! ```text
//!   foo();   // trailing
//!   ^^^^^^   ^^^^^^^^^^^ comment, suffix = "\n    "
//!   whitespace = "   "
//! ```
//!
//! The *last whitespace* of a space is the suffix of its last comment, or the
//! whitespace itself when there are no comments. The text after the last
//! newline of the last whitespace is the visual indent of whatever token
//! follows.

use std::fmt;

/// Comment syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// `// text` up to the end of the line
    Line,
    /// `/* text */`, possibly spanning lines
    Block,
}

/// A comment and the whitespace following it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub style: CommentStyle,
    /// Comment body without delimiters
    pub text: String,
    /// Whitespace between the end of the comment and the next comment or token
    pub suffix: String,
}

impl Comment {
    pub fn new(style: CommentStyle, text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            suffix: suffix.into(),
        }
    }

    pub fn line(text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::new(CommentStyle::Line, text, suffix)
    }

    pub fn block(text: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::new(CommentStyle::Block, text, suffix)
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_suffix(&self, suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..self.clone()
        }
    }

    /// Write the comment with its delimiters, without the suffix
    pub fn print_to(&self, out: &mut String) {
        match self.style {
            CommentStyle::Line => {
                out.push_str("//");
                out.push_str(&self.text);
            }
            CommentStyle::Block => {
                out.push_str("/*");
                out.push_str(&self.text);
                out.push_str("*/");
            }
        }
    }
}

/// Whitespace and comments preceding a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Space {
    whitespace: String,
    comments: Vec<Comment>,
}

impl Space {
    pub const EMPTY: Space = Space {
        whitespace: String::new(),
        comments: Vec::new(),
    };

    pub fn new(whitespace: impl Into<String>, comments: Vec<Comment>) -> Self {
        Self {
            whitespace: whitespace.into(),
            comments,
        }
    }

    /// Split raw source text into whitespace and comments.
    ///
    /// Anything that is not a `//` or `/* */` comment is kept verbatim as
    /// whitespace of the current run, so `format(text).to_string() == text`
    /// unless `text` ends inside a block comment. An unterminated block
    /// comment runs to the end of the text and is printed with its closing
    /// `*/`.
    pub fn format(text: &str) -> Self {
        let mut whitespace = String::new();
        let mut comments: Vec<Comment> = Vec::new();
        let mut rest = text;

        loop {
            let next = match (rest.find("//"), rest.find("/*")) {
                (Some(line), Some(block)) => Some(line.min(block)),
                (line, block) => line.or(block),
            };
            let Some(start) = next else {
                push_run(&mut whitespace, &mut comments, rest);
                break;
            };

            push_run(&mut whitespace, &mut comments, &rest[..start]);
            let body = &rest[start + 2..];
            if rest[start..].starts_with("//") {
                let end = body.find('\n').unwrap_or(body.len());
                comments.push(Comment::line(&body[..end], ""));
                rest = &body[end..];
            } else {
                match body.find("*/") {
                    Some(end) => {
                        comments.push(Comment::block(&body[..end], ""));
                        rest = &body[end + 2..];
                    }
                    None => {
                        // Unterminated: keep the text so nothing is lost, printing
                        // will close it.
                        comments.push(Comment::block(body, ""));
                        rest = "";
                    }
                }
            }
        }

        Self {
            whitespace,
            comments,
        }
    }

    pub fn whitespace(&self) -> &str {
        &self.whitespace
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn with_whitespace(&self, whitespace: impl Into<String>) -> Self {
        Self {
            whitespace: whitespace.into(),
            comments: self.comments.clone(),
        }
    }

    pub fn with_comments(&self, comments: Vec<Comment>) -> Self {
        Self {
            whitespace: self.whitespace.clone(),
            comments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.whitespace.is_empty() && self.comments.is_empty()
    }

    /// The whitespace immediately before the following token
    pub fn last_whitespace(&self) -> &str {
        match self.comments.last() {
            Some(comment) => &comment.suffix,
            None => &self.whitespace,
        }
    }

    /// Whether the following token starts on a new line
    pub fn has_newline(&self) -> bool {
        self.last_whitespace().contains('\n')
    }

    /// Text after the last newline of the last whitespace, or the whole last
    /// whitespace when it has no newline
    pub fn indent(&self) -> &str {
        let last = self.last_whitespace();
        match last.rfind('\n') {
            Some(newline) => &last[newline + 1..],
            None => last,
        }
    }

    pub fn print_to(&self, out: &mut String) {
        out.push_str(&self.whitespace);
        for comment in &self.comments {
            comment.print_to(out);
            out.push_str(&comment.suffix);
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.print_to(&mut out);
        f.write_str(&out)
    }
}

impl From<&str> for Space {
    fn from(text: &str) -> Self {
        Space::format(text)
    }
}

fn push_run(whitespace: &mut String, comments: &mut [Comment], run: &str) {
    match comments.last_mut() {
        Some(comment) => comment.suffix.push_str(run),
        None => whitespace.push_str(run),
    }
}
