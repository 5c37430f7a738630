//! HTML rendering of token sequences.
//!
//! Every categorized token becomes one `<span>` whose classes are the base
//! class `token` followed by the token's category classes in declaration
//! order. Plain tokens are written as bare text. All token text goes through
//! [`escape_html_into`]; nothing else writes text into the buffer.

use crate::escape::escape_html_into;
use crate::language::Language;
use crate::lexer::{Token, lex, tokenize};

/// Base class carried by every highlighted span.
pub const TOKEN_CLASS: &str = "token";

/// Render tokens to HTML markup.
#[must_use]
pub fn render(tokens: &[Token<'_>]) -> String {
    let capacity = tokens.iter().map(|t| t.text.len()).sum::<usize>() * 2;
    let mut out = String::with_capacity(capacity);

    for token in tokens {
        if token.is_plain() {
            escape_html_into(&mut out, token.text);
            continue;
        }

        out.push_str("<span class=\"");
        out.push_str(TOKEN_CLASS);
        for category in token.categories.iter() {
            out.push(' ');
            out.push_str(category.class_name());
        }
        out.push_str("\">");
        escape_html_into(&mut out, token.text);
        out.push_str("</span>");
    }

    out
}

/// Highlighted code listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// Grammar the source was lexed with, after fallback.
    pub language: Language,
    pub html: String,
}

/// Lex and render `source` in one step.
#[must_use]
pub fn highlight(source: &str, tag: Option<&str>) -> Highlighted {
    let language = Language::resolve(tag);
    let tokens = tokenize(language.grammar(), source);
    Highlighted {
        language,
        html: render(&tokens),
    }
}

/// Render `source` without keeping the resolved language.
#[must_use]
pub fn highlight_html(source: &str, tag: Option<&str>) -> String {
    render(&lex(source, tag))
}
