//! Syntax highlighting for code listings.
//!
//! A fixed registry maps language tags to [`Grammar`]s. [`lex`] splits
//! source text into [`Token`]s that partition the input, each tagged with a
//! [`CategorySet`]. [`render`] turns tokens into HTML spans, one CSS class
//! per category.
//!
//! Unknown or missing language tags are not an error: they fall back to
//! [`Language::DEFAULT`].
//!
//! # Example
//!
//! ```
//! use folio_highlight::{Language, highlight};
//!
//! let highlighted = highlight("let x = 1;", Some("js"));
//! assert_eq!(highlighted.language, Language::JavaScript);
//! assert!(highlighted.html.contains(r#"<span class="token keyword">let</span>"#));
//! ```

mod category;
mod escape;
mod grammar;
mod grammars;
mod language;
mod lexer;
mod render;

pub use category::{Category, CategorySet};
pub use escape::{escape_html, escape_html_into};
pub use grammar::Grammar;
pub use language::Language;
pub use lexer::{Token, lex, source_text, tokenize};
pub use render::{Highlighted, TOKEN_CLASS, highlight, highlight_html, render};
