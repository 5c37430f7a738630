//! Tokenization of source text into categorized runs.

use crate::category::CategorySet;
use crate::grammar::Grammar;
use crate::language::Language;

/// A contiguous run of source text with its semantic categories.
///
/// Tokens borrow from the lexed source. A token with no categories is plain
/// text and is still emitted so that the sequence covers the whole input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub categories: CategorySet,
}

impl<'a> Token<'a> {
    #[must_use]
    pub fn new(text: &'a str, categories: impl Into<CategorySet>) -> Self {
        Self {
            text,
            categories: categories.into(),
        }
    }

    #[must_use]
    pub fn plain(text: &'a str) -> Self {
        Self::new(text, CategorySet::EMPTY)
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Lex `source` with the grammar registered for `tag`.
///
/// Unknown or missing tags use [`Language::DEFAULT`]. The returned tokens
/// partition `source`: concatenating their text yields the input exactly.
#[must_use]
pub fn lex<'a>(source: &'a str, tag: Option<&str>) -> Vec<Token<'a>> {
    tokenize(Language::resolve(tag).grammar(), source)
}

/// Lex `source` with an explicit grammar.
#[must_use]
pub fn tokenize<'a>(grammar: &Grammar, source: &'a str) -> Vec<Token<'a>> {
    let mut lexer = Lexer::new(source);

    while lexer.pos < source.len() {
        let rest = &source[lexer.pos..];
        match grammar.match_at(rest, lexer.at_line_start()) {
            Some((len, categories)) if categories.is_empty() => lexer.extend_plain(len),
            Some((len, categories)) => lexer.push(len, categories),
            None => {
                let len = rest.chars().next().map_or(1, char::len_utf8);
                lexer.extend_plain(len);
            }
        }
    }

    lexer.finish()
}

/// Reassemble the source text from a token sequence.
#[must_use]
pub fn source_text(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|token| token.text).collect()
}

/// Cursor state while walking the source.
///
/// Consecutive plain runs are coalesced into one token.
struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    plain_start: Option<usize>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            plain_start: None,
            tokens: Vec::new(),
        }
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.source.as_bytes()[self.pos - 1] == b'\n'
    }

    fn extend_plain(&mut self, len: usize) {
        self.plain_start.get_or_insert(self.pos);
        self.pos += len;
    }

    fn push(&mut self, len: usize, categories: CategorySet) {
        self.flush_plain();
        let end = self.pos + len;
        self.tokens
            .push(Token::new(&self.source[self.pos..end], categories));
        self.pos = end;
    }

    fn flush_plain(&mut self) {
        if let Some(start) = self.plain_start.take() {
            self.tokens.push(Token::plain(&self.source[start..self.pos]));
        }
    }

    fn finish(mut self) -> Vec<Token<'a>> {
        self.flush_plain();
        self.tokens
    }
}
