//! Grammar representation: ordered lexing rules plus word tables.
//!
//! A grammar is a list of anchored regular expressions tried in order at
//! the current position. The first rule that matches a non-empty prefix
//! wins. Rules either emit a fixed set of categories or classify the matched
//! word against the grammar's word tables (keywords, literals, builtins).
//!
//! A rule may restrict the emitted token to a named group `t` that starts at
//! the match start. This stands in for lookahead, which the `regex` crate
//! does not support: `(?P<t>[a-z]+)\s*\(` emits only the identifier of a
//! call and leaves the parenthesis for the next rule.

use regex::Regex;

use crate::category::{Category, CategorySet};
use crate::language::Language;

/// What a rule does with the text it matched.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    /// Emit the match with fixed categories (possibly none).
    Emit(CategorySet),
    /// Classify the match against the word tables; use the fallback
    /// category when no table contains the word.
    Word(Option<Category>),
}

/// One lexing rule.
#[derive(Debug)]
pub(crate) struct Rule {
    pattern: Regex,
    action: Action,
    line_start: bool,
    captures: bool,
}

impl Rule {
    pub(crate) fn emit(pattern: &str, categories: impl Into<CategorySet>) -> Self {
        Self::new(pattern, Action::Emit(categories.into()))
    }

    pub(crate) fn plain(pattern: &str) -> Self {
        Self::new(pattern, Action::Emit(CategorySet::EMPTY))
    }

    pub(crate) fn word(pattern: &str, fallback: Option<Category>) -> Self {
        Self::new(pattern, Action::Word(fallback))
    }

    /// Only try this rule at the start of a line.
    pub(crate) fn at_line_start(mut self) -> Self {
        self.line_start = true;
        self
    }

    fn new(pattern: &str, action: Action) -> Self {
        let anchored = format!("^(?:{pattern})");
        Self {
            pattern: Regex::new(&anchored).expect("grammar patterns are valid regexes"),
            action,
            line_start: false,
            captures: pattern.contains("(?P<t>"),
        }
    }

    /// Length of the token this rule produces at the start of `rest`.
    fn match_len(&self, rest: &str) -> Option<usize> {
        let len = if self.captures {
            let caps = self.pattern.captures(rest)?;
            let group = caps.name("t")?;
            if group.start() != 0 {
                return None;
            }
            group.end()
        } else {
            self.pattern.find(rest)?.end()
        };
        (len > 0).then_some(len)
    }
}

/// Word tables used by [`Action::Word`] rules.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Words {
    pub(crate) keywords: &'static [&'static str],
    pub(crate) booleans: &'static [&'static str],
    pub(crate) constants: &'static [&'static str],
    pub(crate) builtins: &'static [&'static str],
    /// Compare words ASCII case-insensitively (DOT keywords).
    pub(crate) case_insensitive: bool,
    /// Category for identifiers starting with an uppercase letter.
    pub(crate) capitalized: Option<Category>,
    /// Treat `ALL_CAPS` identifiers as constants.
    pub(crate) screaming_constants: bool,
}

impl Words {
    pub(crate) const NONE: Self = Self {
        keywords: &[],
        booleans: &[],
        constants: &[],
        builtins: &[],
        case_insensitive: false,
        capitalized: None,
        screaming_constants: false,
    };

    fn contains(&self, table: &[&str], word: &str) -> bool {
        if self.case_insensitive {
            table.iter().any(|w| w.eq_ignore_ascii_case(word))
        } else {
            table.contains(&word)
        }
    }

    fn classify(&self, word: &str, fallback: Option<Category>) -> CategorySet {
        if self.contains(self.keywords, word) {
            return Category::Keyword.into();
        }
        if self.contains(self.booleans, word) {
            return Category::Boolean.into();
        }
        if self.contains(self.constants, word) {
            return Category::Constant.into();
        }
        if self.contains(self.builtins, word) {
            return Category::Builtin.into();
        }
        if let Some(category) = fallback {
            return category.into();
        }
        if self.screaming_constants && is_screaming_case(word) {
            return Category::Constant.into();
        }
        match self.capitalized {
            Some(category) if word.starts_with(|c: char| c.is_ascii_uppercase()) => {
                category.into()
            }
            _ => CategorySet::EMPTY,
        }
    }
}

fn is_screaming_case(word: &str) -> bool {
    word.len() > 1
        && word.chars().any(|c| c.is_ascii_uppercase())
        && word
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Compiled lexing rules for one language.
#[derive(Debug)]
pub struct Grammar {
    language: Language,
    rules: Vec<Rule>,
    words: Words,
}

impl Grammar {
    pub(crate) fn new(language: Language, rules: Vec<Rule>, words: Words) -> Self {
        Self {
            language,
            rules,
            words,
        }
    }

    /// Language this grammar lexes.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Try every rule at the start of `rest`.
    ///
    /// Returns the token length and its categories, or `None` when no rule
    /// matches (the caller then consumes one character as plain text).
    pub(crate) fn match_at(&self, rest: &str, at_line_start: bool) -> Option<(usize, CategorySet)> {
        self.rules
            .iter()
            .filter(|rule| at_line_start || !rule.line_start)
            .find_map(|rule| {
                let len = rule.match_len(rest)?;
                let categories = match rule.action {
                    Action::Emit(categories) => categories,
                    Action::Word(fallback) => self.words.classify(&rest[..len], fallback),
                };
                Some((len, categories))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Words {
        Words {
            keywords: &["if", "return"],
            booleans: &["true"],
            constants: &["null"],
            builtins: &["console"],
            capitalized: Some(Category::ClassName),
            screaming_constants: true,
            ..Words::NONE
        }
    }

    #[test]
    fn test_rule_is_anchored() {
        let rule = Rule::emit(r"\d+", Category::Number);
        assert_eq!(rule.match_len("42 apples"), Some(2));
        assert_eq!(rule.match_len("apples 42"), None);
    }

    #[test]
    fn test_rule_capture_group_limits_token() {
        let rule = Rule::word(r"(?P<t>[a-z]+)\s*\(", Some(Category::Function));
        assert_eq!(rule.match_len("call (x)"), Some(4));
        assert_eq!(rule.match_len("call x"), None);
    }

    #[test]
    fn test_rule_rejects_empty_match() {
        let rule = Rule::plain(r"\s*");
        assert_eq!(rule.match_len("abc"), None);
    }

    #[test]
    fn test_classify_word_tables() {
        let words = words();
        assert_eq!(words.classify("if", None), CategorySet::of(Category::Keyword));
        assert_eq!(words.classify("true", None), CategorySet::of(Category::Boolean));
        assert_eq!(words.classify("null", None), CategorySet::of(Category::Constant));
        assert_eq!(words.classify("console", None), CategorySet::of(Category::Builtin));
        assert_eq!(words.classify("MAX_SIZE", None), CategorySet::of(Category::Constant));
        assert_eq!(words.classify("Widget", None), CategorySet::of(Category::ClassName));
        assert_eq!(words.classify("value", None), CategorySet::EMPTY);
    }

    #[test]
    fn test_classify_keyword_beats_fallback() {
        let words = words();
        assert_eq!(
            words.classify("if", Some(Category::Function)),
            CategorySet::of(Category::Keyword)
        );
        assert_eq!(
            words.classify("render", Some(Category::Function)),
            CategorySet::of(Category::Function)
        );
    }

    #[test]
    fn test_classify_case_insensitive() {
        let words = Words {
            keywords: &["digraph"],
            case_insensitive: true,
            ..Words::NONE
        };
        assert_eq!(words.classify("DiGraph", None), CategorySet::of(Category::Keyword));
    }

    #[test]
    fn test_line_start_rules_skipped_mid_line() {
        let grammar = Grammar::new(
            Language::Markdown,
            vec![Rule::emit(r"#[^\n]*", Category::Title).at_line_start()],
            Words::NONE,
        );
        assert!(grammar.match_at("# Title", true).is_some());
        assert!(grammar.match_at("# Title", false).is_none());
    }
}
