//! Language tags recognized by the highlighter.

use crate::grammar::Grammar;
use crate::grammars;

/// Languages with a registered grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
    Dot,
    Json,
    Css,
    Shell,
    Rust,
    Markdown,
    PlainText,
}

impl Language {
    /// Grammar used when a code block has no tag or an unknown one.
    ///
    /// Unknown tags are not an error: every listing still renders, lexed as
    /// general-purpose script syntax.
    pub const DEFAULT: Self = Self::JavaScript;

    /// Parse a code fence language tag.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. A
    /// `language-` prefix (as found in `class="language-js"`) is accepted.
    ///
    /// Returns `None` if the tag has no registered grammar.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let tag = tag.strip_prefix("language-").unwrap_or(&tag);

        match tag {
            "js" | "javascript" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "typescript" | "mts" | "cts" => Some(Self::TypeScript),
            "jsx" => Some(Self::Jsx),
            "tsx" => Some(Self::Tsx),
            "dot" | "graphviz" | "gv" => Some(Self::Dot),
            "json" | "jsonc" => Some(Self::Json),
            "css" => Some(Self::Css),
            "sh" | "bash" | "shell" | "zsh" | "console" => Some(Self::Shell),
            "rust" | "rs" => Some(Self::Rust),
            "md" | "markdown" => Some(Self::Markdown),
            "text" | "txt" | "plain" | "plaintext" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Resolve an optional tag, falling back to [`Language::DEFAULT`].
    #[must_use]
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) => Self::parse(tag).unwrap_or_else(|| {
                tracing::debug!(tag = %tag, fallback = Self::DEFAULT.name(), "Unknown language tag");
                Self::DEFAULT
            }),
            None => Self::DEFAULT,
        }
    }

    /// Canonical tag for this language.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Dot => "dot",
            Self::Json => "json",
            Self::Css => "css",
            Self::Shell => "shell",
            Self::Rust => "rust",
            Self::Markdown => "markdown",
            Self::PlainText => "text",
        }
    }

    /// Compiled grammar for this language.
    #[must_use]
    pub fn grammar(self) -> &'static Grammar {
        grammars::for_language(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Language::parse("JS"), Some(Language::JavaScript));
        assert_eq!(Language::parse("Ts"), Some(Language::TypeScript));
        assert_eq!(Language::parse("DOT"), Some(Language::Dot));
        assert_eq!(Language::parse(" jsx "), Some(Language::Jsx));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Language::parse("javascript"), Some(Language::JavaScript));
        assert_eq!(Language::parse("graphviz"), Some(Language::Dot));
        assert_eq!(Language::parse("bash"), Some(Language::Shell));
        assert_eq!(Language::parse("rs"), Some(Language::Rust));
        assert_eq!(Language::parse("language-tsx"), Some(Language::Tsx));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Language::parse("nonexistent-lang"), None);
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(Language::resolve(None), Language::DEFAULT);
        assert_eq!(Language::resolve(Some("cobol")), Language::DEFAULT);
        assert_eq!(Language::resolve(Some("ts")), Language::TypeScript);
        assert_eq!(Language::DEFAULT, Language::JavaScript);
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for language in [
            Language::JavaScript,
            Language::TypeScript,
            Language::Jsx,
            Language::Tsx,
            Language::Dot,
            Language::Json,
            Language::Css,
            Language::Shell,
            Language::Rust,
            Language::Markdown,
            Language::PlainText,
        ] {
            assert_eq!(Language::parse(language.name()), Some(language));
        }
    }
}
