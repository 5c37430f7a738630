//! Built-in grammars.
//!
//! Each grammar is compiled on first use and then shared read-only by every
//! caller, so lexing never touches mutable state.

use std::sync::LazyLock;

use crate::category::{Category, CategorySet};
use crate::grammar::{Grammar, Rule, Words};
use crate::language::Language;

const BLOCK_COMMENT: &str = r"/\*[\s\S]*?(?:\*/|\z)";
const LINE_COMMENT: &str = r"//[^\n]*";
const DOUBLE_QUOTED: &str = r#""(?:[^"\\\n]|\\.)*"?"#;
const SINGLE_QUOTED: &str = r"'(?:[^'\\\n]|\\.)*'?";
const WHITESPACE: &str = r"\s+";

const JS_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "from", "function",
    "get", "if", "import", "in", "instanceof", "let", "new", "of", "return", "set", "static",
    "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
];

const TS_KEYWORDS: &[&str] = &[
    "abstract", "as", "asserts", "async", "await", "break", "case", "catch", "class", "const",
    "continue", "debugger", "declare", "default", "delete", "do", "else", "enum", "export",
    "extends", "finally", "for", "from", "function", "get", "if", "implements", "import", "in",
    "infer", "instanceof", "interface", "is", "keyof", "let", "module", "namespace", "new", "of",
    "private", "protected", "public", "readonly", "return", "satisfies", "set", "static", "super",
    "switch", "this", "throw", "try", "type", "typeof", "unique", "var", "void", "while", "with",
    "yield",
];

const JS_BUILTINS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "JSON", "Map", "Math", "Number", "Object", "Promise",
    "Proxy", "Reflect", "RegExp", "Set", "String", "Symbol", "WeakMap", "WeakSet", "console",
    "document", "globalThis", "module", "process", "require", "window",
];

const TS_BUILTINS: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "JSON", "Map", "Math", "Number", "Object", "Partial",
    "Promise", "Proxy", "Readonly", "Record", "Reflect", "RegExp", "Set", "String", "Symbol",
    "WeakMap", "WeakSet", "any", "bigint", "boolean", "console", "document", "globalThis",
    "never", "number", "object", "process", "string", "symbol", "undefined", "unknown", "window",
];

const JS_WORDS: Words = Words {
    keywords: JS_KEYWORDS,
    booleans: &["true", "false"],
    constants: &["null", "undefined", "NaN", "Infinity"],
    builtins: JS_BUILTINS,
    capitalized: Some(Category::ClassName),
    screaming_constants: true,
    ..Words::NONE
};

const TS_WORDS: Words = Words {
    keywords: TS_KEYWORDS,
    builtins: TS_BUILTINS,
    ..JS_WORDS
};

static JAVASCRIPT: LazyLock<Grammar> =
    LazyLock::new(|| script(Language::JavaScript, JS_WORDS, false));
static TYPESCRIPT: LazyLock<Grammar> =
    LazyLock::new(|| script(Language::TypeScript, TS_WORDS, false));
static JSX: LazyLock<Grammar> = LazyLock::new(|| script(Language::Jsx, JS_WORDS, true));
static TSX: LazyLock<Grammar> = LazyLock::new(|| script(Language::Tsx, TS_WORDS, true));
static DOT: LazyLock<Grammar> = LazyLock::new(dot);
static JSON: LazyLock<Grammar> = LazyLock::new(json);
static CSS: LazyLock<Grammar> = LazyLock::new(css);
static SHELL: LazyLock<Grammar> = LazyLock::new(shell);
static RUST: LazyLock<Grammar> = LazyLock::new(rust);
static MARKDOWN: LazyLock<Grammar> = LazyLock::new(markdown);
static PLAIN_TEXT: LazyLock<Grammar> = LazyLock::new(|| {
    Grammar::new(Language::PlainText, vec![Rule::plain(r"[\s\S]+")], Words::NONE)
});

/// Grammar registered for `language`.
pub(crate) fn for_language(language: Language) -> &'static Grammar {
    match language {
        Language::JavaScript => &JAVASCRIPT,
        Language::TypeScript => &TYPESCRIPT,
        Language::Jsx => &JSX,
        Language::Tsx => &TSX,
        Language::Dot => &DOT,
        Language::Json => &JSON,
        Language::Css => &CSS,
        Language::Shell => &SHELL,
        Language::Rust => &RUST,
        Language::Markdown => &MARKDOWN,
        Language::PlainText => &PLAIN_TEXT,
    }
}

/// JavaScript-family grammar; `markup` enables JSX tags.
fn script(language: Language, words: Words, markup: bool) -> Grammar {
    let mut rules = vec![
        Rule::emit(LINE_COMMENT, Category::Comment),
        Rule::emit(BLOCK_COMMENT, Category::Comment),
        Rule::emit(r"`(?:[^`\\]|\\[\s\S])*`?", Category::String),
        Rule::emit(DOUBLE_QUOTED, Category::String),
        Rule::emit(SINGLE_QUOTED, Category::String),
    ];

    if markup {
        rules.push(Rule::emit(r"</?[A-Za-z][\w.:-]*", Category::Tag));
        rules.push(Rule::emit(r"/>", Category::Tag));
    }

    rules.extend([
        Rule::emit(
            r"(?:0[xX][\da-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|(?:\d[\d_]*(?:\.[\d_]*)?|\.\d[\d_]*)(?:[eE][+-]?\d+)?)n?",
            Category::Number,
        ),
        Rule::emit(r"@[A-Za-z_$][\w$]*", Category::Function),
        Rule::word(r"(?P<t>[A-Za-z_$][\w$]*)\s*\(", Some(Category::Function)),
        Rule::word(r"[A-Za-z_$][\w$]*", None),
        Rule::emit(
            r"=>|\.\.\.|\?\?=?|\?\.|[=!]==?|[<>]=?|&&=?|\|\|=?|\*\*=?|\+\+|--|[-+*/%&|^]=?|[~!?:=]",
            Category::Operator,
        ),
        Rule::emit(r"[{}()\[\];,.]", Category::Punctuation),
        Rule::plain(WHITESPACE),
    ]);

    Grammar::new(language, rules, words)
}

fn dot() -> Grammar {
    let words = Words {
        keywords: &["digraph", "edge", "graph", "node", "strict", "subgraph"],
        case_insensitive: true,
        ..Words::NONE
    };

    let rules = vec![
        Rule::emit(LINE_COMMENT, Category::Comment),
        Rule::emit(BLOCK_COMMENT, Category::Comment),
        Rule::emit(r"#[^\n]*", Category::Comment).at_line_start(),
        Rule::emit(r#""(?:[^"\\]|\\[\s\S])*"?"#, Category::String),
        Rule::emit(r"--|->", Category::Operator),
        Rule::word(r"(?P<t>[A-Za-z_][\w]*)\s*=", Some(Category::AttrName)),
        Rule::emit(r"-?(?:\.\d+|\d+(?:\.\d*)?)", Category::Number),
        Rule::word(r"[A-Za-z_][\w]*", None),
        Rule::emit(r"=", Category::Operator),
        Rule::emit(r"[{}\[\];,:]", Category::Punctuation),
        Rule::plain(WHITESPACE),
    ];

    Grammar::new(Language::Dot, rules, words)
}

fn json() -> Grammar {
    let words = Words {
        booleans: &["true", "false"],
        constants: &["null"],
        ..Words::NONE
    };

    let rules = vec![
        Rule::emit(r#"(?P<t>"(?:[^"\\\n]|\\.)*")\s*:"#, Category::Property),
        Rule::emit(DOUBLE_QUOTED, Category::String),
        Rule::emit(LINE_COMMENT, Category::Comment),
        Rule::emit(BLOCK_COMMENT, Category::Comment),
        Rule::emit(r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?", Category::Number),
        Rule::word(r"[A-Za-z_]\w*", None),
        Rule::emit(r"[{}\[\],:]", Category::Punctuation),
        Rule::plain(WHITESPACE),
    ];

    Grammar::new(Language::Json, rules, words)
}

fn css() -> Grammar {
    let rules = vec![
        Rule::emit(BLOCK_COMMENT, Category::Comment),
        Rule::emit(DOUBLE_QUOTED, Category::String),
        Rule::emit(SINGLE_QUOTED, Category::String),
        Rule::emit(r"@[\w-]+", Category::Keyword),
        Rule::emit(r"!important", Category::Keyword),
        // A declaration name is only a property when a value terminated by
        // `;` or `}` follows; `a:hover {` stays a selector.
        Rule::emit(
            r"(?P<t>-{0,2}[A-Za-z][\w-]*[ \t]*:)[^{};]*[;}]",
            Category::Property,
        ),
        Rule::emit(r"(?P<t>[A-Za-z-][\w-]*)\(", Category::Function),
        Rule::emit(r"#[\da-fA-F]{3,8}\b", Category::Number),
        Rule::emit(r"-?(?:\d+(?:\.\d+)?|\.\d+)(?:%|[A-Za-z]+)?", Category::Number),
        Rule::emit(r"[.#][A-Za-z_-][\w-]*", Category::ClassName),
        Rule::emit(r"::?[A-Za-z-][\w-]*", Category::Keyword),
        Rule::plain(r"[A-Za-z_-][\w-]*"),
        Rule::emit(r"[{}();:,>+~*\[\]=]", Category::Punctuation),
        Rule::plain(WHITESPACE),
    ];

    Grammar::new(Language::Css, rules, Words::NONE)
}

fn shell() -> Grammar {
    let words = Words {
        keywords: &[
            "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
            "in", "local", "readonly", "return", "select", "then", "until", "while",
        ],
        builtins: &[
            "alias", "cd", "echo", "eval", "exec", "exit", "printf", "pwd", "read", "set",
            "shift", "source", "test", "trap", "unset",
        ],
        booleans: &["true", "false"],
        ..Words::NONE
    };

    let rules = vec![
        Rule::emit(r"#[^\n]*", Category::Comment),
        Rule::emit(r#""(?:[^"\\]|\\[\s\S])*"?"#, Category::String),
        Rule::emit(r"'[^']*'?", Category::String),
        Rule::emit(
            r"\$\{[^}\n]*\}?|\$[A-Za-z_]\w*|\$[0-9@#?$!*-]",
            Category::Variable,
        ),
        Rule::emit(r"--?[A-Za-z][\w-]*", Category::AttrName),
        Rule::word(r"(?P<t>[A-Za-z_][\w-]*)\s*\(\)", Some(Category::Function)),
        Rule::word(r"[A-Za-z_][\w.-]*", None),
        Rule::emit(r"\d+", Category::Number),
        Rule::emit(r"\$\(|&&|\|\||;;|>>|<<|[|&;<>=]", Category::Operator),
        Rule::emit(r"[(){}\[\]]", Category::Punctuation),
        Rule::plain(WHITESPACE),
    ];

    Grammar::new(Language::Shell, rules, words)
}

fn rust() -> Grammar {
    let words = Words {
        keywords: &[
            "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
            "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
            "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
            "type", "unsafe", "use", "where", "while",
        ],
        booleans: &["true", "false"],
        builtins: &[
            "Box", "Err", "None", "Ok", "Option", "Result", "Some", "String", "Vec", "bool",
            "char", "f32", "f64", "i128", "i16", "i32", "i64", "i8", "isize", "str", "u128",
            "u16", "u32", "u64", "u8", "usize",
        ],
        capitalized: Some(Category::ClassName),
        screaming_constants: true,
        ..Words::NONE
    };

    let rules = vec![
        Rule::emit(LINE_COMMENT, Category::Comment),
        Rule::emit(BLOCK_COMMENT, Category::Comment),
        Rule::emit(r"#!?\[[^\]\n]*\]?", Category::AttrName),
        Rule::emit(r##"b?r#"[\s\S]*?(?:"#|\z)"##, Category::String),
        Rule::emit(r#"b?r"[^"]*"?"#, Category::String),
        Rule::emit(r#"b?"(?:[^"\\]|\\[\s\S])*"?"#, Category::String),
        Rule::emit(r"b?'(?:[^'\\\n]|\\[^'\n]*)'", Category::String),
        Rule::emit(r"'[A-Za-z_]\w*", Category::Variable),
        Rule::emit(r"(?P<t>[A-Za-z_]\w*!)\s*[(\[{]", Category::Function),
        Rule::emit(
            r"(?:0x[\da-fA-F_]+|0o[0-7_]+|0b[01_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?)(?:[iu](?:8|16|32|64|128|size)|f32|f64)?",
            Category::Number,
        ),
        Rule::word(r"(?P<t>[A-Za-z_]\w*)\s*\(", Some(Category::Function)),
        Rule::word(r"[A-Za-z_]\w*", None),
        Rule::emit(
            r"=>|->|\.\.=?|[=!<>]=|&&|\|\||<<=?|>>=?|[-+*/%^&|]=?|[=<>!?@]",
            Category::Operator,
        ),
        Rule::emit(r"::|[{}()\[\];,.:]", Category::Punctuation),
        Rule::plain(WHITESPACE),
    ];

    Grammar::new(Language::Rust, rules, words)
}

fn markdown() -> Grammar {
    let link_strong = CategorySet::of(Category::LinkText).with(Category::Strong);
    let link_emphasis = CategorySet::of(Category::LinkText).with(Category::Emphasis);

    let rules = vec![
        Rule::emit(r"#{1,6}(?:[ \t][^\n]*)?(?m:$)", Category::Title).at_line_start(),
        Rule::emit(r"(?:```|~~~)[^\n]*", Category::Punctuation).at_line_start(),
        Rule::emit(r"(?:-{3,}|\*{3,}|_{3,})[ \t]*(?m:$)", Category::Punctuation).at_line_start(),
        Rule::emit(r">", Category::Punctuation).at_line_start(),
        Rule::emit(r"[ \t]*(?:[-*+]|\d+\.)[ \t]", Category::Punctuation).at_line_start(),
        Rule::emit(r"`[^`\n]+`", Category::String),
        Rule::emit(r"\[(?:\*\*[^*\]\n]+\*\*|__[^_\]\n]+__)\]", link_strong),
        Rule::emit(r"\[(?:\*[^*\]\n]+\*|_[^_\]\n]+_)\]", link_emphasis),
        Rule::emit(r"!?\[[^\]\n]*\]", Category::LinkText),
        Rule::emit(
            r"\((?:https?://|mailto:|/|\./|\.\./|#)[^)\s]*\)|<https?://[^>\s]+>|https?://[^\s)>\]]+",
            Category::Url,
        ),
        Rule::emit(r"\*\*[^*\n]+\*\*|__[^_\n]+__", Category::Strong),
        Rule::emit(r"\*[^*\n]+\*|_[^_\n]+_", Category::Emphasis),
        Rule::emit(r"</?[A-Za-z][^>\n]*>", Category::Tag),
        Rule::plain(r"[A-Za-z0-9][\w'-]*"),
        // Newlines stay separate so the next line's block rules still apply.
        Rule::plain(r"\n|[^\S\n]+"),
    ];

    Grammar::new(Language::Markdown, rules, Words::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_matching_grammar() {
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
            assert_eq!(for_language(language).language(), language);
        }
    }

    #[test]
    fn test_grammars_are_shared() {
        let first = for_language(Language::JavaScript);
        let second = for_language(Language::JavaScript);
        assert!(std::ptr::eq(first, second));
    }
}
