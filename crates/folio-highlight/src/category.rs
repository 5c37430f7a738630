//! Semantic token categories and their visual classes.

use std::fmt;

/// Semantic role of a run of source text.
///
/// Declaration order is significant: a token carrying several categories
/// renders its classes in this order, regardless of how the set was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Comment,
    Keyword,
    String,
    Number,
    Boolean,
    Constant,
    Function,
    ClassName,
    Builtin,
    Property,
    Operator,
    Punctuation,
    Tag,
    AttrName,
    Variable,
    Title,
    Emphasis,
    Strong,
    LinkText,
    Url,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 20] = [
        Self::Comment,
        Self::Keyword,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Constant,
        Self::Function,
        Self::ClassName,
        Self::Builtin,
        Self::Property,
        Self::Operator,
        Self::Punctuation,
        Self::Tag,
        Self::AttrName,
        Self::Variable,
        Self::Title,
        Self::Emphasis,
        Self::Strong,
        Self::LinkText,
        Self::Url,
    ];

    /// CSS class emitted for this category.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Constant => "constant",
            Self::Function => "function",
            Self::ClassName => "class-name",
            Self::Builtin => "builtin",
            Self::Property => "property",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Tag => "tag",
            Self::AttrName => "attr-name",
            Self::Variable => "variable",
            Self::Title => "title",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::LinkText => "link-text",
            Self::Url => "url",
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Set of categories attached to one token.
///
/// Iteration always follows [`Category`] declaration order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u32);

impl CategorySet {
    /// The empty set (plain text).
    pub const EMPTY: Self = Self(0);

    /// Set containing a single category.
    #[must_use]
    pub const fn of(category: Category) -> Self {
        Self(category.bit())
    }

    /// Copy of this set with `category` added.
    #[must_use]
    pub const fn with(self, category: Category) -> Self {
        Self(self.0 | category.bit())
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= category.bit();
    }

    #[must_use]
    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate categories in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        Self::of(category)
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
