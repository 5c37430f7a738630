//! Markdown to document tree conversion.
//!
//! Parses an article with `pulldown-cmark` (GFM extensions plus a YAML
//! front matter block) into a [`Node`] tree. Headings get unique slug IDs and
//! are collected into the document outline. Fenced and indented code blocks
//! become [`Node::CodeBlock`] for the layout composer to highlight.

use std::collections::HashMap;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::document::{Document, Exports, OutlineEntry};
use crate::site::Article;
use crate::tree::Node;

/// Parser options used for articles.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse a markdown article.
///
/// # Errors
///
/// Returns the YAML error if the front matter block is malformed.
pub fn parse_article(
    markdown: &str,
    url: impl Into<String>,
    name: impl Into<String>,
) -> Result<Article, serde_yaml::Error> {
    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.process_event(event);
    }
    let parsed = builder.finish();

    let exports = match parsed.front_matter {
        Some(yaml) => Exports::from_yaml(&yaml)?,
        None => Exports::default(),
    };

    let document = Document::new(url, name)
        .with_exports(exports)
        .with_outline(parsed.outline);

    Ok(Article {
        document,
        body: parsed.body,
    })
}

/// Convert text to URL-safe slug.
///
/// Lowercases ASCII alphanumerics, collapses whitespace, dashes and
/// underscores into single dashes, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }
    result
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Language tag from a fence info string (`rust ignore` -> `rust`).
fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|lang| lang.trim_matches(|c| c == '{' || c == '}' || c == '.'))
        .filter(|lang| !lang.is_empty())
        .map(str::to_owned)
}

struct Parsed {
    body: Vec<Node>,
    outline: Vec<OutlineEntry>,
    front_matter: Option<String>,
}

/// Open container while walking events.
enum Frame {
    Element {
        tag: &'static str,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        explicit_id: Option<String>,
        text: String,
        children: Vec<Node>,
    },
    CodeBlock {
        language: Option<String>,
        source: String,
    },
    Image {
        src: String,
        title: String,
        alt: String,
    },
    FrontMatter(String),
}

impl Frame {
    fn element(tag: &'static str) -> Self {
        Self::Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn element_with(tag: &'static str, attrs: Vec<(String, String)>) -> Self {
        Self::Element {
            tag,
            attrs,
            children: Vec::new(),
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Frame>,
    outline: Vec<OutlineEntry>,
    front_matter: Option<String>,
    id_counts: HashMap<String, usize>,
    in_table_head: bool,
}

impl TreeBuilder {
    fn finish(mut self) -> Parsed {
        // Close anything left open by a truncated event stream.
        while !self.stack.is_empty() {
            self.close();
        }
        Parsed {
            body: self.root,
            outline: self.outline,
            front_matter: self.front_matter,
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.push_heading_text(&code);
                self.push_node(Node::element("code", vec![Node::text(code.into_string())]));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_node(Node::Raw(html.into_string()));
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.push_node(Node::element("br", Vec::new())),
            Event::Rule => self.push_node(Node::element("hr", Vec::new())),
            Event::TaskListMarker(checked) => {
                let mut attrs = vec![
                    ("type".to_owned(), "checkbox".to_owned()),
                    ("disabled".to_owned(), String::new()),
                ];
                if checked {
                    attrs.push(("checked".to_owned(), String::new()));
                }
                self.push_node(Node::element_with_attrs("input", attrs, Vec::new()));
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::element("p"),
            Tag::Heading { level, id, .. } => Frame::Heading {
                level: heading_level_to_num(level),
                explicit_id: id.map(CowStr::into_string),
                text: String::new(),
                children: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::element("blockquote"),
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                },
                source: String::new(),
            },
            Tag::List(Some(1)) => Frame::element("ol"),
            Tag::List(Some(start)) => {
                Frame::element_with("ol", vec![("start".to_owned(), start.to_string())])
            }
            Tag::List(None) => Frame::element("ul"),
            Tag::Item => Frame::element("li"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock => return,
            Tag::MetadataBlock(_) => Frame::FrontMatter(String::new()),
            Tag::DefinitionList => Frame::element("dl"),
            Tag::DefinitionListTitle => Frame::element("dt"),
            Tag::DefinitionListDefinition => Frame::element("dd"),
            Tag::Table(_) => Frame::element("table"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.stack.push(Frame::element("thead"));
                Frame::element("tr")
            }
            Tag::TableRow => Frame::element("tr"),
            Tag::TableCell => Frame::element(if self.in_table_head { "th" } else { "td" }),
            Tag::Emphasis => Frame::element("em"),
            Tag::Strong => Frame::element("strong"),
            Tag::Strikethrough => Frame::element("s"),
            Tag::Superscript => Frame::element("sup"),
            Tag::Subscript => Frame::element("sub"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut attrs = vec![("href".to_owned(), dest_url.into_string())];
                if !title.is_empty() {
                    attrs.push(("title".to_owned(), title.into_string()));
                }
                Frame::element_with("a", attrs)
            }
            Tag::Image {
                dest_url, title, ..
            } => Frame::Image {
                src: dest_url.into_string(),
                title: title.into_string(),
                alt: String::new(),
            },
        };
        self.stack.push(frame);
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock => {}
            TagEnd::TableHead => {
                self.close(); // tr
                self.close(); // thead
                self.in_table_head = false;
            }
            _ => self.close(),
        }
    }

    /// Pop the innermost frame and attach its node to the parent.
    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        let node = match frame {
            Frame::Element {
                tag,
                attrs,
                children,
            } => Node::element_with_attrs(tag, attrs, children),
            Frame::Heading {
                level,
                explicit_id,
                text,
                children,
            } => {
                let title = text.trim().to_owned();
                let id = explicit_id.unwrap_or_else(|| self.generate_id(&title));
                self.outline.push(OutlineEntry {
                    level,
                    title,
                    id: id.clone(),
                });
                Node::Heading {
                    level,
                    id,
                    children,
                }
            }
            Frame::CodeBlock { language, source } => Node::CodeBlock { source, language },
            Frame::Image { src, title, alt } => {
                let mut attrs = vec![("src".to_owned(), src), ("alt".to_owned(), alt)];
                if !title.is_empty() {
                    attrs.push(("title".to_owned(), title));
                }
                Node::element_with_attrs("img", attrs, Vec::new())
            }
            Frame::FrontMatter(yaml) => {
                self.front_matter = Some(yaml);
                return;
            }
        };
        self.push_node(node);
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::CodeBlock { source, .. }) => source.push_str(text),
            Some(Frame::FrontMatter(yaml)) => yaml.push_str(text),
            Some(Frame::Image { alt, .. }) => alt.push_str(text),
            _ => {
                self.push_heading_text(text);
                self.push_node(Node::text(text));
            }
        }
    }

    /// Record heading text for the outline, if inside a heading.
    fn push_heading_text(&mut self, text: &str) {
        let heading = self.stack.iter_mut().rev().find_map(|frame| match frame {
            Frame::Heading { text, .. } => Some(text),
            _ => None,
        });
        if let Some(buffer) = heading {
            buffer.push_str(text);
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Frame::Element { children, .. } | Frame::Heading { children, .. }) => {
                children.push(node);
            }
            Some(Frame::Image { alt, .. }) => alt.push_str(&node.text_content()),
            Some(Frame::CodeBlock { .. } | Frame::FrontMatter(_)) => {}
            None => self.root.push(node),
        }
    }

    /// Generate a unique ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(markdown: &str) -> Article {
        parse_article(markdown, "/articles/test", "test").unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake-case");
    }

    #[test]
    fn test_front_matter_becomes_exports() {
        let article = parse(
            "---\ntitle: Hello\ndescription: A greeting\ndate: 2025-06-15\n---\n\n# Heading\n",
        );

        assert_eq!(
            article.document.exports,
            Exports {
                title: Some("Hello".to_owned()),
                description: Some("A greeting".to_owned()),
                date: Some("2025-06-15".to_owned()),
            }
        );
        assert_eq!(article.document.url, "/articles/test");
        assert_eq!(article.document.name, "test");
    }

    #[test]
    fn test_front_matter_not_in_body() {
        let article = parse("---\ntitle: Hello\n---\n\nBody text\n");
        assert_eq!(
            article.body,
            vec![Node::element("p", vec![Node::text("Body text")])]
        );
    }

    #[test]
    fn test_malformed_front_matter_is_error() {
        let result = parse_article("---\ntitle: [unclosed\n---\n\ntext\n", "/a", "a");
        assert!(result.is_err());
    }

    #[test]
    fn test_without_front_matter() {
        let article = parse("Just text.\n");
        assert_eq!(article.document.exports, Exports::default());
    }

    #[test]
    fn test_outline_and_heading_ids() {
        let article = parse("# Intro\n\n## Setup *fast*\n\n## Setup fast\n\n### `code` span\n");

        assert_eq!(
            article.document.outline,
            vec![
                OutlineEntry {
                    level: 1,
                    title: "Intro".to_owned(),
                    id: "intro".to_owned()
                },
                OutlineEntry {
                    level: 2,
                    title: "Setup fast".to_owned(),
                    id: "setup-fast".to_owned()
                },
                OutlineEntry {
                    level: 2,
                    title: "Setup fast".to_owned(),
                    id: "setup-fast-1".to_owned()
                },
                OutlineEntry {
                    level: 3,
                    title: "code span".to_owned(),
                    id: "code-span".to_owned()
                },
            ]
        );
        assert_eq!(
            article.body[0],
            Node::Heading {
                level: 1,
                id: "intro".to_owned(),
                children: vec![Node::text("Intro")],
            }
        );
    }

    #[test]
    fn test_code_blocks() {
        let article = parse("```rust ignore\nfn main() {}\n```\n\n    indented\n");

        assert_eq!(
            article.body,
            vec![
                Node::CodeBlock {
                    source: "fn main() {}\n".to_owned(),
                    language: Some("rust".to_owned()),
                },
                Node::CodeBlock {
                    source: "indented\n".to_owned(),
                    language: None,
                },
            ]
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let article = parse("```\nplain\n```\n");
        assert_eq!(
            article.body,
            vec![Node::CodeBlock {
                source: "plain\n".to_owned(),
                language: None,
            }]
        );
    }

    #[test]
    fn test_inline_structure() {
        let article = parse("See [the *docs*](/docs \"Docs\") and `x`.\n");

        assert_eq!(
            article.body,
            vec![Node::element(
                "p",
                vec![
                    Node::text("See "),
                    Node::element_with_attrs(
                        "a",
                        vec![
                            ("href".to_owned(), "/docs".to_owned()),
                            ("title".to_owned(), "Docs".to_owned()),
                        ],
                        vec![
                            Node::text("the "),
                            Node::element("em", vec![Node::text("docs")]),
                        ],
                    ),
                    Node::text(" and "),
                    Node::element("code", vec![Node::text("x")]),
                    Node::text("."),
                ],
            )]
        );
    }

    #[test]
    fn test_image_alt_text() {
        let article = parse("![A *cat*](cat.png)\n");
        assert_eq!(
            article.body,
            vec![Node::element(
                "p",
                vec![Node::element_with_attrs(
                    "img",
                    vec![
                        ("src".to_owned(), "cat.png".to_owned()),
                        ("alt".to_owned(), "A cat".to_owned()),
                    ],
                    Vec::new(),
                )],
            )]
        );
    }

    #[test]
    fn test_lists() {
        let article = parse("3. three\n4. four\n");
        let Node::Element { tag, attrs, children } = &article.body[0] else {
            panic!("expected list");
        };
        assert_eq!(tag, "ol");
        assert_eq!(attrs, &vec![("start".to_owned(), "3".to_owned())]);
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_table_head_cells() {
        let article = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let table = &article.body[0];
        let thead = &table.children()[0];
        let head_row = &thead.children()[0];

        assert!(matches!(thead, Node::Element { tag, .. } if tag == "thead"));
        assert!(matches!(&head_row.children()[0], Node::Element { tag, .. } if tag == "th"));
        let body_row = &table.children()[1];
        assert!(matches!(&body_row.children()[0], Node::Element { tag, .. } if tag == "td"));
    }

    #[test]
    fn test_inline_html_is_raw() {
        let article = parse("a <kbd>b</kbd>\n");
        let paragraph = &article.body[0];
        assert!(paragraph.children().contains(&Node::Raw("<kbd>".to_owned())));
    }
}
