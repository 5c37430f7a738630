//! Page composition.
//!
//! [`compose`] turns a document body and its metadata into the final page
//! structure in a single order-preserving pass:
//!
//! - head tags are derived from the metadata, omitting any tag whose value
//!   is absent;
//! - the first root-level `h1` gets a [`Node::Time`] sibling when the page
//!   has a date;
//! - every [`Node::CodeBlock`], at any depth, is replaced by its highlighted
//!   form.

use folio_highlight::highlight;

use crate::metadata::PageMetadata;
use crate::tree::Node;

/// Site-wide values used when composing pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteInfo {
    /// Site name appended to page titles.
    pub title: Option<String>,
    /// Absolute origin used for social card URLs (e.g. `https://example.com`).
    pub base_url: Option<String>,
    /// Document language for the `lang` attribute.
    pub language: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: None,
            base_url: None,
            language: "en".to_owned(),
        }
    }
}

impl SiteInfo {
    /// Absolute URL for `path` when a base URL is configured.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        match self.base_url.as_deref() {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_owned(),
        }
    }
}

/// Element placed in the document head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadTag {
    /// `<title>`.
    Title(String),
    /// `<meta name=".." content="..">`.
    Meta { name: String, content: String },
    /// `<meta property=".." content="..">` (social cards).
    Property { property: String, content: String },
}

impl HeadTag {
    fn meta(name: &str, content: &str) -> Self {
        Self::Meta {
            name: name.to_owned(),
            content: content.to_owned(),
        }
    }

    fn property(property: &str, content: &str) -> Self {
        Self::Property {
            property: property.to_owned(),
            content: content.to_owned(),
        }
    }
}

/// Composed page ready for serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedPage {
    pub head: Vec<HeadTag>,
    pub body: Vec<Node>,
}

impl ComposedPage {
    /// Content of the `<title>` tag.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.head.iter().find_map(|tag| match tag {
            HeadTag::Title(title) => Some(title.as_str()),
            _ => None,
        })
    }

    /// Content of the `<meta>` tag whose `name` or `property` is `key`.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.head.iter().find_map(|tag| match tag {
            HeadTag::Meta { name, content } if name == key => Some(content.as_str()),
            HeadTag::Property { property, content } if property == key => {
                Some(content.as_str())
            }
            _ => None,
        })
    }
}

/// Compose `body` into a page.
#[must_use]
pub fn compose(body: Vec<Node>, metadata: &PageMetadata, site: &SiteInfo) -> ComposedPage {
    ComposedPage {
        head: head_tags(metadata, site),
        body: compose_body(body, metadata),
    }
}

fn head_tags(metadata: &PageMetadata, site: &SiteInfo) -> Vec<HeadTag> {
    let page_title = match site.title.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(site_title) => format!("{} | {site_title}", metadata.title),
        None => metadata.title.clone(),
    };

    let mut head = vec![HeadTag::Title(page_title)];
    if let Some(description) = &metadata.description {
        head.push(HeadTag::meta("description", description));
    }

    head.push(HeadTag::property("og:title", &metadata.title));
    if let Some(description) = &metadata.description {
        head.push(HeadTag::property("og:description", description));
    }
    head.push(HeadTag::property("og:url", &site.absolute_url(&metadata.url)));
    head.push(HeadTag::property("og:type", "article"));
    head
}

fn compose_body(body: Vec<Node>, metadata: &PageMetadata) -> Vec<Node> {
    let mut time = time_node(metadata);
    let mut out = Vec::with_capacity(body.len() + 1);

    for node in body {
        let is_title = matches!(node, Node::Heading { level: 1, .. });
        out.push(substitute(node));
        if is_title && let Some(time) = time.take() {
            out.push(time);
        }
    }

    out
}

fn time_node(metadata: &PageMetadata) -> Option<Node> {
    Some(Node::Time {
        datetime: metadata.iso_date()?,
        label: metadata.display_date()?,
    })
}

/// Replace code blocks with highlighted listings, recursing into children.
fn substitute(node: Node) -> Node {
    match node {
        Node::CodeBlock { source, language } => {
            let highlighted = highlight(&source, language.as_deref());
            Node::Highlighted {
                language,
                grammar: highlighted.language,
                markup: highlighted.html,
            }
        }
        Node::Element {
            tag,
            attrs,
            children,
        } => Node::Element {
            tag,
            attrs,
            children: children.into_iter().map(substitute).collect(),
        },
        Node::Heading {
            level,
            id,
            children,
        } => Node::Heading {
            level,
            id,
            children: children.into_iter().map(substitute).collect(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use folio_highlight::Language;
    use pretty_assertions::assert_eq;

    use super::*;

    fn metadata() -> PageMetadata {
        PageMetadata {
            url: "/articles/hello".to_owned(),
            title: "Hello".to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 6, 15),
            description: Some("A greeting".to_owned()),
        }
    }

    fn h1(text: &str) -> Node {
        Node::Heading {
            level: 1,
            id: text.to_lowercase(),
            children: vec![Node::text(text)],
        }
    }

    fn time() -> Node {
        Node::Time {
            datetime: "2025-06-15".to_owned(),
            label: "June 15, 2025".to_owned(),
        }
    }

    #[test]
    fn test_head_tags() {
        let site = SiteInfo {
            title: Some("Notes".to_owned()),
            base_url: Some("https://example.com/".to_owned()),
            ..Default::default()
        };

        let page = compose(Vec::new(), &metadata(), &site);

        assert_eq!(
            page.head,
            vec![
                HeadTag::Title("Hello | Notes".to_owned()),
                HeadTag::meta("description", "A greeting"),
                HeadTag::property("og:title", "Hello"),
                HeadTag::property("og:description", "A greeting"),
                HeadTag::property("og:url", "https://example.com/articles/hello"),
                HeadTag::property("og:type", "article"),
            ]
        );
    }

    #[test]
    fn test_missing_description_omits_tags() {
        let metadata = PageMetadata {
            description: None,
            ..metadata()
        };

        let page = compose(Vec::new(), &metadata, &SiteInfo::default());

        assert_eq!(page.meta("description"), None);
        assert_eq!(page.meta("og:description"), None);
        assert!(page.head.iter().all(|tag| match tag {
            HeadTag::Meta { content, .. } | HeadTag::Property { content, .. } =>
                !content.is_empty(),
            HeadTag::Title(_) => true,
        }));
    }

    #[test]
    fn test_title_without_site_name() {
        let page = compose(Vec::new(), &metadata(), &SiteInfo::default());
        assert_eq!(page.title(), Some("Hello"));
        assert_eq!(page.meta("og:url"), Some("/articles/hello"));
    }

    #[test]
    fn test_inserts_time_after_first_h1() {
        let body = vec![
            Node::element("p", vec![Node::text("lead")]),
            h1("Hello"),
            Node::element("p", vec![Node::text("body")]),
            h1("Again"),
        ];

        let page = compose(body, &metadata(), &SiteInfo::default());

        assert_eq!(
            page.body,
            vec![
                Node::element("p", vec![Node::text("lead")]),
                h1("Hello"),
                time(),
                Node::element("p", vec![Node::text("body")]),
                h1("Again"),
            ]
        );
    }

    #[test]
    fn test_no_time_without_date() {
        let metadata = PageMetadata {
            date: None,
            ..metadata()
        };

        let page = compose(vec![h1("Hello")], &metadata, &SiteInfo::default());

        assert_eq!(page.body, vec![h1("Hello")]);
    }

    #[test]
    fn test_no_heading_skips_decoration() {
        let body = vec![
            Node::Heading {
                level: 2,
                id: "sub".to_owned(),
                children: vec![Node::text("Sub")],
            },
            Node::element("p", vec![Node::text("x")]),
        ];

        let page = compose(body.clone(), &metadata(), &SiteInfo::default());

        assert_eq!(page.body, body);
    }

    #[test]
    fn test_nested_h1_is_not_decorated() {
        let body = vec![Node::element("blockquote", vec![h1("Quoted")])];
        let page = compose(body.clone(), &metadata(), &SiteInfo::default());
        assert_eq!(page.body, body);
    }

    #[test]
    fn test_code_blocks_highlighted_at_any_depth() {
        let body = vec![
            Node::CodeBlock {
                source: "let x = 1;".to_owned(),
                language: Some("js".to_owned()),
            },
            Node::element(
                "li",
                vec![Node::CodeBlock {
                    source: "a -> b".to_owned(),
                    language: Some("nonexistent-lang".to_owned()),
                }],
            ),
        ];

        let page = compose(body, &metadata(), &SiteInfo::default());

        let Node::Highlighted {
            language,
            grammar,
            markup,
        } = &page.body[0]
        else {
            panic!("expected highlighted node, got {:?}", page.body[0]);
        };
        assert_eq!(language.as_deref(), Some("js"));
        assert_eq!(*grammar, Language::JavaScript);
        assert!(markup.starts_with(r#"<span class="token keyword">let</span>"#));

        let nested = &page.body[1].children()[0];
        assert!(matches!(
            nested,
            Node::Highlighted { language: Some(tag), grammar: Language::JavaScript, .. }
                if tag == "nonexistent-lang"
        ));
    }

    #[test]
    fn test_other_nodes_untouched() {
        let body = vec![
            Node::Raw("<div>raw</div>".to_owned()),
            Node::element_with_attrs(
                "a",
                vec![("href".to_owned(), "/x".to_owned())],
                vec![Node::text("x")],
            ),
        ];
        let page = compose(body.clone(), &metadata(), &SiteInfo::default());
        assert_eq!(page.body, body);
    }
}
