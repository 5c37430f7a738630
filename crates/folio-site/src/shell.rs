//! HTML page shell.
//!
//! Serializes a [`ComposedPage`] and the navigation list into a complete
//! HTML5 document. All text and attribute values pass through
//! [`escape_html`]; only [`Node::Raw`] and already-escaped highlight markup
//! are written verbatim.

use std::fmt::Write;

use folio_highlight::{escape_html, escape_html_into};

use crate::layout::{ComposedPage, HeadTag, SiteInfo};
use crate::metadata::format_date;
use crate::navigation::NavEntry;
use crate::tree::Node;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

/// Render a complete HTML page.
#[must_use]
pub fn render_page(page: &ComposedPage, navigation: &[NavEntry], site: &SiteInfo) -> String {
    let mut html = String::with_capacity(8192);

    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
        escape_html(&site.language)
    );
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    render_head(&mut html, &page.head);
    html.push_str("</head>\n<body>\n");

    render_navigation(&mut html, navigation);

    html.push_str("<main>\n<article>\n");
    render_nodes(&mut html, &page.body);
    html.push_str("\n</article>\n</main>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn render_head(html: &mut String, head: &[HeadTag]) {
    for tag in head {
        match tag {
            HeadTag::Title(title) => {
                let _ = writeln!(html, "<title>{}</title>", escape_html(title));
            }
            HeadTag::Meta { name, content } => {
                let _ = writeln!(
                    html,
                    "<meta name=\"{}\" content=\"{}\">",
                    escape_html(name),
                    escape_html(content)
                );
            }
            HeadTag::Property { property, content } => {
                let _ = writeln!(
                    html,
                    "<meta property=\"{}\" content=\"{}\">",
                    escape_html(property),
                    escape_html(content)
                );
            }
        }
    }
}

fn render_navigation(html: &mut String, entries: &[NavEntry]) {
    if entries.is_empty() {
        return;
    }

    html.push_str("<nav>\n<ul>\n");
    for entry in entries {
        html.push_str("<li>");
        let current = if entry.is_current {
            " aria-current=\"page\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<a href=\"{}\"{current}>{}</a>",
            escape_html(&entry.url),
            escape_html(&entry.title)
        );
        if let Some(date) = entry.date {
            let _ = write!(
                html,
                " <time datetime=\"{}\">{}</time>",
                date.format("%Y-%m-%d"),
                escape_html(&format_date(date))
            );
        }
        if let Some(description) = &entry.description {
            let _ = write!(html, "<p>{}</p>", escape_html(description));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</nav>\n");
}

/// Serialize body nodes to HTML.
pub fn render_nodes(html: &mut String, nodes: &[Node]) {
    for node in nodes {
        render_node(html, node);
    }
}

fn render_node(html: &mut String, node: &Node) {
    match node {
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            let _ = write!(html, "<{tag}");
            render_attrs(html, attrs);
            html.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            render_nodes(html, children);
            let _ = write!(html, "</{tag}>");
        }
        Node::Text(text) => escape_html_into(html, text),
        Node::Raw(raw) => html.push_str(raw),
        Node::Heading {
            level,
            id,
            children,
        } => {
            let _ = write!(html, "<h{level} id=\"{}\">", escape_html(id));
            render_nodes(html, children);
            let _ = write!(html, "</h{level}>");
        }
        Node::CodeBlock { source, language } => {
            html.push_str("<pre><code");
            if let Some(language) = language {
                let _ = write!(html, " class=\"language-{}\"", escape_html(language));
            }
            html.push('>');
            escape_html_into(html, source);
            html.push_str("</code></pre>");
        }
        Node::Highlighted {
            language,
            grammar,
            markup,
        } => {
            html.push_str("<pre class=\"highlight\"");
            if let Some(language) = language {
                let _ = write!(html, " data-language=\"{}\"", escape_html(language));
            }
            let _ = write!(html, "><code class=\"language-{}\">", grammar.name());
            html.push_str(markup);
            html.push_str("</code></pre>");
        }
        Node::Time { datetime, label } => {
            let _ = write!(
                html,
                "<time datetime=\"{}\">{}</time>",
                escape_html(datetime),
                escape_html(label)
            );
        }
    }
}

fn render_attrs(html: &mut String, attrs: &[(String, String)]) {
    for (name, value) in attrs {
        if value.is_empty() {
            let _ = write!(html, " {}", escape_html(name));
        } else {
            let _ = write!(html, " {}=\"{}\"", escape_html(name), escape_html(value));
        }
    }
}
