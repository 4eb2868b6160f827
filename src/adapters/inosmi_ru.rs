//! InoSMI article extractor.
//!
//! InoSMI pages wrap the story in a single `article.article` element. Only
//! headings, paragraphs and list items inside it are kept; embedded media,
//! asides and the byline block are dropped.

use super::{ArticleNotFound, Extractor};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

static ARTICLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.article").expect("static selector"));
static TEXT_BLOCKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, p, li").expect("static selector"));

const SKIPPED_TAGS: &[&str] = &["script", "style", "aside", "figure", "noscript"];
const SKIPPED_CLASSES: &[&str] = &["article-info"];
const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "p", "li"];

#[derive(Debug, Default, Clone, Copy)]
pub struct InosmiExtractor;

impl Extractor for InosmiExtractor {
    fn extract(&self, html: &str) -> Result<String, ArticleNotFound> {
        let document = Html::parse_document(html);
        let article = document
            .select(&ARTICLE)
            .next()
            .ok_or_else(|| ArticleNotFound::new("no article.article element"))?;

        let blocks: Vec<String> = article
            .select(&TEXT_BLOCKS)
            .filter(|el| !is_skipped(el, &article))
            .map(|el| block_text(&el))
            .filter(|text| !text.is_empty())
            .collect();

        debug!(blocks = blocks.len(), "Extracted InoSMI article");
        Ok(blocks.join("\n"))
    }
}

/// Text of one block with whitespace collapsed. Inline markup does not split
/// words; `<br>` does.
fn block_text(el: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(e) if e.name() == "br" => raw.push(' '),
            _ => {}
        }
    }
    raw.split_whitespace().join(" ")
}

/// True when `el` sits inside dropped markup, or inside another text block
/// whose text already covers it.
fn is_skipped(el: &ElementRef<'_>, article: &ElementRef<'_>) -> bool {
    for node in el.ancestors() {
        if node.id() == article.id() {
            break;
        }
        let Some(ancestor) = node.value().as_element() else {
            continue;
        };
        let name = ancestor.name();
        if SKIPPED_TAGS.contains(&name) || BLOCK_TAGS.contains(&name) {
            return true;
        }
        if ancestor.classes().any(|c| SKIPPED_CLASSES.contains(&c)) {
            return true;
        }
    }
    false
}
