//! Section-grouped table of contents.

use std::collections::HashMap;
use std::sync::Arc;

use biblio_desc_config::DEFAULT_LINK_PLACEHOLDER;

use crate::record::ArticleRecord;

const CONTENTS_TITLE: &str = "ЗМІСТ";
const FRONT_MATTER_LABEL: &str = "Титульні сторінки та зміст";
const AUTHORS_LABEL: &str = "Автори";

/// Articles filed under one thematic section, in insertion order.
#[derive(Clone, Debug)]
pub struct SectionBucket {
    pub heading: Option<String>,
    pub articles: Vec<Arc<ArticleRecord>>,
}

/// Buckets keyed by section label, kept in first-seen order.
///
/// `insert` takes `&mut self`, so bucket creation is serialized by the
/// borrow checker and first-seen order is deterministic.
#[derive(Clone, Debug)]
pub struct ContentIndex {
    buckets: Vec<SectionBucket>,
    positions: HashMap<Option<String>, usize>,
    link_placeholder: String,
}

impl Default for ContentIndex {
    fn default() -> Self {
        ContentIndex::new()
    }
}

impl ContentIndex {
    pub fn new() -> Self {
        ContentIndex::with_link_placeholder(DEFAULT_LINK_PLACEHOLDER)
    }

    /// `placeholder` is the link target emitted for every entry; the
    /// publishing step replaces it with real handles.
    pub fn with_link_placeholder(placeholder: impl Into<String>) -> Self {
        ContentIndex {
            buckets: Vec::new(),
            positions: HashMap::new(),
            link_placeholder: placeholder.into(),
        }
    }

    pub fn insert(&mut self, record: Arc<ArticleRecord>) {
        let key = record.section().map(str::to_owned);
        let position = match self.positions.get(&key) {
            Some(position) => *position,
            None => {
                self.buckets.push(SectionBucket {
                    heading: key.clone(),
                    articles: Vec::new(),
                });
                let position = self.buckets.len() - 1;
                self.positions.insert(key, position);
                position
            }
        };
        self.buckets[position].articles.push(record);
    }

    pub fn buckets(&self) -> &[SectionBucket] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.articles.len()).sum()
    }

    /// HTML fragment: a fixed header, then one list per section.
    pub fn render(&self) -> String {
        let link = escape_html(&self.link_placeholder);
        let mut html = format!(
            "<h3>{CONTENTS_TITLE}</h3>\n<ul>\n\n\
             <a href=\"{link}\">{FRONT_MATTER_LABEL}</a><br />\n\
             <a href=\"{link}\">{AUTHORS_LABEL}</a>\n\n</ul>"
        );

        for bucket in &self.buckets {
            if let Some(heading) = &bucket.heading {
                html.push_str("\n<b>");
                html.push_str(&escape_html(&heading.to_uppercase()));
                html.push_str("</b>");
            }
            html.push_str("\n<ul>\n");

            let last = bucket.articles.len().saturating_sub(1);
            for (idx, article) in bucket.articles.iter().enumerate() {
                if article.authors().is_some() {
                    html.push_str("\n<b>");
                    html.push_str(&escape_html(&article.authors_surname_first()));
                    html.push_str("</b><br/>");
                }
                html.push_str(&format!(
                    "\n<a href=\"{link}\">{}</a>",
                    escape_html(article.title_or_sentinel())
                ));
                html.push_str(if idx < last { "<br/><br/>\n" } else { "\n\n</ul>" });
            }
        }

        html
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
