use std::sync::Arc;

use biblio_desc_config::{Config, DEFAULT_LINK_PLACEHOLDER};
use biblio_desc_utils::parallel_map;
use tracing::{debug, warn};

use crate::contents::ContentIndex;
use crate::describe::{describe_with, DescriptionStyle};
use crate::error::DescResult;
use crate::handoff::RawArticle;
use crate::record::{ArticleRecord, IssueMeta};

/// How the two issue artifacts are laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub numbered: bool,
    pub style: DescriptionStyle,
    pub link_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            numbered: false,
            style: DescriptionStyle::default(),
            link_placeholder: DEFAULT_LINK_PLACEHOLDER.to_owned(),
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        RenderOptions {
            numbered: config.description.numbered,
            style: DescriptionStyle {
                labeled: config.description.labeled,
                separator: config.description.separator.clone(),
            },
            link_placeholder: config.contents.link_placeholder.clone(),
        }
    }
}

/// All articles of one issue, in discovery order, plus their contents index.
#[derive(Clone, Debug)]
pub struct Issue {
    meta: Arc<IssueMeta>,
    options: RenderOptions,
    articles: Vec<Arc<ArticleRecord>>,
    contents: ContentIndex,
}

impl Issue {
    pub fn new(meta: IssueMeta, options: RenderOptions) -> Self {
        let contents = ContentIndex::with_link_placeholder(options.link_placeholder.clone());
        Issue {
            meta: Arc::new(meta),
            options,
            articles: Vec::new(),
            contents,
        }
    }

    pub fn from_config(config: &Config) -> DescResult<Self> {
        Ok(Issue::new(
            IssueMeta::from_config(config)?,
            RenderOptions::from_config(config),
        ))
    }

    pub fn meta(&self) -> &Arc<IssueMeta> {
        &self.meta
    }

    /// Empty record bound to this issue, ready for the extractor to fill.
    pub fn new_record(&self, section: Option<String>) -> ArticleRecord {
        ArticleRecord::new(Arc::clone(&self.meta), section)
    }

    /// Finalizes `record` and appends it to both artifacts.
    pub fn push(&mut self, mut record: ArticleRecord) {
        record.ensure_derived();
        if record.authors().is_none() {
            warn!(title = record.title_or_sentinel(), "article has no authors");
        }
        debug!(
            index = self.articles.len() + 1,
            section = ?record.section(),
            title = record.title_or_sentinel(),
            "article added"
        );

        let record = Arc::new(record);
        self.contents.insert(Arc::clone(&record));
        self.articles.push(record);
    }

    pub fn extend_raw(&mut self, raw: impl IntoIterator<Item = RawArticle>) {
        for article in raw {
            let record = article.into_record(Arc::clone(&self.meta));
            self.push(record);
        }
    }

    pub fn articles(&self) -> &[Arc<ArticleRecord>] {
        &self.articles
    }

    pub fn contents_index(&self) -> &ContentIndex {
        &self.contents
    }

    /// Description artifact: every article's block in discovery order.
    pub fn description(&self) -> String {
        let style = &self.options.style;
        let numbered = self.options.numbered;
        let blocks = parallel_map(
            self.articles.iter().enumerate().collect::<Vec<_>>(),
            |(idx, record)| {
                let body = describe_with(record, style);
                if numbered {
                    format!("{})\n{}", idx + 1, body)
                } else {
                    body
                }
            },
        );
        blocks.concat()
    }

    /// Contents artifact: the HTML table of contents.
    pub fn contents(&self) -> String {
        self.contents.render()
    }
}
