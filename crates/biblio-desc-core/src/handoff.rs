//! Reader for the extractor's output: a JSON array of articles in discovery
//! order.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DescError, DescResult};
use crate::record::{is_unset, ArticleRecord, IssueMeta};

/// Raw fields for one article as located by the extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawArticle {
    pub section: Option<String>,
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub authors: Option<RawAuthors>,
    pub author_surname_en: Option<String>,
    pub pages: Option<String>,
    pub udc: Option<String>,
    pub sources_count: Option<RawCount>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub abstract_en: Option<String>,
}

/// Authors either as a list or as the `", "`-joined text the article page
/// shows.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawAuthors {
    List(Vec<String>),
    Joined(String),
}

impl RawAuthors {
    fn into_names(self) -> Vec<String> {
        let names: Vec<String> = match self {
            RawAuthors::List(list) => list,
            RawAuthors::Joined(text) => text.split(", ").map(str::to_owned).collect(),
        };
        names
            .into_iter()
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Reference count as a number, or as text in older dumps.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(u32),
    Text(String),
}

impl RawCount {
    fn into_count(self) -> Option<u32> {
        match self {
            RawCount::Number(count) => Some(count),
            RawCount::Text(text) => match text.trim().parse() {
                Ok(count) => Some(count),
                Err(_) => {
                    if !is_unset(&text) {
                        warn!(value = %text, "reference count is not a number");
                    }
                    None
                }
            },
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !is_unset(text))
}

impl RawArticle {
    pub fn into_record(self, issue: Arc<IssueMeta>) -> ArticleRecord {
        let section = present(self.section).map(|text| text.trim().to_owned());
        let mut record = ArticleRecord::new(issue, section);
        record.title = present(self.title).map(|text| text.trim().to_owned());
        record.title_en = present(self.title_en).map(|text| text.trim().to_owned());
        record.authors = self
            .authors
            .map(RawAuthors::into_names)
            .filter(|names| !names.is_empty());
        record.author_surname_en =
            present(self.author_surname_en).map(|text| text.trim().to_owned());
        record.pages = present(self.pages).map(|text| text.trim().to_owned());
        record.udc = present(self.udc).map(|text| text.trim().to_owned());
        record.sources_count = self.sources_count.and_then(RawCount::into_count);
        record.abstract_text = present(self.abstract_text);
        record.abstract_en = present(self.abstract_en);
        record
    }
}

pub fn parse_articles(json: &str) -> DescResult<Vec<RawArticle>> {
    parse_with_origin(json, "<inline>")
}

pub fn load_articles(path: &Path) -> DescResult<Vec<RawArticle>> {
    let contents = fs::read_to_string(path).map_err(|source| DescError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_origin(&contents, &path.display().to_string())
}

fn parse_with_origin(json: &str, origin: &str) -> DescResult<Vec<RawArticle>> {
    serde_json::from_str(json).map_err(|source| DescError::Parse {
        origin: origin.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Mutex;

    fn issue() -> Arc<IssueMeta> {
        Arc::new(IssueMeta::new(2018, "17(20)"))
    }

    #[test]
    fn joined_authors_are_split() {
        let articles = parse_articles(
            r#"[{"authors": "Коваль Іван Петрович, Ткач Олена", "title": " Назва "}]"#,
        )
        .unwrap();
        let record = articles.into_iter().next().unwrap().into_record(issue());
        assert_eq!(
            record.authors,
            Some(vec!["Коваль Іван Петрович".to_owned(), "Ткач Олена".to_owned()])
        );
        assert_eq!(record.title.as_deref(), Some("Назва"));
    }

    #[test]
    fn sentinel_and_blank_values_are_absent() {
        let articles = parse_articles(
            r#"[{"section": "no_data", "udc": "  ", "sources_count": "no_data", "authors": []}]"#,
        )
        .unwrap();
        let record = articles.into_iter().next().unwrap().into_record(issue());
        assert_eq!(record.section, None);
        assert_eq!(record.udc, None);
        assert_eq!(record.sources_count, None);
        assert_eq!(record.authors, None);
    }

    #[test]
    fn counts_accept_numbers_and_numeric_text() {
        let articles =
            parse_articles(r#"[{"sources_count": 12}, {"sources_count": "7"}]"#).unwrap();
        let counts: Vec<_> = articles
            .into_iter()
            .map(|raw| raw.into_record(issue()).sources_count)
            .collect();
        assert_eq!(counts, vec![Some(12), Some(7)]);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn counts_with_logs(json: &str) -> (Vec<Option<u32>>, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let counts = tracing::subscriber::with_default(subscriber, || {
            parse_articles(json)
                .unwrap()
                .into_iter()
                .map(|raw| raw.into_record(issue()).sources_count)
                .collect()
        });
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (counts, output)
    }

    #[test]
    fn non_numeric_count_is_dropped_with_warning() {
        let (counts, logs) = counts_with_logs(r#"[{"sources_count": "12 назв."}]"#);
        assert_eq!(counts, vec![None]);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("reference count is not a number"));
        assert!(logs.contains("12 назв."));
    }

    #[test]
    fn sentinel_count_is_dropped_quietly() {
        let (counts, logs) =
            counts_with_logs(r#"[{"sources_count": "no_data"}, {"sources_count": "7"}]"#);
        assert_eq!(counts, vec![None, Some(7)]);
        assert!(logs.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_articles(r#"[{"doi": "10.1/x"}]"#).unwrap_err();
        assert!(matches!(err, DescError::Parse { .. }));
    }
}
