use std::borrow::Cow;
use std::sync::Arc;

use biblio_desc_config::{ArticleConfig, Config, DEFAULT_JOURNAL, DEFAULT_LANGUAGE};
use tracing::warn;

use crate::error::{DescError, DescResult};
use crate::names;
use crate::translit::{transliterate, unmapped_chars};

/// Printed in place of any field the extractor left unset.
pub const NO_DATA: &str = "no_data";

/// Blank text and the literal sentinel both mean "not extracted".
pub(crate) fn is_unset(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed == NO_DATA
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !is_unset(text))
}

fn clear_unset(value: &mut Option<String>) {
    if value.as_deref().is_some_and(is_unset) {
        *value = None;
    }
}

/// Issue-wide identity and settings shared by every article of an issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueMeta {
    pub year: i32,
    pub number: String,
    pub journal: String,
    pub language: String,
    pub config: ArticleConfig,
}

impl IssueMeta {
    pub fn new(year: i32, number: impl Into<String>) -> Self {
        IssueMeta {
            year,
            number: number.into(),
            journal: DEFAULT_JOURNAL.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            config: ArticleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ArticleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn from_config(config: &Config) -> DescResult<Self> {
        let year = config
            .issue
            .year
            .ok_or(DescError::MissingIssueField("year"))?;
        let number = config
            .issue
            .number
            .clone()
            .ok_or(DescError::MissingIssueField("number"))?;
        Ok(IssueMeta {
            year,
            number,
            journal: config.issue.journal.clone(),
            language: config.issue.language.clone(),
            config: config.sections,
        })
    }
}

/// One article's extracted fields.
///
/// Unset fields are `None` and only become [`NO_DATA`] when rendered. Readers
/// also treat a blank or `"no_data"` value as unset, and
/// [`ArticleRecord::ensure_derived`] clears such values. The record is filled
/// in by a single writer; once `ensure_derived` has run it is handed off
/// (usually behind an `Arc`) and treated as frozen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleRecord {
    issue: Arc<IssueMeta>,
    pub section: Option<String>,
    pub authors: Option<Vec<String>>,
    pub author_surname_en: Option<String>,
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub pages: Option<String>,
    pub udc: Option<String>,
    pub sources_count: Option<u32>,
    pub abstract_text: Option<String>,
    pub abstract_en: Option<String>,
}

impl ArticleRecord {
    pub fn new(issue: Arc<IssueMeta>, mut section: Option<String>) -> Self {
        clear_unset(&mut section);
        ArticleRecord {
            issue,
            section,
            authors: None,
            author_surname_en: None,
            title: None,
            title_en: None,
            pages: None,
            udc: None,
            sources_count: None,
            abstract_text: None,
            abstract_en: None,
        }
    }

    pub fn issue(&self) -> &IssueMeta {
        &self.issue
    }

    pub fn year(&self) -> i32 {
        self.issue.year
    }

    pub fn issue_number(&self) -> &str {
        &self.issue.number
    }

    pub fn config(&self) -> ArticleConfig {
        self.issue.config
    }

    /// Thematic section, unless unset.
    pub fn section(&self) -> Option<&str> {
        present(&self.section)
    }

    /// Author names, unless the list is missing or empty.
    pub fn authors(&self) -> Option<&[String]> {
        self.authors.as_deref().filter(|authors| !authors.is_empty())
    }

    /// Clears blank and `"no_data"` fields, then stores the transliterated
    /// surname of the first author when no English surname was supplied.
    /// Returns `true` when a value was derived.
    pub fn ensure_derived(&mut self) -> bool {
        for field in [
            &mut self.section,
            &mut self.author_surname_en,
            &mut self.title,
            &mut self.title_en,
            &mut self.pages,
            &mut self.udc,
            &mut self.abstract_text,
            &mut self.abstract_en,
        ] {
            clear_unset(field);
        }
        if self.authors.as_ref().is_some_and(Vec::is_empty) {
            self.authors = None;
        }

        if self.author_surname_en.is_some() {
            return false;
        }
        let Some(derived) = self.derived_surname_en() else {
            return false;
        };
        self.author_surname_en = Some(derived);
        true
    }

    fn first_surname(&self) -> Option<&str> {
        self.authors()
            .and_then(|authors| authors.first())
            .and_then(|author| names::surname(author))
    }

    fn derived_surname_en(&self) -> Option<String> {
        let surname = self.first_surname()?;
        let unmapped = unmapped_chars(surname);
        if !unmapped.is_empty() {
            warn!(surname, ?unmapped, "surname has characters outside the transliteration table");
        }
        Some(transliterate(surname))
    }

    /// English surname: supplied, memoized, or derived on the fly for
    /// records that skipped [`ArticleRecord::ensure_derived`].
    pub fn surname_en(&self) -> Cow<'_, str> {
        if let Some(value) = present(&self.author_surname_en) {
            return Cow::Borrowed(value);
        }
        match self.first_surname() {
            Some(surname) => Cow::Owned(transliterate(surname)),
            None => Cow::Borrowed(NO_DATA),
        }
    }

    /// `"І. П. Коваль, О. Ткач"`, or the sentinel when authors are unknown.
    pub fn authors_initials_first(&self) -> String {
        match self.authors() {
            Some(authors) => names::initials_first(authors),
            None => NO_DATA.to_owned(),
        }
    }

    /// `"Коваль І. П., Ткач О."`, or the sentinel when authors are unknown.
    pub fn authors_surname_first(&self) -> String {
        match self.authors() {
            Some(authors) => names::surname_first(authors),
            None => NO_DATA.to_owned(),
        }
    }

    pub fn title_or_sentinel(&self) -> &str {
        or_sentinel(&self.title)
    }

    pub fn title_en_or_sentinel(&self) -> &str {
        or_sentinel(&self.title_en)
    }

    pub fn pages_or_sentinel(&self) -> &str {
        or_sentinel(&self.pages)
    }

    pub fn udc_or_sentinel(&self) -> &str {
        or_sentinel(&self.udc)
    }

    pub fn sources_count_or_sentinel(&self) -> String {
        self.sources_count
            .map_or_else(|| NO_DATA.to_owned(), |count| count.to_string())
    }

    pub fn abstract_or_sentinel(&self) -> &str {
        or_sentinel(&self.abstract_text).trim()
    }

    pub fn abstract_en_or_sentinel(&self) -> &str {
        or_sentinel(&self.abstract_en).trim()
    }
}

fn or_sentinel(value: &Option<String>) -> &str {
    present(value).unwrap_or(NO_DATA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(authors: Option<Vec<&str>>) -> ArticleRecord {
        let issue = Arc::new(IssueMeta::new(2018, "17(20)"));
        let mut record = ArticleRecord::new(issue, None);
        record.authors = authors.map(|list| list.into_iter().map(str::to_owned).collect());
        record
    }

    #[test]
    fn derives_english_surname_once() {
        let mut record = record(Some(vec!["Шевченко Тарас Григорович"]));
        assert!(record.ensure_derived());
        assert_eq!(record.author_surname_en.as_deref(), Some("Shevchenko"));
        assert!(!record.ensure_derived());
        assert_eq!(record.surname_en(), "Shevchenko");
    }

    #[test]
    fn explicit_english_surname_is_kept() {
        let mut record = record(Some(vec!["Шевченко Тарас"]));
        record.author_surname_en = Some("Shevchenko-Smith".into());
        assert!(!record.ensure_derived());
        assert_eq!(record.surname_en(), "Shevchenko-Smith");
    }

    #[test]
    fn read_without_derivation_still_transliterates() {
        let record = record(Some(vec!["Згурська Ольга"]));
        assert_eq!(record.surname_en(), "Zghurska");
        assert_eq!(record.author_surname_en, None);
    }

    #[test]
    fn unset_fields_render_as_sentinel() {
        let mut record = record(None);
        assert!(!record.ensure_derived());
        assert_eq!(record.surname_en(), NO_DATA);
        assert_eq!(record.authors_initials_first(), NO_DATA);
        assert_eq!(record.authors_surname_first(), NO_DATA);
        assert_eq!(record.title_or_sentinel(), NO_DATA);
        assert_eq!(record.sources_count_or_sentinel(), NO_DATA);
        assert_eq!(record.abstract_en_or_sentinel(), NO_DATA);
    }

    #[test]
    fn sentinel_values_set_directly_count_as_unset() {
        let issue = Arc::new(IssueMeta::new(2018, "17(20)"));
        let mut record = ArticleRecord::new(issue, Some(NO_DATA.into()));
        assert_eq!(record.section, None);

        record.authors = Some(vec!["Шевченко Тарас".into()]);
        record.author_surname_en = Some(NO_DATA.into());
        record.section = Some("  ".into());
        record.udc = Some(NO_DATA.into());
        assert_eq!(record.surname_en(), "Shevchenko");
        assert_eq!(record.section(), None);

        assert!(record.ensure_derived());
        assert_eq!(record.author_surname_en.as_deref(), Some("Shevchenko"));
        assert_eq!(record.section, None);
        assert_eq!(record.udc, None);
    }

    #[test]
    fn empty_author_list_is_unset() {
        let mut record = record(Some(Vec::new()));
        assert_eq!(record.authors(), None);
        assert_eq!(record.authors_surname_first(), NO_DATA);
        assert!(!record.ensure_derived());
        assert_eq!(record.authors, None);
    }

    #[test]
    fn issue_meta_requires_year_and_number() {
        let config = Config::default();
        let err = IssueMeta::from_config(&config).unwrap_err();
        assert!(matches!(err, DescError::MissingIssueField("year")));
    }
}
