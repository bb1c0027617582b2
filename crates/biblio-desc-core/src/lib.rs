//! Record model and text synthesis for periodical issue descriptions.
//!
//! Raw article fields supplied by an extractor become [`ArticleRecord`]s.
//! Each record renders to a bibliographic description block, and an
//! [`Issue`] collects records into the description artifact and the
//! section-grouped table of contents.

pub mod contents;
pub mod describe;
pub mod error;
pub mod handoff;
pub mod issue;
pub mod names;
pub mod record;
pub mod translit;

pub use biblio_desc_config::ArticleConfig;
pub use contents::ContentIndex;
pub use describe::{describe, describe_with, sentence_case, DescriptionStyle};
pub use error::{DescError, DescResult, ExitCode};
pub use handoff::{load_articles, parse_articles, RawArticle};
pub use issue::{Issue, RenderOptions};
pub use names::{initials_first, surname_first};
pub use record::{ArticleRecord, IssueMeta, NO_DATA};
pub use translit::{transliterate, UNMAPPED};
