//! Shared test harness utilities for biblio-desc crates.

use biblio_desc_config::{ArticleConfig, Config};

/// Issue settings matching the 2018 issue 17(20), every block enabled.
pub const ISSUE_2018_TOML: &str = r#"
[issue]
year = 2018
number = "17(20)"

[sections]
has_abstract = true
has_udc = true
has_en_version = true
has_source_list = true
"#;

/// Three articles across two sections plus one unclassified article, in
/// discovery order.
pub const SAMPLE_ARTICLES_JSON: &str = r#"[
  {
    "section": "Фольклор. Етнографія",
    "title": "Весільні пісні Полісся",
    "title_en": "Wedding songs of Polissia",
    "authors": ["Шевченко Тарас Григорович"],
    "pages": "10-20",
    "udc": "398.8",
    "sources_count": 5,
    "abstract": "Розглянуто весільні пісні.\n",
    "abstract_en": "Wedding songs are considered.\n"
  },
  {
    "section": "Етнологія",
    "title": "Обряди & звичаї",
    "authors": "Коваль Іван Петрович, Ткач Олена",
    "pages": "21-30",
    "sources_count": 12
  },
  {
    "section": "Фольклор. Етнографія",
    "title": "Колядки",
    "authors": ["Згурська Марія"],
    "pages": "31-35"
  },
  {
    "title": "Хроніка"
  }
]"#;

/// Returns a baseline configuration for tests.
pub fn test_config() -> Config {
    Config::default()
}

/// Configuration for the 2018 issue with every optional block enabled.
pub fn issue_2018_config() -> Config {
    Config::from_toml_str(ISSUE_2018_TOML)
        .unwrap_or_else(|err| panic!("fixture config must parse: {err}"))
}

pub fn all_sections() -> ArticleConfig {
    ArticleConfig::all()
}
