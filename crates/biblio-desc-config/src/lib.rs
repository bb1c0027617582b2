//! Configuration primitives and loader for the biblio-desc toolkit.
//!
//! The loader resolves configuration using a precedence stack:
//! override flag → working directory → git root → built-in defaults.
//! Parsed settings are normalised into typed structures so downstream crates
//! can operate without touching raw TOML.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".biblio-desc.toml";

pub const DEFAULT_JOURNAL: &str =
    "Матеріали до української етнології: Зб. наук. пр. — К.: ІМФЕ ім. М.Т. Рильського НАН України";
pub const DEFAULT_LANGUAGE: &str = "укр.";
pub const DEFAULT_SEPARATOR: &str = "*****";
pub const DEFAULT_LINK_PLACEHOLDER: &str = "/dspace/handle/123456789/XXXXXX";

const MIN_YEAR: i32 = 1800;
const MAX_YEAR: i32 = 2200;

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub issue: IssueSettings,
    pub sections: ArticleConfig,
    pub description: DescriptionSettings,
    pub contents: ContentsSettings,
    pub sources: ConfigSources,
}

/// Identity of the issue being processed plus the fixed citation strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssueSettings {
    pub year: Option<i32>,
    pub number: Option<String>,
    pub journal: String,
    pub language: String,
}

/// Which optional description blocks apply to every article of an issue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArticleConfig {
    pub has_abstract: bool,
    pub has_udc: bool,
    pub has_en_version: bool,
    pub has_source_list: bool,
}

impl ArticleConfig {
    /// Every optional block enabled.
    pub fn all() -> Self {
        ArticleConfig {
            has_abstract: true,
            has_udc: true,
            has_en_version: true,
            has_source_list: true,
        }
    }
}

/// Layout options for the description artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionSettings {
    pub numbered: bool,
    pub labeled: bool,
    pub separator: String,
}

/// Options for the table-of-contents fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentsSettings {
    pub link_placeholder: String,
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
}

impl ConfigSource {
    fn builtin() -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        ConfigSource {
            kind,
            path: Some(path),
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::builtin();
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_root = find_git_root(&working_dir);
        let git_config_path = git_root.as_ref().map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let config = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            issue: config.issue,
            sections: config.sections,
            description: config.description,
            contents: config.contents,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Parses a single TOML document on top of the built-in defaults, without
    /// touching the filesystem.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let default_source = ConfigSource::builtin();
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));
        let layer = parse_layer(contents, default_source.clone()).map_err(|source| {
            ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            }
        })?;
        merged.merge(layer);
        let config = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            issue: config.issue,
            sections: config.sections,
            description: config.description,
            contents: config.contents,
            sources: ConfigSources {
                working_directory: PathBuf::from("."),
                layers: vec![default_source],
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let defaults = defaults_layer(ConfigSource::builtin())
            .finalize()
            .unwrap_or_else(|err| panic!("built-in biblio-desc defaults are invalid: {err}"));
        Config {
            issue: defaults.issue,
            sections: defaults.sections,
            description: defaults.description,
            contents: defaults.contents,
            sources: ConfigSources {
                working_directory: PathBuf::from("."),
                layers: vec![ConfigSource::builtin()],
            },
        }
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    parse_layer(&contents, source).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })
}

fn parse_layer(contents: &str, source: ConfigSource) -> Result<PartialConfig, toml::de::Error> {
    let raw: RawConfig = toml::from_str(contents)?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    let issue = IssuePartial {
        journal: Some(Located::new(DEFAULT_JOURNAL.into(), source.clone())),
        language: Some(Located::new(DEFAULT_LANGUAGE.into(), source.clone())),
        ..IssuePartial::default()
    };

    let sections = SectionsPartial {
        has_abstract: Some(false),
        has_udc: Some(false),
        has_en_version: Some(false),
        has_source_list: Some(false),
    };

    let description = DescriptionPartial {
        numbered: Some(false),
        labeled: Some(false),
        separator: Some(Located::new(DEFAULT_SEPARATOR.into(), source.clone())),
    };

    let contents = ContentsPartial {
        link_placeholder: Some(Located::new(DEFAULT_LINK_PLACEHOLDER.into(), source)),
    };

    PartialConfig {
        issue: Some(issue),
        sections: Some(sections),
        description: Some(description),
        contents: Some(contents),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    issue: Option<IssuePartial>,
    sections: Option<SectionsPartial>,
    description: Option<DescriptionPartial>,
    contents: Option<ContentsPartial>,
}

impl PartialConfig {
    fn merge(&mut self, mut other: PartialConfig) {
        if let Some(other_issue) = other.issue.take() {
            match &mut self.issue {
                Some(issue) => issue.merge(other_issue),
                None => self.issue = Some(other_issue),
            }
        }

        if let Some(other_sections) = other.sections.take() {
            match &mut self.sections {
                Some(sections) => sections.merge(other_sections),
                None => self.sections = Some(other_sections),
            }
        }

        if let Some(other_description) = other.description.take() {
            match &mut self.description {
                Some(description) => description.merge(other_description),
                None => self.description = Some(other_description),
            }
        }

        if let Some(other_contents) = other.contents.take() {
            match &mut self.contents {
                Some(contents) => contents.merge(other_contents),
                None => self.contents = Some(other_contents),
            }
        }
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();

        let issue_partial = self.issue.unwrap_or_default();
        if let Some(year) = &issue_partial.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year.value) {
                errors.push(ConfigValidationError::new(
                    Some(year.source.clone()),
                    format!(
                        "issue.year must be between {MIN_YEAR} and {MAX_YEAR} (received {})",
                        year.value
                    ),
                ));
            }
        }
        if let Some(number) = &issue_partial.number {
            if number.value.trim().is_empty() {
                errors.push(ConfigValidationError::new(
                    Some(number.source.clone()),
                    "issue.number must not be empty".to_owned(),
                ));
            }
        }

        let issue = IssueSettings {
            year: issue_partial.year.map(|located| located.value),
            number: issue_partial
                .number
                .map(|located| located.value.trim().to_owned()),
            journal: issue_partial
                .journal
                .map(|located| located.value)
                .unwrap_or_else(|| DEFAULT_JOURNAL.to_owned()),
            language: issue_partial
                .language
                .map(|located| located.value)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
        };

        let sections_partial = self.sections.unwrap_or_default();
        let sections = ArticleConfig {
            has_abstract: sections_partial.has_abstract.unwrap_or(false),
            has_udc: sections_partial.has_udc.unwrap_or(false),
            has_en_version: sections_partial.has_en_version.unwrap_or(false),
            has_source_list: sections_partial.has_source_list.unwrap_or(false),
        };

        let description_partial = self.description.unwrap_or_default();
        let separator = description_partial
            .separator
            .unwrap_or_else(|| Located::new(DEFAULT_SEPARATOR.into(), ConfigSource::builtin()));
        if separator.value.trim().is_empty() || separator.value.contains('\n') {
            errors.push(ConfigValidationError::new(
                Some(separator.source.clone()),
                "description.separator must be a single non-blank line".to_owned(),
            ));
        }
        let description = DescriptionSettings {
            numbered: description_partial.numbered.unwrap_or(false),
            labeled: description_partial.labeled.unwrap_or(false),
            separator: separator.value,
        };

        let contents_partial = self.contents.unwrap_or_default();
        let link_placeholder = contents_partial.link_placeholder.unwrap_or_else(|| {
            Located::new(DEFAULT_LINK_PLACEHOLDER.into(), ConfigSource::builtin())
        });
        if link_placeholder.value.trim().is_empty() {
            errors.push(ConfigValidationError::new(
                Some(link_placeholder.source.clone()),
                "contents.link_placeholder must not be empty".to_owned(),
            ));
        }
        let contents = ContentsSettings {
            link_placeholder: link_placeholder.value,
        };

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            issue,
            sections,
            description,
            contents,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct IssuePartial {
    year: Option<Located<i32>>,
    number: Option<Located<String>>,
    journal: Option<Located<String>>,
    language: Option<Located<String>>,
}

impl IssuePartial {
    fn merge(&mut self, other: IssuePartial) {
        if other.year.is_some() {
            self.year = other.year;
        }
        if other.number.is_some() {
            self.number = other.number;
        }
        if other.journal.is_some() {
            self.journal = other.journal;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct SectionsPartial {
    has_abstract: Option<bool>,
    has_udc: Option<bool>,
    has_en_version: Option<bool>,
    has_source_list: Option<bool>,
}

impl SectionsPartial {
    fn merge(&mut self, other: SectionsPartial) {
        if other.has_abstract.is_some() {
            self.has_abstract = other.has_abstract;
        }
        if other.has_udc.is_some() {
            self.has_udc = other.has_udc;
        }
        if other.has_en_version.is_some() {
            self.has_en_version = other.has_en_version;
        }
        if other.has_source_list.is_some() {
            self.has_source_list = other.has_source_list;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct DescriptionPartial {
    numbered: Option<bool>,
    labeled: Option<bool>,
    separator: Option<Located<String>>,
}

impl DescriptionPartial {
    fn merge(&mut self, other: DescriptionPartial) {
        if other.numbered.is_some() {
            self.numbered = other.numbered;
        }
        if other.labeled.is_some() {
            self.labeled = other.labeled;
        }
        if other.separator.is_some() {
            self.separator = other.separator;
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ContentsPartial {
    link_placeholder: Option<Located<String>>,
}

impl ContentsPartial {
    fn merge(&mut self, other: ContentsPartial) {
        if other.link_placeholder.is_some() {
            self.link_placeholder = other.link_placeholder;
        }
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    issue: IssueSettings,
    sections: ArticleConfig,
    description: DescriptionSettings,
    contents: ContentsSettings,
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

impl ConfigValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigValidationError> {
        self.0.iter()
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError { source, message }
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    issue: Option<RawIssue>,
    #[serde(default)]
    sections: Option<RawSections>,
    #[serde(default)]
    description: Option<RawDescription>,
    #[serde(default)]
    contents: Option<RawContents>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            issue: self.issue.map(|issue| issue.into_partial(source.clone())),
            sections: self.sections.map(RawSections::into_partial),
            description: self
                .description
                .map(|description| description.into_partial(source.clone())),
            contents: self.contents.map(|contents| contents.into_partial(source)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIssue {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    journal: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl RawIssue {
    fn into_partial(self, source: ConfigSource) -> IssuePartial {
        IssuePartial {
            year: self.year.map(|value| Located::new(value, source.clone())),
            number: self.number.map(|value| Located::new(value, source.clone())),
            journal: self.journal.map(|value| Located::new(value, source.clone())),
            language: self.language.map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSections {
    #[serde(default)]
    has_abstract: Option<bool>,
    #[serde(default)]
    has_udc: Option<bool>,
    #[serde(default)]
    has_en_version: Option<bool>,
    #[serde(default)]
    has_source_list: Option<bool>,
}

impl RawSections {
    fn into_partial(self) -> SectionsPartial {
        SectionsPartial {
            has_abstract: self.has_abstract,
            has_udc: self.has_udc,
            has_en_version: self.has_en_version,
            has_source_list: self.has_source_list,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDescription {
    #[serde(default)]
    numbered: Option<bool>,
    #[serde(default)]
    labeled: Option<bool>,
    #[serde(default)]
    separator: Option<String>,
}

impl RawDescription {
    fn into_partial(self, source: ConfigSource) -> DescriptionPartial {
        DescriptionPartial {
            numbered: self.numbered,
            labeled: self.labeled,
            separator: self.separator.map(|value| Located::new(value, source)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawContents {
    #[serde(default)]
    link_placeholder: Option<String>,
}

impl RawContents {
    fn into_partial(self, source: ConfigSource) -> ContentsPartial {
        ContentsPartial {
            link_placeholder: self
                .link_placeholder
                .map(|value| Located::new(value, source)),
        }
    }
}
