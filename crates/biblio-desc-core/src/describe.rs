//! Bibliographic description assembly.
//!
//! A description is a run of blocks separated by one blank line. Optional
//! blocks are dropped whole when their flag is off, so disabling one never
//! disturbs the bytes of the others.

use biblio_desc_config::DEFAULT_SEPARATOR;

use crate::record::ArticleRecord;

/// Layout knobs for a single description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriptionStyle {
    /// Precede every block with a `--- <label>` line.
    pub labeled: bool,
    /// Closing line of each description.
    pub separator: String,
}

impl Default for DescriptionStyle {
    fn default() -> Self {
        DescriptionStyle {
            labeled: false,
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}

struct Block {
    label: Option<&'static str>,
    lines: Vec<String>,
}

impl Block {
    fn new(label: &'static str, lines: Vec<String>) -> Self {
        Block {
            label: Some(label),
            lines,
        }
    }

    fn unlabeled(lines: Vec<String>) -> Self {
        Block { label: None, lines }
    }

    fn render(&self, labeled: bool, out: &mut String) {
        if labeled {
            if let Some(label) = self.label {
                out.push_str("--- ");
                out.push_str(label);
                out.push('\n');
            }
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Renders `record` with the default style.
pub fn describe(record: &ArticleRecord) -> String {
    describe_with(record, &DescriptionStyle::default())
}

/// Renders the full description block for `record`.
pub fn describe_with(record: &ArticleRecord, style: &DescriptionStyle) -> String {
    let config = record.config();
    let initials_first = record.authors_initials_first();
    let mut blocks = Vec::with_capacity(7);

    blocks.push(Block::new(
        "Автори",
        vec![
            record.surname_en().into_owned(),
            initials_first.clone(),
            record.authors_surname_first(),
        ],
    ));

    let mut titles = vec![record.title_or_sentinel().to_owned()];
    if config.has_en_version {
        titles.push(record.title_en_or_sentinel().to_owned());
    }
    blocks.push(Block::new("Назви", titles));

    blocks.push(Block::new(
        "Бібліогр. опис",
        vec![citation(record, &initials_first)],
    ));

    if config.has_udc {
        blocks.push(Block::new("УДК", vec![record.udc_or_sentinel().to_owned()]));
    }

    if let Some(section) = record.section() {
        blocks.push(Block::new("Тематичний розділ", vec![sentence_case(section)]));
    }

    if config.has_abstract {
        let mut abstracts = vec![record.abstract_or_sentinel().to_owned()];
        if config.has_en_version {
            abstracts.push(record.abstract_en_or_sentinel().to_owned());
        }
        blocks.push(Block::new("Анотації", abstracts));
    }

    blocks.push(Block::unlabeled(vec![style.separator.clone()]));

    let mut out = String::new();
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        block.render(style.labeled, &mut out);
    }
    out
}

fn citation(record: &ArticleRecord, initials_first: &str) -> String {
    let issue = record.issue();
    let mut sentence = format!(
        "{} / {} // {}, {}. — Вип. {}. — С. {}.",
        record.title_or_sentinel(),
        initials_first,
        issue.journal,
        issue.year,
        issue.number,
        record.pages_or_sentinel(),
    );
    if issue.config.has_source_list {
        sentence.push_str(&format!(
            " — Бібліогр.: {} назв.",
            record.sources_count_or_sentinel()
        ));
    }
    sentence.push_str(" — ");
    sentence.push_str(&issue.language);
    sentence
}

/// `"етнографія. фольклористика"` → `"Етнографія. Фольклористика"`.
pub fn sentence_case(text: &str) -> String {
    text.to_lowercase()
        .split(". ")
        .map(|clause| {
            let mut chars = clause.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(". ")
}
