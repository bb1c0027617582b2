use std::sync::Arc;

use biblio_desc_core::{
    describe, describe_with, transliterate, ArticleConfig, ArticleRecord, DescriptionStyle,
    IssueMeta, NO_DATA,
};
use biblio_desc_test_support::all_sections;
use pretty_assertions::assert_eq;

fn shevchenko_record(config: ArticleConfig) -> ArticleRecord {
    let issue = Arc::new(IssueMeta::new(2018, "17(20)").with_config(config));
    let mut record = ArticleRecord::new(issue, Some("Фольклор. Етнографія".into()));
    record.authors = Some(vec!["Шевченко Тарас Григорович".into()]);
    record.title = Some("Title".into());
    record.pages = Some("10-20".into());
    record.sources_count = Some(5);
    record
}

#[test]
fn full_description_with_every_block() {
    let mut record = shevchenko_record(all_sections());
    record.ensure_derived();

    let expected = "\
Shevchenko
Т. Г. Шевченко
Шевченко Т. Г.

Title
no_data

Title / Т. Г. Шевченко // Матеріали до української етнології: Зб. наук. пр. — К.: ІМФЕ ім. М.Т. Рильського НАН України, 2018. — Вип. 17(20). — С. 10-20. — Бібліогр.: 5 назв. — укр.

no_data

Фольклор. Етнографія

no_data
no_data

*****
";
    assert_eq!(describe(&record), expected);
}

#[test]
fn first_line_is_transliterated_surname() {
    let mut record = shevchenko_record(all_sections());
    assert_eq!(record.author_surname_en, None);
    record.ensure_derived();

    let description = describe(&record);
    let first_line = description.lines().next().unwrap();
    assert_eq!(first_line, transliterate("Шевченко"));
    assert_eq!(record.author_surname_en.as_deref(), Some("Shevchenko"));
}

fn translated_record(config: ArticleConfig) -> ArticleRecord {
    let mut record = shevchenko_record(config);
    record.title_en = Some("Title EN".into());
    record.abstract_text = Some(" Анотація.\n".into());
    record.abstract_en = Some("Abstract.".into());
    record
}

#[test]
fn sentinel_fields_set_directly_are_treated_as_unset() {
    let mut record = shevchenko_record(all_sections());
    record.section = Some(NO_DATA.into());
    record.author_surname_en = Some(NO_DATA.into());

    let before = describe(&record);
    assert_eq!(before.lines().next(), Some("Shevchenko"));
    assert!(!before.contains("No_data"));

    assert!(record.ensure_derived());
    assert_eq!(record.author_surname_en.as_deref(), Some("Shevchenko"));
    assert_eq!(record.section, None);
    assert_eq!(describe(&record), before);
}

#[test]
fn minimal_flags_drop_optional_blocks() {
    let record = shevchenko_record(ArticleConfig::default());

    let expected = "\
Shevchenko
Т. Г. Шевченко
Шевченко Т. Г.

Title

Title / Т. Г. Шевченко // Матеріали до української етнології: Зб. наук. пр. — К.: ІМФЕ ім. М.Т. Рильського НАН України, 2018. — Вип. 17(20). — С. 10-20. — укр.

Фольклор. Етнографія

*****
";
    assert_eq!(describe(&record), expected);
}

#[test]
fn toggling_udc_removes_only_its_block() {
    let mut with_udc = shevchenko_record(all_sections());
    with_udc.udc = Some("398.8".into());
    let without_udc = {
        let config = ArticleConfig {
            has_udc: false,
            ..all_sections()
        };
        let mut record = shevchenko_record(config);
        record.udc = Some("398.8".into());
        record
    };

    let full = describe(&with_udc);
    let trimmed = describe(&without_udc);

    assert_eq!(full.replacen("398.8\n\n", "", 1), trimmed);
    assert!(!trimmed.contains("398.8"));
}

#[test]
fn sentinel_section_yields_no_thematic_block() {
    let issue = Arc::new(IssueMeta::new(2018, "17(20)"));
    let mut record = ArticleRecord::new(issue, None);
    record.title = Some("Хроніка".into());

    let description = describe(&record);
    assert!(!description.contains("Фольклор"));

    let expected = "\
no_data
no_data
no_data

Хроніка

Хроніка / no_data // Матеріали до української етнології: Зб. наук. пр. — К.: ІМФЕ ім. М.Т. Рильського НАН України, 2018. — Вип. 17(20). — С. no_data. — укр.

*****
";
    assert_eq!(description, expected);
}

#[test]
fn missing_fields_print_sentinel_verbatim() {
    let config = ArticleConfig {
        has_source_list: true,
        ..ArticleConfig::default()
    };
    let issue = Arc::new(IssueMeta::new(2019, "18(21)").with_config(config));
    let record = ArticleRecord::new(issue, None);

    let description = describe(&record);
    assert!(description.contains(&format!("— Бібліогр.: {NO_DATA} назв. — укр.")));
    assert!(description.starts_with("no_data\nno_data\nno_data\n\nno_data\n\n"));
}

#[test]
fn abstracts_are_trimmed_and_paired() {
    let mut record = shevchenko_record(all_sections());
    record.abstract_text = Some("  Розглянуто пісні.\n".into());
    record.abstract_en = Some("\nSongs are considered.  ".into());

    let description = describe(&record);
    assert!(description.ends_with("Розглянуто пісні.\nSongs are considered.\n\n*****\n"));
}

#[test]
fn labeled_style_names_every_block() {
    let record = shevchenko_record(all_sections());
    let style = DescriptionStyle {
        labeled: true,
        separator: "=====".into(),
    };

    let description = describe_with(&record, &style);
    let labels: Vec<_> = description
        .lines()
        .filter(|line| line.starts_with("--- "))
        .collect();
    assert_eq!(
        labels,
        vec![
            "--- Автори",
            "--- Назви",
            "--- Бібліогр. опис",
            "--- УДК",
            "--- Тематичний розділ",
            "--- Анотації",
        ]
    );
    assert!(description.ends_with("\n\n=====\n"));
}

#[test]
fn toggling_source_list_removes_only_the_count() {
    let with_count = shevchenko_record(all_sections());
    let without_count = shevchenko_record(ArticleConfig {
        has_source_list: false,
        ..all_sections()
    });

    assert_eq!(
        describe(&with_count).replacen(" — Бібліогр.: 5 назв.", "", 1),
        describe(&without_count)
    );
}

#[test]
fn toggling_abstract_removes_only_its_block() {
    let with_abstract = translated_record(all_sections());
    let without_abstract = translated_record(ArticleConfig {
        has_abstract: false,
        ..all_sections()
    });

    let full = describe(&with_abstract);
    let trimmed = describe(&without_abstract);
    assert_eq!(full.replacen("Анотація.\nAbstract.\n\n", "", 1), trimmed);
    assert!(trimmed.contains("Title\nTitle EN\n"));
}

#[test]
fn toggling_english_version_removes_only_english_lines() {
    let with_english = translated_record(all_sections());
    let without_english = translated_record(ArticleConfig {
        has_en_version: false,
        ..all_sections()
    });

    let full = describe(&with_english);
    assert_eq!(
        full.replacen("Title EN\n", "", 1)
            .replacen("Abstract.\n", "", 1),
        describe(&without_english)
    );
}

#[test]
fn abstract_without_english_version() {
    let record = translated_record(ArticleConfig {
        has_abstract: true,
        ..ArticleConfig::default()
    });

    let expected = "\
Shevchenko
Т. Г. Шевченко
Шевченко Т. Г.

Title

Title / Т. Г. Шевченко // Матеріали до української етнології: Зб. наук. пр. — К.: ІМФЕ ім. М.Т. Рильського НАН України, 2018. — Вип. 17(20). — С. 10-20. — укр.

Фольклор. Етнографія

Анотація.

*****
";
    assert_eq!(describe(&record), expected);
}

#[test]
fn english_version_without_abstract() {
    let record = translated_record(ArticleConfig {
        has_en_version: true,
        ..ArticleConfig::default()
    });

    let expected = "\
Shevchenko
Т. Г. Шевченко
Шевченко Т. Г.

Title
Title EN

Title / Т. Г. Шевченко // Матеріали до української етнології: Зб. наук. пр. — К.: ІМФЕ ім. М.Т. Рильського НАН України, 2018. — Вип. 17(20). — С. 10-20. — укр.

Фольклор. Етнографія

*****
";
    assert_eq!(describe(&record), expected);
}
