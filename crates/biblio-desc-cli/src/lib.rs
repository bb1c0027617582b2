use std::path::{Path, PathBuf};

use anyhow::Result;
use biblio_desc_config::{Config, ConfigError, LoadOptions};
use biblio_desc_core::translit::unmapped_chars;
use biblio_desc_core::{
    initials_first, load_articles, surname_first, transliterate, DescError, ExitCode, Issue,
};
use biblio_desc_utils::atomic_write;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Command::Describe(args) => handle_artifact(&cli.global, args, Artifact::Description),
        Command::Contents(args) => handle_artifact(&cli.global, args, Artifact::Contents),
        Command::Translit(args) => handle_translit(args),
        Command::Names(args) => handle_names(args),
    }
}

#[derive(Clone, Copy, Debug)]
enum Artifact {
    Description,
    Contents,
}

impl Artifact {
    fn name(self) -> &'static str {
        match self {
            Artifact::Description => "description",
            Artifact::Contents => "contents",
        }
    }
}

fn handle_artifact(global: &GlobalArgs, args: ArtifactArgs, artifact: Artifact) -> Result<i32> {
    let ArtifactArgs { articles, output } = args;

    let config = match load_config(global) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::Config as i32);
        }
    };

    let mut issue = match Issue::from_config(&config) {
        Ok(issue) => issue,
        Err(err) => return Ok(report(&err)),
    };
    match load_articles(&articles) {
        Ok(raw) => issue.extend_raw(raw),
        Err(err) => return Ok(report(&err)),
    }

    let rendered = match artifact {
        Artifact::Description => issue.description(),
        Artifact::Contents => issue.contents(),
    };

    match output {
        Some(path) => write_output(&path, &rendered, artifact, issue.articles().len()),
        None => {
            emit(&rendered)?;
            Ok(ExitCode::Success as i32)
        }
    }
}

fn load_config(global: &GlobalArgs) -> Result<Config, ConfigError> {
    let mut options = LoadOptions::default();
    if let Some(path) = &global.config {
        options = options.with_override_path(path);
    }
    let mut config = Config::load(options)?;

    if let Some(year) = global.year {
        config.issue.year = Some(year);
    }
    if let Some(number) = &global.issue {
        config.issue.number = Some(number.clone());
    }
    Ok(config)
}

fn write_output(path: &Path, rendered: &str, artifact: Artifact, articles: usize) -> Result<i32> {
    match atomic_write(path, rendered) {
        Ok(()) => {
            info!(
                artifact = artifact.name(),
                path = %path.display(),
                articles,
                "artifact written"
            );
            Ok(ExitCode::Success as i32)
        }
        Err(source) => {
            eprintln!("I/O error on {}: {}", path.display(), source);
            Ok(ExitCode::Io as i32)
        }
    }
}

fn report(err: &DescError) -> i32 {
    eprintln!("{err}");
    err.exit_code() as i32
}

fn handle_translit(args: TranslitArgs) -> Result<i32> {
    for text in &args.text {
        let unmapped = unmapped_chars(text);
        if !unmapped.is_empty() {
            warn!(input = %text, ?unmapped, "characters without a latin mapping");
        }
        emit(&transliterate(text))?;
    }
    Ok(ExitCode::Success as i32)
}

fn handle_names(args: NamesArgs) -> Result<i32> {
    let NamesArgs { name, json } = args;

    if json {
        let payload = json!({
            "initials_first": initials_first(&name),
            "surname_first": surname_first(&name),
        });
        emit(&serde_json::to_string_pretty(&payload)?)?;
    } else {
        emit(&initials_first(&name))?;
        emit(&surname_first(&name))?;
    }
    Ok(ExitCode::Success as i32)
}

fn emit(content: &str) -> Result<()> {
    print!("{}", content);
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Bibliographic descriptions and contents for periodical issues",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file applied on top of `.biblio-desc.toml` discovery
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Issue year, overriding `issue.year`
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(i32).range(1800..=2200)
    )]
    year: Option<i32>,
    /// Issue number such as `17(20)`, overriding `issue.number`
    #[arg(long, global = true, value_name = "NUMBER", value_parser = parse_issue_number)]
    issue: Option<String>,
}

fn parse_issue_number(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("issue number must not be empty".to_owned());
    }
    Ok(trimmed.to_owned())
}

#[derive(Subcommand)]
enum Command {
    /// Render the bibliographic description of every article
    Describe(ArtifactArgs),
    /// Render the HTML table of contents grouped by section
    Contents(ArtifactArgs),
    /// Transliterate Ukrainian text into latin script
    Translit(TranslitArgs),
    /// Format author names in initials-first and surname-first order
    Names(NamesArgs),
}

#[derive(Args)]
struct ArtifactArgs {
    /// JSON array of extracted articles, in discovery order
    #[arg(value_name = "ARTICLES")]
    articles: PathBuf,
    /// Write the artifact to this file instead of stdout
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct TranslitArgs {
    /// Text to transliterate, one line of output per argument
    #[arg(value_name = "TEXT", required = true)]
    text: Vec<String>,
}

#[derive(Args)]
struct NamesArgs {
    /// Author names in `Surname Given Patronymic` order
    #[arg(value_name = "NAME", required = true)]
    name: Vec<String>,
    /// Emit both forms as a JSON object
    #[arg(long)]
    json: bool,
}
