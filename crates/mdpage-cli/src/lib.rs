use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use mdpage_config::{
    resolve_toc_depth, LoadOptions, RenderSettings, TitleMode, TocSettings,
};
use mdpage_convert::{Converter, RunOutcome};
use serde_json::json;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    if cli.file.is_none() && cli.dir.is_none() {
        eprintln!("mdpage error: no input given, pass --file and/or --dir");
        return Ok(2);
    }

    let mut settings = RenderSettings::load(LoadOptions::default())?;
    apply_flags(&mut settings, &cli);

    let converter = Converter::new(settings)?;
    let outcome = converter.run(cli.file.as_deref(), cli.dir.as_deref())?;

    for warning in outcome.all_warnings() {
        eprintln!("WARNING: {warning}");
    }
    emit_summary(&outcome, cli.format.unwrap_or(SummaryFormat::Plain));

    Ok(0)
}

#[derive(Parser)]
#[command(
    name = "mdpage",
    about = "Convert markdown documents into standalone HTML pages",
    version
)]
struct Cli {
    /// Markdown file to convert; the page lands next to it as `.html`.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory searched recursively for markdown documents to convert.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Directory searched recursively for .css/.js assets to inline.
    #[arg(long, value_name = "DIR")]
    style: Option<PathBuf>,

    /// Add a table of contents with the given depth (1-6); anything
    /// unparsable falls back to 4.
    #[arg(long, value_name = "DEPTH")]
    toc: Option<String>,

    /// Title of the table-of-contents block (only with --toc).
    #[arg(long, value_name = "TITLE")]
    toc_title: Option<String>,

    /// Prefix table-of-contents entries with heading numbers (only with
    /// --toc).
    #[arg(long)]
    toc_numbering: bool,

    /// Give each heading a referenceable id and link the TOC to it.
    #[arg(short = 'l', long)]
    links: bool,

    /// Prefix headings with hierarchical numbers.
    #[arg(short = 'n', long)]
    numbering: bool,

    /// Drop the first element (always used as the page title) from the
    /// body.
    #[arg(short = 'r', long)]
    remove_title: bool,

    /// Wrap the body in a titled header plus a content container.
    #[arg(long)]
    header: bool,

    /// Emit nested <section> containers instead of the flat sequence.
    #[arg(long)]
    semantic: bool,

    /// Output format of the run summary.
    #[arg(long, value_enum)]
    format: Option<SummaryFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Plain,
    Json,
}

/// Flags are switches layered over whatever the config file resolved;
/// they can enable behaviour, never disable it.
fn apply_flags(settings: &mut RenderSettings, cli: &Cli) {
    if cli.remove_title {
        settings.title = TitleMode::Remove;
    }
    if cli.links {
        settings.heading_links = true;
    }
    if cli.numbering {
        settings.heading_numbering = true;
    }
    if cli.header {
        settings.header_wrapper = true;
    }
    if cli.semantic {
        settings.semantic_output = true;
    }
    if let Some(style) = &cli.style {
        settings.style_source = Some(style.clone());
    }

    if let Some(raw_depth) = &cli.toc {
        let depth = resolve_toc_depth(raw_depth);
        match &mut settings.toc {
            Some(toc) => toc.depth = depth,
            None => settings.toc = Some(TocSettings::with_depth(depth)),
        }
    }
    if let Some(toc) = &mut settings.toc {
        if let Some(title) = &cli.toc_title {
            toc.title = title.clone();
        }
        if cli.toc_numbering {
            toc.numbered = true;
        }
    }
}

fn emit_summary(outcome: &RunOutcome, format: SummaryFormat) {
    match format {
        SummaryFormat::Plain => {
            for report in &outcome.reports {
                if let Some(output) = &report.output {
                    println!("{} -> {}", report.source.display(), output.display());
                }
            }
            println!(
                "converted {} document(s), skipped {}",
                outcome.converted(),
                outcome.skipped()
            );
        }
        SummaryFormat::Json => {
            let files: Vec<_> = outcome
                .reports
                .iter()
                .map(|report| {
                    json!({
                        "source": &report.source,
                        "output": &report.output,
                        "converted": report.succeeded(),
                    })
                })
                .collect();
            let summary = json!({
                "converted": outcome.converted(),
                "skipped": outcome.skipped(),
                "warnings": outcome.all_warnings(),
                "files": files,
            });
            println!("{summary}");
        }
    }
}
