//! pdfoutline CLI - PDF heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::render::{to_json, to_toc};
use pdfoutline::{
    run_batch_with_progress, BatchItem, BatchOptions, ClassifierOptions, ExtractOptions,
    FontProfile, HeadingClassifier, JsonFormat, KeywordTable, OutlineAssembler, PageSelection,
    PdfExtractor,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer the title and H1-H3 outline of PDF documents", long_about = None)]
struct Cli {
    /// Directory of PDF files
    #[arg(value_name = "INPUT_DIR", default_value = "input")]
    input: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(value_name = "OUTPUT_DIR", default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct CommonArgs {
    /// JSON keyword table merged over the built-in keywords
    #[arg(long, global = true, value_name = "FILE", env = "PDFOUTLINE_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Font size bucket width in points
    #[arg(long, global = true, value_name = "F", env = "PDFOUTLINE_PRECISION")]
    precision: Option<f32>,

    /// Skip unreadable pages instead of failing
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one JSON outline per PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Print the outline of a single PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Render a plain-text table of contents instead of JSON
        #[arg(long, conflicts_with = "compact")]
        toc: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show every fragment with its signals and classification
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let common = cli.common;

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            compact,
            sequential,
        }) => cmd_batch(&input, &output, compact, sequential, &common),
        Some(Commands::Outline {
            input,
            output,
            compact,
            toc,
            pages,
        }) => cmd_outline(&input, output.as_deref(), compact, toc, pages.as_deref(), &common),
        Some(Commands::Inspect { input, pages }) => cmd_inspect(&input, pages.as_deref(), &common),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, false, false, &common),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn extract_options(common: &CommonArgs, pages: Option<&str>) -> pdfoutline::Result<ExtractOptions> {
    let mut options = ExtractOptions::new();
    if common.lenient {
        options = options.lenient();
    }
    if let Some(precision) = common.precision {
        if precision <= 0.0 || !precision.is_finite() {
            return Err(pdfoutline::Error::Config(format!(
                "precision must be positive, got {}",
                precision
            )));
        }
        options = options.with_precision(precision);
    }
    if let Some(p) = pages {
        options = options.with_pages(PageSelection::parse(p)?);
    }
    Ok(options)
}

fn classifier_options(common: &CommonArgs) -> pdfoutline::Result<ClassifierOptions> {
    let options = ClassifierOptions::new();
    match &common.keywords {
        Some(path) => {
            let table = KeywordTable::load(path)?;
            log::debug!(
                "Loaded keywords for {} language(s) from {}",
                table.languages().count(),
                path.display()
            );
            Ok(options.with_extra_keywords(table))
        }
        None => Ok(options),
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    compact: bool,
    sequential: bool,
    common: &CommonArgs,
) -> CliResult {
    let mut options = BatchOptions::new(input, output)
        .with_format(json_format(compact))
        .with_extract_options(extract_options(common, None)?)
        .with_classifier_options(classifier_options(common)?);
    if sequential {
        options = options.sequential();
    }

    let total = pdfoutline::batch::prepare(&options)?.len();
    if total == 0 {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = run_batch_with_progress(&options, |item: &BatchItem| {
        let name = item
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!();
    for (item, out) in report.successes() {
        println!(
            "  {} {} -> {} ({} headings)",
            "✓".green(),
            item.input.display(),
            out.path.display(),
            out.entries
        );
    }
    for item in report.failures() {
        if let Err(e) = &item.outcome {
            println!("  {} {}: {}", "✗".red(), item.input.display(), e);
        }
    }

    println!(
        "\n{} {}/{} documents processed",
        "Done!".green().bold(),
        report.succeeded(),
        report.items.len()
    );

    if report.all_succeeded() {
        Ok(())
    } else {
        Err(format!("{} document(s) failed", report.items.len() - report.succeeded()).into())
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    toc: bool,
    pages: Option<&str>,
    common: &CommonArgs,
) -> CliResult {
    let extractor = PdfExtractor::open_with_options(input, extract_options(common, pages)?)?;
    let fragments = extractor.extract()?;
    let result = OutlineAssembler::new(classifier_options(common)?).assemble(&fragments);

    let rendered = if toc {
        to_toc(&result)
    } else {
        to_json(&result, json_format(compact))?
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_inspect(input: &Path, pages: Option<&str>, common: &CommonArgs) -> CliResult {
    let extractor = PdfExtractor::open_with_options(input, extract_options(common, pages)?)?;
    let fragments = extractor.extract()?;
    let classifier = HeadingClassifier::new(classifier_options(common)?);
    let profile = FontProfile::from_fragments(&fragments);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), extractor.page_count());
    println!("{}: {}", "Fragments".bold(), fragments.len());

    let thresholds: Vec<String> = profile
        .thresholds()
        .iter()
        .map(|t| t.map_or_else(|| "-".to_string(), |s| s.to_string()))
        .collect();
    println!("{}: {}", "Levels (H1/H2/H3)".bold(), thresholds.join(" / "));

    println!();
    println!("{}", "Fragments".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for fragment in &fragments {
        let decision = classifier.classify(fragment);
        let verdict = match (decision.accepted, profile.level_for(fragment.font_size)) {
            (true, Some(level)) => level.as_str().green().bold(),
            (true, None) => "--".yellow(),
            (false, _) => "  ".normal(),
        };
        let scripts: Vec<&str> = fragment.scripts.iter().map(String::as_str).collect();

        println!(
            "{} p{:<3} y={:<7.1} {:>5.1}pt {} [{}] {:<14} {}",
            verdict,
            fragment.page,
            fragment.y,
            fragment.font_size,
            if fragment.is_bold { "B" } else { " " },
            scripts.join(","),
            decision.rule.name().dimmed(),
            fragment.text
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!("License: MIT");
}
