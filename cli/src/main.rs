//! docnorm CLI - document extraction output normalizer

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docnorm::{
    is_temp_file, read_docx_dump, read_ocr_source, safe_filename, DocumentInput, JsonFormat,
    ListNumbering, NormalizeOptions, NormalizedDocument, Pipeline, SourceKind,
};

#[derive(Parser)]
#[command(name = "docnorm")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Normalize word-processor and OCR extraction output to Markdown and JSON", long_about = None)]
struct Cli {
    /// Input files (routed by name, e.g. `report.docx.json` or `scan.md`)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    normalize: NormalizeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize rendered OCR text (.md/.txt) or OCR page dumps (.json)
    Ocr {
        /// Input files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        #[command(flatten)]
        normalize: NormalizeArgs,
    },

    /// Normalize word-processor fragment dumps (.json)
    Docx {
        /// Input files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        #[command(flatten)]
        normalize: NormalizeArgs,
    },

    /// Print the tables found in a Markdown file as JSON
    Tables {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Clone)]
struct NormalizeArgs {
    /// Minimum length of a plain-text block before merging stops
    #[arg(long, default_value_t = docnorm::parser::DEFAULT_SHORT_TEXT_THRESHOLD)]
    threshold: usize,

    /// Heading level for styles without a valid numeral (1-6)
    #[arg(long, default_value_t = docnorm::parser::DEFAULT_HEADING_LEVEL)]
    heading_level: u8,

    /// Ordered list numbering
    #[arg(long, value_enum, default_value = "literal")]
    numbering: Numbering,

    /// Do not prepend the document title as a heading
    #[arg(long)]
    no_title: bool,

    /// Skip unclassifiable paragraphs instead of failing the document
    #[arg(long)]
    lenient: bool,
}

impl NormalizeArgs {
    fn to_options(&self) -> NormalizeOptions {
        let mut options = NormalizeOptions::new()
            .with_short_text_threshold(self.threshold)
            .with_heading_level_default(self.heading_level)
            .with_list_numbering(self.numbering.into())
            .with_title_heading(!self.no_title);
        if self.lenient {
            options = options.lenient();
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Numbering {
    /// Every ordered item renders as "1."
    Literal,
    /// Items are numbered 1, 2, 3, ...
    Sequential,
}

impl From<Numbering> for ListNumbering {
    fn from(numbering: Numbering) -> Self {
        match numbering {
            Numbering::Literal => ListNumbering::Literal,
            Numbering::Sequential => ListNumbering::Sequential,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Ocr {
            inputs,
            output,
            normalize,
        }) => cmd_normalize(&inputs, &output, &normalize, Some(SourceKind::Ocr)),
        Some(Commands::Docx {
            inputs,
            output,
            normalize,
        }) => cmd_normalize(&inputs, &output, &normalize, Some(SourceKind::WordProcessor)),
        Some(Commands::Tables {
            input,
            output,
            compact,
        }) => cmd_tables(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if cli.inputs.is_empty() {
                println!("{}", "Usage: docnorm <FILE>... [-o DIR]".yellow());
                println!("       docnorm --help for more information");
                Ok(())
            } else {
                cmd_normalize(&cli.inputs, &cli.output, &cli.normalize, None)
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_normalize(
    inputs: &[PathBuf],
    output_dir: &Path,
    args: &NormalizeArgs,
    forced: Option<SourceKind>,
) -> CliResult<()> {
    let pipeline = Pipeline::new(args.to_options());

    let files: Vec<&PathBuf> = inputs
        .iter()
        .filter(|path| {
            let temp = is_temp_file(path);
            if temp {
                log::info!("skipping temp file {}", path.display());
            }
            !temp
        })
        .collect();

    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut converted = 0;
    let mut failed = 0;
    for path in files {
        pb.set_message(display_name(path));
        match convert_file(&pipeline, path, output_dir, forced) {
            Ok(md_path) => {
                converted += 1;
                pb.println(format!("{} {}", "Saved".green(), md_path.display()));
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "\n{} {} converted, {} failed",
        "Done!".green().bold(),
        converted,
        failed
    );

    if failed > 0 {
        return Err(format!("{} file(s) failed", failed).into());
    }
    Ok(())
}

/// Normalize one file and write its outputs; returns the Markdown path.
fn convert_file(
    pipeline: &Pipeline,
    path: &Path,
    output_dir: &Path,
    forced: Option<SourceKind>,
) -> CliResult<PathBuf> {
    let kind = match forced {
        Some(kind) => kind,
        None => dump_kind(path)?,
    };

    let input = match kind {
        SourceKind::WordProcessor => DocumentInput::from(read_docx_dump(path)?),
        SourceKind::Ocr => DocumentInput::from(read_ocr_source(path)?),
    };

    let result = pipeline.process(&input)?;

    let stem = document_stem(path);
    let target = output_dir.join(&stem);
    write_outputs(&target, &stem, &result)?;
    if let DocumentInput::Ocr(doc) = &input {
        write_images(&target, &doc.images)?;
    }

    Ok(target.join(format!("{}.md", stem)))
}

/// Route an extraction dump: text files are OCR output, JSON dumps are
/// routed by the source extension in front of `.json`.
fn dump_kind(path: &Path) -> docnorm::Result<SourceKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("md") | Some("markdown") | Some("txt") => Ok(SourceKind::Ocr),
        Some("json") => SourceKind::from_path(path.with_extension("")),
        _ => {
            let kind = SourceKind::from_path(path)?;
            Err(docnorm::Error::UnsupportedSource(format!(
                "{} is a {} source; extract it first and pass the dump",
                path.display(),
                kind
            )))
        }
    }
}

/// Output name for a dump: the file name without the dump and source
/// extensions, made filesystem-safe.
fn document_stem(path: &Path) -> String {
    let mut stem = PathBuf::from(path.file_name().unwrap_or_default());
    for _ in 0..2 {
        let known = stem
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| {
                matches!(e.to_lowercase().as_str(), "json" | "md" | "markdown" | "txt")
                    || SourceKind::from_extension(e).is_some()
            });
        if !known {
            break;
        }
        stem.set_extension("");
    }
    safe_filename(&stem.to_string_lossy())
}

/// Write `<stem>.md`, `<stem>_tables.json` (only with tables) and
/// `<stem>_metadata.json` into `dir`.
fn write_outputs(dir: &Path, stem: &str, result: &NormalizedDocument) -> CliResult<()> {
    fs::create_dir_all(dir)?;

    fs::write(dir.join(format!("{}.md", stem)), &result.markdown)?;

    if !result.tables.is_empty() {
        let json = result.tables_json(JsonFormat::Pretty)?;
        fs::write(dir.join(format!("{}_tables.json", stem)), json)?;
    }

    let json = result.metadata_json(JsonFormat::Pretty)?;
    fs::write(dir.join(format!("{}_metadata.json", stem)), json)?;

    Ok(())
}

/// Persist OCR images under `dir`, skipping paths that would escape it.
fn write_images(dir: &Path, images: &BTreeMap<String, Vec<u8>>) -> CliResult<()> {
    for (rel, bytes) in images {
        let rel = Path::new(rel);
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            log::warn!("skipping image with unsafe path {}", rel.display());
            continue;
        }
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
    }
    Ok(())
}

fn cmd_tables(input: &Path, output: Option<&Path>, compact: bool) -> CliResult<()> {
    let text = fs::read_to_string(input)?;
    let tables = docnorm::parser::extract_tables(&text);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = docnorm::render::tables_to_json(&tables, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} tables)",
            "Saved to".green(),
            path.display(),
            tables.len()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CliResult<()> {
    let kind = dump_kind(input)?;
    let options = NormalizeOptions::new().lenient();
    let result = match kind {
        SourceKind::WordProcessor => docnorm::normalize_docx_with_options(&read_docx_dump(input)?, &options)?,
        SourceKind::Ocr => docnorm::normalize_ocr_with_options(&read_ocr_source(input)?, &options)?,
    };

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Source".bold(), kind);

    let metadata = &result.metadata;
    if metadata.has_title() {
        println!("{}: {}", "Title".bold(), metadata.title);
    }
    if !metadata.author.is_empty() {
        println!("{}: {}", "Author".bold(), metadata.author);
    }
    if let Some(created) = metadata.created {
        println!("{}: {}", "Created".bold(), created.to_rfc3339());
    }
    if let Some(modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified.to_rfc3339());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &result.stats;
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docnorm".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document extraction output normalizer");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docnorm".dimmed());
    println!("License: MIT");
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
