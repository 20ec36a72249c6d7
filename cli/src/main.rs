//! mdexport CLI - Markdown to PDF and Word export tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdexport::{
    export_many, load_input, output_path, to_json, ExportJob, ExportOptions, ExportResult,
    InputFormat, JsonFormat, LoadedInput, MdExport, OutputFormat, PageSize,
};

#[derive(Parser)]
#[command(name = "mdexport")]
#[command(version)]
#[command(about = "Export AI-generated Markdown to PDF and Word documents", long_about = None)]
struct Cli {
    /// Input Markdown or analysis JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file stem (extension added per format)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    export: ExportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct ExportArgs {
    /// Document title shown in the header region
    #[arg(long, env = "MDEXPORT_TITLE")]
    title: Option<String>,

    /// Paper size of the PDF and Word section
    #[arg(long, value_enum, default_value = "a4")]
    page_size: PaperSize,

    /// Clean up the input (code fences, line endings, invisible characters)
    #[arg(long)]
    clean: bool,

    /// Repeat table header rows after a PDF page break
    #[arg(long)]
    repeat_header: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export to both PDF and Word
    Convert {
        /// Input Markdown or analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file stem (defaults to the input stem)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Export to a paginated PDF
    Pdf {
        /// Input Markdown or analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input stem)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Export to a Word document
    #[command(alias = "word")]
    Docx {
        /// Input Markdown or analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input stem)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Dump the classified blocks as JSON
    Blocks {
        /// Input Markdown or analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Clean up the input before classifying
        #[arg(long)]
        clean: bool,
    },

    /// Show block statistics and analysis metadata
    Info {
        /// Input Markdown or analysis JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Export many files in parallel
    Batch {
        /// Input Markdown or analysis JSON files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: FormatArg,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PaperSize {
    /// ISO A4
    A4,
    /// US Letter
    Letter,
}

impl From<PaperSize> for PageSize {
    fn from(size: PaperSize) -> Self {
        match size {
            PaperSize::A4 => PageSize::A4,
            PaperSize::Letter => PageSize::Letter,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Paginated PDF
    Pdf,
    /// Word document
    #[value(alias = "word")]
    Docx,
    /// Both PDF and Word
    All,
}

impl FormatArg {
    fn formats(self) -> &'static [OutputFormat] {
        match self {
            FormatArg::Pdf => &[OutputFormat::Pdf],
            FormatArg::Docx => &[OutputFormat::Docx],
            FormatArg::All => &OutputFormat::ALL,
        }
    }
}

impl ExportArgs {
    /// Build export options; an analysis input's detected type is the
    /// fallback title.
    fn options(&self, input: &LoadedInput) -> ExportOptions {
        let mut options = ExportOptions::new()
            .with_page_size(self.page_size.into())
            .with_clean_input(self.clean)
            .with_repeat_table_header(self.repeat_header);

        let detected = input
            .analysis
            .as_ref()
            .map(|data| data.detected_type.trim())
            .filter(|t| !t.is_empty());
        if let Some(title) = self.title.as_deref() {
            options = options.with_title(title);
        } else if let Some(kind) = detected {
            options = options.with_title(format!("{} Report", title_case(kind)));
        }
        options
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            export,
        }) => cmd_export(&input, output.as_deref(), &export, &OutputFormat::ALL),
        Some(Commands::Pdf {
            input,
            output,
            export,
        }) => cmd_export(&input, output.as_deref(), &export, &[OutputFormat::Pdf]),
        Some(Commands::Docx {
            input,
            output,
            export,
        }) => cmd_export(&input, output.as_deref(), &export, &[OutputFormat::Docx]),
        Some(Commands::Blocks {
            input,
            output,
            compact,
            clean,
        }) => cmd_blocks(&input, output.as_deref(), compact, clean),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch {
            inputs,
            format,
            output,
            export,
        }) => cmd_batch(&inputs, format, output.as_deref(), &export),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: export both formats if input is provided
            if let Some(input) = cli.input {
                cmd_export(
                    &input,
                    cli.output.as_deref(),
                    &cli.export,
                    &OutputFormat::ALL,
                )
            } else {
                println!("{}", "Usage: mdexport <FILE> [OUTPUT]".yellow());
                println!("       mdexport --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    args: &ExportArgs,
    formats: &[OutputFormat],
) -> CliResult<()> {
    let loaded = load_input(input)?;
    let exporter = MdExport::with_options(args.options(&loaded));
    let stem = output_stem(input, output);

    if loaded.format == InputFormat::Analysis {
        log::debug!("{} holds an analysis result", input.display());
    }

    for &format in formats {
        let path = output_path(&stem, format);
        let result = exporter.export(&loaded.markdown, format)?;
        result.save(&path)?;
        print_saved(&path, format, &result);
    }

    Ok(())
}

fn cmd_blocks(input: &Path, output: Option<&Path>, compact: bool, clean: bool) -> CliResult<()> {
    let loaded = load_input(input)?;
    let markdown = if clean {
        mdexport::parser::clean_markdown(&loaded.markdown)
    } else {
        loaded.markdown
    };
    let blocks = mdexport::parse_markdown(&markdown);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&blocks, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> CliResult<()> {
    let loaded = load_input(input)?;
    let result = MdExport::new().to_pdf(&loaded.markdown)?;
    let stats = &result.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), loaded.format);

    if let Some(ref data) = loaded.analysis {
        if !data.detected_type.is_empty() {
            println!("{}: {}", "Detected type".bold(), data.detected_type);
        }
        if !data.summary.is_empty() {
            println!("{}: {}", "Summary".bold(), data.summary);
        }
        if let Some(ref meta) = data.metadata {
            if let Some(ref source) = meta.source_name {
                println!("{}: {}", "Source".bold(), source);
            }
            if let Some(ref mime) = meta.mime_type {
                println!("{}: {}", "MIME type".bold(), mime);
            }
            if let Some(size) = meta.size_bytes {
                println!("{}: {} bytes", "Source size".bold(), size);
            }
            if let Some(ref model) = meta.model {
                println!("{}: {}", "Model".bold(), model);
            }
            if let Some(ref at) = meta.analyzed_at {
                println!("{}: {}", "Analyzed".bold(), at.to_rfc3339());
            }
        }
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Table rows".bold(), stats.table_row_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "PDF pages".bold(), stats.page_count);

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    format: FormatArg,
    output_dir: Option<&Path>,
    args: &ExportArgs,
) -> CliResult<()> {
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut jobs = Vec::new();
    let mut failed = 0usize;
    for input in inputs {
        pb.set_message(input.display().to_string());
        match load_input(input) {
            Ok(loaded) => {
                let stem = match output_dir {
                    Some(dir) => dir.join(input.file_stem().unwrap_or_default()),
                    None => output_stem(input, None),
                };
                for &fmt in format.formats() {
                    jobs.push(
                        ExportJob::new(loaded.markdown.clone(), output_path(&stem, fmt))
                            .with_options(args.options(&loaded)),
                    );
                }
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), input.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.set_message("Exporting...");
    let results = export_many(&jobs);
    pb.finish_with_message("Done!");

    println!();
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(result) => {
                let format = OutputFormat::from_path(&job.path)?;
                print_saved(&job.path, format, result);
            }
            Err(e) => {
                eprintln!("{} {}: {}", "Failed".red(), job.path.display(), e);
                failed += 1;
            }
        }
    }

    let written = results.iter().filter(|r| r.is_ok()).count();
    println!(
        "\n{} {} files written, {} failed",
        "Done!".green().bold(),
        written,
        failed
    );

    if failed > 0 {
        return Err(format!("{} exports failed", failed).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdexport".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown to PDF and Word export tool");
    println!();
    println!("License: MIT");
}

/// Output stem: the explicit output, or the input path without extension.
fn output_stem(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension(""),
    }
}

fn print_saved(path: &Path, format: OutputFormat, result: &ExportResult) {
    let detail = if format == OutputFormat::Pdf {
        format!("{} pages, {} bytes", result.stats.page_count, result.len())
    } else {
        format!("{} bytes", result.len())
    };
    println!(
        "{} {} {} ({})",
        "Saved".green(),
        format,
        path.display(),
        detail.dimmed()
    );
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
