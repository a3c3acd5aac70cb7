//! resume-pdf CLI - resume text and typography extraction tool

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resume_pdf::{
    extract_batch, is_pdf_bytes, open_document, ExtractOptions, ExtractionResult, Extractor,
    JsonFormat, LopdfBackend, OutputMode, PdfBackend,
};

#[derive(Parser)]
#[command(name = "resume-pdf")]
#[command(version)]
#[command(about = "Extract resume PDF text and typography to JSON", long_about = None)]
struct Cli {
    /// JSON file with extraction options
    #[arg(long, global = true, value_name = "FILE", env = "RESUME_PDF_CONFIG")]
    config: Option<PathBuf>,

    /// Skip table detection
    #[arg(long, global = true)]
    no_tables: bool,

    /// Inputs longer than this many characters are tried as base64 first
    #[arg(long, global = true, value_name = "CHARS", env = "RESUME_PDF_PAYLOAD_THRESHOLD")]
    payload_threshold: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lines with positions, header threshold, tables and totals
    Raw {
        /// PDF path or base64 payload ("-" or omitted reads stdin)
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Line text and typography for LLM prompts
    Llm {
        /// PDF path or base64 payload ("-" or omitted reads stdin)
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract many PDFs in parallel, one JSON file each
    Batch {
        /// PDF paths or base64 payloads
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<String>,

        /// Output view
        #[arg(short, long, value_enum, default_value = "raw")]
        mode: ModeArg,

        /// Output directory
        #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show a short extraction summary
    Info {
        /// PDF path or base64 payload ("-" or omitted reads stdin)
        #[arg(value_name = "INPUT")]
        input: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum ModeArg {
    /// Raw view
    Raw,
    /// LLM view
    Llm,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Raw => OutputMode::Raw,
            ModeArg::Llm => OutputMode::Llm,
        }
    }
}

/// What the user handed us: an input string, or PDF bytes piped on stdin.
#[derive(Debug, PartialEq)]
enum CliInput {
    Text(String),
    Pdf(Vec<u8>),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = load_options(&cli).and_then(|options| match cli.command {
        Some(Commands::Raw {
            input,
            output,
            compact,
        }) => cmd_extract(input.as_deref(), output.as_deref(), compact, OutputMode::Raw, options),
        Some(Commands::Llm {
            input,
            output,
            compact,
        }) => cmd_extract(input.as_deref(), output.as_deref(), compact, OutputMode::Llm, options),
        Some(Commands::Batch {
            inputs,
            mode,
            output_dir,
            compact,
        }) => cmd_batch(&inputs, mode.into(), &output_dir, compact, options),
        Some(Commands::Info { input }) => cmd_info(input.as_deref(), options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: resume-pdf <raw|llm> [INPUT]".yellow());
            println!("       resume-pdf --help for more information");
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Config file first, then command-line overrides.
fn load_options(cli: &Cli) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
            serde_json::from_str::<ExtractOptions>(&text)
                .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
        }
        None => ExtractOptions::default(),
    };

    if cli.no_tables {
        options = options.with_tables(false);
    }
    if let Some(chars) = cli.payload_threshold {
        options = options.with_payload_threshold(chars);
    }
    log::debug!("extraction options: {:?}", options);
    Ok(options)
}

/// Resolve the positional input, reading stdin for `-` or no argument.
fn read_input(arg: Option<&str>) -> io::Result<CliInput> {
    match arg {
        Some(input) if input != "-" => Ok(CliInput::Text(input.to_string())),
        _ => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            Ok(classify_stdin(data))
        }
    }
}

fn classify_stdin(data: Vec<u8>) -> CliInput {
    if is_pdf_bytes(&data) {
        CliInput::Pdf(data)
    } else {
        CliInput::Text(String::from_utf8_lossy(&data).trim().to_string())
    }
}

/// Run the extraction, degrading failures to an empty result like the library does.
fn extract_input(input: &CliInput, options: &ExtractOptions) -> ExtractionResult {
    let extractor = Extractor::new().with_options(options.clone());
    match input {
        CliInput::Text(text) => extractor.extract(text),
        CliInput::Pdf(bytes) => LopdfBackend::load_bytes(bytes)
            .map(|backend| backend.with_table_config(options.table_config.clone()))
            .and_then(|backend| extractor.extract_from_backend(&backend))
            .unwrap_or_else(|e| {
                log::warn!("extraction failed, returning empty result: {}", e);
                ExtractionResult::empty()
            }),
    }
}

fn json_format(compact: bool, options: &ExtractOptions) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        options.json_format
    }
}

fn write_output(output: Option<&Path>, json: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, json)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn cmd_extract(
    input: Option<&str>,
    output: Option<&Path>,
    compact: bool,
    mode: OutputMode,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(input)?;
    let result = extract_input(&input, &options);
    let json = mode.render(&result, json_format(compact, &options))?;
    write_output(output, &json)?;
    Ok(())
}

/// File name for one batch result: the input's stem for paths, its
/// position for payloads.
fn batch_stem(input: &str, index: usize, options: &ExtractOptions) -> String {
    let stem = if input.chars().count() <= options.payload_threshold {
        Path::new(input)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
    } else {
        None
    };
    stem.unwrap_or_else(|| format!("input_{}", index))
}

/// One output file name per input, unique within the batch.
///
/// Stems shared by several inputs get the input index appended.
fn batch_output_names(inputs: &[String], mode: OutputMode, options: &ExtractOptions) -> Vec<String> {
    let stems: Vec<String> = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| batch_stem(input, index, options))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_insert(0) += 1;
    }

    let mut used: HashSet<String> = HashSet::new();
    stems
        .iter()
        .enumerate()
        .map(|(index, stem)| {
            let mut name = if counts[stem.as_str()] > 1 {
                format!("{}_{}.{}.json", stem, index, mode)
            } else {
                format!("{}.{}.json", stem, mode)
            };
            while !used.insert(name.clone()) {
                name = format!("{}_{}", index, name);
            }
            name
        })
        .collect()
}

fn cmd_batch(
    inputs: &[String],
    mode: OutputMode,
    output_dir: &Path,
    compact: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let format = json_format(compact, &options);
    let extractor = Extractor::new().with_options(options.clone().with_json_format(format));

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Extracting...");

    let results = extract_batch(&extractor, inputs, mode);

    let names = batch_output_names(inputs, mode, &options);

    let mut written = 0;
    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(json) => {
                fs::write(output_dir.join(&name), json)?;
                written += 1;
            }
            Err(e) => pb.println(format!("{} {}: {}", "Failed".red(), name, e)),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files written to {}",
        "Done!".green().bold(),
        written,
        inputs.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_info(input: Option<&str>, options: ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_input(input)?;

    let (version, pages) = match &input {
        CliInput::Text(text) => {
            let backend = open_document(text, &options)?;
            (backend.version(), backend.page_count())
        }
        CliInput::Pdf(bytes) => {
            let backend = LopdfBackend::load_bytes(bytes)?;
            (backend.version(), backend.page_count())
        }
    };
    let result = extract_input(&input, &options);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: PDF {}", "Format".bold(), version);
    println!("{}: {}", "Pages".bold(), pages);

    println!();
    println!("{}", "Extraction Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Lines".bold(), result.total_lines());
    println!("{}: {}", "Header threshold".bold(), result.header_size_threshold);
    println!(
        "{}: {} - {}",
        "Font sizes".bold(),
        result.min_font_size(),
        result.max_font_size()
    );
    println!(
        "{}: {}",
        "Bold lines".bold(),
        if result.has_headers() { "Yes" } else { "No" }
    );
    println!("{}: {}", "Tables".bold(), result.registry.table_count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resume-pdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume PDF text and typography extraction tool");
    println!();
    println!("License: MIT");
}
