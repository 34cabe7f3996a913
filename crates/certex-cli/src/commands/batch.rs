//! Batch processing command for multiple certificate files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use certex_core::{
    Batch, BatchProcessor, CertexConfig, CertificateRecord, Document, ExportRow, PdfExtractor,
    TesseractOcr,
};

use super::process::format_record;
use super::{load_config, BarSink};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Directory for per-file record outputs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Per-file output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Output file for the summary table
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the summary table tab-separated, suitable for pasting
    /// into a spreadsheet
    #[arg(long)]
    tsv: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching PDF files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Full paths as document names keep them unique across directories
    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        match fs::read(path) {
            Ok(data) => documents.push(Document::new(path.display().to_string(), data)),
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", path.display(), e);
            }
        }
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut ocr = TesseractOcr::new(&config.ocr.languages);
    if let Some(datapath) = &config.ocr.datapath {
        ocr = ocr.with_datapath(datapath.clone());
    }

    let processor: BatchProcessor<PdfExtractor, _> = BatchProcessor::new(config.clone(), ocr);

    let sink = BarSink::new(pb.clone());
    let batch = processor.process(&documents, &sink);

    pb.finish_with_message("Complete");

    // Per-file record outputs
    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
        write_records(output_dir, &documents, &batch, &config, args.format)?;
    }

    // Summary table
    let output_path = args.output.clone().unwrap_or_else(|| {
        let date = chrono::Local::now().format("%Y-%m-%d");
        let extension = if args.tsv { "tsv" } else { "csv" };
        PathBuf::from(format!("Sertifika_Verileri_{}.{}", date, extension))
    });

    write_table(&output_path, &batch, &config.export.institution, args.tsv)?;
    println!(
        "{} Table written to {}",
        style("✓").green(),
        output_path.display()
    );

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        documents.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} skipped",
        style(batch.len()).green(),
        style(batch.skipped().len()).red()
    );

    if !batch.skipped().is_empty() {
        println!();
        println!("{}", style("Skipped files:").red());
        for skipped in batch.skipped() {
            println!("  - {}: {}", skipped.name, skipped.reason);
        }
    }

    Ok(())
}

/// Write one formatted record per successfully processed input file,
/// named after the input's stem.
///
/// Records and skip diagnostics both preserve input order, so walking
/// the documents while consuming whichever list's head matches
/// re-associates each record with its source file.
fn write_records(
    output_dir: &Path,
    documents: &[Document],
    batch: &Batch,
    config: &CertexConfig,
    format: super::process::OutputFormat,
) -> anyhow::Result<()> {
    let mut records = batch.records().iter();
    let mut skipped = batch.skipped().iter().peekable();

    for document in documents {
        if skipped.peek().is_some_and(|s| s.name == document.name) {
            skipped.next();
            continue;
        }

        let Some(record) = records.next() else { break };
        write_record(output_dir, &document.name, record, config, format)?;
    }

    Ok(())
}

fn write_record(
    output_dir: &Path,
    document_name: &str,
    record: &CertificateRecord,
    config: &CertexConfig,
    format: super::process::OutputFormat,
) -> anyhow::Result<()> {
    let stem = Path::new(document_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("belge");

    let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));
    let content = format_record(record, config, format)?;

    fs::write(&output_path, content)?;
    debug!("Wrote record to {}", output_path.display());
    Ok(())
}

fn write_table(path: &PathBuf, batch: &Batch, institution: &str, tsv: bool) -> anyhow::Result<()> {
    let delimiter = if tsv { b'\t' } else { b',' };

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    wtr.write_record(ExportRow::HEADERS)?;
    for row in batch.export_rows(institution) {
        wtr.write_record(row.fields())?;
    }

    wtr.flush()?;
    Ok(())
}
