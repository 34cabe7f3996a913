//! Process command - extract data from a single certificate file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use certex_core::{
    acquire_text, CertexConfig, CertificateParser, CertificateRecord, ExportRow, PdfExtractor,
    PdfProcessor, TesseractOcr,
};

use super::{load_config, BarSink};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip OCR and use only embedded PDF text
    #[arg(long)]
    text_only: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.text_only {
        // With a zero threshold the embedded text always wins and OCR is never reached.
        config.pdf.min_text_length = 0;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let record = process_pdf(&args, &config, &pb)?;

    pb.finish_with_message("Done");

    if record.is_empty() {
        eprintln!(
            "{} No fields could be extracted from {}",
            style("!").yellow(),
            args.input.display()
        );
    }

    let output = format_record(&record, &config, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn process_pdf(
    args: &ProcessArgs,
    config: &CertexConfig,
    pb: &ProgressBar,
) -> anyhow::Result<CertificateRecord> {
    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    debug!("PDF has {} pages", extractor.page_count());

    let mut ocr = TesseractOcr::new(&config.ocr.languages);
    if let Some(datapath) = &config.ocr.datapath {
        ocr = ocr.with_datapath(datapath.clone());
    }

    let sink = BarSink::new(pb.clone());
    let text = acquire_text(&extractor, &ocr, config, &sink)?;

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from the PDF");
    }

    pb.set_message("Extracting certificate data...");

    let parser = CertificateParser::new()
        .with_extra_name_boilerplate(config.extraction.extra_name_boilerplate.clone());
    Ok(parser.parse(&text))
}

pub(crate) fn format_record(
    record: &CertificateRecord,
    config: &CertexConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record, config),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &CertificateRecord, config: &CertexConfig) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(ExportRow::HEADERS)?;

    let row = ExportRow::from_record(1, record, &config.export.institution);
    wtr.write_record(row.fields())?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &CertificateRecord) -> String {
    let field = |value: &Option<String>| -> String {
        value.clone().unwrap_or_else(|| "-".to_string())
    };

    let mut output = String::new();
    output.push_str(&format!("Ad Soyad:           {}\n", field(&record.full_name)));
    output.push_str(&format!("TC Kimlik No:       {}\n", field(&record.national_id)));
    output.push_str(&format!("Belge No:           {}\n", field(&record.certificate_number)));
    output.push_str(&format!("Geçerlilik Tarihi:  {}\n", field(&record.validity_date)));
    output.push_str(&format!(
        "Eğitim Tarihleri:   {} - {}\n",
        field(&record.training_start_date),
        field(&record.training_end_date)
    ));
    output
}
