//! Extract command - parse fields from a single OCR text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use idscan_core::{DocumentParser, ExtractionResult, IdDocumentParser};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file ("-" for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
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
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = IdDocumentParser::from_config(&config.extraction)?;

    let text = read_input(&args.input)?;
    info!("Extracting fields from {} characters", text.len());

    let result = parser.parse(&text);
    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn read_input(input: &PathBuf) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "belongs_to_jurisdiction",
        "identifier",
        "first_name",
        "middle_name",
        "last_name",
        "status_message",
    ])?;

    wtr.write_record([
        result.belongs_to_jurisdiction.to_string().as_str(),
        result.identifier.as_str(),
        result.first_name.as_str(),
        result.middle_name.as_str(),
        result.last_name.as_str(),
        result.status_message.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", result.status_message));
    output.push_str(&format!(
        "Jurisdiction: {}\n",
        if result.belongs_to_jurisdiction { "yes" } else { "no" }
    ));
    output.push_str(&format!("Identifier:   {}\n", or_dash(&result.identifier)));
    output.push_str(&format!("First name:   {}\n", or_dash(&result.first_name)));
    output.push_str(&format!("Middle name:  {}\n", or_dash(&result.middle_name)));
    output.push_str(&format!("Last name:    {}\n", or_dash(&result.last_name)));

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
