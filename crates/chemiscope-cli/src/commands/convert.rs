use super::convert_batch;
use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use chemiscope::core::models::document::Document;
use chemiscope::core::models::metadata::UNKNOWN_NAME;
use flate2::{Compression, write::GzEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Encoding of the output file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    GzippedJson,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let format = check_output_path(&args.output)?;

    let mut document = convert_batch(&args.options)?.document;
    apply_name_fallback(&mut document, &args.output);

    info!("Writing document to {:?}", &args.output);
    write_document(&document, &args.output, format, args.pretty)?;

    println!(
        "✓ Document '{}' with {} propert{} and {} environment(s) written to: {}",
        document.meta.name,
        document.properties.len(),
        if document.properties.len() == 1 { "y" } else { "ies" },
        document.environments.len(),
        args.output.display()
    );
    Ok(())
}

fn check_output_path(path: &Path) -> Result<OutputFormat> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    if file_name.ends_with(".json.gz") {
        Ok(OutputFormat::GzippedJson)
    } else if file_name.ends_with(".json") {
        Ok(OutputFormat::Json)
    } else {
        Err(CliError::Argument(format!(
            "the output file must have a '.json' or '.json.gz' extension, got '{}'",
            path.display()
        )))
    }
}

/// Names an unnamed dataset after the output file.
fn apply_name_fallback(document: &mut Document, output: &Path) {
    if document.meta.name != UNKNOWN_NAME {
        return;
    }
    let stem = output
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty());
    if let Some(stem) = stem {
        debug!("Naming the dataset after the output file: {}", stem);
        document.meta.name = stem.to_string();
    }
}

fn write_document(
    document: &Document,
    path: &Path,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => {
            let mut writer = file;
            serialize(document, &mut writer, path, pretty)?;
            writer.flush()?;
        }
        OutputFormat::GzippedJson => {
            let mut encoder = GzEncoder::new(file, Compression::default());
            serialize(document, &mut encoder, path, pretty)?;
            encoder.finish()?.flush()?;
        }
    }
    Ok(())
}

fn serialize<W: Write>(document: &Document, writer: W, path: &Path, pretty: bool) -> Result<()> {
    let serialized = if pretty {
        serde_json::to_writer_pretty(writer, document)
    } else {
        serde_json::to_writer(writer, document)
    };
    serialized.map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
