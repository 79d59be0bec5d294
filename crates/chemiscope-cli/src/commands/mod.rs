pub mod check;
pub mod convert;

use crate::cli::ConversionOptions;
use crate::config::PartialConversionConfig;
use crate::error::Result;
use crate::input::InputBatch;
use crate::report::CliWarningHandler;
use chemiscope::engine::diagnostics::WarningReporter;
use chemiscope::workflows::{self, convert::Conversion, convert::ConversionInput};
use tracing::info;

/// Loads configuration and input, then runs the conversion workflow with
/// warnings echoed to the terminal.
fn convert_batch(options: &ConversionOptions) -> Result<Conversion> {
    let partial_config = PartialConversionConfig::load(options.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(options)?;

    info!("Loading input batch from {:?}", &options.input);
    let batch = InputBatch::from_file(&options.input)?;

    let mut input = ConversionInput::new(&batch.frames);
    if let Some(meta) = &batch.meta {
        input = input.meta(meta);
    }
    if let Some(properties) = &batch.properties {
        input = input.properties(properties);
    }
    if let Some(centers) = &batch.centers {
        input = input.centers(centers);
    }

    let warning_handler = CliWarningHandler::new();
    let reporter = WarningReporter::with_callback(warning_handler.get_callback());

    info!("Invoking the core conversion workflow...");
    let conversion = workflows::convert::run(&input, &config, &reporter)?;
    info!(
        "Workflow finished with {} warning(s).",
        warning_handler.count()
    );
    Ok(conversion)
}
