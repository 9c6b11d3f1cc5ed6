//! Display the resolved configuration and where each value came from.

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, _err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;

    let report = serde_json::json!({
        "solver": {
            "value": resolved.config.executable.display().to_string(),
            "source": resolved.sources.solver,
        },
        "input": {
            "value": resolved.config.startup_file.display().to_string(),
            "source": resolved.sources.input,
        },
    });
    let text = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize config report: {}", e)))?;
    writeln!(out, "{}", text)?;
    Ok(())
}
