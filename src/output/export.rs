//! Writer for export documents downloaded from the engine.

use super::json::{calculate_file_size, prepare_output_path};
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Write a downloaded PDF or CSV export to disk
///
/// **Public** - the document is written byte for byte
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_export(contents: &[u8], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing export to: {}", output_path.display());

    prepare_output_path(output_path)?;
    std::fs::write(output_path, contents).map_err(OutputError::WriteFailed)?;

    info!(
        "Export written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}
