//! Packaging of pipeline source code for upload

use std::io::{Cursor, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// The only entry of a packaged pipeline
pub const PIPELINE_ENTRY_NAME: &str = "pipeline.py";

#[derive(Debug, thiserror::Error)]
pub enum PackagingError {
    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Zip the pipeline source as a single `pipeline.py` entry and base64-encode the archive.
///
/// The entry timestamp is pinned, so identical source yields identical output.
pub fn package_pipeline(source: &str) -> Result<String, PackagingError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    writer.start_file(PIPELINE_ENTRY_NAME, options)?;
    writer.write_all(source.as_bytes())?;
    let archive = writer.finish()?.into_inner();

    Ok(STANDARD.encode(archive))
}
