use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Create a BufReader that reads from a file denoted by its PathBuf
pub fn open_read(pb: &PathBuf) -> Result<BufReader<File>> {
    let file = OpenOptions::new()
        .read(true)
        .open(pb)
        .with_context(|| format!("Failed to open file \"{}\" for reading", pb.display()))?;
    Ok(BufReader::new(file))
}

/// Create a BufWriter that writes to a fresh file denoted by its PathBuf,
/// creating missing parent directories along the way
pub fn open_write(pb: &PathBuf) -> Result<BufWriter<File>> {
    if let Some(parent) = pb.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directory of \"{}\"", pb.display())
            })?;
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(pb)
        .with_context(|| format!("Failed to open file \"{}\" for writing", pb.display()))?;
    Ok(BufWriter::new(file))
}
