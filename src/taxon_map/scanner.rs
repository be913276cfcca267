use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::glob;

use crate::alignment_parser::{self, AlignmentFormat};

/// A file the scan could not classify or parse
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Everything one scan produced: the deduplicated, lexicographically ordered
/// label set and the files that yielded only a failure reason
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub taxa: BTreeSet<String>,
    pub failures: Vec<ScanFailure>,
}

/// Split a comma-separated glob pattern list, dropping empty segments
pub fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// All files under `root` matching any of the patterns, recursively,
/// sorted and deduplicated for reproducible output
pub fn find_alignment_files(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let recursive = root.join("**").join(pattern);
        let recursive = recursive
            .to_str()
            .with_context(|| format!("Non UTF-8 path under \"{}\"", root.display()))?;

        let paths = glob(recursive).with_context(|| format!("Invalid glob pattern \"{pattern}\""))?;
        for path in paths.flatten() {
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Walk every matched file, extract its labels and merge them into one set.
///
/// Failures are collected instead of thrown, so a non-strict run can report
/// all of them at the end; in strict mode the first failure aborts the scan.
pub fn gather_taxa(files: &[PathBuf], strict: bool, verbose: bool) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();

    for path in files {
        match scan_file(path) {
            Ok((format, labels)) => {
                if verbose {
                    eprintln!(
                        "[ok] {} -> {} taxon(s) ({})",
                        path.display(),
                        labels.len(),
                        format
                    );
                }
                outcome.taxa.extend(labels);
            }
            Err(e) => {
                if strict {
                    return Err(e.context(format!("Unusable file \"{}\"", path.display())));
                }
                let reason = format!("{e:#}");
                if verbose {
                    eprintln!("[skipped] {}: {}", path.display(), reason);
                }
                outcome.failures.push(ScanFailure {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }

    Ok(outcome)
}

/// Labels of a single file. Bytes are decoded lossily, so only I/O errors
/// and unrecognized formats fail here.
fn scan_file(path: &Path) -> Result<(AlignmentFormat, Vec<String>)> {
    let bytes = fs::read(path).context("Error reading file")?;
    let text = String::from_utf8_lossy(&bytes);

    let format = match alignment_parser::detect_format(path, &text) {
        Some(format) => format,
        None => bail!("Unknown alignment format"),
    };

    Ok((format, alignment_parser::extract_taxa(format, &text)))
}
