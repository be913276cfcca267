use std::path::Path;

use strum_macros::Display;

pub mod fasta;
pub mod nexus;

/// Number of leading lines inspected for content-based format detection
const SNIFF_LINES: usize = 50;

/// Alignment formats this tool can extract taxon labels from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AlignmentFormat {
    Nexus,
    Fasta,
}

/// Decide which extractor applies to a file.
///
/// Content wins over extension: a `>` header among the leading lines means
/// FASTA, a `#NEXUS` marker means NEXUS. Files without either marker fall
/// back to their extension (`.nex`/`.nexus` and `.fasta`/`.fa`/`.fas`).
pub fn detect_format(path: &Path, text: &str) -> Option<AlignmentFormat> {
    for line in text.lines().take(SNIFF_LINES) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('>') {
            return Some(AlignmentFormat::Fasta);
        }
        if line.to_uppercase().starts_with("#NEXUS") {
            return Some(AlignmentFormat::Nexus);
        }
    }

    detect_from_extension(path)
}

fn detect_from_extension(path: &Path) -> Option<AlignmentFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "nex" | "nexus" => Some(AlignmentFormat::Nexus),
        "fasta" | "fa" | "fas" => Some(AlignmentFormat::Fasta),
        _ => None,
    }
}

/// Run the extractor for a detected format over the full file text
pub fn extract_taxa(format: AlignmentFormat, text: &str) -> Vec<String> {
    match format {
        AlignmentFormat::Nexus => nexus::extract_taxa(text),
        AlignmentFormat::Fasta => fasta::extract_taxa(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn content_marker_beats_extension() {
        let path = PathBuf::from("alignment.fasta");
        let text = "#NEXUS\nBEGIN TAXA;\nTAXLABELS A;\nEND;\n";
        assert_eq!(detect_format(&path, text), Some(AlignmentFormat::Nexus));
    }

    #[test]
    fn fasta_header_detected_after_blank_lines() {
        let path = PathBuf::from("alignment.dat");
        let text = "\n\n>Homo_sapiens\nACGT\n";
        assert_eq!(detect_format(&path, text), Some(AlignmentFormat::Fasta));
    }

    #[test]
    fn nexus_marker_is_case_insensitive() {
        let path = PathBuf::from("alignment.dat");
        assert_eq!(
            detect_format(&path, "#nexus\nbegin data;\n"),
            Some(AlignmentFormat::Nexus)
        );
    }

    #[test]
    fn extension_fallback_when_content_is_inconclusive() {
        let text = "no marker in here\n";
        assert_eq!(
            detect_format(&PathBuf::from("a.nex"), text),
            Some(AlignmentFormat::Nexus)
        );
        assert_eq!(
            detect_format(&PathBuf::from("a.NEXUS"), text),
            Some(AlignmentFormat::Nexus)
        );
        assert_eq!(
            detect_format(&PathBuf::from("b.fa"), text),
            Some(AlignmentFormat::Fasta)
        );
        assert_eq!(
            detect_format(&PathBuf::from("b.fas"), text),
            Some(AlignmentFormat::Fasta)
        );
        assert_eq!(
            detect_format(&PathBuf::from("b.fasta"), text),
            Some(AlignmentFormat::Fasta)
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert_eq!(detect_format(&PathBuf::from("c.phy"), "10 20\n"), None);
        assert_eq!(detect_format(&PathBuf::from("noext"), "10 20\n"), None);
    }

    #[test]
    fn format_names_used_in_diagnostics() {
        assert_eq!(AlignmentFormat::Nexus.to_string(), "nexus");
        assert_eq!(AlignmentFormat::Fasta.to_string(), "fasta");
    }
}
