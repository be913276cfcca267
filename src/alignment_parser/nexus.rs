//! Taxon label extraction from NEXUS alignments.
//!
//! Comment stripping and tokenization are explicit character scans, so
//! malformed input degrades predictably: an unterminated comment, quote or
//! block runs to the end of the text instead of being dropped.

/// Keyword lines that may appear inside a sliced `MATRIX` block but never
/// carry a taxon label
const MATRIX_NOISE: [&str; 5] = ["matrix", "format", "dimensions", "end", "begin"];

/// Extract taxon labels from one NEXUS file: `TAXLABELS` when present,
/// otherwise the row labels of the `MATRIX` block. Interleaved matrices
/// repeat their labels; deduplication happens at the corpus level.
pub fn extract_taxa(text: &str) -> Vec<String> {
    let stripped = strip_comments(text);

    let mut labels = parse_taxlabels(&stripped);
    if labels.is_empty() {
        labels = parse_matrix(&stripped);
    }

    // stray terminators sneak into hand-edited files
    labels
        .iter()
        .map(|l| l.trim().trim_end_matches(';').to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Remove every `[` ... `]` comment region. Comments may span lines and do
/// not nest: the first `]` closes the region.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_comment = false;

    for c in text.chars() {
        match (in_comment, c) {
            (false, '[') => in_comment = true,
            (false, _) => out.push(c),
            (true, ']') => in_comment = false,
            (true, _) => {}
        }
    }

    out
}

/// Split a string into whitespace-delimited tokens, keeping a `'` or `"`
/// delimited run together as one token with the quotes stripped
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let mut token = String::new();
        if c == '\'' || c == '"' {
            // a missing closing quote runs to the end of the text
            for q in chars.by_ref() {
                if q == c {
                    break;
                }
                token.push(q);
            }
        } else {
            token.push(c);
            while let Some(&next) = chars.peek() {
                if next.is_whitespace() {
                    break;
                }
                token.push(next);
                chars.next();
            }
        }

        if !token.is_empty() {
            tokens.push(token);
        }
    }

    tokens
}

/// Labels of a `TAXLABELS ... ;` block, in order of appearance
pub fn parse_taxlabels(text: &str) -> Vec<String> {
    match block_after_keyword(text, "taxlabels") {
        Some(block) => tokenize(block),
        None => Vec::new(),
    }
}

/// First label of each row of a `MATRIX ... ;` block
pub fn parse_matrix(text: &str) -> Vec<String> {
    let block = match block_after_keyword(text, "matrix") {
        Some(block) => block,
        None => return Vec::new(),
    };

    let mut labels = Vec::new();
    for raw in block.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let lowered = line.to_lowercase();
        if MATRIX_NOISE.iter().any(|kw| lowered.starts_with(kw)) {
            continue;
        }

        if let Some(label) = tokenize(line).into_iter().next() {
            labels.push(label);
        }
    }

    labels
}

/// The text between the first case-insensitive occurrence of `keyword` and
/// the next `;`, or up to the end of the text when the terminator is missing
fn block_after_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let start = find_ascii_ci(text, keyword)? + keyword.len();
    let rest = &text[start..];
    match rest.find(';') {
        Some(end) => Some(&rest[..end]),
        None => Some(rest),
    }
}

// Byte-wise ASCII case-insensitive search; the needle is always one of our
// ASCII keywords, so the returned offset sits on a char boundary.
fn find_ascii_ci(text: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() || text.len() < needle.len() {
        return None;
    }
    text.as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxlabels_with_quoted_label() {
        let text = "#NEXUS\nBEGIN TAXA;\nTAXLABELS A B 'C D' ;\nEND;\n";
        assert_eq!(extract_taxa(text), vec!["A", "B", "C D"]);
    }

    #[test]
    fn taxlabels_keyword_is_case_insensitive() {
        let text = "#NEXUS\ntaxlabels Homo_sapiens Pan_troglodytes;\n";
        assert_eq!(
            extract_taxa(text),
            vec!["Homo_sapiens", "Pan_troglodytes"]
        );
    }

    #[test]
    fn matrix_fallback_keeps_interleaved_duplicates() {
        let text = "#NEXUS\nBEGIN DATA;\nMATRIX\nX ACGT\nY ACGA\n\nX TTTT\nY TTTA\n;\nEND;\n";
        assert_eq!(extract_taxa(text), vec!["X", "Y", "X", "Y"]);
    }

    #[test]
    fn matrix_noise_lines_are_skipped() {
        let text = "#NEXUS\nMATRIX\nformat interleave\nX ACGT\nY ACGA\nEND\n";
        assert_eq!(extract_taxa(text), vec!["X", "Y"]);
    }

    #[test]
    fn matrix_quoted_row_label() {
        let text = "MATRIX\n'Homo sapiens' ACGT\n;\n";
        assert_eq!(extract_taxa(text), vec!["Homo sapiens"]);
    }

    #[test]
    fn comment_spanning_lines_is_stripped() {
        let text = "TAXLABELS A [comment\nspanning lines] B;\n";
        assert_eq!(extract_taxa(text), vec!["A", "B"]);
    }

    #[test]
    fn unterminated_comment_strips_to_end() {
        let text = "TAXLABELS A [everything after here is gone B;\n";
        assert_eq!(extract_taxa(text), vec!["A"]);
    }

    #[test]
    fn unterminated_taxlabels_block_reads_to_end() {
        let text = "TAXLABELS A B\n";
        assert_eq!(extract_taxa(text), vec!["A", "B"]);
    }

    #[test]
    fn no_block_yields_nothing() {
        assert!(extract_taxa("#NEXUS\nBEGIN TREES;\nEND;\n").is_empty());
        assert!(extract_taxa("").is_empty());
    }

    #[test]
    fn empty_taxlabels_block_yields_nothing() {
        assert!(extract_taxa("TAXLABELS ;\n").is_empty());
    }

    #[test]
    fn tokenize_handles_both_quote_styles() {
        assert_eq!(
            tokenize(r#"A 'B C' "D E" F"#),
            vec!["A", "B C", "D E", "F"]
        );
    }

    #[test]
    fn tokenize_runs_unterminated_quote_to_end() {
        assert_eq!(tokenize("A 'B C"), vec!["A", "B C"]);
    }

    #[test]
    fn strip_comments_leaves_plain_text_alone() {
        assert_eq!(strip_comments("A B C"), "A B C");
        assert_eq!(strip_comments("A [x] B"), "A  B");
    }
}
