use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::utils::files::open_read;

/// Group emitted for a taxon that is missing from the group table
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultGroup {
    /// The taxon maps to itself
    Species,
    /// The literal string `NA`
    #[value(name = "NA")]
    Na,
    /// An empty group column
    None,
}

/// Taxon to group mapping joined onto the output map.
///
/// Built once from an optional CSV/TSV source, read-only afterwards. A taxon
/// absent from the table falls through to the configured default policy.
pub struct GroupTable {
    groups: HashMap<String, String>,
    default: DefaultGroup,
}

impl GroupTable {
    /// A table with no entries; every lookup falls through to the policy
    pub fn empty(default: DefaultGroup) -> Self {
        GroupTable {
            groups: HashMap::new(),
            default,
        }
    }

    /// Load a two-column `taxon,group` table. The delimiter (comma or tab)
    /// is auto-detected, a leading header row is skipped when its first cell
    /// is `taxon`, and later rows overwrite earlier ones.
    pub fn from_file(pb: &PathBuf, default: DefaultGroup) -> Result<Self> {
        let mut reader = open_read(pb).context("Unable to open group table")?;
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .with_context(|| format!("Error reading group table \"{}\"", pb.display()))?;

        Ok(Self::from_text(&text, default))
    }

    fn from_text(text: &str, default: DefaultGroup) -> Self {
        let delimiter = if text.matches('\t').count() > text.matches(',').count() {
            '\t'
        } else {
            ','
        };

        let mut groups = HashMap::new();
        let mut first_row = true;

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split(delimiter).collect();

            if first_row {
                first_row = false;
                if cells[0].trim().eq_ignore_ascii_case("taxon") {
                    continue;
                }
            }

            if cells.len() < 2 {
                eprintln!("[warn] group table row has fewer than two columns, skipped: {line}");
                continue;
            }

            let taxon = cells[0].trim();
            if taxon.is_empty() {
                continue;
            }
            groups.insert(taxon.to_string(), cells[1].trim().to_string());
        }

        GroupTable { groups, default }
    }

    /// Group emitted for a taxon: a table hit wins, otherwise the default
    /// policy decides
    pub fn resolve<'a>(&'a self, taxon: &'a str) -> &'a str {
        if let Some(group) = self.groups.get(taxon) {
            return group;
        }

        match self.default {
            DefaultGroup::Species => taxon,
            DefaultGroup::Na => "NA",
            DefaultGroup::None => "",
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
