use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::taxon_map::group_table::GroupTable;
use crate::utils::files::open_write;

/// Writes the ASTRAL map file and the optional side list of taxa
pub struct MapWriter {
    map: BufWriter<File>,
    taxa_list: Option<BufWriter<File>>,
    entry_count: u64,
}

impl MapWriter {
    pub fn new(map_pb: &PathBuf, taxa_pb: Option<&PathBuf>) -> Result<Self> {
        let taxa_list = match taxa_pb {
            Some(pb) => Some(open_write(pb).context("Unable to open taxa list output file")?),
            None => None,
        };

        Ok(MapWriter {
            map: open_write(map_pb).context("Unable to open map output file")?,
            taxa_list,
            entry_count: 0,
        })
    }

    /// Emit one `taxon<TAB>group` row per label, in set order, and mirror the
    /// bare labels into the taxa list when one was configured
    pub fn write(&mut self, taxa: &BTreeSet<String>, groups: &GroupTable) -> Result<()> {
        for taxon in taxa {
            writeln!(&mut self.map, "{}\t{}", taxon, groups.resolve(taxon))
                .context("Error writing to map file")?;

            if let Some(writer) = &mut self.taxa_list {
                writeln!(writer, "{}", taxon).context("Error writing to taxa list file")?;
            }

            self.entry_count += 1;
        }

        self.map.flush().context("Error flushing map file")?;
        if let Some(writer) = &mut self.taxa_list {
            writer.flush().context("Error flushing taxa list file")?;
        }

        Ok(())
    }

    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}
