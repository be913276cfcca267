use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use astral_map::taxon_map::group_table::{DefaultGroup, GroupTable};
use astral_map::taxon_map::map_writer::MapWriter;
use astral_map::taxon_map::scanner::{find_alignment_files, gather_taxa, split_patterns};
use astral_map::utils::now_str;

fn main() -> Result<()> {
    let args = Cli::parse();

    if !args.input.is_dir() {
        bail!("Input path \"{}\" is not a directory", args.input.display());
    }

    let patterns = split_patterns(&args.pattern);
    if patterns.is_empty() {
        bail!("No usable glob pattern in \"{}\"", args.pattern);
    }

    let files = find_alignment_files(&args.input, &patterns)
        .context("Failed to enumerate alignment files")?;
    if files.is_empty() {
        bail!(
            "No file under \"{}\" matched the given patterns",
            args.input.display()
        );
    }

    if args.verbose {
        eprintln!("{}: scanning {} file(s)", now_str(), files.len());
    }

    let outcome =
        gather_taxa(&files, args.strict, args.verbose).context("Alignment scan aborted")?;

    if !outcome.failures.is_empty() {
        eprintln!("{} file(s) could not be used:", outcome.failures.len());
        for failure in &outcome.failures {
            eprintln!("  {}: {}", failure.path.display(), failure.reason);
        }
    }

    if outcome.taxa.is_empty() {
        bail!("No taxon found in any alignment file; check the input directory and patterns");
    }

    if args.verbose {
        eprintln!(
            "{}: detected {} unique taxon(s)",
            now_str(),
            outcome.taxa.len()
        );
    }

    let groups = match &args.groups {
        Some(pb) => {
            let table = GroupTable::from_file(pb, args.default_group)
                .context("Failed to load group table")?;
            if args.verbose {
                eprintln!("{}: loaded {} group mapping(s)", now_str(), table.len());
            }
            table
        }
        None => GroupTable::empty(args.default_group),
    };

    let mut writer = MapWriter::new(&args.out_map, args.out_taxa.as_ref())
        .context("Unable to instantiate MapWriter")?;
    writer
        .write(&outcome.taxa, &groups)
        .context("Error writing output files")?;

    if args.verbose {
        eprintln!(
            "{}: wrote {} map entries to \"{}\"",
            now_str(),
            writer.entry_count(),
            args.out_map.display()
        );
        if let Some(pb) = &args.out_taxa {
            eprintln!("{}: taxa list saved to \"{}\"", now_str(), pb.display());
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[clap(about = "Generate an ASTRAL map file from a directory of NEXUS/FASTA alignments")]
struct Cli {
    /// Directory containing the alignment files
    #[clap(long)]
    input: PathBuf,

    /// Output map file (TSV: taxon<TAB>group)
    #[clap(long)]
    out_map: PathBuf,

    /// CSV/TSV file with taxon,group columns
    #[clap(long)]
    groups: Option<PathBuf>,

    /// Optional output file for the unique taxon list
    #[clap(long)]
    out_taxa: Option<PathBuf>,

    /// Comma-separated glob patterns selecting the alignment files
    #[clap(long, default_value = "*.nex,*.nexus,*.fasta,*.fa,*.fas")]
    pattern: String,

    /// Group used for taxa missing from the group table
    #[clap(long, value_enum, default_value = "species")]
    default_group: DefaultGroup,

    /// Abort on the first unreadable or unrecognized file
    #[clap(short, long, default_value_t = false)]
    strict: bool,

    /// Enable verbose mode
    #[clap(short, long, default_value_t = false)]
    verbose: bool,
}
