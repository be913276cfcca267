pub mod alignment_parser;
pub mod taxon_map;
pub mod utils;
