pub mod formatter;

pub use formatter::{
    format_breakdown, format_candidate_table, format_json, format_pair_table, format_pair_tsv,
    format_score_tsv, format_tsv, should_use_colors,
};
