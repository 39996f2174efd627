pub mod formatter;

pub use formatter::{
    display_order, format_area_list, format_json, format_points, format_scored_table, format_tsv,
    should_use_colors,
};
