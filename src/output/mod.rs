pub mod formatter;

pub use formatter::{
    format_score_table, format_student_detail, format_summary, format_tsv, should_use_colors,
};
