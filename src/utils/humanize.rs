use humansize::{DECIMAL, format_size};

/// Format a byte count for summaries, e.g. `1.50 GB`
pub fn format_file_size(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}
