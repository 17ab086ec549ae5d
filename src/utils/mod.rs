pub mod deps;
pub mod humanize;
pub mod logger;

pub use deps::DependencyStatus;
pub use humanize::format_file_size;
pub use logger::init_logging;
