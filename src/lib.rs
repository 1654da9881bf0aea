//! Reshapes consumer-credit research extracts into the fixed CSV layouts
//! used by the chart front end.

pub mod batch;
pub mod config;
pub mod dispatch;
pub mod files;
pub mod reference;
pub mod transform;

pub use batch::{process_data_files, BatchReport};
pub use config::Config;
pub use dispatch::ContentType;
pub use transform::{Table, TransformError, TransformOptions};
