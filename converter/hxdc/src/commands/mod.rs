//! Driver commands.

mod convert;

pub use convert::{convert_directory, convert_file, convert_source};
