//! Output destinations
//!
//! Any `std::io::Write + Send` works as a destination; these cover the
//! console and plain files.

pub mod console;
pub mod file;

pub use console::{ConsoleAppender, ConsoleTarget};
pub use file::FileAppender;
