//! Convert a policy workbook (a Project Sheet and a Distribution Sheet)
//! into a JSON array of projects, each carrying its matched distributions.

pub mod process;
pub mod schema;

pub use process::convert::{convert, ConvertOptions, JoinMode};
