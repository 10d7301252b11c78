pub mod columns;
pub mod derive;
pub mod types;

pub use columns::{ColumnIndex, Field, DISTRIBUTION_SHEET, PROJECT_SHEET};
pub use derive::{distribution_rows, project_rows};
pub use types::{Details, DistributionRow, Entry, NumberLike, ProjectRow, RowKey};
