mod tabular;
mod types;

pub use tabular::RawTable;
pub use types::*;
