//! record.json generation

pub mod generator;
pub mod types;

pub use generator::{CommandGenerator, RecordWriter};
pub use types::{NodeRecord, RecordJson};
