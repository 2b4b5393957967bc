//! Import a seqrepo instance from its sqlite databases.
//!
//! - `instance` - Validate the instance directory layout
//! - `rows` - Stream `seqalias` and `seqinfo` rows
//! - `import` - Write every row to a table

mod import;
mod instance;
mod rows;

pub use import::{ImportSummary, execute_import};
pub use instance::SeqRepoInstance;
pub use rows::{FastadirEntry, SeqAlias, open_read_only, stream_fastadir, stream_seqaliases};
