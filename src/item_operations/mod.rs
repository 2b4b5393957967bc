//! Item operations for DynamoDB.
//!
//! - `put` - Write seqrepo alias and sequence items

mod put;

pub use put::{
    FASTADIR_TYPE, SEQALIAS_TYPE, execute_put_item, fastadir_item, seq_alias_item,
};
