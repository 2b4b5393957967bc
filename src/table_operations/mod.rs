//! Table management operations for DynamoDB.
//!
//! This module provides table lifecycle operations:
//! - `create` - Create the seqrepo table if missing
//! - `delete` - Delete a table and wait until it is gone
//! - `exists` - Check if a table exists
//! - `wait` - Waiters for table creation and deletion

mod create;
mod delete;
mod exists;
mod wait;

pub use create::{PK_NAME, SK_NAME, execute_create_table_if_not_exists, seqrepo_key_schema};
pub use delete::{TableAdmin, drop_table, execute_delete_table};
pub use exists::execute_table_exists;
pub use wait::{wait_for_table_absent, wait_for_table_active};
