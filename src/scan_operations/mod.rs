//! Scan operations for DynamoDB.
//!
//! - `paginate` - Store-agnostic loop that follows continuation tokens
//! - `scan` - One scan page against a live table

mod paginate;
mod scan;

pub use paginate::{Item, ScanPage, ScanPager, StartKey, fetch_all, fetch_all_with_metrics};
pub use scan::execute_scan_page;
