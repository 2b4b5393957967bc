//! Rows read from the seqrepo sqlite databases.

use futures::stream::BoxStream;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;

/// One row of `aliases.sqlite3:seqalias`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SeqAlias {
    pub seq_id: String,
    pub namespace: String,
    pub alias: String,
    pub added: String,
    /// Nonzero when the alias is current.
    pub is_current: i64,
}

/// One row of `sequences/db.sqlite3:seqinfo`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FastadirEntry {
    pub seq_id: String,
    pub len: i64,
    pub alpha: String,
    pub added: String,
    pub relpath: String,
}

// Timestamps and flags are cast so decoding does not depend on declared column types.
const SEQALIAS_QUERY: &str = "SELECT seq_id, namespace, alias, \
    CAST(added AS TEXT) AS added, CAST(is_current AS INTEGER) AS is_current \
    FROM seqalias ORDER BY seqalias_id";

const SEQINFO_QUERY: &str = "SELECT seq_id, CAST(len AS INTEGER) AS len, alpha, \
    CAST(added AS TEXT) AS added, relpath \
    FROM seqinfo ORDER BY seq_id";

/// Open a seqrepo database without write access.
pub async fn open_read_only(db: &Path) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::new().filename(db).read_only(true);
    SqlitePool::connect_with(opts).await
}

pub fn stream_seqaliases(pool: &SqlitePool) -> BoxStream<'_, Result<SeqAlias, sqlx::Error>> {
    sqlx::query_as::<_, SeqAlias>(SEQALIAS_QUERY).fetch(pool)
}

pub fn stream_fastadir(pool: &SqlitePool) -> BoxStream<'_, Result<FastadirEntry, sqlx::Error>> {
    sqlx::query_as::<_, FastadirEntry>(SEQINFO_QUERY).fetch(pool)
}
