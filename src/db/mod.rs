pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod storage;

use crate::errors::AppResult;
use pool::DbPool;

/// Open the local database and make sure the schema is current.
pub fn open(path: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(path)?;
    initialize::init_db(&pool.conn)?;
    Ok(pool)
}
