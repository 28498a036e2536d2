pub mod board;
pub mod directory;
pub mod gateway;

use crate::errors::AppError;
use crate::store::Record;

pub(crate) fn single(records: Vec<Record>, what: &str) -> Result<Record, AppError> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Store(anyhow::anyhow!("record store returned no record for {what}")))
}
