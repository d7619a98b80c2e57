use crate::application::models::summary::AccountRecord;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// JSON export of batch results. Field order follows the record types and
/// non-ASCII text is written as-is.
pub struct Serializer;

impl Serializer {
    pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
        Ok(serde_json::to_string(value)?)
    }

    pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes `records` as an indented JSON array followed by a newline.
    pub fn write_batch<W: Write>(records: &[AccountRecord], mut writer: W) -> Result<(), AppError> {
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn save_batch(records: &[AccountRecord], path: &Path) -> Result<(), AppError> {
        let file = File::create(path)?;
        Self::write_batch(records, BufWriter::new(file))?;
        info!("Saved {} records to {}", records.len(), path.display());
        Ok(())
    }

    pub fn load_batch(path: &Path) -> Result<Vec<AccountRecord>, AppError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
