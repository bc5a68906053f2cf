//! JSON document store - one array-of-objects file per collection
//!
//! Every save rewrites the whole document. Writes go to `<file>.tmp` first and
//! are renamed over the target, so a crash mid-write leaves the previous
//! document intact. There is no locking: one process, one writer.

use crate::config::{Collection, StoreConfig};
use crate::error::{PersistenceError, PersistenceResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Document Store - reads and rewrites collection documents
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: StoreConfig,
}

impl DocumentStore {
    /// Open the store, creating `data_dir` if needed
    pub fn new(config: StoreConfig) -> PersistenceResult<Self> {
        fs::create_dir_all(&config.data_dir)
            .map_err(|e| PersistenceError::io(&config.data_dir, e))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.config.path_for(collection)
    }

    /// Raw records of a collection.
    ///
    /// A missing or blank file is an empty collection. A document that is not
    /// a JSON array is `Corrupt`.
    pub fn read_records(&self, collection: Collection) -> PersistenceResult<Vec<Value>> {
        let path = self.path(collection);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(_) => Err(PersistenceError::corrupt(&path, "expected a JSON array")),
            Err(e) => Err(PersistenceError::corrupt(&path, &e.to_string())),
        }
    }

    /// Decode each raw record, skipping (and logging) the ones that do not fit `T`
    pub fn read_lenient<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> PersistenceResult<Vec<T>> {
        let records = self.read_records(collection)?;
        Ok(decode_lenient(collection, records))
    }

    /// Like `read_lenient`, keeping each record's position in the document
    pub fn read_lenient_indexed<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> PersistenceResult<Vec<(usize, T)>> {
        let records = self.read_records(collection)?;
        Ok(decode_lenient_indexed(collection, records))
    }

    /// Replace the whole document with `records`
    pub fn write_records<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> PersistenceResult<()> {
        let path = self.path(collection);
        let bytes = self.encode(records)?;
        write_atomic(&path, &bytes)?;

        tracing::debug!(
            collection = collection.as_str(),
            records = records.len(),
            "document written"
        );
        Ok(())
    }

    /// Read-modify-write append of one record
    pub fn append_record<T: Serialize>(
        &self,
        collection: Collection,
        record: &T,
    ) -> PersistenceResult<()> {
        let mut records = self.read_records(collection)?;
        records.push(serde_json::to_value(record)?);
        self.write_records(collection, &records)
    }

    fn encode<T: Serialize>(&self, records: &[T]) -> PersistenceResult<Vec<u8>> {
        if !self.config.pretty {
            return Ok(serde_json::to_vec(records)?);
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;
        Ok(buf)
    }
}

/// Decode raw records into `T`; bad records are logged and dropped
pub fn decode_lenient<T: DeserializeOwned>(collection: Collection, records: Vec<Value>) -> Vec<T> {
    decode_lenient_indexed(collection, records)
        .into_iter()
        .map(|(_, value)| value)
        .collect()
}

/// Decode raw records, pairing each survivor with its index in `records`
pub fn decode_lenient_indexed<T: DeserializeOwned>(
    collection: Collection,
    records: Vec<Value>,
) -> Vec<(usize, T)> {
    let mut decoded = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<T>(record) {
            Ok(value) => decoded.push((index, value)),
            Err(e) => {
                let err = PersistenceError::malformed(collection.as_str(), index, e);
                tracing::warn!("{}; record skipped", err);
            }
        }
    }

    decoded
}

/// Write to a sibling temp file then rename it over `path`
fn write_atomic(path: &Path, bytes: &[u8]) -> PersistenceResult<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name));

    let result = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.write_all(b"\n")?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(PersistenceError::io(path, e));
    }

    Ok(())
}
