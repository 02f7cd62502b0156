//! Storage layer for studylog.
//!
//! This module keeps each collection as a JSON array in its own file. Every
//! load reads the whole file and every save rewrites it; there is no index
//! and no locking, so concurrent writers race and the last one wins.
//!
//! Atomic saves go through a uniquely named temporary file in the data
//! directory, so racing writers never replace each other's half-written data
//! and each one either installs its own file or reports a failure.

pub mod collection;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{Observation, Project, Subject};

pub use collection::Collection;

/// Indentation used when writing collection files.
const INDENT: &[u8] = b"    ";

/// Storage engine for the record collections.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding the collection files.
    data_dir: PathBuf,
    /// Write through a temporary file and rename into place.
    atomic_writes: bool,
}

/// Summary information about one collection file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    /// Which collection this describes.
    pub collection: Collection,
    /// Path to the backing file.
    pub path: PathBuf,
    /// Whether the backing file exists yet.
    pub exists: bool,
    /// Number of records stored.
    pub records: usize,
    /// Last modification time of the backing file.
    pub modified: Option<DateTime<Utc>>,
}

/// Summary information about all collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageStats {
    /// The data directory.
    pub data_dir: PathBuf,
    /// Per-collection details.
    pub collections: Vec<CollectionStats>,
}

impl Storage {
    /// Open storage rooted at the given data directory.
    ///
    /// Creates the directory if it doesn't exist. Collection files are created
    /// lazily on first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(data_dir: impl AsRef<Path>, atomic_writes: bool) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|source| Error::DirectoryCreate {
                path: data_dir.clone(),
                source,
            })?;
        }

        info!("Using data directory {}", data_dir.display());
        Ok(Self {
            data_dir,
            atomic_writes,
        })
    }

    /// Open storage as described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::open(config.data_dir(), config.storage.atomic_writes)
    }

    /// Get the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path of a collection's backing file.
    #[must_use]
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Load every record in a collection.
    ///
    /// A missing file is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptData`] if the file exists but is not a valid
    /// array of records, or an I/O error if it cannot be read.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.path(collection);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {} file yet, treating as empty", collection);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| Error::CorruptData {
                path: path.clone(),
                source,
            })?;
        debug!("Loaded {} {} from {}", records.len(), collection, path.display());
        Ok(records)
    }

    /// Overwrite a collection with the given records.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails. Without atomic
    /// writes, a failure part way through can leave the file truncated.
    pub fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<()> {
        let bytes = encode(records)?;
        let path = self.path(collection);

        if self.atomic_writes {
            // Dropping the temp file on an early return removes it.
            let mut tmp = tempfile::Builder::new()
                .prefix(&format!(".{}.", collection.file_name()))
                .suffix(".tmp")
                .tempfile_in(&self.data_dir)?;
            tmp.write_all(&bytes)?;
            tmp.flush()?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
        } else {
            fs::write(&path, &bytes)?;
        }

        debug!("Saved {} {} to {}", records.len(), collection, path.display());
        Ok(())
    }

    /// Load all projects.
    ///
    /// # Errors
    ///
    /// See [`Storage::load`].
    pub fn projects(&self) -> Result<Vec<Project>> {
        self.load(Collection::Projects)
    }

    /// Load all subjects.
    ///
    /// # Errors
    ///
    /// See [`Storage::load`].
    pub fn subjects(&self) -> Result<Vec<Subject>> {
        self.load(Collection::Subjects)
    }

    /// Load all observations.
    ///
    /// # Errors
    ///
    /// See [`Storage::load`].
    pub fn observations(&self) -> Result<Vec<Observation>> {
        self.load(Collection::Observations)
    }

    /// Get storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if any collection cannot be read or parsed.
    pub fn stats(&self) -> Result<StorageStats> {
        let collections = Collection::ALL
            .iter()
            .map(|&collection| self.collection_stats(collection))
            .collect::<Result<Vec<_>>>()?;

        Ok(StorageStats {
            data_dir: self.data_dir.clone(),
            collections,
        })
    }

    fn collection_stats(&self, collection: Collection) -> Result<CollectionStats> {
        let path = self.path(collection);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => Some(metadata),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Utc>::from);
        let records = self.load::<serde_json::Value>(collection)?.len();

        Ok(CollectionStats {
            collection,
            exists: metadata.is_some(),
            path,
            records,
            modified,
        })
    }
}

/// Serialize records as a JSON array indented by four spaces.
fn encode<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    Ok(buf)
}
