//! Whole-collection graph persistence
//!
//! A [`GraphStore`] reads and writes every [`GraphRecord`] at once. Edits are
//! read-modify-write: load the collection, change it in memory, write it all
//! back. There is no locking; two writers racing on one store will lose one
//! writer's changes.
//!
//! - [`JsonFileStore`] keeps the collection in a pretty-printed JSON file.
//! - [`MemoryStore`] keeps it in memory.
//!
//! # Example
//! ```rust
//! # use graphfit::{Graph, RegressionKind, store::{GraphStore, MemoryStore}, test::sample};
//! let store = MemoryStore::default();
//!
//! let mut graph = Graph::new("Line", sample(|x| x, 0.0, 3.0, 1.0), &store.ids().unwrap()).unwrap();
//! graph.set_regression_kind(RegressionKind::Linear).unwrap();
//! store.upsert(graph.to_record()).unwrap();
//!
//! let graphs = store.load_graphs().unwrap();
//! assert_eq!(graphs.len(), 1);
//! assert!(graphs[0].regression().is_some());
//! ```
use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::Result,
    graph::{rehydrate, Graph, GraphRecord},
};

/// Storage for the full collection of graph records.
///
/// Implementors provide [`GraphStore::read_all`] and [`GraphStore::write_all`];
/// everything else is built on those two.
pub trait GraphStore {
    /// Reads every record
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or parsed.
    fn read_all(&self) -> Result<Vec<GraphRecord>>;

    /// Replaces the whole collection with `records`
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn write_all(&self, records: &[GraphRecord]) -> Result<()>;

    /// Reads every record and rehydrates it into a live [`Graph`].
    ///
    /// Records whose model name is unknown still load, without a regression.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or parsed.
    fn load_graphs(&self) -> Result<Vec<Graph>> {
        Ok(self.read_all()?.into_iter().map(rehydrate).collect())
    }

    /// Writes the given graphs as the whole collection
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn save_graphs(&self, graphs: &[Graph]) -> Result<()> {
        let records: Vec<GraphRecord> = graphs.iter().map(Graph::to_record).collect();
        self.write_all(&records)
    }

    /// The ids currently persisted, for allocating a new one
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or parsed.
    fn ids(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_iter().map(|r| r.id).collect())
    }

    /// Finds a record by id
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or parsed.
    fn find(&self, id: &str) -> Result<Option<GraphRecord>> {
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }

    /// Replaces the record with the same id, or appends it if there is none
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or written.
    fn upsert(&self, record: GraphRecord) -> Result<()> {
        let mut records = self.read_all()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.write_all(&records)
    }

    /// Removes the record with the given id, returning it if it existed
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read or written.
    fn delete(&self, id: &str) -> Result<Option<GraphRecord>> {
        let mut records = self.read_all()?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        let removed = records.remove(index);
        self.write_all(&records)?;
        Ok(Some(removed))
    }
}

/// A store backed by a single JSON file.
///
/// A missing or blank file reads as an empty collection. Writes create the
/// parent directory if needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}
impl JsonFileStore {
    /// Creates a store over the file at `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl GraphStore for JsonFileStore {
    fn read_all(&self) -> Result<Vec<GraphRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist yet; no graphs", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<GraphRecord> = serde_json::from_str(&content)?;
        log::debug!("Read {} graphs from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn write_all(&self, records: &[GraphRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        log::info!("Wrote {} graphs to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// An in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<GraphRecord>>,
}
impl MemoryStore {
    /// Creates a store holding `records`
    #[must_use]
    pub fn new(records: Vec<GraphRecord>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    /// Consumes the store, returning its records
    #[must_use]
    pub fn into_records(self) -> Vec<GraphRecord> {
        self.records.into_inner()
    }
}
impl GraphStore for MemoryStore {
    fn read_all(&self) -> Result<Vec<GraphRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn write_all(&self, records: &[GraphRecord]) -> Result<()> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Smallest first
    #[default]
    Ascending,

    /// Largest first
    Descending,
}
impl Order {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Sorts graphs by title, ignoring case
pub fn sort_by_title(graphs: &mut [Graph], order: Order) {
    graphs.sort_by(|a, b| {
        let (a, b) = (a.title().to_lowercase(), b.title().to_lowercase());
        order.apply(a.cmp(&b))
    });
}

/// Sorts graphs by creation time
pub fn sort_by_time(graphs: &mut [Graph], order: Order) {
    graphs.sort_by(|a, b| order.apply(a.created_at().cmp(&b.created_at())));
}

/// Lists files in `dir` that no record's image path points at.
///
/// A file counts as referenced if a record's image path equals the file's
/// path, or names the same file within `dir`. The files are not removed.
///
/// # Errors
/// Returns an error if `dir` cannot be listed. A missing directory has no orphans.
pub fn orphaned_images(records: &[GraphRecord], dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let referenced: HashSet<PathBuf> = records
        .iter()
        .filter(|r| !r.image_path.is_empty())
        .flat_map(|r| {
            let path = PathBuf::from(&r.image_path);
            let local = path.file_name().map(|name| dir.join(name));
            std::iter::once(path).chain(local)
        })
        .collect();

    let mut orphans = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && !referenced.contains(&path) {
            orphans.push(path);
        }
    }

    orphans.sort();
    Ok(orphans)
}
