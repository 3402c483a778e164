use std::fs;
use std::path::Path;

use anyhow::ensure;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::city::City;
use crate::error::Error;
use crate::index::Index;
use crate::persist::{self, IndexPaths, MetaFile, FORMAT_VERSION};

/// Handle on one index directory. Construct as many as needed; nothing is
/// global, so tests can run independent indexes side by side.
///
/// The lifecycle is build-then-read: [`CityIndex::build`] must finish before
/// [`CityIndex::open`], and the caller must not rebuild while connections are
/// live. Opened connections are read-only and freely shareable.
pub struct CityIndex {
    paths: IndexPaths,
}

impl CityIndex {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { paths: IndexPaths::new(root) }
    }

    /// A complete, openable index is present on disk. Interrupted builds are
    /// rolled back and never report true here.
    pub fn exists(&self) -> bool {
        self.paths.meta().is_file()
    }

    /// Full rebuild from a record sequence, consuming each record exactly
    /// once. Any previous index is wiped first. On failure the directory is
    /// removed again, so `exists()` keeps reflecting "no index" and the
    /// caller can retry from scratch.
    pub fn build<I>(&self, cities: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = anyhow::Result<City>>,
    {
        tracing::info!(root = %self.paths.root.display(), "rebuilding city index");
        self.wipe().map_err(|e| Error::BuildFailure(e.into()))?;
        match self.write_index(cities) {
            Ok(num_cities) => {
                let bytes = persist::dir_size(&self.paths.root);
                tracing::info!(num_cities, bytes, "city index ready");
                Ok(())
            }
            Err(source) => {
                if let Err(e) = self.wipe() {
                    tracing::warn!(error = %e, "could not clean up aborted build");
                }
                Err(Error::BuildFailure(source))
            }
        }
    }

    fn write_index<I>(&self, cities: I) -> anyhow::Result<u32>
    where
        I: IntoIterator<Item = anyhow::Result<City>>,
    {
        let mut index = Index::new();
        for city in cities {
            index.insert(city?);
        }
        let num_cities = index.len() as u32;
        persist::save_cities(&self.paths, &index.docs)?;
        persist::save_terms(&self.paths, &index.terms)?;
        persist::save_ids(&self.paths, &index.ids)?;
        let meta = MetaFile {
            num_cities,
            created_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| "".into()),
            version: FORMAT_VERSION,
        };
        // The marker goes last: everything before it must already be durable.
        persist::save_meta(&self.paths, &meta)?;
        Ok(num_cities)
    }

    fn wipe(&self) -> std::io::Result<()> {
        if self.paths.root.exists() {
            fs::remove_dir_all(&self.paths.root)?;
        }
        Ok(())
    }

    /// Open the built index for querying. Every call yields an independent
    /// read-only connection; any number may be open at once.
    pub fn open(&self) -> Result<Connection, Error> {
        if !self.exists() {
            return Err(Error::NotBuilt);
        }
        let index = self.load_index().map_err(Error::Corrupt)?;
        Ok(Connection { index })
    }

    fn load_index(&self) -> anyhow::Result<Index> {
        let meta = persist::load_meta(&self.paths)?;
        ensure!(
            meta.version == FORMAT_VERSION,
            "unsupported index version {}",
            meta.version
        );
        let docs = persist::load_cities(&self.paths)?;
        ensure!(
            docs.len() == meta.num_cities as usize,
            "index holds {} cities, meta file says {}",
            docs.len(),
            meta.num_cities
        );
        let terms = persist::load_terms(&self.paths)?;
        let ids = persist::load_ids(&self.paths)?;
        Ok(Index::from_parts(docs, terms, ids))
    }
}

/// An opened, read-only view of a built index. `Send + Sync`; queries from
/// multiple tasks need no locking because nothing here mutates.
pub struct Connection {
    index: Index,
}

impl Connection {
    pub fn find_by_id(&self, id: i64) -> Option<&City> {
        self.index.find_by_id(id)
    }

    pub fn find_by_name(&self, query: &str, max_results: usize) -> Result<Vec<City>, Error> {
        self.index.find_by_name(query, max_results)
    }

    pub fn num_cities(&self) -> usize {
        self.index.len()
    }

    /// Tear the connection down. Dropping has the same effect; this form
    /// exists for callers that want the teardown to read explicitly.
    pub fn close(self) {}
}
