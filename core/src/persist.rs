use crate::city::City;
use crate::index::Seq;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// On-disk format version, bumped on incompatible layout changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_cities: u32,
    pub created_at: String,
    pub version: u32,
}

/// File layout of one built index directory.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub(crate) fn cities(&self) -> PathBuf { self.root.join("cities.bin") }
    pub(crate) fn terms(&self) -> PathBuf { self.root.join("terms.bin") }
    pub(crate) fn ids(&self) -> PathBuf { self.root.join("ids.bin") }
    /// `meta.json` is written last and doubles as the build-complete marker.
    pub(crate) fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_cities(paths: &IndexPaths, cities: &[City]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.cities())?;
    let bytes = bincode::serialize(cities)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_cities(paths: &IndexPaths) -> Result<Vec<City>> {
    let mut f = File::open(paths.cities())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let cities = bincode::deserialize(&buf)?;
    Ok(cities)
}

pub fn save_terms(paths: &IndexPaths, terms: &BTreeMap<String, Vec<Seq>>) -> Result<()> {
    let mut f = File::create(paths.terms())?;
    let bytes = bincode::serialize(terms)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_terms(paths: &IndexPaths) -> Result<BTreeMap<String, Vec<Seq>>> {
    let mut f = File::open(paths.terms())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let terms = bincode::deserialize(&buf)?;
    Ok(terms)
}

pub fn save_ids(paths: &IndexPaths, ids: &HashMap<i64, Seq>) -> Result<()> {
    let mut f = File::create(paths.ids())?;
    let bytes = bincode::serialize(ids)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_ids(paths: &IndexPaths) -> Result<HashMap<i64, Seq>> {
    let mut f = File::open(paths.ids())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let ids = bincode::deserialize(&buf)?;
    Ok(ids)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Total size in bytes of the files under `path`.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.metadata().ok())
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
        .sum()
}
