use anyhow::{Context, Result};
use cityfinder_core::City;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Bulk city list published by OpenWeatherMap.
pub const CITY_LIST_URL: &str = "https://bulk.openweathermap.org/sample/city.list.json.gz";

/// Cache of the raw downloaded dataset, kept in its own directory, separate
/// from the index it feeds.
pub struct CityListCache {
    dir: PathBuf,
}

impl CityListCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn archive(&self) -> PathBuf {
        self.dir.join("city.list.json.gz")
    }

    /// Download the bulk list unless it is already cached. Downloads land in
    /// a `.part` file first; a failed download never leaves a partial archive
    /// behind.
    pub async fn ensure_cached(&self, url: &str) -> Result<PathBuf> {
        let archive = self.archive();
        if archive.is_file() {
            return Ok(archive);
        }
        fs::create_dir_all(&self.dir)?;
        tracing::info!(%url, path = %archive.display(), "downloading city list");
        let part = self.dir.join("city.list.json.gz.part");
        match download(url, &part).await {
            Ok(bytes) => {
                fs::rename(&part, &archive)?;
                tracing::info!(bytes, "city list downloaded");
                Ok(archive)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&part) {
                    if cleanup.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(error = %cleanup, "could not remove partial download");
                    }
                }
                Err(e)
            }
        }
    }

    /// Gunzip and decode the cached archive into a materialized city list.
    pub fn load_cities(&self) -> Result<Vec<City>> {
        let archive = self.archive();
        let file = File::open(&archive).with_context(|| format!("open {}", archive.display()))?;
        let gz = GzDecoder::new(BufReader::new(file));
        let cities: Vec<City> = serde_json::from_reader(BufReader::new(gz))
            .with_context(|| format!("decode {}", archive.display()))?;
        Ok(cities)
    }
}

async fn download(url: &str, dest: &Path) -> Result<u64> {
    let resp = reqwest::get(url).await?.error_for_status()?;
    let body = resp.bytes().await?;
    fs::write(dest, &body)?;
    Ok(body.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn loads_cities_from_a_gzipped_archive() {
        let dir = tempdir().unwrap();
        let cache = CityListCache::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();

        let json = r#"[{"id":707860,"name":"Hurzuf","country":"UA","coord":{"lon":34.283333,"lat":44.549999}}]"#;
        let mut gz = GzEncoder::new(File::create(cache.archive()).unwrap(), Compression::default());
        gz.write_all(json.as_bytes()).unwrap();
        gz.finish().unwrap();

        let cities = cache.load_cities().unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Hurzuf");
        assert_eq!(cities[0].country, "UA");
    }

    #[test]
    fn missing_archive_is_an_error() {
        let dir = tempdir().unwrap();
        let cache = CityListCache::new(dir.path().join("citylist"));
        assert!(cache.load_cities().is_err());
    }
}
