use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::mangapark;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    File,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    #[serde(default = "default_cache_path")]
    pub path: String,
    /// seconds a fetched document stays fresh
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            path: default_cache_path(),
            ttl: default_cache_ttl(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_create_database")]
    pub create_database: bool,
    /// seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default)]
    pub inline_images: bool,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: yomu_home().join("config.yml"),
            base_url: default_base_url(),
            database_path: default_database_path(),
            create_database: default_create_database(),
            request_timeout: default_request_timeout(),
            inline_images: false,
            cache: CacheConfig::default(),
        }
    }
}

pub fn yomu_home() -> PathBuf {
    match std::env::var("YOMU_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir().unwrap_or_default().join(".yomu"),
    }
}

fn default_base_url() -> String {
    mangapark::BASE_URL.to_string()
}

fn default_database_path() -> String {
    yomu_home().join("yomu.db").display().to_string()
}

fn default_create_database() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cache_path() -> String {
    yomu_home().join("cache").display().to_string()
}

fn default_cache_ttl() -> u64 {
    86400
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => yomu_home().join("config.yml"),
        };

        match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("write default config at {:?}", cfg.path);
                Ok(cfg)
            }
        }
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout)
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        i64::try_from(self.cache.ttl)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_open_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yml");

        let cfg = Config::open(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.path(), path.as_path());
        assert_eq!(cfg.base_url, "https://mangapark.com");
        assert_eq!(cfg.cache.backend, CacheBackend::Memory);
        assert_eq!(cfg.cache_ttl(), chrono::Duration::days(1));

        let reopened = Config::open(Some(&path)).unwrap();
        assert_eq!(reopened.database_path, cfg.database_path);
        assert_eq!(reopened.request_timeout, 30);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "base_url: http://localhost:8080\ninline_images: true\n\
             cache:\n  backend: file\n  ttl: 60\n",
        )
        .unwrap();

        let cfg = Config::open(Some(&path)).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert!(cfg.inline_images);
        assert!(cfg.create_database);
        assert_eq!(cfg.cache.backend, CacheBackend::File);
        assert_eq!(cfg.cache_ttl(), chrono::Duration::seconds(60));
        assert!(cfg.cache.path.ends_with("cache"));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "request_timeout: soon\n").unwrap();

        assert!(Config::open(Some(&path)).is_err());
    }
}
