use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    #[serde(default = "default_connectivity_host")]
    pub connectivity_host: String,
    #[serde(default = "default_connectivity_port")]
    pub connectivity_port: u16,
    #[serde(default = "default_check_connectivity")]
    pub check_connectivity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            output_path: default_output_path(),
            limit: default_limit(),
            probe_timeout_ms: default_probe_timeout_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            connectivity_host: default_connectivity_host(),
            connectivity_port: default_connectivity_port(),
            check_connectivity: default_check_connectivity(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        let cfg = serde_json::from_slice(&data)
            .map_err(|e| Error::Config(format!("config file is not valid JSON: {}", e)))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_url.trim().is_empty() {
            return Err(Error::Config("sourceUrl must not be empty".into()));
        }
        if self.output_path.trim().is_empty() {
            return Err(Error::Config("outputPath must not be empty".into()));
        }
        if self.limit == 0 {
            return Err(Error::Config("limit must be > 0".into()));
        }
        if self.probe_timeout_ms == 0 || self.probe_timeout_ms > MAX_PROBE_TIMEOUT_MS {
            return Err(Error::Config(format!(
                "probeTimeoutMs must be in 1..={}",
                MAX_PROBE_TIMEOUT_MS
            )));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(Error::Config("fetchTimeoutMs must be > 0".into()));
        }
        if self.check_connectivity && self.connectivity_port == 0 {
            return Err(Error::Config("connectivityPort must be > 0".into()));
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

fn default_fetch_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

fn default_connectivity_host() -> String {
    DEFAULT_CONNECTIVITY_HOST.to_string()
}

fn default_connectivity_port() -> u16 {
    DEFAULT_CONNECTIVITY_PORT
}

fn default_check_connectivity() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.limit, 4);
        assert_eq!(cfg.probe_timeout(), Duration::from_secs(3));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_reads_camel_case_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sourceUrl":"http://127.0.0.1:8080/t.json","limit":8,"probeTimeoutMs":1500,"checkConnectivity":false}}"#
        )
        .unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.source_url, "http://127.0.0.1:8080/t.json");
        assert_eq!(cfg.limit, 8);
        assert_eq!(cfg.probe_timeout_ms, 1500);
        assert!(!cfg.check_connectivity);
        assert_eq!(cfg.output_path, DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "limit = 4").unwrap();
        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let bad = [
            Config {
                limit: 0,
                ..Config::default()
            },
            Config {
                probe_timeout_ms: 0,
                ..Config::default()
            },
            Config {
                probe_timeout_ms: MAX_PROBE_TIMEOUT_MS + 1,
                ..Config::default()
            },
            Config {
                fetch_timeout_ms: 0,
                ..Config::default()
            },
            Config {
                source_url: "  ".to_string(),
                ..Config::default()
            },
            Config {
                output_path: String::new(),
                ..Config::default()
            },
            Config {
                connectivity_port: 0,
                ..Config::default()
            },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(Error::Config(_))),
                "accepted {:?}",
                cfg
            );
        }
    }

    #[test]
    fn connectivity_port_ignored_when_check_disabled() {
        let cfg = Config {
            connectivity_port: 0,
            check_connectivity: false,
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("topology.yaml"), PathBuf::from("topology.yaml"));
        assert_eq!(expand_tilde("/tmp/t.yaml"), PathBuf::from("/tmp/t.yaml"));
    }
}
