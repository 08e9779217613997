//! Configuration management for the Narcissus scanner

use crate::error::{NarcissusError, Result};
use crate::models::ScanConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File-based configuration structure matching the YAML config format:
///
/// ```yaml
/// workers: 16
/// sites:
///   - targets/alexa-top.txt
///   - targets/extra.txt
/// ```
#[derive(Debug, Deserialize)]
struct FileConfig {
    workers: Option<usize>,
    sites: Vec<PathBuf>,
}

/// Loads configuration from a YAML file and merges with defaults
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let content = std::fs::read_to_string(path).map_err(NarcissusError::IoError)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<ScanConfig> {
    let file_config: FileConfig = serde_yaml::from_str(content)?;

    let mut config = ScanConfig::default();
    if let Some(workers) = file_config.workers {
        config.workers = workers;
    }
    config.sites = file_config.sites;

    Ok(config)
}

/// Merges CLI arguments into an existing ScanConfig
pub fn merge_cli_args(config: &mut ScanConfig, workers: Option<usize>) {
    if let Some(w) = workers {
        config.workers = w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config("workers: 4\nsites:\n  - a.txt\n  - b.txt\n").expect("parse");
        assert_eq!(config.workers, 4);
        assert_eq!(
            config.sites,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
        config.validate().expect("valid");
    }

    #[test]
    fn test_workers_default_applies() {
        let config = parse_config("sites:\n  - a.txt\n").expect("parse");
        assert_eq!(config.workers, ScanConfig::default().workers);
    }

    #[test]
    fn test_missing_sites_is_an_error() {
        assert!(parse_config("workers: 4\n").is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        assert!(parse_config("workers: [not a number").is_err());
    }

    #[test]
    fn test_zero_workers_rejected_by_validate() {
        let config = parse_config("workers: 0\nsites:\n  - a.txt\n").expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_sites_rejected_by_validate() {
        let config = parse_config("workers: 4\nsites: []\n").expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_workers_override() {
        let mut config = parse_config("workers: 4\nsites:\n  - a.txt\n").expect("parse");
        merge_cli_args(&mut config, Some(12));
        assert_eq!(config.workers, 12);
        merge_cli_args(&mut config, None);
        assert_eq!(config.workers, 12);
    }
}
