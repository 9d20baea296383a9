use std::{fs, path::Path};

use kmeans_live::MemberScan;
use serde::{Deserialize, Serialize};

/// Run settings, loaded from a `.ron` file and then overridden by command-line flags
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    pub population: usize,
    pub k: usize,
    pub extent: f64,
    pub max_ticks: usize,
    pub seed: u64,
    pub member_scan: MemberScan,
    pub out_dir: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            population: 200,
            k: 4,
            extent: 10.0,
            max_ticks: 300,
            seed: 0,
            member_scan: MemberScan::Snapshot,
            out_dir: "out".to_string(),
        }
    }
}

impl DriverConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, String> {
        ron::de::from_str(text).map_err(|e| format!("failed to parse config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = DriverConfig::from_ron("(k: 2, seed: 9)").unwrap();
        assert_eq!(config.k, 2);
        assert_eq!(config.seed, 9);
        assert_eq!(config.population, 200);
        assert_eq!(config.member_scan, MemberScan::Snapshot);
    }

    #[test]
    fn member_scan_by_name() {
        let config =
            DriverConfig::from_ron("(member_scan: LiveCursor, out_dir: \"snap\")").unwrap();
        assert_eq!(config.member_scan, MemberScan::LiveCursor);
        assert_eq!(config.out_dir, "snap");
    }

    #[test]
    fn bad_ron_is_an_error() {
        assert!(DriverConfig::from_ron("(k: \"four\")").is_err());
    }
}
