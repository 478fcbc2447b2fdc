//! Configuration loading from spreadgraph.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{IoResultExt, SpreadGraphError, SpreadGraphResult};
use crate::model::SocialGraph;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "spreadgraph.toml";

/// Main configuration structure for spreadgraph.toml.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpreadConfig {
    /// Person the spread starts from.
    pub start: Option<String>,
    /// Emit traversal trace events.
    pub debug: Option<bool>,
    /// People in the network, in order.
    pub people: Option<Vec<String>>,
    /// Connections as `[a, b]` pairs.
    pub connections: Option<Vec<(String, String)>>,
    /// Random community settings, used when no people or connections are listed.
    pub random: Option<RandomConfig>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Random community generation settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RandomConfig {
    pub nodes: usize,
    pub edge_prob: f64,
    pub seed: Option<u64>,
}

/// Accepted values of `[output] format`.
pub const OUTPUT_FORMATS: &[&str] = &["plain", "json"];

/// Output format configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl SpreadConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(content: &str, origin: &Path) -> SpreadGraphResult<Self> {
        let cfg: Self =
            toml::from_str(content).map_err(|e| SpreadGraphError::config(origin, e.to_string()))?;

        if let Some(format) = cfg.output.as_ref().and_then(|o| o.format.as_deref()) {
            if !OUTPUT_FORMATS.iter().any(|f| f.eq_ignore_ascii_case(format)) {
                return Err(SpreadGraphError::config(
                    origin,
                    format!("unknown output format '{}', expected plain or json", format),
                ));
            }
        }
        Ok(cfg)
    }

    /// The explicitly listed network, if any people or connections are given.
    pub fn explicit_network(&self) -> Option<SocialGraph> {
        if self.people.is_none() && self.connections.is_none() {
            return None;
        }
        let people = self.people.iter().flatten().map(String::as_str);
        let connections = self
            .connections
            .iter()
            .flatten()
            .map(|(a, b)| (a.as_str(), b.as_str()));
        Some(SocialGraph::from_parts(people, connections))
    }

    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Loads configuration from `<root>/spreadgraph.toml` if it exists.
pub fn load_config(root: &Path) -> SpreadGraphResult<Option<SpreadConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> SpreadGraphResult<SpreadConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    SpreadConfig::from_toml_str(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("spreadgraph_config_tests")
            .join(format!("{}_{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = temp_dir("missing");
        assert!(load_config(&dir).unwrap().is_none());
    }

    #[test]
    fn test_full_config() {
        let dir = temp_dir("full");
        fs::write(
            dir.join(CONFIG_FILE),
            r#"
start = "Kasia"
debug = true
people = ["Kasia", "Tomek"]
connections = [["Kasia", "Tomek"], ["Tomek", "Asia"]]

[random]
nodes = 20
edge_prob = 0.2
seed = 7

[output]
format = "JSON"
"#,
        )
        .unwrap();

        let cfg = load_config(&dir).unwrap().unwrap();
        assert_eq!(cfg.start.as_deref(), Some("Kasia"));
        assert_eq!(cfg.debug, Some(true));
        assert!(cfg.wants_json());
        assert_eq!(cfg.random.as_ref().map(|r| r.nodes), Some(20));

        let graph = cfg.explicit_network().unwrap();
        assert_eq!(graph.entity_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_random_only_has_no_explicit_network() {
        let cfg = SpreadConfig::from_toml_str(
            "[random]\nnodes = 5\nedge_prob = 0.4\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert!(cfg.explicit_network().is_none());
        assert!(!cfg.wants_json());
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let err = SpreadConfig::from_toml_str("people = 3", Path::new("bad.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let err = SpreadConfig::from_toml_str("[output]\nformat = \"yaml\"\n", Path::new("out.toml"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("yaml"));

        let plain =
            SpreadConfig::from_toml_str("[output]\nformat = \"plain\"\n", Path::new("out.toml"))
                .unwrap();
        assert!(!plain.wants_json());
    }

    #[test]
    fn test_unknown_output_key_rejected() {
        let err = SpreadConfig::from_toml_str("[output]\ncolour = true\n", Path::new("out.toml"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = load_config_file(Path::new("/definitely/not/here/spreadgraph.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
