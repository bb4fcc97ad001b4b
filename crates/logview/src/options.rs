//! View options
//!
//! Options passed to a [`LogView`](crate::LogView) at construction. No keys are
//! recognized yet; the bag is part of the constructor so behavior flags can be
//! added without changing its signature.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Open configuration bag for a log view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogViewOptions {
    /// Keys that no option currently reads
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl LogViewOptions {
    /// Names of the keys that were supplied but are not understood
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.unrecognized.keys().map(String::as_str)
    }

    /// Emit a warning for each unrecognized key
    pub(crate) fn report_unrecognized(&self) {
        for key in self.unrecognized_keys() {
            log::warn!("LogView: ignoring unknown option '{}'", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_empty() {
        let options = LogViewOptions::default();
        assert_eq!(options.unrecognized_keys().count(), 0);
    }

    #[test]
    fn test_options_deserialize_keeps_unknown_keys() {
        let toml = r#"
            max_entries = 100
            theme = "light"
        "#;
        let options: LogViewOptions = toml::from_str(toml).unwrap();
        let keys: Vec<&str> = options.unrecognized_keys().collect();
        assert_eq!(keys, vec!["max_entries", "theme"]);
        assert_eq!(options.unrecognized["theme"], serde_json::json!("light"));
    }

    #[test]
    fn test_options_deserialize_empty_table() {
        let options: LogViewOptions = toml::from_str("").unwrap();
        assert_eq!(options, LogViewOptions::default());
    }
}
