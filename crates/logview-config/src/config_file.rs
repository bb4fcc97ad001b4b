//! Locating the `.logview.toml` config file

use std::path::{Path, PathBuf};

pub(crate) const CONFIG_FILE: &str = ".logview.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "LOGVIEW_CONFIG";

/// Config file that was found and read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub content: String,
}

/// Places searched for the config file, in priority order:
/// `$LOGVIEW_CONFIG`, the working directory, then the home directory.
pub fn candidate_paths() -> Vec<PathBuf> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let home = dirs::home_dir().map(|dir| dir.join(CONFIG_FILE));

    explicit
        .into_iter()
        .chain(std::iter::once(PathBuf::from(CONFIG_FILE)))
        .chain(home)
        .collect()
}

/// Read the first candidate that exists
///
/// A candidate that exists but cannot be read is skipped with a warning.
pub fn load_from<P: AsRef<Path>>(candidates: &[P]) -> Option<ConfigSource> {
    candidates.iter().find_map(|candidate| {
        let path: &Path = candidate.as_ref();
        if !path.is_file() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(content) => Some(ConfigSource {
                path: path.to_path_buf(),
                content,
            }),
            Err(e) => {
                log::warn!("Skipping unreadable config {}: {}", path.display(), e);
                None
            }
        }
    })
}

/// Load the config file from the default locations
pub fn load_config_file() -> Option<ConfigSource> {
    let source = load_from(&candidate_paths());
    match &source {
        Some(found) => log::debug!("Config file: {}", found.path.display()),
        None => log::debug!("No {} found", CONFIG_FILE),
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    /// Fresh scratch directory under the system temp dir
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "logview-config-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = scratch("first");
        let missing = dir.join("missing.toml");
        let local = dir.join("local.toml");
        let home = dir.join("home.toml");
        fs::write(&local, "[console]\nheight_percent = 50\n").unwrap();
        fs::write(&home, "[console]\nheight_percent = 90\n").unwrap();

        let source = load_from(&[&missing, &local, &home]).unwrap();
        assert_eq!(source.path, local);
        assert_eq!(source.content, "[console]\nheight_percent = 50\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directories_are_skipped() {
        let dir = scratch("dirs");
        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        let file = dir.join("config.toml");
        fs::write(&file, "").unwrap();

        let source = load_from(&[&nested, &file]).unwrap();
        assert_eq!(source.path, file);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_nothing_found() {
        let dir = scratch("none");
        assert_eq!(load_from(&[dir.join("a.toml"), dir.join("b.toml")]), None);
        assert_eq!(load_from::<PathBuf>(&[]), None);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_working_directory_precedes_home() {
        let candidates = candidate_paths();
        let local = candidates
            .iter()
            .position(|p| p == Path::new(CONFIG_FILE))
            .unwrap();

        if let Some(home) = dirs::home_dir() {
            let home_index = candidates
                .iter()
                .position(|p| *p == home.join(CONFIG_FILE))
                .unwrap();
            assert!(local < home_index);
        }
    }
}
