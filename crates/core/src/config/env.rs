//! Layered environment for delegate credentials.

use crate::config::error::{ConfigError, ConfigResult};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Read a dotenv-style file and apply `overrides` on top.
///
/// A missing file (or no file at all) yields an empty base layer; a file
/// that exists but cannot be parsed is an error.
pub fn load_env_layers(
    path: Option<&Path>,
    overrides: &BTreeMap<String, String>,
) -> ConfigResult<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();

    if let Some(path) = path.filter(|p| p.exists()) {
        let to_error = |source| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };
        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;
            env.insert(key, value);
        }
        debug!(path = %path.display(), keys = env.len(), "loaded env file");
    }

    env.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(env)
}

/// Values of `keys` that are set in the process environment.
pub fn process_overrides<'a, I>(keys: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty_base() {
        let dir = tempdir().expect("Failed to create temp dir");
        let env = load_env_layers(Some(&dir.path().join(".env")), &BTreeMap::new()).unwrap();
        assert!(env.is_empty());

        let env = load_env_layers(None, &BTreeMap::new()).unwrap();
        assert!(env.is_empty());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(".env");
        fs::write(&path, "GROQ_API_KEY=from-file\nOTHER=\"quoted value\"\n")
            .expect("Failed to write env file");

        let overrides = BTreeMap::from([("GROQ_API_KEY".to_string(), "from-process".to_string())]);
        let env = load_env_layers(Some(&path), &overrides).unwrap();

        assert_eq!(env["GROQ_API_KEY"], "from-process");
        assert_eq!(env["OTHER"], "quoted value");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(".env");
        fs::write(&path, "VALID=1\nthis line is not valid\n").expect("Failed to write env file");

        let result = load_env_layers(Some(&path), &BTreeMap::new());
        assert!(matches!(result, Err(ConfigError::EnvFile { .. })));
    }

    #[test]
    fn test_process_overrides_skip_unset_keys() {
        let overrides = process_overrides(["AG_GALLERY_SURELY_UNSET_KEY_12345"]);
        assert!(overrides.is_empty());
    }
}
