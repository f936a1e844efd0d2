//! Configuration file loader for the `.agent-gallery/` directory.
//!
//! This module loads:
//! - `config.toml`: Global settings
//! - `entrypoints/*.md`: Entrypoint definitions with YAML front matter
//! - `entrypoints/*.yaml`: Entrypoint definitions without a prompt body
//! - the env file named in `config.toml`

use crate::agents::factory::DEFAULT_API_KEY_ENV;
use crate::config::env::{load_env_layers, process_overrides};
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::models::AppConfig;
use ag_protocol::config_models::GlobalConfig;
use ag_protocol::entrypoint_models::EntrypointConfig;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Name of the configuration directory under the project root.
pub const CONFIG_DIR: &str = ".agent-gallery";

/// Loads all configuration from the `.agent-gallery/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.agent-gallery/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. A missing directory
/// or missing files yield defaults rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML, YAML, Markdown front matter, dotenv)
/// - An entrypoint name is empty or used twice
///
/// # Example
///
/// ```rust,no_run
/// use ag_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} entrypoints", config.entrypoints.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_dir = root.join(CONFIG_DIR);

    if !config_dir.exists() {
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&config_dir)?;
    let entrypoints = load_entrypoints(&config_dir)?;

    let env_path = global.env_file.as_ref().map(|f| root.join(f));
    let keys: BTreeSet<&str> = entrypoints
        .iter()
        .filter_map(|e| e.credential_env.as_deref())
        .chain([DEFAULT_API_KEY_ENV])
        .collect();
    let env = load_env_layers(env_path.as_deref(), &process_overrides(keys))?;

    debug!(
        entrypoints = entrypoints.len(),
        env_keys = env.len(),
        "configuration loaded"
    );

    Ok(AppConfig {
        global,
        entrypoints,
        env,
    })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(config_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path,
        source,
    })
}

/// Loads all entrypoint definitions from `entrypoints/`, in file-name order.
fn load_entrypoints(config_dir: &Path) -> ConfigResult<Vec<EntrypointConfig>> {
    let entrypoints_dir = config_dir.join("entrypoints");

    if !entrypoints_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entrypoints = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(&entrypoints_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: entrypoints_dir.clone(),
            source,
        })?;

        let path = entry.path();
        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("md") => parse_markdown(path)?,
            Some("yaml") | Some("yml") => parse_yaml(path)?,
            _ => continue,
        };

        if config.name.trim().is_empty() {
            return Err(invalid(path, "Entrypoint name must not be empty"));
        }
        if !seen.insert(config.name.clone()) {
            return Err(invalid(
                path,
                &format!("Duplicate entrypoint name '{}'", config.name),
            ));
        }

        entrypoints.push(config);
    }

    Ok(entrypoints)
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: &str) -> ConfigError {
    ConfigError::InvalidConfig {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}

/// Markdown with YAML front matter; the body becomes the system prompt.
fn parse_markdown(path: &Path) -> ConfigResult<EntrypointConfig> {
    let content = read(path)?;
    let matter = Matter::<YAML>::new();
    let result = matter.parse(&content);

    let mut config: EntrypointConfig = result
        .data
        .ok_or_else(|| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: "Missing YAML front matter".to_string(),
        })?
        .deserialize()
        .map_err(|e| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: format!("Failed to deserialize front matter: {}", e),
        })?;

    config.system_prompt = result.content.trim().to_string();
    Ok(config)
}

fn parse_yaml(path: &Path) -> ConfigResult<EntrypointConfig> {
    let content = read(path)?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_protocol::entrypoint_models::{AgentKindConfig, FailurePolicy};
    use std::fs;
    use tempfile::tempdir;

    fn gallery_dir(root: &Path) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(dir.join("entrypoints")).expect("Failed to create entrypoints dir");
        dir
    }

    #[tokio::test]
    async fn test_load_config_acceptance() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();
        let gallery = gallery_dir(root);

        fs::write(
            gallery.join("config.toml"),
            "env-file = \".env\"\ndefault-input = \"Surprise me\"\nlog-level = \"debug\"\n",
        )
        .expect("Failed to write config.toml");
        fs::write(root.join(".env"), "AG_GALLERY_TEST_ONLY_KEY=secret\n")
            .expect("Failed to write .env");

        let entrypoint_md = r#"---
name: recipe-helper
description: Suggests a recipe
kind: chat
model: gpt-4o-mini
fields: [ingredients, pantry]
credential-env: AG_GALLERY_TEST_ONLY_KEY
failure-policy: capture
---

You are a helpful cook."#;
        fs::write(gallery.join("entrypoints/recipe.md"), entrypoint_md)
            .expect("Failed to write entrypoint file");

        let config = load_config(root).await.expect("Failed to load config");

        assert_eq!(config.global.default_input, "Surprise me");
        assert_eq!(config.global.log_level, "debug");

        assert_eq!(config.entrypoints.len(), 1);
        let entrypoint = &config.entrypoints[0];
        assert_eq!(entrypoint.name, "recipe-helper");
        assert_eq!(entrypoint.kind, Some(AgentKindConfig::Chat));
        assert_eq!(entrypoint.fields, vec!["ingredients", "pantry"]);
        assert_eq!(entrypoint.failure_policy, FailurePolicy::Capture);
        assert_eq!(entrypoint.system_prompt, "You are a helpful cook.");

        assert_eq!(config.env["AG_GALLERY_TEST_ONLY_KEY"], "secret");
        assert!(config.entrypoint("recipe-helper").is_some());
    }

    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let config = load_config(dir.path())
            .await
            .expect("Should handle missing .agent-gallery");

        assert_eq!(config.global, GlobalConfig::default());
        assert!(config.entrypoints.is_empty());
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());
        fs::write(gallery.join("config.toml"), "log-level = [invalid toml")
            .expect("Failed to write config.toml");

        match load_config(dir.path()).await {
            Err(ConfigError::TomlParse { path, .. }) => assert!(path.ends_with("config.toml")),
            other => panic!("Expected TomlParse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_config_no_frontmatter() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());
        fs::write(gallery.join("entrypoints/plain.md"), "Just plain markdown content")
            .expect("Failed to write entrypoint file");

        match load_config(dir.path()).await {
            Err(ConfigError::MarkdownParse { path, reason }) => {
                assert!(path.ends_with("plain.md"));
                assert!(reason.contains("Missing YAML front matter"));
            }
            other => panic!("Expected MarkdownParse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_config_invalid_frontmatter() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());
        let md = "---\nname: broken\nkind: telepathy\n---\n\nbody";
        fs::write(gallery.join("entrypoints/broken.md"), md)
            .expect("Failed to write entrypoint file");

        match load_config(dir.path()).await {
            Err(ConfigError::MarkdownParse { reason, .. }) => {
                assert!(reason.contains("Failed to deserialize"));
            }
            other => panic!("Expected MarkdownParse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_config_yaml_definitions_and_ordering() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());

        fs::write(
            gallery.join("entrypoints/b-tool.yaml"),
            "name: tool\nkind: cli\ncommand: python3\nargs: [agent.py]\n",
        )
        .expect("Failed to write yaml file");
        fs::write(
            gallery.join("entrypoints/a-echo.md"),
            "---\nname: echo\nmodel: test-model\n---\n",
        )
        .expect("Failed to write md file");
        fs::write(gallery.join("entrypoints/notes.txt"), "ignored")
            .expect("Failed to write txt file");

        let config = load_config(dir.path()).await.expect("Should load definitions");
        let names: Vec<_> = config.entrypoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["echo", "tool"]);
        assert_eq!(config.entrypoints[1].args, vec!["agent.py"]);
    }

    #[tokio::test]
    async fn test_load_config_invalid_yaml() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());
        fs::write(
            gallery.join("entrypoints/bad.yaml"),
            "name: test\n  invalid: [yaml",
        )
        .expect("Failed to write yaml file");

        assert!(matches!(
            load_config(dir.path()).await,
            Err(ConfigError::YamlParse { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_config_rejects_duplicate_names() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());
        for file in ["one.md", "two.md"] {
            fs::write(
                gallery.join("entrypoints").join(file),
                "---\nname: same\n---\n",
            )
            .expect("Failed to write entrypoint file");
        }

        match load_config(dir.path()).await {
            Err(ConfigError::InvalidConfig { path, reason }) => {
                assert!(path.ends_with("two.md"));
                assert!(reason.contains("Duplicate"));
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_config_rejects_empty_name() {
        let dir = tempdir().expect("Failed to create temp dir");
        let gallery = gallery_dir(dir.path());
        fs::write(gallery.join("entrypoints/blank.md"), "---\nname: \"  \"\n---\n")
            .expect("Failed to write entrypoint file");

        assert!(matches!(
            load_config(dir.path()).await,
            Err(ConfigError::InvalidConfig { .. })
        ));
    }
}
