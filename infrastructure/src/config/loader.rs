//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["buddy.toml", ".buddy.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./buddy.toml` or `./.buddy.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/buddy-chat/config.toml`
    /// 4. `BUDDY_*` environment variables
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed("BUDDY_").split("__"));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/buddy-chat/config.toml if set,
    /// otherwise falls back to ~/.config/buddy-chat/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("buddy-chat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./buddy.toml or ./.buddy.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Env:     BUDDY_<SECTION>__<KEY>");
        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.completion.model, "gemini-2.0-flash");
        assert!(!config.storage.ephemeral);
        assert!(!config.logging.transcript);
    }

    #[test]
    fn test_global_config_path_is_app_scoped() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("buddy-chat"));
        }
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("buddy.toml");
        let explicit = dir.path().join("custom.toml");
        std::fs::write(
            &project,
            "[completion]\nmodel = \"project-model\"\nrequest_timeout_secs = 5\n",
        )
        .unwrap();
        std::fs::write(&explicit, "[completion]\nmodel = \"explicit-model\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.completion.model, "explicit-model");
        // Keys the explicit file leaves out come from the project file
        assert_eq!(config.completion.request_timeout_secs, 5);
        assert_eq!(
            config.completion.api_key_env,
            FileConfig::default().completion.api_key_env
        );
    }

    #[test]
    fn test_missing_global_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&missing), None, None)
            .extract()
            .unwrap();
        assert_eq!(config.storage, FileConfig::default().storage);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[completion\nmodel = ").unwrap();

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&bad)).extract();
        assert!(result.is_err());
    }
}
