//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read the TOML configuration file
//! - Parse TOML into the `AppConfig` DTO
//! - Pick the data directory from flags, config and platform defaults
//!
//! ## Prohibited
//!
//! - No validation logic
//! - No onboarding defaults (see `OnboardingPolicy::from_config`)
//!
//! ## Iron Rule
//!
//! > **Pure data loading only. Accept whatever is in the file.**

use std::path::PathBuf;

use anyhow::Context;
use cc_app::app_paths::AppPaths;
use cc_core::app_dirs::AppDirs;
use cc_core::config::AppConfig;
use cc_core::ports::AppDirsPort;
use tracing::debug;

/// Load configuration from a TOML file.
///
/// **NO validation is performed**: empty strings and odd numbers are
/// accepted as they are. Missing sections map to unset values.
///
/// # Errors
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - `[[tour.steps]]` cannot be mapped to step definitions
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Configuration plus the directories the shell will use.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AppConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    pub paths: AppPaths,
}

/// Locate and load the configuration, then settle the data directory.
///
/// - An explicit `--config` file must exist.
/// - Otherwise `careconnect.toml` in the default data directory is read when
///   present, and an empty config is used when it is not.
/// - The data directory is `--data-dir`, else `[general] data_dir`, else the
///   platform default from `app_dirs`.
pub fn resolve_config(
    explicit_config: Option<PathBuf>,
    data_dir_override: Option<PathBuf>,
    app_dirs: &dyn AppDirsPort,
) -> anyhow::Result<ResolvedConfig> {
    let default_root = match &data_dir_override {
        Some(dir) => Some(dir.clone()),
        None => app_dirs.get_app_dirs().ok().map(|dirs| dirs.app_data_root),
    };

    let (config, config_path) = match explicit_config {
        Some(path) => (load_config(path.clone())?, Some(path)),
        None => {
            let candidate = default_root.as_ref().map(|root| {
                AppPaths::from_app_dirs(&AppDirs {
                    app_data_root: root.clone(),
                })
                .config_path
            });
            match candidate.filter(|path| path.is_file()) {
                Some(path) => (load_config(path.clone())?, Some(path)),
                None => {
                    debug!("no config file found, using empty config");
                    (AppConfig::empty(), None)
                }
            }
        }
    };

    let configured_root =
        Some(config.data_dir.clone()).filter(|dir| !dir.as_os_str().is_empty());
    let app_data_root = data_dir_override
        .or(configured_root)
        .or(default_root)
        .context("No data directory: pass --data-dir or set [general] data_dir")?;

    Ok(ResolvedConfig {
        paths: AppPaths::from_app_dirs(&AppDirs { app_data_root }),
        config,
        config_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::ports::AppDirsError;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    struct FixedAppDirs(Option<PathBuf>);

    impl AppDirsPort for FixedAppDirs {
        fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
            self.0
                .clone()
                .map(|app_data_root| AppDirs { app_data_root })
                .ok_or(AppDirsError::DataLocalDirUnavailable)
        }
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            level = "warn"

            [onboarding]
            admin_users = ["root"]
            auto_advance_delay_ms = 250
            "#
        )
        .unwrap();

        let config = load_config(file.path().to_path_buf()).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.admin_users, Some(vec!["root".to_string()]));
        assert_eq!(config.auto_advance_delay_ms, Some(250));
    }

    #[test]
    fn test_load_config_returns_error_on_missing_file() {
        let result = load_config(PathBuf::from("/nonexistent/careconnect.toml"));
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_returns_error_on_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not [valid toml").unwrap();

        let result = load_config(file.path().to_path_buf());
        assert!(format!("{:#}", result.unwrap_err()).contains("Failed to parse config as TOML"));
    }

    #[test]
    fn resolve_without_file_uses_empty_config_and_platform_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("careconnect");

        let resolved = resolve_config(None, None, &FixedAppDirs(Some(root.clone()))).unwrap();

        assert_eq!(resolved.config, AppConfig::empty());
        assert_eq!(resolved.config_path, None);
        assert_eq!(resolved.paths.store_path, root.join("store.json"));
    }

    #[test]
    fn resolve_reads_config_from_data_dir_and_honours_its_data_dir() {
        let dir = TempDir::new().unwrap();
        let moved = dir.path().join("elsewhere");
        std::fs::write(
            dir.path().join("careconnect.toml"),
            format!("[general]\ndata_dir = {:?}\n", moved.display().to_string()),
        )
        .unwrap();

        let resolved =
            resolve_config(None, None, &FixedAppDirs(Some(dir.path().to_path_buf()))).unwrap();

        assert_eq!(
            resolved.config_path,
            Some(dir.path().join("careconnect.toml"))
        );
        assert_eq!(resolved.paths.store_path, moved.join("store.json"));
    }

    #[test]
    fn resolve_prefers_data_dir_flag_over_config() {
        let dir = TempDir::new().unwrap();
        let config_file = dir.path().join("custom.toml");
        std::fs::write(&config_file, "[general]\ndata_dir = \"/ignored\"\n").unwrap();
        let flag_dir = dir.path().join("flag");

        let resolved = resolve_config(
            Some(config_file.clone()),
            Some(flag_dir.clone()),
            &FixedAppDirs(None),
        )
        .unwrap();

        assert_eq!(resolved.config_path, Some(config_file));
        assert_eq!(resolved.paths.logs_dir, flag_dir.join("logs"));
    }

    #[test]
    fn resolve_fails_without_any_data_dir() {
        let result = resolve_config(None, None, &FixedAppDirs(None));
        assert!(result.is_err());
    }

    #[test]
    fn resolve_rejects_missing_explicit_config() {
        let dir = TempDir::new().unwrap();
        let result = resolve_config(
            Some(dir.path().join("missing.toml")),
            Some(dir.path().to_path_buf()),
            &FixedAppDirs(None),
        );
        assert!(result.is_err());
    }
}
