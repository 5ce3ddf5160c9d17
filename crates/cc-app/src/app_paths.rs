use std::path::PathBuf;

use cc_core::app_dirs::AppDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub store_path: PathBuf,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            store_path: dirs.app_data_root.join("store.json"),
            config_path: dirs.app_data_root.join("careconnect.toml"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_derives_concrete_locations_from_app_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/careconnect"),
        };

        let paths = AppPaths::from_app_dirs(&dirs);

        assert_eq!(paths.store_path, PathBuf::from("/tmp/careconnect/store.json"));
        assert_eq!(
            paths.config_path,
            PathBuf::from("/tmp/careconnect/careconnect.toml")
        );
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/careconnect/logs"));
    }
}
