//! Locating WireGuard `.conf` files in the input directory

use crate::{
    error::{AppError, Result},
    logging::Logger,
};
use std::path::{Path, PathBuf};

/// Lists `.conf` files below a directory
pub struct ConfigDiscovery {
    recursive: bool,
    logger: Logger,
}

impl ConfigDiscovery {
    pub fn new(recursive: bool, logger: Logger) -> Self {
        Self { recursive, logger }
    }

    /// Collect `.conf` files in `dir`, sorted by path.
    ///
    /// Fails with `DirectoryNotFound` when `dir` is not a directory and with
    /// `NoConfigFiles` when nothing matches.
    pub async fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let metadata = tokio::fs::metadata(dir).await
            .map_err(|_| AppError::directory_not_found(dir))?;
        if !metadata.is_dir() {
            return Err(AppError::directory_not_found(dir));
        }

        let mut files = Vec::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&current).await {
                Ok(entries) => entries,
                Err(e) if current == dir => return Err(e.into()),
                Err(e) => {
                    crate::log_warn!(self.logger, "Skipping unreadable directory {}: {}", current.display(), e);
                    continue;
                }
            };

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let file_type = match entry.file_type().await {
                    Ok(file_type) => file_type,
                    Err(_) => continue,
                };

                // Symlinked directories are not followed
                if file_type.is_dir() {
                    if self.recursive {
                        pending.push(path);
                    }
                    continue;
                }

                if is_conf_file(&path) {
                    files.push(path);
                }
            }
        }

        if files.is_empty() {
            return Err(AppError::no_config_files(dir));
        }

        files.sort();
        crate::log_info!(self.logger, "Found {} configuration file(s) in {}", files.len(), dir.display());
        Ok(files)
    }
}

/// Whether a path names a `.conf` file (extension compared case-insensitively)
pub fn is_conf_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("conf"))
        .unwrap_or(false)
        && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::fs;
    use tempfile::TempDir;

    fn discovery(recursive: bool) -> ConfigDiscovery {
        let (logger, _) = Logger::in_memory("DISCOVER".to_string(), LogLevel::Warn);
        ConfigDiscovery::new(recursive, logger)
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = discovery(false).discover(&missing).await.unwrap_err();
        assert!(matches!(err, AppError::DirectoryNotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_file_instead_of_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("wg0.conf");
        fs::write(&file, "").unwrap();

        let err = discovery(false).discover(&file).await.unwrap_err();
        assert!(matches!(err, AppError::DirectoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_no_conf_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "Endpoint = 1.2.3.4:5").unwrap();

        let err = discovery(false).discover(dir.path()).await.unwrap_err();
        assert!(matches!(err, AppError::NoConfigFiles(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_sorted_single_level() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.conf"), "").unwrap();
        fs::write(dir.path().join("a.CONF"), "").unwrap();
        fs::write(dir.path().join("c.conf.bak"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.conf"), "").unwrap();

        let files = discovery(false).discover(dir.path()).await.unwrap();
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["a.CONF", "b.conf"]);
    }

    #[tokio::test]
    async fn test_recursive_walk() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("top.conf"), "").unwrap();
        fs::create_dir_all(dir.path().join("site").join("eu")).unwrap();
        fs::write(dir.path().join("site").join("eu").join("fra.conf"), "").unwrap();

        let files = discovery(true).discover(dir.path()).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("site/eu/fra.conf"));
        assert!(files[1].ends_with("top.conf"));
    }
}
