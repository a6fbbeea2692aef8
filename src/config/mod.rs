//! Configuration management for the habitlog application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. Everything habitlog persists lives in a single
//! data directory: the entry store, the goal configuration, the export artifact and
//! the optional profile.
//!
//! # Environment Variables
//!
//! - `HABITLOG_DIR`: Path to the data directory (defaults to ~/.habitlog)
//! - `HOME`: Used for expanding the default data directory path
//!
//! The persisted settings records live in submodules: [`goals`] for the sleep and
//! water targets, [`profile`] for the optional user profile.

pub mod goals;
pub mod profile;

pub use goals::GoalConfig;
pub use profile::Profile;

use crate::constants;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Configuration for the habitlog application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use habitlog::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
/// };
/// assert_eq!(config.data_file(), PathBuf::from("/path/to/data/tracker_data.csv"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory where every habitlog file is stored.
    ///
    /// This is loaded from the HABITLOG_DIR environment variable with a fallback
    /// to ~/.habitlog if not specified.
    pub data_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded using `shellexpand` to handle `~` and
    /// environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the path expansion fails or yields an empty path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use habitlog::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Store lives at {}", config.data_file().display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(constants::ENV_VAR_HABITLOG_DIR).unwrap_or_else(|_| {
            let home = env::var(constants::ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, constants::DEFAULT_DATA_SUBDIR)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config { data_dir })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the data directory is empty or relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use habitlog::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid = Config { data_dir: PathBuf::from("/absolute/path") };
    /// assert!(valid.validate().is_ok());
    ///
    /// let relative = Config { data_dir: PathBuf::from("relative/path") };
    /// assert!(relative.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the entry store.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(constants::DATA_FILE_NAME)
    }

    /// Path of the goal configuration.
    pub fn goals_file(&self) -> PathBuf {
        self.data_dir.join(constants::GOALS_FILE_NAME)
    }

    /// Path of the append-only export artifact.
    pub fn export_file(&self) -> PathBuf {
        self.data_dir.join(constants::EXPORT_FILE_NAME)
    }

    /// Path of the profile record.
    pub fn profile_file(&self) -> PathBuf {
        self.data_dir.join(constants::PROFILE_FILE_NAME)
    }
}

/// Ensures the data directory exists, creating it if necessary.
///
/// Newly created directories get owner-only permissions on unix.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_data_dir_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}

/// Replaces a small settings file in one step.
///
/// The content goes to an owner-only temporary file in the same directory,
/// which is then renamed over `path`. A failed write leaves the old file intact.
pub(crate) fn write_private_file(path: &Path, content: &[u8]) -> AppResult<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {}", path.display());
    Ok(())
}
