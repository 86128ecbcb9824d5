use crate::error::{Error, Result};
use rivena::Theme;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "rivena/config.toml";

/// The profile shown in the sidebar footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "shadcn".into(),
            email: "m@example.com".into(),
            avatar: "/avatars/shadcn.jpg".into(),
        }
    }
}

/// Settings for the chat shell.
///
/// Values are taken, in order of priority, from command line flags, the config file, and the
/// defaults here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The route opened at startup.
    pub route: String,
    /// The render width in columns. Defaults to the terminal width.
    pub width: Option<usize>,
    /// The theme used when none has been saved.
    pub theme: Theme,
    /// The key the theme preference is saved under.
    pub storage_key: String,
    /// Where theme preferences are saved. Defaults to `<config dir>/rivena`.
    pub theme_dir: Option<PathBuf>,
    /// The log filter used when `RUST_LOG` isn't set.
    pub log_filter: String,
    pub user: UserProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            route: "/".into(),
            width: None,
            theme: Theme::System,
            storage_key: rivena::DEFAULT_STORAGE_KEY.into(),
            theme_dir: None,
            log_filter: "warn".into(),
            user: UserProfile::default(),
        }
    }
}

impl AppConfig {
    /// The default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Loads the config from `path`, or from [`AppConfig::default_path`] if no path is given.
    ///
    /// A missing file at the default location gives the defaults. A missing file which was
    /// explicitly asked for is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
                // We use a debug here because we expect the file to not exist.
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(Error::ReadConfig { path, source }),
        };
        Self::parse(&data).map_err(|source| Error::ParseConfig { path, source })
    }

    /// Parses a config from TOML. Omitted settings keep their defaults.
    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// The directory theme preferences are saved in.
    pub fn theme_dir(&self) -> PathBuf {
        self.theme_dir.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("rivena")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_partial_config() {
        let config = AppConfig::parse(indoc! {r#"
            route = "/login"
            theme = "dark"

            [user]
            name = "Ada Lovelace"
        "#})
        .unwrap();
        assert_eq!(config.route, "/login");
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.width, None);
        assert_eq!(config.storage_key, "rivena-ui-theme");
        assert_eq!(config.user.name, "Ada Lovelace");
        assert_eq!(config.user.email, "m@example.com");
    }

    #[test]
    fn test_invalid_config() {
        assert!(AppConfig::parse("theme = \"purple\"").is_err());
        assert!(AppConfig::parse("width = \"wide\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("rivena-missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(Error::ReadConfig { .. })
        ));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("rivena-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "width = 80\nlog_filter = \"debug\"\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.width, Some(80));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.route, "/");
    }
}
