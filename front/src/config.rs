use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

use crate::translate::DEFAULT_ENDPOINT;

/// Config file picked up from the working directory when no path is given.
pub const CONFIG_FILE: &str = "lingo.ron";

const DATA_DIR_VAR: &str = "LINGO_DATA_DIR";
const TRANSLATE_URL_VAR: &str = "LINGO_TRANSLATE_URL";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the todo collection is stored in.
    pub data_dir: PathBuf,
    pub translate_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".lingo"),
            translate_url: String::from(DEFAULT_ENDPOINT),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Reads `path`, or [`CONFIG_FILE`] if it exists, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => match fs::File::open(CONFIG_FILE) {
                Ok(file) => ron::de::from_reader(file)
                    .wrap_err_with(|| format!("parsing {CONFIG_FILE}"))?,
                Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
                Err(err) => return Err(err).wrap_err_with(|| format!("opening {CONFIG_FILE}")),
            },
        };

        config.apply_overrides(|name| env::var(name).ok());

        Ok(config)
    }

    pub fn read(path: &Path) -> eyre::Result<Self> {
        let file = fs::File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;
        let config =
            ron::de::from_reader(file).wrap_err_with(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(DATA_DIR_VAR) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(url) = var(TRANSLATE_URL_VAR) {
            self.translate_url = url;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"(data_dir: "/tmp/todos")"#).unwrap();

        let config = Config::read(file.path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/todos"));
        assert_eq!(config.translate_url, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "data_dir = 3").unwrap();

        assert!(Config::read(file.path()).is_err());
        assert!(Config::read(Path::new("/definitely/not/here.ron")).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = Config::default();

        config.apply_overrides(|name| match name {
            DATA_DIR_VAR => Some(String::from("/var/lib/lingo")),
            TRANSLATE_URL_VAR => Some(String::from("http://localhost:9000/get")),
            _ => None,
        });

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/lingo"));
        assert_eq!(config.translate_url, "http://localhost:9000/get");
    }
}
