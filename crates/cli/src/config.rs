use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub(crate) const CONFIG_DIR: &str = "netpad";
pub(crate) const CONFIG_FILE: &str = "netpad.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub mirror: MirrorOptions,
    pub log: LogOptions,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct MirrorOptions {
    /// Address to serve on or to connect to
    pub listen: String,
    pub poll_interval_ms: u64,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        MirrorOptions {
            listen: "127.0.0.1:7070".into(),
            poll_interval_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct LogOptions {
    pub file: PathBuf,
}

impl Default for LogOptions {
    fn default() -> Self {
        LogOptions {
            file: env::temp_dir().join("netpad.log"),
        }
    }
}

/// `<config_dir>/netpad/netpad.toml`
pub(crate) fn default_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    Some(path)
}

/// Read configuration from `path`, or from the default location if none is
/// given. A missing default file yields the defaults, an explicitly given
/// file must exist.
pub(crate) fn read_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => match default_path() {
            Some(path) => (path, false),
            None => return Ok(Config::default()),
        },
    };

    let config = config::Config::builder()
        .add_source(
            config::File::from(path.as_path())
                .format(config::FileFormat::Toml)
                .required(required),
        )
        .build()?;

    let config = config.try_deserialize::<Config>()?;

    Ok(config)
}
