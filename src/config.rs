use crate::events::AppEvent;
use async_channel::Sender;
use derive_more::{AsRef, Deref, From, Into};
use directories::{BaseDirs, ProjectDirs};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[strum(serialize = "macos", serialize = "mac", serialize = "darwin")]
    MacOs,
    #[strum(serialize = "windows", serialize = "win32")]
    Windows,
    #[strum(serialize = "linux")]
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct SocketPath(PathBuf);

impl SocketPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        let dir = BaseDirs::new()
            .and_then(|d| d.runtime_dir().map(Path::to_path_buf))
            .unwrap_or_else(std::env::temp_dir);
        Self(dir.join("sttm-shell.sock"))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Adds the Dev menu (inspector, reload).
    pub dev_tools: bool,
    /// Overrides the detected platform for the menu layout.
    pub platform: Option<Platform>,
}

impl AppConfig {
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fit the viewer inside the navigator pane instead of the whole window.
    pub presenter_view: bool,
    /// Inset from the container edges, in pixels.
    pub viewer_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            presenter_view: false,
            viewer_padding: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct IpcConfig {
    pub socket: SocketPath,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub layout: LayoutConfig,
    pub ipc: IpcConfig,
}

/// Command-line settings that win over the file on every (re)load.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub socket: Option<SocketPath>,
    pub presenter_view: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(socket) = &self.socket {
            config.ipc.socket = socket.clone();
        }
        if self.presenter_view {
            config.layout.presenter_view = true;
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "khalisfoundation", "sttm-shell")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("STTM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&get_config_path()?)
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    let result = match path {
        Some(p) => load_from(p),
        None => load_config(),
    };

    match result {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_deserialization() {
        let cases = vec![
            ("\"macos\"", Platform::MacOs),
            ("\"Darwin\"", Platform::MacOs),
            ("\"MAC\"", Platform::MacOs),
            ("\"win32\"", Platform::Windows),
            ("\"Windows\"", Platform::Windows),
            ("\"linux\"", Platform::Linux),
        ];

        for (json, expected) in cases {
            let deserialized: Platform = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Platform>("\"beos\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();

        assert!(!config.layout.presenter_view);
        assert_eq!(config.layout.viewer_padding, 10.0);
        assert!(!config.app.dev_tools);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(
            &path,
            r#"
[app]
dev_tools = true
platform = "darwin"

[layout]
presenter_view = true

[ipc]
socket = "/tmp/sttm-test.sock"
"#,
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert!(config.app.dev_tools);
        assert_eq!(config.app.platform(), Platform::MacOs);
        assert!(config.layout.presenter_view);
        assert_eq!(config.layout.viewer_padding, 10.0);
        assert_eq!(config.ipc.socket, SocketPath::new("/tmp/sttm-test.sock"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = Config::default();
        Overrides::default().apply(&mut config);
        assert_eq!(config, Config::default());

        let overrides = Overrides {
            socket: Some(SocketPath::new("/tmp/other.sock")),
            presenter_view: true,
        };
        overrides.apply(&mut config);
        assert!(config.layout.presenter_view);
        assert_eq!(config.ipc.socket, SocketPath::new("/tmp/other.sock"));
    }

    #[test]
    fn test_default_config_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
    }
}
