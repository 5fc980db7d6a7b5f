use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbitline_core::{ItemId, Status, TimelineItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/orbitline.sock";

fn default_energy() -> f64 {
    50.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub related: Vec<u32>,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "default_energy")]
    pub energy: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub compact: bool,
    #[serde(default)]
    pub socket: Option<PathBuf>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    /// Converts configured items into engine items. The engine requires
    /// unique ids, so duplicates after the first occurrence are dropped
    /// with a warning rather than handed over.
    pub fn timeline_items(&self) -> Vec<TimelineItem> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|item| {
                if seen.insert(item.id) {
                    true
                } else {
                    log::warn!("Duplicate item id {} in config, ignoring", item.id);
                    false
                }
            })
            .map(|item| TimelineItem {
                id: ItemId::new(item.id),
                title: item.title.clone(),
                date: item.date.clone(),
                content: item.content.clone(),
                category: item.category.clone(),
                related_ids: item.related.iter().copied().map(ItemId::new).collect(),
                status: item.status,
                energy: item.energy,
            })
            .collect()
    }

    pub fn socket_path(&self) -> PathBuf {
        self.socket
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET_PATH))
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
    let proj_dirs =
        ProjectDirs::from("org", "troia", "orbitline").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ORBITLINE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The embedded demo timeline, used whenever no usable user config
/// exists. An unparsable embedded default would be a build defect, so it
/// degrades to an empty config with an error log instead of panicking.
pub fn default_config() -> Config {
    let built = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()
        .and_then(|s| s.try_deserialize());

    match built {
        Ok(config) => config,
        Err(e) => {
            log::error!("Embedded default config failed to parse: {}", e);
            Config::default()
        }
    }
}

pub fn load_or_setup() -> Config {
    match load_config() {
        Ok(config) if !config.items.is_empty() => config,
        Ok(_) => {
            log::info!("No items configured, using the demo timeline");
            default_config()
        }
        Err(e) => {
            log::warn!("Falling back to the demo timeline: {}", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
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
