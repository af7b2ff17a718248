use dial::{Cue, DialError, DialSession, Item, ItemId, Layout, Size, Theme, Tuning};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub id: ItemId,
    /// Image path relative to `assets.dir`. Falls back to `assets.item_pattern`.
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub dir: PathBuf,
    pub glyph: Option<PathBuf>,
    /// `{}` is replaced by the item id.
    pub item_pattern: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            glyph: Some(PathBuf::from("logo.jpg")),
            item_pattern: "{}.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub sounds: HashMap<Cue, PathBuf>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    pub fn items(&self) -> Vec<Item> {
        self.items
            .iter()
            .map(|item| {
                let image = item.image.clone().unwrap_or_else(|| {
                    PathBuf::from(self.assets.item_pattern.replace("{}", &item.id))
                });
                Item::new(item.id.clone(), self.assets.dir.join(image))
            })
            .collect()
    }

    pub fn glyph_path(&self) -> Option<PathBuf> {
        self.assets.glyph.as_ref().map(|p| self.assets.dir.join(p))
    }

    pub fn sound_paths(&self) -> HashMap<Cue, PathBuf> {
        self.sounds
            .iter()
            .map(|(cue, path)| (*cue, self.assets.dir.join(path)))
            .collect()
    }

    pub fn build_session(&self, viewport: Size) -> Result<DialSession, DialError> {
        DialSession::new(
            self.items(),
            self.layout.clone(),
            self.tuning.clone(),
            viewport,
        )
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
        ProjectDirs::from("org", "omnidial", "omnidial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_layered(path, environment())
}

/// `OMNIDIAL_<SECTION>__<KEY>`, e.g. `OMNIDIAL_TUNING__DECAY`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("OMNIDIAL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_layered(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config from {}: {}", path.display(), e);
            default_config()
        }
    }
}

fn default_config() -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_default()
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

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
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
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
