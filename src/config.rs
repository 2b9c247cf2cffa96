use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    challenge::{Mode, DEFAULT_OPTION_COUNT},
    dojo::DojoKind,
};

/// Stored study preferences; command line flags override them per run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dojo: DojoKind,
    pub mode: Mode,
    pub reverse: bool,
    pub option_count: usize,
    pub blitz_secs: Option<u64>,
    pub question_limit: Option<usize>,
    pub kana_groups: Vec<usize>,
    pub kanji_levels: Vec<u32>,
    pub vocabulary_levels: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dojo: DojoKind::Kana,
            mode: Mode::Pick,
            reverse: false,
            option_count: DEFAULT_OPTION_COUNT,
            blitz_secs: None,
            question_limit: None,
            kana_groups: vec![0, 1],
            kanji_levels: vec![5],
            vocabulary_levels: vec![1],
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "gauntlet") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("gauntlet_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable preferences");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
