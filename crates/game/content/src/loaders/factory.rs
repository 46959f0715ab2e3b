//! Content factory for building a match from data files.

use std::path::{Path, PathBuf};

use skirmish_core::{CombatConfig, Game, SceneTemplate, SkillCatalog};

use crate::loaders::{ConfigLoader, LoadResult, SceneLoader, SkillLoader};
use crate::source::FileSceneSource;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// └── scenes/
///     ├── village.ron
///     └── forest.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load and validate a scene from `scenes/`, resolved by extension the
    /// same way as [`FileSceneSource`].
    pub fn load_scene(&self, scene_name: &str) -> LoadResult<SceneTemplate> {
        let path = self
            .scene_source()
            .resolve(scene_name)
            .ok_or_else(|| anyhow::anyhow!("Scene not found: {}", scene_name))?;
        SceneLoader::load(&path)
    }

    /// Scene source over `scenes/`, for [`Game::new`].
    pub fn scene_source(&self) -> FileSceneSource {
        FileSceneSource::new(self.scenes_dir())
    }

    /// Builds a match from the directory.
    ///
    /// `config.toml` and `skills.ron` are optional; without them the core
    /// defaults and built-in catalog apply. A file that exists but fails to
    /// parse is an error.
    pub fn build_game(&self) -> LoadResult<Game> {
        let config = if self.data_dir.join("config.toml").is_file() {
            self.load_config()?
        } else {
            tracing::info!(data_dir = %self.data_dir.display(), "no config.toml, using defaults");
            CombatConfig::default()
        };
        let skills = if self.data_dir.join("skills.ron").is_file() {
            self.load_skills()?
        } else {
            SkillCatalog::builtin()
        };

        Ok(Game::new(config, Box::new(self.scene_source())).with_skills(skills))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn scenes_dir(&self) -> PathBuf {
        self.data_dir.join("scenes")
    }
}
