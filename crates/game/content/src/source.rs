//! File-backed scene source.

use std::path::{Component, Path, PathBuf};

use skirmish_core::{SceneError, SceneSource, SceneTemplate};

use crate::loaders::scene::{SceneFormat, SceneLoader};
use crate::loaders::read_file;

/// Resolves scene paths against a directory of RON/TOML scene files.
///
/// `load("forest")` tries `forest`, then `forest.ron`, then `forest.toml`
/// under the root. Validation is left to the controller so that a bad
/// template surfaces as `Malformed` rather than a load failure.
#[derive(Clone, Debug)]
pub struct FileSceneSource {
    root: PathBuf,
}

impl FileSceneSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the file backing a scene name, if any.
    pub(crate) fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        // Scene names stay inside the root.
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        let direct = self.root.join(relative);
        [
            direct.clone(),
            direct.with_extension("ron"),
            direct.with_extension("toml"),
        ]
        .into_iter()
        .find(|candidate| candidate.is_file())
    }
}

impl SceneSource for FileSceneSource {
    fn load(&self, path: &str) -> Result<SceneTemplate, SceneError> {
        let file = self.resolve(path).ok_or_else(|| SceneError::NotFound {
            path: path.to_string(),
        })?;
        let load_failed = |err: anyhow::Error| SceneError::LoadFailed {
            path: path.to_string(),
            reason: err.to_string(),
        };

        let content = read_file(&file).map_err(load_failed)?;
        let template =
            SceneLoader::parse(&content, SceneFormat::from_path(&file)).map_err(load_failed)?;
        tracing::debug!(scene = path, file = %file.display(), "scene file read");
        Ok(template)
    }
}
