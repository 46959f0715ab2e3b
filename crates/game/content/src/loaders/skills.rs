//! Skill catalog loader.
//!
//! Reads a RON file of the form `(skills: [ ... ])` into a [`SkillCatalog`].

use std::path::Path;

use serde::Deserialize;
use skirmish_core::{SkillCatalog, SkillDef};

use crate::loaders::{LoadResult, read_file};

/// Skill file structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct SkillFileRon {
    skills: Vec<SkillDef>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    ///
    /// Later entries replace earlier ones with the same id.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let data: SkillFileRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skills RON: {}", e))?;

        if let Some(skill) = data.skills.iter().find(|s| s.id.trim().is_empty()) {
            anyhow::bail!("Skill '{}' has an empty id", skill.name);
        }
        for skill in &data.skills {
            skill
                .validate()
                .map_err(|reason| anyhow::anyhow!("Invalid skill: {}", reason))?;
        }
        let catalog: SkillCatalog = data.skills.into_iter().collect();
        tracing::debug!(skills = catalog.len(), "skill catalog loaded");
        Ok(catalog)
    }
}
