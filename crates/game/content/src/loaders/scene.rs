//! Scene template loader.
//!
//! A scene file is a single [`SceneTemplate`]. The format follows the file
//! extension: `.toml` is parsed as TOML, anything else as RON.

use std::path::Path;

use skirmish_core::SceneTemplate;

use crate::loaders::{LoadResult, read_file};

/// Serialization format of a scene file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneFormat {
    Ron,
    Toml,
}

impl SceneFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Ron,
        }
    }
}

/// Loader for scene templates from RON/TOML files.
pub struct SceneLoader;

impl SceneLoader {
    /// Load and validate a scene template.
    pub fn load(path: &Path) -> LoadResult<SceneTemplate> {
        let content = read_file(path)?;
        let template = Self::parse(&content, SceneFormat::from_path(path))?;
        template
            .validate()
            .map_err(|reason| anyhow::anyhow!("Invalid scene {}: {}", path.display(), reason))?;

        tracing::debug!(
            path = %path.display(),
            enemies = template.enemies.len(),
            board = template.board.len(),
            "scene template loaded"
        );
        Ok(template)
    }

    /// Parse a scene template without validating it.
    pub fn parse(content: &str, format: SceneFormat) -> LoadResult<SceneTemplate> {
        match format {
            SceneFormat::Ron => ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e)),
            SceneFormat::Toml => toml::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse scene TOML: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{Capability, Effect};

    #[test]
    fn parses_ron_scene() {
        let ron = r#"
(
    title: Some("Crypt"),
    board: [(atk: 3, hp: 10, name: Some("Knight"), skills: ["strike"])],
    enemies: [
        (
            name: "Lich",
            hp: 12,
            attack: 2,
            tags: [no_counter],
            on_death: [message(text: "Dust."), transition(to: "crypt_exit", preserve_board: true)],
        ),
    ],
    on_clear: Some((to: "crypt_exit", preserve_board: true)),
    back_to: Some("village"),
)
"#;
        let scene = SceneLoader::parse(ron, SceneFormat::Ron).unwrap();
        assert_eq!(scene.title.as_deref(), Some("Crypt"));
        assert_eq!(scene.board[0].skills, vec!["strike".to_string()]);
        assert_eq!(scene.enemies[0].tags, vec![Capability::NoCounter]);
        assert_eq!(scene.enemies[0].on_death[0], Effect::message("Dust."));
        assert_eq!(scene.parent.as_deref(), Some("village"));
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn parses_toml_scene() {
        let toml = r#"
title = "Meadow"
parent = "village"

[[board]]
atk = 2
hp = 8

[[enemies]]
name = "Wolf"
hp = 5
attack = 1
on_death = ["drop_loot"]
drops = [{ name = "Pelt", type = "material", value = 3 }]

[on_clear]
to = "forest"
"#;
        let scene = SceneLoader::parse(toml, SceneFormat::Toml).unwrap();
        assert_eq!(scene.enemies[0].on_death, vec![Effect::DropLoot]);
        assert_eq!(scene.enemies[0].drops[0].kind, "material");
        let on_clear = scene.on_clear.unwrap();
        assert_eq!(on_clear.to, "forest");
        assert!(!on_clear.preserve_board);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(SceneFormat::from_path(Path::new("a/b.toml")), SceneFormat::Toml);
        assert_eq!(SceneFormat::from_path(Path::new("a/b.ron")), SceneFormat::Ron);
        assert_eq!(SceneFormat::from_path(Path::new("a/b")), SceneFormat::Ron);
    }
}
