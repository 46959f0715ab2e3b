//! Data-driven content definitions and loaders.
//!
//! This crate reads skirmish content from RON/TOML data files:
//! - Scene templates (RON or TOML, one file per scene)
//! - Skill catalogs (RON)
//! - Combat configuration (TOML)
//!
//! Content feeds the core controller through [`skirmish_core::SceneSource`]
//! and the catalog/config constructors; it never appears in match state.
//!
//! All loaders use skirmish-core types directly with serde for deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub mod source;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SceneLoader, SkillLoader};

#[cfg(feature = "loaders")]
pub use source::FileSceneSource;
