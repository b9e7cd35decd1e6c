//! Promptcast is a prompt-composition engine for batch image generation.
//!
//! A user keeps a library of reusable prompt parts (costumes, poses, expressions, backgrounds,
//! lighting, compositions), actors that combine parts into a default look, directions that
//! override an actor's parts for one shot, and scenes: prompt templates with role placeholders
//! such as `[R1]`. Casting actors into a scene's roles expands the scene into every combination
//! of per-role direction candidates, one fully substituted prompt per combination.
//!
//! # Pipeline overview
//!
//! 1. **Compose actor**: `Actor + Direction -> ActorPrompt` ([`compose_actor`])
//! 2. **Expand scene**: `Scene + RoleAssignments -> Vec<GeneratedPrompt>` ([`expand_scene`])
//! 3. **Materialize**: `GeneratedPrompt + RenderParams -> TaskRecord` ([`materialize_tasks`])
//! 4. **Export** (optional): write the task array as JSON for an external renderer
//!    ([`write_tasks_json`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: expansion is a pure function of the snapshot and the assignments.
//! - **Read-only snapshot**: the engine never mutates or persists the [`Database`]; storage is
//!   a separate collaborator ([`Repository`]).
//!
//! For a standalone walkthrough of the API, see [`crate::guide`].
#![forbid(unsafe_code)]

mod character;
mod compose;
mod foundation;
mod library;
mod store;
mod tasks;

/// High-level, standalone documentation for Promptcast's concepts and data flow.
pub mod guide;

pub use character::legacy::{IncludeFlags, LegacySelection, generate_legacy_prompt};
pub use character::model::{
    BackgroundDefinition, CharacterBase, CharacterDefinition, CharacterOverrides,
    CharacterVariation, ClothingDefinition, Eyes, EyesOverride, Hair, HairOverride, LegacyLibrary,
};
pub use character::resolve::resolve_character;
pub use compose::actor::{ActorPrompt, compose_actor};
pub use compose::scene::{
    ActorCredits, GeneratedPrompt, RoleAssignments, SCENE_NOT_FOUND_LABEL, expand_scene,
};
pub use foundation::error::{PromptcastError, PromptcastResult};
pub use foundation::text::{
    FRAGMENT_SEPARATOR, PLACEHOLDER_PATTERN, has_placeholder, join_fragments, placeholder_for,
    placeholders_in, strip_placeholders,
};
pub use library::dsl::{ActorBuilder, DatabaseBuilder, DirectionBuilder, SceneBuilder, part};
pub use library::model::{
    Actor, DanglingRef, Database, Direction, ImageMode, Part, PartKind, RenderParams,
    RoleDirection, Scene, SceneRole,
};
pub use store::repository::{
    FsRepository, MemoryRepository, Repository, StorageKey, export_database_json,
    import_database_json, load_json_or, save_json,
};
pub use tasks::materialize::{TaskRecord, filename_prefix, materialize_tasks, write_tasks_json};
pub use tasks::params::RenderParamsOverride;
