//! # Promptcast guide (v0.1.0)
//!
//! This module is a standalone walkthrough of Promptcast's data model and public API. It is meant
//! as a shared mental model of what "expanding a scene" means in this codebase.
//!
//! If you are looking for copy/paste commands, start with the repository `README.md`.
//! If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Part`](crate::Part): an atomic prompt fragment pair (positive + negative) of a
//!   [`PartKind`](crate::PartKind)
//! - [`Actor`](crate::Actor): a performer with default costume, pose and expression parts
//! - [`Direction`](crate::Direction): per-shot overrides of an actor's parts plus an additive
//!   fragment
//! - [`Scene`](crate::Scene): positive/negative templates containing `[R1]`-style placeholders,
//!   shared background/lighting/composition parts, ordered roles, and candidate directions per
//!   role
//! - [`Database`](crate::Database): the read-only snapshot holding all of the above plus
//!   [`RenderParams`](crate::RenderParams)
//!
//! The engine is explicitly staged:
//!
//! 1. Compose one actor under one direction: [`compose_actor`](crate::compose_actor)
//! 2. Expand a scene over the cast: [`expand_scene`](crate::expand_scene)
//! 3. Turn prompts into renderer jobs: [`materialize_tasks`](crate::materialize_tasks)
//!
//! ---
//!
//! ## Building a snapshot (Rust DSL)
//!
//! Snapshots usually come from the editor as JSON, but the builder DSL is handy for tests and
//! programmatic use. Builders reject duplicate ids.
//!
//! ```rust
//! use promptcast::{
//!     ActorBuilder, DatabaseBuilder, DirectionBuilder, ImageMode, PartKind, RoleAssignments,
//!     SceneBuilder, expand_scene, materialize_tasks, part,
//! };
//!
//! # fn main() -> promptcast::PromptcastResult<()> {
//! let db = DatabaseBuilder::new()
//!     .part(PartKind::Background, part("bg_park", "park", ""))?
//!     .actor(
//!         ActorBuilder::new("aoi", "Aoi", "1girl, black hair")
//!             .credits("Work", "Aoi")
//!             .build(),
//!     )?
//!     .direction(DirectionBuilder::new("wave", "Wave", "waving").build())?
//!     .direction(DirectionBuilder::new("sit", "Sit", "sitting").build())?
//!     .scene(
//!         SceneBuilder::new("walk", "masterpiece, [R1]", "lowres")
//!             .name("Walk")
//!             .background("bg_park")
//!             .role("r1", "Lead", ["wave", "sit"])
//!             .build()?,
//!     )?
//!     .build();
//!
//! let cast: RoleAssignments = [("r1", "aoi")].into_iter().collect();
//! let batch = expand_scene("walk", &cast, &db);
//! assert_eq!(batch.len(), 2);
//! assert_eq!(batch[0].label, "Aoi (Wave)");
//! assert_eq!(batch[0].positive, "masterpiece, (1girl, black hair, waving), park");
//! assert_eq!(batch[1].label, "Aoi (Sit)");
//!
//! let tasks = materialize_tasks(&batch, &db.render_params, db.scene("walk"));
//! assert_eq!(tasks[0].filename_prefix, "Work_Aoi_cut1");
//! assert_eq!(tasks[0].mode, ImageMode::Txt2img);
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Actor composition
//!
//! [`compose_actor`](crate::compose_actor) resolves costume, pose and expression: a direction's
//! override wins when present and non-empty, otherwise the actor's default is used. Fragments are
//! concatenated in a fixed order:
//!
//! 1. actor
//! 2. costume
//! 3. pose
//! 4. expression
//! 5. direction
//!
//! Empty fragments and unresolved ids contribute nothing. An unknown direction id behaves like
//! "no direction" and labels the result `"<name> (base)"`.
//!
//! ---
//!
//! ## Scene expansion
//!
//! [`expand_scene`](crate::expand_scene) takes a scene id and a
//! [`RoleAssignments`](crate::RoleAssignments) map:
//!
//! - only roles with a non-empty assigned actor id participate ("cast roles")
//! - each cast role contributes its candidate directions; no candidates means one branch using
//!   the actor's base state
//! - the batch is the cartesian product over cast roles in scene declaration order, first role
//!   varying slowest; `cut` numbers are 1-based
//! - each placeholder is substituted once (first occurrence) with `(<actor fragment>)`, then
//!   every remaining `[A-Z0-9]+` placeholder is removed
//!
//! Separators around a removed placeholder are left as-is, so `"a, [R2], b"` becomes `"a, , b"`.
//!
//! Missing references never fail an expansion. Unknown parts, directions and actors are skipped;
//! an unknown scene yields one diagnostic result labelled
//! [`SCENE_NOT_FOUND_LABEL`](crate::SCENE_NOT_FOUND_LABEL).
//!
//! Expansion is deterministic: the same snapshot and assignments always yield an equal batch,
//! whatever order the assignments were inserted in.
//!
//! ---
//!
//! ## Render tasks
//!
//! [`materialize_tasks`](crate::materialize_tasks) maps each prompt to a
//! [`TaskRecord`](crate::TaskRecord), the JSON contract of the external renderer:
//!
//! - an empty reference image path forces `txt2img` and an empty source path
//! - `denoising_strength` is only set for img2img modes and serializes as `""` otherwise
//! - `seed = -1` is forwarded verbatim
//! - `filename_prefix` is `"<work>_<character>_cut<n>"` from the first cast actor, or
//!   `"output_<n>"`
//!
//! Per-run settings can be layered over the snapshot's parameters with
//! [`RenderParamsOverride`](crate::RenderParamsOverride).
//!
//! ---
//!
//! ## Legacy characters
//!
//! The older single-prompt flow keeps characters, clothing and backgrounds as structured records.
//! A [`CharacterDefinition`](crate::CharacterDefinition) is either a base record or a variation
//! holding partial overrides. [`resolve_character`](crate::resolve_character) merges a variation
//! onto its base (hair and eyes per field, expression wholesale) and is the only API that fails
//! with [`PromptcastError::EntityNotFound`](crate::PromptcastError::EntityNotFound).
//! [`generate_legacy_prompt`](crate::generate_legacy_prompt) builds one prompt from a selection.
//!
//! ---
//!
//! ## Persistence
//!
//! The engine never reads or writes storage. Editors persist snapshots through a
//! [`Repository`](crate::Repository) ([`MemoryRepository`](crate::MemoryRepository),
//! [`FsRepository`](crate::FsRepository)) using [`save_json`](crate::save_json) and
//! [`load_json_or`](crate::load_json_or), which falls back to a default when a stored value is
//! missing or unreadable.
