use std::collections::BTreeMap;

use crate::{
    foundation::error::{PromptcastError, PromptcastResult},
    library::model::{
        Actor, Database, Direction, ImageMode, Part, PartKind, RenderParams, RoleDirection, Scene,
        SceneRole,
    },
};

/// Build a simple [`Part`] with a positive and negative fragment.
pub fn part(
    id: impl Into<String>,
    prompt: impl Into<String>,
    negative_prompt: impl Into<String>,
) -> Part {
    let id = id.into();
    Part {
        name: id.clone(),
        id,
        tags: Vec::new(),
        prompt: prompt.into(),
        negative_prompt: negative_prompt.into(),
    }
}

/// Builder for a [`Database`] snapshot that rejects duplicate ids.
pub struct DatabaseBuilder {
    db: Database,
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseBuilder {
    /// Start from an empty snapshot with default render parameters.
    pub fn new() -> Self {
        Self {
            db: Database::default(),
        }
    }

    /// Add a part of `kind`.
    pub fn part(mut self, kind: PartKind, part: Part) -> PromptcastResult<Self> {
        insert_unique(self.db.parts_mut(kind), kind.label(), part.id.clone(), part)?;
        Ok(self)
    }

    /// Add an actor.
    pub fn actor(mut self, actor: Actor) -> PromptcastResult<Self> {
        insert_unique(&mut self.db.actors, "actor", actor.id.clone(), actor)?;
        Ok(self)
    }

    /// Add a direction.
    pub fn direction(mut self, direction: Direction) -> PromptcastResult<Self> {
        insert_unique(
            &mut self.db.directions,
            "direction",
            direction.id.clone(),
            direction,
        )?;
        Ok(self)
    }

    /// Add a scene.
    pub fn scene(mut self, scene: Scene) -> PromptcastResult<Self> {
        insert_unique(&mut self.db.scenes, "scene", scene.id.clone(), scene)?;
        Ok(self)
    }

    /// Replace the render parameters.
    pub fn render_params(mut self, params: RenderParams) -> Self {
        self.db.render_params = params;
        self
    }

    /// Finish the snapshot.
    pub fn build(self) -> Database {
        self.db
    }
}

fn insert_unique<T>(
    map: &mut BTreeMap<String, T>,
    kind: &str,
    id: String,
    value: T,
) -> PromptcastResult<()> {
    if id.trim().is_empty() {
        return Err(PromptcastError::validation(format!(
            "{kind} id must be non-empty"
        )));
    }
    if map.contains_key(&id) {
        return Err(PromptcastError::validation(format!(
            "duplicate {kind} id '{id}'"
        )));
    }
    map.insert(id, value);
    Ok(())
}

/// Builder for an [`Actor`].
pub struct ActorBuilder {
    actor: Actor,
}

impl ActorBuilder {
    /// Start an actor with id, display name and positive fragment.
    pub fn new(id: impl Into<String>, name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            actor: Actor {
                id: id.into(),
                name: name.into(),
                prompt: prompt.into(),
                ..Actor::default()
            },
        }
    }

    pub fn negative(mut self, negative_prompt: impl Into<String>) -> Self {
        self.actor.negative_prompt = negative_prompt.into();
        self
    }

    pub fn costume(mut self, id: impl Into<String>) -> Self {
        self.actor.base_costume_id = id.into();
        self
    }

    pub fn pose(mut self, id: impl Into<String>) -> Self {
        self.actor.base_pose_id = id.into();
        self
    }

    pub fn expression(mut self, id: impl Into<String>) -> Self {
        self.actor.base_expression_id = id.into();
        self
    }

    /// Set the work title and character name used for output filenames.
    pub fn credits(mut self, work_title: impl Into<String>, character_name: impl Into<String>) -> Self {
        self.actor.work_title = work_title.into();
        self.actor.character_name = character_name.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.actor.tags.push(tag.into());
        self
    }

    pub fn build(self) -> Actor {
        self.actor
    }
}

/// Builder for a [`Direction`].
pub struct DirectionBuilder {
    direction: Direction,
}

impl DirectionBuilder {
    /// Start a direction with id, display name and additive positive fragment.
    pub fn new(id: impl Into<String>, name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            direction: Direction {
                id: id.into(),
                name: name.into(),
                prompt: prompt.into(),
                ..Direction::default()
            },
        }
    }

    pub fn negative(mut self, negative_prompt: impl Into<String>) -> Self {
        self.direction.negative_prompt = negative_prompt.into();
        self
    }

    pub fn costume(mut self, id: impl Into<String>) -> Self {
        self.direction.costume_id = Some(id.into());
        self
    }

    pub fn pose(mut self, id: impl Into<String>) -> Self {
        self.direction.pose_id = Some(id.into());
        self
    }

    pub fn expression(mut self, id: impl Into<String>) -> Self {
        self.direction.expression_id = Some(id.into());
        self
    }

    pub fn build(self) -> Direction {
        self.direction
    }
}

/// Builder for a [`Scene`].
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Start a scene with positive and negative templates.
    pub fn new(
        id: impl Into<String>,
        prompt_template: impl Into<String>,
        negative_template: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            scene: Scene {
                name: id.clone(),
                id,
                prompt_template: prompt_template.into(),
                negative_template: negative_template.into(),
                ..Scene::default()
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.scene.name = name.into();
        self
    }

    pub fn background(mut self, id: impl Into<String>) -> Self {
        self.scene.background_id = id.into();
        self
    }

    pub fn lighting(mut self, id: impl Into<String>) -> Self {
        self.scene.lighting_id = id.into();
        self
    }

    pub fn composition(mut self, id: impl Into<String>) -> Self {
        self.scene.composition_id = id.into();
        self
    }

    /// Declare a role with its candidate directions (empty = actor base state only).
    pub fn role<I, S>(mut self, id: impl Into<String>, name_in_scene: impl Into<String>, directions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        self.scene.role_directions.push(RoleDirection {
            role_id: id.clone(),
            direction_ids: directions.into_iter().map(Into::into).collect(),
        });
        self.scene.roles.push(SceneRole {
            id,
            name_in_scene: name_in_scene.into(),
        });
        self
    }

    /// Declare a role without any direction binding.
    pub fn unbound_role(mut self, id: impl Into<String>, name_in_scene: impl Into<String>) -> Self {
        self.scene.roles.push(SceneRole {
            id: id.into(),
            name_in_scene: name_in_scene.into(),
        });
        self
    }

    /// Set the reference image and nominal mode.
    pub fn reference(mut self, path: impl Into<String>, mode: ImageMode) -> Self {
        self.scene.reference_image_path = path.into();
        self.scene.image_mode = mode;
        self
    }

    /// Finish the scene, rejecting duplicate role ids.
    pub fn build(self) -> PromptcastResult<Scene> {
        for (i, role) in self.scene.roles.iter().enumerate() {
            if role.id.trim().is_empty() {
                return Err(PromptcastError::validation("role id must be non-empty"));
            }
            if self.scene.roles[..i].iter().any(|r| r.id == role.id) {
                return Err(PromptcastError::validation(format!(
                    "scene '{}' declares role '{}' twice",
                    self.scene.id, role.id
                )));
            }
        }
        Ok(self.scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/library/dsl.rs"]
mod tests;
