use std::collections::BTreeMap;

use crate::foundation::text::placeholders_in;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// An atomic reusable prompt part (costume, pose, expression, background, lighting, composition).
pub struct Part {
    /// Stable identifier (map key in the owning [`Database`] section).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Positive prompt fragment.
    #[serde(default)]
    pub prompt: String,
    /// Negative prompt fragment.
    #[serde(default)]
    pub negative_prompt: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A reusable performer with default costume, pose and expression.
pub struct Actor {
    /// Stable identifier.
    pub id: String,
    /// Display name; also the prefix of composed labels.
    pub name: String,
    /// Free-text search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Positive prompt fragment describing the actor.
    #[serde(default)]
    pub prompt: String,
    /// Negative prompt fragment.
    #[serde(default)]
    pub negative_prompt: String,
    /// Default costume part id.
    #[serde(default)]
    pub base_costume_id: String,
    /// Default pose part id.
    #[serde(default)]
    pub base_pose_id: String,
    /// Default expression part id.
    #[serde(default)]
    pub base_expression_id: String,
    /// Work title, used only for output filenames.
    #[serde(default)]
    pub work_title: String,
    /// Character name, used only for output filenames.
    #[serde(default)]
    pub character_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A staging variant for a role: optional part overrides plus an additive prompt fragment.
pub struct Direction {
    /// Stable identifier.
    pub id: String,
    /// Display name; appears in composed labels.
    pub name: String,
    /// Free-text search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Positive fragment appended after the resolved parts.
    #[serde(default)]
    pub prompt: String,
    /// Negative fragment appended after the resolved parts.
    #[serde(default)]
    pub negative_prompt: String,
    /// Costume override; absent (or empty) means "use the actor's default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costume_id: Option<String>,
    /// Pose override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_id: Option<String>,
    /// Expression override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_id: Option<String>,
}

impl Direction {
    /// Costume override id, ignoring empty strings.
    pub fn costume_override(&self) -> Option<&str> {
        non_empty(self.costume_id.as_deref())
    }

    /// Pose override id, ignoring empty strings.
    pub fn pose_override(&self) -> Option<&str> {
        non_empty(self.pose_id.as_deref())
    }

    /// Expression override id, ignoring empty strings.
    pub fn expression_override(&self) -> Option<&str> {
        non_empty(self.expression_id.as_deref())
    }
}

fn non_empty(id: Option<&str>) -> Option<&str> {
    id.filter(|s| !s.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A named slot in a scene template.
pub struct SceneRole {
    /// Short role token (e.g. `"r1"`); its uppercase form is the placeholder.
    pub id: String,
    /// Human-readable name of the slot inside the scene.
    #[serde(default)]
    pub name_in_scene: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Candidate directions for one role, in expansion order.
pub struct RoleDirection {
    /// Role id the binding applies to.
    pub role_id: String,
    /// Ordered candidate direction ids. Empty means "actor base state only".
    #[serde(default)]
    pub direction_ids: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Image generation mode requested from the external renderer.
pub enum ImageMode {
    /// Pure text-to-image.
    #[default]
    Txt2img,
    /// Image-to-image from the scene's reference image.
    Img2img,
    /// Image-to-image refinement pass.
    Img2imgPolish,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A scene template with roles, shared parts and per-role direction candidates.
pub struct Scene {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Positive template containing `[ROLE]` placeholders.
    #[serde(default)]
    pub prompt_template: String,
    /// Negative template containing `[ROLE]` placeholders.
    #[serde(default)]
    pub negative_template: String,
    /// Background part id.
    #[serde(default)]
    pub background_id: String,
    /// Lighting part id.
    #[serde(default)]
    pub lighting_id: String,
    /// Composition part id.
    #[serde(default)]
    pub composition_id: String,
    /// Roles in authoritative order.
    #[serde(default)]
    pub roles: Vec<SceneRole>,
    /// Direction candidates per role.
    #[serde(default)]
    pub role_directions: Vec<RoleDirection>,
    /// Reference image for img2img modes; empty forces txt2img.
    #[serde(default)]
    pub reference_image_path: String,
    /// Nominal image mode.
    #[serde(default)]
    pub image_mode: ImageMode,
}

impl Scene {
    /// Candidate direction ids bound to `role_id`, if a binding exists.
    pub fn directions_for(&self, role_id: &str) -> Option<&[String]> {
        self.role_directions
            .iter()
            .find(|rd| rd.role_id == role_id)
            .map(|rd| rd.direction_ids.as_slice())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Global render settings forwarded to every task.
pub struct RenderParams {
    /// Sampling steps.
    pub steps: u32,
    /// Sampler name understood by the renderer.
    pub sampler_name: String,
    /// Classifier-free guidance scale.
    pub cfg_scale: f64,
    /// Seed; `-1` asks the renderer to pick one.
    pub seed: i64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Denoising strength for img2img modes.
    pub denoising_strength: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            steps: 20,
            sampler_name: "Euler a".to_string(),
            cfg_scale: 7.0,
            seed: -1,
            width: 512,
            height: 768,
            denoising_strength: 0.6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Kinds of simple parts stored in a [`Database`].
pub enum PartKind {
    /// Costume parts.
    Costume,
    /// Pose parts.
    Pose,
    /// Expression parts.
    Expression,
    /// Background parts.
    Background,
    /// Lighting parts.
    Lighting,
    /// Composition (framing) parts.
    Composition,
}

impl PartKind {
    /// Singular label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Costume => "costume",
            Self::Pose => "pose",
            Self::Expression => "expression",
            Self::Background => "background",
            Self::Lighting => "lighting",
            Self::Composition => "composition",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Read-only snapshot of the part library, scenes and render settings.
///
/// The editor owns mutation; the engine only reads. Maps are keyed by entity id and ordered so
/// iteration (search, audit, export) is stable.
pub struct Database {
    /// Costume parts.
    pub costumes: BTreeMap<String, Part>,
    /// Pose parts.
    pub poses: BTreeMap<String, Part>,
    /// Expression parts.
    pub expressions: BTreeMap<String, Part>,
    /// Background parts.
    pub backgrounds: BTreeMap<String, Part>,
    /// Lighting parts.
    pub lighting: BTreeMap<String, Part>,
    /// Composition parts.
    pub compositions: BTreeMap<String, Part>,
    /// Directions.
    pub directions: BTreeMap<String, Direction>,
    /// Actors.
    pub actors: BTreeMap<String, Actor>,
    /// Scenes.
    pub scenes: BTreeMap<String, Scene>,
    /// Global render settings.
    pub render_params: RenderParams,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A referenced id that does not resolve in the snapshot.
pub struct DanglingRef {
    /// Where the reference lives, e.g. `"actor 'a1' base_pose_id"`.
    pub owner: String,
    /// Kind of entity expected.
    pub expected: &'static str,
    /// The unresolved id.
    pub id: String,
}

impl std::fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> missing {} '{}'",
            self.owner, self.expected, self.id
        )
    }
}

impl Database {
    /// Map holding parts of `kind`.
    pub fn parts(&self, kind: PartKind) -> &BTreeMap<String, Part> {
        match kind {
            PartKind::Costume => &self.costumes,
            PartKind::Pose => &self.poses,
            PartKind::Expression => &self.expressions,
            PartKind::Background => &self.backgrounds,
            PartKind::Lighting => &self.lighting,
            PartKind::Composition => &self.compositions,
        }
    }

    pub(crate) fn parts_mut(&mut self, kind: PartKind) -> &mut BTreeMap<String, Part> {
        match kind {
            PartKind::Costume => &mut self.costumes,
            PartKind::Pose => &mut self.poses,
            PartKind::Expression => &mut self.expressions,
            PartKind::Background => &mut self.backgrounds,
            PartKind::Lighting => &mut self.lighting,
            PartKind::Composition => &mut self.compositions,
        }
    }

    /// Look up a part; empty ids never resolve.
    pub fn part(&self, kind: PartKind, id: &str) -> Option<&Part> {
        if id.is_empty() {
            return None;
        }
        self.parts(kind).get(id)
    }

    /// Look up an actor.
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Look up a direction; empty ids never resolve.
    pub fn direction(&self, id: &str) -> Option<&Direction> {
        if id.is_empty() {
            return None;
        }
        self.directions.get(id)
    }

    /// Look up a scene.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Parts of `kind` whose name or any tag contains `query`, in id order.
    ///
    /// An empty query matches everything.
    pub fn search(&self, kind: PartKind, query: &str) -> Vec<&Part> {
        self.parts(kind)
            .values()
            .filter(|p| matches_query(&p.name, &p.tags, query))
            .collect()
    }

    /// Every reference that fails to resolve.
    ///
    /// Informational: expansion tolerates all of these and treats them as "no contribution".
    pub fn dangling_references(&self) -> Vec<DanglingRef> {
        let mut out = Vec::new();

        for actor in self.actors.values() {
            for (field, kind, id) in [
                ("base_costume_id", PartKind::Costume, &actor.base_costume_id),
                ("base_pose_id", PartKind::Pose, &actor.base_pose_id),
                (
                    "base_expression_id",
                    PartKind::Expression,
                    &actor.base_expression_id,
                ),
            ] {
                if !id.is_empty() && self.part(kind, id).is_none() {
                    out.push(DanglingRef {
                        owner: format!("actor '{}' {field}", actor.id),
                        expected: kind.label(),
                        id: id.clone(),
                    });
                }
            }
        }

        for dir in self.directions.values() {
            for (field, kind, id) in [
                ("costume_id", PartKind::Costume, dir.costume_override()),
                ("pose_id", PartKind::Pose, dir.pose_override()),
                ("expression_id", PartKind::Expression, dir.expression_override()),
            ] {
                if let Some(id) = id
                    && self.part(kind, id).is_none()
                {
                    out.push(DanglingRef {
                        owner: format!("direction '{}' {field}", dir.id),
                        expected: kind.label(),
                        id: id.to_string(),
                    });
                }
            }
        }

        for scene in self.scenes.values() {
            for (field, kind, id) in [
                ("background_id", PartKind::Background, &scene.background_id),
                ("lighting_id", PartKind::Lighting, &scene.lighting_id),
                ("composition_id", PartKind::Composition, &scene.composition_id),
            ] {
                if !id.is_empty() && self.part(kind, id).is_none() {
                    out.push(DanglingRef {
                        owner: format!("scene '{}' {field}", scene.id),
                        expected: kind.label(),
                        id: id.clone(),
                    });
                }
            }

            for rd in &scene.role_directions {
                if !scene.roles.iter().any(|r| r.id == rd.role_id) {
                    out.push(DanglingRef {
                        owner: format!("scene '{}' role_directions", scene.id),
                        expected: "role",
                        id: rd.role_id.clone(),
                    });
                }
                for dir_id in &rd.direction_ids {
                    if self.direction(dir_id).is_none() {
                        out.push(DanglingRef {
                            owner: format!("scene '{}' role '{}'", scene.id, rd.role_id),
                            expected: "direction",
                            id: dir_id.clone(),
                        });
                    }
                }
            }

            let declared = scene
                .roles
                .iter()
                .map(|r| crate::foundation::text::placeholder_for(&r.id))
                .collect::<Vec<_>>();
            let mut seen = Vec::<String>::new();
            for token in placeholders_in(&scene.prompt_template)
                .into_iter()
                .chain(placeholders_in(&scene.negative_template))
            {
                if !declared.contains(&token) && !seen.contains(&token) {
                    out.push(DanglingRef {
                        owner: format!("scene '{}' template", scene.id),
                        expected: "role",
                        id: token.clone(),
                    });
                    seen.push(token);
                }
            }
        }

        out
    }
}

pub(crate) fn matches_query(name: &str, tags: &[String], query: &str) -> bool {
    query.is_empty() || name.contains(query) || tags.iter().any(|t| t.contains(query))
}

#[cfg(test)]
#[path = "../../tests/unit/library/model.rs"]
mod tests;
