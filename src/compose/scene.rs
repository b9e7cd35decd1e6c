use std::collections::HashMap;

use crate::{
    compose::actor::compose_actor,
    foundation::text::{join_fragments, placeholder_for, replace_first, strip_placeholders},
    library::model::{Actor, Database, PartKind, Scene},
};

/// Label carried by the diagnostic result emitted for an unknown scene.
pub const SCENE_NOT_FOUND_LABEL: &str = "Error";

/// Role id to actor id mapping chosen by the user for one expansion.
///
/// Deliberately unordered: expansion order always follows the scene's declared role list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleAssignments {
    by_role: HashMap<String, String>,
}

impl RoleAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast `actor_id` in `role_id`, replacing any previous assignment.
    pub fn assign(&mut self, role_id: impl Into<String>, actor_id: impl Into<String>) {
        self.by_role.insert(role_id.into(), actor_id.into());
    }

    /// Actor assigned to `role_id`. Empty actor ids count as unassigned.
    pub fn actor_for(&self, role_id: &str) -> Option<&str> {
        self.by_role
            .get(role_id)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

impl<R: Into<String>, A: Into<String>> FromIterator<(R, A)> for RoleAssignments {
    fn from_iter<T: IntoIterator<Item = (R, A)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (role, actor) in iter {
            out.assign(role, actor);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Filename metadata of the first cast actor.
pub struct ActorCredits {
    pub work_title: String,
    pub character_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One fully substituted prompt variant ("cut") of a scene batch.
pub struct GeneratedPrompt {
    /// 1-based position in the batch.
    pub cut: u32,
    /// Composer labels of the cast joined with `" & "`.
    pub label: String,
    /// Final positive prompt.
    pub positive: String,
    /// Final negative prompt.
    pub negative: String,
    /// Credits of the earliest cast role (in scene order) whose actor resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_actor: Option<ActorCredits>,
}

impl GeneratedPrompt {
    /// Whether this is the stand-in result for an unknown scene.
    pub fn is_diagnostic(&self) -> bool {
        self.label == SCENE_NOT_FOUND_LABEL
    }

    fn scene_not_found(scene_id: &str) -> Self {
        Self {
            cut: 1,
            label: SCENE_NOT_FOUND_LABEL.to_string(),
            positive: format!("Error: scene '{scene_id}' not found"),
            negative: String::new(),
            first_actor: None,
        }
    }
}

// A role that has an actor assigned, in scene order.
struct CastSlot<'a> {
    placeholder: String,
    actor: Option<&'a Actor>,
    candidates: Vec<&'a str>,
}

/// Expand a scene over every combination of per-role direction candidates.
///
/// Output order is the nested-loop order over cast roles in scene declaration order: the first
/// cast role varies slowest. Each role's placeholder is substituted once (first occurrence only)
/// with the parenthesized actor fragment, then every leftover placeholder is stripped. An
/// unknown scene yields a single diagnostic result instead of an error.
#[tracing::instrument(skip(assignments, db))]
pub fn expand_scene(
    scene_id: &str,
    assignments: &RoleAssignments,
    db: &Database,
) -> Vec<GeneratedPrompt> {
    let Some(scene) = db.scene(scene_id) else {
        tracing::warn!(scene = %scene_id, "scene not found");
        return vec![GeneratedPrompt::scene_not_found(scene_id)];
    };

    let (base_positive, base_negative) = common_base(scene, db);
    let cast = cast_slots(scene, assignments, db);

    if cast.is_empty() {
        return vec![GeneratedPrompt {
            cut: 1,
            label: scene.name.clone(),
            positive: strip_placeholders(&base_positive),
            negative: strip_placeholders(&base_negative),
            first_actor: None,
        }];
    }

    let first_actor = cast
        .iter()
        .find_map(|slot| slot.actor)
        .map(|a| ActorCredits {
            work_title: a.work_title.clone(),
            character_name: a.character_name.clone(),
        });

    let lengths = cast.iter().map(|s| s.candidates.len()).collect::<Vec<_>>();
    let mut out = Vec::new();

    for (idx, choice) in CartesianIndices::new(lengths).enumerate() {
        let mut positive = base_positive.clone();
        let mut negative = base_negative.clone();
        let mut labels = Vec::with_capacity(cast.len());

        for (slot, &pick) in cast.iter().zip(&choice) {
            let Some(actor) = slot.actor else {
                continue;
            };
            let composed = compose_actor(actor, slot.candidates[pick], db);
            positive = replace_first(
                &positive,
                &slot.placeholder,
                &format!("({})", composed.positive),
            );
            negative = replace_first(
                &negative,
                &slot.placeholder,
                &format!("({})", composed.negative),
            );
            labels.push(composed.label);
        }

        out.push(GeneratedPrompt {
            cut: u32::try_from(idx + 1).unwrap_or(u32::MAX),
            label: labels.join(" & "),
            positive: strip_placeholders(&positive),
            negative: strip_placeholders(&negative),
            first_actor: first_actor.clone(),
        });
    }

    tracing::debug!(scene = %scene_id, cuts = out.len(), "scene expanded");
    out
}

// Template plus background, lighting and composition fragments; placeholders still present.
fn common_base(scene: &Scene, db: &Database) -> (String, String) {
    let shared = [
        (PartKind::Background, &scene.background_id),
        (PartKind::Lighting, &scene.lighting_id),
        (PartKind::Composition, &scene.composition_id),
    ]
    .into_iter()
    .filter_map(|(kind, id)| {
        let part = db.part(kind, id);
        if part.is_none() && !id.is_empty() {
            tracing::debug!(scene = %scene.id, kind = kind.label(), %id, "part not found; skipped");
        }
        part
    })
    .collect::<Vec<_>>();

    let positive = join_fragments(
        std::iter::once(scene.prompt_template.as_str())
            .chain(shared.iter().map(|p| p.prompt.as_str())),
    );
    let negative = join_fragments(
        std::iter::once(scene.negative_template.as_str())
            .chain(shared.iter().map(|p| p.negative_prompt.as_str())),
    );
    (positive, negative)
}

fn cast_slots<'a>(
    scene: &'a Scene,
    assignments: &RoleAssignments,
    db: &'a Database,
) -> Vec<CastSlot<'a>> {
    let mut slots = Vec::new();
    for role in &scene.roles {
        let Some(actor_id) = assignments.actor_for(&role.id) else {
            continue;
        };
        let actor = db.actor(actor_id);
        if actor.is_none() {
            tracing::debug!(scene = %scene.id, role = %role.id, actor = %actor_id, "actor not found; role contributes nothing");
        }

        let mut candidates = scene
            .directions_for(&role.id)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        if candidates.is_empty() {
            candidates.push("");
        }

        slots.push(CastSlot {
            placeholder: placeholder_for(&role.id),
            actor,
            candidates,
        });
    }
    slots
}

/// Odometer over index tuples; the last position varies fastest.
struct CartesianIndices {
    lengths: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl CartesianIndices {
    fn new(lengths: Vec<usize>) -> Self {
        let next = if lengths.contains(&0) {
            None
        } else {
            Some(vec![0; lengths.len()])
        };
        Self { lengths, next }
    }
}

impl Iterator for CartesianIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        let mut advanced = current.clone();
        let mut pos = advanced.len();
        while pos > 0 {
            pos -= 1;
            advanced[pos] += 1;
            if advanced[pos] < self.lengths[pos] {
                self.next = Some(advanced);
                break;
            }
            advanced[pos] = 0;
        }

        Some(current)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/scene.rs"]
mod tests;
