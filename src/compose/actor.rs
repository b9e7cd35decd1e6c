use crate::{
    foundation::text::join_fragments,
    library::model::{Actor, Database, Direction, Part, PartKind},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// One actor rendered under one direction (or its base state).
pub struct ActorPrompt {
    /// `"<actor> (base)"` or `"<actor> (<direction>)"`.
    pub label: String,
    /// Positive fragments joined in contribution order.
    pub positive: String,
    /// Negative fragments joined in contribution order.
    pub negative: String,
}

// Fragment view shared by actors, parts and directions.
struct Contribution<'a> {
    prompt: &'a str,
    negative: &'a str,
}

impl<'a> From<&'a Part> for Contribution<'a> {
    fn from(p: &'a Part) -> Self {
        Self {
            prompt: &p.prompt,
            negative: &p.negative_prompt,
        }
    }
}

impl<'a> From<&'a Actor> for Contribution<'a> {
    fn from(a: &'a Actor) -> Self {
        Self {
            prompt: &a.prompt,
            negative: &a.negative_prompt,
        }
    }
}

impl<'a> From<&'a Direction> for Contribution<'a> {
    fn from(d: &'a Direction) -> Self {
        Self {
            prompt: &d.prompt,
            negative: &d.negative_prompt,
        }
    }
}

/// Compose an actor under `direction_id`.
///
/// Contribution order is fixed and part of the output contract:
/// actor, costume, pose, expression, then the direction's own fragment. Without a resolvable
/// direction the actor's base costume/pose/expression are used and nothing is appended. Parts
/// that fail to resolve are skipped.
pub fn compose_actor(actor: &Actor, direction_id: &str, db: &Database) -> ActorPrompt {
    let direction = db.direction(direction_id);
    if direction.is_none() && !direction_id.is_empty() {
        tracing::debug!(
            actor = %actor.id,
            direction = %direction_id,
            "direction not found; composing base state"
        );
    }

    let costume_id = direction
        .and_then(Direction::costume_override)
        .unwrap_or(&actor.base_costume_id);
    let pose_id = direction
        .and_then(Direction::pose_override)
        .unwrap_or(&actor.base_pose_id);
    let expression_id = direction
        .and_then(Direction::expression_override)
        .unwrap_or(&actor.base_expression_id);

    let mut parts = Vec::<Contribution<'_>>::with_capacity(5);
    parts.push(actor.into());
    for (kind, id) in [
        (PartKind::Costume, costume_id),
        (PartKind::Pose, pose_id),
        (PartKind::Expression, expression_id),
    ] {
        match db.part(kind, id) {
            Some(part) => parts.push(part.into()),
            None if !id.is_empty() => {
                tracing::debug!(actor = %actor.id, kind = kind.label(), id, "part not found; skipped");
            }
            None => {}
        }
    }
    if let Some(dir) = direction {
        parts.push(dir.into());
    }

    let label = match direction {
        Some(dir) => format!("{} ({})", actor.name, dir.name),
        None => format!("{} (base)", actor.name),
    };

    ActorPrompt {
        label,
        positive: join_fragments(parts.iter().map(|c| c.prompt)),
        negative: join_fragments(parts.iter().map(|c| c.negative)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/actor.rs"]
mod tests;
