use std::collections::BTreeMap;

use crate::{
    character::model::{CharacterBase, CharacterDefinition},
    foundation::error::{PromptcastError, PromptcastResult},
};

/// Resolve a legacy character into a fully realized base record.
///
/// Base records are returned as-is. A variation is a single-level merge: copy the base, take the
/// variation's id and name, merge `hair`/`eyes` field by field and replace `expression`
/// wholesale. A missing character or base fails with
/// [`PromptcastError::EntityNotFound`]; so does a variation whose base is itself a variation.
#[tracing::instrument(skip(characters))]
pub fn resolve_character(
    id: &str,
    characters: &BTreeMap<String, CharacterDefinition>,
) -> PromptcastResult<CharacterBase> {
    let variation = match characters.get(id) {
        None => return Err(PromptcastError::not_found("character", id)),
        Some(CharacterDefinition::Base(base)) => return Ok(base.clone()),
        Some(CharacterDefinition::Variation(v)) => v,
    };

    let base = match characters.get(&variation.base_id) {
        Some(CharacterDefinition::Base(base)) => base,
        Some(CharacterDefinition::Variation(_)) => {
            tracing::warn!(
                variation = %variation.id,
                base = %variation.base_id,
                "variation chains are not supported"
            );
            return Err(PromptcastError::not_found(
                "base character",
                variation.base_id.as_str(),
            ));
        }
        None => {
            return Err(PromptcastError::not_found(
                "base character",
                variation.base_id.as_str(),
            ));
        }
    };

    let mut out = base.clone();
    out.id = variation.id.clone();
    out.name = variation.name.clone();

    let ov = &variation.overrides;
    if let Some(hair) = &ov.hair {
        if let Some(style) = &hair.style {
            out.hair.style = style.clone();
        }
        if let Some(color) = &hair.color {
            out.hair.color = color.clone();
        }
    }
    if let Some(eyes) = &ov.eyes
        && let Some(color) = &eyes.color
    {
        out.eyes.color = color.clone();
    }
    if let Some(expression) = &ov.expression {
        out.expression = expression.clone();
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/character/resolve.rs"]
mod tests;
