//! Single-prompt composition over the legacy character/clothing/background library.

use crate::{
    character::model::{BackgroundDefinition, CharacterBase, ClothingDefinition, LegacyLibrary},
    character::resolve::resolve_character,
    foundation::error::PromptcastResult,
    foundation::text::join_fragments,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Which records to combine.
pub struct LegacySelection {
    pub character_id: String,
    pub clothing_id: String,
    pub background_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Per-section include switches.
pub struct IncludeFlags {
    pub character: bool,
    pub clothing: bool,
    pub background: bool,
}

impl Default for IncludeFlags {
    fn default() -> Self {
        Self {
            character: true,
            clothing: true,
            background: true,
        }
    }
}

/// Compose one positive prompt from the selected legacy records.
///
/// Sections are emitted in character, clothing, background order. A missing clothing or
/// background record contributes nothing; a missing character fails through
/// [`resolve_character`].
pub fn generate_legacy_prompt(
    selection: &LegacySelection,
    flags: IncludeFlags,
    library: &LegacyLibrary,
) -> PromptcastResult<String> {
    let mut fragments = Vec::<String>::new();

    if flags.character {
        let character = resolve_character(&selection.character_id, &library.characters)?;
        fragments.extend(character_fragments(&character));
    }
    if flags.clothing
        && let Some(clothing) = library.clothing.get(&selection.clothing_id)
    {
        fragments.extend(clothing_fragments(clothing));
    }
    if flags.background
        && let Some(background) = library.backgrounds.get(&selection.background_id)
    {
        fragments.extend(background_fragments(background));
    }

    Ok(join_fragments(fragments.iter().map(String::as_str)))
}

fn character_fragments(c: &CharacterBase) -> Vec<String> {
    vec![
        c.gender.clone(),
        c.age.clone(),
        described(&[c.hair.color.as_str(), c.hair.style.as_str()], "hair"),
        described(&[c.eyes.color.as_str()], "eyes"),
        c.expression.clone(),
    ]
}

fn clothing_fragments(c: &ClothingDefinition) -> Vec<String> {
    let mut out = vec![c.style.clone(), c.top.clone(), c.bottom.clone()];
    if let Some(acc) = &c.accessory {
        out.push(acc.clone());
    }
    out
}

fn background_fragments(b: &BackgroundDefinition) -> Vec<String> {
    vec![b.location.clone(), b.time.clone(), b.weather.clone()]
}

// "brown long hair"; empty when every qualifier is empty.
fn described(qualifiers: &[&str], noun: &str) -> String {
    let words = qualifiers
        .iter()
        .copied()
        .filter(|q| !q.is_empty())
        .collect::<Vec<_>>();
    if words.is_empty() {
        return String::new();
    }
    format!("{} {noun}", words.join(" "))
}

#[cfg(test)]
#[path = "../../tests/unit/character/legacy.rs"]
mod tests;
