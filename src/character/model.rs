use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Hair description.
pub struct Hair {
    /// Hair style (e.g. `"ponytail"`).
    pub style: String,
    /// Hair color.
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Eye description.
pub struct Eyes {
    /// Eye color.
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Field-by-field hair override; absent fields keep the base value.
pub struct HairOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Field-by-field eye override.
pub struct EyesOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Partial payload applied on top of a base character.
///
/// `gender` and `age` are not overridable.
pub struct CharacterOverrides {
    /// Merged per field into the base hair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair: Option<HairOverride>,
    /// Merged per field into the base eyes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<EyesOverride>,
    /// Replaces the base expression wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A fully realized character record.
pub struct CharacterBase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub gender: String,
    pub age: String,
    pub hair: Hair,
    pub eyes: Eyes,
    pub expression: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A character defined as overrides on top of a base record.
pub struct CharacterVariation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Id of the base record. Must name a base, not another variation.
    pub base_id: String,
    #[serde(default)]
    pub overrides: CharacterOverrides,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A legacy character entry: either a base record or a variation of one.
pub enum CharacterDefinition {
    /// Self-contained record.
    Base(CharacterBase),
    /// Overrides applied to a base record.
    Variation(CharacterVariation),
}

impl CharacterDefinition {
    pub fn id(&self) -> &str {
        match self {
            Self::Base(c) => &c.id,
            Self::Variation(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Base(c) => &c.name,
            Self::Variation(c) => &c.name,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Base(c) => &c.tags,
            Self::Variation(c) => &c.tags,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Legacy clothing record.
pub struct ClothingDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub style: String,
    pub top: String,
    pub bottom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Legacy background record.
pub struct BackgroundDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: String,
    pub time: String,
    pub weather: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// The legacy character/clothing/background library.
pub struct LegacyLibrary {
    pub characters: BTreeMap<String, CharacterDefinition>,
    pub clothing: BTreeMap<String, ClothingDefinition>,
    pub backgrounds: BTreeMap<String, BackgroundDefinition>,
}

impl LegacyLibrary {
    /// Characters whose name or any tag contains `query`, in id order.
    pub fn search_characters(&self, query: &str) -> Vec<&CharacterDefinition> {
        self.characters
            .values()
            .filter(|c| crate::library::model::matches_query(c.name(), c.tags(), query))
            .collect()
    }
}
