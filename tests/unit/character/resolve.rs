use super::*;
use crate::character::model::{
    CharacterOverrides, CharacterVariation, Eyes, EyesOverride, Hair, HairOverride,
};

fn base_a() -> CharacterBase {
    CharacterBase {
        id: "char_base_001".to_string(),
        name: "Base A".to_string(),
        tags: vec!["female".to_string()],
        gender: "1girl".to_string(),
        age: "20s".to_string(),
        hair: Hair {
            style: "long".to_string(),
            color: "brown".to_string(),
        },
        eyes: Eyes {
            color: "blue".to_string(),
        },
        expression: "neutral".to_string(),
    }
}

fn variation(id: &str, base_id: &str, overrides: CharacterOverrides) -> CharacterDefinition {
    CharacterDefinition::Variation(CharacterVariation {
        id: id.to_string(),
        name: format!("{id} name"),
        tags: vec!["variation".to_string()],
        base_id: base_id.to_string(),
        overrides,
    })
}

fn library() -> BTreeMap<String, CharacterDefinition> {
    let mut map = BTreeMap::new();
    map.insert(
        "char_base_001".to_string(),
        CharacterDefinition::Base(base_a()),
    );
    map.insert(
        "char_var_002".to_string(),
        variation(
            "char_var_002",
            "char_base_001",
            CharacterOverrides {
                hair: Some(HairOverride {
                    style: Some("ponytail".to_string()),
                    color: None,
                }),
                eyes: None,
                expression: Some("smiling".to_string()),
            },
        ),
    );
    map
}

#[test]
fn base_resolves_unchanged() {
    let chars = library();
    assert_eq!(resolve_character("char_base_001", &chars).unwrap(), base_a());
}

#[test]
fn variation_merges_hair_per_field_and_replaces_expression() {
    let chars = library();
    let out = resolve_character("char_var_002", &chars).unwrap();
    assert_eq!(out.id, "char_var_002");
    assert_eq!(out.name, "char_var_002 name");
    assert_eq!(out.hair.style, "ponytail");
    assert_eq!(out.hair.color, "brown");
    assert_eq!(out.eyes.color, "blue");
    assert_eq!(out.expression, "smiling");
    assert_eq!(out.gender, "1girl");
    assert_eq!(out.age, "20s");
    assert_eq!(out.tags, vec!["female".to_string()]);
}

#[test]
fn eyes_override_replaces_color() {
    let mut chars = library();
    chars.insert(
        "char_var_eyes".to_string(),
        variation(
            "char_var_eyes",
            "char_base_001",
            CharacterOverrides {
                eyes: Some(EyesOverride {
                    color: Some("green".to_string()),
                }),
                ..CharacterOverrides::default()
            },
        ),
    );
    let out = resolve_character("char_var_eyes", &chars).unwrap();
    assert_eq!(out.eyes.color, "green");
    assert_eq!(out.expression, "neutral");
    assert_eq!(out.hair, base_a().hair);
}

#[test]
fn missing_character_is_fatal() {
    let chars = library();
    let err = resolve_character("nope", &chars).unwrap_err();
    assert!(matches!(
        err,
        PromptcastError::EntityNotFound { kind: "character", ref id } if id == "nope"
    ));
}

#[test]
fn missing_base_is_fatal() {
    let mut chars = library();
    chars.insert(
        "orphan".to_string(),
        variation("orphan", "gone", CharacterOverrides::default()),
    );
    let err = resolve_character("orphan", &chars).unwrap_err();
    assert!(matches!(
        err,
        PromptcastError::EntityNotFound { kind: "base character", ref id } if id == "gone"
    ));
}

#[test]
fn variation_of_variation_is_rejected() {
    let mut chars = library();
    chars.insert(
        "char_var_003".to_string(),
        variation("char_var_003", "char_var_002", CharacterOverrides::default()),
    );
    assert!(resolve_character("char_var_003", &chars).is_err());
}

#[test]
fn tagged_json_shape() {
    let json = r#"{
        "kind": "variation",
        "id": "v",
        "name": "V",
        "base_id": "char_base_001",
        "overrides": { "hair": { "color": "blonde" } }
    }"#;
    let def: CharacterDefinition = serde_json::from_str(json).unwrap();
    let mut chars = library();
    chars.insert("v".to_string(), def);
    let out = resolve_character("v", &chars).unwrap();
    assert_eq!(out.hair.color, "blonde");
    assert_eq!(out.hair.style, "long");
}
