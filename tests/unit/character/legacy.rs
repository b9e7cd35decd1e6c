use super::*;
use crate::character::model::{
    CharacterDefinition, CharacterOverrides, CharacterVariation, Eyes, Hair, HairOverride,
};
use crate::foundation::error::PromptcastError;

fn library() -> LegacyLibrary {
    let mut lib = LegacyLibrary::default();
    lib.characters.insert(
        "char_base_001".to_string(),
        CharacterDefinition::Base(CharacterBase {
            id: "char_base_001".to_string(),
            name: "Base A".to_string(),
            tags: vec!["female".to_string(), "standard".to_string()],
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
        }),
    );
    lib.characters.insert(
        "char_var_002".to_string(),
        CharacterDefinition::Variation(CharacterVariation {
            id: "char_var_002".to_string(),
            name: "Variation A".to_string(),
            tags: vec!["cheerful".to_string(), "variation".to_string()],
            base_id: "char_base_001".to_string(),
            overrides: CharacterOverrides {
                hair: Some(HairOverride {
                    style: Some("ponytail".to_string()),
                    color: Some("blonde".to_string()),
                }),
                eyes: None,
                expression: Some("smiling".to_string()),
            },
        }),
    );
    lib.clothing.insert(
        "cloth_001".to_string(),
        ClothingDefinition {
            id: "cloth_001".to_string(),
            name: "Casual".to_string(),
            tags: vec![],
            style: "casual".to_string(),
            top: "white t-shirt".to_string(),
            bottom: "blue jeans".to_string(),
            accessory: Some("silver necklace".to_string()),
        },
    );
    lib.backgrounds.insert(
        "bg_001".to_string(),
        BackgroundDefinition {
            id: "bg_001".to_string(),
            name: "Park".to_string(),
            tags: vec![],
            location: "in a park".to_string(),
            time: "daytime".to_string(),
            weather: "sunny".to_string(),
        },
    );
    lib
}

fn selection(character_id: &str) -> LegacySelection {
    LegacySelection {
        character_id: character_id.to_string(),
        clothing_id: "cloth_001".to_string(),
        background_id: "bg_001".to_string(),
    }
}

#[test]
fn all_sections_in_order() {
    let out =
        generate_legacy_prompt(&selection("char_var_002"), IncludeFlags::default(), &library())
            .unwrap();
    assert_eq!(
        out,
        "1girl, 20s, blonde ponytail hair, blue eyes, smiling, casual, white t-shirt, \
         blue jeans, silver necklace, in a park, daytime, sunny"
    );
}

#[test]
fn flags_drop_sections() {
    let flags = IncludeFlags {
        character: false,
        clothing: true,
        background: false,
    };
    let out = generate_legacy_prompt(&selection("missing"), flags, &library()).unwrap();
    assert_eq!(out, "casual, white t-shirt, blue jeans, silver necklace");
}

#[test]
fn missing_clothing_is_skipped() {
    let mut sel = selection("char_base_001");
    sel.clothing_id = "cloth_gone".to_string();
    let flags = IncludeFlags {
        background: false,
        ..IncludeFlags::default()
    };
    let out = generate_legacy_prompt(&sel, flags, &library()).unwrap();
    assert_eq!(out, "1girl, 20s, brown long hair, blue eyes, neutral");
}

#[test]
fn missing_character_propagates() {
    let err = generate_legacy_prompt(&selection("nope"), IncludeFlags::default(), &library())
        .unwrap_err();
    assert!(matches!(err, PromptcastError::EntityNotFound { .. }));
}

#[test]
fn character_search_uses_name_and_tags() {
    let lib = library();
    let ids = lib
        .search_characters("variation")
        .into_iter()
        .map(|c| c.id().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["char_var_002"]);
    assert_eq!(lib.search_characters("").len(), 2);
}
