use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PromptcastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PromptcastError::repository("x")
            .to_string()
            .contains("repository error:")
    );
    assert!(
        PromptcastError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn not_found_names_kind_and_id() {
    let err = PromptcastError::not_found("character", "char_var_002");
    assert_eq!(
        err.to_string(),
        "entity not found: character 'char_var_002'"
    );
    assert!(matches!(
        err,
        PromptcastError::EntityNotFound { kind: "character", ref id } if id == "char_var_002"
    ));
}

#[test]
fn json_errors_map_to_serde() {
    let err: PromptcastError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, PromptcastError::Serde(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PromptcastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
