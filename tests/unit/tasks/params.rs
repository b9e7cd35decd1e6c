use super::*;

#[test]
fn empty_override_is_identity() {
    let base = RenderParams {
        steps: 40,
        seed: 7,
        ..RenderParams::default()
    };
    let ov = RenderParamsOverride::default();
    assert!(ov.is_empty());
    assert_eq!(ov.apply(&base), base);
}

#[test]
fn set_fields_win_over_snapshot() {
    let base = RenderParams {
        steps: 40,
        width: 1024,
        ..RenderParams::default()
    };
    let ov = RenderParamsOverride {
        steps: Some(12),
        sampler_name: Some("DDIM".to_string()),
        seed: Some(1234),
        ..RenderParamsOverride::default()
    };
    let out = ov.apply(&base);
    assert_eq!(out.steps, 12);
    assert_eq!(out.sampler_name, "DDIM");
    assert_eq!(out.seed, 1234);
    assert_eq!(out.width, 1024);
    assert_eq!(out.height, base.height);
    assert_eq!(out.denoising_strength, base.denoising_strength);
}

#[test]
fn partial_snapshot_fills_from_defaults() {
    let params: RenderParams = serde_json::from_str(r#"{ "steps": 8 }"#).unwrap();
    assert_eq!(params.steps, 8);
    assert_eq!(params.sampler_name, "Euler a");
    assert_eq!(params.seed, -1);
    assert_eq!((params.width, params.height), (512, 768));
}
