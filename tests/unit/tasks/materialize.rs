use super::*;
use crate::compose::scene::ActorCredits;

fn prompt(cut: u32, credits: Option<(&str, &str)>) -> GeneratedPrompt {
    GeneratedPrompt {
        cut,
        label: format!("cut {cut}"),
        positive: format!("pos {cut}"),
        negative: format!("neg {cut}"),
        first_actor: credits.map(|(w, c)| ActorCredits {
            work_title: w.to_string(),
            character_name: c.to_string(),
        }),
    }
}

fn scene(reference: &str, mode: ImageMode) -> Scene {
    Scene {
        id: "s".to_string(),
        name: "S".to_string(),
        reference_image_path: reference.to_string(),
        image_mode: mode,
        ..Scene::default()
    }
}

fn params() -> RenderParams {
    RenderParams {
        steps: 28,
        sampler_name: "DPM++ 2M".to_string(),
        cfg_scale: 6.5,
        seed: -1,
        width: 832,
        height: 1216,
        denoising_strength: 0.45,
    }
}

#[test]
fn no_scene_means_no_tasks() {
    let tasks = materialize_tasks(&[prompt(1, None)], &params(), None);
    assert!(tasks.is_empty());
}

#[test]
fn empty_reference_forces_txt2img() {
    for mode in [ImageMode::Txt2img, ImageMode::Img2img, ImageMode::Img2imgPolish] {
        let s = scene("", mode);
        let tasks = materialize_tasks(&[prompt(1, None)], &params(), Some(&s));
        assert_eq!(tasks[0].mode, ImageMode::Txt2img);
        assert_eq!(tasks[0].source_image_path, "");
        assert_eq!(tasks[0].denoising_strength, None);
    }
}

#[test]
fn img2img_carries_reference_and_denoise() {
    let s = scene("refs/pose.png", ImageMode::Img2imgPolish);
    let tasks = materialize_tasks(&[prompt(1, None)], &params(), Some(&s));
    assert_eq!(tasks[0].mode, ImageMode::Img2imgPolish);
    assert_eq!(tasks[0].source_image_path, "refs/pose.png");
    assert_eq!(tasks[0].denoising_strength, Some(0.45));
}

#[test]
fn txt2img_with_reference_keeps_path_without_denoise() {
    let s = scene("refs/pose.png", ImageMode::Txt2img);
    let tasks = materialize_tasks(&[prompt(1, None)], &params(), Some(&s));
    assert_eq!(tasks[0].mode, ImageMode::Txt2img);
    assert_eq!(tasks[0].source_image_path, "refs/pose.png");
    assert_eq!(tasks[0].denoising_strength, None);
}

#[test]
fn tasks_align_with_prompts_and_pass_params_through() {
    let s = scene("", ImageMode::Txt2img);
    let prompts = [prompt(1, Some(("Work", "Hero"))), prompt(2, None)];
    let tasks = materialize_tasks(&prompts, &params(), Some(&s));
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].prompt, "pos 1");
    assert_eq!(tasks[1].negative_prompt, "neg 2");
    assert_eq!(tasks[0].filename_prefix, "Work_Hero_cut1");
    assert_eq!(tasks[1].filename_prefix, "output_2");
    for t in &tasks {
        assert_eq!(t.seed, -1);
        assert_eq!(t.steps, 28);
        assert_eq!(t.sampler_name, "DPM++ 2M");
        assert_eq!(t.cfg_scale, 6.5);
        assert_eq!((t.width, t.height), (832, 1216));
    }
}

#[test]
fn wire_shape_matches_renderer_contract() {
    let s = scene("", ImageMode::Img2img);
    let tasks = materialize_tasks(&[prompt(3, None)], &params(), Some(&s));
    let v = serde_json::to_value(&tasks).unwrap();
    assert_eq!(v[0]["mode"], "txt2img");
    assert_eq!(v[0]["denoising_strength"], "");
    assert_eq!(v[0]["seed"], -1);
    assert_eq!(v[0]["filename_prefix"], "output_3");

    let s = scene("ref.png", ImageMode::Img2img);
    let tasks = materialize_tasks(&[prompt(1, None)], &params(), Some(&s));
    let v = serde_json::to_value(&tasks).unwrap();
    assert_eq!(v[0]["mode"], "img2img");
    assert_eq!(v[0]["denoising_strength"], 0.45);
}

#[test]
fn task_json_reads_back() {
    let json = r#"{
        "prompt": "p", "negative_prompt": "", "steps": 20, "sampler_name": "Euler a",
        "cfg_scale": 7.0, "seed": 42, "width": 512, "height": 512, "mode": "img2img",
        "filename_prefix": "x", "source_image_path": "a.png", "denoising_strength": ""
    }"#;
    let t: TaskRecord = serde_json::from_str(json).unwrap();
    assert_eq!(t.denoising_strength, None);
    assert!(serde_json::from_str::<TaskRecord>(&json.replace(r#""denoising_strength": """#, r#""denoising_strength": "x""#)).is_err());
}

#[test]
fn write_tasks_json_emits_array() {
    let s = scene("", ImageMode::Txt2img);
    let tasks = materialize_tasks(&[prompt(1, None), prompt(2, None)], &params(), Some(&s));
    let mut buf = Vec::new();
    write_tasks_json(&mut buf, &tasks).unwrap();
    let back: Vec<TaskRecord> = serde_json::from_slice(&buf).unwrap();
    assert_eq!(back, tasks);
}
