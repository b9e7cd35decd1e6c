use std::io::Write;

use crate::{
    compose::scene::GeneratedPrompt,
    foundation::error::PromptcastResult,
    library::model::{ImageMode, RenderParams, Scene},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Renderer-ready job record; the serialized shape is the external batch renderer's contract.
pub struct TaskRecord {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub sampler_name: String,
    pub cfg_scale: f64,
    /// `-1` is forwarded verbatim; the renderer picks the seed.
    pub seed: i64,
    pub width: u32,
    pub height: u32,
    pub mode: ImageMode,
    pub filename_prefix: String,
    pub source_image_path: String,
    /// Only meaningful for img2img modes; serialized as `""` otherwise.
    #[serde(with = "empty_string_as_none")]
    pub denoising_strength: Option<f64>,
}

/// Turn generated prompts into render tasks, positionally aligned with the input.
///
/// Without a scene there is nothing to render and the result is empty. An empty reference
/// image forces `txt2img` with an empty source path regardless of the scene's mode.
#[tracing::instrument(skip_all, fields(prompts = prompts.len()))]
pub fn materialize_tasks(
    prompts: &[GeneratedPrompt],
    params: &RenderParams,
    scene: Option<&Scene>,
) -> Vec<TaskRecord> {
    let Some(scene) = scene else {
        return Vec::new();
    };

    let (mode, source_image_path) = if scene.reference_image_path.is_empty() {
        (ImageMode::Txt2img, String::new())
    } else {
        (scene.image_mode, scene.reference_image_path.clone())
    };
    let denoising_strength = (mode != ImageMode::Txt2img).then_some(params.denoising_strength);

    prompts
        .iter()
        .map(|p| TaskRecord {
            prompt: p.positive.clone(),
            negative_prompt: p.negative.clone(),
            steps: params.steps,
            sampler_name: params.sampler_name.clone(),
            cfg_scale: params.cfg_scale,
            seed: params.seed,
            width: params.width,
            height: params.height,
            mode,
            filename_prefix: filename_prefix(p),
            source_image_path: source_image_path.clone(),
            denoising_strength,
        })
        .collect()
}

/// `{work_title}_{character_name}_cut{cut}` when credits exist, else `output_{cut}`.
pub fn filename_prefix(prompt: &GeneratedPrompt) -> String {
    match &prompt.first_actor {
        Some(credits) => format!(
            "{}_{}_cut{}",
            credits.work_title, credits.character_name, prompt.cut
        ),
        None => format!("output_{}", prompt.cut),
    }
}

/// Write the task array as pretty JSON for the external renderer.
pub fn write_tasks_json<W: Write>(mut writer: W, tasks: &[TaskRecord]) -> PromptcastResult<()> {
    serde_json::to_writer_pretty(&mut writer, tasks)?;
    writer
        .write_all(b"\n")
        .map_err(|e| anyhow::Error::new(e).context("write task list"))?;
    Ok(())
}

mod empty_string_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(x) => s.serialize_f64(*x),
            None => s.serialize_str(""),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Number(x) => Ok(Some(x)),
            Raw::Text(t) if t.is_empty() => Ok(None),
            Raw::Text(t) => Err(serde::de::Error::custom(format!(
                "denoising_strength must be a number or \"\", got {t:?}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tasks/materialize.rs"]
mod tests;
