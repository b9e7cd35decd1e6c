use crate::library::model::RenderParams;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Per-run render settings layered over a snapshot's [`RenderParams`].
///
/// Unset fields keep the underlying value.
pub struct RenderParamsOverride {
    /// Sampling steps.
    pub steps: Option<u32>,
    /// Sampler name.
    pub sampler_name: Option<String>,
    /// Guidance scale.
    pub cfg_scale: Option<f64>,
    /// Seed (`-1` for random).
    pub seed: Option<i64>,
    /// Output width.
    pub width: Option<u32>,
    /// Output height.
    pub height: Option<u32>,
    /// Img2img denoising strength.
    pub denoising_strength: Option<f64>,
}

impl RenderParamsOverride {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `base` with every set field replaced.
    pub fn apply(&self, base: &RenderParams) -> RenderParams {
        RenderParams {
            steps: self.steps.unwrap_or(base.steps),
            sampler_name: self
                .sampler_name
                .clone()
                .unwrap_or_else(|| base.sampler_name.clone()),
            cfg_scale: self.cfg_scale.unwrap_or(base.cfg_scale),
            seed: self.seed.unwrap_or(base.seed),
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            denoising_strength: self.denoising_strength.unwrap_or(base.denoising_strength),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tasks/params.rs"]
mod tests;
