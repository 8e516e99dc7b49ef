use glam::Mat4;

use crate::palette::Palette;

/// Per-draw uniform block consumed by both shader stages.
///
/// Written once per frame by the render driver; the shader only reads
/// it. Layout matches the WGSL `SceneUniform` struct field for field
/// (two mat4s, four vec4 palette colors, then the two scalars the
/// animation drives, padded to 16 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub idle_low: [f32; 4],
    pub idle_high: [f32; 4],
    pub scrolled_low: [f32; 4],
    pub scrolled_high: [f32; 4],
    /// Seconds since start, monotonically increasing.
    pub time: f32,
    /// 0 = idle palette, 1 = scrolled palette. Values outside [0, 1]
    /// extrapolate linearly, same as the CPU `mix`.
    pub color_blend: f32,
    pub _pad: [f32; 2],
}

impl SceneUniform {
    pub fn new(
        model_view: Mat4,
        projection: Mat4,
        palette: &Palette,
        time: f32,
        color_blend: f32,
    ) -> Self {
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            idle_low: palette.idle[0],
            idle_high: palette.idle[1],
            scrolled_low: palette.scrolled[0],
            scrolled_high: palette.scrolled[1],
            time,
            color_blend,
            _pad: [0.0; 2],
        }
    }
}
