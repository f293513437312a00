// colormap.rs - Value-to-color mapping for mesh cells

use eframe::egui::Color32;

/// Color scale bounds shared by every mesh.
pub const VMIN: f64 = 0.0;
pub const VMAX: f64 = 1.0;

// Viridis control points, low to high.
const RAMP: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Interpolate the ramp at `t` in [0, 1]. Values outside clip to the ends.
pub fn viridis(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segs = (RAMP.len() - 1) as f32;
    let x = t * segs;
    let i = x.floor() as usize;
    if i >= RAMP.len() - 1 {
        let (r, g, b) = RAMP[RAMP.len() - 1];
        return Color32::from_rgb(r, g, b);
    }
    let f = x - i as f32;
    let (r0, g0, b0) = RAMP[i];
    let (r1, g1, b1) = RAMP[i + 1];
    let lerp = |a: u8, b: u8| (a as f32 + f * (b as f32 - a as f32)).round() as u8;
    Color32::from_rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Map a cell value onto the fixed [VMIN, VMAX] scale.
pub fn map_value(v: f64) -> Color32 {
    viridis(((v - VMIN) / (VMAX - VMIN)) as f32)
}
