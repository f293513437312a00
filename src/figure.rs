// figure.rs - Drawable figure state and mesh building
//
// A Figure collects every patch in draw order, reduced to one color per
// cell. Screen-space meshes are rebuilt from a GridToScreen transform
// each frame so the window can resize freely.

use eframe::egui::{
    Color32, Pos2, Rect, Shape, Stroke,
    epaint::{Mesh, Vertex, WHITE_UV},
};

use crate::colormap;
use crate::patch::Patch;

/// Outline stroke width in points.
pub const OUTLINE_WIDTH: f32 = 0.5;
const OUTLINE_COLOR: Color32 = Color32::BLACK;

/// One patch reduced to drawable form. Cells are unit squares in grid
/// coordinates; `colors` holds one entry per cell in (i, j) row-major
/// order. Only field 0 survives to here.
pub struct MeshPatch {
    pub i0: i64,
    pub j0: i64,
    pub ni: usize,
    pub nj: usize,
    pub colors: Vec<Color32>,
}

impl MeshPatch {
    fn from_patch(patch: &Patch) -> MeshPatch {
        let (i0, j0) = patch.origin();
        let (ni, nj) = patch.shape();
        let field = patch.field(0);
        let mut colors = Vec::with_capacity(ni * nj);
        for i in 0..ni {
            for j in 0..nj {
                colors.push(colormap::map_value(field[[i, j]]));
            }
        }
        MeshPatch { i0, j0, ni, nj, colors }
    }

    /// Patch bounds in grid coordinates, right and top edges inclusive.
    pub fn bounds(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.i0 as f32, self.j0 as f32),
            Pos2::new(self.i0 as f32 + self.ni as f32, self.j0 as f32 + self.nj as f32),
        )
    }
}

/// Everything the viewer paints, in draw order. The figure is an explicit
/// object: created once, filled file by file, then handed to the window.
#[derive(Default)]
pub struct Figure {
    patches: Vec<MeshPatch>,
}

impl Figure {
    pub fn new() -> Figure {
        Figure::default()
    }

    /// Append one patch. Draw order is append order.
    pub fn add_patch(&mut self, patch: &Patch) {
        self.patches.push(MeshPatch::from_patch(patch));
    }

    pub fn patches(&self) -> &[MeshPatch] {
        &self.patches
    }

    /// Union of patch bounds in grid coordinates. None when nothing loaded.
    pub fn bounds(&self) -> Option<Rect> {
        let mut it = self.patches.iter().map(MeshPatch::bounds);
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }
}

/// Equal-aspect mapping from grid coordinates to screen points. Grid y
/// points up, screen y points down.
#[derive(Clone, Copy)]
pub struct GridToScreen {
    scale: f32,
    grid_center: Pos2,
    screen_center: Pos2,
}

impl GridToScreen {
    /// Fit `bounds` into `screen`, centered, with one scale for both axes
    /// so grid cells stay square.
    pub fn fit(bounds: Rect, screen: Rect) -> GridToScreen {
        let sx = screen.width() / bounds.width().max(f32::EPSILON);
        let sy = screen.height() / bounds.height().max(f32::EPSILON);
        GridToScreen {
            scale: sx.min(sy),
            grid_center: bounds.center(),
            screen_center: screen.center(),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn apply(&self, p: Pos2) -> Pos2 {
        Pos2::new(
            self.screen_center.x + (p.x - self.grid_center.x) * self.scale,
            self.screen_center.y - (p.y - self.grid_center.y) * self.scale,
        )
    }

    pub fn apply_rect(&self, r: Rect) -> Rect {
        Rect::from_two_pos(self.apply(r.min), self.apply(r.max))
    }
}

/// Build the screen-space quad mesh for one patch. Four vertices and two
/// triangles per cell.
pub fn build_mesh(patch: &MeshPatch, to_screen: &GridToScreen) -> Mesh {
    let mut mesh = Mesh::default();
    for i in 0..patch.ni {
        for j in 0..patch.nj {
            let color = patch.colors[i * patch.nj + j];
            let x0 = (patch.i0 + i as i64) as f32;
            let y0 = (patch.j0 + j as i64) as f32;
            let corners = [
                to_screen.apply(Pos2::new(x0, y0)),
                to_screen.apply(Pos2::new(x0 + 1.0, y0)),
                to_screen.apply(Pos2::new(x0 + 1.0, y0 + 1.0)),
                to_screen.apply(Pos2::new(x0, y0 + 1.0)),
            ];
            let base = mesh.vertices.len() as u32;
            for pos in corners {
                mesh.vertices.push(Vertex { pos, uv: WHITE_UV, color });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
    mesh
}

/// Unfilled outline spanning the patch bounds, thin dark stroke.
pub fn build_outline(patch: &MeshPatch, to_screen: &GridToScreen) -> Shape {
    Shape::rect_stroke(
        to_screen.apply_rect(patch.bounds()),
        0.0,
        Stroke::new(OUTLINE_WIDTH, OUTLINE_COLOR),
    )
}
