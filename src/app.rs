// app.rs - Interactive viewer window
//
// One central panel: each patch mesh with its outline on top, then a
// color bar for the shared fixed scale along the right edge.

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2,
    epaint::{Mesh, Vertex, WHITE_UV},
};

use crate::colormap;
use crate::figure::{self, Figure, GridToScreen};

const MARGIN: f32 = 16.0;
const COLORBAR_WIDTH: f32 = 18.0;
const COLORBAR_GAP: f32 = 64.0;
const COLORBAR_STEPS: usize = 64;
const TICKS: usize = 5;

pub struct ViewerApp {
    figure: Figure,
}

impl ViewerApp {
    pub fn new(figure: Figure) -> ViewerApp {
        ViewerApp { figure }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
            let canvas = response.rect;
            painter.rect_filled(canvas, 0.0, Color32::WHITE);

            let Some(bounds) = self.figure.bounds() else {
                painter.text(
                    canvas.center(),
                    Align2::CENTER_CENTER,
                    "no patches",
                    FontId::proportional(14.0),
                    Color32::DARK_GRAY,
                );
                return;
            };

            let plot_area = Rect::from_min_max(
                canvas.min + Vec2::splat(MARGIN),
                Pos2::new(canvas.max.x - MARGIN - COLORBAR_GAP, canvas.max.y - MARGIN),
            );
            let to_screen = GridToScreen::fit(bounds, plot_area);

            for patch in self.figure.patches() {
                painter.add(Shape::mesh(figure::build_mesh(patch, &to_screen)));
                painter.add(figure::build_outline(patch, &to_screen));
            }

            draw_colorbar(&painter, canvas);
        });
    }
}

/// Vertical gradient strip with tick labels for the fixed value scale.
fn draw_colorbar(painter: &egui::Painter, canvas: Rect) {
    let bar = Rect::from_min_max(
        Pos2::new(canvas.max.x - MARGIN - COLORBAR_WIDTH, canvas.min.y + MARGIN),
        Pos2::new(canvas.max.x - MARGIN, canvas.max.y - MARGIN),
    );

    // High values at the top of the strip
    let mut mesh = Mesh::default();
    for s in 0..COLORBAR_STEPS {
        let t0 = s as f32 / COLORBAR_STEPS as f32;
        let t1 = (s + 1) as f32 / COLORBAR_STEPS as f32;
        let y0 = bar.max.y - t0 * bar.height();
        let y1 = bar.max.y - t1 * bar.height();
        let c0 = colormap::viridis(t0);
        let c1 = colormap::viridis(t1);
        let base = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex { pos: Pos2::new(bar.min.x, y0), uv: WHITE_UV, color: c0 });
        mesh.vertices.push(Vertex { pos: Pos2::new(bar.max.x, y0), uv: WHITE_UV, color: c0 });
        mesh.vertices.push(Vertex { pos: Pos2::new(bar.max.x, y1), uv: WHITE_UV, color: c1 });
        mesh.vertices.push(Vertex { pos: Pos2::new(bar.min.x, y1), uv: WHITE_UV, color: c1 });
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    painter.add(Shape::mesh(mesh));
    painter.add(Shape::rect_stroke(bar, 0.0, Stroke::new(0.5, Color32::DARK_GRAY)));

    for k in 0..TICKS {
        let t = k as f32 / (TICKS - 1) as f32;
        let value = colormap::VMIN + f64::from(t) * (colormap::VMAX - colormap::VMIN);
        painter.text(
            Pos2::new(bar.max.x + 4.0, bar.max.y - t * bar.height()),
            Align2::LEFT_CENTER,
            format!("{value:.2}"),
            FontId::monospace(11.0),
            Color32::DARK_GRAY,
        );
    }
}

/// Open the viewer window. Blocks until the window is closed.
pub fn show(figure: Figure) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("patchview"),
        ..Default::default()
    };
    eframe::run_native(
        "patchview",
        options,
        Box::new(|_cc| Ok(Box::new(ViewerApp::new(figure)))),
    )
}
