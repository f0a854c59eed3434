//! The egui front end: a display-list surface and the editor window.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use eframe::egui;
use image::RgbaImage;

use crate::config::EditorConfig;
use crate::container::{BoxContainer, Key};
use crate::error::{Error, Result};
use crate::form::{template_boxes, MemeForm};
use crate::geometry::Point;
use crate::surface::{Color4, CursorStyle, Surface};

// ── Surface ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum DrawCmd {
    Image {
        texture: egui::TextureId,
        rect: egui::Rect,
    },
    Stroke {
        rect: egui::Rect,
        stroke: egui::Stroke,
    },
    Fill {
        rect: egui::Rect,
        color: egui::Color32,
    },
    Text {
        pos: egui::Pos2,
        text: String,
        size: f32,
        color: egui::Color32,
    },
}

/// Records drawing primitives between redraws and replays them every frame.
pub struct EguiSurface {
    size: (f32, f32),
    commands: Vec<DrawCmd>,
    stroke_color: egui::Color32,
    fill_color: egui::Color32,
    line_width: f32,
    font_size: f32,
    cursor: CursorStyle,
}

impl EguiSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
            stroke_color: egui::Color32::BLACK,
            fill_color: egui::Color32::BLACK,
            line_width: 1.0,
            font_size: 15.0,
            cursor: CursorStyle::Default,
        }
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Paint the recorded commands with the image origin at `origin`.
    pub fn paint(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let offset = origin.to_vec2();
        for cmd in &self.commands {
            match cmd {
                DrawCmd::Image { texture, rect } => {
                    painter.image(
                        *texture,
                        rect.translate(offset),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                DrawCmd::Stroke { rect, stroke } => {
                    painter.rect_stroke(
                        rect.translate(offset),
                        0.0,
                        *stroke,
                        egui::StrokeKind::Middle,
                    );
                }
                DrawCmd::Fill { rect, color } => {
                    painter.rect_filled(rect.translate(offset), 0.0, *color);
                }
                DrawCmd::Text {
                    pos,
                    text,
                    size,
                    color,
                } => {
                    painter.text(
                        *pos + offset,
                        egui::Align2::CENTER_CENTER,
                        text,
                        egui::FontId::proportional(*size),
                        *color,
                    );
                }
            }
        }
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> egui::Rect {
    egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(w, h))
}

impl Surface for EguiSurface {
    type Image = egui::TextureHandle;

    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let cleared = rect(x, y, w, h);
        if cleared.contains_rect(rect(0.0, 0.0, self.size.0, self.size.1)) {
            self.commands.clear();
            return;
        }
        // Partial clears only drop what lies entirely within the region.
        self.commands.retain(|cmd| match cmd {
            DrawCmd::Image { rect, .. }
            | DrawCmd::Stroke { rect, .. }
            | DrawCmd::Fill { rect, .. } => !cleared.contains_rect(*rect),
            DrawCmd::Text { pos, .. } => !cleared.contains(*pos),
        });
    }

    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32) {
        let size = image.size_vec2();
        self.commands.push(DrawCmd::Image {
            texture: image.id(),
            rect: rect(x, y, size.x, size.y),
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCmd::Stroke {
            rect: rect(x, y, w, h),
            stroke: egui::Stroke::new(self.line_width, self.stroke_color),
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCmd::Fill {
            rect: rect(x, y, w, h),
            color: self.fill_color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DrawCmd::Text {
            pos: egui::pos2(x, y),
            text: text.to_string(),
            size: self.font_size,
            color: self.fill_color,
        });
    }

    fn set_stroke_color(&mut self, color: &Color4) {
        self.stroke_color = color.to_egui();
    }

    fn set_fill_color(&mut self, color: &Color4) {
        self.fill_color = color.to_egui();
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }
}

// ── App ─────────────────────────────────────────────────────────────────────

enum Status {
    Error(String),
    Saved(PathBuf),
}

pub struct MemeApp {
    container: BoxContainer<EguiSurface>,
    form: Rc<RefCell<MemeForm>>,
    output: Option<PathBuf>,
    status: Option<Status>,
    pointer_inside: bool,
}

impl MemeApp {
    pub fn new(
        ctx: &egui::Context,
        image_path: &Path,
        config: &EditorConfig,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let raw = image::open(image_path).map_err(|source| Error::ImageLoad {
            path: image_path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %image_path.display(), width = raw.width(), height = raw.height(), "background loaded");
        let from = image_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        Self::from_image(ctx, from, &raw.to_rgba8(), config, output)
    }

    /// Build the editor over a decoded image, seeded with the default top and
    /// bottom text boxes.
    pub fn from_image(
        ctx: &egui::Context,
        from: String,
        rgba: &RgbaImage,
        config: &EditorConfig,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let size = [rgba.width() as usize, rgba.height() as usize];
        let surface = EguiSurface::new(size[0] as f32, size[1] as f32);
        let mut container = BoxContainer::new(surface, config.box_style())?;

        let form = Rc::new(RefCell::new(MemeForm::new(from)));
        container.add_observer(Box::new(form.clone()));
        for (center, w, l) in template_boxes(rgba.width(), rgba.height()) {
            container.add_box(center, w, l);
        }

        let pixels = rgba.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
        let texture = ctx.load_texture("background", color_image, egui::TextureOptions::LINEAR);
        container.set_background(texture);

        Ok(Self {
            container,
            form,
            output,
            status: None,
            pointer_inside: false,
        })
    }

    fn submit(&mut self) {
        let request = match self.form.borrow().request(self.container.boxes()) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("submission rejected: {e}");
                self.status = Some(Status::Error(e.to_string()));
                return;
            }
        };
        tracing::info!(query = %request.query_string(), "meme request ready");

        let path = self.output.clone().or_else(|| {
            rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .set_file_name("meme.json")
                .save_file()
        });
        let Some(path) = path else {
            return;
        };
        self.status = Some(match request.save(&path) {
            Ok(()) => Status::Saved(path),
            Err(e) => {
                tracing::error!("failed to save {}: {e}", path.display());
                Status::Error(e.to_string())
            }
        });
    }

    /// Replays this frame's pointer and key events in order. `visible` is the
    /// part of the canvas not scrolled away or covered by other panels.
    fn handle_pointer(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, visible: egui::Rect) {
        let events = ctx.input(|i| i.events.clone());
        let to_image = |p: egui::Pos2| {
            Point::new(
                (p.x - canvas_rect.min.x).round(),
                (p.y - canvas_rect.min.y).round(),
            )
        };

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if visible.contains(pos) {
                        self.container.pointer_move(to_image(pos));
                        self.pointer_inside = true;
                    } else {
                        self.leave();
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if !visible.contains(pos) {
                        self.leave();
                    } else if pressed {
                        self.pointer_inside = true;
                        self.container.pointer_down(to_image(pos));
                    } else {
                        self.container.pointer_up(to_image(pos));
                    }
                }
                egui::Event::PointerGone => self.leave(),
                egui::Event::Key {
                    key: egui::Key::Escape,
                    pressed: true,
                    ..
                } => self.container.key_down(Key::Escape),
                _ => {}
            }
        }

        if self.pointer_inside {
            ctx.set_cursor_icon(self.container.surface().cursor().to_egui());
        }
    }

    fn leave(&mut self) {
        if self.pointer_inside {
            self.container.pointer_leave();
        }
        self.pointer_inside = false;
    }

    /// One frame of UI: the text panel and the scrollable canvas.
    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("texts").show(ctx, |ui| {
            ui.heading("Texts");
            {
                let mut form = self.form.borrow_mut();
                for i in 0..form.texts().len() {
                    ui.label(format!("Text area {}", i + 1));
                    if let Some(text) = form.text_mut(i) {
                        ui.add(egui::TextEdit::singleline(text).hint_text("Add text here"));
                    }
                }
            }
            ui.separator();
            if ui.button("Generate").clicked() {
                self.submit();
            }
            match &self.status {
                Some(Status::Error(msg)) => {
                    ui.colored_label(egui::Color32::from_rgb(241, 70, 104), msg);
                }
                Some(Status::Saved(path)) => {
                    ui.label(format!("Saved to {}", path.display()));
                }
                None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .drag_to_scroll(false)
                .show(ui, |ui| {
                    let (w, h) = self.container.surface().size();
                    let (response, painter) =
                        ui.allocate_painter(egui::vec2(w, h), egui::Sense::click_and_drag());
                    let canvas_rect = response.rect;
                    let visible = canvas_rect.intersect(ui.clip_rect());

                    self.handle_pointer(ctx, canvas_rect, visible);

                    painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));
                    self.container.surface().paint(&painter, canvas_rect.min);
                });
        });
    }
}

impl eframe::App for MemeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::InteractionState;

    fn test_app(ctx: &egui::Context, width: u32, height: u32) -> MemeApp {
        let rgba = RgbaImage::from_pixel(width, height, image::Rgba([200, 200, 200, 255]));
        MemeApp::from_image(ctx, "cat.gif".into(), &rgba, &EditorConfig::default(), None).unwrap()
    }

    fn frame(ctx: &egui::Context, app: &mut MemeApp, screen: egui::Vec2, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, screen)),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.ui(ctx));
    }

    fn button(x: f32, y: f32, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(x, y),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_starts_with_template_boxes() {
        let ctx = egui::Context::default();
        let app = test_app(&ctx, 200, 150);

        let dims: Vec<_> = app
            .container
            .boxes()
            .iter()
            .map(|b| b.clone().dimensions())
            .collect();
        assert_eq!(dims.len(), 2);
        assert_eq!((dims[0].x, dims[0].y, dims[0].w, dims[0].l), (100, 25, 196.0, 48.0));
        assert_eq!((dims[1].x, dims[1].y, dims[1].w, dims[1].l), (100, 124, 196.0, 48.0));
        assert_eq!(app.form.borrow().texts().len(), 2);
    }

    #[test]
    fn test_click_within_one_frame_ends_interaction() {
        let ctx = egui::Context::default();
        let mut app = test_app(&ctx, 200, 150);
        let screen = egui::vec2(800.0, 600.0);
        frame(&ctx, &mut app, screen, vec![]);

        // Empty space between the two template boxes.
        frame(
            &ctx,
            &mut app,
            screen,
            vec![
                egui::Event::PointerMoved(egui::pos2(100.0, 85.0)),
                button(100.0, 85.0, true),
                button(100.0, 85.0, false),
            ],
        );
        assert_eq!(app.container.state(), InteractionState::Idle);
        assert_eq!(app.container.boxes().len(), 3);

        frame(&ctx, &mut app, screen, vec![egui::Event::PointerMoved(egui::pos2(150.0, 90.0))]);
        assert_eq!(app.container.state(), InteractionState::Idle);
        let spawned = app.container.boxes()[2].clone().dimensions();
        assert_eq!((spawned.w, spawned.l), (0.0, 0.0));
    }

    #[test]
    fn test_clicks_over_side_panel_do_not_reach_canvas() {
        let ctx = egui::Context::default();
        // Wider than the central panel, so the canvas runs under the side panel.
        let mut app = test_app(&ctx, 600, 200);
        let screen = egui::vec2(400.0, 300.0);
        frame(&ctx, &mut app, screen, vec![]);

        frame(
            &ctx,
            &mut app,
            screen,
            vec![
                egui::Event::PointerMoved(egui::pos2(350.0, 100.0)),
                button(350.0, 100.0, true),
                button(350.0, 100.0, false),
            ],
        );
        assert_eq!(app.container.boxes().len(), 2);
        assert_eq!(app.container.state(), InteractionState::Idle);

        frame(
            &ctx,
            &mut app,
            screen,
            vec![
                egui::Event::PointerMoved(egui::pos2(100.0, 100.0)),
                button(100.0, 100.0, true),
                button(100.0, 100.0, false),
            ],
        );
        assert_eq!(app.container.boxes().len(), 3);
    }

    #[test]
    fn test_clear_drops_commands_inside_region() {
        let mut s = EguiSurface::new(100.0, 100.0);
        s.fill_rect(10.0, 10.0, 4.0, 4.0);
        s.fill_text("1", 50.0, 50.0);
        s.stroke_rect(90.0, 90.0, 40.0, 40.0);
        s.clear_rect(0.0, 0.0, 60.0, 60.0);
        assert_eq!(s.commands.len(), 1);
        assert!(matches!(s.commands[0], DrawCmd::Stroke { .. }));
    }

    #[test]
    fn test_full_clear_drops_everything() {
        let mut s = EguiSurface::new(100.0, 100.0);
        s.stroke_rect(90.0, 90.0, 40.0, 40.0);
        s.fill_text("1", 110.0, 110.0);
        s.clear_rect(0.0, 0.0, 100.0, 100.0);
        assert!(s.commands.is_empty());
    }

    #[test]
    fn test_commands_use_current_state() {
        let mut s = EguiSurface::new(100.0, 100.0);
        s.set_line_width(3.0);
        s.set_stroke_color(&Color4::CADET_BLUE);
        s.stroke_rect(0.0, 0.0, 10.0, 10.0);
        match &s.commands[0] {
            DrawCmd::Stroke { stroke, .. } => {
                assert_eq!(stroke.width, 3.0);
                assert_eq!(stroke.color, Color4::CADET_BLUE.to_egui());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
