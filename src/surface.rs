//! The drawing surface the box container paints on.

use serde::{Deserialize, Serialize};

use crate::geometry::{Handle, Position};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    /// CSS `lightgrey`.
    pub const LIGHT_GREY: Color4 = Color4 {
        r: 211.0 / 255.0,
        g: 211.0 / 255.0,
        b: 211.0 / 255.0,
        a: 1.0,
    };
    /// CSS `cadetblue`.
    pub const CADET_BLUE: Color4 = Color4 {
        r: 95.0 / 255.0,
        g: 158.0 / 255.0,
        b: 160.0 / 255.0,
        a: 1.0,
    };

    pub fn to_egui(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Move,
    Resize(Handle),
}

impl CursorStyle {
    /// `interacting` is true while a mouse button is held.
    pub fn from_position(position: Position, interacting: bool) -> Self {
        match position {
            Position::Handle(handle) => CursorStyle::Resize(handle),
            Position::Inside if interacting => CursorStyle::Move,
            Position::Inside | Position::Outside => CursorStyle::Default,
        }
    }

    pub fn to_egui(self) -> egui::CursorIcon {
        match self {
            CursorStyle::Default => egui::CursorIcon::Default,
            CursorStyle::Move => egui::CursorIcon::Move,
            CursorStyle::Resize(handle) => match handle {
                Handle::NorthWest => egui::CursorIcon::ResizeNorthWest,
                Handle::North => egui::CursorIcon::ResizeNorth,
                Handle::NorthEast => egui::CursorIcon::ResizeNorthEast,
                Handle::West => egui::CursorIcon::ResizeWest,
                Handle::East => egui::CursorIcon::ResizeEast,
                Handle::SouthWest => egui::CursorIcon::ResizeSouthWest,
                Handle::South => egui::CursorIcon::ResizeSouth,
                Handle::SouthEast => egui::CursorIcon::ResizeSouthEast,
            },
        }
    }
}

/// Primitive drawing operations, in image coordinates with the origin at the
/// top-left corner and y growing downwards.
pub trait Surface {
    type Image;

    /// Width and height of the drawable area.
    fn size(&self) -> (f32, f32);
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Text is centered on `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn set_stroke_color(&mut self, color: &Color4);
    fn set_fill_color(&mut self, color: &Color4);
    fn set_line_width(&mut self, width: f32);
    fn set_font_size(&mut self, size: f32);
    fn set_cursor(&mut self, cursor: CursorStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_mapping() {
        assert_eq!(
            CursorStyle::from_position(Position::Handle(Handle::East), false),
            CursorStyle::Resize(Handle::East)
        );
        assert_eq!(CursorStyle::from_position(Position::Inside, true), CursorStyle::Move);
        assert_eq!(CursorStyle::from_position(Position::Inside, false), CursorStyle::Default);
        assert_eq!(CursorStyle::from_position(Position::Outside, true), CursorStyle::Default);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color4::CADET_BLUE.to_egui(), egui::Color32::from_rgb(95, 158, 160));
        assert_eq!(Color4::LIGHT_GREY.to_egui(), egui::Color32::from_rgb(211, 211, 211));
    }
}
