//! Box geometry: points, handle positions, hit-testing and resizing.

use std::ops::Sub;

use crate::surface::{Color4, Surface};

// ── Point ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector subtraction: the displacement from `other` to `self`.
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::sub(self, other)
    }
}

// ── Handle positions ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    West,
    East,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    North,
    South,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Handle {
    /// Combines a vertical and horizontal component. Returns `None` when both
    /// are absent, since that is the interior rather than a handle.
    pub fn from_parts(vertical: Option<Vertical>, horizontal: Option<Horizontal>) -> Option<Self> {
        use Horizontal::*;
        use Vertical::*;
        Some(match (vertical, horizontal) {
            (Some(North), Some(West)) => Handle::NorthWest,
            (Some(North), None) => Handle::North,
            (Some(North), Some(East)) => Handle::NorthEast,
            (None, Some(West)) => Handle::West,
            (None, Some(East)) => Handle::East,
            (Some(South), Some(West)) => Handle::SouthWest,
            (Some(South), None) => Handle::South,
            (Some(South), Some(East)) => Handle::SouthEast,
            (None, None) => return None,
        })
    }

    pub fn horizontal(self) -> Option<Horizontal> {
        match self {
            Handle::NorthWest | Handle::West | Handle::SouthWest => Some(Horizontal::West),
            Handle::NorthEast | Handle::East | Handle::SouthEast => Some(Horizontal::East),
            Handle::North | Handle::South => None,
        }
    }

    pub fn vertical(self) -> Option<Vertical> {
        match self {
            Handle::NorthWest | Handle::North | Handle::NorthEast => Some(Vertical::North),
            Handle::SouthWest | Handle::South | Handle::SouthEast => Some(Vertical::South),
            Handle::West | Handle::East => None,
        }
    }

    /// Compass code, e.g. `"nw"`.
    pub fn code(self) -> &'static str {
        match self {
            Handle::NorthWest => "nw",
            Handle::North => "n",
            Handle::NorthEast => "ne",
            Handle::West => "w",
            Handle::East => "e",
            Handle::SouthWest => "sw",
            Handle::South => "s",
            Handle::SouthEast => "se",
        }
    }
}

/// Where a point lies relative to a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Handle(Handle),
    Inside,
    Outside,
}

impl Position {
    pub fn code(self) -> &'static str {
        match self {
            Position::Handle(h) => h.code(),
            Position::Inside => "i",
            Position::Outside => "o",
        }
    }
}

// ── Box ─────────────────────────────────────────────────────────────────────

/// Center/size view of a box, as submitted with the form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub x: i32,
    pub y: i32,
    pub w: f32,
    pub l: f32,
}

/// An axis-aligned text box. `(x1, y1)` is always the top-left corner and
/// `(x2, y2)` the bottom-right one once normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct MemeBox {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    line_width: f32,
    line_offset: f32,
    color: Color4,
    center: Point,
}

impl MemeBox {
    pub fn new(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
        line_offset: f32,
        color: Color4,
    ) -> Self {
        let mut b = Self {
            x1,
            y1,
            x2,
            y2,
            line_width,
            line_offset,
            color,
            center: Point::default(),
        };
        b.normalize();
        b
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn dimensions(&mut self) -> Dimensions {
        self.normalize();
        Dimensions {
            x: round_half_up(self.center.x),
            y: round_half_up(self.center.y),
            w: self.x2 - self.x1,
            l: self.y2 - self.y1,
        }
    }

    /// Hit-test a point against the box handles and body.
    pub fn classify(&self, p: Point) -> Position {
        let horizontal = if self.near(p.x, self.x1) {
            Some(Horizontal::West)
        } else if self.near(p.x, self.x2) {
            Some(Horizontal::East)
        } else {
            None
        };

        if horizontal.is_some() || self.near(p.x, self.center.x) {
            let vertical = if self.near(p.y, self.y1) {
                Some(Vertical::North)
            } else if self.near(p.y, self.y2) {
                Some(Vertical::South)
            } else {
                None
            };
            if vertical.is_some() {
                if let Some(handle) = Handle::from_parts(vertical, horizontal) {
                    return Position::Handle(handle);
                }
            }
        }

        if horizontal.is_some() && self.near(p.y, self.center.y) {
            if let Some(handle) = Handle::from_parts(None, horizontal) {
                return Position::Handle(handle);
            }
        }

        if self.contains(p) {
            Position::Inside
        } else {
            Position::Outside
        }
    }

    /// Move (`Inside`) or resize (a handle) by `offset`. Dragging an edge past
    /// the opposite one flips the box. `Outside` leaves the box untouched.
    pub fn apply_offset(&mut self, position: Position, offset: Point) {
        match position {
            Position::Inside => {
                self.x1 += offset.x;
                self.x2 += offset.x;
                self.y1 += offset.y;
                self.y2 += offset.y;
            }
            Position::Handle(handle) => {
                match handle.horizontal() {
                    Some(Horizontal::West) => self.x1 += offset.x,
                    Some(Horizontal::East) => self.x2 += offset.x,
                    None => {}
                }
                match handle.vertical() {
                    Some(Vertical::North) => self.y1 += offset.y,
                    Some(Vertical::South) => self.y2 += offset.y,
                    None => {}
                }
            }
            Position::Outside => return,
        }
        self.normalize();
    }

    /// Place the far corner directly, used while a new box is being drawn.
    pub fn set_far_corner(&mut self, p: Point) {
        self.x2 = p.x;
        self.y2 = p.y;
        self.normalize();
    }

    pub fn render<S: Surface>(&mut self, surface: &mut S, label: &str, highlight: Option<&Color4>) {
        self.normalize();
        let anchor_half = (self.line_offset / 2.0).ceil();
        let lo = self.line_offset;

        surface.set_stroke_color(highlight.unwrap_or(&self.color));
        surface.set_fill_color(&self.color);
        surface.set_line_width(self.line_width);
        surface.stroke_rect(self.x1, self.y1, self.x2 - self.x1, self.y2 - self.y1);

        let c = self.center;
        let anchors = [
            (self.x1, self.y1),
            (self.x1, c.y),
            (self.x1, self.y2),
            (c.x, self.y1),
            (c.x, self.y2),
            (self.x2, self.y1),
            (self.x2, c.y),
            (self.x2, self.y2),
        ];
        for (x, y) in anchors {
            surface.fill_rect(x - anchor_half, y - anchor_half, lo, lo);
        }
        surface.fill_text(label, c.x, c.y);
    }

    fn normalize(&mut self) {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }
        self.center = Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0);
    }

    fn near(&self, a: f32, b: f32) -> bool {
        (a - b).abs() < self.line_offset
    }

    fn contains(&self, p: Point) -> bool {
        self.x1 - self.line_offset < p.x
            && self.x2 + self.line_offset > p.x
            && self.y1 - self.line_offset < p.y
            && self.y2 + self.line_offset > p.y
    }
}

/// Rounds halves towards positive infinity, so -2.5 becomes -2.
fn round_half_up(v: f32) -> i32 {
    let r = v.round();
    if (r - v).abs() == 0.5 {
        v.ceil() as i32
    } else {
        r as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemeBox {
        MemeBox::new(10.0, 10.0, 50.0, 50.0, 2.0, 4.0, Color4::LIGHT_GREY)
    }

    #[test]
    fn test_normalizes_any_corner_order() {
        let pairs = [
            ((10.0, 0.0), (50.0, 40.0)),
            ((50.0, 0.0), (10.0, 40.0)),
            ((10.0, 40.0), (50.0, 0.0)),
            ((50.0, 40.0), (10.0, 0.0)),
            ((7.0, 7.0), (7.0, 7.0)),
            ((7.0, 3.0), (7.0, -9.0)),
            ((-4.0, 2.0), (6.0, 2.0)),
        ];
        for ((ax, ay), (bx, by)) in pairs {
            let b = MemeBox::new(ax, ay, bx, by, 2.0, 4.0, Color4::LIGHT_GREY);
            let (tl, br) = (b.top_left(), b.bottom_right());
            assert!(tl.x <= br.x && tl.y <= br.y, "{tl:?} {br:?}");
            assert_eq!(tl, Point::new(ax.min(bx), ay.min(by)));
            assert_eq!(br, Point::new(ax.max(bx), ay.max(by)));
            assert_eq!(b.center(), Point::new((tl.x + br.x) / 2.0, (tl.y + br.y) / 2.0));
        }
    }

    #[test]
    fn test_dimensions_idempotent() {
        let mut b = MemeBox::new(3.0, 4.0, 10.0, 9.0, 2.0, 4.0, Color4::LIGHT_GREY);
        let first = b.dimensions();
        assert_eq!(first, b.dimensions());
        assert_eq!(first, Dimensions { x: 7, y: 7, w: 7.0, l: 5.0 });
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(6.5), 7);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49999997), 0);
        assert_eq!(round_half_up(-0.5), 0);
    }

    #[test]
    fn test_classify_corners_and_body() {
        let b = sample();
        assert_eq!(b.classify(Point::new(10.0, 10.0)), Position::Handle(Handle::NorthWest));
        assert_eq!(b.classify(Point::new(50.0, 50.0)), Position::Handle(Handle::SouthEast));
        assert_eq!(b.classify(Point::new(30.0, 30.0)), Position::Inside);
        assert_eq!(b.classify(Point::new(0.0, 0.0)), Position::Outside);
    }

    #[test]
    fn test_classify_edge_midpoints() {
        let b = sample();
        assert_eq!(b.classify(Point::new(30.0, 11.0)), Position::Handle(Handle::North));
        assert_eq!(b.classify(Point::new(31.0, 48.0)), Position::Handle(Handle::South));
        assert_eq!(b.classify(Point::new(9.0, 30.0)), Position::Handle(Handle::West));
        assert_eq!(b.classify(Point::new(52.0, 29.0)), Position::Handle(Handle::East));
    }

    #[test]
    fn test_classify_edge_away_from_anchor_is_inside() {
        let b = sample();
        // On the west edge but neither near a corner nor the middle.
        assert_eq!(b.classify(Point::new(10.0, 20.0)), Position::Inside);
    }

    #[test]
    fn test_classify_band_is_strict() {
        let b = sample();
        assert_eq!(b.classify(Point::new(6.0, 6.0)), Position::Outside);
        assert_eq!(b.classify(Point::new(6.5, 6.5)), Position::Handle(Handle::NorthWest));
    }

    #[test]
    fn test_classify_center_never_outside() {
        for (x1, y1, x2, y2) in [(0.0, 0.0, 0.0, 0.0), (0.0, 0.0, 5.0, 3.0), (-20.0, 7.0, 40.0, 90.0)] {
            let b = MemeBox::new(x1, y1, x2, y2, 1.0, 1.0, Color4::LIGHT_GREY);
            assert_ne!(b.classify(b.center()), Position::Outside);
        }
    }

    #[test]
    fn test_move_keeps_size() {
        let mut b = sample();
        b.apply_offset(Position::Inside, Point::new(5.0, -3.0));
        assert_eq!(b.top_left(), Point::new(15.0, 7.0));
        assert_eq!(b.bottom_right(), Point::new(55.0, 47.0));
        let d = b.dimensions();
        assert_eq!((d.w, d.l), (40.0, 40.0));
    }

    #[test]
    fn test_resize_south_east_only_moves_far_corner() {
        let mut b = sample();
        b.apply_offset(Position::Handle(Handle::SouthEast), Point::new(10.0, 5.0));
        assert_eq!(b.top_left(), Point::new(10.0, 10.0));
        assert_eq!(b.bottom_right(), Point::new(60.0, 55.0));
    }

    #[test]
    fn test_resize_past_opposite_edge_flips() {
        let mut b = sample();
        b.apply_offset(Position::Handle(Handle::SouthEast), Point::new(-50.0, -45.0));
        assert_eq!(b.top_left(), Point::new(0.0, 5.0));
        assert_eq!(b.bottom_right(), Point::new(10.0, 10.0));
        assert_eq!(b.center(), Point::new(5.0, 7.5));
    }

    #[test]
    fn test_edge_handle_ignores_other_axis() {
        let mut b = sample();
        b.apply_offset(Position::Handle(Handle::North), Point::new(100.0, -4.0));
        assert_eq!(b.top_left(), Point::new(10.0, 6.0));
        assert_eq!(b.bottom_right(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_outside_offset_is_noop() {
        let mut b = sample();
        b.apply_offset(Position::Outside, Point::new(3.0, 3.0));
        assert_eq!(b, sample());
    }

    #[test]
    fn test_handle_parts_roundtrip() {
        for h in [
            Handle::NorthWest,
            Handle::North,
            Handle::NorthEast,
            Handle::West,
            Handle::East,
            Handle::SouthWest,
            Handle::South,
            Handle::SouthEast,
        ] {
            assert_eq!(Handle::from_parts(h.vertical(), h.horizontal()), Some(h));
        }
        assert_eq!(Handle::from_parts(None, None), None);
    }
}
