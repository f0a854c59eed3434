//! Mouse-driven editing of the boxes drawn over the background image.
//!
//! The container owns the boxes (their order is both the z-order for hit
//! testing and the 1-based label), the current selection and the last
//! pointer position of an ongoing drag. Event handlers mutate that state and
//! repaint the surface before returning.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::BoxStyle;
use crate::error::{Error, Result};
use crate::geometry::{Handle, MemeBox, Point, Position};
use crate::selection::SelectedArea;
use crate::surface::{CursorStyle, Surface};

/// Receives notifications when boxes are appended or deleted.
pub trait BoxObserver {
    fn on_box_added(&mut self, _index: usize) {}
    fn on_box_removed(&mut self, _index: usize) {}
}

impl<T: BoxObserver> BoxObserver for Rc<RefCell<T>> {
    fn on_box_added(&mut self, index: usize) {
        self.borrow_mut().on_box_added(index);
    }

    fn on_box_removed(&mut self, index: usize) {
        self.borrow_mut().on_box_removed(index);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Interacting { creating: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

pub struct BoxContainer<S: Surface> {
    surface: S,
    background: Option<S::Image>,
    style: BoxStyle,
    boxes: Vec<MemeBox>,
    selected: SelectedArea,
    /// Last pointer position while a button is held.
    mousedown: Option<Point>,
    creating: bool,
    observers: Vec<Box<dyn BoxObserver>>,
}

impl<S: Surface> BoxContainer<S> {
    pub fn new(surface: S, style: BoxStyle) -> Result<Self> {
        let (width, height) = surface.size();
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::SurfaceUnavailable { width, height });
        }
        Ok(Self {
            surface,
            background: None,
            style,
            boxes: Vec::new(),
            selected: SelectedArea::none(),
            mousedown: None,
            creating: false,
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn BoxObserver>) {
        self.observers.push(observer);
    }

    /// Called once the background image is decoded.
    pub fn set_background(&mut self, image: S::Image) {
        self.background = Some(image);
        self.redraw();
    }

    pub fn boxes(&self) -> &[MemeBox] {
        &self.boxes
    }

    pub fn selected(&self) -> SelectedArea {
        self.selected
    }

    pub fn state(&self) -> InteractionState {
        match self.mousedown {
            None => InteractionState::Idle,
            Some(_) => InteractionState::Interacting {
                creating: self.creating,
            },
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn redraw(&mut self) {
        let (w, h) = self.surface.size();
        self.surface.clear_rect(0.0, 0.0, w, h);
        if let Some(image) = &self.background {
            self.surface.draw_image(image, 0.0, 0.0);
        }
        self.surface.set_font_size(self.style.font_size);
        for (i, b) in self.boxes.iter_mut().enumerate() {
            let highlight = (self.selected.box_id == Some(i)).then_some(&self.style.highlight);
            b.render(&mut self.surface, &(i + 1).to_string(), highlight);
        }
    }

    /// Append a box of width `w` and length `l` centered on `center`.
    pub fn add_box(&mut self, center: Point, w: f32, l: f32) {
        let hw = (w / 2.0).ceil();
        let hl = (l / 2.0).ceil();
        self.boxes.push(MemeBox::new(
            center.x - hw,
            center.y - hl,
            center.x + hw,
            center.y + hl,
            self.style.line_width,
            self.style.line_offset,
            self.style.color.clone(),
        ));
        let index = self.boxes.len() - 1;
        tracing::debug!(index, x = center.x, y = center.y, w, l, "box added");
        for observer in &mut self.observers {
            observer.on_box_added(index);
        }
        self.redraw();
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.mousedown = Some(p);
        self.select_at(p);
        self.update_cursor(p);
        self.redraw();
    }

    pub fn pointer_move(&mut self, p: Point) {
        let Some(last) = self.mousedown else {
            self.update_cursor(p);
            return;
        };
        if let Some(index) = self.resolve_active_box() {
            let b = &mut self.boxes[index];
            if self.creating {
                b.set_far_corner(p);
            } else {
                b.apply_offset(self.selected.position, p - last);
            }
        }
        self.mousedown = Some(p);
        self.redraw();
    }

    pub fn pointer_up(&mut self, p: Point) {
        if self.mousedown.is_none() {
            return;
        }
        self.clear_selection();
        self.update_cursor(p);
    }

    /// The pointer left the surface. A box still being drawn is discarded.
    pub fn pointer_leave(&mut self) {
        if self.mousedown.is_none() {
            return;
        }
        if self.creating {
            self.remove_selected_box();
        } else {
            self.clear_selection();
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.mousedown.is_none() {
            return;
        }
        if key == Key::Escape {
            self.remove_selected_box();
            self.surface.set_cursor(CursorStyle::Default);
        }
    }

    /// First box, in z-order, that the point hits.
    pub fn hit_test(&self, p: Point) -> Option<(usize, Position)> {
        self.boxes.iter().enumerate().find_map(|(i, b)| match b.classify(p) {
            Position::Outside => None,
            position => Some((i, position)),
        })
    }

    fn resolve_active_box(&self) -> Option<usize> {
        self.selected.box_id.filter(|&i| i < self.boxes.len())
    }

    /// Select the box under `p`, keeping an existing selection. Clicking on
    /// empty space spawns a new box dragged from its south-east corner.
    fn select_at(&mut self, p: Point) {
        if self.resolve_active_box().is_some() {
            return;
        }
        if let Some((index, position)) = self.hit_test(p) {
            tracing::trace!(index, position = position.code(), "box selected");
            self.selected = SelectedArea::new(index, position);
            return;
        }
        self.add_box(p, 0.0, 0.0);
        self.creating = true;
        self.selected = SelectedArea::new(self.boxes.len() - 1, Position::Handle(Handle::SouthEast));
    }

    fn update_cursor(&mut self, p: Point) {
        let position = if self.selected.is_active() {
            self.selected.position
        } else {
            self.hit_test(p).map_or(Position::Outside, |(_, position)| position)
        };
        let cursor = CursorStyle::from_position(position, self.mousedown.is_some());
        self.surface.set_cursor(cursor);
    }

    fn remove_selected_box(&mut self) {
        if let Some(index) = self.resolve_active_box() {
            self.boxes.remove(index);
            tracing::debug!(index, creating = self.creating, "box removed");
            for observer in &mut self.observers {
                observer.on_box_removed(index);
            }
        }
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.mousedown = None;
        self.selected = SelectedArea::none();
        self.creating = false;
        self.redraw();
    }
}
