//! Per-box texts and the meme request built from them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::container::BoxObserver;
use crate::error::{Error, Result};
use crate::geometry::{Dimensions, MemeBox, Point};

/// Geometry of one text box as the meme generator expects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxData {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub length: i32,
}

impl BoxData {
    /// `"x|y|w|l"`, the value of a hidden `box` field.
    pub fn to_field(&self) -> String {
        self.to_string()
    }
}

impl From<Dimensions> for BoxData {
    fn from(d: Dimensions) -> Self {
        Self {
            x: d.x,
            y: d.y,
            width: d.w.round() as i32,
            length: d.l.round() as i32,
        }
    }
}

impl fmt::Display for BoxData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}", self.x, self.y, self.width, self.length)
    }
}

impl FromStr for BoxData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidBoxData(s.to_string());
        let values = s
            .split('|')
            .map(|v| v.trim().parse::<i32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;
        match values[..] {
            [x, y, width, length] => Ok(Self {
                x,
                y,
                width,
                length,
            }),
            _ => Err(invalid()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemeRequest {
    pub from: String,
    pub boxes: Vec<BoxData>,
    pub texts: Vec<String>,
}

impl MemeRequest {
    /// Form fields in submission order: the image, every text, every box.
    pub fn hidden_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("from", self.from.clone())];
        fields.extend(self.texts.iter().map(|t| ("box-text", t.clone())));
        fields.extend(self.boxes.iter().map(|b| ("box", b.to_field())));
        fields
    }

    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.hidden_fields())
            .finish()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), boxes = self.boxes.len(), "meme request saved");
        Ok(())
    }
}

/// Border around the default boxes, as a fraction of the image size.
const TEMPLATE_BORDER: f64 = 0.01;

/// The two boxes every new meme starts with: one across the top third of the
/// image and one across the bottom third. Returned as `(center, w, l)`.
pub fn template_boxes(width: u32, height: u32) -> [(Point, f32, f32); 2] {
    let (img_w, img_h) = (f64::from(width), f64::from(height));
    let w = img_w * (1.0 - 2.0 * TEMPLATE_BORDER);
    let h = img_h * (1.0 / 3.0 - TEMPLATE_BORDER);
    let x = (img_w * 0.5) as i32;
    let top = (img_h * TEMPLATE_BORDER + h * 0.5) as i32;
    let bottom = (img_h - img_h * TEMPLATE_BORDER - h * 0.5) as i32;
    let (w, h) = (w as i32 as f32, h as i32 as f32);
    [
        (Point::new(x as f32, top as f32), w, h),
        (Point::new(x as f32, bottom as f32), w, h),
    ]
}

/// Text fields that follow the container's boxes: one entry per box, in the
/// same order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemeForm {
    from: String,
    texts: Vec<String>,
}

impl MemeForm {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            texts: Vec::new(),
        }
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        self.texts.get_mut(index)
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.texts.get_mut(index) {
            *slot = text.into();
        }
    }

    pub fn request(&self, boxes: &[MemeBox]) -> Result<MemeRequest> {
        if boxes.is_empty() {
            return Err(Error::NoBoxes);
        }
        let boxes = boxes
            .iter()
            .map(|b| BoxData::from(b.clone().dimensions()))
            .collect();
        Ok(MemeRequest {
            from: self.from.clone(),
            boxes,
            texts: self.texts.clone(),
        })
    }
}

impl BoxObserver for MemeForm {
    fn on_box_added(&mut self, index: usize) {
        self.texts.insert(index.min(self.texts.len()), String::new());
    }

    fn on_box_removed(&mut self, index: usize) {
        if index < self.texts.len() {
            self.texts.remove(index);
        }
    }
}
