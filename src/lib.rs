//! Draw, drag, resize and delete labeled text boxes over a background image,
//! then turn them into a meme-generation request.

pub mod app;
pub mod config;
pub mod container;
pub mod error;
pub mod form;
pub mod geometry;
pub mod selection;
pub mod surface;

pub use app::{EguiSurface, MemeApp};
pub use config::{BoxStyle, EditorConfig};
pub use container::{BoxContainer, BoxObserver, InteractionState, Key};
pub use error::{Error, Result};
pub use form::{BoxData, MemeForm, MemeRequest};
pub use geometry::{Dimensions, Handle, MemeBox, Point, Position};
pub use selection::SelectedArea;
pub use surface::{Color4, CursorStyle, Surface};
