//! Drag-to-reposition for images shown in a fixed-size frame.
//!
//! A [`GestureController`] owns one image's [`DragSession`], turns pointer or touch
//! travel into a percentage offset along a single locked axis, writes it to the image's
//! `object-position` style and, when the gesture ends, commits the normalized value to a
//! [`storage::PositionStore`].

pub mod controller;
pub mod coords;
pub mod input;
pub mod session;
pub mod source;
pub mod view;

pub use controller::{
    CommitHandle, GestureBindings, GestureController, GesturePhase, StartOutcome, StartRefusal,
};
pub use coords::ViewportGeometry;
pub use input::{GestureEvent, InputDevice, InputEvent, PointerPosition};
pub use session::DragSession;
pub use source::{SourceResolver, VaultIndex};
pub use view::{ImageFrame, ImageOptions, ImageView, LoadState};
