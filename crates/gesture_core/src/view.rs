//! Contract between the gesture controller and whatever renders the image.

use shared::{
    domain::{NormalizedPosition, PartialPosition, PercentPosition},
    error::StyleParseError,
    style::{format_object_position, parse_object_position},
};
use tracing::{debug, warn};

use crate::coords::ViewportGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageOptions {
    /// Rendered inside an embed or another read-only context.
    pub embedded: bool,
    pub locked: bool,
}

impl ImageOptions {
    pub fn allows_drag(&self) -> bool {
        !self.embedded && !self.locked
    }
}

/// The displayed position travels only through the `object-position` style string.
pub trait ImageView {
    fn object_position(&self) -> String;
    fn set_object_position(&mut self, value: String);
    fn geometry(&self) -> ViewportGeometry;
    fn load_state(&self) -> LoadState;

    fn position(&self) -> Result<PercentPosition, StyleParseError> {
        parse_object_position(&self.object_position())
    }

    fn set_position(&mut self, position: PercentPosition) {
        self.set_object_position(format_object_position(position));
    }

    /// A failed image shows no drag affordance.
    fn is_draggable(&self) -> bool {
        self.load_state() != LoadState::Failed
    }
}

#[derive(Debug, Clone)]
pub struct ImageFrame {
    source: String,
    object_position: String,
    geometry: ViewportGeometry,
    load_state: LoadState,
}

impl ImageFrame {
    pub fn new(
        source: impl Into<String>,
        initial: PartialPosition,
        rendered_width: f64,
        rendered_height: f64,
    ) -> Self {
        let position = NormalizedPosition::resolve(initial);
        Self {
            source: source.into(),
            object_position: format_object_position(position.to_percent()),
            geometry: ViewportGeometry {
                rendered_width,
                rendered_height,
                ..ViewportGeometry::default()
            },
            load_state: LoadState::Pending,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn on_load(&mut self, natural_width: f64, natural_height: f64) {
        self.geometry.natural_width = natural_width;
        self.geometry.natural_height = natural_height;
        self.load_state = LoadState::Loaded;
        debug!(
            source = %self.source,
            natural_width, natural_height, "image loaded"
        );
    }

    pub fn on_error(&mut self, reason: &str) {
        self.load_state = LoadState::Failed;
        warn!(source = %self.source, "image failed to load: {reason}");
    }

    pub fn resize(&mut self, rendered_width: f64, rendered_height: f64) {
        self.geometry.rendered_width = rendered_width;
        self.geometry.rendered_height = rendered_height;
    }
}

impl ImageView for ImageFrame {
    fn object_position(&self) -> String {
        self.object_position.clone()
    }

    fn set_object_position(&mut self, value: String) {
        self.object_position = value;
    }

    fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    fn load_state(&self) -> LoadState {
        self.load_state
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
