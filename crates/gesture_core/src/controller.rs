use std::sync::Arc;

use shared::{
    domain::{Axis, DocumentId, PercentPosition, PersistedPositionPatch},
    settings::DragSettings,
};
use storage::PositionStore;
use tokio::{
    runtime::Handle,
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    coords::{
        clamp_percent, extract_pointer_position, percent_to_normalized, pixel_delta_to_percent,
    },
    input::{GestureEvent, InputEvent},
    session::DragSession,
    view::{ImageOptions, ImageView},
};

/// Resolves once the store has handled a committed patch. Dropping it does not cancel
/// the write.
pub type CommitHandle = JoinHandle<anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Committing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRefusal {
    AlreadyDragging,
    ImageUnavailable,
    ModifierNotHeld,
    TouchDisabled,
    NoContactPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started(Axis),
    Refused(StartRefusal),
}

#[derive(Clone)]
pub struct GestureBindings {
    pub settings: watch::Receiver<DragSettings>,
    pub store: Arc<dyn PositionStore>,
    pub runtime: Handle,
}

/// Drives drag gestures on a single image. Only the commit at gesture end runs on the
/// bound runtime; it is never awaited here.
pub struct GestureController<V> {
    document: DocumentId,
    view: V,
    session: DragSession,
    phase: GesturePhase,
    bindings: GestureBindings,
    // Completion signal of the latest commit; the next one waits on it.
    last_commit: Option<oneshot::Receiver<()>>,
}

impl<V: ImageView> GestureController<V> {
    /// `None` when the image is embedded, read-only or locked: no events are observed.
    pub fn attach(
        options: ImageOptions,
        document: DocumentId,
        view: V,
        bindings: GestureBindings,
    ) -> Option<Self> {
        if !options.allows_drag() {
            debug!(document = %document, ?options, "drag not attached");
            return None;
        }
        Some(Self {
            document,
            view,
            session: DragSession::default(),
            phase: GesturePhase::Idle,
            bindings,
            last_commit: None,
        })
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn handle(&mut self, event: GestureEvent) -> Option<CommitHandle> {
        match event {
            GestureEvent::Down(input) => {
                self.pointer_down(&input);
                None
            }
            GestureEvent::Move(input) => {
                self.pointer_move(&input);
                None
            }
            GestureEvent::Up => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, input: &InputEvent) -> StartOutcome {
        let outcome = self.try_start(input);
        match outcome {
            StartOutcome::Started(axis) => {
                debug!(document = %self.document, %axis, "drag started");
            }
            StartOutcome::Refused(reason) => {
                debug!(document = %self.document, ?reason, "drag start refused");
            }
        }
        outcome
    }

    fn try_start(&mut self, input: &InputEvent) -> StartOutcome {
        if self.session.is_active() {
            return StartOutcome::Refused(StartRefusal::AlreadyDragging);
        }
        if !self.view.is_draggable() {
            return StartOutcome::Refused(StartRefusal::ImageUnavailable);
        }

        let settings = self.bindings.settings.borrow().clone();
        match input {
            InputEvent::Pointer { modifiers, .. } => {
                if !settings.modifier.is_held(*modifiers) {
                    return StartOutcome::Refused(StartRefusal::ModifierNotHeld);
                }
            }
            InputEvent::Touch { .. } => {
                if !settings.allow_mobile_drag {
                    return StartOutcome::Refused(StartRefusal::TouchDisabled);
                }
            }
        }

        let Some(at) = extract_pointer_position(input) else {
            return StartOutcome::Refused(StartRefusal::NoContactPoint);
        };
        // Locked until release, even if the element resizes.
        let axis = self.view.geometry().axis_lock();
        self.session.begin(at, axis);
        self.enter(GesturePhase::Dragging);
        StartOutcome::Started(axis)
    }

    /// `None` when the displayed position did not change.
    pub fn pointer_move(&mut self, input: &InputEvent) -> Option<PercentPosition> {
        if !self.session.is_active() {
            return None;
        }
        let Some(current) = extract_pointer_position(input) else {
            debug!(document = %self.document, "move without contact point ignored");
            return None;
        };
        let delta = self.session.advance(current)?;
        let axis = self.session.axis();

        let extent = self.view.geometry().rendered_extent(axis);
        let Some(step) = pixel_delta_to_percent(delta.along(axis), extent) else {
            debug!(document = %self.document, %axis, "zero-sized image, move skipped");
            return None;
        };

        let displayed = match self.view.position() {
            Ok(displayed) => displayed,
            Err(err) => {
                warn!(document = %self.document, "move skipped: {err}");
                return None;
            }
        };
        let moved = clamp_percent(displayed.component(axis) + step);
        let next = displayed.with_component(axis, moved);
        self.view.set_position(next);
        Some(next)
    }

    pub fn pointer_up(&mut self) -> Option<CommitHandle> {
        let axis = self.session.finish()?;
        self.enter(GesturePhase::Committing);

        let handle = match self.view.position() {
            Ok(displayed) => {
                let value = percent_to_normalized(displayed.component(axis));
                Some(self.spawn_commit(PersistedPositionPatch::along(axis, value)))
            }
            Err(err) => {
                warn!(document = %self.document, "nothing committed: {err}");
                None
            }
        };

        self.enter(GesturePhase::Idle);
        handle
    }

    /// Commits reach the store in release order, one at a time. Failures are logged and
    /// surface only through the returned handle; the displayed position is kept.
    fn spawn_commit(&mut self, patch: PersistedPositionPatch) -> CommitHandle {
        let store = Arc::clone(&self.bindings.store);
        let document = self.document.clone();
        let (done_tx, done_rx) = oneshot::channel();
        let previous = self.last_commit.replace(done_rx);
        info!(document = %document, ?patch, "committing image position");
        self.bindings.runtime.spawn(async move {
            if let Some(previous) = previous {
                // Errs only when the previous write panicked; proceed either way.
                let _ = previous.await;
            }
            let result = store.upsert(&document, patch).await;
            if let Err(err) = &result {
                warn!(document = %document, ?patch, "position commit failed: {err:#}");
            }
            let _ = done_tx.send(());
            result
        })
    }

    fn enter(&mut self, next: GesturePhase) {
        debug!(document = %self.document, from = ?self.phase, to = ?next, "gesture phase");
        self.phase = next;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
