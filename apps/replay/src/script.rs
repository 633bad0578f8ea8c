//! Recorded gesture scripts and their replay against an in-memory metadata store.

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Result;
use futures::future::join_all;
use gesture_core::{
    GestureBindings, GestureController, GestureEvent, ImageFrame, ImageOptions, ImageView,
    InputDevice, InputEvent, SourceResolver, VaultIndex,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{domain::DocumentId, settings::DragModifier};
use storage::{DocumentMetadata, MetadataStore, PositionStore};
use tokio::{runtime::Handle, sync::watch};
use tracing::{info, warn};

use crate::config::Settings;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub document: DocumentId,
    pub source: String,
    #[serde(default)]
    pub embedded: bool,
    pub frame: FrameSpec,
    /// Simulates the image failing to load with this reason.
    #[serde(default)]
    pub load_error: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default)]
    pub vault: Vec<String>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FrameSpec {
    pub width: f64,
    pub height: f64,
    pub natural_width: f64,
    pub natural_height: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down(ScriptPointer),
    Move(ScriptPointer),
    Up,
    Resize {
        width: f64,
        height: f64,
    },
    /// Changes drag settings between events, as a settings tab would.
    Configure {
        modifier: Option<DragModifier>,
        allow_mobile_drag: Option<bool>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPointer {
    #[serde(default)]
    pub device: InputDevice,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[serde(default)]
    pub modifiers: Vec<DragModifier>,
}

impl ScriptPointer {
    /// A touch sample without coordinates carries no contact points. A mouse sample
    /// without them is malformed and yields `None`.
    pub fn to_input(&self) -> Option<InputEvent> {
        match (self.device, self.x, self.y) {
            (InputDevice::Mouse, Some(x), Some(y)) => Some(InputEvent::mouse_with(
                x,
                y,
                self.modifiers.iter().copied().collect(),
            )),
            (InputDevice::Mouse, _, _) => None,
            (InputDevice::Touch, Some(x), Some(y)) => Some(InputEvent::touch(x, y)),
            (InputDevice::Touch, _, _) => Some(InputEvent::Touch {
                touches: Vec::new(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub document: DocumentId,
    pub resolved_source: String,
    pub attached: bool,
    pub object_position: String,
    pub commits: usize,
    pub failed_commits: usize,
    pub metadata: Option<DocumentMetadata>,
}

pub async fn run_script(
    script: Script,
    settings: &Settings,
    resource_root: &str,
) -> Result<ReplayReport> {
    let document = script.document.clone();
    let store = MetadataStore::new(settings.metadata.clone());
    store
        .insert_document(document.clone(), script.metadata.clone())
        .await;

    let vault = VaultIndex::new(resource_root).with_files(script.vault.iter().cloned());
    let resolved_source = vault.resolve(&script.source, document.as_str());

    let initial = store.load(&document).await?;
    let mut frame = ImageFrame::new(
        resolved_source.clone(),
        initial,
        script.frame.width,
        script.frame.height,
    );
    match &script.load_error {
        Some(reason) => frame.on_error(reason),
        None => frame.on_load(script.frame.natural_width, script.frame.natural_height),
    }
    let rendered = frame.object_position();

    let options = ImageOptions {
        embedded: script.embedded,
        locked: store.is_locked(&document).await?,
    };
    let (settings_tx, settings_rx) = watch::channel(settings.drag.clone());
    let bindings = GestureBindings {
        settings: settings_rx,
        store: Arc::new(store.clone()),
        runtime: Handle::current(),
    };

    let Some(mut controller) = GestureController::attach(options, document.clone(), frame, bindings)
    else {
        info!(document = %document, "image position is fixed, events not replayed");
        return Ok(ReplayReport {
            document: document.clone(),
            resolved_source,
            attached: false,
            object_position: rendered,
            commits: 0,
            failed_commits: 0,
            metadata: store.document(&document).await,
        });
    };

    let mut pending = Vec::new();
    for (index, event) in script.events.into_iter().enumerate() {
        let gesture = match event {
            ScriptEvent::Down(pointer) => {
                let Some(input) = replayable(index, &pointer) else {
                    continue;
                };
                GestureEvent::Down(input)
            }
            ScriptEvent::Move(pointer) => {
                let Some(input) = replayable(index, &pointer) else {
                    continue;
                };
                GestureEvent::Move(input)
            }
            ScriptEvent::Up => GestureEvent::Up,
            ScriptEvent::Resize { width, height } => {
                controller.view_mut().resize(width, height);
                continue;
            }
            ScriptEvent::Configure {
                modifier,
                allow_mobile_drag,
            } => {
                settings_tx.send_modify(|drag| {
                    if let Some(modifier) = modifier {
                        drag.modifier = modifier;
                    }
                    if let Some(allow) = allow_mobile_drag {
                        drag.allow_mobile_drag = allow;
                    }
                });
                continue;
            }
        };
        if let Some(handle) = controller.handle(gesture) {
            pending.push(handle);
        }
    }

    let commits = pending.len();
    let mut failed_commits = 0;
    for result in join_all(pending).await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                failed_commits += 1;
                warn!("commit rejected: {err:#}");
            }
            Err(err) => {
                failed_commits += 1;
                warn!("commit task failed: {err}");
            }
        }
    }

    Ok(ReplayReport {
        document: document.clone(),
        resolved_source,
        attached: true,
        object_position: controller.view().object_position(),
        commits,
        failed_commits,
        metadata: store.document(&document).await,
    })
}

fn replayable(index: usize, pointer: &ScriptPointer) -> Option<InputEvent> {
    let input = pointer.to_input();
    if input.is_none() {
        warn!(index, "skipping mouse event without coordinates");
    }
    input
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
