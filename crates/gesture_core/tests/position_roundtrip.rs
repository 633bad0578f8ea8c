use std::{collections::BTreeMap, sync::Arc};

use gesture_core::{
    GestureBindings, GestureController, ImageFrame, ImageOptions, ImageView, InputEvent,
};
use serde_json::Value;
use shared::{
    domain::{DocumentId, PersistedPositionPatch},
    settings::{DragSettings, MetadataSettings},
};
use storage::{MetadataStore, PositionStore};
use tokio::{runtime::Handle, sync::watch};

fn bindings(store: &MetadataStore) -> GestureBindings {
    let (_tx, rx) = watch::channel(DragSettings::default());
    GestureBindings {
        settings: rx,
        store: Arc::new(store.clone()),
        runtime: Handle::current(),
    }
}

#[tokio::test]
async fn persisted_x_renders_back_with_default_y() {
    let store = MetadataStore::new(MetadataSettings::default());
    let doc = DocumentId::new("journal.md");
    store.insert_document(doc.clone(), BTreeMap::new()).await;

    store
        .upsert(&doc, PersistedPositionPatch::X(0.333))
        .await
        .expect("upsert");

    let initial = store.load(&doc).await.expect("load");
    let frame = ImageFrame::new("app://vault/header.jpg", initial, 600.0, 150.0);
    assert_eq!(frame.object_position(), "33.3% 50%");
}

#[tokio::test]
async fn gestures_on_both_axes_accumulate_in_metadata() {
    let store = MetadataStore::new(MetadataSettings::default());
    let doc = DocumentId::new("journal.md");
    let mut fields = BTreeMap::new();
    fields.insert("banner_y".to_string(), Value::from(0.2));
    store.insert_document(doc.clone(), fields).await;

    let initial = store.load(&doc).await.expect("load");
    let mut frame = ImageFrame::new("app://vault/pano.jpg", initial, 400.0, 200.0);
    frame.on_load(2000.0, 500.0);
    let mut controller =
        GestureController::attach(ImageOptions::default(), doc.clone(), frame, bindings(&store))
            .expect("attached");
    assert_eq!(controller.view().object_position(), "50% 20%");

    controller.pointer_down(&InputEvent::mouse(200.0, 100.0));
    controller.pointer_move(&InputEvent::mouse(100.0, 0.0));
    let handle = controller.pointer_up().expect("commit");
    handle.await.expect("join").expect("upsert");

    assert_eq!(controller.view().object_position(), "75% 20%");
    let metadata = store.document(&doc).await.expect("document");
    assert_eq!(metadata.fields["banner_x"], Value::from(0.75));
    assert_eq!(metadata.fields["banner_y"], Value::from(0.2));
}

#[tokio::test]
async fn commit_to_removed_document_is_reported_not_raised() {
    let store = MetadataStore::new(MetadataSettings::default());
    let doc = DocumentId::new("deleted.md");
    store.insert_document(doc.clone(), BTreeMap::new()).await;

    let mut frame = ImageFrame::new("app://vault/a.jpg", Default::default(), 400.0, 200.0);
    frame.on_load(1000.0, 1000.0);
    let mut controller =
        GestureController::attach(ImageOptions::default(), doc.clone(), frame, bindings(&store))
            .expect("attached");

    controller.pointer_down(&InputEvent::mouse(0.0, 100.0));
    store.remove_document(&doc).await;
    controller.pointer_move(&InputEvent::mouse(0.0, 80.0));
    let handle = controller.pointer_up().expect("commit");

    assert!(handle.await.expect("join").is_err());
    assert_eq!(controller.view().object_position(), "50% 60%");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rapid_gestures_persist_the_last_displayed_value() {
    for round in 0..50 {
        let store = MetadataStore::new(MetadataSettings::default());
        let doc = DocumentId::new("journal.md");
        store.insert_document(doc.clone(), BTreeMap::new()).await;

        let mut frame = ImageFrame::new("app://vault/a.jpg", Default::default(), 400.0, 200.0);
        frame.on_load(1000.0, 1000.0);
        let mut controller =
            GestureController::attach(ImageOptions::default(), doc.clone(), frame, bindings(&store))
                .expect("attached");

        let mut handles = Vec::new();
        for _ in 0..4 {
            controller.pointer_down(&InputEvent::mouse(0.0, 100.0));
            controller.pointer_move(&InputEvent::mouse(0.0, 96.0));
            handles.push(controller.pointer_up().expect("commit"));
        }
        for handle in futures::future::join_all(handles).await {
            handle.expect("join").expect("upsert");
        }

        assert_eq!(controller.view().object_position(), "50% 58%");
        let metadata = store.document(&doc).await.expect("document");
        assert_eq!(metadata.fields["banner_y"], Value::from(0.58), "round {round}");
    }
}
