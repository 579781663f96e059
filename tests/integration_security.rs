mod common;

use common::{
    RecordingNode, RecordingSession, crud_codec, editor_permissions, flags, strings,
};
use strata::{
    ContentDocument, Document, HydrateEvent, LifecycleSubscriber, PersistEvent,
    RolePermissions, SecuritySubscriber, UnsecuredDocument,
};
use strata_core::RepositoryError;
use strata_repository::{MemoryNode, MemorySession, Node, PropertyValue};

const PATH: &str = "/some/path";

fn live_session_with(properties: &[(&str, PropertyValue)]) -> MemorySession {
    let mut live = MemorySession::new("default_live");
    let node = live.add_node(PATH).unwrap();
    for (name, value) in properties {
        node.set_property(name, value.clone()).unwrap();
    }
    live
}

fn live_property(live: &MemorySession, name: &str) -> Option<PropertyValue> {
    live.get(PATH)
        .and_then(|node| node.property(name).ok())
        .map(|property| property.value)
}

#[test]
fn test_persist_writes_draft_and_live() {
    let mut draft = RecordingNode::new(PATH).with_property("sec:role-1", strings(&["view"]));
    let mut live = live_session_with(&[]);
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    assert_eq!(
        draft.sets,
        vec![(
            "sec:role-1".to_string(),
            strings(&["view", "add", "edit"])
        )]
    );
    assert!(draft.removals.is_empty());
    assert_eq!(
        live_property(&live, "sec:role-1"),
        Some(strings(&["view", "add", "edit"]))
    );
}

#[test]
fn test_persist_without_path_skips_live_session() {
    let mut draft = RecordingNode::new(PATH).with_property("sec:role-1", strings(&["view"]));
    let mut live = RecordingSession::new(live_session_with(&[]));
    let mut document = ContentDocument::new("Page").with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    assert_eq!(live.lookups(), 0);
    assert_eq!(draft.sets.len(), 1);
    assert!(draft.removals.is_empty());
    assert!(!live.inner.get(PATH).unwrap().has_property("sec:role-1"));
}

#[test]
fn test_persist_with_deleting_roles() {
    let mut draft = RecordingNode::new(PATH).with_property("sec:role-2", strings(&["view"]));
    let mut live = live_session_with(&[("sec:role-2", strings(&["view"]))]);
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    assert_eq!(draft.removals, vec!["sec:role-2".to_string()]);
    assert!(!draft.has_property("sec:role-2"));
    assert!(draft.has_property("sec:role-1"));

    assert_eq!(live_property(&live, "sec:role-2"), None);
    assert_eq!(
        live_property(&live, "sec:role-1"),
        Some(strings(&["view", "add", "edit"]))
    );
}

#[test]
fn test_role_with_no_permissions_is_written_not_removed() {
    let mut draft =
        RecordingNode::new(PATH).with_property("sec:role-1", strings(&["view", "edit"]));
    let mut live = live_session_with(&[("sec:role-1", strings(&["view", "edit"]))]);

    let mut permissions = RolePermissions::new();
    permissions.insert(
        1,
        flags(&[
            ("view", false),
            ("add", false),
            ("edit", false),
            ("delete", false),
        ]),
    );
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(permissions);

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    assert!(draft.removals.is_empty());
    assert_eq!(draft.property("sec:role-1").unwrap().value, strings(&[]));
    assert_eq!(live_property(&live, "sec:role-1"), Some(strings(&[])));
}

#[test]
fn test_removed_role_is_removed_exactly_once() {
    let mut draft = RecordingNode::new(PATH)
        .with_property("sec:role-1", strings(&["view"]))
        .with_property("sec:role-2", strings(&["view", "edit"]));
    let mut live = live_session_with(&[]);
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    assert_eq!(draft.removals, vec!["sec:role-2".to_string()]);
}

#[test]
fn test_live_node_is_reconciled_against_its_own_properties() {
    // Draft carries roles 1 and 2, live only role 3.
    let mut draft = RecordingNode::new(PATH)
        .with_property("sec:role-1", strings(&["view"]))
        .with_property("sec:role-2", strings(&["view"]));
    let mut live = live_session_with(&[("sec:role-3", strings(&["view"]))]);
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    assert_eq!(draft.removals, vec!["sec:role-2".to_string()]);
    assert!(draft.has_property("sec:role-1"));

    let live_node = live.get(PATH).unwrap();
    let names: Vec<String> = live_node
        .properties("sec:role-*")
        .unwrap()
        .into_iter()
        .map(|property| property.name)
        .collect();
    assert_eq!(names, vec!["sec:role-1".to_string()]);
}

#[test]
fn test_live_node_without_stale_role_does_not_error() {
    let mut draft = RecordingNode::new(PATH)
        .with_property("sec:role-1", strings(&["view"]))
        .with_property("sec:role-2", strings(&["view"]));
    let mut live = live_session_with(&[]);
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    let result = subscriber.handle_persist(&mut PersistEvent::new(&mut document, &mut draft));

    assert!(result.is_ok());
    assert_eq!(
        live_property(&live, "sec:role-1"),
        Some(strings(&["view", "add", "edit"]))
    );
    assert_eq!(live_property(&live, "sec:role-2"), None);
}

#[test]
fn test_missing_live_node_propagates() {
    let mut draft = RecordingNode::new(PATH);
    let mut live = MemorySession::new("default_live");
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    let result = subscriber.handle_persist(&mut PersistEvent::new(&mut document, &mut draft));

    assert!(matches!(
        result,
        Err(RepositoryError::NodeNotFound(path)) if path == PATH
    ));
}

#[test]
fn test_unsecured_document_is_ignored() {
    let mut draft = RecordingNode::new(PATH).with_property("sec:role-1", strings(&["view"]));
    let mut live = RecordingSession::new(live_session_with(&[]));
    let mut document = UnsecuredDocument {
        path: Some(PATH.to_string()),
    };

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_persist(&mut PersistEvent::new(&mut document, &mut draft))
        .unwrap();

    let node = MemoryNode::new(PATH);
    subscriber
        .handle_hydrate(&mut HydrateEvent::new(&mut document, &node))
        .unwrap();

    assert!(draft.sets.is_empty());
    assert!(draft.removals.is_empty());
    assert_eq!(live.lookups(), 0);
}

#[test]
fn test_hydrate_builds_flags_for_every_role() {
    let node = RecordingNode::new(PATH)
        .with_property("sec:role-1", strings(&["view", "add", "edit"]))
        .with_property("sec:role-2", strings(&["view", "edit"]));
    let mut live = MemorySession::new("default_live");
    let mut document = ContentDocument::new("Page");

    let subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_hydrate(&mut HydrateEvent::new(&mut document, &node))
        .unwrap();

    let mut expected = RolePermissions::new();
    expected.insert(
        1,
        flags(&[
            ("view", true),
            ("add", true),
            ("edit", true),
            ("delete", false),
        ]),
    );
    expected.insert(
        2,
        flags(&[
            ("view", true),
            ("add", false),
            ("edit", true),
            ("delete", false),
        ]),
    );
    assert_eq!(document.permissions, expected);
}

#[test]
fn test_hydrate_replaces_previous_permissions() {
    let node = MemoryNode::new(PATH);
    let mut live = MemorySession::new("default_live");
    let mut document = ContentDocument::new("Page").with_permissions(editor_permissions());

    let subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_hydrate(&mut HydrateEvent::new(&mut document, &node))
        .unwrap();

    assert!(document.permissions.is_empty());
}

#[test]
fn test_hydrate_is_permissive_about_stored_values() {
    let node = RecordingNode::new(PATH)
        .with_property("sec:role-1", strings(&["view", "publish"]))
        .with_property("sec:role-2", PropertyValue::from("edit"))
        .with_property("sec:role-3", PropertyValue::Long(64))
        .with_property("sec:role-owner", strings(&["view"]))
        .with_property("title", PropertyValue::from("Page"));
    let mut live = MemorySession::new("default_live");
    let mut document = ContentDocument::new("Page");

    let subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    subscriber
        .handle_hydrate(&mut HydrateEvent::new(&mut document, &node))
        .unwrap();

    let roles: Vec<i64> = document.permissions.keys().copied().collect();
    assert_eq!(roles, vec![1, 2, 3]);
    assert!(document.permissions[&1]["view"]);
    assert!(!document.permissions[&1].contains_key("publish"));
    assert!(document.permissions[&2]["edit"]);
    assert!(document.permissions[&3].values().all(|granted| !granted));
}

#[test]
fn test_persist_then_hydrate_restores_permissions() {
    let mut draft = MemorySession::new("default");
    draft.add_node(PATH).unwrap();
    let mut live = live_session_with(&[]);

    let mut stored = editor_permissions();
    stored.insert(4, flags(&[("view", true), ("delete", true)]));
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(stored);

    let mut subscriber = SecuritySubscriber::new(crud_codec(), &mut live);
    {
        let node = strata_repository::Session::node_mut(&mut draft, PATH).unwrap();
        subscriber
            .handle_persist(&mut PersistEvent::new(&mut document, node))
            .unwrap();
    }

    let mut loaded = ContentDocument::new("Page").with_path(PATH);
    let node = draft.get(PATH).unwrap();
    subscriber
        .handle_hydrate(&mut HydrateEvent::new(&mut loaded, node))
        .unwrap();

    assert_eq!(loaded.permissions[&1], editor_permissions()[&1]);
    assert_eq!(
        loaded.permissions[&4],
        flags(&[
            ("view", true),
            ("add", false),
            ("edit", false),
            ("delete", true),
        ])
    );
    assert_eq!(Document::path(&loaded), Some(PATH));
}

#[test]
fn test_subscriber_as_trait_object() {
    let mut draft = RecordingNode::new(PATH);
    let mut live = live_session_with(&[]);
    let mut document = ContentDocument::new("Page")
        .with_path(PATH)
        .with_permissions(editor_permissions());

    let mut security = SecuritySubscriber::new(crud_codec(), &mut live);
    let subscribers: Vec<&mut dyn LifecycleSubscriber> = vec![&mut security];
    for subscriber in subscribers {
        subscriber
            .on_persist(&mut PersistEvent::new(&mut document, &mut draft))
            .unwrap();
    }

    assert!(draft.has_property("sec:role-1"));
    assert!(live_property(&live, "sec:role-1").is_some());
}
