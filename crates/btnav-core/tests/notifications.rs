use btnav_core::{
    AssetPath, Deferred, InstanceId, MemoryStore, Navigator, NodeId, Notification, PlayMode,
    PlayModeChange, SubtreeRef, TreeContext, VecViewSink, ViewEvent,
};

fn tree(name: &str) -> TreeContext {
    TreeContext::asset(format!("trees/{name}.tree.json"), name)
}

fn navigator() -> Navigator<MemoryStore, VecViewSink> {
    Navigator::new(MemoryStore::new(), VecViewSink::default())
}

#[test]
fn deleting_displayed_tree_clears_on_next_pump() {
    let mut nav = navigator();
    nav.select(tree("root"));
    nav.select(tree("doomed"));
    nav.views_mut().drain();

    nav.handle(Notification::AssetWillDelete(AssetPath::new(
        "trees/doomed.tree.json",
    )));

    // Nothing changes while the notification is being dispatched.
    assert_eq!(nav.displayed(), Some(&tree("doomed")));
    assert_eq!(nav.deferred().count(), 1);
    assert!(nav.views().events.is_empty());

    let saves = nav.store().saves.len();
    assert_eq!(nav.pump(), 1);
    assert!(nav.displayed().is_none());
    assert_eq!(nav.views().events, [ViewEvent::Cleared]);

    // Ancestors stay reachable through the breadcrumbs.
    assert_eq!(nav.depth(), 2);
    assert_eq!(nav.store().saves.len(), saves);
    assert_eq!(nav.store().current(), nav.stack().keys().as_slice());
}

#[test]
fn breadcrumb_after_deleted_subtree_returns_to_ancestor() {
    let mut nav = navigator();
    nav.select_root(Some(tree("root")));
    nav.push_subtree(&SubtreeRef::new(tree("sub"))).unwrap();
    nav.handle(Notification::AssetWillDelete(AssetPath::new(
        "trees/sub.tree.json",
    )));
    nav.pump();

    assert_eq!(nav.stack().get(0), Some(&tree("root")));
    nav.click_breadcrumb(0).unwrap();
    assert_eq!(nav.displayed(), Some(&tree("root")));
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.store().current(), [tree("root").key().clone()]);
}

#[test]
fn deleting_other_documents_is_ignored() {
    let mut nav = navigator();
    nav.select(tree("root"));

    nav.handle(Notification::AssetWillDelete(AssetPath::new(
        "trees/other.tree.json",
    )));

    assert_eq!(nav.deferred().count(), 0);
    assert_eq!(nav.pump(), 0);
    assert_eq!(nav.displayed(), Some(&tree("root")));
}

#[test]
fn runtime_instances_have_no_path_to_delete() {
    let mut nav = navigator();
    nav.select(TreeContext::instance(
        "trees/root.tree.json",
        InstanceId(1),
        "root",
    ));

    nav.handle(Notification::AssetWillDelete(AssetPath::new(
        "trees/root.tree.json",
    )));

    assert_eq!(nav.deferred().count(), 0);
}

#[test]
fn deferred_clear_skips_tree_navigated_away_from() {
    let mut nav = navigator();
    nav.select(tree("doomed"));
    nav.handle(Notification::AssetWillDelete(AssetPath::new(
        "trees/doomed.tree.json",
    )));
    nav.select_root(Some(tree("fresh")));

    assert_eq!(nav.pump(), 1);
    assert_eq!(nav.displayed(), Some(&tree("fresh")));
}

#[test]
fn selection_change_opens_selected_tree_as_new_root() {
    let mut nav = navigator();
    nav.select(tree("a"));
    nav.select(tree("b"));

    nav.handle(Notification::SelectionChanged(Some(tree("agent"))));
    assert_eq!(nav.stack().keys(), vec![tree("agent").key().clone()]);

    nav.handle(Notification::SelectionChanged(None));
    assert_eq!(nav.displayed(), Some(&tree("agent")));
}

#[test]
fn entering_play_mode_syncs_selection_after_pump() {
    let live = TreeContext::instance("trees/agent.tree.json", InstanceId(9), "agent");
    let mut nav = navigator();
    nav.select(tree("agent"));

    nav.handle(Notification::PlayMode(PlayModeChange::EnteredPlayMode {
        selected: Some(live.clone()),
    }));
    assert_eq!(nav.mode(), PlayMode::Playing);
    assert_eq!(
        nav.deferred().next(),
        Some(&Deferred::SyncSelection(Some(live.clone())))
    );
    assert_eq!(nav.displayed(), Some(&tree("agent")));

    nav.pump();
    assert_eq!(nav.displayed(), Some(&live));
    assert_eq!(nav.depth(), 1);
}

#[test]
fn returning_to_edit_mode_without_selection_keeps_tree() {
    let mut nav = navigator();
    nav.select(tree("agent"));
    nav.handle(Notification::PlayMode(PlayModeChange::EnteredPlayMode {
        selected: None,
    }));
    nav.handle(Notification::PlayMode(PlayModeChange::ExitingPlayMode));
    nav.handle(Notification::PlayMode(PlayModeChange::EnteredEditMode {
        selected: None,
    }));

    assert_eq!(nav.pump(), 2);
    assert_eq!(nav.mode(), PlayMode::Editing);
    assert_eq!(nav.displayed(), Some(&tree("agent")));
    assert!(nav.views().events.contains(&ViewEvent::InspectorCleared));
}

#[test]
fn undo_redo_repopulates_displayed_tree_only() {
    let mut nav = navigator();
    nav.handle(Notification::UndoRedo);
    assert!(nav.views().events.is_empty());

    nav.select(tree("a"));
    nav.views_mut().drain();
    nav.handle(Notification::UndoRedo);
    assert_eq!(
        nav.views().events,
        [ViewEvent::Repopulated { context: tree("a") }]
    );
}

#[test]
fn node_selection_updates_inspector() {
    let mut nav = navigator();
    nav.select(tree("a"));
    nav.views_mut().drain();

    nav.handle(Notification::NodeSelected(NodeId::new("n-1")));
    assert_eq!(
        nav.views().events,
        [ViewEvent::NodeInspected {
            context: tree("a"),
            node: NodeId::new("n-1")
        }]
    );
}

#[test]
fn inspector_update_refreshes_node_states_only_while_playing() {
    let mut nav = navigator();
    nav.select(tree("a"));
    nav.views_mut().drain();

    nav.handle(Notification::InspectorUpdate);
    assert!(nav.views().events.is_empty());

    nav.handle(Notification::PlayMode(PlayModeChange::EnteredPlayMode {
        selected: None,
    }));
    nav.handle(Notification::InspectorUpdate);
    assert_eq!(
        nav.views().events,
        [ViewEvent::NodeStatesRefreshed { context: tree("a") }]
    );
}
