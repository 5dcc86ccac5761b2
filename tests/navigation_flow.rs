use tempfile::TempDir;

use courser::app::{App, AppScreen};
use courser::config::Config;
use courser::focus::traversal::FocusTarget;
use courser::focus::tray::InputSource;
use courser::model::course::CourseStore;
use courser::nav::controller::{NavAction, RenderMode};
use courser::nav::fit::LayoutFit;
use courser::store::kv::{KeyValue, MemoryStore};
use courser::store::prefs::DurableStore;
use courser::store::session::SessionStore;

const TWO_SEQUENCE_COURSE: &str = r#"{
    "id": "course-v1:flow",
    "title": "Flow Course",
    "exit_page_enabled": true,
    "exit_text": "Finish course",
    "sections": [{
        "id": "sec", "title": "Section",
        "sequences": [
            {"id": "seq-a", "title": "First", "units": [
                {"id": "a1", "title": "A1", "content_type": "video"},
                {"id": "a2", "title": "A2", "content_type": "problem"},
                {"id": "a3", "title": "A3", "content_type": "vertical"}
            ]},
            {"id": "seq-b", "title": "Second", "units": [
                {"id": "b1", "title": "B1", "content_type": "other"}
            ]}
        ]
    }]
}"#;

fn flow_app() -> App {
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();
    let mut app = App::new(
        store,
        Config::default(),
        Box::new(MemoryStore::new()),
        Box::new(MemoryStore::new()),
    );
    app.apply_size(120, 40);
    app
}

fn press_next(app: &mut App) {
    app.focus.focus(FocusTarget::Next);
    app.activate_focused(InputSource::Keyboard);
}

fn press_previous(app: &mut App) {
    app.focus.focus(FocusTarget::Previous);
    app.activate_focused(InputSource::Keyboard);
}

#[test]
fn next_next_previous_walks_units_without_leaving_the_sequence() {
    let mut app = flow_app();
    assert_eq!(app.unit_id.as_deref(), Some("a1"));

    press_next(&mut app);
    press_next(&mut app);
    assert_eq!(app.sequence_id, "seq-a");
    assert_eq!(app.unit_id.as_deref(), Some("a3"));

    press_previous(&mut app);
    assert_eq!(app.sequence_id, "seq-a");
    assert_eq!(app.unit_id.as_deref(), Some("a2"));
}

#[test]
fn course_traversal_ends_at_the_exit_screen() {
    let mut app = flow_app();

    // a1 -> a2 -> a3 -> seq-b/b1 -> exit screen.
    for _ in 0..3 {
        press_next(&mut app);
    }
    assert_eq!(app.sequence_id, "seq-b");
    assert_eq!(app.unit_id.as_deref(), Some("b1"));

    let plan = app.plan();
    assert_eq!(plan.next.action, NavAction::CourseExit);
    assert_eq!(plan.next.label, "Finish course");

    press_next(&mut app);
    assert_eq!(app.screen, AppScreen::CourseExit);

    app.return_from_exit();
    assert_eq!(app.screen, AppScreen::Course);
    assert_eq!(app.unit_id.as_deref(), Some("b1"));
}

#[test]
fn previous_at_course_start_is_disabled_and_inert() {
    let mut app = flow_app();
    let plan = app.plan();
    assert!(!plan.previous.enabled);
    assert!(!app.focus.contains(FocusTarget::Previous));

    press_previous(&mut app);
    assert_eq!(app.unit_id.as_deref(), Some("a1"));
    assert_eq!(app.sequence_id, "seq-a");
}

#[test]
fn collapse_to_dropdown_and_pick_a_unit() {
    let mut app = flow_app();
    app.apply_size(10, 40);
    assert_eq!(app.fit, LayoutFit::Collapsed);
    assert!(matches!(app.plan().mode, RenderMode::Dropdown { .. }));

    // The toggle is focusable even though it renders disabled-looking.
    app.focus.focus(FocusTarget::DropdownToggle);
    app.activate_focused(InputSource::Keyboard);
    assert!(app.dropdown_open);

    app.focus.focus(FocusTarget::DropdownItem(2));
    app.activate_focused(InputSource::Keyboard);
    assert!(!app.dropdown_open);
    assert_eq!(app.unit_id.as_deref(), Some("a3"));

    // Growing the terminal re-resolves back to tabs.
    app.apply_size(120, 40);
    assert!(matches!(app.plan().mode, RenderMode::Tabs(_)));
}

#[test]
fn tray_state_round_trips_through_the_session_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();

    let mut app = App::new(
        store,
        Config::default(),
        Box::new(SessionStore::open_at(path.clone(), "sess-1".into())),
        Box::new(MemoryStore::new()),
    );
    app.apply_size(120, 40);
    assert!(app.tray.is_open());

    app.focus.focus(FocusTarget::TrayToggle);
    app.activate_focused(InputSource::Keyboard);
    assert!(!app.tray.is_open());
    drop(app);

    // Same session: the closed state is restored for this course.
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();
    let app = App::new(
        store,
        Config::default(),
        Box::new(SessionStore::open_at(path.clone(), "sess-1".into())),
        Box::new(MemoryStore::new()),
    );
    assert!(!app.tray.is_open());

    // A new login session falls back to the default.
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();
    let app = App::new(
        store,
        Config::default(),
        Box::new(SessionStore::open_at(path, "sess-2".into())),
        Box::new(MemoryStore::new()),
    );
    assert!(app.tray.is_open());
}

#[test]
fn keyboard_reopen_persists_focus_intent_for_the_next_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();

    let mut app = App::new(
        store,
        Config::default(),
        Box::new(SessionStore::open_at(path.clone(), "sess-1".into())),
        Box::new(MemoryStore::new()),
    );
    app.apply_size(120, 40);

    // Close, then reopen from the keyboard.
    app.toggle_tray(InputSource::Keyboard);
    app.toggle_tray(InputSource::Keyboard);
    assert!(app.tray.is_open());
    assert_eq!(app.focus.current(), Some(FocusTarget::TrayClose));
    drop(app);

    // The persisted intent lands focus on the close control at startup.
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();
    let app = App::new(
        store,
        Config::default(),
        Box::new(SessionStore::open_at(path, "sess-1".into())),
        Box::new(MemoryStore::new()),
    );
    assert!(app.tray.is_open());
    assert_eq!(app.focus.current(), Some(FocusTarget::TrayClose));
}

#[test]
fn open_tray_traps_tab_until_closed() {
    let mut app = flow_app();
    assert!(app.tray.is_open());
    app.focus.focus(FocusTarget::TrayClose);

    // Tabbing in either direction never escapes the close/trigger pair.
    for forward in [true, false, true, true, false] {
        app.tab_key(forward);
        assert!(matches!(
            app.focus.current(),
            Some(FocusTarget::TrayClose | FocusTarget::TrayToggle)
        ));
    }

    app.focus.focus(FocusTarget::TrayClose);
    app.activate_focused(InputSource::Keyboard);
    assert!(!app.tray.is_open());

    // With the tray closed, Tab reaches the strip again.
    app.focus.focus(FocusTarget::TrayToggle);
    app.tab_key(true);
    assert!(app
        .focus
        .current()
        .is_some_and(|t| t != FocusTarget::TrayClose));
}

#[test]
fn sidebar_preference_survives_reopen_of_the_durable_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();

    let mut app = App::new(
        store,
        Config::default(),
        Box::new(MemoryStore::new()),
        Box::new(DurableStore::open_at(path.clone())),
    );
    app.apply_size(120, 40);
    assert!(app.show_sidebar());
    app.toggle_sidebar_preference();
    assert!(!app.show_sidebar());
    drop(app);

    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();
    let app = App::new(
        store,
        Config::default(),
        Box::new(MemoryStore::new()),
        Box::new(DurableStore::open_at(path)),
    );
    assert!(!app.show_sidebar());
}

#[test]
fn tray_keys_are_namespaced_per_course() {
    let mut session = MemoryStore::new();
    session.set("notificationTrayStatus.course-v1:flow", "closed");

    let store = CourseStore::from_json(TWO_SEQUENCE_COURSE).unwrap();
    let app = App::new(
        store,
        Config::default(),
        Box::new(session),
        Box::new(MemoryStore::new()),
    );
    assert!(!app.tray.is_open());

    // A different course id ignores that key entirely.
    let other = CourseStore::from_json(
        &TWO_SEQUENCE_COURSE.replace("course-v1:flow", "course-v1:other"),
    )
    .unwrap();
    let mut session = MemoryStore::new();
    session.set("notificationTrayStatus.course-v1:flow", "closed");
    let app = App::new(
        other,
        Config::default(),
        Box::new(session),
        Box::new(MemoryStore::new()),
    );
    assert!(app.tray.is_open());
}
