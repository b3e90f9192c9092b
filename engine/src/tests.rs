//! Unit tests for the engine crate.

use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use rusqlite::Connection;

use super::*;

fn test_app() -> App {
    let store = TaskStore::open_in_memory().expect("in-memory store for tests");
    App::new(store, UiOptions::default())
}

fn seeded_app(names: &[&str]) -> App {
    let mut store = TaskStore::open_in_memory().expect("in-memory store for tests");
    let base = Utc.with_ymd_and_hms(2020, 1, 19, 12, 0, 0).unwrap();
    for (i, name) in names.iter().enumerate() {
        store
            .add_task_at(TaskName::new(name).unwrap(), base + Duration::minutes(i as i64))
            .unwrap();
    }
    App::new(store, UiOptions::default())
}

fn type_draft(app: &mut App, text: &str) {
    app.enter_insert_mode();
    let token = app.insert_token().expect("insert mode");
    app.insert_mode(token).enter_text(text);
}

fn names(app: &App) -> Vec<&str> {
    app.tasks().iter().map(|task| task.name.as_str()).collect()
}

#[test]
fn starts_in_normal_mode_with_empty_list() {
    let app = test_app();
    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(app.tasks().is_empty());
    assert_eq!(app.selected_index(), None);
    assert!(!app.can_add());
}

#[test]
fn add_task_creates_one_incomplete_task() {
    let mut app = test_app();
    type_draft(&mut app, "Buy milk");
    assert!(app.can_add());

    app.add_task();

    assert_eq!(names(&app), ["Buy milk"]);
    let task = &app.tasks()[0];
    assert!(!task.is_complete);
    assert!(task.date_added <= Utc::now());
    assert_eq!(app.draft().text(), "");
}

#[test]
fn blank_draft_does_not_add() {
    let mut app = test_app();
    type_draft(&mut app, "   ");
    app.add_task();
    assert!(app.tasks().is_empty());
    assert_eq!(app.draft().text(), "   ");
}

#[test]
fn name_is_added_as_typed() {
    let mut app = test_app();
    type_draft(&mut app, "  buy milk ");
    app.add_task();
    assert_eq!(names(&app), ["  buy milk "]);
}

#[test]
fn submit_from_insert_mode_keeps_focus() {
    let mut app = test_app();
    type_draft(&mut app, "first");
    let token = app.insert_token().unwrap();
    app.insert_mode(token).submit();

    assert_eq!(app.input_mode(), InputMode::Insert);
    assert_eq!(names(&app), ["first"]);
}

#[test]
fn newly_added_task_is_selected_at_top() {
    let mut app = seeded_app(&["old one", "old two"]);
    app.select_last();

    type_draft(&mut app, "brand new");
    app.add_task();

    assert_eq!(names(&app), ["brand new", "old two", "old one"]);
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn list_is_newest_first() {
    let app = seeded_app(&["a", "b", "c"]);
    assert_eq!(names(&app), ["c", "b", "a"]);
}

#[test]
fn complete_selected_removes_task() {
    let mut app = seeded_app(&["a", "b", "c"]);
    app.select(1);
    app.complete_selected();

    assert_eq!(names(&app), ["c", "a"]);
    assert_eq!(app.completed_count(), 1);
    assert_eq!(app.selected_task().map(|t| t.name.as_str()), Some("a"));
}

#[test]
fn completing_last_row_moves_selection_up() {
    let mut app = seeded_app(&["a", "b"]);
    app.select_last();
    app.complete_selected();

    assert_eq!(names(&app), ["b"]);
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn completing_everything_empties_selection() {
    let mut app = seeded_app(&["only"]);
    app.complete_selected();
    assert!(app.tasks().is_empty());
    assert_eq!(app.selected_index(), None);

    // Nothing selected: a further complete is a no-op.
    app.complete_selected();
    assert_eq!(app.completed_count(), 1);
}

#[test]
fn complete_at_out_of_range_is_noop() {
    let mut app = seeded_app(&["a"]);
    app.complete_at(5);
    assert_eq!(names(&app), ["a"]);
    assert_eq!(app.completed_count(), 0);
}

#[test]
fn selection_is_clamped() {
    let mut app = seeded_app(&["a", "b", "c"]);
    app.select_next();
    app.select_next();
    app.select_next();
    assert_eq!(app.selected_index(), Some(2));
    app.select_prev();
    assert_eq!(app.selected_index(), Some(1));
    app.select_first();
    app.select_prev();
    assert_eq!(app.selected_index(), Some(0));
    app.select(99);
    assert_eq!(app.selected_index(), Some(2));
}

#[test]
fn toggle_focus_preserves_draft() {
    let mut app = test_app();
    type_draft(&mut app, "half typed");
    app.toggle_focus();
    assert_eq!(app.input_mode(), InputMode::Normal);
    assert!(app.insert_token().is_none());
    assert_eq!(app.draft().text(), "half typed");

    app.toggle_focus();
    assert_eq!(app.input_mode(), InputMode::Insert);
    assert_eq!(app.draft().cursor(), "half typed".len());
}

#[test]
fn add_works_from_normal_mode() {
    let mut app = test_app();
    type_draft(&mut app, "button press");
    app.enter_normal_mode();
    app.add_task();
    assert_eq!(names(&app), ["button press"]);
}

#[test]
fn hit_test_maps_clicks_to_widgets() {
    let mut app = seeded_app(&["a", "b", "c"]);
    app.set_hit_regions(HitRegions {
        name_field: Region::new(0, 0, 20, 3),
        add_button: Region::new(20, 0, 14, 3),
        list: ListViewport {
            area: Region::new(1, 4, 30, 10),
            offset: 0,
        },
    });

    assert_eq!(app.hit_test(5, 1), Some(HitTarget::NameField));
    assert_eq!(app.hit_test(25, 1), Some(HitTarget::AddButton));
    assert_eq!(app.hit_test(3, 4), Some(HitTarget::Task(0)));
    assert_eq!(app.hit_test(3, 6), Some(HitTarget::Task(2)));
    // Inside the list area but past the last task.
    assert_eq!(app.hit_test(3, 7), None);
    assert_eq!(app.hit_test(0, 3), None);
}

#[test]
fn tasks_persist_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    {
        let mut app = App::new(TaskStore::open(&path).unwrap(), UiOptions::default());
        type_draft(&mut app, "survive restart");
        app.add_task();
        type_draft(&mut app, "finish me");
        app.add_task();
        app.select_first();
        app.complete_selected();
    }

    let app = App::new(TaskStore::open(&path).unwrap(), UiOptions::default());
    assert_eq!(names(&app), ["survive restart"]);
    assert_eq!(app.completed_count(), 1);
}

#[test]
fn quit_flag() {
    let mut app = test_app();
    assert!(!app.should_quit());
    app.request_quit();
    assert!(app.should_quit());
}

/// An app over `tasks.db` in `dir`, plus a second connection to the same file
/// for breaking the database underneath it.
fn file_app(dir: &Path, seed: &[&str]) -> (App, Connection) {
    let path = dir.join("tasks.db");
    let mut app = App::new(TaskStore::open(&path).unwrap(), UiOptions::default());
    for name in seed {
        type_draft(&mut app, name);
        app.add_task();
    }
    app.enter_normal_mode();
    (app, Connection::open(&path).unwrap())
}

#[test]
fn failed_add_keeps_draft_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, side) = file_app(dir.path(), &["existing"]);
    side.execute_batch(
        "CREATE TRIGGER reject_insert BEFORE INSERT ON tasks
         BEGIN SELECT RAISE(ABORT, 'inserts disabled'); END;",
    )
    .unwrap();

    type_draft(&mut app, "not saved");
    app.add_task();

    assert_eq!(app.draft().text(), "not saved");
    assert!(app.can_add());
    assert_eq!(names(&app), ["existing"]);
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn failed_complete_still_refreshes() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, side) = file_app(dir.path(), &["a", "b"]);

    let mut other = TaskStore::open(dir.path().join("tasks.db")).unwrap();
    other
        .add_task(TaskName::new("from elsewhere").unwrap())
        .unwrap();
    side.execute_batch(
        "CREATE TRIGGER reject_update BEFORE UPDATE ON tasks
         BEGIN SELECT RAISE(ABORT, 'updates disabled'); END;",
    )
    .unwrap();

    app.complete_at(0);

    assert_eq!(names(&app), ["from elsewhere", "b", "a"]);
    assert_eq!(app.completed_count(), 0);
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn failed_refresh_keeps_previous_list() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, side) = file_app(dir.path(), &["a", "b"]);
    side.execute_batch("DROP TABLE tasks;").unwrap();

    app.refresh();
    assert_eq!(names(&app), ["b", "a"]);

    app.complete_selected();
    assert_eq!(names(&app), ["b", "a"]);
    assert_eq!(app.completed_count(), 0);
}
