//! Tests for the tracker module.

use std::time::Duration;

use tempfile::TempDir;

use super::*;
use crate::{
    autosave::{AutoSaver, PendingEdit},
    models::{Task, TaskKey},
    params::{
        AddItem, Adjustment, CreateEntry, CreateInvoice, CreateProject, DraftTask, EditItem,
        HolidayDate, Id, ItemRef, ListEntries, ListHolidays, ListProjects, ListTasks, MonthReport, TaskRef,
        UpdateEntry, UpdateProject, UpdateTask, WeekReport,
    },
    BudgetStatus,
};

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

fn task_ref(project: &str, description: &str) -> TaskRef {
    TaskRef {
        project: project.to_string(),
        description: description.to_string(),
    }
}

async fn log(tracker: &Tracker, date: &str, project: &str, description: &str, hours: f64) -> u64 {
    tracker
        .create_entry(&CreateEntry {
            date: date.to_string(),
            project: project.to_string(),
            description: description.to_string(),
            hours,
        })
        .await
        .expect("Failed to create entry")
        .id
}

async fn set_budget(tracker: &Tracker, project: &str, description: &str, hours: f64) -> Task {
    tracker
        .update_task(&UpdateTask {
            project: project.to_string(),
            description: description.to_string(),
            budgeted_hours: Some(hours),
            ..Default::default()
        })
        .await
        .expect("Failed to set budget")
}

#[tokio::test]
async fn test_task_aggregates_billed_hours() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    log(&tracker, "2024-03-11", "Client A", "Build API", 3.0).await;
    log(&tracker, "2024-03-12", "Client A", "Build API", 2.5).await;
    log(&tracker, "2024-03-12", "Client A", "Other", 4.0).await;

    let task = set_budget(&tracker, "Client A", "Build API", 10.0).await;
    assert_eq!(task.id, "Client A|Build API");
    assert_eq!(task.hours_billed, 5.5);
    assert_eq!(task.hours_remaining, 4.5);
    assert_eq!(task.budget_status(), BudgetStatus::OnTrack);

    let hours = tracker
        .task_hours(&task_ref("Client A", "Build API"))
        .await
        .expect("Failed to sum hours");
    assert_eq!(hours, 5.5);
}

#[tokio::test]
async fn test_get_task_missing_and_get_or_create() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let task = task_ref("Client A", "Build API");

    assert!(tracker.get_task(&task).await.unwrap().is_none());
    assert!(matches!(
        tracker.show_task(&task).await,
        Err(TallyError::TaskNotFound { .. })
    ));

    let created = tracker.get_or_create_task(&task).await.unwrap();
    assert_eq!(created.budgeted_hours, 0.0);
    assert_eq!(created.notes, "");
    assert!(!created.is_closed);

    let again = tracker.get_or_create_task(&task).await.unwrap();
    assert_eq!(again.created_at, created.created_at);
}

#[tokio::test]
async fn test_update_task_keeps_unset_fields() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    set_budget(&tracker, "Client A", "Build API", 8.0).await;
    let task = tracker
        .update_task(&UpdateTask {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            notes: Some("- [ ] Draft schema (2h)".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(task.budgeted_hours, 8.0);
    assert_eq!(task.notes, "- [ ] Draft schema (2h)");
    assert_eq!(task.completion_percentage, Some(0.0));

    let negative = tracker
        .update_task(&UpdateTask {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            budgeted_hours: Some(-1.0),
            ..Default::default()
        })
        .await;
    assert!(matches!(negative, Err(TallyError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_rename_task_moves_entries() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let entry_id = log(&tracker, "2024-03-11", "Client A", "Build API", 3.0).await;
    log(&tracker, "2024-03-11", "Client B", "Build API", 1.0).await;
    tracker
        .update_task(&UpdateTask {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            budgeted_hours: Some(6.0),
            notes: Some("- [x] Draft schema (2h)".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let renamed = tracker
        .rename_task(&task_ref("Client A", "Build API"), "Build REST API")
        .await
        .expect("Failed to rename task");

    assert_eq!(renamed.id, "Client A|Build REST API");
    assert_eq!(renamed.budgeted_hours, 6.0);
    assert_eq!(renamed.notes, "- [x] Draft schema (2h)");
    assert_eq!(renamed.hours_billed, 3.0);

    let entry = tracker.get_entry(&Id { id: entry_id }).await.unwrap().unwrap();
    assert_eq!(entry.description, "Build REST API");
    assert!(tracker
        .get_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap()
        .is_none());

    // Same description in another project is untouched
    let other = tracker
        .task_hours(&task_ref("Client B", "Build API"))
        .await
        .unwrap();
    assert_eq!(other, 1.0);
}

#[tokio::test]
async fn test_rename_conflict_changes_nothing() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    log(&tracker, "2024-03-11", "Client A", "Build API", 3.0).await;
    log(&tracker, "2024-03-11", "Client A", "Write docs", 1.0).await;
    set_budget(&tracker, "Client A", "Build API", 6.0).await;
    set_budget(&tracker, "Client A", "Write docs", 2.0).await;

    let result = tracker
        .rename_task(&task_ref("Client A", "Build API"), "Write docs")
        .await;
    assert!(matches!(result, Err(TallyError::TaskConflict { .. })));

    let original = tracker
        .show_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    let existing = tracker
        .show_task(&task_ref("Client A", "Write docs"))
        .await
        .unwrap();
    assert_eq!((original.budgeted_hours, original.hours_billed), (6.0, 3.0));
    assert_eq!((existing.budgeted_hours, existing.hours_billed), (2.0, 1.0));
}

#[tokio::test]
async fn test_rename_missing_task_and_same_name() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let missing = tracker
        .rename_task(&task_ref("Client A", "Nope"), "Still nope")
        .await;
    assert!(matches!(missing, Err(TallyError::TaskNotFound { .. })));

    set_budget(&tracker, "Client A", "Build API", 4.0).await;
    let same = tracker
        .rename_task(&task_ref("Client A", "Build API"), " Build API ")
        .await
        .unwrap();
    assert_eq!(same.id, "Client A|Build API");
    assert_eq!(same.budgeted_hours, 4.0);
}

#[tokio::test]
async fn test_update_task_with_rename_and_budget() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    set_budget(&tracker, "Client A", "Build API", 4.0).await;
    let task = tracker
        .update_task(&UpdateTask {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            new_description: Some("Build GraphQL API".to_string()),
            budgeted_hours: Some(12.0),
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(task.description, "Build GraphQL API");
    assert_eq!(task.budgeted_hours, 12.0);
}

#[tokio::test]
async fn test_separator_only_allowed_in_descriptions() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let task = set_budget(&tracker, "Acme", "Web|Build", 2.0).await;
    assert_eq!(task.id, "Acme|Web|Build");

    let rejected = tracker
        .update_task(&UpdateTask {
            project: "Acme|Web".to_string(),
            description: "Build".to_string(),
            budgeted_hours: Some(10.0),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        rejected,
        Err(TallyError::InvalidInput { ref field, .. }) if field == "project"
    ));
    let untouched = tracker
        .show_task(&task_ref("Acme", "Web|Build"))
        .await
        .unwrap();
    assert_eq!(untouched.budgeted_hours, 2.0);

    let entry = tracker
        .create_entry(&CreateEntry {
            date: "2024-03-11".to_string(),
            project: "Acme|Web".to_string(),
            description: "Build".to_string(),
            hours: 1.0,
        })
        .await;
    assert!(matches!(entry, Err(TallyError::InvalidInput { .. })));

    let project = tracker
        .create_project(&CreateProject {
            name: "Acme|Web".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        project,
        Err(TallyError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[tokio::test]
async fn test_close_reopen_and_list_filters() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    set_budget(&tracker, "Client A", "Build API", 10.0).await;
    set_budget(&tracker, "Client A", "Analytics", 2.0).await;
    tracker
        .get_or_create_task(&task_ref("Client B", "Support"))
        .await
        .unwrap();
    log(&tracker, "2024-03-11", "Client A", "Analytics", 3.0).await;

    tracker
        .close_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();

    let open = tracker.list_tasks(&ListTasks::default()).await.unwrap();
    let ids: Vec<&str> = open.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["Client A|Analytics", "Client B|Support"]);

    let closed = tracker
        .list_tasks(&ListTasks {
            status: Some("closed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(closed.len(), 1);
    assert!(closed[0].is_closed);

    let all_a = tracker
        .list_tasks(&ListTasks {
            project: Some("Client A".to_string()),
            status: Some("all".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all_a.len(), 2);

    let budgeted = tracker
        .list_tasks(&ListTasks {
            status: Some("all".to_string()),
            budget: Some("budget_left".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(budgeted.len(), 1);
    assert_eq!(budgeted[0].description, "Build API");

    let searched = tracker
        .list_tasks(&ListTasks {
            search: Some("SUPP".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);

    let reopened = tracker
        .reopen_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    assert!(!reopened.is_closed);

    let missing = tracker.close_task(&task_ref("Client Z", "Ghost")).await;
    assert!(matches!(missing, Err(TallyError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_delete_task_keeps_entries() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    log(&tracker, "2024-03-11", "Client A", "Build API", 3.0).await;
    set_budget(&tracker, "Client A", "Build API", 10.0).await;

    let deleted = tracker
        .delete_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    assert_eq!(deleted.hours_billed, 3.0);

    let hours = tracker
        .task_hours(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    assert_eq!(hours, 3.0);
    assert!(matches!(
        tracker.delete_task(&task_ref("Client A", "Build API")).await,
        Err(TallyError::TaskNotFound { .. })
    ));
}

#[tokio::test]
async fn test_checklist_operations() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let add = |text: &str, hours: f64| AddItem {
        project: "Client A".to_string(),
        description: "Build API".to_string(),
        text: text.to_string(),
        hours: Some(hours),
    };
    let item_ref = |index| ItemRef {
        project: "Client A".to_string(),
        description: "Build API".to_string(),
        index,
    };

    tracker.add_item(&add("Draft schema", 2.0)).await.unwrap();
    let (task, item) = tracker.add_item(&add("Endpoints", 6.0)).await.unwrap();
    assert_eq!(item.position, 1);
    assert_eq!(task.completion_percentage, Some(0.0));

    let (task, item) = tracker.toggle_item(&item_ref(0)).await.unwrap();
    assert!(item.checked);
    assert_eq!(task.completion_percentage, Some(25.0));
    assert_eq!(task.notes, "- [x] Draft schema (2h)\n- [ ] Endpoints (6h)");

    let (task, item) = tracker
        .edit_item(&EditItem {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            index: 1,
            text: Some("REST endpoints".to_string()),
            hours: Some(2.0),
        })
        .await
        .unwrap();
    assert_eq!(item.text, "REST endpoints");
    assert_eq!(task.completion_percentage, Some(50.0));

    let (task, removed) = tracker.remove_item(&item_ref(0)).await.unwrap();
    assert_eq!(removed.text, "Draft schema");
    assert_eq!(task.notes, "- [ ] REST endpoints (2h)");

    let out_of_range = tracker.toggle_item(&item_ref(5)).await;
    assert!(matches!(out_of_range, Err(TallyError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_checklist_keeps_free_text() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    tracker
        .update_task(&UpdateTask {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            notes: Some("- [ ] Draft schema (2h)\nCall Bob on Friday".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let (task, _) = tracker
        .add_item(&AddItem {
            project: "Client A".to_string(),
            description: "Build API".to_string(),
            text: "Review".to_string(),
            hours: None,
        })
        .await
        .unwrap();

    assert_eq!(
        task.notes,
        "- [ ] Draft schema (2h)\n- [ ] Review (0h)\nCall Bob on Friday"
    );
}

#[tokio::test]
async fn test_auto_split() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let task = task_ref("Client A", "Build API");

    for text in ["Schema", "Endpoints", "Tests"] {
        tracker
            .add_item(&AddItem {
                project: "Client A".to_string(),
                description: "Build API".to_string(),
                text: text.to_string(),
                hours: None,
            })
            .await
            .unwrap();
    }

    let (_, split) = tracker.auto_split(&task).await.unwrap();
    assert!(!split, "nothing to split without a budget");

    set_budget(&tracker, "Client A", "Build API", 10.0).await;
    let (updated, split) = tracker.auto_split(&task).await.unwrap();
    assert!(split);
    let hours: Vec<f64> = updated
        .notes_document()
        .checklist
        .iter()
        .map(|item| item.hours)
        .collect();
    assert_eq!(hours, vec![3.0, 3.5, 3.5]);
}

#[tokio::test]
async fn test_entry_crud_and_listing() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let first = log(&tracker, "2024-03-11", "Client A", "Build API", 3.0).await;
    log(&tracker, "2024-03-13", "Client B", "Support", 1.0).await;
    log(&tracker, "2024-03-20", "Client A", "Build API", 2.0).await;

    let week = tracker
        .list_entries(&ListEntries {
            from: Some("2024-03-11".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(week.len(), 2);

    let client_a = tracker
        .list_entries(&ListEntries {
            from: Some("2024-03-01".to_string()),
            to: Some("2024-03-31".to_string()),
            project: Some("Client A".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(client_a.len(), 2);

    let updated = tracker
        .update_entry(&UpdateEntry {
            id: first,
            hours: Some(4.5),
            description: Some("Build REST API".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.hours, 4.5);
    assert_eq!(updated.description, "Build REST API");
    assert_eq!(updated.project, "Client A");

    let deleted = tracker.delete_entry(&Id { id: first }).await.unwrap();
    assert_eq!(deleted.id, first);
    assert!(matches!(
        tracker.delete_entry(&Id { id: first }).await,
        Err(TallyError::EntryNotFound { .. })
    ));

    let backwards = tracker
        .list_entries(&ListEntries {
            from: Some("2024-03-20".to_string()),
            to: Some("2024-03-01".to_string()),
            project: None,
        })
        .await;
    assert!(matches!(backwards, Err(TallyError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_entry_validation() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    for (date, project, hours) in [
        ("2024-13-01", "Client A", 1.0),
        ("2024-03-11", "  ", 1.0),
        ("2024-03-11", "Client A", -2.0),
        ("2024-03-11", "Client A", f64::NAN),
    ] {
        let result = tracker
            .create_entry(&CreateEntry {
                date: date.to_string(),
                project: project.to_string(),
                description: "Build API".to_string(),
                hours,
            })
            .await;
        assert!(
            matches!(result, Err(TallyError::InvalidInput { .. })),
            "{date} {project} {hours}"
        );
    }
}

#[tokio::test]
async fn test_projects() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let project = tracker
        .create_project(&CreateProject {
            name: "Client A".to_string(),
            description: Some("Main client".to_string()),
            color: Some("#FF0000".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(project.color, "#ff0000");
    assert!(project.is_active);

    let duplicate = tracker
        .create_project(&CreateProject {
            name: "Client A".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(duplicate, Err(TallyError::InvalidInput { .. })));

    log(&tracker, "2024-03-11", "Client A", "Build API", 2.0).await;
    set_budget(&tracker, "Client A", "Build API", 5.0).await;

    let renamed = tracker
        .update_project(&UpdateProject {
            id: project.id,
            name: Some("Acme".to_string()),
            is_active: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(renamed.name, "Acme");
    assert!(!renamed.is_active);

    let task = tracker
        .show_task(&task_ref("Acme", "Build API"))
        .await
        .unwrap();
    assert_eq!((task.budgeted_hours, task.hours_billed), (5.0, 2.0));
    let closed = tracker
        .close_task(&task_ref("Acme", "Build API"))
        .await
        .expect("Renamed task should be addressable by its new id");
    assert_eq!(closed.id, "Acme|Build API");

    let active = tracker
        .list_projects(&ListProjects { active_only: true })
        .await
        .unwrap();
    assert!(active.is_empty());

    let in_use = tracker.delete_project(&Id { id: project.id }).await;
    assert!(matches!(in_use, Err(TallyError::ProjectInUse { .. })));
}

#[tokio::test]
async fn test_holidays() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let day = |date: &str| HolidayDate {
        date: date.to_string(),
    };

    assert!(tracker.add_holiday(&day("2024-12-25")).await.unwrap());
    assert!(!tracker.add_holiday(&day("2024-12-25")).await.unwrap());
    assert!(tracker.add_holiday(&day("2024-12-26")).await.unwrap());

    let holidays = tracker
        .list_holidays(&ListHolidays {
            from: Some("2024-01-01".to_string()),
            to: None,
        })
        .await
        .unwrap();
    assert_eq!(holidays.len(), 2);

    assert!(tracker.remove_holiday(&day("2024-12-26")).await.unwrap());
    assert!(!tracker.remove_holiday(&day("2024-12-26")).await.unwrap());
}

#[tokio::test]
async fn test_week_summary_counts_holidays() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    log(&tracker, "2024-03-11", "Client A", "Build API", 6.0).await;
    log(&tracker, "2024-03-12", "Client B", "Support", 2.0).await;
    log(&tracker, "2024-03-18", "Client A", "Build API", 5.0).await;
    tracker
        .add_holiday(&HolidayDate {
            date: "2024-03-15".to_string(),
        })
        .await
        .unwrap();

    let summary = tracker
        .week_summary(&WeekReport {
            date: Some("2024-03-13".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(summary.total_hours, 8.0);
    assert_eq!(summary.working_days, 4);
    assert_eq!(summary.average_per_working_day, Some(2.0));
    assert_eq!(summary.projects[0].project, "Client A");
    assert_eq!(summary.days.len(), 7);
}

#[tokio::test]
async fn test_monthly_statement_and_invoice() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    log(&tracker, "2024-03-04", "Client A", "Build API", 4.0).await;
    log(&tracker, "2024-03-05", "Client A", "Build API", 2.0).await;
    log(&tracker, "2024-04-01", "Client A", "Build API", 9.0).await;

    let statement = tracker
        .monthly_statement(&MonthReport {
            month: Some("2024-03".to_string()),
            rate: Some(100.0),
        })
        .await
        .unwrap();
    assert_eq!(statement.total_hours, 6.0);
    assert_eq!(statement.total_earnings, 600.0);

    let invoice = tracker
        .create_invoice(&CreateInvoice {
            month: "2024-03".to_string(),
            invoice_number: "inv-007".to_string(),
            customer: "Acme Corp".to_string(),
            issue_date: Some("2024-04-01".to_string()),
            rate: None,
            due_days: Some(15),
            currency: None,
            adjustments: vec![Adjustment {
                description: "Discount".to_string(),
                amount: -40.0,
            }],
        })
        .await
        .unwrap();

    assert_eq!(invoice.number, "INV-007");
    assert_eq!(invoice.lines.len(), 1);
    assert_eq!(invoice.subtotal, 690.0);
    assert_eq!(invoice.amount_due, 650.0);
    assert_eq!(invoice.due_date.to_string(), "2024-04-16");
    assert_eq!(invoice.currency, "CAD");

    let empty_month = tracker
        .create_invoice(&CreateInvoice {
            month: "2024-01".to_string(),
            invoice_number: "INV-008".to_string(),
            customer: "Acme Corp".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(empty_month, Err(TallyError::InvalidInput { .. })));

    let bad_number = tracker
        .create_invoice(&CreateInvoice {
            month: "2024-03".to_string(),
            invoice_number: "007".to_string(),
            customer: "Acme Corp".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_number, Err(TallyError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_autosave_coalesces_edits() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let saver = AutoSaver::new(tracker.clone()).with_debounce(Duration::from_secs(60));
    let key = TaskKey::new("Client A", "Build API").unwrap();

    saver
        .schedule(key.clone(), PendingEdit::notes("- [ ] Draft"))
        .await;
    saver.schedule(key.clone(), PendingEdit::budget(8.0)).await;
    saver
        .schedule(key.clone(), PendingEdit::notes("- [ ] Draft schema (2h)"))
        .await;
    assert_eq!(saver.pending_count().await, 1);

    // Nothing is written before the debounce window passes
    assert!(tracker
        .get_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap()
        .is_none());

    saver.flush().await;
    assert_eq!(saver.pending_count().await, 0);

    let task = tracker
        .show_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    assert_eq!(task.budgeted_hours, 8.0);
    assert_eq!(task.notes, "- [ ] Draft schema (2h)");
    assert!(saver.last_error().await.is_none());
}

#[tokio::test]
async fn test_autosave_writes_after_debounce() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let saver = AutoSaver::new(tracker.clone()).with_debounce(Duration::from_millis(20));
    let key = TaskKey::new("Client A", "Build API").unwrap();

    saver.schedule(key, PendingEdit::budget(3.0)).await;
    for _ in 0..100 {
        if saver.pending_count().await == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let task = tracker
        .show_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    assert_eq!(task.budgeted_hours, 3.0);
}

#[tokio::test]
async fn test_autosave_records_failures() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let saver = AutoSaver::new(tracker).with_debounce(Duration::from_millis(5));
    let key = TaskKey::new("Client A", "Build API").unwrap();

    saver.schedule(key.clone(), PendingEdit::budget(-5.0)).await;
    saver.flush().await;

    let (failed, message) = saver.last_error().await.expect("write should fail");
    assert_eq!(failed, key);
    assert!(message.contains("budgeted_hours"));
}

#[tokio::test]
async fn test_autosave_validates_drafts() {
    let (_temp_dir, tracker) = create_test_tracker().await;
    let saver = AutoSaver::new(tracker.clone()).with_debounce(Duration::from_secs(60));
    let draft = |budgeted_hours, notes: Option<&str>| DraftTask {
        project: "Client A".to_string(),
        description: "Build API".to_string(),
        budgeted_hours,
        notes: notes.map(String::from),
    };

    assert!(saver.schedule_draft(&draft(None, None)).await.is_err());
    assert!(saver.schedule_draft(&draft(Some(-1.0), None)).await.is_err());
    assert_eq!(saver.pending_count().await, 0);

    let key = saver
        .schedule_draft(&draft(Some(2.0), Some("- [ ] Draft (2h)")))
        .await
        .unwrap();
    assert_eq!(key.id(), "Client A|Build API");
    saver.flush().await;

    let task = tracker
        .show_task(&task_ref("Client A", "Build API"))
        .await
        .unwrap();
    assert_eq!(task.completion_percentage, Some(0.0));
}
