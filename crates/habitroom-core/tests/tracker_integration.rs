//! End-to-end tracker behavior against an on-disk database.

use chrono::{NaiveDate, Utc};
use habitroom_core::tracker::{
    CreateHabit, CreatePrinciple, CreateQuestion, CreateTask, LogHabit, RecordFocusSession,
    UpdatePrinciple, UpdateTaskStatus,
};
use habitroom_core::{
    CoreError, Database, HabitType, LogStatus, PrincipleStatus, TaskStatus, Tracker,
};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn open(dir: &TempDir) -> Tracker {
    Tracker::new(Database::open(&dir.path().join("habitroom.db")).unwrap())
}

fn log(t: &Tracker, habit_id: i64, status: &str, d: u32) {
    t.log_habit(
        LogHabit {
            habit_id: Some(habit_id),
            status: Some(status.into()),
            date: Some(day(d).format("%Y-%m-%d").to_string()),
        },
        day(d),
    )
    .unwrap();
}

#[test]
fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let habit_id = {
        let t = open(&dir);
        let habit = t
            .create_habit(CreateHabit {
                name: Some("Meditate".into()),
                habit_type: Some("good".into()),
            })
            .unwrap();
        log(&t, habit.id, "completed", 1);
        log(&t, habit.id, "completed", 2);
        habit.id
    };

    let t = open(&dir);
    let summary = t.habit_summary(habit_id, day(2)).unwrap();
    assert_eq!(summary.habit.habit_type, HabitType::Good);
    assert_eq!(summary.stats.current_streak, 2);
    assert_eq!(summary.stats.today_status, Some(LogStatus::Completed));
}

#[test]
fn deleting_habit_removes_its_logs() {
    let dir = TempDir::new().unwrap();
    let t = open(&dir);
    let keep = t
        .create_habit(CreateHabit {
            name: Some("Run".into()),
            habit_type: Some("good".into()),
        })
        .unwrap();
    let gone = t
        .create_habit(CreateHabit {
            name: Some("Doomscroll".into()),
            habit_type: Some("bad".into()),
        })
        .unwrap();
    log(&t, keep.id, "completed", 3);
    log(&t, gone.id, "failed", 3);

    t.delete_habit(gone.id).unwrap();

    let logs = t.list_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].habit_id, keep.id);
    assert!(matches!(
        t.list_logs_for_habit(gone.id),
        Err(CoreError::NotFound { entity: "Habit", .. })
    ));
}

#[test]
fn reset_day_only_touches_that_day() {
    let dir = TempDir::new().unwrap();
    let t = open(&dir);
    let habit = t
        .create_habit(CreateHabit {
            name: Some("Journal".into()),
            habit_type: Some("good".into()),
        })
        .unwrap();
    log(&t, habit.id, "completed", 4);
    log(&t, habit.id, "completed", 5);

    assert_eq!(t.reset_day(day(5)).unwrap(), 1);
    assert_eq!(t.reset_day(day(5)).unwrap(), 0);
    let logs = t.list_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].date, day(4));
}

#[test]
fn deleting_question_removes_its_principles() {
    let dir = TempDir::new().unwrap();
    let t = open(&dir);
    let question = t
        .create_question(CreateQuestion {
            title: Some("How do I save more?".into()),
            category: Some("Money & Finance".into()),
        })
        .unwrap();
    let principle = t
        .create_principle(CreatePrinciple {
            question_id: Some(question.id),
            title: Some("Pay yourself first".into()),
            description: Some("Automate transfers".into()),
            examples: None,
        })
        .unwrap();

    let updated = t
        .update_principle(UpdatePrinciple {
            id: Some(principle.id),
            title: Some("Pay yourself first".into()),
            description: None,
            examples: None,
            status: Some("tested".into()),
        })
        .unwrap();
    assert_eq!(updated.status, PrincipleStatus::Tested);
    assert!(updated.description.is_none());

    t.delete_question(question.id).unwrap();
    assert!(t.list_principles(None).unwrap().is_empty());
    assert_eq!(t.get_principle(principle.id).unwrap_err().status_code(), 404);
}

#[test]
fn clear_operations_are_bulk_and_selective() {
    let dir = TempDir::new().unwrap();
    let t = open(&dir);
    for title in ["A", "B", "C"] {
        t.create_task(CreateTask {
            title: Some(title.into()),
        })
        .unwrap();
    }
    let tasks = t.list_tasks().unwrap();
    for task in tasks.iter().take(2) {
        t.set_task_status(
            UpdateTaskStatus {
                id: Some(task.id),
                status: Some("completed".into()),
            },
            Utc::now(),
        )
        .unwrap();
    }

    assert_eq!(t.clear_completed_tasks().unwrap(), 2);
    let remaining = t.list_tasks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].status, TaskStatus::Ongoing);

    t.record_focus_session(RecordFocusSession {
        duration_minutes: Some(30),
        goal: Some("Plan week".into()),
        achieved: Some(true),
    })
    .unwrap();
    assert_eq!(t.clear_focus_sessions().unwrap(), 1);
    assert!(t.list_focus_sessions().unwrap().is_empty());
}

#[test]
fn dashboard_reflects_todays_logs() {
    let dir = TempDir::new().unwrap();
    let t = open(&dir);
    let read = t
        .create_habit(CreateHabit {
            name: Some("Read".into()),
            habit_type: Some("good".into()),
        })
        .unwrap();
    t.create_habit(CreateHabit {
        name: Some("Stretch".into()),
        habit_type: Some("good".into()),
    })
    .unwrap();
    let sugar = t
        .create_habit(CreateHabit {
            name: Some("Sugar".into()),
            habit_type: Some("bad".into()),
        })
        .unwrap();
    log(&t, read.id, "completed", 10);
    log(&t, sugar.id, "failed", 10);

    let board = t.dashboard(day(10), Utc::now()).unwrap();
    assert_eq!(board.today.good_habits.total, 2);
    assert_eq!(board.today.good_habits.completed, 1);
    assert_eq!(board.today.good_habits.percentage, 50);
    assert_eq!(board.today.bad_habits.avoided, 0);
    assert_eq!(board.today.bad_habits.failed, 1);
    assert_eq!(board.good_habits.len(), 2);
    assert_eq!(board.bad_habits.len(), 1);
}
