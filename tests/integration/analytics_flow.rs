use chrono::NaiveDate;
use habitgrid::db::DbPool;
use habitgrid::models::habit::{HabitCreateInput, HabitKind, TargetType};
use habitgrid::models::log::{LogStatus, LogValue};
use habitgrid::services::habit_service::HabitService;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn habit_logging_and_detail_analytics_flow() {
    let dir = tempdir().expect("temp dir");
    let db_path = dir.path().join("habits.sqlite");
    let pool = DbPool::new(&db_path).expect("db pool");

    let service = HabitService::new(pool.clone());

    let habit = service
        .create_habit(HabitCreateInput {
            name: "meditate".into(),
            color: "#34d399".into(),
            question: "Did you meditate today?".into(),
            frequency: "daily".into(),
            reminder: "08:00".into(),
            notes: Some("ten minutes minimum".into()),
            ..Default::default()
        })
        .expect("create yes/no habit");
    assert_eq!(habit.kind, HabitKind::Yesno);

    // The worked example: done, done, missed, gap, done.
    for (day, status) in [
        (1, LogStatus::Done),
        (2, LogStatus::Done),
        (3, LogStatus::Missed),
        (5, LogStatus::Done),
    ] {
        service
            .log_status(&habit.id, date(2024, 1, day), LogValue::Status(status))
            .expect("log status");
    }

    let detail = service
        .detail(&habit.id, date(2024, 1, 7))
        .expect("detail view");

    assert_eq!(detail.score_week, 43);
    assert_eq!(detail.total_done, 3);
    assert_eq!(detail.best_streak.length, 2);
    assert_eq!(detail.best_streak.start, Some(date(2024, 1, 1)));
    assert_eq!(detail.best_streak.end, Some(date(2024, 1, 2)));
    assert_eq!(detail.weekly_history.len(), 6);
    assert_eq!(*detail.weekly_history.last().expect("last week"), 3);

    // Four trailing months, every day present, pending where unlogged.
    assert_eq!(detail.calendar.len(), 4);
    let january = detail.calendar.last().expect("january bucket");
    assert_eq!((january.year, january.month), (2024, 1));
    assert_eq!(january.days.len(), 31);
    assert_eq!(january.days[0].status, Some(LogStatus::Done));
    assert_eq!(january.days[2].status, Some(LogStatus::Missed));
    assert_eq!(january.days[3].status, Some(LogStatus::Pending));
    let october = detail.calendar.first().expect("october bucket");
    assert_eq!((october.year, october.month), (2023, 10));
    assert_eq!(october.days.len(), 31);

    // Upsert: re-logging the same day replaces, never duplicates.
    service
        .log_status(
            &habit.id,
            date(2024, 1, 3),
            LogValue::Status(LogStatus::Done),
        )
        .expect("overwrite log");
    let updated = service
        .detail(&habit.id, date(2024, 1, 7))
        .expect("detail after overwrite");
    assert_eq!(updated.total_done, 4);
    assert_eq!(updated.best_streak.length, 3);

    let measurable = service
        .create_habit(HabitCreateInput {
            name: "run".into(),
            color: "#60a5fa".into(),
            question: "How far did you run?".into(),
            frequency: "daily".into(),
            reminder: "none".into(),
            kind: Some(HabitKind::Measurable),
            unit: Some("km".into()),
            target: Some(5.0),
            target_type: Some(TargetType::AtLeast),
            ..Default::default()
        })
        .expect("create measurable habit");

    service
        .log_status(&measurable.id, date(2024, 1, 6), LogValue::Measure(6.5))
        .expect("log measure");
    service
        .log_status(&measurable.id, date(2024, 1, 7), LogValue::Measure(0.0))
        .expect("log zero measure");

    let measurable_detail = service
        .detail(&measurable.id, date(2024, 1, 7))
        .expect("measurable detail");
    // Zero values are falsy for scoring.
    assert_eq!(measurable_detail.score_week, 14);
    assert_eq!(measurable_detail.total_done, 1);
    let january = measurable_detail.calendar.last().expect("january bucket");
    assert_eq!(january.days[5].value, Some(6.5));
    assert_eq!(january.days[6].value, Some(0.0));
    assert_eq!(january.days[7].value, None);
    assert_eq!(january.days[7].status, None);

    let dashboard = service
        .dashboard(date(2024, 1, 1), 180)
        .expect("dashboard view");
    assert_eq!(dashboard.yesno_habits.len(), 1);
    assert_eq!(dashboard.measurable_habits.len(), 1);
    assert_eq!(dashboard.dates.len(), 180);
    assert_eq!(
        dashboard.logs[&habit.id]["2024-01-01"],
        LogValue::Status(LogStatus::Done)
    );
}

#[test]
fn empty_habit_yields_zero_analytics() {
    let dir = tempdir().expect("temp dir");
    let pool = DbPool::new(dir.path().join("habits.sqlite")).expect("db pool");
    let service = HabitService::new(pool);

    let habit = service
        .create_habit(HabitCreateInput {
            name: "stretch".into(),
            color: "#f87171".into(),
            question: "Did you stretch?".into(),
            frequency: "daily".into(),
            reminder: "none".into(),
            ..Default::default()
        })
        .expect("create habit");

    let detail = service
        .detail(&habit.id, date(2024, 6, 15))
        .expect("detail of unlogged habit");

    assert_eq!(detail.score_week, 0);
    assert_eq!(detail.score_month, 0);
    assert_eq!(detail.score_year, 0);
    assert_eq!(detail.total_done, 0);
    assert_eq!(detail.best_streak.length, 0);
    assert_eq!(detail.best_streak.start, None);
    assert_eq!(detail.weekly_history, vec![0, 0, 0, 0, 0, 0]);
    for month in &detail.calendar {
        for day in &month.days {
            assert_eq!(day.status, Some(LogStatus::Pending));
        }
    }
}
