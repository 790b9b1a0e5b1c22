use std::collections::BTreeSet;

use chrono::NaiveDate;
use habitgrid::db::DbPool;
use habitgrid::models::export::ExportBundle;
use habitgrid::models::habit::{HabitCreateInput, HabitKind, TargetType};
use habitgrid::models::log::{LogStatus, LogValue};
use habitgrid::services::export_service::ExportService;
use habitgrid::services::habit_service::HabitService;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn log_set(bundle: &ExportBundle) -> BTreeSet<(String, String, String)> {
    bundle
        .habits
        .iter()
        .chain(bundle.measurables.iter())
        .flat_map(|habit| {
            habit.logs.iter().map(move |log| {
                let value = serde_json::to_string(&log.value).expect("serialize value");
                (habit.id.clone(), log.date.clone(), value)
            })
        })
        .collect()
}

#[test]
fn export_then_import_reproduces_log_set() {
    let source_dir = tempdir().expect("source dir");
    let source_pool = DbPool::new(source_dir.path().join("source.sqlite")).expect("source pool");
    let source_habits = HabitService::new(source_pool.clone());
    let source_export = ExportService::new(source_pool);

    let yesno = source_habits
        .create_habit(HabitCreateInput {
            name: "meditate".into(),
            color: "#34d399".into(),
            question: "Did you meditate?".into(),
            frequency: "daily".into(),
            reminder: "none".into(),
            ..Default::default()
        })
        .expect("create yes/no habit");
    let run = source_habits
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

    for (day, status) in [(1, LogStatus::Done), (2, LogStatus::Missed), (4, LogStatus::Done)] {
        source_habits
            .log_status(&yesno.id, date(2024, 2, day), LogValue::Status(status))
            .expect("log yes/no");
    }
    source_habits
        .log_status(&run.id, date(2024, 2, 1), LogValue::Measure(5.5))
        .expect("log measure");
    source_habits
        .log_status(&run.id, date(2024, 2, 3), LogValue::Measure(0.0))
        .expect("log zero measure");

    let json = source_export.export_json().expect("export json");
    let bundle: ExportBundle = serde_json::from_str(&json).expect("parse bundle");

    // Import into a fresh store.
    let target_dir = tempdir().expect("target dir");
    let target_pool = DbPool::new(target_dir.path().join("target.sqlite")).expect("target pool");
    let target_export = ExportService::new(target_pool);

    target_export.import_bundle(&bundle).expect("import bundle");
    let reexported = target_export.build_bundle().expect("re-export bundle");

    assert_eq!(log_set(&bundle), log_set(&reexported));
    assert_eq!(
        bundle.statistics.habit_completion_rates,
        reexported.statistics.habit_completion_rates
    );
    assert_eq!(
        bundle.statistics.measurable_averages,
        reexported.statistics.measurable_averages
    );

    // Importing twice converges on the same set (upsert semantics).
    target_export.import_bundle(&bundle).expect("second import");
    let again = target_export.build_bundle().expect("third export");
    assert_eq!(log_set(&bundle), log_set(&again));
}
