//! End-to-end session flow over a real on-disk database.

use chrono::Local;
use tempfile::TempDir;
use vibesync_core::flow::{flow_chart, ChartView};
use vibesync_core::storage::Database;
use vibesync_core::timer::{Mode, SessionConfig};
use vibesync_core::SessionController;

fn open_db(dir: &TempDir) -> Database {
    Database::open_at(dir.path().join("vibesync.db")).expect("open database")
}

fn run_to_transition(c: &mut SessionController) {
    c.start();
    loop {
        if !c.handle_tick().expect("tick").is_empty() {
            break;
        }
    }
}

#[test]
fn four_cycles_produce_four_records_and_a_long_break() {
    let dir = TempDir::new().expect("tempdir");
    let config = SessionConfig::new(2, 1, 3).expect("config");
    let mut c = SessionController::new(config, open_db(&dir));

    for _ in 0..3 {
        run_to_transition(&mut c); // focus -> short break
        assert_eq!(c.timer().mode(), Mode::ShortBreak);
        run_to_transition(&mut c); // break -> focus
    }
    run_to_transition(&mut c); // 4th focus -> long break
    assert_eq!(c.timer().mode(), Mode::LongBreak);
    assert_eq!(c.timer().time_left_secs(), 3);

    let db = c.database();
    assert_eq!(db.completed_cycles().expect("count"), 4);
    let history = db.flow_history().expect("history");
    assert_eq!(history.len(), 4);
    assert_eq!(db.total_flow_score().expect("total"), 100);

    // Today's chart sees all four completions.
    let chart = flow_chart(&history, Local::now(), ChartView::Today);
    assert!(!chart.is_empty());
    assert_eq!(chart.total_score, 100);
}

#[test]
fn history_survives_reopening_the_database() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("vibesync.db");

    {
        let db = Database::open_at(&path).expect("open");
        let config = SessionConfig::new(1, 1, 1).expect("config");
        let mut c = SessionController::new(config, db);
        run_to_transition(&mut c);
    }

    let db = Database::open_at(&path).expect("reopen");
    assert_eq!(db.flow_history().expect("history").len(), 1);
    assert_eq!(db.completed_cycles().expect("count"), 1);
}
