use clap::Subcommand;
use vibesync_core::storage::{Config, Database};
use vibesync_core::{Event, SessionConfig, SessionController, SessionTimer};

const TIMER_KEY: &str = "session_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Begin (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Back to focus cycle 1
    Reset,
    /// Advance the countdown by one second (external tick driver)
    Tick,
    /// Print current timer state as JSON
    Status,
    /// Run a live session in the foreground until Ctrl+C
    Run,
}

/// Restore the persisted timer, reconfiguring (full reset) if the
/// configured durations changed since it was saved.
fn load_timer(db: &Database, config: SessionConfig) -> SessionTimer {
    if let Ok(Some(json)) = db.kv_get(TIMER_KEY) {
        if let Ok(mut timer) = serde_json::from_str::<SessionTimer>(&json) {
            if *timer.config() != config {
                timer.reconfigure(config);
            }
            return timer;
        }
    }
    SessionTimer::new(config)
}

fn save_timer(db: &Database, timer: &SessionTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let session_config = config.session_config()?;
    let db = Database::open()?;
    let timer = load_timer(&db, session_config);
    let mut controller = SessionController::with_timer(timer, db);

    match action {
        TimerAction::Start => {
            let event = controller.start();
            print_event(&event)?;
        }
        TimerAction::Pause => {
            let event = controller.pause();
            print_event(&event)?;
        }
        TimerAction::Reset => {
            let event = controller.reset();
            print_event(&event)?;
        }
        TimerAction::Tick => {
            for event in controller.handle_tick()? {
                print_event(&event)?;
            }
            print_event(&controller.snapshot())?;
        }
        TimerAction::Status => {
            print_event(&controller.snapshot())?;
        }
        TimerAction::Run => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_session(&mut controller))?;
        }
    }

    save_timer(controller.database(), controller.timer())?;
    Ok(())
}

/// Foreground session loop: one schedule, one tick per second, until the
/// user interrupts or a countdown completes.
async fn run_session(
    controller: &mut SessionController,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut ticks, started) = controller.begin();
    print_event(&started)?;

    loop {
        tokio::select! {
            tick = ticks.recv() => {
                if tick.is_none() {
                    // Schedule cancelled elsewhere; nothing left to drive.
                    break;
                }
                let events = controller.handle_tick()?;
                if events.is_empty() {
                    let timer = controller.timer();
                    let mins = timer.time_left_secs() / 60;
                    let secs = timer.time_left_secs() % 60;
                    eprintln!(
                        "{} {:02}:{:02}  cycle {}",
                        timer.mode().label(),
                        mins,
                        secs,
                        timer.cycle_number()
                    );
                    continue;
                }
                for event in &events {
                    print_event(event)?;
                }
                // The countdown finished and the next mode is staged,
                // paused, awaiting an explicit start.
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                let event = controller.pause();
                print_event(&event)?;
                break;
            }
        }
    }
    Ok(())
}
