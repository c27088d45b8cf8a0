//! Timer Dial - terminal host for the circular countdown timer
//!
//! Sets the dial by simulating a drag, starts the countdown and renders every
//! event. Reads single-letter commands from stdin.

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, info, warn};

use timer_dial::{
    config::Config,
    geometry::{angle_to_point, time_to_angle, DIAL_RADIUS},
    state::{DialEvent, TimerDial},
    tasks::CountdownEngine,
    utils::{format_remaining, shutdown_signal},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only the timer output
    tracing_subscriber::fmt()
        .with_env_filter(format!("timer_dial={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting timer-dial v{}", env!("CARGO_PKG_VERSION"));
    let dial_config = config.dial_configuration()?;
    info!(
        "Configuration: max={}s, tick={:?}",
        dial_config.max_duration_seconds(),
        dial_config.tick_interval()
    );

    let mut engine = CountdownEngine::new(TimerDial::new(dial_config));

    if let Some(minutes) = config.minutes {
        let max = dial_config.max_duration_seconds();
        let seconds = minutes.saturating_mul(60).min(max);
        let target = angle_to_point(time_to_angle(f64::from(seconds), max), DIAL_RADIUS / 2.0);
        engine.pointer_down(target)?;
        engine.pointer_up()?;
    }

    let mut events = engine.subscribe()?;
    print_event(
        &config,
        DialEvent::TimeUpdated {
            remaining_seconds: engine.current_time()?,
        },
    )?;

    if !engine.start()? {
        warn!("Nothing to count down; drag the dial with --minutes");
    }
    info!("Commands: s = start/pause, r = reset, q = quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    print_event(&config, event)?;
                    if event == DialEvent::Finished && !stdin_open {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!("Display fell behind by {} events", missed),
                Err(RecvError::Closed) => break,
            },

            line = lines.next_line(), if stdin_open => match line? {
                Some(command) => match command.trim() {
                    "s" => {
                        let running = engine.toggle()?;
                        info!("{}", if running { "Timer running" } else { "Timer paused" });
                    }
                    "r" => engine.reset()?,
                    "q" => break,
                    "" => {}
                    other => warn!("Unknown command: {}", other),
                },
                None => {
                    debug!("stdin closed, commands disabled");
                    stdin_open = false;
                    if !engine.is_running()? {
                        break;
                    }
                }
            },

            result = &mut shutdown => {
                result?;
                info!("Shutdown signal received");
                break;
            }
        }
    }

    engine.stop()?;
    info!("Timer shutdown complete");
    Ok(())
}

fn print_event(config: &Config, event: DialEvent) -> anyhow::Result<()> {
    if config.json {
        println!("{}", serde_json::to_string(&event)?);
        return Ok(());
    }

    match event {
        DialEvent::TimeUpdated { remaining_seconds } => {
            println!("{}", format_remaining(remaining_seconds));
        }
        DialEvent::Finished => println!("The timer has finished!"),
    }
    Ok(())
}
