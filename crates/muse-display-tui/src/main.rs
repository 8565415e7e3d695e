//! # muse-display-tui
//!
//! Terminal dashboard for Muse headband signal display. Binds a simulated
//! headset collaborator to on-screen fields: connection status, firmware
//! version, a selectable device picker, and per-channel EEG/alpha/
//! accelerometer readouts refreshed by a fixed-rate render ticker.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use futures_util::StreamExt;
use muse_display::{DisplayBuffer, FieldStore, MonitorConfig, Ticker};
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;

mod app;
mod bridge;
mod event;
mod sim;
mod tui;
mod ui;

use app::App;
use event::AppEvent;
use sim::SimHeadset;

/// Frame redraw period (~30 fps). Data rendering into the field store runs
/// on the ticker's own cadence; this only paces terminal repaints.
const FRAME_PERIOD: Duration = Duration::from_millis(33);

/// Terminal dashboard for Muse headband signal display.
#[derive(Parser)]
#[command(name = "muse-display-tui", version, about)]
struct Cli {
    /// Path to muse-display.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render tick rate override in Hz
    #[arg(long)]
    tick_hz: Option<u32>,

    /// Enable verbose logging (set RUST_LOG for fine-grained control)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so they never corrupt the alternate screen;
    // redirect with `2>muse-display.log` to capture them.
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("muse_display=debug,muse_display_tui=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("muse_display=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = MonitorConfig::discover(cli.config.as_deref())?;
    if let Some(hz) = cli.tick_hz {
        config.tick_hz = hz;
    }
    config.validate()?;

    // Shared pipeline: producers fill the buffer, the ticker drains it
    // into the field store, the draw loop paints the store.
    let buffer = Arc::new(DisplayBuffer::new());
    let fields = Arc::new(Mutex::new(FieldStore::new()));
    let mut ticker = Ticker::start(
        Arc::clone(&buffer),
        Arc::clone(&fields),
        config.tick_period(),
    );

    let (handle, lifecycle_rx, data_rx) = SimHeadset::spawn();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (shutdown_tx, _) = broadcast::channel(1);

    let _pump = bridge::spawn_packet_pump(
        data_rx,
        Arc::clone(&buffer),
        tx.clone(),
        shutdown_tx.clone(),
    );
    let _watcher = bridge::spawn_lifecycle_watcher(
        lifecycle_rx,
        handle.clone(),
        config.reconnect_delay(),
        tx.clone(),
        shutdown_tx.clone(),
    );

    // Seed the picker so the first frame shows the paired roster.
    handle.refresh_devices();

    let mut app = App::new(handle, Arc::clone(&fields));

    let mut terminal = tui::init()?;
    let mut term_events = crossterm::event::EventStream::new();
    let mut frames = tokio::time::interval(FRAME_PERIOD);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            maybe_event = term_events.next() => {
                match maybe_event {
                    Some(Ok(ev)) => {
                        app.handle_event(AppEvent::Terminal(ev));
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event error");
                        app.handle_event(AppEvent::Log(event::LogEntry::error(format!(
                            "Terminal event error: {e}"
                        ))));
                    }
                    None => break,
                }
            }
            _ = frames.tick() => {
                app.handle_event(AppEvent::Tick);
                terminal.draw(|frame| ui::draw(frame, &app))?;
            }
            Some(ev) = rx.recv() => {
                app.handle_event(ev);
            }
            _ = tokio::signal::ctrl_c() => {
                app.handle_event(AppEvent::Quit);
            }
        }

        if app.should_quit {
            break;
        }
    }

    let _ = shutdown_tx.send(());
    ticker.stop().await;

    Ok(())
}
