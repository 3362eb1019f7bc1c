use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::core::{
    color::Color,
    config::Settings,
    markup::{AnsiMarkup, MarkupScheme},
    model::{Classification, HighlightedNpc, MenuEntry},
    notifier::LogNotifier,
    plugin::NpcIndicatorsPlugin,
    script::{self, HostEvent},
};

const USAGE: &str = "usage: npc-indicators <events.jsonl> [settings.json]";
const REDRAW_INTERVAL: Duration = Duration::from_millis(50);

/// What a replay produced once every event was handled.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub menu_entries: Vec<MenuEntry>,
    pub highlights: Vec<HighlightedNpc>,
    pub redraws: usize,
}

/// Replay a recorded event script.
///
/// One task owns the plugin and handles events in order, as the host's
/// client thread would. A second task plays the overlay: it pulls the
/// current highlights on a fixed interval through the shared tracker.
pub async fn replay(
    events: Vec<HostEvent>,
    mut settings: Settings,
    redraw_interval: Duration,
) -> ReplayReport {
    let mut plugin = NpcIndicatorsPlugin::new(&settings, Box::new(LogNotifier));
    let publisher = plugin.publisher();

    let (tx, mut rx) = mpsc::channel::<HostEvent>(32);
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let overlay = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(redraw_interval);
        let mut redraws: usize = 0;
        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    let highlights = publisher.current_highlights();
                    log::debug!("Redraw {}: {}", redraws, render_line(&highlights));
                    redraws += 1;
                }
            }
        }
        (redraws, publisher)
    });

    let handler = tokio::spawn(async move {
        let mut menu_entries = Vec::new();
        while let Some(event) = rx.recv().await {
            if let Some(entry) = script::dispatch(event, &mut plugin, &mut settings) {
                if entry.is_modified() {
                    log::info!("Menu: {} {}", entry.option, entry.target);
                }
                menu_entries.push(entry);
            }
        }
        menu_entries
    });

    for event in events {
        if tx.send(event).await.is_err() {
            log::warn!("Event handler stopped early");
            break;
        }
    }
    drop(tx);

    let menu_entries = handler.await.unwrap_or_else(|e| {
        log::warn!("Event handler failed: {}", e);
        Vec::new()
    });

    let _ = stop_tx.send(());
    let (redraws, highlights) = match overlay.await {
        Ok((redraws, publisher)) => (redraws, publisher.current_highlights()),
        Err(e) => {
            log::warn!("Overlay task failed: {}", e);
            (0, Vec::new())
        }
    };

    ReplayReport {
        menu_entries,
        highlights,
        redraws,
    }
}

/// One overlay frame as terminal text.
fn render_line(highlights: &[HighlightedNpc]) -> String {
    if highlights.is_empty() {
        return "(nothing highlighted)".to_string();
    }
    highlights
        .iter()
        .map(|npc| {
            let color = match npc.classification {
                Classification::MatchedDead => Color::RED,
                _ => Color::CYAN,
            };
            AnsiMarkup.wrap(color, &format!("{}#{}", npc.name, npc.id))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn load_settings(path: Option<PathBuf>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{}; using default settings", e);
            Settings::default()
        }
    }
}

pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(script_path) = args.next() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };
    let settings = load_settings(args.next());

    let events = match script::load_script(&script_path) {
        Ok(events) => events,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Replaying {} events from {:?}", events.len(), script_path);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let report = runtime.block_on(replay(events, settings, REDRAW_INTERVAL));

    log::info!(
        "Done: {} menu entries ({} recolored), {} redraws",
        report.menu_entries.len(),
        report.menu_entries.iter().filter(|e| e.is_modified()).count(),
        report.redraws
    );
    log::info!("Highlighted: {}", render_line(&report.highlights));
    ExitCode::SUCCESS
}
