use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use engine_logging::{engine_info, engine_warn};
use relnotes_core::{
    update, AppState, Msg, Notification, RefreshStatus, StickyHeaderPositioner, Timestamp,
    NEVER_UPDATED,
};
use relnotes_engine::{
    Constraint, FeedFetcher, FileWatermarkStore, LogNotifier, Notifier, PeriodicJobSpec, Poller,
    Registration, ReqwestFetcher, Scheduler,
};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render;

/// Unique name of the background poll job.
const POLL_JOB_NAME: &str = "androidxChecker";

/// Logs the notification and echoes it on stdout.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        LogNotifier.notify(notification);
        match &notification.subtitle {
            Some(subtitle) => println!("{}: {}", notification.title, subtitle),
            None => println!("{}", notification.title),
        }
    }
}

fn build_poller(config: &AppConfig, fetcher: Arc<dyn FeedFetcher>) -> Poller {
    Poller::new(
        config.feed_url.clone(),
        config.notification_channel.clone(),
        fetcher,
        Box::new(FileWatermarkStore::new(&config.state_dir)),
        Arc::new(TerminalNotifier),
    )
}

fn format_timestamp(timestamp: Timestamp) -> String {
    if timestamp == NEVER_UPDATED {
        return "never".to_string();
    }
    DateTime::from_timestamp_millis(timestamp)
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

pub async fn check(config: &AppConfig) -> Result<()> {
    let mut poller = build_poller(config, Arc::new(ReqwestFetcher::default()));
    let outcome = poller
        .poll_once()
        .await
        .with_context(|| format!("poll of {} failed", config.feed_url))?;

    if !outcome.check.notify {
        println!(
            "No new release notes (last seen {}).",
            format_timestamp(outcome.previous_watermark)
        );
    } else if !outcome.watermark_stored {
        eprintln!("Warning: the new watermark was not saved; the next check will notify again.");
    }
    Ok(())
}

pub async fn daemon(config: &AppConfig) -> Result<()> {
    let poller = build_poller(config, Arc::new(ReqwestFetcher::default()));
    let spec = PeriodicJobSpec::new(POLL_JOB_NAME, config.poll_interval())
        .with_constraint(Constraint::network_for(&config.feed_url));

    let mut scheduler = Scheduler::new();
    if scheduler.register(spec, poller) == Registration::Kept {
        engine_warn!("Poll job {} was already registered", POLL_JOB_NAME);
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    engine_info!("Interrupted; stopping scheduler");
    scheduler.shutdown();
    scheduler.join().await;
    Ok(())
}

/// Runs one refresh through the state machine and returns the loaded screen.
async fn load_screen(config: &AppConfig) -> Result<(AppState, EffectRunner)> {
    let mut runner = EffectRunner::new(&config.feed_url, Arc::new(ReqwestFetcher::default()));

    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    runner.enqueue(effects);
    let msg = runner.next_msg().await;
    let (state, _) = update(state, msg);

    if state.view().status != RefreshStatus::Loaded {
        bail!(
            "could not load {}; see the log for details",
            config.feed_url
        );
    }
    Ok((state, runner))
}

pub async fn list(config: &AppConfig, scroll: i32, rows: u16) -> Result<()> {
    let (state, _runner) = load_screen(config).await?;
    let width = usize::from(config.wrap_width);
    let heights = render::measure(state.list(), width);
    let (state, _) = update(state, Msg::RowsMeasured(heights));
    let (state, _) = update(state, Msg::ViewportResized(i32::from(rows)));
    let (mut state, _) = update(state, Msg::ScrolledBy(scroll));

    if state.consume_dirty() {
        let mut positioner = StickyHeaderPositioner::new();
        let frame = render::render(&state.view(), width, &mut positioner);
        for line in &frame.lines {
            println!("{line}");
        }
        engine_info!(
            "Rendered {} rows at scroll {} of {} items",
            frame.lines.len(),
            frame.scroll,
            state.list().len()
        );
    }
    Ok(())
}

pub async fn open(config: &AppConfig, position: usize) -> Result<()> {
    let (state, mut runner) = load_screen(config).await?;
    let (_state, effects) = update(state, Msg::EntryActivated(position));
    if effects.is_empty() {
        bail!("position {position} is not a release entry with a link");
    }
    runner.enqueue(effects);
    Ok(())
}
