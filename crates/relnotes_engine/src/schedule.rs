//! Named periodic jobs on the tokio runtime.

use std::collections::HashMap;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn, with_poll_cycle};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub type JobError = Box<dyn std::error::Error + Send + Sync>;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[async_trait::async_trait]
pub trait PeriodicJob: Send {
    async fn run(&mut self) -> Result<(), JobError>;
}

/// Precondition checked before every run; an unmet one skips the period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    None,
    /// The host must resolve.
    NetworkConnected { host: String, port: u16 },
}

impl Constraint {
    /// Network constraint for the host of `url`; unparsable urls get none.
    pub fn network_for(url: &str) -> Self {
        let Ok(parsed) = url::Url::parse(url) else {
            return Constraint::None;
        };
        match (parsed.host_str(), parsed.port_or_known_default()) {
            (Some(host), Some(port)) => Constraint::NetworkConnected {
                host: host.to_string(),
                port,
            },
            _ => Constraint::None,
        }
    }

    pub async fn is_satisfied(&self) -> bool {
        match self {
            Constraint::None => true,
            Constraint::NetworkConnected { host, port } => {
                let lookup = tokio::net::lookup_host((host.as_str(), *port));
                match tokio::time::timeout(PROBE_TIMEOUT, lookup).await {
                    Ok(Ok(mut addrs)) => addrs.next().is_some(),
                    _ => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodicJobSpec {
    pub name: String,
    pub period: Duration,
    pub constraint: Constraint,
}

impl PeriodicJobSpec {
    pub fn new(name: impl Into<String>, period: Duration) -> Self {
        Self {
            name: name.into(),
            period,
            constraint: Constraint::None,
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// A job with that name already exists and was left untouched.
    Kept,
}

/// Runs each registered job once per period. A job's runs never overlap:
/// the next tick is awaited only after the previous run returns, and ticks
/// missed meanwhile are skipped.
pub struct Scheduler {
    jobs: HashMap<String, JoinHandle<()>>,
    shutdown: CancellationToken,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            jobs: HashMap::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn register<J>(&mut self, spec: PeriodicJobSpec, job: J) -> Registration
    where
        J: PeriodicJob + 'static,
    {
        if self.jobs.contains_key(&spec.name) {
            engine_info!("Periodic job {:?} already registered; keeping it", spec.name);
            return Registration::Kept;
        }
        engine_info!(
            "Registering periodic job {:?} every {:?} ({:?})",
            spec.name,
            spec.period,
            spec.constraint
        );
        let name = spec.name.clone();
        let handle = tokio::spawn(run_periodic(spec, job, self.shutdown.clone()));
        self.jobs.insert(name, handle);
        Registration::Registered
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.jobs.contains_key(name)
    }

    /// Stops every job after its current run, if any, completes.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Waits for all job loops to exit. Call [`Scheduler::shutdown`] first.
    pub async fn join(mut self) {
        for (name, handle) in std::mem::take(&mut self.jobs) {
            if let Err(err) = handle.await {
                engine_warn!("Periodic job {:?} ended abnormally: {}", name, err);
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_periodic<J: PeriodicJob>(
    spec: PeriodicJobSpec,
    mut job: J,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(spec.period.max(MIN_PERIOD));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycle: u64 = 0;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }
        cycle += 1;
        with_poll_cycle(cycle, run_cycle(&spec, &mut job)).await;
    }

    engine_info!("Periodic job {:?} stopped", spec.name);
}

async fn run_cycle<J: PeriodicJob>(spec: &PeriodicJobSpec, job: &mut J) {
    if !spec.constraint.is_satisfied().await {
        engine_info!("Skipping {:?}: constraint {:?} not met", spec.name, spec.constraint);
        return;
    }
    match job.run().await {
        Ok(()) => engine_info!("Periodic job {:?} finished", spec.name),
        // Retry policy is the period itself.
        Err(err) => engine_warn!("Periodic job {:?} failed: {}", spec.name, err),
    }
}
