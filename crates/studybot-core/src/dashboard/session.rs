//! Dashboard session state and background task coordination.
//!
//! A `DashboardSession` owns everything the admin dashboard shows: the view
//! model, the chart registry, the API client and the statistics poll timer.
//! Background work (polls, manual refreshes, broadcasts) runs in spawned
//! Tokio tasks that report back through an MPSC channel, drained by
//! `check_background_tasks` from the UI loop.
//!
//! Every statistics request is tagged with a generation number. Only the
//! response to the most recently issued request is rendered; anything older
//! is dropped, so overlapping polls can never roll the view back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, Local};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::charts::{
    activity_chart, schedules_chart, task_completion_chart, Canvas, ChartHandle, ChartRegistry,
};
use crate::config::{Config, DEFAULT_POLL_INTERVAL_SECS};
use crate::locale::Locale;
use crate::models::{
    Achievements, ActivityRecord, BroadcastResponse, ScheduleStats, StatsResponse, TopUser,
};
use crate::utils::{format_number, format_points};

use super::{Alert, DashboardView, Target, TopUserRow};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A poll produces two messages, so 32 leaves room for a slow UI frame.
const CHANNEL_BUFFER_SIZE: usize = 32;

// ============================================================================
// Background Task Results
// ============================================================================

/// Messages sent from background tasks back to the session.
enum SessionEvent {
    /// A stats request with this generation was issued
    StatsStarted(u64),
    /// A stats request finished (generation, result)
    Stats(u64, Result<StatsResponse>),
    /// A broadcast request finished
    Broadcast(Result<BroadcastResponse>),
}

/// What happened to a stats response handed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsOutcome {
    /// Rendered into the view and charts
    Applied,
    /// The request failed and the blocking alert was raised
    Failed,
    /// Superseded by a newer request and discarded
    Stale,
}

// ============================================================================
// Session
// ============================================================================

pub struct DashboardSession {
    api: ApiClient,
    locale: Locale,
    poll_interval: Duration,

    pub view: DashboardView,
    pub charts: ChartRegistry,

    /// Latest issued stats generation, shared with background tasks
    generation: Arc<AtomicU64>,
    /// Generation of the last stats response that was handled
    handled_generation: u64,

    event_tx: mpsc::Sender<SessionEvent>,
    event_rx: mpsc::Receiver<SessionEvent>,

    poller: Option<JoinHandle<()>>,
}

impl DashboardSession {
    /// Create a session and stamp the footer year. Polling starts with `start()`.
    pub fn new(api: ApiClient, locale: Locale, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
        } else {
            poll_interval
        };

        let (event_tx, event_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mut view = DashboardView::new();
        view.stamp_footer_year(Local::now().year());

        Self {
            api,
            locale,
            poll_interval,
            view,
            charts: ChartRegistry::new(),
            generation: Arc::new(AtomicU64::new(0)),
            handled_generation: 0,
            event_tx,
            event_rx,
            poller: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api = ApiClient::new(&config.base_url, config.request_timeout())?;
        Ok(Self::new(api, config.locale, config.poll_interval()))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// Generation of the most recently issued stats request
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn next_generation(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    // =========================================================================
    // Loader
    // =========================================================================

    pub fn show_loader(&mut self) {
        self.view.loader.show();
    }

    pub fn hide_loader(&mut self) {
        self.view.loader.hide();
    }

    // =========================================================================
    // Polling Lifecycle
    // =========================================================================

    /// Start polling: load immediately, then once per poll interval.
    /// Calling `start` on a running session does nothing.
    pub fn start(&mut self) {
        if self.is_polling() {
            return;
        }

        let api = self.api.clone();
        let counter = Arc::clone(&self.generation);
        let tx = self.event_tx.clone();
        let period = self.poll_interval;

        self.poller = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                Self::spawn_stats_fetch(api.clone(), Arc::clone(&counter), tx.clone());
            }
        }));

        info!(interval_secs = period.as_secs_f64(), "Stats polling started");
    }

    /// Stop the poll timer. Requests already in flight still complete.
    pub fn stop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
            info!("Stats polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Issue a new stats generation and show the loader
    pub fn begin_stats_request(&mut self) -> u64 {
        let generation = Self::next_generation(&self.generation);
        self.show_loader();
        generation
    }

    /// Load statistics and render them, waiting for the response.
    pub async fn load_stats(&mut self) -> StatsOutcome {
        let generation = self.begin_stats_request();
        let result = self.api.fetch_stats().await;
        self.apply_stats(generation, result)
    }

    /// Load statistics in a background task
    pub fn refresh_background(&self) {
        Self::spawn_stats_fetch(
            self.api.clone(),
            Arc::clone(&self.generation),
            self.event_tx.clone(),
        );
    }

    fn spawn_stats_fetch(api: ApiClient, counter: Arc<AtomicU64>, tx: mpsc::Sender<SessionEvent>) {
        tokio::spawn(async move {
            let generation = Self::next_generation(&counter);
            Self::send_event(&tx, SessionEvent::StatsStarted(generation)).await;
            let result = api.fetch_stats().await;
            Self::send_event(&tx, SessionEvent::Stats(generation, result)).await;
        });
    }

    /// Handle a stats response. Stale responses leave the view untouched.
    pub fn apply_stats(&mut self, generation: u64, result: Result<StatsResponse>) -> StatsOutcome {
        let latest = self.latest_generation();
        if generation != latest {
            debug!(generation, latest, "Discarding stale stats response");
            return StatsOutcome::Stale;
        }
        self.handled_generation = generation;

        match result {
            Ok(stats) => {
                self.render_stats(stats);
                self.hide_loader();
                StatsOutcome::Applied
            }
            Err(e) => {
                error!(error = %e, "Failed to load stats");
                self.hide_loader();
                self.view.blocking_alert = Some(self.locale.stats_load_failed().to_string());
                StatsOutcome::Failed
            }
        }
    }

    fn render_stats(&mut self, mut stats: StatsResponse) {
        let counters = [
            (Target::TotalUsers, stats.users.total.to_string()),
            (Target::ActiveUsers, stats.users.active.to_string()),
            (Target::TotalGroups, stats.users.groups.to_string()),
            (Target::MorningUsers, stats.schedules.morning.to_string()),
            (Target::EveningUsers, stats.schedules.evening.to_string()),
            (Target::CustomUsers, stats.schedules.custom.to_string()),
            (Target::NoScheduleUsers, stats.schedules.none.to_string()),
            (Target::TotalPoints, stats.points.total.to_string()),
            (Target::CompletedDays, stats.achievements.completed_days.to_string()),
            (Target::AvgPoints, format_number(stats.achievements.avg_points)),
        ];
        for (target, value) in counters {
            self.view.set_text(target, value);
        }

        self.update_top_users(&stats.achievements.top_users);

        self.draw_activity_chart(&mut stats.activity);
        self.draw_schedules_chart(&stats.schedules);
        self.draw_tasks_completion_chart(&stats.achievements);

        self.view.last_updated = Some(Local::now());
        debug!(total_users = stats.users.total, "Stats rendered");
    }

    /// Replace the top users list, keeping the backend's ranking order
    pub fn update_top_users(&mut self, users: &[TopUser]) {
        let unit = self.locale.points_unit();
        let rows = users
            .iter()
            .map(|u| TopUserRow {
                name: u.name.clone(),
                points: format_points(u.points(), unit),
            })
            .collect();
        self.view.set_top_users(rows);
    }

    // =========================================================================
    // Charts
    // =========================================================================

    /// Sorts `records` by date in place, then draws the activity chart
    pub fn draw_activity_chart(&mut self, records: &mut [ActivityRecord]) -> ChartHandle {
        let spec = activity_chart(records, self.locale);
        self.charts.draw(Canvas::Activity, spec)
    }

    pub fn draw_schedules_chart(&mut self, schedules: &ScheduleStats) -> ChartHandle {
        let spec = schedules_chart(schedules, self.locale);
        self.charts.draw(Canvas::Schedules, spec)
    }

    pub fn draw_tasks_completion_chart(&mut self, achievements: &Achievements) -> ChartHandle {
        let spec = task_completion_chart(achievements, self.locale);
        self.charts.draw(Canvas::TasksCompletion, spec)
    }

    // =========================================================================
    // Broadcast
    // =========================================================================

    /// Validate the message input. Shows the validation alert and returns
    /// `None` when it is blank, otherwise shows the loader and returns the
    /// trimmed message.
    pub fn prepare_broadcast(&mut self) -> Option<String> {
        let message = self.view.broadcast_input.trim().to_string();
        if message.is_empty() {
            self.view.broadcast_result = Some(Alert::danger(self.locale.broadcast_empty()));
            return None;
        }
        self.show_loader();
        Some(message)
    }

    /// Submit the broadcast form, waiting for the response
    pub async fn submit_broadcast(&mut self) {
        if let Some(message) = self.prepare_broadcast() {
            let result = self.api.broadcast(&message).await;
            self.apply_broadcast(result);
        }
    }

    /// Submit the broadcast form in a background task.
    /// Returns false if validation failed and nothing was sent.
    pub fn submit_broadcast_background(&mut self) -> bool {
        let Some(message) = self.prepare_broadcast() else {
            return false;
        };

        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api.broadcast(&message).await;
            Self::send_event(&tx, SessionEvent::Broadcast(result)).await;
        });
        true
    }

    /// Handle a broadcast response
    pub fn apply_broadcast(&mut self, result: Result<BroadcastResponse>) {
        self.hide_loader();

        match result {
            Ok(reply) => {
                if let Some(message) = reply.error_message() {
                    warn!(error = %message, "Broadcast rejected");
                    self.view.broadcast_result = Some(Alert::danger(message));
                    return;
                }

                let mut lines = vec![self.locale.broadcast_sent(reply.success_count())];
                if reply.fail_count() > 0 {
                    lines.push(self.locale.broadcast_partial_failure(reply.fail_count()));
                }
                info!(
                    success = reply.success_count(),
                    fail = reply.fail_count(),
                    "Broadcast sent"
                );
                self.view.broadcast_result = Some(Alert::success(lines));
                self.view.broadcast_input.clear();
            }
            Err(e) => {
                error!(error = %e, "Broadcast failed");
                self.view.broadcast_result = Some(Alert::danger(self.locale.broadcast_failed()));
            }
        }
    }

    // =========================================================================
    // Background Task Results
    // =========================================================================

    /// Helper to send events, logging any channel errors
    async fn send_event(tx: &mpsc::Sender<SessionEvent>, event: SessionEvent) {
        if tx.send(event).await.is_err() {
            debug!("Session dropped before background task finished");
        }
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }

        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StatsStarted(generation) => {
                // A start notice can arrive after a newer response was handled
                if generation == self.latest_generation() && generation > self.handled_generation {
                    self.show_loader();
                }
            }
            SessionEvent::Stats(generation, result) => {
                self.apply_stats(generation, result);
            }
            SessionEvent::Broadcast(result) => {
                self.apply_broadcast(result);
            }
        }
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// Tests
// ============================================================================
