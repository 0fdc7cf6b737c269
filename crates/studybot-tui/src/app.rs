//! Application state management for the Study Bot dashboard.
//!
//! The `App` struct wraps the core `DashboardSession` with the terminal UI
//! state: current tab, overlay state and the broadcast compose mode.

use anyhow::Result;
use tracing::{debug, info};

use studybot_core::{Config, DashboardSession};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length of a broadcast message.
/// Telegram rejects text messages longer than 4096 characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Activity,
    Distribution,
    Broadcast,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Activity, Tab::Distribution, Tab::Broadcast];

    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Activity => "Activity",
            Tab::Distribution => "Distribution",
            Tab::Broadcast => "Broadcast",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Overview => Tab::Activity,
            Tab::Activity => Tab::Distribution,
            Tab::Distribution => Tab::Broadcast,
            Tab::Broadcast => Tab::Overview,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Overview => Tab::Broadcast,
            Tab::Activity => Tab::Overview,
            Tab::Distribution => Tab::Activity,
            Tab::Broadcast => Tab::Distribution,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Composing,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    pub session: DashboardSession,

    pub state: AppState,
    pub current_tab: Tab,
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        debug!(base_url = %config.base_url, locale = %config.locale, "App::new() starting");
        let session = DashboardSession::from_config(&config)?;

        Ok(Self {
            config,
            session,
            state: AppState::Normal,
            current_tab: Tab::Overview,
            status_message: None,
        })
    }

    /// Begin polling statistics
    pub fn start(&mut self) {
        info!(base_url = %self.session.base_url(), "Connecting to Study Bot");
        self.session.start();
    }

    /// Fetch statistics now, outside the regular poll
    pub fn refresh_now(&mut self) {
        // Show the loader right away; the task's start notice may lag a frame
        self.session.show_loader();
        self.session.refresh_background();
        self.status_message = Some(self.session.locale().refreshing().to_string());
    }

    // =========================================================================
    // Broadcast Form
    // =========================================================================

    /// Switch to the broadcast tab and focus the message input
    pub fn start_compose(&mut self) {
        self.current_tab = Tab::Broadcast;
        self.state = AppState::Composing;
    }

    pub fn cancel_compose(&mut self) {
        self.state = AppState::Normal;
    }

    /// Submit the message. Compose mode ends only if something was sent.
    pub fn send_broadcast(&mut self) {
        if self.session.submit_broadcast_background() {
            self.state = AppState::Normal;
            self.status_message = Some(self.session.locale().sending_broadcast().to_string());
        }
    }

    pub fn push_message_char(&mut self, c: char) {
        let input = &mut self.session.view.broadcast_input;
        if can_add_message_char(input.chars().count(), c) {
            input.push(c);
        }
    }

    pub fn pop_message_char(&mut self) {
        self.session.view.broadcast_input.pop();
    }

    // =========================================================================
    // Alerts and Background Results
    // =========================================================================

    pub fn has_blocking_alert(&self) -> bool {
        self.session.view.blocking_alert.is_some()
    }

    pub fn dismiss_alert(&mut self) {
        self.session.view.dismiss_alert();
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        self.session.check_background_tasks();
        if self.status_message.is_some() && !self.session.view.loader.is_visible() {
            self.status_message = None;
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a message character should be accepted
pub fn can_add_message_char(current_len: usize, c: char) -> bool {
    current_len < MAX_MESSAGE_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
