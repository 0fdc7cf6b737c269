//! The admin dashboard session and the view model it renders into.
//!
//! - `Target`: the named text slots of the dashboard (`total-users`, ...)
//! - `DashboardView`: loader, text slots, top users, broadcast form and alerts
//! - `DashboardSession`: owns the view, charts, API client and poll timer

pub mod session;
pub mod targets;
pub mod view;

pub use session::{DashboardSession, StatsOutcome};
pub use targets::Target;
pub use view::{Alert, AlertKind, DashboardView, Loader, TopUserRow};
