//! Wire models for the Study Bot backend.
//!
//! - `StatsResponse` and its sections: payload of `GET /api/stats`
//! - `BroadcastRequest` / `BroadcastResponse`: `POST /api/broadcast`

pub mod broadcast;
pub mod stats;

pub use broadcast::{BroadcastRequest, BroadcastResponse};
pub use stats::{
    Achievements, ActivityRecord, PointStats, ScheduleStats, StatsResponse, TopUser, UserStats,
};
