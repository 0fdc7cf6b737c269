use serde::Serialize;

/// Text slot of the dashboard filled from the stats payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Target {
    TotalUsers,
    ActiveUsers,
    TotalGroups,
    MorningUsers,
    EveningUsers,
    CustomUsers,
    NoScheduleUsers,
    TotalPoints,
    CompletedDays,
    AvgPoints,
}

impl Target {
    pub const ALL: [Target; 10] = [
        Target::TotalUsers,
        Target::ActiveUsers,
        Target::TotalGroups,
        Target::MorningUsers,
        Target::EveningUsers,
        Target::CustomUsers,
        Target::NoScheduleUsers,
        Target::TotalPoints,
        Target::CompletedDays,
        Target::AvgPoints,
    ];

    /// Element identifier in the dashboard view contract
    pub fn element_id(&self) -> &'static str {
        match self {
            Target::TotalUsers => "total-users",
            Target::ActiveUsers => "active-users",
            Target::TotalGroups => "total-groups",
            Target::MorningUsers => "morning-users",
            Target::EveningUsers => "evening-users",
            Target::CustomUsers => "custom-users",
            Target::NoScheduleUsers => "no-schedule-users",
            Target::TotalPoints => "total-points",
            Target::CompletedDays => "completed-days",
            Target::AvgPoints => "avg-points",
        }
    }
}
