use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated usage statistics served by `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct StatsResponse {
    pub users: UserStats,
    pub schedules: ScheduleStats,
    pub points: PointStats,
    pub achievements: Achievements,
    /// Daily activity counters. The backend does not guarantee any order.
    pub activity: Vec<ActivityRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub groups: u64,
}

/// Number of active users per preferred schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ScheduleStats {
    pub morning: u64,
    pub evening: u64,
    pub custom: u64,
    pub none: u64,
}

impl ScheduleStats {
    /// Counts in display order: morning, evening, custom, none
    pub fn as_array(&self) -> [u64; 4] {
        [self.morning, self.evening, self.custom, self.none]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PointStats {
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Achievements {
    pub completed_days: u64,
    pub avg_points: f64,
    /// Highest scoring users, already ranked by the backend.
    pub top_users: Vec<TopUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TopUser {
    pub name: String,
    /// Null for users with no recorded points yet.
    #[serde(default)]
    pub points: Option<i64>,
}

impl TopUser {
    /// Points with a missing or null value read as 0
    pub fn points(&self) -> i64 {
        self.points.unwrap_or(0)
    }
}

/// Activity counters for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ActivityRecord {
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub date: NaiveDate,
    pub study: u64,
    pub prayer: u64,
    pub other: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_fallback_payload() {
        // Shape served by the backend when its database is empty
        let json = r#"{
            "users": {"total": 5, "active": 3, "groups": 1},
            "schedules": {"morning": 2, "evening": 1, "custom": 0, "none": 0},
            "points": {"total": 150},
            "activity": [
                {"date": "2025-05-01", "study": 5, "prayer": 8, "other": 2},
                {"date": "2025-05-02", "study": 7, "prayer": 10, "other": 3}
            ],
            "achievements": {
                "completed_days": 12,
                "avg_points": 25.5,
                "top_users": [{"name": "أحمد", "points": 75}]
            }
        }"#;

        let stats: StatsResponse = serde_json::from_str(json).expect("parse stats");
        assert_eq!(stats.users.active, 3);
        assert_eq!(stats.points.total, 150);
        assert_eq!(stats.achievements.top_users[0].name, "أحمد");
        assert_eq!(
            stats.activity[0].date,
            NaiveDate::from_ymd_opt(2025, 5, 1).expect("date")
        );
    }

    #[test]
    fn test_integral_avg_points_parses_as_float() {
        let json = r#"{"completed_days": 0, "avg_points": 0, "top_users": []}"#;
        let achievements: Achievements = serde_json::from_str(json).expect("parse");
        assert_eq!(achievements.avg_points, 0.0);
    }

    #[test]
    fn test_invalid_activity_date_rejected() {
        let json = r#"{"date": "yesterday", "study": 1, "prayer": 1, "other": 1}"#;
        assert!(serde_json::from_str::<ActivityRecord>(json).is_err());
    }

    #[test]
    fn test_schedule_display_order() {
        let schedules = ScheduleStats {
            morning: 2,
            evening: 1,
            custom: 4,
            none: 3,
        };
        assert_eq!(schedules.as_array(), [2, 1, 4, 3]);
    }

    #[test]
    fn test_top_user_null_or_missing_points_read_as_zero() {
        let json = r#"{
            "completed_days": 1,
            "avg_points": 5,
            "top_users": [
                {"name": "Ahmed", "points": 75},
                {"name": "Sara", "points": null},
                {"name": "Omar"}
            ]
        }"#;
        let achievements: Achievements = serde_json::from_str(json).expect("parse");
        let points: Vec<i64> = achievements.top_users.iter().map(TopUser::points).collect();
        assert_eq!(points, vec![75, 0, 0]);
        assert_eq!(achievements.top_users[1].points, None);
    }
}
