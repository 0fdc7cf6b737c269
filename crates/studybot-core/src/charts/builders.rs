use crate::locale::Locale;
use crate::models::{Achievements, ActivityRecord, ScheduleStats};

use super::{
    Axis, ChartData, ChartKind, ChartOptions, ChartSpec, ColorSet, Dataset, Legend,
    LegendPosition, Plugins, Scales, Title,
};

// ============================================================================
// Palette
// ============================================================================

const GREEN: &str = "#4caf50";
const BLUE: &str = "#2196f3";
const ORANGE: &str = "#ff9800";
const GREY: &str = "#9e9e9e";

/// Line fills for study, prayer, other
const ACTIVITY_FILLS: [&str; 3] = [
    "rgba(76, 175, 80, 0.1)",
    "rgba(33, 150, 243, 0.1)",
    "rgba(255, 152, 0, 0.1)",
];

const TASK_COLORS: [&str; 4] = [
    "rgba(76, 175, 80, 0.7)",
    "rgba(33, 150, 243, 0.7)",
    "rgba(255, 152, 0, 0.7)",
    "rgba(156, 39, 176, 0.7)",
];

/// Line smoothing used by every activity series
const ACTIVITY_TENSION: f64 = 0.2;

/// Completion percentages for prayer, study, meals and daily review.
///
/// The stats payload carries no per-task completion figures yet, so the
/// chart shows these fixed values whatever achievements it is given.
pub const TASK_COMPLETION_PLACEHOLDER: [f64; 4] = [85.0, 70.0, 90.0, 60.0];

// ============================================================================
// Builders
// ============================================================================

/// Build the multi-series activity line chart.
///
/// Sorts `records` ascending by date in place before extracting series.
pub fn activity_chart(records: &mut [ActivityRecord], locale: Locale) -> ChartSpec {
    records.sort_by_key(|r| r.date);

    let labels = records
        .iter()
        .map(|r| locale.format_short_date(r.date))
        .collect();

    let [study_label, prayer_label, other_label] = locale.activity_series();
    let series: [(&str, &str, fn(&ActivityRecord) -> u64); 3] = [
        (study_label, GREEN, |r| r.study),
        (prayer_label, BLUE, |r| r.prayer),
        (other_label, ORANGE, |r| r.other),
    ];

    let datasets = series
        .iter()
        .zip(ACTIVITY_FILLS)
        .map(|((label, color, value), fill)| Dataset {
            label: Some(label.to_string()),
            data: records.iter().map(|r| value(r) as f64).collect(),
            border_color: Some(color.to_string()),
            background_color: Some(ColorSet::Single(fill.to_string())),
            tension: Some(ACTIVITY_TENSION),
            fill: Some(true),
            ..Default::default()
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Line,
        data: ChartData { labels, datasets },
        options: ChartOptions {
            scales: Some(Scales {
                x: Some(Axis {
                    title: Some(Title::shown(locale.activity_x_title())),
                    ..Default::default()
                }),
                y: Some(Axis {
                    begin_at_zero: true,
                    title: Some(Title::shown(locale.activity_y_title())),
                    ..Default::default()
                }),
            }),
            plugins: Plugins {
                title: Some(Title::shown(locale.activity_title())),
                legend: Legend::at(LegendPosition::Top),
            },
            ..Default::default()
        },
    }
}

/// Build the schedule distribution doughnut chart
pub fn schedules_chart(schedules: &ScheduleStats, locale: Locale) -> ChartSpec {
    let dataset = Dataset {
        data: schedules.as_array().iter().map(|&v| v as f64).collect(),
        background_color: Some(ColorSet::PerPoint(
            [GREEN, BLUE, ORANGE, GREY].iter().map(|c| c.to_string()).collect(),
        )),
        border_width: Some(1),
        ..Default::default()
    };

    ChartSpec {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: locale.schedule_labels().iter().map(|l| l.to_string()).collect(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            plugins: Plugins {
                title: Some(Title::shown(locale.schedules_title())),
                legend: Legend::at(LegendPosition::Right),
            },
            ..Default::default()
        },
    }
}

/// Build the task completion bar chart.
///
/// `_achievements` is accepted for when the backend starts reporting task
/// completion; the plotted values are `TASK_COMPLETION_PLACEHOLDER`.
pub fn task_completion_chart(_achievements: &Achievements, locale: Locale) -> ChartSpec {
    let dataset = Dataset {
        label: Some(locale.tasks_dataset_label().to_string()),
        data: TASK_COMPLETION_PLACEHOLDER.to_vec(),
        background_color: Some(ColorSet::PerPoint(
            TASK_COLORS.iter().map(|c| c.to_string()).collect(),
        )),
        border_width: Some(1),
        ..Default::default()
    };

    ChartSpec {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: locale.task_labels().iter().map(|l| l.to_string()).collect(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            scales: Some(Scales {
                x: None,
                y: Some(Axis {
                    begin_at_zero: true,
                    max: Some(100.0),
                    title: Some(Title::shown(locale.tasks_y_title())),
                }),
            }),
            plugins: Plugins {
                title: Some(Title::shown(locale.tasks_title())),
                legend: Legend::hidden(),
            },
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, study: u64, prayer: u64, other: u64) -> ActivityRecord {
        ActivityRecord {
            date: NaiveDate::from_ymd_opt(2025, 5, day).expect("date"),
            study,
            prayer,
            other,
        }
    }

    #[test]
    fn test_activity_chart_sorts_records_in_place() {
        let mut records = vec![record(3, 4, 9, 1), record(1, 5, 8, 2), record(2, 7, 10, 3)];
        let spec = activity_chart(&mut records, Locale::English);

        let days: Vec<u32> = records.iter().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(days, vec![1, 2, 3]);

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.data.labels[0], "Thu, May 1");
        assert_eq!(spec.data.datasets.len(), 3);
        assert_eq!(spec.data.datasets[0].data, vec![5.0, 7.0, 4.0]);
        assert_eq!(spec.data.datasets[1].data, vec![8.0, 10.0, 9.0]);
        assert_eq!(spec.data.datasets[2].data, vec![2.0, 3.0, 1.0]);
        assert_eq!(spec.data.datasets[1].border_color.as_deref(), Some(BLUE));
    }

    #[test]
    fn test_activity_chart_empty_input() {
        let spec = activity_chart(&mut [], Locale::Arabic);
        assert!(spec.data.labels.is_empty());
        assert!(spec.data.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn test_schedules_chart_fixed_categories() {
        let schedules = ScheduleStats {
            morning: 2,
            evening: 1,
            custom: 0,
            none: 7,
        };
        let spec = schedules_chart(&schedules, Locale::English);

        assert_eq!(spec.kind, ChartKind::Doughnut);
        assert_eq!(spec.data.labels.len(), 4);
        assert_eq!(spec.data.datasets[0].data, vec![2.0, 1.0, 0.0, 7.0]);
        let colors = spec.data.datasets[0].background_color.as_ref().expect("colors");
        assert_eq!(colors.at(3), Some(GREY));
        assert_eq!(spec.options.plugins.legend.position, Some(LegendPosition::Right));
    }

    #[test]
    fn test_task_completion_ignores_achievements() {
        let empty = Achievements::default();
        let busy = Achievements {
            completed_days: 300,
            avg_points: 99.5,
            top_users: vec![],
        };

        let a = task_completion_chart(&empty, Locale::Arabic);
        let b = task_completion_chart(&busy, Locale::Arabic);

        assert_eq!(a.data.datasets[0].data, vec![85.0, 70.0, 90.0, 60.0]);
        assert_eq!(a, b);
        assert!(!a.options.plugins.legend.is_visible());
    }

    #[test]
    fn test_chart_spec_serializes_constructor_shape() {
        let spec = task_completion_chart(&Achievements::default(), Locale::English);
        let json = serde_json::to_value(&spec).expect("serialize");

        assert_eq!(json["type"], "bar");
        assert_eq!(json["options"]["scales"]["y"]["max"], 100.0);
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(json["options"]["maintainAspectRatio"], false);
        assert_eq!(json["data"]["datasets"][0]["borderWidth"], 1);
    }
}
