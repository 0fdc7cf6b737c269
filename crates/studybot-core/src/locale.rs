//! User-facing strings for the dashboard.
//!
//! Arabic is the default, matching the bot's audience. English is available
//! for operators who prefer it.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::dashboard::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "en")]
    English,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "arabic" | "ar-sa" => Ok(Locale::Arabic),
            "en" | "english" | "en-us" => Ok(Locale::English),
            other => Err(anyhow::anyhow!("Unknown locale '{}'. Supported: ar, en", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Arabic => write!(f, "ar"),
            Locale::English => write!(f, "en"),
        }
    }
}

impl Locale {
    // ===== Counters =====

    pub fn points_unit(&self) -> &'static str {
        match self {
            Locale::Arabic => "نقطة",
            Locale::English => "points",
        }
    }

    /// Blocking alert shown when the statistics could not be loaded
    pub fn stats_load_failed(&self) -> &'static str {
        match self {
            Locale::Arabic => "حدث خطأ أثناء تحميل البيانات. الرجاء المحاولة مرة أخرى لاحقاً.",
            Locale::English => "An error occurred while loading data. Please try again later.",
        }
    }

    // ===== Broadcast =====

    pub fn broadcast_empty(&self) -> &'static str {
        match self {
            Locale::Arabic => "يرجى كتابة نص الرسالة قبل الإرسال",
            Locale::English => "Please write a message before sending",
        }
    }

    pub fn broadcast_failed(&self) -> &'static str {
        match self {
            Locale::Arabic => "حدث خطأ أثناء إرسال الرسالة. الرجاء المحاولة مرة أخرى لاحقاً.",
            Locale::English => "An error occurred while sending the message. Please try again later.",
        }
    }

    pub fn broadcast_sent(&self, success: u64) -> String {
        match self {
            Locale::Arabic => format!("تم إرسال الرسالة بنجاح إلى {} مستخدم.", success),
            Locale::English => format!("Message sent successfully to {} users.", success),
        }
    }

    pub fn broadcast_partial_failure(&self, fail: u64) -> String {
        match self {
            Locale::Arabic => format!("فشل الإرسال إلى {} مستخدم.", fail),
            Locale::English => format!("Sending failed for {} users.", fail),
        }
    }

    // ===== Activity chart =====

    pub fn activity_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "نشاط المستخدمين خلال الأسبوع الماضي",
            Locale::English => "User activity over the past week",
        }
    }

    pub fn activity_x_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "اليوم",
            Locale::English => "Day",
        }
    }

    pub fn activity_y_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "عدد النشاطات",
            Locale::English => "Activity count",
        }
    }

    /// Series labels: study, prayer, other
    pub fn activity_series(&self) -> [&'static str; 3] {
        match self {
            Locale::Arabic => ["الدراسة", "الصلاة", "أخرى"],
            Locale::English => ["Study", "Prayer", "Other"],
        }
    }

    // ===== Schedule distribution chart =====

    pub fn schedules_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "توزيع استخدام الجداول",
            Locale::English => "Schedule usage distribution",
        }
    }

    /// Category labels: morning, evening, custom, none
    pub fn schedule_labels(&self) -> [&'static str; 4] {
        match self {
            Locale::Arabic => ["الجدول الصباحي", "الجدول المسائي", "جدول مخصص", "بدون جدول"],
            Locale::English => ["Morning schedule", "Evening schedule", "Custom schedule", "No schedule"],
        }
    }

    // ===== Task completion chart =====

    pub fn tasks_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "نسبة إكمال المهام",
            Locale::English => "Task completion rate",
        }
    }

    pub fn tasks_dataset_label(&self) -> &'static str {
        match self {
            Locale::Arabic => "نسبة الإكمال",
            Locale::English => "Completion rate",
        }
    }

    pub fn tasks_y_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "نسبة الإكمال (%)",
            Locale::English => "Completion rate (%)",
        }
    }

    /// Task labels: prayer, study, meals, daily review
    pub fn task_labels(&self) -> [&'static str; 4] {
        match self {
            Locale::Arabic => ["الصلاة", "الدراسة", "الوجبات", "التقييم اليومي"],
            Locale::English => ["Prayer", "Study", "Meals", "Daily review"],
        }
    }

    // ===== Dashboard screen =====

    /// Caption shown next to a counter
    pub fn target_label(&self, target: Target) -> &'static str {
        let [morning, evening, custom, none] = self.schedule_labels();
        match (self, target) {
            (_, Target::MorningUsers) => morning,
            (_, Target::EveningUsers) => evening,
            (_, Target::CustomUsers) => custom,
            (_, Target::NoScheduleUsers) => none,
            (Locale::Arabic, Target::TotalUsers) => "إجمالي المستخدمين",
            (Locale::Arabic, Target::ActiveUsers) => "المستخدمون النشطون",
            (Locale::Arabic, Target::TotalGroups) => "المجموعات",
            (Locale::Arabic, Target::TotalPoints) => "إجمالي النقاط",
            (Locale::Arabic, Target::CompletedDays) => "الأيام المكتملة",
            (Locale::Arabic, Target::AvgPoints) => "متوسط النقاط",
            (Locale::English, Target::TotalUsers) => "Total users",
            (Locale::English, Target::ActiveUsers) => "Active users",
            (Locale::English, Target::TotalGroups) => "Groups",
            (Locale::English, Target::TotalPoints) => "Total points",
            (Locale::English, Target::CompletedDays) => "Completed days",
            (Locale::English, Target::AvgPoints) => "Avg points",
        }
    }

    /// Counter panel titles: users, schedules, points
    pub fn counter_panels(&self) -> [&'static str; 3] {
        match self {
            Locale::Arabic => ["المستخدمون", "الجداول", "النقاط والإنجازات"],
            Locale::English => ["Users", "Schedules", "Points"],
        }
    }

    pub fn top_users_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "أفضل المستخدمين",
            Locale::English => "Top Users",
        }
    }

    pub fn no_users_yet(&self) -> &'static str {
        match self {
            Locale::Arabic => "لا يوجد مستخدمون بعد",
            Locale::English => "No users yet",
        }
    }

    pub fn no_activity_yet(&self) -> &'static str {
        match self {
            Locale::Arabic => "لا يوجد نشاط مسجل بعد",
            Locale::English => "No activity recorded yet",
        }
    }

    pub fn waiting_for_stats(&self) -> &'static str {
        match self {
            Locale::Arabic => "بانتظار الإحصائيات",
            Locale::English => "Waiting for statistics",
        }
    }

    pub fn loading(&self) -> &'static str {
        match self {
            Locale::Arabic => "جاري التحميل...",
            Locale::English => "Loading...",
        }
    }

    pub fn refreshing(&self) -> &'static str {
        match self {
            Locale::Arabic => "جاري تحديث البيانات...",
            Locale::English => "Refreshing data...",
        }
    }

    pub fn sending_broadcast(&self) -> &'static str {
        match self {
            Locale::Arabic => "جاري إرسال الرسالة...",
            Locale::English => "Sending broadcast...",
        }
    }

    pub fn last_updated(&self, time: &str) -> String {
        match self {
            Locale::Arabic => format!("آخر تحديث {}", time),
            Locale::English => format!("Updated {}", time),
        }
    }

    pub fn waiting_first_update(&self) -> &'static str {
        match self {
            Locale::Arabic => "بانتظار أول تحديث",
            Locale::English => "Waiting for first update",
        }
    }

    pub fn broadcast_input_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "رسالة إلى جميع المستخدمين",
            Locale::English => "Message to all users",
        }
    }

    pub fn broadcast_compose_hint(&self) -> &'static str {
        match self {
            Locale::Arabic => "اضغط [b] أو Enter لكتابة رسالة",
            Locale::English => "Press [b] or Enter to write a message",
        }
    }

    pub fn broadcast_result_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "النتيجة",
            Locale::English => "Result",
        }
    }

    pub fn nothing_sent_yet(&self) -> &'static str {
        match self {
            Locale::Arabic => "لم يتم إرسال أي رسالة بعد",
            Locale::English => "Nothing sent yet",
        }
    }

    // ===== Dates =====

    pub fn weekday_short(&self, weekday: Weekday) -> &'static str {
        let idx = weekday.num_days_from_sunday() as usize;
        match self {
            Locale::Arabic => [
                "الأحد", "الاثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت",
            ][idx],
            Locale::English => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"][idx],
        }
    }

    /// Short month name for a 1-based month number
    pub fn month_short(&self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Arabic => [
                "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر",
                "أكتوبر", "نوفمبر", "ديسمبر",
            ][idx],
            Locale::English => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ][idx],
        }
    }

    /// Short "weekday, month day" label used on the activity chart axis
    pub fn format_short_date(&self, date: NaiveDate) -> String {
        let weekday = self.weekday_short(date.weekday());
        let month = self.month_short(date.month());
        match self {
            Locale::Arabic => format!("{}، {} {}", weekday, date.day(), month),
            Locale::English => format!("{}, {} {}", weekday, month, date.day()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("ar".parse::<Locale>().expect("ar"), Locale::Arabic);
        assert_eq!("EN".parse::<Locale>().expect("en"), Locale::English);
        assert_eq!(" ar-SA ".parse::<Locale>().expect("ar-SA"), Locale::Arabic);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_serde_codes() {
        assert_eq!(serde_json::to_string(&Locale::English).expect("ser"), "\"en\"");
        let parsed: Locale = serde_json::from_str("\"ar\"").expect("de");
        assert_eq!(parsed, Locale::Arabic);
    }

    #[test]
    fn test_format_short_date() {
        // 2025-05-01 was a Thursday
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).expect("date");
        assert_eq!(Locale::English.format_short_date(date), "Thu, May 1");
        assert_eq!(Locale::Arabic.format_short_date(date), "الخميس، 1 مايو");
    }

    #[test]
    fn test_every_counter_has_a_label_in_each_locale() {
        for locale in [Locale::Arabic, Locale::English] {
            for target in Target::ALL {
                assert!(!locale.target_label(target).is_empty());
            }
        }
        // Schedule counters reuse the chart's category names
        assert_eq!(Locale::Arabic.target_label(Target::NoScheduleUsers), "بدون جدول");
        assert_eq!(Locale::English.target_label(Target::TotalUsers), "Total users");
    }

    #[test]
    fn test_status_texts_follow_locale() {
        assert_eq!(Locale::English.loading(), "Loading...");
        assert_eq!(Locale::Arabic.loading(), "جاري التحميل...");
        assert_eq!(Locale::Arabic.last_updated("10:15:00"), "آخر تحديث 10:15:00");
        assert_ne!(Locale::Arabic.refreshing(), Locale::English.refreshing());
    }

    #[test]
    fn test_broadcast_messages_include_counts() {
        assert!(Locale::English.broadcast_sent(10).contains("10"));
        assert!(Locale::Arabic.broadcast_partial_failure(2).contains('2'));
    }
}
