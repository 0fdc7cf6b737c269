/// Format a number the way a dashboard counter shows it.
/// Integral values drop the fractional part (`25.0` -> `25`), others keep
/// their shortest round-trip form (`25.5` -> `25.5`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format a point count with its unit, e.g. `75 points`
pub fn format_points(points: i64, unit: &str) -> String {
    format!("{} {}", points, unit)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
