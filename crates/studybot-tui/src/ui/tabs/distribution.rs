use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use studybot_core::charts::{Canvas, ChartSpec, ColorSet};
use studybot_core::utils::format_number;
use studybot_core::Locale;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let locale = app.session.locale();
    render_schedules(
        frame,
        app.session.charts.spec(Canvas::Schedules),
        locale,
        chunks[0],
    );
    render_tasks(
        frame,
        app.session.charts.spec(Canvas::TasksCompletion),
        locale,
        chunks[1],
    );
}

fn chart_block(spec: Option<&ChartSpec>, fallback_title: &str) -> Block<'static> {
    let title = spec
        .and_then(|s| s.options.plugins.title.as_ref())
        .map(|t| t.text.clone())
        .unwrap_or_else(|| fallback_title.to_string());
    Block::default()
        .title(Span::styled(format!(" {} ", title), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
}

fn empty_chart(frame: &mut Frame, block: Block, locale: Locale, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" {}", locale.waiting_for_stats()),
        styles::muted_style(),
    )))
    .block(block);
    frame.render_widget(paragraph, area);
}

fn point_color(colors: Option<&ColorSet>, index: usize) -> Style {
    Style::default().fg(styles::css_color(colors.and_then(|c| c.at(index))))
}

/// Schedule shares drawn as one proportional bar per slice
fn render_schedules(frame: &mut Frame, spec: Option<&ChartSpec>, locale: Locale, area: Rect) {
    let block = chart_block(spec, locale.schedules_title());
    let Some((spec, dataset)) = spec.and_then(|s| s.data.datasets.first().map(|d| (s, d))) else {
        empty_chart(frame, block, locale, area);
        return;
    };

    let total: f64 = dataset.data.iter().sum();
    let label_width = spec.data.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    // Borders, label, spacing and the trailing "count (pct%)" column
    let bar_width = (area.width as usize).saturating_sub(label_width + 20).max(1);

    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in spec.data.labels.iter().zip(&dataset.data).enumerate() {
        let (filled, pct) = slice(*value, total, bar_width);
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<width$} ", label, width = label_width), styles::list_item_style()),
            Span::styled("█".repeat(filled), point_color(dataset.background_color.as_ref(), i)),
            Span::styled("░".repeat(bar_width - filled), styles::muted_style()),
            Span::styled(format!(" {} ({}%)", format_number(*value), pct), styles::muted_style()),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_tasks(frame: &mut Frame, spec: Option<&ChartSpec>, locale: Locale, area: Rect) {
    let block = chart_block(spec, locale.tasks_title());
    let Some((spec, dataset)) = spec.and_then(|s| s.data.datasets.first().map(|d| (s, d))) else {
        empty_chart(frame, block, locale, area);
        return;
    };

    let max = spec
        .options
        .scales
        .as_ref()
        .and_then(|s| s.y.as_ref())
        .and_then(|y| y.max)
        .unwrap_or(100.0);

    let bars: Vec<Bar> = spec
        .data
        .labels
        .iter()
        .zip(&dataset.data)
        .enumerate()
        .map(|(i, (label, value))| {
            let style = point_color(dataset.background_color.as_ref(), i);
            Bar::default()
                .value(value.round() as u64)
                .label(Line::from(label.clone()))
                .text_value(format!("{}%", format_number(*value)))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect();

    let count = bars.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / count).saturating_sub(2).max(3);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .max(max.round() as u64);

    frame.render_widget(chart, area);
}

/// Filled cell count and rounded percentage of one slice
fn slice(value: f64, total: f64, width: usize) -> (usize, u64) {
    if total <= 0.0 {
        return (0, 0);
    }
    let share = (value / total).clamp(0.0, 1.0);
    ((share * width as f64).round() as usize, (share * 100.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_proportions() {
        assert_eq!(slice(50.0, 100.0, 20), (10, 50));
        assert_eq!(slice(1.0, 3.0, 30), (10, 33));
        assert_eq!(slice(0.0, 10.0, 20), (0, 0));
    }

    #[test]
    fn test_slice_empty_total() {
        // No users with schedules yet
        assert_eq!(slice(0.0, 0.0, 20), (0, 0));
    }
}
