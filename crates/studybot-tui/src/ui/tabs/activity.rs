use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use studybot_core::charts::{Axis as ChartAxis, Canvas, ChartSpec};

use crate::app::App;
use crate::ui::styles;

/// More date labels than this and only first, middle and last are drawn
const MAX_X_LABELS: usize = 7;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let locale = app.session.locale();
    let spec = app.session.charts.spec(Canvas::Activity);

    let title = spec
        .and_then(|s| s.options.plugins.title.as_ref())
        .map(|t| t.text.as_str())
        .unwrap_or_else(|| locale.activity_title());
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let Some(spec) = spec.filter(|s| !s.data.labels.is_empty()) else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", locale.no_activity_yet()),
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let series = series_points(spec);
    let datasets: Vec<Dataset> = spec
        .data
        .datasets
        .iter()
        .zip(&series)
        .map(|(dataset, points)| {
            Dataset::default()
                .name(dataset.label.clone().unwrap_or_default())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(styles::css_color(dataset.border_color.as_deref())))
                .data(points)
        })
        .collect();

    let axis_title = |axis: Option<&ChartAxis>| {
        axis.and_then(|a| a.title.as_ref())
            .filter(|t| t.display)
            .map(|t| t.text.clone())
            .unwrap_or_default()
    };
    let scales = spec.options.scales.as_ref();
    let x_title = axis_title(scales.and_then(|s| s.x.as_ref()));
    let y_title = axis_title(scales.and_then(|s| s.y.as_ref()));

    let x_max = (spec.data.labels.len().saturating_sub(1)).max(1) as f64;
    let y_max = y_upper_bound(&series);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(x_title, styles::muted_style()))
                .style(styles::muted_style())
                .bounds([0.0, x_max])
                .labels(x_labels(&spec.data.labels)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_title, styles::muted_style()))
                .style(styles::muted_style())
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    format!("{}", (y_max / 2.0).round()),
                    format!("{}", y_max),
                ]),
        )
        .legend_position(Some(LegendPosition::TopRight));

    frame.render_widget(chart, area);
}

/// Each dataset as (index, value) points
fn series_points(spec: &ChartSpec) -> Vec<Vec<(f64, f64)>> {
    spec.data
        .datasets
        .iter()
        .map(|d| {
            d.data
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect()
}

/// Largest value plus headroom, never below 1
fn y_upper_bound(series: &[Vec<(f64, f64)>]) -> f64 {
    let max = series
        .iter()
        .flatten()
        .map(|(_, y)| *y)
        .fold(0.0, f64::max);
    (max * 11.0 / 10.0).ceil().max(1.0)
}

fn x_labels(labels: &[String]) -> Vec<String> {
    if labels.len() <= MAX_X_LABELS {
        return labels.to_vec();
    }
    let mid = labels.len() / 2;
    [0, mid, labels.len() - 1]
        .iter()
        .map(|&i| labels[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("d{}", i)).collect()
    }

    #[test]
    fn test_x_labels_thinned() {
        assert_eq!(x_labels(&labels(3)), labels(3));
        assert_eq!(x_labels(&labels(9)), vec!["d1", "d5", "d9"]);
    }

    #[test]
    fn test_y_upper_bound() {
        assert_eq!(y_upper_bound(&[]), 1.0);
        assert_eq!(y_upper_bound(&[vec![(0.0, 10.0), (1.0, 3.0)], vec![(0.0, 4.0)]]), 11.0);
    }
}
