use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, MAX_MESSAGE_LENGTH};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Message input
            Constraint::Length(6), // Result panel
        ])
        .split(area);

    render_input(frame, app, chunks[0]);
    render_result(frame, app, chunks[1]);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let composing = matches!(app.state, AppState::Composing);
    let locale = app.session.locale();
    let input = &app.session.view.broadcast_input;

    let count = format!(" {}/{} ", input.chars().count(), MAX_MESSAGE_LENGTH);
    let block = Block::default()
        .title(Span::styled(format!(" {} ", locale.broadcast_input_title()), styles::title_style()))
        .title_bottom(Line::from(Span::styled(count, styles::muted_style())).right_aligned())
        .borders(Borders::ALL)
        .border_style(styles::border_style(composing));

    let lines = if input.is_empty() && !composing {
        vec![Line::from(Span::styled(
            format!(" {}", locale.broadcast_compose_hint()),
            styles::muted_style(),
        ))]
    } else {
        let cursor = if composing { "▌" } else { "" };
        vec![Line::from(vec![
            Span::styled(input.clone(), styles::list_item_style()),
            Span::styled(cursor, styles::highlight_style()),
        ])]
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_result(frame: &mut Frame, app: &App, area: Rect) {
    let locale = app.session.locale();
    let block = Block::default()
        .title(Span::styled(format!(" {} ", locale.broadcast_result_title()), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let lines: Vec<Line> = match app.session.view.broadcast_result {
        Some(ref alert) => {
            let style = styles::alert_style(alert.kind);
            alert
                .lines
                .iter()
                .map(|l| Line::from(Span::styled(format!(" {}", l), style)))
                .collect()
        }
        None => vec![Line::from(Span::styled(
            format!(" {}", locale.nothing_sent_yet()),
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
