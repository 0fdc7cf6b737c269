use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use studybot_core::dashboard::{DashboardView, Target};
use studybot_core::utils::truncate_string;
use studybot_core::Locale;

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // Vertical layout:
    // 1. Users | Schedules | Points (three counter panels)
    // 2. Top users list (full width)
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    let counter_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(main_chunks[0]);

    let view = &app.session.view;
    let locale = app.session.locale();
    let [users, schedules, points] = locale.counter_panels();
    render_counters(
        frame,
        view,
        locale,
        users,
        &[Target::TotalUsers, Target::ActiveUsers, Target::TotalGroups],
        counter_chunks[0],
    );
    render_counters(
        frame,
        view,
        locale,
        schedules,
        &[
            Target::MorningUsers,
            Target::EveningUsers,
            Target::CustomUsers,
            Target::NoScheduleUsers,
        ],
        counter_chunks[1],
    );
    render_counters(
        frame,
        view,
        locale,
        points,
        &[Target::TotalPoints, Target::CompletedDays, Target::AvgPoints],
        counter_chunks[2],
    );

    render_top_users(frame, view, locale, main_chunks[1]);
}

fn render_counters(
    frame: &mut Frame,
    view: &DashboardView,
    locale: Locale,
    title: &str,
    targets: &[Target],
    area: Rect,
) {
    // Width in chars so Arabic labels line up too
    let label_width = targets
        .iter()
        .map(|t| locale.target_label(*t).chars().count())
        .max()
        .unwrap_or(0);
    let lines: Vec<Line> = targets
        .iter()
        .map(|target| {
            let label = locale.target_label(*target);
            Line::from(vec![
                Span::styled(format!(" {:<width$}  ", label, width = label_width), styles::muted_style()),
                Span::styled(view.text_or_placeholder(*target).to_string(), styles::counter_style()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_top_users(frame: &mut Frame, view: &DashboardView, locale: Locale, area: Rect) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", locale.top_users_title()), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    if view.top_users.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            format!(" {}", locale.no_users_yet()),
            styles::muted_style(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let name_width = (area.width as usize).saturating_sub(24).max(10);
    let items: Vec<ListItem> = view
        .top_users
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let rank_style = if i == 0 {
                styles::highlight_style()
            } else {
                styles::muted_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:>2}. ", i + 1), rank_style),
                Span::styled(
                    format!("{:<width$}", truncate_string(&row.name, name_width), width = name_width),
                    styles::list_item_style(),
                ),
                Span::styled(row.points.clone(), styles::success_style()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
