use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
};

use crate::{app::App, tracker::ChannelActivity, version};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.size());

    render_header(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_channel_table(f, app, body[0]);
    render_activity(f, app, body[1]);
    render_footer(f, app, chunks[2]);

    if app.show_help {
        render_help(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut status = format!(
        "{} channels | {} events | history {}",
        app.tracker.channel_count(),
        app.tracker.total_events(),
        app.tracker.max_history(),
    );
    let dropped = app.tracker.dropped_lines();
    if dropped > 0 {
        status.push_str(&format!(" | {} dropped", dropped));
    }
    if app.paused {
        status.push_str(" | PAUSED");
    }
    if app.debug {
        status.push_str(&format!(" | +{}/tick", app.last_ingest_count));
    }

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Chat Trace v{}", version::get_version()),
            Style::default()
                .fg(app.theme.text_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(status, Style::default().fg(app.theme.text_secondary)),
    ]))
    .style(
        Style::default()
            .fg(app.theme.header_fg)
            .bg(app.theme.header_bg),
    )
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border_normal)),
    );

    f.render_widget(header, area);
}

fn last_seen_string(activity: &ChannelActivity) -> String {
    let elapsed = activity.time_since_last_seen();
    if elapsed.as_secs() < 60 {
        format!("{}s", elapsed.as_secs())
    } else {
        format!("{}m", elapsed.as_secs() / 60)
    }
}

fn render_channel_table(f: &mut Frame, app: &mut App, area: Rect) {
    // Borders plus the header row
    app.visible_height = area.height.saturating_sub(3) as usize;

    let header = Row::new(vec!["Channel", "Events", "Last", "Seen"]).style(
        Style::default()
            .fg(app.theme.table_header)
            .add_modifier(Modifier::BOLD),
    );

    let channels = app.tracker.channels();
    let rows: Vec<Row> = channels
        .iter()
        .enumerate()
        .skip(app.channel_scroll_offset)
        .take(app.visible_height)
        .map(|(i, (name, activity))| {
            let style = if i == app.selected_index {
                Style::default()
                    .bg(app.theme.selected_row_background)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let last_kind_cell = match activity.last_kind() {
                Some(kind) => Cell::from(kind.as_str())
                    .style(Style::default().fg(app.theme.kind_color(kind))),
                None => Cell::from("-"),
            };

            Row::new(vec![
                Cell::from(name.as_str()).style(Style::default().fg(app.theme.text_primary)),
                Cell::from(activity.total_events.to_string()),
                last_kind_cell,
                Cell::from(last_seen_string(activity)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(format!(" Channels ({}) ", channels.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border_focused)),
    );

    f.render_widget(table, area);
}

fn render_activity(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;

    let selected = app.selected_channel().and_then(|channel| {
        app.tracker
            .channel_history(&channel)
            .map(|history| (channel, history))
    });

    let (title, items) = match selected {
        Some((channel, history)) => {
            let items: Vec<ListItem> = history
                .recent(visible)
                .map(|event| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("[{}] ", event.format_time()),
                            Style::default().fg(app.theme.text_secondary),
                        ),
                        Span::styled(
                            format!("{:<8}", event.kind.as_str()),
                            Style::default().fg(app.theme.kind_color(event.kind)),
                        ),
                        Span::styled(
                            format!("{} ", event.actor),
                            Style::default()
                                .fg(app.theme.text_primary)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            event.detail.clone(),
                            Style::default().fg(app.theme.text_primary),
                        ),
                    ]))
                })
                .collect();
            let title = format!(
                " Recent Activity - {} ({}/{}) ",
                channel,
                history.len(),
                history.capacity()
            );
            (title, items)
        }
        None => (
            " Recent Activity ".to_string(),
            vec![ListItem::new(Span::styled(
                "Waiting for events...",
                Style::default().fg(app.theme.text_secondary),
            ))],
        ),
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border_normal)),
    );

    f.render_widget(list, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = Paragraph::new(Line::from(Span::styled(
        " q quit | j/k select | c clear | p pause | +/- history bound | h help",
        Style::default().fg(app.theme.text_secondary),
    )));
    f.render_widget(hints, area);
}

fn render_help(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 40, f.size());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(app.theme.text_accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("  q / Esc      quit"),
        Line::from("  j / k, arrows  select channel"),
        Line::from("  c            clear selected channel history"),
        Line::from("  p / Space    pause ingestion"),
        Line::from("  + / -        double / halve the history bound"),
        Line::from("  Ctrl+L       force redraw"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(app.theme.text_secondary),
        )),
    ];

    let help = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.text_primary))
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_focused)),
        );

    f.render_widget(help, area);
}

// Standard centered-rect helper for modal overlays
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
