/// Main dashboard screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::{AddForm, FormVisibility};
use crate::core::EndpointInfo;
use crate::utils::{format_age, truncate_string};

pub struct Dashboard {
    pub title: String,
    server_url: String,
    endpoints: Vec<EndpointInfo>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            title: "Sentinel Dashboard".to_string(),
            server_url: String::new(),
            endpoints: Vec::new(),
        }
    }

    pub fn update_server(&mut self, server_url: String) {
        self.server_url = server_url;
    }

    pub fn update_endpoints(&mut self, endpoints: Vec<EndpointInfo>) {
        self.endpoints = endpoints;
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        selected_index: usize,
        status_message: Option<&str>,
        form: FormVisibility,
        add_form: &AddForm,
        active_field: usize,
        show_help: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Endpoint table
                Constraint::Length(4), // Footer (hints + status)
            ])
            .split(frame.size());

        self.render_title(frame, chunks[0]);
        self.render_endpoints_table(frame, chunks[1], selected_index);
        self.render_footer(frame, chunks[2], status_message);

        if form.is_shown() {
            self.render_add_form(frame, add_form, active_field);
        }

        if show_help {
            self.render_help(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let up = self.endpoints.iter().filter(|e| e.is_healthy).count();
        let down = self.endpoints.len() - up;

        let title_line = Line::from(vec![
            Span::styled(
                &self.title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(&self.server_url, Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(
                format!("{} up", up),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("{} down", down),
                Style::default()
                    .fg(if down > 0 { Color::Red } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("{} total", self.endpoints.len()),
                Style::default().fg(Color::Gray),
            ),
        ]);

        let paragraph = Paragraph::new(title_line)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(paragraph, area);
    }

    fn render_endpoints_table(&self, frame: &mut Frame, area: Rect, selected_index: usize) {
        let header = Row::new(vec![
            "ID", "Name", "URL", "Method", "Expect", "Last check", "Status", "Health",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .endpoints
            .iter()
            .enumerate()
            .map(|(i, endpoint)| {
                let last_check = endpoint
                    .last_check
                    .as_deref()
                    .map(format_age)
                    .unwrap_or_else(|| "-".to_string());

                let (status_text, status_color) = match endpoint.last_status {
                    Some(status) if status == endpoint.expected_status => {
                        (status.to_string(), Color::Green)
                    }
                    Some(status) => (status.to_string(), Color::Red),
                    None => ("-".to_string(), Color::DarkGray),
                };

                let (health_text, health_color) = if endpoint.last_check.is_none() {
                    ("-", Color::DarkGray)
                } else if endpoint.is_healthy {
                    ("✓ up", Color::Green)
                } else {
                    ("✗ down", Color::Red)
                };

                let row = Row::new(vec![
                    Cell::from(endpoint.id.clone()),
                    Cell::from(truncate_string(&endpoint.name, 24)),
                    Cell::from(truncate_string(&endpoint.url, 40)),
                    Cell::from(endpoint.method.clone()),
                    Cell::from(endpoint.expected_status.to_string()),
                    Cell::from(last_check),
                    Cell::from(Span::styled(status_text, Style::default().fg(status_color))),
                    Cell::from(Span::styled(health_text, Style::default().fg(health_color))),
                ]);

                if i == selected_index {
                    row.style(Style::default().bg(Color::DarkGray))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Length(26),
                Constraint::Min(24),
                Constraint::Length(7),
                Constraint::Length(7),
                Constraint::Length(18),
                Constraint::Length(7),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Endpoints ({}) ", self.endpoints.len())),
        );

        frame.render_widget(table, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, status_message: Option<&str>) {
        let hints = Line::from(Span::styled(
            "a: add  c: check  d: delete  h: history  r: refresh  ↑↓: select  ?: help  q: quit",
            Style::default().fg(Color::Gray),
        ));

        let status = match status_message {
            Some(message) => Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(""),
        };

        let paragraph = Paragraph::new(vec![hints, status])
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(paragraph, area);
    }

    fn render_add_form(&self, frame: &mut Frame, add_form: &AddForm, active_field: usize) {
        let area = centered_rect(60, 40, frame.size());
        frame.render_widget(Clear, area);

        let fields = [
            ("Name", add_form.name.as_str()),
            ("URL", add_form.url.as_str()),
            ("Method", add_form.method.as_str()),
            ("Expected status", add_form.expected_status.as_str()),
        ];

        let mut lines = Vec::new();
        for (i, (label, value)) in fields.iter().enumerate() {
            let style = if i == active_field {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == active_field { "> " } else { "  " };
            let cursor = if i == active_field { "_" } else { "" };

            lines.push(Line::from(Span::styled(
                format!("{}{:<16} {}{}", marker, format!("{}:", label), value, cursor),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab: next field | Enter: submit | Esc: close",
            Style::default().fg(Color::Gray),
        )));

        let dialog = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add Endpoint ")
                .style(Style::default()),
        );

        frame.render_widget(dialog, area);
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = centered_rect(50, 50, frame.size());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(Span::styled(
                "Keys",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("  a        Toggle the add-endpoint form"),
            Line::from("  c        Check the selected endpoint"),
            Line::from("  d        Delete the selected endpoint"),
            Line::from("  h        Show the selected endpoint's history URL"),
            Line::from("  r        Refresh the endpoint table"),
            Line::from("  ↑/k ↓/j  Move the selection"),
            Line::from("  ?        Toggle this help"),
            Line::from("  q / Esc  Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "The table re-fetches from the server after every action.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let dialog = Paragraph::new(lines).block(
            Block::default().borders(Borders::ALL).title(" Help "),
        );

        frame.render_widget(dialog, area);
    }
}

/// Centered sub-rectangle, sized as percentages of the containing area
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}
