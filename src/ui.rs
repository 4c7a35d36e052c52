use ratatui::{prelude::*, widgets::*};
use serde_json::Value;

use crate::constants::{HEALTH_ID, MESSAGE_ID};
use crate::messages::RenderState;
use crate::models::{AggregateState, HealthPayload, MessagePayload};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Dot colour: yellow loading, red error, green ready
pub fn status_color(state: &AggregateState) -> Color {
    match state {
        AggregateState::Loading => Color::Yellow,
        AggregateState::Error(_) => Color::Red,
        AggregateState::Ready(_) => Color::Green,
    }
}

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Bordered card with a coloured status dot in the title
pub fn card_block<'a>(title: &'a str, dot: Option<Color>) -> Block<'a> {
    let mut spans = vec![Span::raw(" ")];
    if let Some(color) = dot {
        spans.push(Span::styled("● ", Style::default().fg(color)));
    }
    spans.push(Span::styled(title, Style::default().bold()));
    spans.push(Span::raw(" "));

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Line::from(spans))
}

/// Lines for the Backend Status card
pub fn health_lines(state: &AggregateState, tick: usize) -> Vec<Line<'static>> {
    match state {
        AggregateState::Loading => vec![loading_line("Connecting to backend...", tick)],
        AggregateState::Error(reason) => vec![
            Line::from(Span::styled(
                "Connection Failed",
                Style::default().fg(Color::Red).bold(),
            )),
            Line::from(Span::styled(reason.clone(), Style::default().fg(Color::Red))),
        ],
        AggregateState::Ready(_) => {
            let Some(body) = state.payload(HEALTH_ID) else {
                return Vec::new();
            };
            match HealthPayload::from_value(body) {
                Some(health) => vec![
                    label_value("Status", health.status, Color::Green),
                    label_value("Message", health.message, Color::White),
                ],
                None => json_lines(body),
            }
        }
    }
}

/// Lines for the Integration Message card
pub fn message_lines(state: &AggregateState, tick: usize) -> Vec<Line<'static>> {
    match state {
        AggregateState::Loading => vec![loading_line("Fetching message...", tick)],
        AggregateState::Error(_) => vec![Line::from(Span::styled(
            "Could not fetch message.",
            Style::default().fg(Color::DarkGray),
        ))],
        AggregateState::Ready(_) => {
            let Some(body) = state.payload(MESSAGE_ID) else {
                return Vec::new();
            };
            match MessagePayload::from_value(body) {
                Some(message) => vec![Line::from(Span::styled(
                    format!("\"{}\"", message.message),
                    Style::default().fg(Color::Cyan).italic(),
                ))],
                None => json_lines(body),
            }
        }
    }
}

/// Lines for the Deployment Info card
pub fn info_lines(state: &RenderState) -> Vec<Line<'static>> {
    let deadline = state
        .activation_timeout_secs
        .map(|s| format!("{}s", s))
        .unwrap_or_else(|| String::from("none"));
    let last = match state.settled_at {
        Some(at) => format!(
            "{} ({} ms)",
            at.with_timezone(&chrono::Local).format("%H:%M:%S"),
            state.time_ms
        ),
        None => String::from("-"),
    };

    vec![
        label_value("Backend URL", state.api_url.clone(), Color::Cyan),
        label_value("Health", state.health_url.clone(), Color::Gray),
        label_value("Message", state.message_url.clone(), Color::Gray),
        label_value(
            "Timeouts",
            format!("request {}s, activation {}", state.request_timeout_secs, deadline),
            Color::Gray,
        ),
        label_value("Activation", format!("#{}", state.activation), Color::Gray),
        label_value("Last settled", last, Color::Gray),
    ]
}

/// Pretty JSON with keys and values coloured apart
pub fn json_lines(value: &Value) -> Vec<Line<'static>> {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    pretty
        .lines()
        .map(|line| match line.split_once("\": ") {
            Some((key, rest)) => Line::from(vec![
                Span::styled(format!("{}\"", key), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::styled(rest.to_string(), Style::default().fg(Color::Green)),
            ]),
            None => Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Yellow),
            )),
        })
        .collect()
}

fn loading_line(text: &str, tick: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} ", spinner_frame(tick)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}

fn label_value(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<13}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}
