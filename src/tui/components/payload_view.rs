//! # Payload View
//!
//! The display surface: accepts every render payload variant plus the
//! default state and paints it. Pure prop interpolation; all decisions
//! about *what* to show were made upstream by the parser and selector.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::payload::{
    FactPayload, PlanetCardPayload, RenderPayload, SpaceComparisonPayload, SpaceMissionPayload,
};
use crate::tui::component::Component;
use crate::tui::components::sky_canvas;

/// Parses a `#RRGGBB` hex color, falling back to white for anything else.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Color::White;
    }
    match (
        u8::from_str_radix(&digits[0..2], 16),
        u8::from_str_radix(&digits[2..4], 16),
        u8::from_str_radix(&digits[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

pub struct PayloadView<'a> {
    payload: &'a RenderPayload,
}

impl<'a> PayloadView<'a> {
    pub fn new(payload: &'a RenderPayload) -> Self {
        Self { payload }
    }
}

impl Component for PayloadView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.payload {
            RenderPayload::Fact(fact) => draw_fact(frame, area, fact),
            RenderPayload::Planet(card) => draw_planet(frame, area, card),
            RenderPayload::Mission(mission) => draw_mission(frame, area, mission),
            RenderPayload::Comparison(cmp) => draw_comparison(frame, area, cmp),
            RenderPayload::SolarSystem(diagram) => {
                let block = titled_block(&diagram.title, Color::Yellow);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let [desc_area, canvas_area] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
                frame.render_widget(
                    Paragraph::new(diagram.description.as_str())
                        .style(Style::default().fg(Color::Gray)),
                    desc_area,
                );
                sky_canvas::draw_solar_system(frame, canvas_area, diagram);
            }
            RenderPayload::Constellation(map) => {
                let block = titled_block(&map.constellation, Color::Cyan);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let [desc_area, canvas_area] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
                frame.render_widget(
                    Paragraph::new(map.description.as_str())
                        .style(Style::default().fg(Color::Gray)),
                    desc_area,
                );
                sky_canvas::draw_constellation(frame, canvas_area, map);
            }
        }
    }
}

fn titled_block(title: &str, accent: Color) -> Block<'static> {
    Block::bordered()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(accent).add_modifier(Modifier::DIM))
}

fn draw_fact(frame: &mut Frame, area: Rect, fact: &FactPayload) {
    let block = titled_block("Did you know?", Color::Yellow);
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("✦ ", Style::default().fg(Color::Yellow)),
        Span::raw(fact.fact.as_str()),
    ]))
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn fact_pair(label: &str, value: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(value.to_string()),
        Span::raw("   "),
    ]
}

fn draw_planet(frame: &mut Frame, area: Rect, card: &PlanetCardPayload) {
    let color = hex_color(&card.color);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("● {}", card.name),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(card.description.clone()),
        Line::raw(""),
    ];

    let mut row = fact_pair("Diameter", &card.diameter);
    row.extend(fact_pair("Distance from Sun", &card.distance_from_sun));
    lines.push(Line::from(row));

    let mut row = fact_pair("Day Length", &card.day_length);
    row.extend(fact_pair("Year Length", &card.year_length));
    lines.push(Line::from(row));

    let mut row = fact_pair("Temperature", &card.temperature);
    row.extend(fact_pair("Moons", &card.moons.to_string()));
    lines.push(Line::from(row));

    let paragraph = Paragraph::new(lines)
        .block(titled_block(&card.name, color))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_mission(frame: &mut Frame, area: Rect, mission: &SpaceMissionPayload) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("🚀 {}", mission.name),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(mission.description.clone()),
        Line::raw(""),
        Line::from({
            let mut row = fact_pair("Launch Date", &mission.launch_date);
            row.extend(fact_pair("Destination", &mission.destination));
            row
        }),
        Line::raw(""),
        Line::from(Span::styled(
            "Key Achievements",
            Style::default().fg(Color::Magenta),
        )),
    ];
    for achievement in &mission.achievements {
        lines.push(Line::raw(format!("  • {achievement}")));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block(&mission.name, Color::Magenta))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Formats one comparison row: name, scaled bar, value with unit.
fn comparison_rows(payload: &SpaceComparisonPayload, bar_width: u16) -> Vec<Line<'static>> {
    let max = payload
        .items
        .iter()
        .map(|item| item.size)
        .fold(f64::MIN, f64::max);
    let mut lines = Vec::new();
    for item in &payload.items {
        let ratio = if max > 0.0 {
            (item.size / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = ((bar_width as f64) * ratio).round().max(1.0) as usize;
        lines.push(Line::from(vec![
            Span::raw(format!("{:<10} ", item.name)),
            Span::styled("█".repeat(filled), Style::default().fg(hex_color(&item.color))),
            Span::raw(format!(
                " {} {}",
                item.size,
                payload.comparison_type.unit()
            )),
        ]));
        lines.push(Line::from(Span::styled(
            format!("           {}", item.description),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn draw_comparison(frame: &mut Frame, area: Rect, payload: &SpaceComparisonPayload) {
    let bar_width = area.width.saturating_sub(32).max(8);
    let mut lines = vec![Line::raw(payload.description.clone()), Line::raw("")];
    lines.extend(comparison_rows(payload, bar_width));

    let paragraph = Paragraph::new(lines)
        .block(titled_block(&payload.title, Color::Cyan))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
