use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollbarVisibility};

use crate::core::state::{App, Panel, PanelState};
use crate::inference::{ContextSegment, Source};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::PayloadView;

const SPINNER_FRAMES: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

/// Height reserved for the display surface on the explorer panel.
const DISPLAY_HEIGHT: u16 = 20;

struct RenderedSegment<'a> {
    paragraph: Paragraph<'a>,
    height: u16,
}

impl<'a> RenderedSegment<'a> {
    fn new(segment: &'a ContextSegment, window_area: Rect) -> Self {
        let role = format_role(&segment.source);
        let style = get_role_style(&segment.source);
        let border_style = style.add_modifier(Modifier::DIM);

        let content = segment.content.trim();
        let paragraph = Paragraph::new(content)
            .block(
                Block::bordered()
                    .title(role)
                    .border_style(border_style)
                    .title_style(border_style),
            )
            .style(style)
            .wrap(Wrap { trim: true });

        let inner_width = window_area.width.saturating_sub(2);
        let height = paragraph.line_count(inner_width) as u16;

        RenderedSegment { paragraph, height }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    draw_title_bar(frame, title_area, app, spinner_frame);

    match app.active_panel {
        Panel::Chat => {
            draw_message_area(frame, main_area, &app.chat, &mut tui.chat_scroll);
        }
        Panel::Explorer => {
            let [message_area, display_area] =
                Layout::vertical([Min(3), Length(DISPLAY_HEIGHT)]).areas(main_area);
            draw_message_area(frame, message_area, &app.explorer, &mut tui.explorer_scroll);
            PayloadView::new(&app.display).render(frame, display_area);
        }
    }

    draw_input(frame, input_area, app, tui);
}

fn draw_title_bar(frame: &mut Frame, area: Rect, app: &App, spinner_frame: usize) {
    let mut spans = vec![Span::styled(
        " ✦ Astro ",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    for panel in [Panel::Chat, Panel::Explorer] {
        let style = if panel == app.active_panel {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", panel.title()), style));
        spans.push(Span::raw("│"));
    }

    let busy = app.chat.is_loading || app.explorer.is_loading;
    if busy {
        spans.push(Span::styled(
            format!(" {} ", SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()]),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        format!(" {}", app.status_message),
        Style::default().fg(Color::Gray),
    ));

    frame.render_widget(Line::from(spans), area);
}

fn draw_message_area(
    frame: &mut Frame,
    area: Rect,
    panel: &PanelState,
    scroll_state: &mut tui_scrollview::ScrollViewState,
) {
    let content_width = area.width.saturating_sub(1);

    // Build segments and cache heights
    let segments: Vec<RenderedSegment> = panel
        .context
        .items
        .iter()
        .map(|seg| RenderedSegment::new(seg, area))
        .collect();

    let total_height: u16 = segments.iter().map(|s| s.height).sum();

    let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    let mut y_offset: u16 = 0;
    for segment in &segments {
        let segment_rect = Rect::new(0, y_offset, content_width, segment.height);
        scroll_view.render_widget(segment.paragraph.clone(), segment_rect);
        y_offset += segment.height;
    }

    // While streaming, stick to the newest content.
    if panel.is_loading {
        scroll_state.scroll_to_bottom();
    }

    frame.render_stateful_widget(scroll_view, area, scroll_state);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    let (title, style) = if app.active().is_loading {
        (
            " Astro is busy... ",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            " Ask about space (Enter to send · Tab to switch · Esc to quit) ",
            Style::default().fg(Color::White),
        )
    };

    let input = Paragraph::new(tui.input_buffer.as_str())
        .style(style)
        .block(Block::bordered().title(title));
    frame.render_widget(input, area);
}

fn format_role(source: &Source) -> &'static str {
    match source {
        Source::User => "you",
        Source::Model => "astro",
        Source::Directive => "system",
    }
}

fn get_role_style(source: &Source) -> Style {
    match source {
        Source::Directive => Style::default().fg(Color::Yellow),
        Source::User => Style::default().fg(Color::Cyan),
        Source::Model => Style::default().fg(Color::Green),
    }
}
