use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::chat::Role;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let theme = app.theme;

    // Paint the page background first; every panel draws on top of it.
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.page_bg())),
        area,
    );

    let [header_area, thread_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_thread(app, frame, thread_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);

    if app.exchange.last_error().is_some() {
        render_error_notice(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let [title_area, toggle_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(10)]).areas(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " 🚗 MotorMatch IA ",
            Style::default().fg(theme.accent()).bold(),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.muted()),
        ),
    ]));
    frame.render_widget(title, title_area);

    // Shows the mode the toggle switches to, like the web button.
    let toggle = Paragraph::new(Line::from(vec![
        Span::styled("Ctrl+T ", Style::default().fg(theme.muted())),
        Span::raw(theme.toggle_icon()),
    ]));
    frame.render_widget(toggle, toggle_area);
}

fn render_thread(app: &mut App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted()))
        .style(Style::default().bg(theme.thread_bg()))
        .title(" Conversación ");

    // Record the inner size for wrap and scroll calculations.
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let busy = app.exchange.busy();
    let visible_is_empty = app.exchange.conversation().visible().next().is_none();

    let thread_text = if visible_is_empty && !busy {
        Text::from(Span::styled(
            "Cuéntale al asesor qué coche buscas...",
            Style::default().fg(theme.muted()),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in app.exchange.conversation().visible() {
            lines.push(turn_label(msg.role, theme));
            for line in msg.content.lines() {
                lines.push(Line::styled(
                    line.to_string(),
                    Style::default().fg(theme.text()),
                ));
            }
            lines.push(Line::default());
        }

        if busy {
            lines.push(turn_label(Role::Assistant, theme));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Pensando{}", dots),
                Style::default()
                    .fg(theme.muted())
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let thread = Paragraph::new(thread_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(thread, area);
}

fn turn_label(role: Role, theme: crate::theme::Theme) -> Line<'static> {
    let (text, style) = match role {
        Role::User => (
            " Tú ",
            Style::default()
                .bg(theme.user_bubble())
                .fg(theme.user_bubble_text())
                .bold(),
        ),
        _ => (
            " Asesor ",
            Style::default()
                .bg(theme.assistant_bubble())
                .fg(theme.assistant_bubble_text())
                .bold(),
        ),
    };
    Line::from(Span::styled(text, style))
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.exchange.busy() {
            theme.muted()
        } else {
            theme.accent()
        }))
        .style(Style::default().bg(theme.input_bg()));

    // Horizontal scrolling keeps the cursor visible in a one-line field.
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.input.is_empty() {
        Paragraph::new("Escribe tu mensaje...")
            .style(Style::default().fg(theme.muted()).bg(theme.input_bg()))
            .block(block)
    } else {
        let visible_text: String = app
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text)
            .style(Style::default().fg(theme.text()).bg(theme.input_bg()))
            .block(block)
    };

    frame.render_widget(input, area);

    // The input is always focused; keep the cursor on it unless a notice
    // has taken over the screen.
    if app.exchange.last_error().is_none() {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let key_style = Style::default().bg(theme.input_bg()).fg(theme.text());
    let label_style = Style::default().fg(theme.muted());

    let hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" enviar ", label_style),
        Span::styled(" Ctrl+T ", key_style),
        Span::styled(" tema ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" desplazar ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" salir ", label_style),
    ];

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

fn render_error_notice(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let Some(notice) = app.exchange.last_error() else {
        return;
    };

    // Calculate popup size and position (centered)
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = 7.min(area.height.saturating_sub(2));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Red))
        .style(Style::default().bg(theme.page_bg()))
        .title(" Aviso ");

    let text = Text::from(vec![
        Line::styled(notice.to_string(), Style::default().fg(theme.text())),
        Line::default(),
        Line::from(Span::styled(
            "Enter para continuar",
            Style::default().fg(theme.muted()),
        )),
    ]);

    let notice_widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(notice_widget, popup_area);
}
