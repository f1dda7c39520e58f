//! Login screen shown until a session exists

use crate::app::{App, LoginField};
use crate::ui::colors::RosePine;
use crate::ui::components::popup_area;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

pub fn render(frame: &mut Frame, app: &App) {
    let main_area = frame.area();

    let block = Block::bordered()
        .title(" Recipe Box ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH));
    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let panel = popup_area(50, 17, inner_area);
    let chunks = Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Length(2), // Tagline
        Constraint::Length(3), // Username
        Constraint::Length(3), // Password
        Constraint::Length(2), // Error
        Constraint::Length(2), // Hints
    ])
    .split(panel);

    Paragraph::new("🍳 Recipe Collection")
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::ROSE).bold())
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new("Sign in to manage your recipes")
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::SUBTLE).italic())
        .render(chunks[1], frame.buffer_mut());

    let form = &app.login_form;
    render_input(
        frame,
        chunks[2],
        " Username ",
        &form.username,
        form.focus == LoginField::Username,
    );
    let masked = "•".repeat(form.password.chars().count());
    render_input(
        frame,
        chunks[3],
        " Password ",
        &masked,
        form.focus == LoginField::Password,
    );

    if let Some(error) = form.error {
        Paragraph::new(format!("✗ {}", error))
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::LOVE))
            .render(chunks[4], frame.buffer_mut());
    }

    Paragraph::new(Line::from(vec![
        Span::styled("[Tab] ", Style::default().fg(RosePine::GOLD)),
        Span::raw("Switch field  "),
        Span::styled("[⏎] ", Style::default().fg(RosePine::GOLD)),
        Span::raw("Sign in  "),
        Span::styled("[Esc] ", Style::default().fg(RosePine::GOLD)),
        Span::raw("Quit"),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(RosePine::MUTED))
    .render(chunks[5], frame.buffer_mut());
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let (border, cursor) = if focused {
        (RosePine::IRIS, "▏")
    } else {
        (RosePine::HIGHLIGHT_HIGH, "")
    };

    Paragraph::new(format!("{}{}", value, cursor))
        .style(Style::default().fg(RosePine::TEXT))
        .block(
            Block::bordered()
                .title(title.to_string())
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .render(area, frame.buffer_mut());
}
