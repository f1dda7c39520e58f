//! UI Components and Layout Module
//!
//! Reusable pieces shared by every screen: the bottom navigation bar,
//! toast notifications, the delete confirmation dialog and the help overlay.

use crate::app::{App, ConfirmationState, InputMode};
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

/// Renders the bottom navigation bar with breadcrumbs and keyboard shortcuts
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(area);

    let left_content = Paragraph::new(get_breadcrumbs(app))
        .alignment(Alignment::Left)
        .style(Style::default().fg(RosePine::SUBTLE))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    let right_content = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn get_context_shortcuts(app: &App) -> String {
    if app.has_pending_action() {
        return " [y] Delete │ [n] Cancel ".to_string();
    }
    if app.ui.is_form_modal_open() {
        return " [Tab] Next │ [^N] Add row │ [^D] Remove row │ [^S] Save │ [Esc] Cancel "
            .to_string();
    }
    if app.ui.is_detail_modal_open() {
        return match app.input_mode {
            InputMode::Servings => " [⏎] Confirm │ [Esc] Cancel ".to_string(),
            _ => " [+/-] Servings │ [r] Reset │ [e] Edit │ [f] Favorite │ [Esc] Close ".to_string(),
        };
    }

    match app.input_mode {
        InputMode::Search => " [⏎] Done │ [Esc] Clear ".to_string(),
        InputMode::HelpMenu => " [Esc] Close ".to_string(),
        _ if app.repository.recipes().is_empty() => {
            " [n] New │ [r] Refresh │ [←→] Category │ [q] Quit ".to_string()
        }
        _ => " [↑↓] Navigate │ [⏎] View │ [n] New │ [e] Edit │ [d] Delete │ [/] Search │ [?] Help "
            .to_string(),
    }
}

fn get_breadcrumbs(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " 󰋜 Recipes ",
        Style::default().fg(RosePine::BASE).bg(RosePine::IRIS),
    )];

    spans.push(Span::styled(" ❯ ", Style::default().fg(RosePine::MUTED)));
    spans.push(Span::styled(
        format!(" {} ", app.ui.selected_category().label()),
        Style::default().fg(RosePine::SUBTLE),
    ));

    if let Some(recipe) = app.viewing_recipe() {
        spans.push(Span::styled(" ❯ ", Style::default().fg(RosePine::MUTED)));
        spans.push(Span::styled(
            format!(" {} ", recipe.title),
            Style::default().fg(RosePine::BASE).bg(RosePine::GOLD),
        ));
    }

    Line::from(spans)
}

/// Centered rectangle of at most `width` x `height` cells
pub fn popup_area(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Stacks live toasts in the top-right corner, newest at the bottom
pub fn render_notifications(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let width = 48.min(area.width);
    let mut y = area.y + 1;

    for notification in app.notifications.iter() {
        if y + 3 > area.bottom() {
            break;
        }
        let toast_area = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        let color = RosePine::severity(notification.severity);

        Clear.render(toast_area, frame.buffer_mut());
        let toast = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", notification.severity.icon()),
                Style::default().fg(color).bold(),
            ),
            Span::styled(notification.message.clone(), Style::default().fg(RosePine::TEXT)),
        ]))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color).bg(RosePine::SURFACE)),
        );
        toast.render(toast_area, frame.buffer_mut());
        y += 3;
    }
}

/// Asks before a recipe is deleted
pub fn render_confirmation(frame: &mut Frame, app: &App) {
    let ConfirmationState::DeleteRecipe { title, .. } = &app.confirmation_state else {
        return;
    };

    let popup = popup_area(56, 8, frame.area());
    Clear.render(popup, frame.buffer_mut());

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete \"{}\"?", title),
            Style::default().fg(RosePine::TEXT).bold(),
        )),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(RosePine::SUBTLE),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(RosePine::LOVE).bold()),
            Span::raw("Delete   "),
            Span::styled("[n] ", Style::default().fg(RosePine::FOAM).bold()),
            Span::raw("Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(" Delete Recipe ")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Double)
                .style(Style::default().fg(RosePine::LOVE)),
        )
        .style(Style::default().bg(RosePine::SURFACE));
    dialog.render(popup, frame.buffer_mut());
}

fn shortcut(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<7}", key), Style::default().fg(RosePine::GOLD)),
        Span::raw(description),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(RosePine::LOVE).bold()))
}

pub fn render_help(frame: &mut Frame) {
    let popup = popup_area(72, 22, frame.area());
    Clear.render(popup, frame.buffer_mut());

    let block = Block::bordered()
        .title(" 󰘳 Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));
    let inner_area = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner_area);

    let left_column = vec![
        heading("Browsing"),
        Line::from(""),
        shortcut("↑/k", "Move up"),
        shortcut("↓/j", "Move down"),
        shortcut("←→/hl", "Change category"),
        shortcut("⏎", "View recipe"),
        shortcut("/", "Search"),
        shortcut("F", "Favorites only"),
        shortcut("r", "Refresh"),
        Line::from(""),
        heading("Session"),
        Line::from(""),
        shortcut("L", "Log out"),
        shortcut("q", "Quit"),
    ];

    let right_column = vec![
        heading("Recipes"),
        Line::from(""),
        shortcut("n", "New recipe"),
        shortcut("e", "Edit recipe"),
        shortcut("d", "Delete recipe"),
        shortcut("f", "Toggle favorite"),
        shortcut("x", "Dismiss toast"),
        Line::from(""),
        heading("Detail view"),
        Line::from(""),
        shortcut("+/-", "Adjust servings"),
        shortcut("0-9", "Type servings"),
        shortcut("r", "Reset servings"),
    ];

    Paragraph::new(left_column)
        .style(Style::default().fg(RosePine::TEXT))
        .render(columns[0], frame.buffer_mut());
    Paragraph::new(right_column)
        .style(Style::default().fg(RosePine::TEXT))
        .render(columns[1], frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(popup_area(60, 10, area), Rect::new(20, 15, 60, 10));

        let small = Rect::new(5, 5, 30, 8);
        assert_eq!(popup_area(60, 10, small), small);
    }
}
