//! Recipe detail popup with the serving calculator

use crate::app::{App, InputMode};
use crate::calculator::format_amount;
use crate::ui::colors::RosePine;
use crate::ui::components::popup_area;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

pub fn render(frame: &mut Frame, app: &App) {
    let Some(recipe) = app.viewing_recipe() else {
        return;
    };
    let area = frame.area();
    let popup = popup_area(area.width.saturating_sub(8).min(90), area.height.saturating_sub(4), area);
    Clear.render(popup, frame.buffer_mut());

    let favorite = if app.ui.is_favorite(&recipe.id) { " ❤️" } else { "" };
    let block = Block::bordered()
        .title(format!(" {} {}{} ", recipe.category.icon(), recipe.title, favorite))
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(1), // Meta badges
        Constraint::Length(3), // Description
        Constraint::Length(3), // Servings adjuster
        Constraint::Fill(1),   // Ingredients + instructions
        Constraint::Length(1), // Actions
    ])
    .split(inner);

    render_meta(frame, chunks[0], app);
    Paragraph::new(recipe.description.clone().unwrap_or_default())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(RosePine::SUBTLE))
        .render(chunks[1], frame.buffer_mut());
    render_servings(frame, chunks[2], app);

    let body = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);
    render_ingredients(frame, body[0], app);
    render_instructions(frame, body[1], app);

    Paragraph::new("[e] Edit Recipe │ [f] Favorite │ [d] Delete │ [Esc] Close")
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .render(chunks[4], frame.buffer_mut());
}

fn badge(text: String, color: ratatui::style::Color) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!(" {} ", text), Style::default().fg(RosePine::BASE).bg(color)),
        Span::raw(" "),
    ]
}

fn render_meta(frame: &mut Frame, area: Rect, app: &App) {
    let Some(recipe) = app.viewing_recipe() else {
        return;
    };

    let mut spans = badge(
        recipe.category.display_name().to_string(),
        RosePine::category(recipe.category),
    );
    if let Some(prep) = recipe.prep_time {
        spans.extend(badge(format!("🔪 Prep: {} min", prep), RosePine::HIGHLIGHT_HIGH));
    }
    if let Some(cook) = recipe.cook_time {
        spans.extend(badge(format!("🔥 Cook: {} min", cook), RosePine::HIGHLIGHT_HIGH));
    }
    let total = recipe.total_time();
    if total > 0 {
        spans.extend(badge(format!("⏱️ Total: {} min", total), RosePine::HIGHLIGHT_HIGH));
    }

    Paragraph::new(Line::from(spans)).render(area, frame.buffer_mut());
}

fn render_servings(frame: &mut Frame, area: Rect, app: &App) {
    let Some(calculator) = app.calculator.as_ref() else {
        return;
    };

    let mut spans = vec![
        Span::styled("Servings: ", Style::default().fg(RosePine::TEXT).bold()),
        Span::styled(" − ", Style::default().fg(RosePine::BASE).bg(RosePine::SUBTLE)),
    ];

    if app.input_mode == InputMode::Servings {
        spans.push(Span::styled(
            format!(" {:^4}▏", app.servings_input),
            Style::default().fg(RosePine::GOLD).bold(),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {:^4} ", calculator.current_servings()),
            Style::default().fg(RosePine::TEXT).bold(),
        ));
    }
    spans.push(Span::styled(" + ", Style::default().fg(RosePine::BASE).bg(RosePine::SUBTLE)));

    if calculator.is_adjusted() {
        spans.push(Span::styled(
            format!("   ×{}", format_amount(calculator.multiplier())),
            Style::default().fg(RosePine::GOLD),
        ));
        spans.push(Span::styled(
            format!("   [r] Reset to {}", calculator.initial_servings()),
            Style::default().fg(RosePine::FOAM),
        ));
    }

    Paragraph::new(Line::from(spans))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(area, frame.buffer_mut());
}

fn render_ingredients(frame: &mut Frame, area: Rect, app: &App) {
    let Some(calculator) = app.calculator.as_ref() else {
        return;
    };

    let lines: Vec<Line> = calculator
        .adjusted_ingredients()
        .into_iter()
        .map(|ingredient| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(RosePine::ROSE)),
                Span::styled(
                    format_amount(ingredient.amount),
                    Style::default().fg(RosePine::TEXT).bold(),
                ),
                Span::raw(format!(" {} {}", ingredient.unit, ingredient.name)),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(RosePine::SUBTLE))
        .block(
            Block::bordered()
                .title(" Ingredients ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(area, frame.buffer_mut());
}

fn render_instructions(frame: &mut Frame, area: Rect, app: &App) {
    let Some(recipe) = app.viewing_recipe() else {
        return;
    };

    let mut lines = Vec::new();
    for (index, step) in recipe.instructions.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", index + 1),
                Style::default().fg(RosePine::BASE).bg(RosePine::ROSE).bold(),
            ),
            Span::raw(" "),
            Span::styled(step.clone(), Style::default().fg(RosePine::TEXT)),
        ]));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(" Instructions ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(area, frame.buffer_mut());
}
