//! Main screen: header, category tabs, search bar and the recipe table

use crate::app::{App, InputMode};
use crate::models::CategoryFilter;
use crate::search::status_line;
use crate::ui::colors::RosePine;
use crate::ui::components::render_bottom_bar;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Cell, Paragraph, Row, Table, TableState, Tabs, Widget},
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

    let status = status_line(
        app.ui.showing_favorites(),
        app.ui.search_query(),
        app.displayed_recipes().len(),
    );

    let chunks = Layout::vertical([
        Constraint::Length(1),                                   // Header
        Constraint::Length(3),                                   // Category tabs
        Constraint::Length(3),                                   // Search bar
        Constraint::Length(if status.is_some() { 1 } else { 0 }), // Filter status
        Constraint::Fill(1),                                     // Recipes
        Constraint::Length(3),                                   // Bottom bar
    ])
    .split(inner_area);

    render_header(frame, chunks[0], app);
    render_category_tabs(frame, chunks[1], app);
    render_search_bar(frame, chunks[2], app);
    if let Some(status) = status {
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::GOLD))
            .render(chunks[3], frame.buffer_mut());
    }
    render_recipes(frame, chunks[4], app);
    render_bottom_bar(frame, chunks[5], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    Paragraph::new(Line::from(vec![
        Span::styled(" 🍳 Recipe Collection ", Style::default().fg(RosePine::ROSE).bold()),
        Span::styled(
            format!("({})", app.store_label),
            Style::default().fg(RosePine::MUTED),
        ),
    ]))
    .render(halves[0], frame.buffer_mut());

    let favorites_marker = if app.ui.showing_favorites() {
        Span::styled("❤️ Favorites ", Style::default().fg(RosePine::LOVE).bold())
    } else {
        Span::styled("🤍 Favorites ", Style::default().fg(RosePine::MUTED))
    };
    Paragraph::new(Line::from(vec![
        favorites_marker,
        Span::styled(" │ ", Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        Span::styled(
            format!("👤 {} ", app.auth.username().unwrap_or("guest")),
            Style::default().fg(RosePine::SUBTLE),
        ),
    ]))
    .alignment(Alignment::Right)
    .render(halves[1], frame.buffer_mut());
}

fn render_category_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let tabs = CategoryFilter::tabs();
    let selected = tabs
        .iter()
        .position(|tab| *tab == app.ui.selected_category())
        .unwrap_or(0);

    let titles: Vec<Line> = tabs.iter().map(|tab| Line::from(tab.label())).collect();
    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(RosePine::SUBTLE))
        .highlight_style(Style::default().fg(RosePine::BASE).bg(RosePine::IRIS).bold())
        .divider(Span::styled("│", Style::default().fg(RosePine::HIGHLIGHT_HIGH)))
        .block(
            Block::bordered()
                .title(" Category ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(area, frame.buffer_mut());
}

fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Search;
    let query = app.ui.search_query();

    let content = if query.is_empty() && !editing {
        Span::styled(
            "Search recipes, descriptions or ingredients...",
            Style::default().fg(RosePine::MUTED).italic(),
        )
    } else {
        let cursor = if editing { "▏" } else { "" };
        Span::styled(format!("{}{}", query, cursor), Style::default().fg(RosePine::TEXT))
    };

    let border = if editing {
        RosePine::IRIS
    } else {
        RosePine::HIGHLIGHT_HIGH
    };
    Paragraph::new(Line::from(vec![Span::raw(" 🔍 "), content]))
        .block(
            Block::bordered()
                .title(" Search [/] ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .render(area, frame.buffer_mut());
}

fn render_recipes(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    if app.repository.loading() {
        render_centered(frame, inner, vec![Line::from(Span::styled(
            "⏳ Loading recipes...",
            Style::default().fg(RosePine::SUBTLE),
        ))]);
        return;
    }

    if let Some(error) = app.repository.error() {
        let heading = if app.repository.fetch_failed() {
            "⚠️ Error loading recipes"
        } else {
            "⚠️ Something went wrong"
        };
        render_centered(frame, inner, vec![
            Line::from(Span::styled(
                heading,
                Style::default().fg(RosePine::LOVE).bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(error.to_string(), Style::default().fg(RosePine::SUBTLE))),
            Line::from(Span::styled("Press [r] to retry", Style::default().fg(RosePine::MUTED))),
        ]);
        return;
    }

    let recipes = app.displayed_recipes();
    if recipes.is_empty() {
        render_centered(frame, inner, vec![
            Line::from("🍽️"),
            Line::from(""),
            Line::from(Span::styled(
                "No recipes found",
                Style::default().fg(RosePine::TEXT).bold(),
            )),
            Line::from(Span::styled(
                "Start by adding your first recipe! Press [n]",
                Style::default().fg(RosePine::SUBTLE),
            )),
        ]);
        return;
    }

    let header = Row::new(["", "Title", "Category", "Time", "Serves", "Ingredients"])
        .style(Style::default().fg(RosePine::SUBTLE).bold())
        .bottom_margin(1);

    let rows: Vec<Row> = recipes
        .iter()
        .map(|recipe| {
            let favorite = if app.ui.is_favorite(&recipe.id) {
                Cell::from("❤️").style(Style::default().fg(RosePine::LOVE))
            } else {
                Cell::from("")
            };
            let total = recipe.total_time();
            let time = if total > 0 {
                format!("⏱️ {} min", total)
            } else {
                "—".to_string()
            };

            Row::new(vec![
                favorite,
                Cell::from(recipe.title.clone()).style(Style::default().fg(RosePine::TEXT)),
                Cell::from(format!(
                    "{} {}",
                    recipe.category.icon(),
                    recipe.category.display_name()
                ))
                .style(Style::default().fg(RosePine::category(recipe.category))),
                Cell::from(time),
                Cell::from(format!("👥 {}", recipe.servings)),
                Cell::from(recipe.ingredients.len().to_string()),
            ])
            .style(Style::default().fg(RosePine::SUBTLE))
        })
        .collect();

    let table = Table::new(rows, [
        Constraint::Length(3),
        Constraint::Fill(3),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
    ])
    .header(header)
    .row_highlight_style(Style::default().bg(RosePine::HIGHLIGHT_LOW).fg(RosePine::GOLD).bold())
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_recipe.min(recipes.len() - 1)));
    frame.render_stateful_widget(table, inner, &mut state);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(vertical[1], frame.buffer_mut());
}
