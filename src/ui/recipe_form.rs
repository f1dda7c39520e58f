//! Create / edit popup

use crate::app::App;
use crate::models::{FormField, RecipeForm};
use crate::ui::colors::RosePine;
use crate::ui::components::popup_area;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LABEL_WIDTH: usize = 18;

pub fn render(frame: &mut Frame, app: &App) {
    let Some(form) = app.recipe_form.as_ref() else {
        return;
    };
    let area = frame.area();
    let popup = popup_area(area.width.saturating_sub(8).min(84), area.height.saturating_sub(4), area);
    Clear.render(popup, frame.buffer_mut());

    let title = if form.is_editing() {
        " ✏️ Edit Recipe "
    } else {
        " ➕ Add Recipe "
    };
    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));
    let inner = block.inner(popup);
    block.render(popup, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1), // Error / saving
        Constraint::Length(1), // Actions
    ])
    .split(inner);

    let (lines, focused_line) = form_lines(form);
    let visible = chunks[0].height as usize;
    let scroll = focused_line.saturating_sub(visible.saturating_sub(2));
    Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .render(chunks[0], frame.buffer_mut());

    let status = if app.submitting {
        Span::styled("Saving...", Style::default().fg(RosePine::GOLD).italic())
    } else if let Some(error) = &form.error {
        Span::styled(format!("✗ {}", error), Style::default().fg(RosePine::LOVE))
    } else {
        Span::raw("")
    };
    Paragraph::new(Line::from(status)).render(chunks[1], frame.buffer_mut());

    let submit = if form.is_editing() {
        "Update Recipe"
    } else {
        "Create Recipe"
    };
    Paragraph::new(format!("[^S] {} │ [Esc] Cancel", submit))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .render(chunks[2], frame.buffer_mut());
}

fn field_span(form: &RecipeForm, field: FormField, width: usize) -> Span<'static> {
    let focused = form.focused() == field;
    let mut value = form.value(field);

    if field == FormField::Category {
        let category = form.category;
        value = format!("◀ {} {} ▶", category.icon(), category.display_name());
    } else if focused {
        value.push('▏');
    } else if value.is_empty() {
        value.push('·');
    }

    let padded = fit(&value, width);
    if focused {
        Span::styled(padded, Style::default().fg(RosePine::BASE).bg(RosePine::GOLD))
    } else {
        Span::styled(padded, Style::default().fg(RosePine::TEXT).bg(RosePine::HIGHLIGHT_LOW))
    }
}

/// Pads or cuts `value` to exactly `width` terminal cells, keeping the tail
/// visible so the cursor stays on screen while typing
fn fit(value: &str, width: usize) -> String {
    let mut shown: Vec<char> = Vec::new();
    let mut used = 0;
    for c in value.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        shown.push(c);
    }
    shown.reverse();

    let mut out: String = shown.into_iter().collect();
    out.push_str(&" ".repeat(width.saturating_sub(out.width())));
    out
}

fn section(title: &'static str, hint: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(title, Style::default().fg(RosePine::LOVE).bold()),
        Span::styled(hint, Style::default().fg(RosePine::MUTED)),
    ])
}

/// All form lines plus the index of the line holding the focused field
fn form_lines(form: &RecipeForm) -> (Vec<Line<'static>>, usize) {
    let focused = form.focused();
    let mut lines = Vec::new();
    let mut focused_line = 0;

    for field in [
        FormField::Title,
        FormField::Description,
        FormField::ImageUrl,
        FormField::Category,
        FormField::PrepTime,
        FormField::CookTime,
        FormField::Servings,
    ] {
        if field == focused {
            focused_line = lines.len();
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                Style::default().fg(RosePine::SUBTLE),
            ),
            field_span(form, field, 40),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section("Ingredients", "  [^N] add row │ [^D] remove row"));
    for i in 0..form.ingredients.len() {
        let row_fields = [
            FormField::IngredientName(i),
            FormField::IngredientAmount(i),
            FormField::IngredientUnit(i),
        ];
        if row_fields.contains(&focused) {
            focused_line = lines.len();
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>2}. ", i + 1), Style::default().fg(RosePine::MUTED)),
            field_span(form, row_fields[0], 26),
            Span::raw(" "),
            field_span(form, row_fields[1], 8),
            Span::raw(" "),
            field_span(form, row_fields[2], 10),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section("Instructions", "  [^N] add step │ [^D] remove step"));
    for i in 0..form.instructions.len() {
        let field = FormField::Instruction(i);
        if field == focused {
            focused_line = lines.len();
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>2}. ", i + 1), Style::default().fg(RosePine::MUTED)),
            field_span(form, field, 60),
        ]));
    }

    (lines, focused_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_line_follows_ingredient_rows() {
        let mut form = RecipeForm::new();
        form.add_row();
        let (lines, focused_line) = form_lines(&form);

        // seven scalar fields, a blank line and the section heading come first
        assert_eq!(focused_line, 7 + 2 + 1);
        assert!(lines.len() > focused_line);
    }

    #[test]
    fn fit_pads_and_keeps_the_tail() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 4), "efgh");
        assert_eq!(fit("🍰🍰", 3), "🍰 ");
    }
}
