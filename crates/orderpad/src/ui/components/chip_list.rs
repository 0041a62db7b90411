//! Selected-ingredient chip list component.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::ingredients::IngredientSelector;
use crate::domain::model::EntryKey;

/// Renders the ordered ingredient chips, or a placeholder when the list is
/// empty. The whole widget is rebuilt from the selector every frame.
#[derive(Debug, Default)]
pub struct ChipList;

impl ChipList {
    /// Draw the chip list inside `area`. `cursor` marks the chip whose
    /// removal control currently has focus.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        selector: &IngredientSelector,
        cursor: Option<EntryKey>,
        focused: bool,
        placeholder: &str,
    ) {
        let block = Block::default()
            .title("Selected Ingredients")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        if selector.is_empty() {
            let placeholder = Paragraph::new(placeholder.to_owned())
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
            return;
        }

        let mut spans: Vec<Span<'static>> = Vec::with_capacity(selector.len() * 2);
        for row in selector.rows() {
            let highlighted = cursor == Some(row.key);
            let style = if highlighted {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!(" {} ✕ ", row.ingredient.name),
                style,
            ));
            spans.push(Span::raw(" "));
        }

        let chips = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
        frame.render_widget(chips, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_placeholder_when_empty() {
        let backend = TestBackend::new(40, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let selector = IngredientSelector::new();
        let component = ChipList;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &selector, None, true, "Nothing here yet.");
            })
            .unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Nothing here yet."));
    }

    #[test]
    fn renders_one_chip_per_entry() {
        let backend = TestBackend::new(60, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut selector = IngredientSelector::new();
        selector.add("1", "Lettuce");
        let cursor = Some(selector.add("2", "Cheese"));
        let component = ChipList;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &selector, cursor, true, "empty");
            })
            .unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Lettuce"));
        assert!(rendered.contains("Cheese"));
        assert!(!rendered.contains("empty"));
    }
}
