//! Order line-item list component.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::order::{LineView, OrderEditor};
use crate::domain::model::EntryKey;

/// Inline quantity edit in progress for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityDraft {
    pub key: EntryKey,
    pub input: String,
}

/// Renders the order lines with quantities and subtotals, or a placeholder
/// when the order is empty. Rebuilt from the editor on every frame.
#[derive(Debug, Default)]
pub struct LineItemList;

impl LineItemList {
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        editor: &OrderEditor,
        cursor: Option<EntryKey>,
        draft: Option<&QuantityDraft>,
        focused: bool,
        currency: &str,
        placeholder: &str,
    ) {
        let block = Block::default()
            .title("Order Items")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        if editor.is_empty() {
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

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem<'static>> = editor
            .line_views()
            .iter()
            .map(|view| line_item(view, cursor, draft, currency))
            .collect();
        frame.render_widget(List::new(items), layout[0]);

        let total = Paragraph::new(Line::from(vec![
            Span::styled("Total: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{currency}{:.2}", editor.order_total()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]));
        frame.render_widget(total, layout[1]);
    }
}

fn line_item(
    view: &LineView,
    cursor: Option<EntryKey>,
    draft: Option<&QuantityDraft>,
    currency: &str,
) -> ListItem<'static> {
    let highlighted = cursor == Some(view.key);
    let quantity_text = match draft {
        Some(draft) if draft.key == view.key => format!("[{}_]", draft.input),
        _ => view.quantity.to_string(),
    };

    let mut spans = vec![
        Span::styled(
            format!("{} (ID: {})", view.name, view.burger_id),
            if highlighted {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            },
        ),
        Span::raw("  Qty: "),
        Span::styled(quantity_text, Style::default().fg(Color::Yellow)),
        Span::raw(format!(
            " x {currency}{:.2} = {currency}{:.2}",
            view.unit_price, view.subtotal
        )),
    ];
    if highlighted {
        spans.push(Span::styled("  ✕", Style::default().fg(Color::Red)));
    }
    ListItem::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::domain::model::{BurgerCatalog, BurgerOption};

    fn editor_with_lines() -> OrderEditor {
        let catalog = BurgerCatalog::new(vec![BurgerOption {
            id: "1".into(),
            name: "Classic".into(),
            price: 3.5,
        }]);
        let mut editor = OrderEditor::new(catalog);
        editor.add_item("1", 3).unwrap();
        editor
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let editor = OrderEditor::default();
        let component = LineItemList;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &editor, None, None, true, "$", "No items yet.");
            })
            .unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("No items yet."));
    }

    #[test]
    fn renders_line_with_subtotal_and_total() {
        let backend = TestBackend::new(70, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let editor = editor_with_lines();
        let component = LineItemList;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &editor, None, None, true, "$", "empty");
            })
            .unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("Classic (ID: 1)"));
        assert!(rendered.contains("$10.50"));
        assert!(rendered.contains("Total:"));
    }

    #[test]
    fn renders_draft_input_in_place_of_quantity() {
        let backend = TestBackend::new(70, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let editor = editor_with_lines();
        let key = editor.rows()[0].key;
        let draft = QuantityDraft {
            key,
            input: "12".into(),
        };
        let component = LineItemList;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(
                    frame,
                    area,
                    &editor,
                    Some(key),
                    Some(&draft),
                    true,
                    "$",
                    "empty",
                );
            })
            .unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("[12_]"));
    }
}
