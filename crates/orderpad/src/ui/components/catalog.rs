//! Catalog listing component shared by both forms.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

/// One selectable row of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: String,
}

impl CatalogEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Renders an "available items" list with a navigation cursor and an
/// optional chosen row (the picked-but-not-yet-added burger).
#[derive(Debug, Default)]
pub struct CatalogList;

impl CatalogList {
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        title: &str,
        entries: &[CatalogEntry],
        cursor: usize,
        chosen: Option<usize>,
        focused: bool,
    ) {
        let block = Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        if entries.is_empty() {
            let placeholder = Paragraph::new("Nothing available")
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, inner);
            return;
        }

        let items: Vec<ListItem<'static>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let marker = if chosen == Some(index) { "● " } else { "  " };
                let style = if chosen == Some(index) {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::styled(format!("{marker}{}", entry.label), style))
            })
            .collect();

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        state.select(Some(cursor.min(entries.len().saturating_sub(1))));
        frame.render_stateful_widget(list, inner, &mut state);
    }
}
