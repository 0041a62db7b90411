//! Application loop for the TUI.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::app::ingredients::IngredientSelector;
use crate::app::order::{AddOutcome, OrderEditor, QuantityEdit};
use crate::app::submit::{HiddenFieldSet, SubmissionWriter};
use crate::domain::model::{EntryKey, IngredientOption};
use crate::infra::bootstrap::Bootstrap;
use crate::infra::config::Config;
use crate::ui::components::catalog::{CatalogEntry, CatalogList};
use crate::ui::components::chip_list::ChipList;
use crate::ui::components::line_items::{LineItemList, QuantityDraft};

const TICK_RATE: Duration = Duration::from_millis(120);

/// Which of the two forms currently receives input. The forms never share
/// state; switching focus only redirects key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormTarget {
    BurgerForm,
    OrderForm,
}

/// Primary entry point for running the interactive TUI.
pub struct UiApp {
    config: Config,
    available_ingredients: Vec<IngredientOption>,
    selector: IngredientSelector,
    editor: OrderEditor,
    burger_fields: HiddenFieldSet,
    order_fields: HiddenFieldSet,
    writer: SubmissionWriter,
    catalog_component: CatalogList,
    chip_component: ChipList,
    line_component: LineItemList,
    focus: FormTarget,
    burger: BurgerFormState,
    order: OrderFormState,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl UiApp {
    /// Assemble the app from loaded configuration and a bootstrap payload.
    pub fn new(config: Config, bootstrap: Bootstrap, output_dir: Option<PathBuf>) -> Self {
        let writer = SubmissionWriter::new(
            output_dir.unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir)),
        );
        let selector = IngredientSelector::with_initial(bootstrap.initial_ingredients.clone());
        let editor =
            OrderEditor::with_initial(bootstrap.burger_catalog(), bootstrap.initial_order_items.clone());

        Self {
            config,
            available_ingredients: bootstrap.available_ingredients,
            selector,
            editor,
            burger_fields: HiddenFieldSet::new(),
            order_fields: HiddenFieldSet::new(),
            writer,
            catalog_component: CatalogList,
            chip_component: ChipList,
            line_component: LineItemList,
            focus: FormTarget::BurgerForm,
            burger: BurgerFormState::default(),
            order: OrderFormState::default(),
            status: None,
            should_quit: false,
        }
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        event_loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(size);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(40)])
            .split(layout[0]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(main_chunks[1]);

        match self.focus {
            FormTarget::BurgerForm => self.render_burger_form(frame, main_chunks[0], &right_chunks),
            FormTarget::OrderForm => self.render_order_form(frame, main_chunks[0], &right_chunks),
        }

        self.render_status(frame, layout[1]);
    }

    fn render_burger_form(&mut self, frame: &mut Frame<'_>, left: Rect, right: &[Rect]) {
        let entries: Vec<CatalogEntry> = self
            .available_ingredients
            .iter()
            .map(|option| CatalogEntry::new(option.name.clone()))
            .collect();
        self.catalog_component.render(
            frame,
            left,
            "Available Ingredients",
            &entries,
            self.burger.catalog_cursor,
            None,
            true,
        );

        self.chip_component.render(
            frame,
            right[0],
            &self.selector,
            self.burger.chip_cursor,
            true,
            &self.config.defaults.ingredient_placeholder,
        );

        let context = Paragraph::new(Line::from(Span::styled(
            "Burger form",
            Style::default().fg(Color::Gray),
        )));
        frame.render_widget(context, right[1]);

        self.render_hints(frame, right[2], "add ingredient");
    }

    fn render_order_form(&mut self, frame: &mut Frame<'_>, left: Rect, right: &[Rect]) {
        let currency = self.config.defaults.currency.clone();
        let entries: Vec<CatalogEntry> = self
            .editor
            .catalog()
            .entries()
            .iter()
            .map(|burger| {
                CatalogEntry::new(format!("{} - {currency}{:.2}", burger.name, burger.price))
            })
            .collect();
        self.catalog_component.render(
            frame,
            left,
            "Available Burgers",
            &entries,
            self.order.catalog_cursor,
            self.order.chosen,
            true,
        );

        self.line_component.render(
            frame,
            right[0],
            &self.editor,
            self.order.line_cursor,
            self.order.draft.as_ref(),
            true,
            &currency,
            &self.config.defaults.order_placeholder,
        );

        let pending = match self.order.chosen {
            Some(index) => {
                let name = self
                    .editor
                    .catalog()
                    .entries()
                    .get(index)
                    .map(|burger| burger.name.clone())
                    .unwrap_or_default();
                format!("Adding: {name} x {}", self.order.pending_quantity)
            }
            None => format!("Adding: (pick a burger) x {}", self.order.pending_quantity),
        };
        let context = Paragraph::new(Line::from(Span::styled(
            pending,
            Style::default().fg(Color::Gray),
        )));
        frame.render_widget(context, right[1]);

        self.render_hints(frame, right[2], "add item");
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect, add_label: &str) {
        let keys = &self.config.keybindings;
        let hints = Paragraph::new(Line::from(vec![
            Span::styled("j/k", Style::default().fg(Color::Cyan)),
            Span::raw(" move · "),
            Span::styled(keys.add.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" {add_label} · ")),
            Span::styled(keys.remove.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" remove · "),
            Span::styled(keys.edit.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" edit qty · "),
            Span::styled(keys.submit.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" submit · "),
            Span::styled(keys.switch.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" switch form"),
        ]))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, area);
    }

    fn render_status(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let message = self.status.as_ref().map(|status| {
            let style = match status.level {
                StatusLevel::Info => Style::default().fg(Color::Gray),
                StatusLevel::Success => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red),
            };
            Line::styled(status.text.clone(), style)
        });

        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let line = message.unwrap_or_else(|| {
            Line::styled(
                "Ready · tab switches between burger and order forms",
                Style::default().fg(Color::DarkGray),
            )
        });
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Resize(..) => {}
            Event::Mouse(_) => {}
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('s') => {
                    self.submit_focused_form()?;
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.focus {
            FormTarget::BurgerForm => self.handle_burger_key(key),
            FormTarget::OrderForm => self.handle_order_key(key),
        }
        Ok(())
    }

    fn handle_burger_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.focus = FormTarget::OrderForm;
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.available_ingredients.is_empty() {
                    self.burger.catalog_cursor = (self.burger.catalog_cursor + 1)
                        .min(self.available_ingredients.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.burger.catalog_cursor = self.burger.catalog_cursor.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.add_current_ingredient();
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.move_chip_cursor(-1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.move_chip_cursor(1);
            }
            KeyCode::Char('d') => {
                self.remove_current_chip();
            }
            _ => {}
        }
    }

    fn handle_order_key(&mut self, key: KeyEvent) {
        if self.order.draft.is_some() {
            self.handle_draft_key(key);
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = FormTarget::BurgerForm;
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') => {
                if !self.editor.catalog().is_empty() {
                    self.order.catalog_cursor =
                        (self.order.catalog_cursor + 1).min(self.editor.catalog().len() - 1);
                }
            }
            KeyCode::Char('k') => {
                self.order.catalog_cursor = self.order.catalog_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                // Toggle the picked burger, mirroring a select control.
                if self.editor.catalog().is_empty() {
                    return;
                }
                self.order.chosen = if self.order.chosen == Some(self.order.catalog_cursor) {
                    None
                } else {
                    Some(self.order.catalog_cursor)
                };
            }
            KeyCode::Char('+') => {
                self.order.pending_quantity = self.order.pending_quantity.saturating_add(1);
            }
            KeyCode::Char('-') => {
                self.order.pending_quantity = self.order.pending_quantity.saturating_sub(1).max(1);
            }
            KeyCode::Enter => {
                self.add_current_order_item();
            }
            KeyCode::Down => {
                self.move_line_cursor(1);
            }
            KeyCode::Up => {
                self.move_line_cursor(-1);
            }
            KeyCode::Char('d') => {
                self.remove_current_line();
            }
            KeyCode::Char('e') => {
                self.begin_quantity_edit();
            }
            _ => {}
        }
    }

    fn handle_draft_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.order.draft = None;
            }
            KeyCode::Backspace => {
                if let Some(draft) = self.order.draft.as_mut() {
                    draft.input.pop();
                }
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if let Some(draft) = self.order.draft.as_mut() {
                    draft.input.push(ch);
                }
            }
            KeyCode::Enter => {
                self.commit_quantity_edit();
            }
            _ => {}
        }
    }

    fn add_current_ingredient(&mut self) {
        let Some(option) = self
            .available_ingredients
            .get(self.burger.catalog_cursor)
            .cloned()
        else {
            return;
        };
        let key = self.selector.add(option.id, option.name.clone());
        self.burger.chip_cursor = Some(key);
        self.set_status(StatusLevel::Success, format!("Added {}", option.name));
    }

    fn move_chip_cursor(&mut self, delta: isize) {
        if self.selector.is_empty() {
            self.burger.chip_cursor = None;
            return;
        }
        let current = self
            .burger
            .chip_cursor
            .and_then(|key| self.selector.position_of(key))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(self.selector.len() - 1);
        self.burger.chip_cursor = Some(self.selector.rows()[next].key);
    }

    fn remove_current_chip(&mut self) {
        let Some(key) = self.burger.chip_cursor else {
            return;
        };
        if let Some(position) = self.selector.position_of(key)
            && let Some(removed) = self.selector.remove_at(position)
        {
            self.burger.chip_cursor = self
                .selector
                .rows()
                .get(position.min(self.selector.len().saturating_sub(1)))
                .map(|row| row.key);
            if self.selector.is_empty() {
                self.burger.chip_cursor = None;
            }
            self.set_status(StatusLevel::Info, format!("Removed {}", removed.name));
        }
    }

    fn add_current_order_item(&mut self) {
        let burger_id = self
            .order
            .chosen
            .and_then(|index| self.editor.catalog().entries().get(index))
            .map(|burger| burger.id.clone())
            .unwrap_or_default();

        match self.editor.add_item(&burger_id, self.order.pending_quantity) {
            Ok(outcome) => {
                self.order.line_cursor = Some(outcome.key());
                let message = match outcome {
                    AddOutcome::Appended(_) => "Item added".to_string(),
                    AddOutcome::Merged { quantity, .. } => {
                        format!("Quantity merged, now {quantity}")
                    }
                };
                self.set_status(StatusLevel::Success, message);
                // Reset the add controls to their defaults.
                self.order.chosen = None;
                self.order.pending_quantity = 1;
            }
            Err(err) => {
                self.set_status(StatusLevel::Error, err.to_string());
            }
        }
    }

    fn move_line_cursor(&mut self, delta: isize) {
        if self.editor.is_empty() {
            self.order.line_cursor = None;
            return;
        }
        let current = self
            .order
            .line_cursor
            .and_then(|key| self.editor.position_of(key))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(self.editor.len() - 1);
        self.order.line_cursor = Some(self.editor.rows()[next].key);
    }

    fn remove_current_line(&mut self) {
        let Some(key) = self.order.line_cursor else {
            return;
        };
        if let Some(position) = self.editor.position_of(key)
            && let Some(removed) = self.editor.remove_at(position)
        {
            self.order.line_cursor = self
                .editor
                .rows()
                .get(position.min(self.editor.len().saturating_sub(1)))
                .map(|row| row.key);
            if self.editor.is_empty() {
                self.order.line_cursor = None;
            }
            self.set_status(StatusLevel::Info, format!("Removed {}", removed.burger_name));
        }
    }

    fn begin_quantity_edit(&mut self) {
        let Some(key) = self.order.line_cursor else {
            return;
        };
        if let Some(position) = self.editor.position_of(key) {
            let quantity = self.editor.rows()[position].line.quantity;
            self.order.draft = Some(QuantityDraft {
                key,
                input: quantity.to_string(),
            });
        }
    }

    fn commit_quantity_edit(&mut self) {
        let Some(draft) = self.order.draft.take() else {
            return;
        };
        let Some(position) = self.editor.position_of(draft.key) else {
            return;
        };
        // Unparseable input behaves like an invalid quantity: revert silently.
        let requested = draft.input.trim().parse::<u32>().unwrap_or(0);
        match self.editor.update_quantity(position, requested) {
            Some(QuantityEdit::Applied { quantity }) => {
                self.set_status(StatusLevel::Success, format!("Quantity set to {quantity}"));
            }
            Some(QuantityEdit::Reverted { quantity }) => {
                self.set_status(
                    StatusLevel::Info,
                    format!("Quantity reverted to {quantity}"),
                );
            }
            None => {}
        }
    }

    fn submit_focused_form(&mut self) -> Result<()> {
        let timestamp = OffsetDateTime::now_utc().format(format_description!(
            "[year][month][day]-[hour][minute][second]"
        ))?;

        let path = match self.focus {
            FormTarget::BurgerForm => {
                self.selector.prepare_submission(&mut self.burger_fields);
                self.writer
                    .write(&format!("burger-{timestamp}"), &self.burger_fields)?
            }
            FormTarget::OrderForm => {
                self.editor.prepare_submission(&mut self.order_fields);
                self.writer
                    .write(&format!("order-{timestamp}"), &self.order_fields)?
            }
        };

        self.set_status(
            StatusLevel::Success,
            format!("Submission written to {}", path.display()),
        );
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }
}

#[derive(Debug, Default)]
struct BurgerFormState {
    catalog_cursor: usize,
    chip_cursor: Option<EntryKey>,
}

#[derive(Debug)]
struct OrderFormState {
    catalog_cursor: usize,
    chosen: Option<usize>,
    pending_quantity: u32,
    line_cursor: Option<EntryKey>,
    draft: Option<QuantityDraft>,
}

impl Default for OrderFormState {
    fn default() -> Self {
        Self {
            catalog_cursor: 0,
            chosen: None,
            pending_quantity: 1,
            line_cursor: None,
            draft: None,
        }
    }
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        let lifetime = match level {
            StatusLevel::Error => Duration::from_secs(6),
            _ => Duration::from_secs(4),
        };
        Self {
            level,
            text,
            expires_at: Instant::now() + lifetime,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Info,
    Success,
    Error,
}
