// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use downtime_app::{
    AppCommand, AppEvent, AppState, CategoryFormState, CategoryRecord, ExpiryScheduler,
    NotificationKind, TimerHandle, ToastToken, View, empty_state_message,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const CARD_COLUMNS: usize = 3;
const CARD_HEIGHT: u16 = 8;
const STATUS_TTL: Duration = Duration::from_secs(4);
const SEARCH_CURSOR: &str = "▏";
const FALLBACK_COLOR: Color = Color::Gray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ToastExpired {
        handle: TimerHandle,
        token: ToastToken,
    },
    ClearStatus {
        token: u64,
    },
}

#[derive(Debug)]
pub struct ThreadScheduler {
    tx: Sender<InternalEvent>,
    next_handle: u64,
    live: HashMap<u64, Arc<AtomicBool>>,
}

impl ThreadScheduler {
    pub fn new(tx: Sender<InternalEvent>) -> Self {
        Self {
            tx,
            next_handle: 0,
            live: HashMap::new(),
        }
    }

    fn settle(&mut self, handle: TimerHandle) -> bool {
        self.live.remove(&handle.get()).is_some()
    }
}

impl ExpiryScheduler for ThreadScheduler {
    fn schedule(&mut self, delay: Duration, token: ToastToken) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle::new(self.next_handle);
        let cancelled = Arc::new(AtomicBool::new(false));
        self.live.insert(handle.get(), Arc::clone(&cancelled));

        let sender = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            if !cancelled.load(Ordering::Acquire) {
                let _ = sender.send(InternalEvent::ToastExpired { handle, token });
            }
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(flag) = self.live.remove(&handle.get()) {
            flag.store(true, Ordering::Release);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Tag,
    Text,
    Color,
    Instance,
    Items,
}

impl FormField {
    const ORDER: [Self; 5] = [
        Self::Tag,
        Self::Text,
        Self::Color,
        Self::Instance,
        Self::Items,
    ];

    fn rotate(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let current = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as isize;
        Self::ORDER[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    list_cursor: usize,
    detail_cursor: usize,
    search_active: bool,
    form_focus: FormField,
    item_cursor: usize,
    pending_delete: Option<usize>,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app(state: &mut AppState) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| event_loop(&mut terminal, state));

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let (internal_tx, internal_rx) = mpsc::channel();
    let mut scheduler = ThreadScheduler::new(internal_tx.clone());
    let mut view_data = ViewData::default();
    let mut drawn_revision = None;
    let mut dirty = true;
    info!(categories = state.categories().len(), "tui started");

    loop {
        dirty |= process_internal_events(
            state,
            &mut view_data,
            &mut scheduler,
            &internal_tx,
            &internal_rx,
        );

        if dirty || drawn_revision != Some(state.revision()) {
            terminal
                .draw(|frame| render(frame, state, &view_data))
                .context("draw frame")?;
            drawn_revision = Some(state.revision());
            dirty = false;
        }

        if event::poll(Duration::from_millis(120)).context("poll event")? {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, &mut view_data, &mut scheduler, &internal_tx, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }

    info!("tui exited");
    Ok(())
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut ThreadScheduler,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) -> bool {
    let mut changed = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ToastExpired { handle, token } => {
                if scheduler.settle(handle) {
                    changed |= !dispatch(
                        state,
                        view_data,
                        scheduler,
                        tx,
                        AppCommand::ToastExpired(token),
                    )
                    .is_empty();
                }
            }
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                changed |= !dispatch(
                    state,
                    view_data,
                    scheduler,
                    tx,
                    AppCommand::ClearNotification,
                )
                .is_empty();
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
    changed
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn dispatch(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut dyn ExpiryScheduler,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) -> Vec<AppEvent> {
    let events = state.dispatch(command, scheduler);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::Notified(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
    clamp_cursors(state, view_data);
    events
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut dyn ExpiryScheduler,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if state.form().is_some() {
        handle_form_key(state, view_data, scheduler, internal_tx, key);
        return false;
    }

    match state.view() {
        View::List => handle_list_key(state, view_data, scheduler, internal_tx, key),
        View::Detail(index) => {
            handle_detail_key(state, view_data, scheduler, internal_tx, index, key);
            false
        }
    }
}

fn handle_list_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut dyn ExpiryScheduler,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if let Some(index) = view_data.pending_delete.take() {
        if key.code == KeyCode::Char('y') {
            debug!(index, "delete confirmed");
            dispatch(
                state,
                view_data,
                scheduler,
                internal_tx,
                AppCommand::DeleteCategory(index),
            );
        }
        return false;
    }

    let count = state.categories().len();
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Left | KeyCode::Char('h') => move_list_cursor(view_data, count, -1),
        KeyCode::Right | KeyCode::Char('l') => move_list_cursor(view_data, count, 1),
        KeyCode::Up | KeyCode::Char('k') => {
            move_list_cursor(view_data, count, -(CARD_COLUMNS as isize));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_list_cursor(view_data, count, CARD_COLUMNS as isize);
        }
        KeyCode::Enter if count > 0 => {
            view_data.detail_cursor = 0;
            view_data.search_active = false;
            dispatch(
                state,
                view_data,
                scheduler,
                internal_tx,
                AppCommand::OpenCategory(view_data.list_cursor),
            );
        }
        KeyCode::Char('a') => open_form(state, view_data, scheduler, internal_tx, None),
        KeyCode::Char('e') if count > 0 => {
            let index = view_data.list_cursor;
            open_form(state, view_data, scheduler, internal_tx, Some(index));
        }
        KeyCode::Char('d') if count > 0 => {
            view_data.pending_delete = Some(view_data.list_cursor);
        }
        _ => {}
    }
    false
}

fn handle_detail_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut dyn ExpiryScheduler,
    internal_tx: &Sender<InternalEvent>,
    index: usize,
    key: KeyEvent,
) {
    if view_data.search_active {
        let mut query = state.search_query().to_owned();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                view_data.search_active = false;
                return;
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(ch) => query.push(ch),
            _ => return,
        }
        view_data.detail_cursor = 0;
        dispatch(
            state,
            view_data,
            scheduler,
            internal_tx,
            AppCommand::SetSearchQuery(query),
        );
        return;
    }

    let visible_len = state.visible_instances().len();
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            dispatch(state, view_data, scheduler, internal_tx, AppCommand::Back);
        }
        KeyCode::Char('/') => view_data.search_active = true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.detail_cursor = view_data.detail_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') if visible_len > 0 => {
            view_data.detail_cursor = (view_data.detail_cursor + 1).min(visible_len - 1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let selected = state
                .visible_instances()
                .get(view_data.detail_cursor)
                .map(|name| (*name).to_owned());
            if let Some(name) = selected {
                dispatch(
                    state,
                    view_data,
                    scheduler,
                    internal_tx,
                    AppCommand::SelectInstance(name),
                );
            }
        }
        KeyCode::Char('u') => {
            dispatch(
                state,
                view_data,
                scheduler,
                internal_tx,
                AppCommand::UndoSelection,
            );
        }
        KeyCode::Char('x') => {
            dispatch(
                state,
                view_data,
                scheduler,
                internal_tx,
                AppCommand::DismissToast,
            );
        }
        KeyCode::Char('e') => open_form(state, view_data, scheduler, internal_tx, Some(index)),
        _ => {}
    }
}

fn open_form(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut dyn ExpiryScheduler,
    internal_tx: &Sender<InternalEvent>,
    edit_index: Option<usize>,
) {
    view_data.form_focus = FormField::Tag;
    view_data.item_cursor = 0;
    let command = match edit_index {
        Some(index) => AppCommand::OpenEditForm(index),
        None => AppCommand::OpenCreateForm,
    };
    dispatch(state, view_data, scheduler, internal_tx, command);
}

fn handle_form_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    scheduler: &mut dyn ExpiryScheduler,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(form) = state.form() else {
        return;
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        dispatch(
            state,
            view_data,
            scheduler,
            internal_tx,
            AppCommand::SubmitForm,
        );
        return;
    }

    let focus = view_data.form_focus;
    let command = match key.code {
        KeyCode::Esc => Some(AppCommand::CancelForm),
        KeyCode::Tab => {
            view_data.form_focus = focus.rotate(1);
            None
        }
        KeyCode::BackTab => {
            view_data.form_focus = focus.rotate(-1);
            None
        }
        KeyCode::Enter if focus == FormField::Instance => Some(AppCommand::AddInstance),
        KeyCode::Enter if focus == FormField::Items => None,
        KeyCode::Enter => {
            view_data.form_focus = focus.rotate(1);
            None
        }
        KeyCode::Left if focus == FormField::Items => {
            view_data.item_cursor = view_data.item_cursor.saturating_sub(1);
            None
        }
        KeyCode::Right if focus == FormField::Items => {
            let last = form.draft().items.len().saturating_sub(1);
            view_data.item_cursor = (view_data.item_cursor + 1).min(last);
            None
        }
        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') if focus == FormField::Items => {
            (!form.draft().items.is_empty())
                .then_some(AppCommand::RemoveInstance(view_data.item_cursor))
        }
        KeyCode::Backspace => edit_form_field(form, focus, |value| {
            value.pop();
        }),
        KeyCode::Char(ch) => edit_form_field(form, focus, |value| value.push(ch)),
        _ => None,
    };

    if let Some(command) = command {
        dispatch(state, view_data, scheduler, internal_tx, command);
    }
}

fn edit_form_field(
    form: &CategoryFormState,
    focus: FormField,
    edit: impl FnOnce(&mut String),
) -> Option<AppCommand> {
    let draft = form.draft();
    let mut value = match focus {
        FormField::Tag => draft.tag.clone(),
        FormField::Text => draft.text.clone(),
        FormField::Color => draft.color.clone(),
        FormField::Instance => form.instance_input().to_owned(),
        FormField::Items => return None,
    };
    edit(&mut value);
    match focus {
        FormField::Tag => Some(AppCommand::SetDraftTag(value)),
        FormField::Text => Some(AppCommand::SetDraftText(value)),
        FormField::Color => Some(AppCommand::SetDraftColor(value)),
        FormField::Instance => Some(AppCommand::SetInstanceInput(value)),
        FormField::Items => None,
    }
}

fn move_list_cursor(view_data: &mut ViewData, count: usize, delta: isize) {
    if count == 0 {
        view_data.list_cursor = 0;
        return;
    }
    let next = view_data.list_cursor as isize + delta;
    view_data.list_cursor = next.clamp(0, count as isize - 1) as usize;
}

fn clamp_cursors(state: &AppState, view_data: &mut ViewData) {
    let count = state.categories().len();
    view_data.list_cursor = view_data.list_cursor.min(count.saturating_sub(1));
    if let View::Detail(index) = state.view() {
        view_data.list_cursor = index;
    }

    let visible = state.visible_instances().len();
    view_data.detail_cursor = view_data.detail_cursor.min(visible.saturating_sub(1));
    if state.view() == View::List {
        view_data.search_active = false;
    }

    let items = state.form().map_or(0, |form| form.draft().items.len());
    view_data.item_cursor = view_data.item_cursor.min(items.saturating_sub(1));
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state)).block(
        Block::default()
            .title("downtime")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(header, layout[0]);

    match (state.view(), state.selected_category()) {
        (View::Detail(_), Some(category)) => {
            render_detail(frame, layout[1], state, view_data, category);
        }
        _ => render_cards(frame, layout[1], state, view_data),
    }

    let status_style = match state.notification().map(|notice| notice.kind) {
        Some(NotificationKind::Error) => Style::default().fg(Color::Red),
        Some(NotificationKind::Success) => Style::default().fg(Color::Green),
        None => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(status_text(state, view_data))
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if let Some(message) = state.toast_message() {
        let area = toast_rect(layout[1]);
        frame.render_widget(Clear, area);
        let toast = Paragraph::new(toast_text(message)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(toast, area);
    }

    if let Some(form) = state.form() {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(render_form_text(form, view_data))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(form.mode().title())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(modal, area);
    }

    if view_data.help_visible {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_text(state: &AppState) -> String {
    match state.selected_category() {
        Some(category) => format!("Downtime Categories › {}", category.tag),
        None => "Downtime Categories".to_owned(),
    }
}

fn render_cards(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let categories = state.categories();
    if categories.is_empty() {
        let empty = Paragraph::new("No categories yet -- press a to add one")
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let rows_fit = usize::from((area.height / CARD_HEIGHT).max(1));
    let cursor_row = view_data.list_cursor / CARD_COLUMNS;
    let first_row = cursor_row.saturating_sub(rows_fit - 1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_fit])
        .split(area);
    let column_constraints = vec![Constraint::Ratio(1, CARD_COLUMNS as u32); CARD_COLUMNS];

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = first_row + slot;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for (column, cell) in cells.iter().enumerate() {
            let index = row * CARD_COLUMNS + column;
            let Some(category) = categories.get(index) else {
                return;
            };
            let accent = parse_hex_color(&category.color).unwrap_or(FALLBACK_COLOR);
            let mut border = Style::default().fg(accent);
            if index == view_data.list_cursor {
                border = border.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            let card = Paragraph::new(render_card_lines(category).join("\n"))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(format!(" {} {} ", category.icon().glyph(), category.tag))
                        .borders(Borders::ALL)
                        .border_style(border),
                );
            frame.render_widget(card, *cell);
        }
    }
}

fn render_card_lines(category: &CategoryRecord) -> Vec<String> {
    let preview = category.preview();
    let mut lines = vec![category.text.clone(), String::new()];
    if preview.shown.is_empty() {
        lines.push("No instances".to_owned());
    } else {
        lines.push(preview.shown.join(" · "));
    }
    if let Some(more) = preview.more_label() {
        lines.push(more);
    }
    lines
}

fn render_detail(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    category: &CategoryRecord,
) {
    let accent = parse_hex_color(&category.color).unwrap_or(FALLBACK_COLOR);
    let body = Paragraph::new(render_detail_text(state, view_data)).block(
        Block::default()
            .title(format!(" [{}] ← Esc back to categories ", category.tag))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(body, area);
}

fn render_detail_text(state: &AppState, view_data: &ViewData) -> String {
    let query = state.search_query();
    let cursor = if view_data.search_active {
        SEARCH_CURSOR
    } else {
        ""
    };
    let mut lines = vec![format!("search: {query}{cursor}"), String::new()];

    let visible = state.visible_instances();
    if visible.is_empty() {
        lines.push(empty_state_message(query));
        return lines.join("\n");
    }

    let selected = state.selected_instance();
    for (position, name) in visible.iter().enumerate() {
        let pointer = if position == view_data.detail_cursor {
            ">"
        } else {
            " "
        };
        let mark = if selected == Some(*name) { " ✓" } else { "" };
        lines.push(format!("{pointer} #{} {name}{mark}", position + 1));
    }
    lines.join("\n")
}

fn render_form_text(form: &CategoryFormState, view_data: &ViewData) -> String {
    let draft = form.draft();
    let marker = |field: FormField| {
        if view_data.form_focus == field {
            ">"
        } else {
            " "
        }
    };

    let mut lines = vec![
        format!("{} Tag *        {}", marker(FormField::Tag), draft.tag),
        format!("{} Display Text * {}", marker(FormField::Text), draft.text),
        format!("{} Color        {}", marker(FormField::Color), draft.color),
        format!(
            "{} Add Instance {}",
            marker(FormField::Instance),
            form.instance_input()
        ),
        String::new(),
    ];

    if draft.items.is_empty() {
        lines.push(format!("{} No items added yet", marker(FormField::Items)));
    } else {
        let chips = draft
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                if view_data.form_focus == FormField::Items && position == view_data.item_cursor {
                    format!("[{item} ✕]")
                } else {
                    format!(" {item} ")
                }
            })
            .collect::<Vec<String>>()
            .join(" ");
        lines.push(format!("{} Instances    {chips}", marker(FormField::Items)));
    }

    lines.push(String::new());
    lines.push(
        "tab next field · enter add instance · x remove · ctrl-s save · esc cancel".to_owned(),
    );
    lines.join("\n")
}

fn toast_text(message: &str) -> String {
    format!("{message}    [u] Undo  [x] ✕")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(index) = view_data.pending_delete {
        let tag = state
            .categories()
            .get(index)
            .map_or("?", |category| category.tag.as_str());
        return format!("delete {tag}? press y to confirm, any other key to keep it");
    }
    if let Some(notice) = state.notification() {
        return notice.to_string();
    }
    if state.form().is_some() {
        return "editing category".to_owned();
    }
    match state.view() {
        View::List => format!(
            "{} categories · enter open · a add · e edit · d delete · ? help · q quit",
            state.categories().len()
        ),
        View::Detail(_) if view_data.search_active => {
            "type to filter · enter/esc done".to_owned()
        }
        View::Detail(_) => format!(
            "{} shown · / search · enter select · u undo · x close toast · e edit · esc back",
            state.visible_instances().len()
        ),
    }
}

fn help_overlay_text() -> &'static str {
    "categories\n  arrows/hjkl  move\n  enter        open\n  a / e / d    add / edit / delete\n\ninstances\n  /            search\n  enter        select\n  u            undo selection\n  x            close toast\n  esc          back\n\nform\n  tab          next field\n  enter        add instance\n  ctrl-s       save\n  esc          cancel\n\nctrl-q quits from anywhere"
}

fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => {
            let short = |index: usize| channel(index..index + 1).map(|v| v * 17);
            Some(Color::Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

fn toast_rect(area: Rect) -> Rect {
    let width = area.width.min(56);
    let height = 3.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
