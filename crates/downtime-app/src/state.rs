// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    CategoryFormState, CategoryRecord, CategorySelection, CategoryStore, CoreError,
    ExpiryScheduler, FormMode, FormOutcome, TOAST_TTL, ToastToken, View, filter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success".to_owned(),
            description: description.into(),
        }
    }

    pub fn from_error(error: &CoreError) -> Self {
        match error {
            CoreError::Validation { .. } => Self {
                kind: NotificationKind::Error,
                title: "Validation Error".to_owned(),
                description: "Tag and Text are required fields".to_owned(),
            },
            CoreError::Index { .. } => Self {
                kind: NotificationKind::Error,
                title: "Error".to_owned(),
                description: error.to_string(),
            },
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenCategory(usize),
    Back,
    SetSearchQuery(String),
    SelectInstance(String),
    UndoSelection,
    DismissToast,
    ToastExpired(ToastToken),
    OpenCreateForm,
    OpenEditForm(usize),
    SetDraftTag(String),
    SetDraftText(String),
    SetDraftColor(String),
    SetInstanceInput(String),
    AddInstance,
    RemoveInstance(usize),
    SubmitForm,
    CancelForm,
    DeleteCategory(usize),
    ClearNotification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ViewChanged(View),
    SearchChanged(String),
    InstanceSelected(String),
    SelectionCleared,
    ToastShown(String),
    ToastHidden,
    FormOpened(FormMode),
    FormChanged,
    FormClosed,
    CategoriesChanged,
    Notified(Notification),
    NotificationCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppEvent)>;

#[derive(Default)]
struct ChangeFeed {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ChangeFeed {
    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn publish(&mut self, events: &[AppEvent]) {
        for (_, listener) in &mut self.listeners {
            for event in events {
                listener(event);
            }
        }
    }
}

impl fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug)]
pub struct AppState {
    store: CategoryStore,
    selection: CategorySelection,
    form: Option<CategoryFormState>,
    notification: Option<Notification>,
    revision: u64,
    feed: ChangeFeed,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CategoryStore::default(), TOAST_TTL)
    }
}

impl AppState {
    pub fn new(store: CategoryStore, toast_ttl: Duration) -> Self {
        Self {
            store,
            selection: CategorySelection::with_toast_ttl(toast_ttl),
            form: None,
            notification: None,
            revision: 0,
            feed: ChangeFeed::default(),
        }
    }

    pub fn with_categories(categories: Vec<CategoryRecord>) -> Self {
        Self::new(CategoryStore::from_records(categories), TOAST_TTL)
    }

    pub fn categories(&self) -> &[CategoryRecord] {
        self.store.list()
    }

    pub fn view(&self) -> View {
        self.selection.view()
    }

    pub fn selected_category(&self) -> Option<&CategoryRecord> {
        self.selection
            .selected_index()
            .and_then(|index| self.store.get(index))
    }

    pub fn search_query(&self) -> &str {
        &self.selection.session().search_query
    }

    pub fn selected_instance(&self) -> Option<&str> {
        self.selection.session().toast.selected_instance()
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.selection.session().toast.message()
    }

    pub fn visible_instances(&self) -> Vec<&str> {
        match self.selected_category() {
            Some(category) => filter::visible(&category.items, self.search_query()),
            None => Vec::new(),
        }
    }

    pub fn form(&self) -> Option<&CategoryFormState> {
        self.form.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppEvent) + 'static) -> SubscriptionId {
        self.feed.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.feed.unsubscribe(id)
    }

    pub fn dispatch(
        &mut self,
        command: AppCommand,
        scheduler: &mut dyn ExpiryScheduler,
    ) -> Vec<AppEvent> {
        let events = match self.apply(command, scheduler) {
            Ok(events) => events,
            Err(error) => {
                warn!(%error, "command rejected");
                vec![self.notify(Notification::from_error(&error))]
            }
        };
        if !events.is_empty() {
            self.revision += 1;
            self.feed.publish(&events);
        }
        events
    }

    fn apply(
        &mut self,
        command: AppCommand,
        scheduler: &mut dyn ExpiryScheduler,
    ) -> Result<Vec<AppEvent>, CoreError> {
        let in_detail = self.selection.selected_index().is_some();
        let events = match command {
            AppCommand::OpenCategory(index) => {
                self.selection.open(index, self.store.len(), scheduler)?;
                vec![AppEvent::ViewChanged(self.selection.view())]
            }
            AppCommand::Back if in_detail => {
                self.selection.back(scheduler);
                debug!("returned to category list");
                vec![AppEvent::ViewChanged(View::List)]
            }
            AppCommand::SetSearchQuery(query) if in_detail => {
                self.selection.session_mut().search_query = query.clone();
                vec![AppEvent::SearchChanged(query)]
            }
            AppCommand::SelectInstance(name) if in_detail => {
                let toast = &mut self.selection.session_mut().toast;
                toast.select(&name, scheduler);
                let message = toast.message().unwrap_or_default().to_owned();
                vec![
                    AppEvent::InstanceSelected(name),
                    AppEvent::ToastShown(message),
                ]
            }
            AppCommand::UndoSelection if in_detail => {
                let toast = &mut self.selection.session_mut().toast;
                if toast.selected_instance().is_none() && !toast.is_visible() {
                    Vec::new()
                } else {
                    toast.undo(scheduler);
                    vec![AppEvent::SelectionCleared, AppEvent::ToastHidden]
                }
            }
            AppCommand::DismissToast if in_detail => {
                let toast = &mut self.selection.session_mut().toast;
                if toast.is_visible() {
                    toast.dismiss(scheduler);
                    vec![AppEvent::ToastHidden]
                } else {
                    Vec::new()
                }
            }
            AppCommand::ToastExpired(token) => {
                if self.selection.session_mut().toast.expire(token) {
                    debug!(token = token.get(), "toast expired");
                    vec![AppEvent::ToastHidden]
                } else {
                    Vec::new()
                }
            }
            AppCommand::Back
            | AppCommand::SetSearchQuery(_)
            | AppCommand::SelectInstance(_)
            | AppCommand::UndoSelection
            | AppCommand::DismissToast => Vec::new(),
            AppCommand::OpenCreateForm => {
                let form = CategoryFormState::open_for_create();
                let mode = form.mode();
                self.form = Some(form);
                vec![AppEvent::FormOpened(mode)]
            }
            AppCommand::OpenEditForm(index) => {
                let record = self
                    .store
                    .get(index)
                    .ok_or(CoreError::category_index(index, self.store.len()))?;
                let form = CategoryFormState::open_for_edit(index, record);
                let mode = form.mode();
                self.form = Some(form);
                vec![AppEvent::FormOpened(mode)]
            }
            AppCommand::SetDraftTag(tag) => self.edit_form(|form| form.set_tag(tag)),
            AppCommand::SetDraftText(text) => self.edit_form(|form| form.set_text(text)),
            AppCommand::SetDraftColor(color) => self.edit_form(|form| form.set_color(color)),
            AppCommand::SetInstanceInput(input) => {
                self.edit_form(|form| form.set_instance_input(input))
            }
            AppCommand::AddInstance => match self.form.as_mut() {
                Some(form) => {
                    if form.commit_instance_input() {
                        vec![AppEvent::FormChanged]
                    } else {
                        Vec::new()
                    }
                }
                None => Vec::new(),
            },
            AppCommand::RemoveInstance(index) => match self.form.as_mut() {
                Some(form) => {
                    form.remove_item(index)?;
                    vec![AppEvent::FormChanged]
                }
                None => Vec::new(),
            },
            AppCommand::SubmitForm => {
                let Some(form) = self.form.as_ref() else {
                    return Ok(Vec::new());
                };
                let outcome = form.submit(&mut self.store)?;
                self.form = None;
                let mut events = vec![AppEvent::CategoriesChanged, AppEvent::FormClosed];
                if let FormOutcome::Updated(index) = outcome {
                    events.extend(self.drop_missing_selection(index, scheduler));
                }
                events.push(self.notify(Notification::success(outcome.success_message())));
                events
            }
            AppCommand::CancelForm => match self.form.take() {
                Some(_) => vec![AppEvent::FormClosed],
                None => Vec::new(),
            },
            AppCommand::DeleteCategory(index) => self.delete_category(index, scheduler)?,
            AppCommand::ClearNotification => match self.notification.take() {
                Some(_) => vec![AppEvent::NotificationCleared],
                None => Vec::new(),
            },
        };
        Ok(events)
    }

    fn edit_form(&mut self, edit: impl FnOnce(&mut CategoryFormState)) -> Vec<AppEvent> {
        match self.form.as_mut() {
            Some(form) => {
                edit(form);
                vec![AppEvent::FormChanged]
            }
            None => Vec::new(),
        }
    }

    // An edit of the open category may drop the selected instance.
    fn drop_missing_selection(
        &mut self,
        index: usize,
        scheduler: &mut dyn ExpiryScheduler,
    ) -> Vec<AppEvent> {
        if self.selection.selected_index() != Some(index) {
            return Vec::new();
        }
        let Some(record) = self.store.get(index) else {
            return Vec::new();
        };
        let toast = &mut self.selection.session_mut().toast;
        let missing = toast
            .selected_instance()
            .is_some_and(|name| !record.contains_item(name));
        if !missing {
            return Vec::new();
        }

        debug!(index, "selected instance removed by edit");
        let was_visible = toast.is_visible();
        toast.reset(scheduler);
        if was_visible {
            vec![AppEvent::SelectionCleared, AppEvent::ToastHidden]
        } else {
            vec![AppEvent::SelectionCleared]
        }
    }

    fn delete_category(
        &mut self,
        index: usize,
        scheduler: &mut dyn ExpiryScheduler,
    ) -> Result<Vec<AppEvent>, CoreError> {
        self.store.delete(index)?;
        let mut events = vec![AppEvent::CategoriesChanged];

        let before = self.selection.view();
        self.selection.forget_removed(index, scheduler);
        if self.selection.view() != before {
            events.push(AppEvent::ViewChanged(self.selection.view()));
        }

        if let Some(form) = self.form.as_mut()
            && !form.rebase_after_removal(index)
        {
            self.form = None;
            events.push(AppEvent::FormClosed);
        }

        events.push(self.notify(Notification::success("Category deleted")));
        Ok(events)
    }

    fn notify(&mut self, notification: Notification) -> AppEvent {
        self.notification = Some(notification.clone());
        AppEvent::Notified(notification)
    }
}
