use futures::future::BoxFuture;
use futures::FutureExt;
use rust_decimal::Decimal;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::analytics::{AnalyticsSnapshot, Warning};
use crate::models::BudgetField;
use crate::store::{BudgetStore, StoreState};

use super::util::{format_amount, parse_amount_input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Budget,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Budget]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Budget => write!(f, "Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
        }
    }
}

/// Sync or reconnect work running on the runtime. Resolves to the sync
/// outcome, or `None` when nothing was pushed.
type Background = JoinHandle<Option<bool>>;

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) edit_buffer: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Budget form
    pub(crate) field_index: usize,

    // Cached from the store on every tick
    pub(crate) state: StoreState,
    pub(crate) analytics: AnalyticsSnapshot,
    pub(crate) warnings: Vec<Warning>,

    runtime: Handle,
    background: Option<Background>,
}

impl App {
    pub(crate) fn new(store: &BudgetStore, runtime: Handle) -> Self {
        let state = store.snapshot();
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            edit_buffer: String::new(),
            status_message: String::new(),
            show_help: false,

            field_index: 0,

            analytics: crate::analytics::compute_analytics(&state.budget),
            warnings: crate::analytics::compute_warnings(&state.budget),
            state,

            runtime,
            background: None,
        }
    }

    pub(crate) fn refresh(&mut self, store: &BudgetStore) {
        let state = store.snapshot();
        if state.budget != self.state.budget {
            self.analytics = crate::analytics::compute_analytics(&state.budget);
            self.warnings = crate::analytics::compute_warnings(&state.budget);
        }
        self.state = state;
    }

    pub(crate) fn selected_field(&self) -> BudgetField {
        let fields = BudgetField::all();
        fields[self.field_index.min(fields.len() - 1)]
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let last = BudgetField::all().len() - 1;
        self.field_index = self.field_index.saturating_add_signed(delta).min(last);
    }

    /// Start editing the selected field, prefilled with its current amount.
    pub(crate) fn begin_edit(&mut self) {
        let current = self.state.budget.get(self.selected_field());
        self.edit_buffer = if current.is_zero() {
            String::new()
        } else {
            current.normalize().to_string()
        };
        self.input_mode = InputMode::Editing;
    }

    /// Validate the edit buffer and write it to the store. Invalid input keeps
    /// the editor open.
    pub(crate) fn commit_edit(&mut self, store: &BudgetStore) {
        let field = self.selected_field();
        match parse_amount_input(&self.edit_buffer) {
            Some(value) => {
                self.apply_amount(store, field, value);
                self.edit_buffer.clear();
                self.input_mode = InputMode::Normal;
            }
            None => {
                self.set_status(format!(
                    "Invalid amount: '{}'. Use digits and an optional decimal point, up to 1 trillion",
                    self.edit_buffer
                ));
            }
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.input_mode = InputMode::Normal;
        self.set_status("Edit cancelled");
    }

    pub(crate) fn apply_amount(&mut self, store: &BudgetStore, field: BudgetField, value: Decimal) {
        store.update_field(field, value);
        self.refresh(store);
        self.set_status(format!("{} set to {}", field.label(), format_amount(value)));
    }

    /// Run `work` on the runtime; its outcome is reported by
    /// [`App::poll_background`]. Replaces (and detaches) any earlier task.
    pub(crate) fn spawn_background(&mut self, work: BoxFuture<'static, Option<bool>>) {
        self.background = Some(self.runtime.spawn(work));
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.background.is_some()
    }

    pub(crate) fn poll_background(&mut self) {
        let Some(task) = self.background.as_mut() else {
            return;
        };
        let Some(result) = task.now_or_never() else {
            return;
        };
        self.background = None;
        match result {
            Ok(Some(true)) => self.set_status("Budget synced"),
            Ok(Some(false)) if !self.state.is_online => {
                self.set_status("Offline: changes will sync when the connection returns")
            }
            Ok(Some(false)) => self.set_status("Sync failed: changes kept locally"),
            Ok(None) => {}
            Err(e) => self.set_status(format!("Background task failed: {e}")),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
