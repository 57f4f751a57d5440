use ratatui::widgets::ListState;

use crate::app::Result;
use crate::dashboard::{DashboardState, Modal, Request, Response, Transition};
use crate::domain::Food;
use crate::tui::form::{FoodForm, FormKind};

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub dashboard: DashboardState,
    /// Mirrors the dashboard modal; `None` while no modal is open.
    pub form: Option<FoodForm>,
    pub selected: usize,
    pub list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
    // Pending delete confirmation (food_id, food_name)
    pub pending_delete: Option<(i64, String)>,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            dashboard: DashboardState::new(),
            form: None,
            selected: 0,
            list_state,
            should_quit: false,
            status_message: None,
            pending_delete: None,
        }
    }

    pub fn foods(&self) -> &[Food] {
        self.dashboard.foods()
    }

    pub fn selected_food(&self) -> Option<&Food> {
        self.foods().get(self.selected)
    }

    pub fn apply(&mut self, transition: Transition) {
        self.dashboard.apply(transition);
        self.sync();
    }

    /// Fold a finished request into the dashboard and report it in the status bar.
    pub fn complete(&mut self, request: &Request, result: Result<Response>) {
        if let Ok(response) = self.dashboard.complete(request, result) {
            let message = match response {
                Response::Loaded(foods) => format!("Loaded {} foods", foods.len()),
                Response::Created(food) => format!("Added {}", food.display_name()),
                Response::Updated(food) => format!("Saved {}", food.display_name()),
                Response::Deleted(id) => format!("Deleted food #{}", id),
            };
            self.set_status(message);
        }
        self.sync();
    }

    fn sync(&mut self) {
        let len = self.foods().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected));

        match self.dashboard.modal() {
            Modal::Closed => self.form = None,
            Modal::Add => {
                if self.form.as_ref().map(|f| f.kind) != Some(FormKind::Add) {
                    self.form = Some(FoodForm::for_add());
                }
            }
            Modal::Edit(food) => {
                if self.form.as_ref().map(|f| f.kind) != Some(FormKind::Edit(food.id)) {
                    self.form = Some(FoodForm::for_edit(food));
                }
            }
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.list_state.select(Some(index));
        }
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        let max_index = self.foods().len().saturating_sub(1);
        self.select((self.selected + 1).min(max_index));
    }

    pub fn next_page(&mut self) {
        let max_index = self.foods().len().saturating_sub(1);
        self.select((self.selected + PAGE_SIZE).min(max_index));
    }

    pub fn prev_page(&mut self) {
        self.select(self.selected.saturating_sub(PAGE_SIZE));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.dashboard.clear_error();
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}
