use std::collections::HashSet;

use crate::app::{FoodboardError, Result};
use crate::domain::{Food, FoodPatch, NewFood};

/// Which modal is on screen. `Edit` carries the food being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Edit(Food),
}

/// A planned call against the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadAll,
    Create(NewFood),
    Update { id: i64, body: Food },
    Delete(i64),
}

impl Request {
    pub fn load_all() -> Self {
        Request::LoadAll
    }

    /// New foods are always stored as available.
    pub fn create(candidate: NewFood) -> Self {
        Request::Create(NewFood {
            available: true,
            ..candidate
        })
    }

    pub fn delete(id: i64) -> Self {
        Request::Delete(id)
    }

    pub fn key(&self) -> RequestKey {
        match self {
            Request::LoadAll => RequestKey::Collection,
            Request::Create(_) => RequestKey::Create,
            Request::Update { id, .. } | Request::Delete(id) => RequestKey::Food(*id),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Request::LoadAll => "load foods".to_string(),
            Request::Create(food) => format!("add \"{}\"", food.name),
            Request::Update { id, .. } => format!("update food #{}", id),
            Request::Delete(id) => format!("delete food #{}", id),
        }
    }
}

/// Requests sharing a key never run at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Collection,
    Create,
    Food(i64),
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKey::Collection => write!(f, "the food list"),
            RequestKey::Create => write!(f, "a new food"),
            RequestKey::Food(id) => write!(f, "food #{}", id),
        }
    }
}

/// What the remote store answered to a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Loaded(Vec<Food>),
    Created(Food),
    Updated(Food),
    Deleted(i64),
}

impl Response {
    pub fn into_food(self) -> Result<Food> {
        match self {
            Response::Created(food) | Response::Updated(food) => Ok(food),
            other => Err(FoodboardError::Other(format!(
                "expected a single food, got {:?}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Loaded(Vec<Food>),
    Added(Food),
    Updated(Food),
    Deleted(i64),
    Failed { message: String },
    ToggleAddModal,
    ToggleEditModal,
    BeginEdit(Food),
}

impl From<Response> for Transition {
    fn from(response: Response) -> Self {
        match response {
            Response::Loaded(foods) => Transition::Loaded(foods),
            Response::Created(food) => Transition::Added(food),
            Response::Updated(food) => Transition::Updated(food),
            Response::Deleted(id) => Transition::Deleted(id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    foods: Vec<Food>,
    modal: Modal,
    in_flight: HashSet<RequestKey>,
    last_error: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn food(&self, id: i64) -> Option<&Food> {
        self.foods.iter().find(|food| food.id == id)
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn editing(&self) -> Option<&Food> {
        match &self.modal {
            Modal::Edit(food) => Some(food),
            _ => None,
        }
    }

    pub fn is_add_open(&self) -> bool {
        self.modal == Modal::Add
    }

    pub fn is_edit_open(&self) -> bool {
        matches!(self.modal, Modal::Edit(_))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_in_flight(&self, key: RequestKey) -> bool {
        self.in_flight.contains(&key)
    }

    /// Plan an update of the food being edited, merged with `patch`.
    pub fn plan_update(&self, patch: &FoodPatch) -> Result<Request> {
        let editing = self.editing().ok_or(FoodboardError::NotEditing)?;
        Ok(Request::Update {
            id: editing.id,
            body: editing.merged(patch),
        })
    }

    /// Mark `request` as in flight. Fails if one with the same key is pending.
    pub fn begin(&mut self, request: &Request) -> Result<()> {
        let key = request.key();
        if !self.in_flight.insert(key) {
            let err = FoodboardError::Busy(key.to_string());
            self.fail(request, &err);
            return Err(err);
        }
        tracing::debug!("Started: {}", request.describe());
        Ok(())
    }

    /// Release `request` and fold its outcome into the state.
    pub fn complete(&mut self, request: &Request, result: Result<Response>) -> Result<Response> {
        self.in_flight.remove(&request.key());

        match result {
            Ok(response) => {
                tracing::info!("Done: {}", request.describe());
                self.apply(Transition::from(response.clone()));
                Ok(response)
            }
            Err(err) => {
                self.fail(request, &err);
                Err(err)
            }
        }
    }

    pub fn fail(&mut self, request: &Request, err: &FoodboardError) {
        tracing::warn!("Failed to {}: {}", request.describe(), err);
        self.apply(Transition::Failed {
            message: format!("Failed to {}: {}", request.describe(), err),
        });
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Loaded(foods) => {
                self.foods = foods;
                self.last_error = None;
            }
            Transition::Added(food) => {
                match self.foods.iter_mut().find(|f| f.id == food.id) {
                    Some(existing) => *existing = food,
                    None => self.foods.push(food),
                }
                self.last_error = None;
            }
            Transition::Updated(food) => {
                if let Some(existing) = self.foods.iter_mut().find(|f| f.id == food.id) {
                    *existing = food.clone();
                }
                if self.editing().is_some_and(|editing| editing.id == food.id) {
                    self.modal = Modal::Closed;
                }
                self.last_error = None;
            }
            Transition::Deleted(id) => {
                self.foods.retain(|food| food.id != id);
                if self.editing().is_some_and(|editing| editing.id == id) {
                    self.modal = Modal::Closed;
                }
                self.last_error = None;
            }
            Transition::Failed { message } => {
                self.last_error = Some(message);
            }
            Transition::ToggleAddModal => {
                self.modal = match self.modal {
                    Modal::Add => Modal::Closed,
                    _ => Modal::Add,
                };
            }
            Transition::ToggleEditModal => {
                // Without an editing target there is nothing to open.
                if self.is_edit_open() {
                    self.modal = Modal::Closed;
                }
            }
            Transition::BeginEdit(food) => {
                self.modal = Modal::Edit(food);
            }
        }
    }
}
