use std::sync::Arc;

use crate::api::FoodApi;
use crate::app::Result;
use crate::dashboard::execute;
use crate::dashboard::state::{DashboardState, Request, Response, Transition};
use crate::domain::{Food, FoodPatch, NewFood};

/// Drives a [`DashboardState`] against a remote store, one request at a time.
///
/// Every remote failure is logged, recorded as the state's last error and
/// returned to the caller; the collection only changes on success.
pub struct DashboardController {
    api: Arc<dyn FoodApi + Send + Sync>,
    state: DashboardState,
}

impl DashboardController {
    pub fn new(api: Arc<dyn FoodApi + Send + Sync>) -> Self {
        Self {
            api,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn foods(&self) -> &[Food] {
        self.state.foods()
    }

    async fn run(&mut self, request: Request) -> Result<Response> {
        self.state.begin(&request)?;
        let result = execute(self.api.as_ref(), &request).await;
        self.state.complete(&request, result)
    }

    /// Fetch the whole collection and replace the local one.
    pub async fn initialize(&mut self) -> Result<&[Food]> {
        self.run(Request::load_all()).await?;
        Ok(self.state.foods())
    }

    pub async fn add_food(&mut self, candidate: NewFood) -> Result<Food> {
        self.run(Request::create(candidate)).await?.into_food()
    }

    /// Update the food being edited. Requires a prior [`begin_edit`](Self::begin_edit).
    pub async fn update_food(&mut self, patch: FoodPatch) -> Result<Food> {
        let request = match self.state.plan_update(&patch) {
            Ok(request) => request,
            Err(err) => {
                self.state.apply(Transition::Failed {
                    message: err.to_string(),
                });
                return Err(err);
            }
        };
        self.run(request).await?.into_food()
    }

    pub async fn delete_food(&mut self, id: i64) -> Result<()> {
        self.run(Request::delete(id)).await?;
        Ok(())
    }

    pub fn toggle_add_modal(&mut self) {
        self.state.apply(Transition::ToggleAddModal);
    }

    pub fn toggle_edit_modal(&mut self) {
        self.state.apply(Transition::ToggleEditModal);
    }

    pub fn begin_edit(&mut self, food: Food) {
        self.state.apply(Transition::BeginEdit(food));
    }
}
