pub mod controller;
pub mod state;

use crate::api::FoodApi;
use crate::app::Result;

pub use controller::DashboardController;
pub use state::{DashboardState, Modal, Request, RequestKey, Response, Transition};

/// Run a planned request against the remote store.
pub async fn execute(api: &(dyn FoodApi + Send + Sync), request: &Request) -> Result<Response> {
    match request {
        Request::LoadAll => Ok(Response::Loaded(api.list_foods().await?)),
        Request::Create(food) => Ok(Response::Created(api.create_food(food).await?)),
        Request::Update { id, body } => Ok(Response::Updated(api.update_food(*id, body).await?)),
        Request::Delete(id) => {
            api.delete_food(*id).await?;
            Ok(Response::Deleted(*id))
        }
    }
}
