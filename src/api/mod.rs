pub mod http;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Food, NewFood};

/// The remote store backing the food collection.
#[async_trait]
pub trait FoodApi {
    /// `GET /foods`
    async fn list_foods(&self) -> Result<Vec<Food>>;

    /// `POST /foods`, the store assigns the id.
    async fn create_food(&self, food: &NewFood) -> Result<Food>;

    /// `PUT /foods/{id}`
    async fn update_food(&self, id: i64, food: &Food) -> Result<Food>;

    /// `DELETE /foods/{id}`
    async fn delete_food(&self, id: i64) -> Result<()>;
}
