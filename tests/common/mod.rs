use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use foodboard::api::FoodApi;
use foodboard::app::{FoodboardError, Result};
use foodboard::domain::{Food, NewFood};

/// In-memory stand-in for the REST backend that records what it was sent.
pub struct FakeApi {
    foods: Mutex<Vec<Food>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    pub created: Mutex<Vec<NewFood>>,
    pub updated: Mutex<Vec<(i64, Food)>>,
    pub deleted: Mutex<Vec<i64>>,
}

impl FakeApi {
    pub fn new(foods: Vec<Food>) -> Arc<Self> {
        let next_id = foods.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        Arc::new(Self {
            foods: Mutex::new(foods),
            next_id: AtomicI64::new(next_id),
            failing: AtomicBool::new(false),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FoodboardError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                url: "http://fake/foods".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FoodApi for FakeApi {
    async fn list_foods(&self) -> Result<Vec<Food>> {
        self.check()?;
        Ok(self.foods.lock().unwrap().clone())
    }

    async fn create_food(&self, food: &NewFood) -> Result<Food> {
        self.check()?;
        self.created.lock().unwrap().push(food.clone());

        let stored = Food {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: food.name.clone(),
            description: food.description.clone(),
            price: food.price,
            available: food.available,
            image: food.image.clone(),
        };
        self.foods.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_food(&self, id: i64, food: &Food) -> Result<Food> {
        self.check()?;
        self.updated.lock().unwrap().push((id, food.clone()));

        let mut foods = self.foods.lock().unwrap();
        let existing = foods
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(FoodboardError::FoodNotFound(id))?;
        *existing = Food { id, ..food.clone() };
        Ok(existing.clone())
    }

    async fn delete_food(&self, id: i64) -> Result<()> {
        self.check()?;
        self.deleted.lock().unwrap().push(id);
        self.foods.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }
}

pub fn food(id: i64, name: &str, price: f64) -> Food {
    Food {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        available: true,
        image: format!("https://example.com/{}.png", id),
    }
}

pub fn candidate(name: &str, price: f64) -> NewFood {
    NewFood {
        name: name.to_string(),
        description: "Tasty".to_string(),
        price,
        available: false,
        image: "https://example.com/new.png".to_string(),
    }
}
