use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub image: String,
}

impl Food {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "(Unnamed)"
        } else {
            &self.name
        }
    }

    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }

    /// Field-wise merge: every field set in `patch` replaces ours, `id` is kept.
    pub fn merged(&self, patch: &FoodPatch) -> Food {
        Food {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            price: patch.price.unwrap_or(self.price),
            available: patch.available.unwrap_or(self.available),
            image: patch.image.clone().unwrap_or_else(|| self.image.clone()),
        }
    }
}

/// A food that has not been stored yet, so it carries no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub image: Option<String>,
}

impl FoodPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.available.is_none()
            && self.image.is_none()
    }
}
