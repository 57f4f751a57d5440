pub mod food;

pub use food::{Food, FoodPatch, NewFood};
