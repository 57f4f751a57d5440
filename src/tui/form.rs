//! Text form backing the add and edit modals.

use crate::domain::{Food, FoodPatch, NewFood};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Price,
    Image,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Description, Field::Price, Field::Image];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Description => "Description",
            Field::Price => "Price",
            Field::Image => "Image URL",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Description,
            Field::Description => Field::Price,
            Field::Price => Field::Image,
            Field::Image => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Image,
            Field::Description => Field::Name,
            Field::Price => Field::Description,
            Field::Image => Field::Price,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FoodForm {
    pub kind: FormKind,
    pub focus: Field,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub error: Option<String>,
}

impl FoodForm {
    pub fn for_add() -> Self {
        Self {
            kind: FormKind::Add,
            focus: Field::Name,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image: String::new(),
            error: None,
        }
    }

    pub fn for_edit(food: &Food) -> Self {
        Self {
            kind: FormKind::Edit(food.id),
            focus: Field::Name,
            name: food.name.clone(),
            description: food.description.clone(),
            price: food.price.to_string(),
            image: food.image.clone(),
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Add => " New food ",
            FormKind::Edit(_) => " Edit food ",
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::Image => &self.image,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
            Field::Price => &mut self.price,
            Field::Image => &mut self.image,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn input(&mut self, c: char) {
        self.value_mut(self.focus).push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.value_mut(self.focus).pop();
        self.error = None;
    }

    fn parse_price(&self) -> Result<f64, String> {
        let raw = self.price.trim().replace(',', ".");
        let price: f64 = raw
            .parse()
            .map_err(|_| format!("Price must be a number, got \"{}\"", self.price.trim()))?;
        if !price.is_finite() || price < 0.0 {
            return Err("Price must be a non-negative number".to_string());
        }
        Ok(price)
    }

    pub fn to_new_food(&self) -> Result<NewFood, String> {
        Ok(NewFood {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.parse_price()?,
            available: true,
            image: self.image.trim().to_string(),
        })
    }

    /// Only fields that differ from `original` end up in the patch.
    pub fn to_patch(&self, original: &Food) -> Result<FoodPatch, String> {
        let price = self.parse_price()?;

        Ok(FoodPatch {
            name: changed(&self.name, &original.name),
            description: changed(&self.description, &original.description),
            price: ((price - original.price).abs() > f64::EPSILON).then_some(price),
            available: None,
            image: changed(&self.image, &original.image),
        })
    }
}

fn changed(value: &str, current: &str) -> Option<String> {
    let value = value.trim();
    (value != current).then(|| value.to_string())
}
