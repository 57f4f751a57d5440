use crate::app::{AppContext, FoodboardError, Result};
use crate::domain::{Food, FoodPatch, NewFood};

fn print_food(food: &Food) {
    let marker = if food.available { "●" } else { "○" };
    println!(
        "{} #{:<4} {:<24} {:>10}  {}",
        marker,
        food.id,
        food.display_name(),
        food.display_price(),
        food.description
    );
}

pub async fn list_foods(ctx: &AppContext) -> Result<()> {
    let mut controller = ctx.controller();
    let foods = controller.initialize().await?;

    if foods.is_empty() {
        println!("No foods");
        return Ok(());
    }

    for food in foods {
        print_food(food);
    }

    Ok(())
}

pub async fn add_food(ctx: &AppContext, candidate: NewFood) -> Result<()> {
    let mut controller = ctx.controller();
    let food = controller.add_food(candidate).await?;

    println!("Added food #{}: {}", food.id, food.display_name());
    Ok(())
}

pub async fn update_food(ctx: &AppContext, id: i64, patch: FoodPatch) -> Result<()> {
    if patch.is_empty() {
        println!("Nothing to update");
        return Ok(());
    }

    let mut controller = ctx.controller();
    controller.initialize().await?;

    let target = controller
        .state()
        .food(id)
        .cloned()
        .ok_or(FoodboardError::FoodNotFound(id))?;

    controller.begin_edit(target);
    let food = controller.update_food(patch).await?;

    println!("Updated food #{}:", food.id);
    print_food(&food);
    Ok(())
}

pub async fn delete_food(ctx: &AppContext, id: i64) -> Result<()> {
    let mut controller = ctx.controller();
    controller.delete_food(id).await?;

    println!("Deleted food #{}", id);
    Ok(())
}
