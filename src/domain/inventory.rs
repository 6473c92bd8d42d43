//! Ingredient stock and the arithmetic behind every stock movement.
//!
//! Money is kept to 2 decimal places and quantities to 3; every value is
//! rounded (half away from zero) before it is written.

use serde::{Deserialize, Serialize};

use crate::config::{MONEY_SCALE, QUANTITY_SCALE};
use crate::errors::AppError;

fn round_to(value: f64, scale: i32) -> f64 {
    let factor = 10f64.powi(scale);
    (value * factor).round() / factor
}

pub fn round_money(value: f64) -> f64 {
    round_to(value, MONEY_SCALE)
}

pub fn round_quantity(value: f64) -> f64 {
    round_to(value, QUANTITY_SCALE)
}

/// Unit an ingredient is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    Weight,
    Volume,
    Piece,
}

impl MeasureUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            MeasureUnit::Weight => "weight",
            MeasureUnit::Volume => "volume",
            MeasureUnit::Piece => "piece",
        }
    }
}

impl std::str::FromStr for MeasureUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(MeasureUnit::Weight),
            "volume" => Ok(MeasureUnit::Volume),
            "piece" => Ok(MeasureUnit::Piece),
            other => Err(AppError::validation(format!("Unknown measure unit: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub count: f64,
    pub purchase_price: f64,
    pub measure: MeasureUnit,
}

/// Sellable item. Recipe rows link it to the ingredients it consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub name: String,
    pub price: f64,
}

/// Recipe row: how much of an ingredient one unit of a product consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecipeItem {
    pub id: i64,
    pub product_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
}

impl RecipeItem {
    /// Ingredient consumed when `units` of the product are sold.
    pub fn consumption(&self, units: f64) -> f64 {
        round_quantity(self.quantity * units)
    }
}

/// One line of a goods arrival.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalItem {
    pub ingredient_id: i64,
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
    /// Also record the purchase as a cash expense.
    #[serde(default)]
    pub write_off: bool,
}

/// Total cash spent on the write-off lines of one arrival.
pub fn write_off_total(items: &[ArrivalItem]) -> f64 {
    round_money(
        items
            .iter()
            .filter(|i| i.write_off)
            .map(|i| i.price * i.quantity)
            .sum(),
    )
}

/// Outcome of counting one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountOutcome {
    pub old_count: f64,
    pub new_count: f64,
    /// Value lost since the last count; negative means a surplus.
    pub loss_price: f64,
    pub changed: bool,
}

pub fn count_ingredient(old_count: f64, new_count: f64, purchase_price: f64) -> CountOutcome {
    let new_count = round_quantity(new_count);
    CountOutcome {
        old_count,
        new_count,
        loss_price: round_money((old_count - new_count) * purchase_price),
        changed: old_count != new_count,
    }
}

/// Inventory count header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryHistory {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub employee_id: Option<i64>,
    pub comment: String,
    pub created_at: i64,
}

/// Inventory count line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLine {
    pub id: i64,
    pub history_id: i64,
    pub ingredient_id: i64,
    pub old_count: f64,
    pub new_count: f64,
    pub loss_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round_money(1.234), 1.23);
        assert_eq!(round_money(-2.5678), -2.57);
        assert_eq!(round_quantity(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_count_loss_and_gain() {
        let loss = count_ingredient(10.0, 8.0, 2.5);
        assert_eq!(loss.loss_price, 5.0);
        assert!(loss.changed);

        let gain = count_ingredient(8.0, 9.0, 2.5);
        assert_eq!(gain.loss_price, -2.5);

        let same = count_ingredient(4.0, 4.0, 2.5);
        assert!(!same.changed);
        assert_eq!(same.loss_price, 0.0);
    }

    #[test]
    fn test_write_off_total_only_counts_flagged_lines() {
        let items = [
            ArrivalItem {
                ingredient_id: 1,
                quantity: 2.0,
                price: 3.5,
                write_off: true,
            },
            ArrivalItem {
                ingredient_id: 2,
                quantity: 10.0,
                price: 1.0,
                write_off: false,
            },
            ArrivalItem {
                ingredient_id: 3,
                quantity: 0.5,
                price: 4.0,
                write_off: true,
            },
        ];
        assert_eq!(write_off_total(&items), 9.0);
    }

    #[test]
    fn test_recipe_consumption() {
        let recipe = RecipeItem {
            id: 1,
            product_id: 1,
            ingredient_id: 1,
            quantity: 2.0,
        };
        assert_eq!(recipe.consumption(3.0), 6.0);
    }
}
