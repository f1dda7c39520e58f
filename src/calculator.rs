//! Serving-size recalculation for the recipe detail view.

use crate::models::Ingredient;

/// Scales a recipe's ingredient amounts to a requested number of servings.
///
/// The base serving count is fixed at construction; every adjustment only
/// moves `current_servings`, and the multiplier and adjusted amounts are
/// derived from it on demand.
#[derive(Debug, Clone)]
pub struct ServingCalculator {
    initial_servings: u32,
    current_servings: u32,
    ingredients: Vec<Ingredient>,
}

impl ServingCalculator {
    /// A base of zero servings is treated as one
    pub fn new(initial_servings: u32, ingredients: Vec<Ingredient>) -> Self {
        let initial_servings = initial_servings.max(1);
        Self {
            initial_servings,
            current_servings: initial_servings,
            ingredients,
        }
    }

    pub fn initial_servings(&self) -> u32 {
        self.initial_servings
    }

    pub fn current_servings(&self) -> u32 {
        self.current_servings
    }

    pub fn multiplier(&self) -> f64 {
        f64::from(self.current_servings) / f64::from(self.initial_servings)
    }

    pub fn is_adjusted(&self) -> bool {
        self.current_servings != self.initial_servings
    }

    /// Ingredients with each amount scaled and rounded to two decimals
    pub fn adjusted_ingredients(&self) -> Vec<Ingredient> {
        let multiplier = self.multiplier();
        self.ingredients
            .iter()
            .map(|ingredient| Ingredient {
                amount: round_to_hundredths(ingredient.amount * multiplier),
                ..ingredient.clone()
            })
            .collect()
    }

    pub fn increase(&mut self) {
        self.current_servings = self.current_servings.saturating_add(1);
    }

    pub fn decrease(&mut self) {
        self.current_servings = self.current_servings.saturating_sub(1).max(1);
    }

    pub fn set_servings(&mut self, servings: u32) {
        self.current_servings = servings.max(1);
    }

    pub fn reset(&mut self) {
        self.current_servings = self.initial_servings;
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole amounts render without a decimal part; anything else renders to two
/// decimals with trailing zeros stripped.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        let fixed = format!("{:.2}", amount);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flour() -> Vec<Ingredient> {
        vec![Ingredient::new("flour", 1.0, "cup")]
    }

    #[test]
    fn six_servings_of_a_four_serving_recipe_scales_by_one_and_a_half() {
        let mut calc = ServingCalculator::new(4, flour());
        calc.set_servings(6);
        assert_eq!(calc.multiplier(), 1.5);
        assert_eq!(calc.adjusted_ingredients()[0].amount, 1.5);
        assert_eq!(calc.adjusted_ingredients()[0].unit, "cup");
    }

    #[test]
    fn adjusted_amounts_round_to_two_decimals() {
        let mut calc = ServingCalculator::new(3, vec![Ingredient::new("sugar", 1.0, "cup")]);
        calc.set_servings(1);
        assert_eq!(calc.adjusted_ingredients()[0].amount, 0.33);
    }

    #[test]
    fn decrease_stops_at_one() {
        let mut calc = ServingCalculator::new(2, flour());
        for _ in 0..10 {
            calc.decrease();
        }
        assert_eq!(calc.current_servings(), 1);
    }

    #[test]
    fn set_servings_clamps_zero_to_one() {
        let mut calc = ServingCalculator::new(4, flour());
        calc.set_servings(0);
        assert_eq!(calc.current_servings(), 1);
    }

    #[test]
    fn zero_base_is_treated_as_one() {
        let mut calc = ServingCalculator::new(0, flour());
        calc.increase();
        assert_eq!(calc.initial_servings(), 1);
        assert!(calc.multiplier().is_finite());
        assert_eq!(calc.adjusted_ingredients()[0].amount, 2.0);
    }

    #[test]
    fn format_amount_strips_trailing_zeros() {
        assert_eq!(format_amount(2.0), "2");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(0.25), "0.25");
        assert_eq!(format_amount(0.333), "0.33");
        assert_eq!(format_amount(1.999), "2");
    }

    proptest! {
        #[test]
        fn reset_restores_original_amounts(
            servings in 1u32..50,
            moves in proptest::collection::vec(0u8..3, 0..20),
            amounts in proptest::collection::vec(0.0f64..1000.0, 0..8),
        ) {
            let ingredients: Vec<Ingredient> = amounts
                .iter()
                .map(|a| Ingredient::new("x", round_to_hundredths(*a), "g"))
                .collect();
            let mut calc = ServingCalculator::new(servings, ingredients.clone());
            for m in moves {
                match m {
                    0 => calc.increase(),
                    1 => calc.decrease(),
                    _ => calc.set_servings(servings * 2),
                }
            }
            calc.reset();
            prop_assert_eq!(calc.current_servings(), servings);
            prop_assert_eq!(calc.adjusted_ingredients(), ingredients);
        }

        #[test]
        fn current_servings_never_drops_below_one(start in 1u32..10, steps in 0usize..40) {
            let mut calc = ServingCalculator::new(start, flour());
            for _ in 0..steps {
                calc.decrease();
            }
            prop_assert!(calc.current_servings() >= 1);
        }

        #[test]
        fn multiplier_is_ratio_of_current_to_initial(initial in 1u32..100, current in 1u32..100) {
            let mut calc = ServingCalculator::new(initial, flour());
            calc.set_servings(current);
            prop_assert_eq!(calc.multiplier(), f64::from(current) / f64::from(initial));
        }
    }
}
