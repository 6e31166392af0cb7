#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pantry::reactor::apply_status_change;
    use pantry::{
        AppState, Category, FulfillmentStatus, PantryStockItem, RecipeIngredientNeed, RecipeNeed,
    };

    fn kitchen_state() -> AppState {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut state = AppState::new();
        state.pantry = vec![
            PantryStockItem::new("p1", "Flour", Category::DryGoods, 5.0, "kg").with_threshold(1.0),
            PantryStockItem::new("p2", "Olive Oil", Category::OilsVinegars, 0.8, "l"),
        ];
        state.needs = vec![RecipeNeed::new(
            "r1",
            "Focaccia",
            "c1",
            "Italian Night",
            12,
            NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        )
        .with_ingredient(RecipeIngredientNeed::new("i1", "Flour", 150.0, "g").with_store_quantity(0.0, "kg"))
        .with_ingredient(RecipeIngredientNeed::new("i2", "Olive Oil", 30.0, "ml"))
        .with_ingredient(RecipeIngredientNeed::new("i3", "Rosemary", 2.0, "g"))];
        state
    }

    #[test]
    fn test_marking_in_pantry_deducts_and_updates_flags() {
        let mut state = kitchen_state();

        // 12 students at 150 g each is 1.8 kg of flour.
        assert!(apply_status_change(&mut state, "r1", "i1", FulfillmentStatus::InPantry));

        let flour = &state.pantry[0];
        assert!((flour.current_quantity - 3.2).abs() < 1e-9);
        assert!(flour.current_quantity >= 0.0);
        assert!(!flour.is_low_stock);
    }

    #[test]
    fn test_deduction_drives_low_stock_flag() {
        let mut state = kitchen_state();
        state.needs[0].scale_for_students(30); // 4.5 kg of flour

        apply_status_change(&mut state, "r1", "i1", FulfillmentStatus::InPantry);

        let flour = &state.pantry[0];
        assert!((flour.current_quantity - 0.5).abs() < 1e-9);
        assert!(flour.is_low_stock);
    }

    #[test]
    fn test_repeat_confirmation_never_double_deducts() {
        let mut state = kitchen_state();

        apply_status_change(&mut state, "r1", "i1", FulfillmentStatus::InPantry);
        let after_first = state.pantry[0].current_quantity;

        apply_status_change(&mut state, "r1", "i1", FulfillmentStatus::InPantry);
        assert_eq!(state.pantry[0].current_quantity, after_first);
    }

    #[test]
    fn test_deduction_converts_into_stock_unit() {
        let mut state = kitchen_state();

        // 12 x 30 ml = 360 ml, deducted from a 0.8 l bottle.
        apply_status_change(&mut state, "r1", "i2", FulfillmentStatus::InPantry);
        assert!((state.pantry[1].current_quantity - 0.44).abs() < 1e-9);
    }

    #[test]
    fn test_order_is_the_only_path_onto_the_list() {
        let mut state = kitchen_state();

        apply_status_change(&mut state, "r1", "i1", FulfillmentStatus::InPantry);
        apply_status_change(&mut state, "r1", "i3", FulfillmentStatus::Partial);
        assert!(state.shopping_list.is_empty());

        apply_status_change(&mut state, "r1", "i3", FulfillmentStatus::Order);
        assert_eq!(state.shopping_list.len(), 1);
        assert_eq!(state.shopping_list[0].name, "Rosemary");
        assert_eq!(state.shopping_list[0].recipes, vec!["Focaccia".to_string()]);
    }

    #[test]
    fn test_override_survives_its_own_deduction_but_not_pantry_edits() {
        let mut state = kitchen_state();

        apply_status_change(&mut state, "r1", "i1", FulfillmentStatus::InPantry);
        assert_eq!(
            state.needs[0].ingredients[0].status(),
            FulfillmentStatus::InPantry
        );
        assert!(state.needs[0].ingredients[0].override_status.is_some());

        // An external pantry edit re-runs the matcher and drops the override.
        state.set_pantry_quantity("p1", 0.0);
        assert!(state.needs[0].ingredients[0].override_status.is_none());
        assert_eq!(
            state.needs[0].ingredients[0].status(),
            FulfillmentStatus::Order
        );
    }

    #[test]
    fn test_ordering_twice_accumulates_one_line() {
        let mut state = kitchen_state();

        apply_status_change(&mut state, "r1", "i3", FulfillmentStatus::Order);
        apply_status_change(&mut state, "r1", "i3", FulfillmentStatus::Order);

        assert_eq!(state.shopping_list.len(), 1);
        assert_eq!(state.shopping_list[0].quantity, 48.0);
    }
}
