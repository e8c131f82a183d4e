//! Tests for request validation and response shaping

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::catalog::{StrategyCatalog, StrategyDescriptor};
    use shared::classifier::{Classifier, MemoryDepth};
    use shared::models::{DefinitionPayload, StrategyView};
    use shared::ContestKind;

    fn payload(value: serde_json::Value) -> DefinitionPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_strategy_view_fields() {
        let strategy = StrategyDescriptor::new(
            "Test Strategy",
            "test object for serializer testing",
            Classifier::new(MemoryDepth::Finite(1)),
        )
        .with_params(json!({ "rate": 0.5 }));

        let view = serde_json::to_value(StrategyView::new(&strategy, "http://testserver")).unwrap();
        for key in ["url", "id", "name", "description", "classifier", "params"] {
            assert!(view.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(view["url"], json!("http://testserver/strategies/teststrategy/"));
        assert_eq!(view["params"], json!({ "rate": 0.5 }));
    }

    #[test]
    fn test_strategy_view_handles_infinite_memory_depth() {
        let strategy = StrategyDescriptor::new("Grudger", "", Classifier::new(MemoryDepth::Infinite))
            .with_params(json!({ "memory_depth": "infinity" }));
        let view = serde_json::to_value(StrategyView::new(&strategy, "http://testserver")).unwrap();
        assert_eq!(view["classifier"]["memory_depth"], json!(-1));
        assert_eq!(view["params"]["memory_depth"], json!(-1));
    }

    #[test]
    fn test_valid_tournament_definition() {
        let definition = payload(json!({
            "name": "weekly",
            "turns": 200,
            "noise": 0.05,
            "repetitions": 10,
            "with_morality": false,
            "player_list": [" titfortat ", "defector", "cooperator"]
        }))
        .validate(ContestKind::Tournament)
        .unwrap();

        assert_eq!(definition.player_list, vec!["titfortat", "defector", "cooperator"]);
        let request = definition.simulation_request();
        assert_eq!(request.repetitions, Some(10));
        assert_eq!(request.mode, None);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let errors = payload(json!({})).validate(ContestKind::Tournament).unwrap_err();
        let fields: Vec<&str> = errors.0.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["noise", "player_list", "repetitions", "turns", "with_morality"]);
        assert_eq!(errors.0["turns"], vec!["This field is required."]);
    }

    #[test]
    fn test_match_requires_exactly_two_players() {
        let three = payload(json!({
            "turns": 10, "noise": 0.0,
            "player_list": ["cooperator", "defector", "grudger"]
        }));
        let errors = three.validate(ContestKind::Match).unwrap_err();
        assert_eq!(errors.0["player_list"], vec!["Ensure this field has no more than 2 elements."]);

        let one = payload(json!({ "turns": 10, "noise": 0.0, "player_list": ["cooperator"] }));
        assert!(one.validate(ContestKind::Match).is_err());

        let two = payload(json!({ "turns": 10, "noise": 0.0, "player_list": ["cooperator", "defector"] }));
        let definition = two.validate(ContestKind::Match).unwrap();
        assert_eq!(definition.repetitions, None);
    }

    #[test]
    fn test_moran_mode_and_noise_bounds() {
        let bad = payload(json!({
            "turns": 10, "noise": 1.5, "mode": "xx",
            "player_list": ["cooperator", "defector"]
        }));
        let errors = bad.validate(ContestKind::Moran).unwrap_err();
        assert_eq!(errors.0["mode"], vec!["\"xx\" is not a valid choice."]);
        assert_eq!(errors.0["noise"], vec!["Ensure this value is between 0 and 1."]);

        let good = payload(json!({
            "turns": 10, "noise": 0.1, "mode": "db",
            "player_list": ["cooperator", "defector", "random"]
        }));
        assert_eq!(good.validate(ContestKind::Moran).unwrap().mode.as_deref(), Some("db"));
    }

    #[test]
    fn test_builtin_players_validate() {
        let catalog = StrategyCatalog::builtin();
        let definition = payload(json!({
            "turns": 5, "noise": 0.0, "player_list": ["titfortat", "alternator"]
        }))
        .validate(ContestKind::Match)
        .unwrap();
        assert!(catalog.resolve_players(&definition.player_list).is_ok());
    }
}
