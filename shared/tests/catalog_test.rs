//! Tests for the strategy catalog

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::catalog::{strategy_id, CatalogError, StrategyCatalog, StrategyDescriptor};
    use shared::classifier::{Classifier, MemoryDepth};
    use shared::filter::{FilterError, FilterSet};

    #[test]
    fn test_strategy_id_derivation() {
        assert_eq!(strategy_id("Tit For Tat"), "titfortat");
        assert_eq!(strategy_id("Test One"), "testone");
        assert_eq!(strategy_id("ZD-GTFT-2"), "zd-gtft-2");
    }

    #[test]
    fn test_builtin_catalog_lookup() {
        let catalog = StrategyCatalog::builtin();
        assert!(!catalog.is_empty());

        let tft = catalog.get("titfortat").expect("tit for tat is builtin");
        assert_eq!(tft.name, "Tit For Tat");
        assert_eq!(tft.classifier.memory_depth, Some(MemoryDepth::Finite(1)));
        assert!(catalog.get("grudger").is_some());
        assert!(catalog.get("notfound").is_none());
    }

    #[test]
    fn test_builtin_catalog_filtering() {
        let catalog = StrategyCatalog::builtin();

        let stochastic = catalog
            .filtered(&FilterSet::from_pairs([("stochastic", "true")]))
            .unwrap();
        assert!(!stochastic.is_empty());
        assert!(stochastic.iter().all(|s| s.classifier.stochastic == Some(true)));
        assert!(stochastic.iter().any(|s| s.id == "random"));

        let memory_one = catalog
            .filtered(&FilterSet::from_pairs([("min_memory_depth", "1"), ("max_memory_depth", "1")]))
            .unwrap();
        let ids: Vec<&str> = memory_one.iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"titfortat"));
        assert!(!ids.contains(&"grudger"));
        assert!(!ids.contains(&"cooperator"));

        let err = catalog
            .filtered(&FilterSet::from_pairs([("colour", "red")]))
            .unwrap_err();
        assert_eq!(err, FilterError::UnknownCriterion("colour".into()));
    }

    #[test]
    fn test_resolve_players_reports_first_unknown() {
        let catalog = StrategyCatalog::builtin();
        let players = catalog.resolve_players(&["cooperator", "defector"]).unwrap();
        assert_eq!(players[0].name, "Cooperator");
        assert_eq!(players[1].name, "Defector");

        match catalog.resolve_players(&["cooperator", "nobody", "ghost"]) {
            Err(CatalogError::UnknownStrategy(id)) => assert_eq!(id, "nobody"),
            other => panic!("expected unknown strategy, got {:?}", other),
        }
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut catalog = StrategyCatalog::new();
        let descriptor = StrategyDescriptor::new("Test One", "first", Classifier::new(MemoryDepth::Finite(1)));
        catalog.register(descriptor.clone()).unwrap();
        assert!(matches!(
            catalog.register(descriptor),
            Err(CatalogError::DuplicateStrategy(id)) if id == "testone"
        ));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_from_json_export() {
        let export = json!([
            {
                "name": "Test One",
                "description": "first test strategy",
                "classifier": { "stochastic": true, "memory_depth": 1, "makes_use_of": [] },
                "params": { "rate": 0.5 }
            },
            {
                "name": "Test Two",
                "classifier": { "stochastic": false, "memory_depth": "infinity", "makes_use_of": ["game"] }
            }
        ]);
        let catalog = StrategyCatalog::from_json_str(&export.to_string()).unwrap();
        assert_eq!(catalog.len(), 2);

        let one = catalog.get("testone").unwrap();
        assert_eq!(one.params, json!({ "rate": 0.5 }));
        let two = catalog.get("testtwo").unwrap();
        assert_eq!(two.classifier.memory_depth, Some(MemoryDepth::Infinite));
        assert_eq!(two.params, json!({}));

        let uses_game = catalog
            .filtered(&FilterSet::from_pairs([("makes_use_of", "game")]))
            .unwrap();
        assert_eq!(uses_game.len(), 1);
        assert_eq!(uses_game[0].id, "testtwo");
    }

    #[test]
    fn test_catalog_from_missing_file() {
        let err = StrategyCatalog::from_json_file("/nonexistent/strategies.json").unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
