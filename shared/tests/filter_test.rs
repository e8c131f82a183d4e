//! Tests for the strategy filter engine

#[cfg(test)]
mod tests {
    use shared::classifier::{Classifier, ClassifierKey, MemoryDepth};
    use shared::filter::{
        filter_collection, parse_bool_token, passes, ComparisonKind, CriterionName, FilterError,
        FilterSet,
    };

    fn memory_one_stochastic() -> Classifier {
        Classifier::new(MemoryDepth::Finite(1)).stochastic()
    }

    fn filters<'a>(pairs: &[(&'a str, &'a str)]) -> FilterSet {
        FilterSet::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_empty_filterset_always_passes() {
        let empty = FilterSet::new();
        assert!(passes(&memory_one_stochastic(), &empty).unwrap());
        assert!(passes(&Classifier::new(MemoryDepth::Infinite), &empty).unwrap());
        // even a record with no attributes at all
        assert!(passes(&Classifier::default(), &empty).unwrap());
    }

    #[test]
    fn test_boolean_string_and_native_agree() {
        let keys = [
            "stochastic",
            "long_run_time",
            "manipulates_state",
            "manipulates_source",
            "inspects_source",
        ];
        let strategies = [
            Classifier::new(MemoryDepth::Finite(0)),
            Classifier::new(MemoryDepth::Finite(0))
                .stochastic()
                .long_run_time()
                .manipulates_state()
                .manipulates_source()
                .inspects_source(),
        ];

        for classifier in &strategies {
            for key in keys {
                let name: CriterionName = key.parse().unwrap();
                let actual = classifier.flag(name.classifier_key()).unwrap();
                for (token, native) in [("true", true), ("false", false)] {
                    let by_text = passes(classifier, &filters(&[(key, token)])).unwrap();
                    let mut typed = FilterSet::new();
                    typed.insert(key, native);
                    let by_native = passes(classifier, &typed).unwrap();
                    assert_eq!(by_text, actual == native, "{} = {}", key, token);
                    assert_eq!(by_text, by_native);
                }
            }
        }
    }

    #[test]
    fn test_boolean_tokens() {
        for token in ["true", "True", "TRUE", "yes", "YES", "1", " true "] {
            assert_eq!(parse_bool_token(token), Some(true), "{}", token);
        }
        for token in ["false", "False", "no", "No", "0"] {
            assert_eq!(parse_bool_token(token), Some(false), "{}", token);
        }
        for token in ["", "maybe", "2", "t", "on"] {
            assert_eq!(parse_bool_token(token), None, "{}", token);
        }
    }

    #[test]
    fn test_min_memory_depth() {
        for depth in 0..5u32 {
            let classifier = Classifier::new(MemoryDepth::Finite(depth));
            for n in -1..6i64 {
                let bound = n.to_string();
                let result = passes(&classifier, &filters(&[("min_memory_depth", bound.as_str())])).unwrap();
                assert_eq!(result, i64::from(depth) >= n, "depth {} >= {}", depth, n);
            }
        }

        let unbounded = Classifier::new(MemoryDepth::Infinite);
        for n in [0i64, 1, 200, i64::MAX] {
            let mut set = FilterSet::new();
            set.insert("min_memory_depth", n);
            assert!(passes(&unbounded, &set).unwrap());
        }
    }

    #[test]
    fn test_max_memory_depth() {
        for depth in 0..5u32 {
            let classifier = Classifier::new(MemoryDepth::Finite(depth));
            for n in -1..6i64 {
                let bound = n.to_string();
                let result = passes(&classifier, &filters(&[("max_memory_depth", bound.as_str())])).unwrap();
                assert_eq!(result, i64::from(depth) <= n, "depth {} <= {}", depth, n);
            }
        }

        let unbounded = Classifier::new(MemoryDepth::Infinite);
        for n in [0i64, 1, 200, i64::MAX] {
            let mut set = FilterSet::new();
            set.insert("max_memory_depth", n);
            assert!(!passes(&unbounded, &set).unwrap());
        }
    }

    #[test]
    fn test_makes_use_of_membership() {
        let uses_both = Classifier::new(MemoryDepth::Infinite).uses(["game", "length"]);
        let uses_none = memory_one_stochastic();

        assert!(passes(&uses_both, &filters(&[("makes_use_of", "game")])).unwrap());
        assert!(passes(&uses_both, &filters(&[("makes_use_of", "length")])).unwrap());
        assert!(!passes(&uses_both, &filters(&[("makes_use_of", "noise")])).unwrap());
        assert!(!passes(&uses_none, &filters(&[("makes_use_of", "game")])).unwrap());
    }

    #[test]
    fn test_repeated_makes_use_of_requires_all() {
        let uses_game = Classifier::new(MemoryDepth::Infinite).uses(["game"]);
        let both = filters(&[("makes_use_of", "game"), ("makes_use_of", "length")]);
        assert!(!passes(&uses_game, &both).unwrap());
        assert!(passes(&uses_game.clone().uses(["length"]), &both).unwrap());
    }

    #[test]
    fn test_criteria_are_combined_with_and() {
        let classifier = memory_one_stochastic();
        let both_pass = filters(&[("stochastic", "true"), ("max_memory_depth", "1")]);
        let one_fails = filters(&[("stochastic", "true"), ("min_memory_depth", "2")]);
        assert!(passes(&classifier, &both_pass).unwrap());
        assert!(!passes(&classifier, &one_fails).unwrap());
    }

    #[test]
    fn test_concrete_scenario() {
        let classifier = memory_one_stochastic();
        assert!(passes(&classifier, &filters(&[("stochastic", "True")])).unwrap());
        assert!(!passes(&classifier, &filters(&[("min_memory_depth", "3")])).unwrap());

        let uses_game = Classifier::new(MemoryDepth::Finite(1)).uses(["game", "length"]);
        assert!(passes(&uses_game, &filters(&[("makes_use_of", "game")])).unwrap());
    }

    #[test]
    fn test_unknown_criterion() {
        let err = passes(&memory_one_stochastic(), &filters(&[("not_a_real_filter", "1")])).unwrap_err();
        assert_eq!(err, FilterError::UnknownCriterion("not_a_real_filter".to_string()));
        assert_eq!(err.criterion(), "not_a_real_filter");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_unknown_criterion_fails_on_empty_collection() {
        let none: Vec<Classifier> = Vec::new();
        let result = filter_collection(&none, &filters(&[("memory", "1")]));
        assert!(matches!(result, Err(FilterError::UnknownCriterion(_))));
    }

    #[test]
    fn test_malformed_values() {
        let classifier = memory_one_stochastic();
        let cases = [
            ("min_memory_depth", "three"),
            ("max_memory_depth", "1.5"),
            ("stochastic", "maybe"),
        ];
        for (name, value) in cases {
            match passes(&classifier, &filters(&[(name, value)])) {
                Err(FilterError::MalformedCriterion { name: n, value: v, .. }) => {
                    assert_eq!(n, name);
                    assert_eq!(v, value);
                }
                other => panic!("expected malformed criterion for {}={}, got {:?}", name, value, other),
            }
        }

        let mut typed = FilterSet::new();
        typed.insert("min_memory_depth", true);
        assert!(matches!(
            passes(&classifier, &typed),
            Err(FilterError::MalformedCriterion { .. })
        ));

        let mut typed = FilterSet::new();
        typed.insert("makes_use_of", 3);
        assert!(matches!(
            passes(&classifier, &typed),
            Err(FilterError::MalformedCriterion { .. })
        ));
    }

    #[test]
    fn test_native_integer_booleans() {
        let classifier = memory_one_stochastic();
        let mut set = FilterSet::new();
        set.insert("stochastic", 1);
        assert!(passes(&classifier, &set).unwrap());

        let mut set = FilterSet::new();
        set.insert("stochastic", 7);
        assert!(passes(&classifier, &set).is_err());
    }

    #[test]
    fn test_missing_classifier_key() {
        let partial = Classifier {
            stochastic: Some(true),
            ..Classifier::default()
        };
        assert!(passes(&partial, &filters(&[("stochastic", "yes")])).unwrap());

        let err = passes(&partial, &filters(&[("min_memory_depth", "1")])).unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingClassifierKey {
                name: "min_memory_depth".to_string(),
                key: ClassifierKey::MemoryDepth,
            }
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_filter_collection_preserves_order() {
        let strategies = vec![
            Classifier::new(MemoryDepth::Finite(3)),
            Classifier::new(MemoryDepth::Finite(0)).stochastic(),
            Classifier::new(MemoryDepth::Infinite),
            Classifier::new(MemoryDepth::Finite(1)),
        ];
        let before = strategies.clone();

        let kept = filter_collection(&strategies, &filters(&[("min_memory_depth", "1")])).unwrap();
        assert_eq!(kept, vec![&strategies[0], &strategies[2], &strategies[3]]);
        assert_eq!(strategies, before);

        let all = filter_collection(&strategies, &FilterSet::new()).unwrap();
        assert_eq!(all.len(), strategies.len());
    }

    #[test]
    fn test_registry_table() {
        let expected = [
            ("stochastic", ComparisonKind::BooleanEquality, ClassifierKey::Stochastic),
            ("long_run_time", ComparisonKind::BooleanEquality, ClassifierKey::LongRunTime),
            ("manipulates_state", ComparisonKind::BooleanEquality, ClassifierKey::ManipulatesState),
            ("manipulates_source", ComparisonKind::BooleanEquality, ClassifierKey::ManipulatesSource),
            ("inspects_source", ComparisonKind::BooleanEquality, ClassifierKey::InspectsSource),
            ("min_memory_depth", ComparisonKind::GreaterOrEqual, ClassifierKey::MemoryDepth),
            ("max_memory_depth", ComparisonKind::LessOrEqual, ClassifierKey::MemoryDepth),
            ("makes_use_of", ComparisonKind::SetMembership, ClassifierKey::MakesUseOf),
        ];
        assert_eq!(CriterionName::all().count(), expected.len());
        for (name, kind, key) in expected {
            let parsed: CriterionName = name.parse().unwrap();
            assert_eq!(parsed.kind(), kind);
            assert_eq!(parsed.classifier_key(), key);
            assert_eq!(parsed.as_str(), name);
        }
    }
}
