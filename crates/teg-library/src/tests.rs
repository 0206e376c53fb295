//! Unit tests for the function registry and builtin modules.

use teg_core::{SimRng, ValueType, VariableValue};

use crate::{FunctionRegistry, LibraryError, ParamKind};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn call(registry: &FunctionRegistry, name: &str, args: &[VariableValue]) -> VariableValue {
    let mut rng = SimRng::new(0);
    registry
        .call(name, args, &mut rng)
        .unwrap_or_else(|e| panic!("call {name}: {e}"))
}

fn int(v: i64) -> VariableValue {
    VariableValue::Integer(v)
}

fn dbl(v: f64) -> VariableValue {
    VariableValue::Double(v)
}

// ── Registry mechanics ────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn unknown_function_not_found() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(0);
        assert_eq!(
            registry.call("nope", &[], &mut rng),
            Err(LibraryError::NotFound("nope".into()))
        );
    }

    #[test]
    fn arity_is_checked() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(0);
        assert_eq!(
            registry.call("sqrt", &[int(1), int(2)], &mut rng),
            Err(LibraryError::ArityMismatch {
                name:     "sqrt".into(),
                expected: 1,
                got:      2,
            })
        );
    }

    #[test]
    fn argument_tags_are_checked() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(0);
        let err = registry
            .call("sqrt", &[VariableValue::from("four")], &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            LibraryError::ArgumentType {
                name:     "sqrt".into(),
                index:    1,
                expected: "numeric",
                got:      ValueType::String,
            }
        );
    }

    #[test]
    fn custom_registration_and_override() {
        let mut registry = FunctionRegistry::new();
        registry.register("answer", &[], ParamKind::Integer, |_, _| Ok(int(42)));
        assert_eq!(call(&registry, "answer", &[]), int(42));

        // Latest registration wins.
        registry.register("answer", &[], ParamKind::Integer, |_, _| Ok(int(7)));
        assert_eq!(call(&registry, "answer", &[]), int(7));
    }

    #[test]
    fn signatures_are_queryable() {
        let registry = FunctionRegistry::standard();
        let (params, returns) = registry.signature("uniform").unwrap();
        assert_eq!(params, &[ParamKind::Numeric, ParamKind::Numeric]);
        assert_eq!(returns, ParamKind::Numeric);
        assert!(registry.signature("nope").is_none());
    }

    #[test]
    fn constants() {
        let registry = FunctionRegistry::standard();
        match registry.constant("pi") {
            Some(VariableValue::Double(d)) => assert!((d - std::f64::consts::PI).abs() < 1e-15),
            other => panic!("expected pi, got {other:?}"),
        }
        assert!(registry.constant("tau").is_none());
    }
}

// ── Math builtins ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod math {
    use super::*;

    #[test]
    fn abs_preserves_integer_tag() {
        let r = FunctionRegistry::standard();
        assert_eq!(call(&r, "abs", &[int(-4)]), int(4));
        assert_eq!(call(&r, "abs", &[dbl(-4.5)]), dbl(4.5));
    }

    #[test]
    fn min_max_tag_rules() {
        let r = FunctionRegistry::standard();
        assert_eq!(call(&r, "min", &[int(2), int(5)]), int(2));
        assert_eq!(call(&r, "max", &[int(2), int(5)]), int(5));
        assert_eq!(call(&r, "min", &[int(2), dbl(1.5)]), dbl(1.5));
    }

    #[test]
    fn transcendentals_return_double() {
        let r = FunctionRegistry::standard();
        assert_eq!(call(&r, "sqrt", &[int(9)]), dbl(3.0));
        assert_eq!(call(&r, "pow", &[int(2), int(10)]), dbl(1024.0));
        assert_eq!(call(&r, "ln", &[dbl(1.0)]), dbl(0.0));
        assert_eq!(call(&r, "exp", &[dbl(0.0)]), dbl(1.0));
    }

    #[test]
    fn rounding_family() {
        let r = FunctionRegistry::standard();
        assert_eq!(call(&r, "floor", &[dbl(2.7)]), dbl(2.0));
        assert_eq!(call(&r, "ceil", &[dbl(2.2)]), dbl(3.0));
        assert_eq!(call(&r, "round", &[dbl(2.5)]), dbl(3.0));
        // Integers pass through unchanged.
        assert_eq!(call(&r, "floor", &[int(3)]), int(3));
    }
}

// ── String builtins ───────────────────────────────────────────────────────────

#[cfg(test)]
mod string {
    use super::*;

    #[test]
    fn len_upper_lower_contains() {
        let r = FunctionRegistry::standard();
        assert_eq!(call(&r, "len", &[VariableValue::from("abcd")]), int(4));
        assert_eq!(
            call(&r, "upper", &[VariableValue::from("ab")]),
            VariableValue::from("AB")
        );
        assert_eq!(
            call(&r, "lower", &[VariableValue::from("AB")]),
            VariableValue::from("ab")
        );
        assert_eq!(
            call(&r, "contains", &[VariableValue::from("queue"), VariableValue::from("eu")]),
            VariableValue::Boolean(true)
        );
    }
}

// ── Random variates ───────────────────────────────────────────────────────────

#[cfg(test)]
mod random {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let registry = FunctionRegistry::standard();
        let mut r1 = SimRng::new(99);
        let mut r2 = SimRng::new(99);
        for _ in 0..50 {
            let a = registry.call("exponential", &[dbl(2.0)], &mut r1).unwrap();
            let b = registry.call("exponential", &[dbl(2.0)], &mut r2).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(1);
        for _ in 0..500 {
            match registry.call("uniform", &[dbl(2.0), dbl(3.0)], &mut rng).unwrap() {
                VariableValue::Double(d) => assert!((2.0..3.0).contains(&d)),
                other => panic!("expected double, got {other:?}"),
            }
        }
    }

    #[test]
    fn randint_is_inclusive_and_integer() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(1);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..500 {
            match registry.call("randint", &[int(1), int(3)], &mut rng).unwrap() {
                VariableValue::Integer(v) => {
                    assert!((1..=3).contains(&v));
                    seen_lo |= v == 1;
                    seen_hi |= v == 3;
                }
                other => panic!("expected integer, got {other:?}"),
            }
        }
        assert!(seen_lo && seen_hi, "bounds should both be reachable");
    }

    #[test]
    fn exponential_is_nonnegative() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(7);
        for _ in 0..200 {
            match registry.call("exponential", &[dbl(1.5)], &mut rng).unwrap() {
                VariableValue::Double(d) => assert!(d >= 0.0),
                other => panic!("expected double, got {other:?}"),
            }
        }
    }

    #[test]
    fn bernoulli_extremes() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(3);
        assert_eq!(
            registry.call("bernoulli", &[dbl(0.0)], &mut rng).unwrap(),
            VariableValue::Boolean(false)
        );
        assert_eq!(
            registry.call("bernoulli", &[dbl(1.0)], &mut rng).unwrap(),
            VariableValue::Boolean(true)
        );
    }

    #[test]
    fn bad_distribution_parameters_rejected() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(0);
        assert!(matches!(
            registry.call("uniform", &[dbl(3.0), dbl(2.0)], &mut rng),
            Err(LibraryError::InvalidArgument { .. })
        ));
        assert!(matches!(
            registry.call("exponential", &[dbl(0.0)], &mut rng),
            Err(LibraryError::InvalidArgument { .. })
        ));
        assert!(matches!(
            registry.call("normal", &[dbl(0.0), dbl(-1.0)], &mut rng),
            Err(LibraryError::InvalidArgument { .. })
        ));
        assert!(matches!(
            registry.call("randint", &[int(5), int(1)], &mut rng),
            Err(LibraryError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn argument_kind_integer_enforced_for_randint() {
        let registry = FunctionRegistry::standard();
        let mut rng = SimRng::new(0);
        assert!(matches!(
            registry.call("randint", &[dbl(1.0), int(3)], &mut rng),
            Err(LibraryError::ArgumentType { index: 1, .. })
        ));
    }
}

// ── ParamKind ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn any_kind_accepts_everything() {
        let mut registry = FunctionRegistry::new();
        registry.register("id", &[ParamKind::Any], ParamKind::Any, |_, args| Ok(args[0].clone()));
        assert_eq!(call(&registry, "id", &[VariableValue::Boolean(true)]), VariableValue::Boolean(true));
        assert_eq!(call(&registry, "id", &[VariableValue::from("s")]), VariableValue::from("s"));
        assert_eq!(call(&registry, "id", &[int(1)]), int(1));
    }
}
