//! Unit tests for the expression engine.

use rustc_hash::FxHashMap;

use teg_core::{ValueError, VariableValue};

use crate::{parse, BinaryOp, EvalContext, Expr, ExprCache, ExprError, ExprResult};

// ── Test context ──────────────────────────────────────────────────────────────

/// Untyped map-backed context with a call log, for observing evaluation order
/// and side effects.
#[derive(Default)]
struct MapContext {
    vars:  FxHashMap<String, VariableValue>,
    calls: Vec<String>,
}

impl MapContext {
    fn with_var(name: &str, value: impl Into<VariableValue>) -> Self {
        let mut ctx = Self::default();
        ctx.vars.insert(name.to_owned(), value.into());
        ctx
    }
}

impl EvalContext for MapContext {
    fn get_variable(&self, name: &str) -> ExprResult<VariableValue> {
        self.vars
            .get(name)
            .cloned()
            .ok_or_else(|| ExprError::VariableNotFound(name.to_owned()))
    }

    fn set_variable(&mut self, name: &str, value: VariableValue) -> ExprResult<()> {
        self.vars.insert(name.to_owned(), value);
        Ok(())
    }

    fn call_function(&mut self, name: &str, args: &[VariableValue]) -> ExprResult<VariableValue> {
        self.calls.push(name.to_owned());
        match name {
            "two"  => Ok(VariableValue::Integer(2)),
            "bump" => Ok(VariableValue::Boolean(true)),
            "sum"  => {
                let mut total = VariableValue::Integer(0);
                for arg in args {
                    total = total.add(arg).map_err(|e| ExprError::Value {
                        node:   format!("sum arg {arg}"),
                        source: e,
                    })?;
                }
                Ok(total)
            }
            _ => Err(ExprError::FunctionNotFound(name.to_owned())),
        }
    }
}

fn eval(text: &str, ctx: &mut MapContext) -> ExprResult<VariableValue> {
    parse(text).unwrap_or_else(|e| panic!("parse `{text}`: {e}")).evaluate(ctx)
}

fn eval_ok(text: &str, ctx: &mut MapContext) -> VariableValue {
    eval(text, ctx).unwrap_or_else(|e| panic!("evaluate `{text}`: {e}"))
}

// ── Tokenizer ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tokenizer {
    use teg_core::VariableValue;

    use crate::token::{tokenize, Token};
    use crate::ExprError;

    fn kinds(text: &str) -> Vec<Token> {
        tokenize(text).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn operators_and_symbols() {
        assert_eq!(
            kinds("a_1 + bee*( c )"),
            vec![
                Token::Symbol("a_1".into()),
                Token::Plus,
                Token::Symbol("bee".into()),
                Token::Star,
                Token::LeftParen,
                Token::Symbol("c".into()),
                Token::RightParen,
                Token::End,
            ]
        );
    }

    #[test]
    fn two_character_operators_bind_greedily() {
        assert_eq!(
            kinds("== = != ! <= < >= > && & || |"),
            vec![
                Token::Equal,
                Token::Assign,
                Token::NotEqual,
                Token::Not,
                Token::LessEqual,
                Token::Less,
                Token::GreaterEqual,
                Token::Greater,
                Token::CondAnd,
                Token::And,
                Token::CondOr,
                Token::Or,
                Token::End,
            ]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(
            kinds("42 3.5 0.0"),
            vec![
                Token::Value(VariableValue::Integer(42)),
                Token::Value(VariableValue::Double(3.5)),
                Token::Value(VariableValue::Double(0.0)),
                Token::End,
            ]
        );
    }

    #[test]
    fn boolean_words_are_literals() {
        assert_eq!(
            kinds("true false truthy"),
            vec![
                Token::Value(VariableValue::Boolean(true)),
                Token::Value(VariableValue::Boolean(false)),
                Token::Symbol("truthy".into()),
                Token::End,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            kinds(r#""a\tb\n\"q\"\\""#),
            vec![
                Token::Value(VariableValue::String("a\tb\n\"q\"\\".into())),
                Token::End,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_syntax_error() {
        let err = tokenize("\"oops").unwrap_err();
        assert!(matches!(err, ExprError::Syntax { .. }), "got {err:?}");
    }

    #[test]
    fn unknown_escape_is_syntax_error() {
        assert!(tokenize(r#""\q""#).is_err());
    }

    #[test]
    fn unrecognized_character_is_syntax_error() {
        let err = tokenize("1 # 2").unwrap_err();
        match err {
            ExprError::Syntax { offset, .. } => assert_eq!(offset, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_yields_just_end() {
        assert_eq!(kinds("  \t "), vec![Token::End]);
    }
}

// ── Parser ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod parser {
    use super::*;

    #[test]
    fn precedence_mul_over_add() {
        // 1 + 2 * 3 must parse as 1 + (2 * 3)
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(expr.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn precedence_relational_over_logical() {
        let expr = parse("a < 1 && b > 2").unwrap();
        assert_eq!(expr.to_string(), "((a < 1) && (b > 2))");
    }

    #[test]
    fn left_associative_additive() {
        let expr = parse("1 - 2 - 3").unwrap();
        assert_eq!(expr.to_string(), "((1 - 2) - 3)");
    }

    #[test]
    fn unary_right_associative() {
        let expr = parse("--3").unwrap();
        assert_eq!(expr.to_string(), "--3");
        let expr = parse("!!x").unwrap();
        assert_eq!(expr.to_string(), "!!x");
    }

    #[test]
    fn assignment_requires_symbol_equals() {
        let expr = parse("x = 1 + 2").unwrap();
        match &expr {
            Expr::Binary { op: BinaryOp::Assign, lhs, .. } => {
                assert_eq!(**lhs, Expr::Variable("x".into()));
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn equality_is_not_assignment() {
        // One-token lookahead must back off fully: `x == 1` is equality.
        let expr = parse("x == 1").unwrap();
        assert_eq!(expr.to_string(), "(x == 1)");
    }

    #[test]
    fn bare_symbol_backtracks_to_variable() {
        assert_eq!(parse("x").unwrap(), Expr::Variable("x".into()));
    }

    #[test]
    fn chained_assignment_is_right_associative() {
        let expr = parse("a = b = 1").unwrap();
        assert_eq!(expr.to_string(), "(a = (b = 1))");
    }

    #[test]
    fn function_calls() {
        let expr = parse("max(1, x + 2)").unwrap();
        assert_eq!(expr.to_string(), "max(1, (x + 2))");
        let expr = parse("now()").unwrap();
        assert_eq!(expr.to_string(), "now()");
    }

    #[test]
    fn parenthesized_subexpression() {
        let expr = parse("(1 + 2) * 3").unwrap();
        assert_eq!(expr.to_string(), "((1 + 2) * 3)");
    }

    #[test]
    fn trailing_tokens_are_syntax_error() {
        assert!(matches!(parse("1 + 2 3"), Err(ExprError::Syntax { .. })));
        assert!(matches!(parse("x = "), Err(ExprError::Syntax { .. })));
    }

    #[test]
    fn bad_leaf_is_syntax_error() {
        assert!(parse("* 2").is_err());
        assert!(parse("(1 + 2").is_err());
        assert!(parse("f(1,)").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn identical_text_yields_identical_ast() {
        let a = parse("q = q + 1 && serve(q, 2.5)").unwrap();
        let b = parse("q = q + 1 && serve(q, 2.5)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cache_shares_parsed_trees() {
        let mut cache = ExprCache::new();
        let a = cache.parse("x + 1").unwrap();
        let b = cache.parse("x + 1").unwrap();
        assert!(std::sync::Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        cache.parse("x + 2").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_propagates_syntax_errors() {
        let mut cache = ExprCache::new();
        assert!(cache.parse("1 +").is_err());
        assert!(cache.is_empty());
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod evaluator {
    use super::*;

    #[test]
    fn arithmetic_with_variables() {
        let mut ctx = MapContext::with_var("x", 10i64);
        assert_eq!(eval_ok("x * 2 + 1", &mut ctx), VariableValue::Integer(21));
        assert_eq!(eval_ok("x / 4", &mut ctx), VariableValue::Integer(2));
        assert_eq!(eval_ok("x / 4.0", &mut ctx), VariableValue::Double(2.5));
    }

    #[test]
    fn assignment_writes_and_yields_value() {
        let mut ctx = MapContext::with_var("x", 0i64);
        let result = eval_ok("x = 5 + 2", &mut ctx);
        assert_eq!(result, VariableValue::Integer(7));
        assert_eq!(ctx.vars["x"], VariableValue::Integer(7));
    }

    #[test]
    fn comparison_chain() {
        let mut ctx = MapContext::with_var("q", 3i64);
        assert_eq!(eval_ok("q >= 3", &mut ctx), VariableValue::Boolean(true));
        assert_eq!(eval_ok("q < 3", &mut ctx), VariableValue::Boolean(false));
        assert_eq!(eval_ok("q != 2", &mut ctx), VariableValue::Boolean(true));
    }

    #[test]
    fn call_dispatches_with_evaluated_args() {
        let mut ctx = MapContext::with_var("x", 4i64);
        assert_eq!(eval_ok("sum(1, x, two())", &mut ctx), VariableValue::Integer(7));
        assert_eq!(ctx.calls, vec!["two", "sum"]); // inner call first
    }

    #[test]
    fn short_circuit_and_skips_rhs() {
        let mut ctx = MapContext::default();
        let result = eval_ok("false && bump()", &mut ctx);
        assert_eq!(result, VariableValue::Boolean(false));
        assert!(ctx.calls.is_empty(), "rhs must not run: {:?}", ctx.calls);
    }

    #[test]
    fn short_circuit_or_skips_rhs() {
        let mut ctx = MapContext::default();
        let result = eval_ok("true || bump()", &mut ctx);
        assert_eq!(result, VariableValue::Boolean(true));
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn short_circuit_runs_rhs_when_needed() {
        let mut ctx = MapContext::default();
        assert_eq!(eval_ok("true && bump()", &mut ctx), VariableValue::Boolean(true));
        assert_eq!(ctx.calls, vec!["bump"]);
    }

    #[test]
    fn short_circuit_suppresses_rhs_side_effects() {
        // The right operand is an assignment; it must not execute.
        let mut ctx = MapContext::with_var("x", 0i64);
        eval_ok("false && (x = 1)", &mut ctx);
        assert_eq!(ctx.vars["x"], VariableValue::Integer(0));
    }

    #[test]
    fn eager_logical_evaluates_both_sides() {
        let mut ctx = MapContext::default();
        assert_eq!(eval_ok("false & bump()", &mut ctx), VariableValue::Boolean(false));
        assert_eq!(ctx.calls, vec!["bump"]);

        let mut ctx = MapContext::default();
        assert_eq!(eval_ok("true | bump()", &mut ctx), VariableValue::Boolean(true));
        assert_eq!(ctx.calls, vec!["bump"]);
    }

    #[test]
    fn numeric_truthiness_in_conditions() {
        let mut ctx = MapContext::with_var("server", 1i64);
        assert_eq!(eval_ok("server && true", &mut ctx), VariableValue::Boolean(true));
        ctx.vars.insert("server".into(), VariableValue::Integer(0));
        assert_eq!(eval_ok("server || false", &mut ctx), VariableValue::Boolean(false));
    }

    #[test]
    fn unknown_names_fail() {
        let mut ctx = MapContext::default();
        assert_eq!(
            eval("nope", &mut ctx),
            Err(ExprError::VariableNotFound("nope".into()))
        );
        assert_eq!(
            eval("nope()", &mut ctx),
            Err(ExprError::FunctionNotFound("nope".into()))
        );
    }

    #[test]
    fn value_errors_identify_the_failing_node() {
        let mut ctx = MapContext::with_var("flag", true);
        let err = eval("1 + (flag + 1)", &mut ctx).unwrap_err();
        match err {
            ExprError::Value { node, source } => {
                // The inner addition failed, not the outer one.
                assert_eq!(node, "(flag + 1)");
                assert!(matches!(source, ValueError::TypeMismatch { op: "+", .. }));
            }
            other => panic!("expected node-scoped value error, got {other:?}"),
        }
    }

    #[test]
    fn integer_division_by_zero_is_node_scoped() {
        let mut ctx = MapContext::default();
        let err = eval("10 / 0", &mut ctx).unwrap_err();
        match err {
            ExprError::Value { node, source } => {
                assert_eq!(node, "(10 / 0)");
                assert_eq!(source, ValueError::DivisionByZero);
            }
            other => panic!("expected value error, got {other:?}"),
        }
    }

    #[test]
    fn double_division_by_zero_is_fine() {
        let mut ctx = MapContext::default();
        assert_eq!(
            eval_ok("1.0 / 0.0", &mut ctx),
            VariableValue::Double(f64::INFINITY)
        );
    }

    #[test]
    fn string_truthiness_fails_in_condition() {
        let mut ctx = MapContext::with_var("s", "hello");
        assert!(eval("s && true", &mut ctx).is_err());
    }

    #[test]
    fn hand_built_bad_assignment_target_is_caught() {
        let expr = Expr::Binary {
            op:  BinaryOp::Assign,
            lhs: Box::new(Expr::Value(VariableValue::Integer(1))),
            rhs: Box::new(Expr::Value(VariableValue::Integer(2))),
        };
        let mut ctx = MapContext::default();
        assert!(matches!(
            expr.evaluate(&mut ctx),
            Err(ExprError::InvalidAssignmentTarget { .. })
        ));
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let mut ctx = MapContext::with_var("x", 2i64);
        let expr = parse("x * 3 + 1").unwrap();
        let first = expr.evaluate(&mut ctx).unwrap();
        for _ in 0..10 {
            assert_eq!(expr.evaluate(&mut ctx).unwrap(), first);
        }
    }
}
