//! Builtin math functions.
//!
//! `abs`, `min`, and `max` are closed over integers: all-Integer inputs give
//! an Integer back.  The transcendental functions always return Double.

use teg_core::VariableValue;

use crate::registry::{num, FunctionRegistry, ParamKind};

const N: ParamKind = ParamKind::Numeric;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("abs", &[N], N, |_, args| {
        Ok(match &args[0] {
            VariableValue::Integer(v) => VariableValue::Integer(v.wrapping_abs()),
            _ => VariableValue::Double(num(args, 0).abs()),
        })
    });

    registry.register("min", &[N, N], N, |_, args| Ok(pick(args, false)));
    registry.register("max", &[N, N], N, |_, args| Ok(pick(args, true)));

    registry.register("sqrt", &[N], N, |_, args| {
        Ok(VariableValue::Double(num(args, 0).sqrt()))
    });

    registry.register("pow", &[N, N], N, |_, args| {
        Ok(VariableValue::Double(num(args, 0).powf(num(args, 1))))
    });

    registry.register("exp", &[N], N, |_, args| {
        Ok(VariableValue::Double(num(args, 0).exp()))
    });

    registry.register("ln", &[N], N, |_, args| {
        Ok(VariableValue::Double(num(args, 0).ln()))
    });

    registry.register("floor", &[N], N, |_, args| {
        Ok(match &args[0] {
            VariableValue::Integer(v) => VariableValue::Integer(*v),
            _ => VariableValue::Double(num(args, 0).floor()),
        })
    });

    registry.register("ceil", &[N], N, |_, args| {
        Ok(match &args[0] {
            VariableValue::Integer(v) => VariableValue::Integer(*v),
            _ => VariableValue::Double(num(args, 0).ceil()),
        })
    });

    registry.register("round", &[N], N, |_, args| {
        Ok(match &args[0] {
            VariableValue::Integer(v) => VariableValue::Integer(*v),
            _ => VariableValue::Double(num(args, 0).round()),
        })
    });
}

/// min/max preserving the Integer tag when both operands carry it.
fn pick(args: &[VariableValue], want_max: bool) -> VariableValue {
    use VariableValue::{Double, Integer};
    match (&args[0], &args[1]) {
        (Integer(a), Integer(b)) => {
            Integer(if want_max { *a.max(b) } else { *a.min(b) })
        }
        _ => {
            let (a, b) = (num(args, 0), num(args, 1));
            Double(if want_max { a.max(b) } else { a.min(b) })
        }
    }
}
