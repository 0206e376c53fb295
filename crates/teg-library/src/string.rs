//! Builtin string functions.

use teg_core::VariableValue;

use crate::registry::{text, FunctionRegistry, ParamKind};

const S: ParamKind = ParamKind::String;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("len", &[S], ParamKind::Integer, |_, args| {
        Ok(VariableValue::Integer(text(args, 0).chars().count() as i64))
    });

    registry.register("upper", &[S], S, |_, args| {
        Ok(VariableValue::String(text(args, 0).to_uppercase()))
    });

    registry.register("lower", &[S], S, |_, args| {
        Ok(VariableValue::String(text(args, 0).to_lowercase()))
    });

    registry.register("contains", &[S, S], ParamKind::Boolean, |_, args| {
        Ok(VariableValue::Boolean(text(args, 0).contains(text(args, 1))))
    });
}
