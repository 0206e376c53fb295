//! `RunContext` — the concrete evaluation context backing one run.
//!
//! Name resolution order for reads: event parameter bindings first, then
//! declared state variables, then registry constants.  Writes go to a
//! parameter binding when one exists (parameters are untyped), otherwise to
//! the declared state variable with its tag enforced.

use rustc_hash::FxHashMap;

use teg_core::{SimRng, ValueType, VariableValue};
use teg_expr::{EvalContext, ExprError, ExprResult};
use teg_graph::StateVariable;
use teg_library::{FunctionRegistry, LibraryError};

/// One declared state variable: fixed tag plus current value.
struct TypedSlot {
    declared: ValueType,
    value:    VariableValue,
}

/// The mutable per-run evaluation context.
///
/// Created by the builder from the graph's declarations (each variable at
/// its type's default), mutated only by assignment expressions while an
/// event is being processed, and left readable for post-run inspection.
pub struct RunContext {
    variables: FxHashMap<String, TypedSlot>,
    /// Bindings for the currently dispatching event, re-bound per dispatch.
    params:    FxHashMap<String, VariableValue>,
    registry:  FunctionRegistry,
    rng:       SimRng,
}

impl RunContext {
    pub fn new(declarations: &[StateVariable], registry: FunctionRegistry, rng: SimRng) -> Self {
        let variables = declarations
            .iter()
            .map(|decl| {
                let slot = TypedSlot {
                    declared: decl.value_type,
                    value:    decl.value_type.default_value(),
                };
                (decl.name.clone(), slot)
            })
            .collect();

        Self {
            variables,
            params: FxHashMap::default(),
            registry,
            rng,
        }
    }

    /// Replace the parameter bindings for the event about to dispatch.
    ///
    /// `names` and `values` always have equal length: schedule edges are
    /// arity-checked at graph compile time and start parameters at build
    /// time.
    pub(crate) fn bind_params(&mut self, names: &[String], values: &[VariableValue]) {
        debug_assert_eq!(names.len(), values.len());
        self.params.clear();
        for (name, value) in names.iter().zip(values) {
            self.params.insert(name.clone(), value.clone());
        }
    }

    /// Read a variable for post-run inspection (parameters excluded).
    pub fn variable(&self, name: &str) -> Option<&VariableValue> {
        self.variables.get(name).map(|slot| &slot.value)
    }
}

impl EvalContext for RunContext {
    fn get_variable(&self, name: &str) -> ExprResult<VariableValue> {
        if let Some(value) = self.params.get(name) {
            return Ok(value.clone());
        }
        if let Some(slot) = self.variables.get(name) {
            return Ok(slot.value.clone());
        }
        if let Some(constant) = self.registry.constant(name) {
            return Ok(constant.clone());
        }
        Err(ExprError::VariableNotFound(name.to_owned()))
    }

    fn set_variable(&mut self, name: &str, value: VariableValue) -> ExprResult<()> {
        // Parameter bindings shadow state variables and carry no declared
        // tag, so they may be rebound freely.
        if let Some(bound) = self.params.get_mut(name) {
            *bound = value;
            return Ok(());
        }

        let Some(slot) = self.variables.get_mut(name) else {
            return Err(ExprError::VariableNotFound(name.to_owned()));
        };

        let got = value.value_type();
        slot.value = match (slot.declared, got) {
            _ if slot.declared == got => value,
            // The one allowed promotion: an integer result stored in a
            // double-declared variable.
            (ValueType::Double, ValueType::Integer) => match value {
                VariableValue::Integer(i) => VariableValue::Double(i as f64),
                _ => unreachable!("tag said Integer"),
            },
            _ => {
                return Err(ExprError::AssignTypeMismatch {
                    name:     name.to_owned(),
                    expected: slot.declared,
                    got,
                });
            }
        };
        Ok(())
    }

    fn call_function(&mut self, name: &str, args: &[VariableValue]) -> ExprResult<VariableValue> {
        self.registry
            .call(name, args, &mut self.rng)
            .map_err(|e| match e {
                LibraryError::NotFound(name) => ExprError::FunctionNotFound(name),
                other => ExprError::ArgumentMismatch {
                    name:    name.to_owned(),
                    message: other.to_string(),
                },
            })
    }
}
