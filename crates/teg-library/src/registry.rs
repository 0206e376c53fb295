//! The function registration table.

use rustc_hash::FxHashMap;

use teg_core::{SimRng, ValueType, VariableValue};

use crate::error::{LibraryError, LibraryResult};

// ── ParamKind ─────────────────────────────────────────────────────────────────

/// The tag class a declared parameter accepts.  Checked against each call's
/// arguments before the function body runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParamKind {
    /// Integer or Double.
    Numeric,
    /// Integer only.
    Integer,
    /// String only.
    String,
    /// Boolean only.
    Boolean,
    /// Any tag.
    Any,
}

impl ParamKind {
    fn accepts(self, tag: ValueType) -> bool {
        match self {
            ParamKind::Numeric => tag.is_numeric(),
            ParamKind::Integer => tag == ValueType::Integer,
            ParamKind::String  => tag == ValueType::String,
            ParamKind::Boolean => tag == ValueType::Boolean,
            ParamKind::Any     => true,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ParamKind::Numeric => "numeric",
            ParamKind::Integer => "integer",
            ParamKind::String  => "string",
            ParamKind::Boolean => "boolean",
            ParamKind::Any     => "any value",
        }
    }
}

// ── FunctionRegistry ──────────────────────────────────────────────────────────

type FunctionBody = Box<dyn Fn(&mut SimRng, &[VariableValue]) -> LibraryResult<VariableValue> + Send>;

struct FunctionEntry {
    params:  Vec<ParamKind>,
    returns: ParamKind,
    body:    FunctionBody,
}

/// Name-indexed table of callable functions and read-only constants.
///
/// Built once before a run starts; holds no per-run mutable state.  The
/// run's RNG is threaded through [`call`][Self::call] so variate functions
/// stay deterministic under the run's seed.
pub struct FunctionRegistry {
    functions: FxHashMap<String, FunctionEntry>,
    constants: FxHashMap<String, VariableValue>,
}

impl FunctionRegistry {
    /// An empty registry with no functions or constants.
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
            constants: FxHashMap::default(),
        }
    }

    /// The standard library: math, string, and random-variate functions plus
    /// the constants `pi` and `e`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        crate::math::register(&mut registry);
        crate::string::register(&mut registry);
        crate::random::register(&mut registry);
        registry.register_constant("pi", VariableValue::Double(std::f64::consts::PI));
        registry.register_constant("e", VariableValue::Double(std::f64::consts::E));
        registry
    }

    /// Register a function.  Arity is `params.len()`; each argument's tag is
    /// checked against the matching [`ParamKind`] before `body` is invoked.
    /// `returns` declares the tag class the body produces (informational, for
    /// tooling via [`signature`][Self::signature]).
    ///
    /// Re-registering a name replaces the previous entry (latest wins), so
    /// applications can override builtins.
    pub fn register<F>(&mut self, name: &str, params: &[ParamKind], returns: ParamKind, body: F)
    where
        F: Fn(&mut SimRng, &[VariableValue]) -> LibraryResult<VariableValue> + Send + 'static,
    {
        self.functions.insert(
            name.to_owned(),
            FunctionEntry {
                params: params.to_vec(),
                returns,
                body: Box::new(body),
            },
        );
    }

    /// A registered function's declared signature: argument kinds and return
    /// kind.  `None` for unregistered names.
    pub fn signature(&self, name: &str) -> Option<(&[ParamKind], ParamKind)> {
        self.functions
            .get(name)
            .map(|entry| (entry.params.as_slice(), entry.returns))
    }

    /// Register a named read-only constant, visible to expressions as a
    /// variable reference.
    pub fn register_constant(&mut self, name: &str, value: VariableValue) {
        self.constants.insert(name.to_owned(), value);
    }

    pub fn constant(&self, name: &str) -> Option<&VariableValue> {
        self.constants.get(name)
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Resolve `name`, check the arguments against its declared signature,
    /// and invoke the body.
    pub fn call(
        &self,
        name: &str,
        args: &[VariableValue],
        rng:  &mut SimRng,
    ) -> LibraryResult<VariableValue> {
        let entry = self
            .functions
            .get(name)
            .ok_or_else(|| LibraryError::NotFound(name.to_owned()))?;

        if args.len() != entry.params.len() {
            return Err(LibraryError::ArityMismatch {
                name:     name.to_owned(),
                expected: entry.params.len(),
                got:      args.len(),
            });
        }
        for (i, (kind, arg)) in entry.params.iter().zip(args).enumerate() {
            if !kind.accepts(arg.value_type()) {
                return Err(LibraryError::ArgumentType {
                    name:     name.to_owned(),
                    index:    i + 1,
                    expected: kind.describe(),
                    got:      arg.value_type(),
                });
            }
        }

        (entry.body)(rng, args)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Argument accessors for function bodies ────────────────────────────────────
//
// Bodies run after the signature check, so these lookups cannot fail for a
// correctly declared function; they exist to keep bodies free of match
// boilerplate.

/// Numeric argument as f64 (Integer promoted).
pub(crate) fn num(args: &[VariableValue], i: usize) -> f64 {
    match &args[i] {
        VariableValue::Integer(v) => *v as f64,
        VariableValue::Double(v)  => *v,
        other => unreachable!("signature check admitted non-numeric {other:?}"),
    }
}

/// Integer argument.
pub(crate) fn int(args: &[VariableValue], i: usize) -> i64 {
    match &args[i] {
        VariableValue::Integer(v) => *v,
        other => unreachable!("signature check admitted non-integer {other:?}"),
    }
}

/// String argument.
pub(crate) fn text(args: &[VariableValue], i: usize) -> &str {
    match &args[i] {
        VariableValue::String(s) => s,
        other => unreachable!("signature check admitted non-string {other:?}"),
    }
}
