//! Builtin random-variate functions.
//!
//! All draws flow through the run's `SimRng`, so a fixed seed reproduces the
//! exact variate sequence.  Distribution parameters are validated here and
//! rejected as `InvalidArgument` — never panicked on — because they arrive
//! from model expressions, not from code.

use rand_distr::{Bernoulli, Distribution, Exp, Normal, Triangular};

use teg_core::VariableValue;

use crate::error::LibraryError;
use crate::registry::{int, num, FunctionRegistry, ParamKind};

const N: ParamKind = ParamKind::Numeric;
const I: ParamKind = ParamKind::Integer;

fn invalid(name: &str, message: impl Into<String>) -> LibraryError {
    LibraryError::InvalidArgument {
        name:    name.to_owned(),
        message: message.into(),
    }
}

pub fn register(registry: &mut FunctionRegistry) {
    // uniform(lo, hi): Double in [lo, hi)
    registry.register("uniform", &[N, N], N, |rng, args| {
        let (lo, hi) = (num(args, 0), num(args, 1));
        if !(lo < hi) {
            return Err(invalid("uniform", format!("empty range [{lo}, {hi})")));
        }
        Ok(VariableValue::Double(rng.gen_range(lo..hi)))
    });

    // exponential(mean): Double >= 0 with the given mean
    registry.register("exponential", &[N], N, |rng, args| {
        let mean = num(args, 0);
        if !(mean > 0.0) {
            return Err(invalid("exponential", format!("mean must be positive, got {mean}")));
        }
        let dist = Exp::new(1.0 / mean)
            .map_err(|e| invalid("exponential", e.to_string()))?;
        Ok(VariableValue::Double(dist.sample(rng.inner())))
    });

    // normal(mean, std): Double
    registry.register("normal", &[N, N], N, |rng, args| {
        let dist = Normal::new(num(args, 0), num(args, 1))
            .map_err(|e| invalid("normal", e.to_string()))?;
        Ok(VariableValue::Double(dist.sample(rng.inner())))
    });

    // triangular(lo, mode, hi): Double
    registry.register("triangular", &[N, N, N], N, |rng, args| {
        let dist = Triangular::new(num(args, 0), num(args, 2), num(args, 1))
            .map_err(|e| invalid("triangular", e.to_string()))?;
        Ok(VariableValue::Double(dist.sample(rng.inner())))
    });

    // bernoulli(p): Boolean, true with probability p
    registry.register("bernoulli", &[N], ParamKind::Boolean, |rng, args| {
        let dist = Bernoulli::new(num(args, 0))
            .map_err(|e| invalid("bernoulli", e.to_string()))?;
        Ok(VariableValue::Boolean(dist.sample(rng.inner())))
    });

    // randint(lo, hi): Integer uniform in [lo, hi] inclusive
    registry.register("randint", &[I, I], I, |rng, args| {
        let (lo, hi) = (int(args, 0), int(args, 1));
        if lo > hi {
            return Err(invalid("randint", format!("empty range [{lo}, {hi}]")));
        }
        Ok(VariableValue::Integer(rng.gen_range(lo..=hi)))
    });
}
