//! Method type inference for the strix compiler.
//!
//! Given a call `M(E1..Em)` to a generic method `M<X1..Xn>(T1 x1 .. Tm xm)`
//! with no explicit type arguments, this crate infers a unique type for each
//! `Xi` or reports failure. The result feeds overload resolution; failure
//! disqualifies the candidate without being an error by itself.
//!
//! The algorithm is a two-phase fixed point. Phase one collects exact, lower,
//! and upper bounds from the typed arguments. Phase two alternates between
//! output-type inference for anonymous-function and method-group arguments
//! and fixing unfixed type parameters in dependency order, until every
//! parameter is fixed or no further progress is possible.
//!
//! Module map:
//! - `argument` - the bound-argument variants the engine dispatches on
//! - `host` - the collaborator trait (conversion oracle, method-group
//!   resolver, lambda return analyzer)
//! - `default_host` - an in-tree collaborator with a structural conversion
//!   classifier, used by tests and simple embedders
//! - `engine` - inferrer state, entry points, result extraction
//! - `bounds`, `dependency`, `rules`, `phases`, `fixing` - the engine's
//!   internals, split the way the checker splits its state methods

pub mod argument;
pub mod default_host;
pub mod engine;
pub mod host;

mod bounds;
mod dependency;
mod fixing;
mod phases;
mod rules;

pub use argument::{BoundArgument, LambdaId, MethodGroup, MethodGroupId, UnboundLambda};
pub use default_host::{DefaultHost, LambdaBody, MethodSignature};
pub use engine::{TypeInferenceResult, infer_from_first_argument, infer_type_arguments};
pub use host::InferenceHost;

#[cfg(test)]
mod tests;
