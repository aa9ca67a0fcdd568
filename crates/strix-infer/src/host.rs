//! The collaborator surface the engine calls into.

use strix_common::Diagnostic;
use strix_types::{DelegateParam, DelegateShape, TypeId, TypeInterner};

use crate::argument::{MethodGroup, UnboundLambda};

/// External collaborators of the inference engine: the implicit-conversion
/// oracle, the method-group resolver, and the lambda return-type analyzer.
///
/// Implementations must be side-effect free with respect to engine state;
/// use-site diagnostics go into the caller-owned sink and never alter
/// control flow. The engine calls synchronously and never retries.
///
/// Conversion-oracle contract:
/// - identity conversions ignore dynamic-ness and tuple element names, so a
///   conversion exists in both directions between `object` and `dynamic`
///   (the two are still never *equal*);
/// - error types convert to nothing and nothing converts to them.
pub trait InferenceHost {
    /// Whether an implicit conversion exists from `source` to `target`.
    fn implicit_conversion_exists(
        &self,
        types: &TypeInterner,
        source: TypeId,
        target: TypeId,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool;

    /// Pick the single best method of `group` for a delegate with the given
    /// parameters and hand back its return type. `None` when no method or
    /// more than one method fits.
    fn resolve_method_group(
        &self,
        types: &TypeInterner,
        group: &MethodGroup,
        parameters: &[DelegateParam],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeId>;

    /// The inferred return type of `lambda` when bound against `delegate`
    /// (whose parameter types already have currently-fixed type parameters
    /// substituted). `None` when the body's return type cannot be computed.
    fn infer_lambda_return(
        &self,
        types: &TypeInterner,
        lambda: &UnboundLambda,
        delegate: &DelegateShape,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeId>;
}
