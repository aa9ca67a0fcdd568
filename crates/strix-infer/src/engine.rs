//! Inferrer state and entry points.
//!
//! A `MethodTypeInferrer` is built per call site, driven once, and discarded
//! after result extraction. The phase driver, the inference rules, and the
//! fixing procedure live in sibling modules as further `impl` blocks on the
//! same state, the way the checker splits its state methods across files.

use fixedbitset::FixedBitSet;
use strix_common::Diagnostic;
use strix_types::predicates::{is_really_a_type, mentioned_type_params};
use strix_types::{RefKind, TypeId, TypeInterner};

use crate::argument::BoundArgument;
use crate::bounds::{BoundKind, BoundSet};
use crate::dependency::DependencyMatrix;
use crate::host::InferenceHost;

/// Outcome of full inference. `inferred` always has one entry per type
/// parameter; slots that could not be fixed hold an error placeholder that
/// retains the parameter's name.
#[derive(Clone, Debug)]
pub struct TypeInferenceResult {
    pub success: bool,
    pub inferred: Vec<TypeId>,
}

/// Progress of one phase-two step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InferenceProgress {
    Success,
    Failed,
    MadeProgress,
    NoProgress,
}

pub(crate) struct MethodTypeInferrer<'a, H: InferenceHost + ?Sized> {
    pub(crate) types: &'a TypeInterner,
    pub(crate) host: &'a H,
    /// The method's own type parameters, in declaration order.
    pub(crate) method_type_params: Vec<TypeId>,
    /// Fully constructed containing type of the method, for delegate
    /// substitution of enclosing-scope type parameters.
    pub(crate) containing_type: Option<TypeId>,
    /// The original, uninstantiated formal parameter types.
    pub(crate) formal_param_types: Vec<TypeId>,
    /// Pass kinds per parameter; empty means all by value.
    pub(crate) formal_param_ref_kinds: Vec<RefKind>,
    pub(crate) arguments: &'a [BoundArgument],
    pub(crate) fixed_results: Vec<Option<TypeId>>,
    pub(crate) bounds: Vec<BoundSet>,
    pub(crate) dependencies: Option<DependencyMatrix>,
}

/// Infer type arguments for a call to a generic method with no explicit type
/// arguments. `formal_parameter_types` must be the original signature; the
/// constructed `containing_type` is only consulted when substituting into
/// delegate shapes.
pub fn infer_type_arguments<H: InferenceHost + ?Sized>(
    types: &TypeInterner,
    host: &H,
    method_type_params: &[TypeId],
    containing_type: Option<TypeId>,
    formal_parameter_types: &[TypeId],
    formal_parameter_ref_kinds: &[RefKind],
    arguments: &[BoundArgument],
    diagnostics: &mut Vec<Diagnostic>,
) -> TypeInferenceResult {
    let mut inferrer = MethodTypeInferrer::new(
        types,
        host,
        method_type_params,
        containing_type,
        formal_parameter_types,
        formal_parameter_ref_kinds,
        arguments,
    );
    let success = inferrer.infer_type_args(diagnostics);
    TypeInferenceResult {
        success,
        inferred: inferrer.get_results(),
    }
}

/// Partial inference from the first argument only, for extension-method
/// probing. Fixes every type parameter mentioned in the first formal
/// parameter type; parameters not mentioned there stay `None`. Returns
/// `None` when there is no parameter or argument to work with, or when any
/// mentioned parameter cannot be fixed.
pub fn infer_from_first_argument<H: InferenceHost + ?Sized>(
    types: &TypeInterner,
    host: &H,
    method_type_params: &[TypeId],
    containing_type: Option<TypeId>,
    formal_parameter_types: &[TypeId],
    arguments: &[BoundArgument],
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Vec<Option<TypeId>>> {
    if formal_parameter_types.is_empty() || arguments.is_empty() {
        return None;
    }
    let mut inferrer = MethodTypeInferrer::new(
        types,
        host,
        method_type_params,
        containing_type,
        formal_parameter_types,
        &[],
        arguments,
    );
    if !inferrer.infer_from_first_argument(diagnostics) {
        return None;
    }
    Some(inferrer.fixed_results)
}

impl<'a, H: InferenceHost + ?Sized> MethodTypeInferrer<'a, H> {
    pub(crate) fn new(
        types: &'a TypeInterner,
        host: &'a H,
        method_type_params: &[TypeId],
        containing_type: Option<TypeId>,
        formal_parameter_types: &[TypeId],
        formal_parameter_ref_kinds: &[RefKind],
        arguments: &'a [BoundArgument],
    ) -> Self {
        let n = method_type_params.len();
        MethodTypeInferrer {
            types,
            host,
            method_type_params: method_type_params.to_vec(),
            containing_type,
            formal_param_types: formal_parameter_types.to_vec(),
            formal_param_ref_kinds: formal_parameter_ref_kinds.to_vec(),
            arguments,
            fixed_results: vec![None; n],
            bounds: (0..n).map(|_| BoundSet::default()).collect(),
            dependencies: None,
        }
    }

    fn infer_type_args(&mut self, diagnostics: &mut Vec<Diagnostic>) -> bool {
        if self.method_type_params.is_empty() {
            return true;
        }
        if self.formal_param_types.is_empty() {
            return false;
        }
        tracing::trace!(
            type_params = self.method_type_params.len(),
            args = self.arguments.len(),
            "method type inference: start"
        );
        self.infer_type_args_first_phase(diagnostics);
        self.infer_type_args_second_phase(diagnostics)
    }

    /// Partial-shape error recovery: excess arguments or parameters on
    /// either side are silently ignored.
    pub(crate) fn num_args_to_process(&self) -> usize {
        self.arguments.len().min(self.formal_param_types.len())
    }

    pub(crate) fn ref_kind_of(&self, index: usize) -> RefKind {
        if self.formal_param_ref_kinds.is_empty() {
            RefKind::Value
        } else {
            self.formal_param_ref_kinds
                .get(index)
                .copied()
                .unwrap_or(RefKind::Value)
        }
    }

    // =========================================================================
    // Fixed-result slots and bounds
    // =========================================================================

    pub(crate) fn is_unfixed(&self, index: usize) -> bool {
        self.fixed_results[index].is_none()
    }

    pub(crate) fn all_fixed(&self) -> bool {
        self.fixed_results.iter().all(|slot| slot.is_some())
    }

    pub(crate) fn has_bound(&self, index: usize) -> bool {
        self.bounds[index].has_any()
    }

    /// Index of `ty` among this method's type parameters, when it is one and
    /// is still unfixed.
    pub(crate) fn unfixed_param_index(&self, ty: TypeId) -> Option<usize> {
        let index = self
            .method_type_params
            .iter()
            .position(|&param| param == ty)?;
        self.is_unfixed(index).then_some(index)
    }

    pub(crate) fn add_bound(&mut self, kind: BoundKind, index: usize, ty: TypeId) {
        debug_assert!(self.is_unfixed(index));
        tracing::trace!(?kind, index, "add bound");
        self.bounds[index].add(kind, ty);
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// The inferred assignment, with unfixed slots replaced by error
    /// placeholders that keep the parameter's name for diagnostic quality.
    fn get_results(&self) -> Vec<TypeId> {
        self.method_type_params
            .iter()
            .enumerate()
            .map(|(i, &param)| match self.fixed_results[i] {
                Some(fixed) => fixed,
                None => {
                    let name = self
                        .types
                        .as_type_param(param)
                        .map(|pid| self.types.param_info(pid).name);
                    match name {
                        Some(name) => self.types.error_with_name(name),
                        None => TypeId::ERROR,
                    }
                }
            })
            .collect()
    }

    // =========================================================================
    // First-argument inference
    // =========================================================================

    fn infer_from_first_argument(&mut self, diagnostics: &mut Vec<Diagnostic>) -> bool {
        let arguments = self.arguments;
        let Some(source) = arguments[0].ty() else {
            return false;
        };
        if !is_really_a_type(self.types, source) {
            return false;
        }
        let dest = self.formal_param_types[0];
        self.lower_bound_inference(source, dest);

        // Every type parameter the first formal mentions must end up fixed.
        let mut mentioned = FixedBitSet::with_capacity(self.method_type_params.len());
        mentioned_type_params(self.types, dest, &self.method_type_params, &mut mentioned);
        for index in mentioned.ones() {
            if !self.has_bound(index) || !self.fix(index, diagnostics) {
                return false;
            }
        }
        true
    }
}
