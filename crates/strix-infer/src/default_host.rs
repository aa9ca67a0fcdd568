//! An in-tree collaborator implementation.
//!
//! `DefaultHost` provides a structural implicit-conversion classifier plus
//! registries mapping lambda and method-group handles to resolvable shapes.
//! The product frontend supplies its own host; this one backs the test
//! suites and simple embedders.

use rustc_hash::{FxHashMap, FxHashSet};

use strix_common::{Diagnostic, diagnostic_codes};
use strix_types::predicates::{
    all_interfaces_of, array_element_info, base_type_of, is_really_a_type, is_reference_type,
    named_parts, nullable_underlying, tuple_elements, variance_of,
};
use strix_types::{
    DefId, DelegateParam, DelegateShape, TypeArgs, TypeId, TypeInterner, Variance,
    equal_ignoring_dynamic_and_tuple_names, type_to_string,
};

use crate::argument::{LambdaId, MethodGroup, MethodGroupId, UnboundLambda};
use crate::host::InferenceHost;

/// How a registered lambda's body computes its return type once the delegate
/// parameter types are known.
#[derive(Clone, Copy, Debug)]
pub enum LambdaBody {
    /// The body's type does not depend on the parameters.
    Returns(TypeId),
    /// The body returns its i-th parameter unchanged.
    Parameter(usize),
}

/// One method of a registered method group.
#[derive(Clone, Debug)]
pub struct MethodSignature {
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
}

#[derive(Default)]
pub struct DefaultHost {
    lambdas: FxHashMap<LambdaId, LambdaBody>,
    groups: FxHashMap<MethodGroupId, Vec<MethodSignature>>,
    widenings: FxHashSet<(TypeId, TypeId)>,
}

impl DefaultHost {
    pub fn new() -> Self {
        let mut host = DefaultHost::default();
        host.seed_numeric_widenings();
        host
    }

    pub fn register_lambda(&mut self, id: LambdaId, body: LambdaBody) {
        self.lambdas.insert(id, body);
    }

    pub fn register_method_group(&mut self, id: MethodGroupId, methods: Vec<MethodSignature>) {
        self.groups.insert(id, methods);
    }

    fn seed_numeric_widenings(&mut self) {
        use TypeId as T;
        let pairs = [
            (T::CHAR, T::INT),
            (T::CHAR, T::UINT),
            (T::CHAR, T::LONG),
            (T::CHAR, T::ULONG),
            (T::CHAR, T::FLOAT),
            (T::CHAR, T::DOUBLE),
            (T::CHAR, T::DECIMAL),
            (T::INT, T::LONG),
            (T::INT, T::FLOAT),
            (T::INT, T::DOUBLE),
            (T::INT, T::DECIMAL),
            (T::UINT, T::LONG),
            (T::UINT, T::ULONG),
            (T::UINT, T::FLOAT),
            (T::UINT, T::DOUBLE),
            (T::UINT, T::DECIMAL),
            (T::LONG, T::FLOAT),
            (T::LONG, T::DOUBLE),
            (T::LONG, T::DECIMAL),
            (T::ULONG, T::FLOAT),
            (T::ULONG, T::DOUBLE),
            (T::ULONG, T::DECIMAL),
            (T::FLOAT, T::DOUBLE),
        ];
        self.widenings.extend(pairs);
    }

    // =========================================================================
    // Conversion classification
    // =========================================================================

    fn conversion_exists(&self, types: &TypeInterner, source: TypeId, dest: TypeId) -> bool {
        if source == dest {
            return true;
        }
        if !is_really_a_type(types, source) || !is_really_a_type(types, dest) {
            return false;
        }
        // Identity ignores dynamic-ness and tuple names, so object and
        // dynamic convert to each other in both directions.
        if equal_ignoring_dynamic_and_tuple_names(types, source, dest) {
            return true;
        }
        // Reference conversion or boxing to object; everything converts
        // implicitly to dynamic.
        if dest == TypeId::OBJECT || dest == TypeId::DYNAMIC {
            return true;
        }
        if self.widenings.contains(&(source, dest)) {
            return true;
        }
        // Nullable lifting: S -> T? and S? -> T? whenever S converts to T
        // by a value conversion.
        if let Some(dest_underlying) = nullable_underlying(types, dest) {
            let source_underlying = nullable_underlying(types, source).unwrap_or(source);
            if !is_reference_type(types, source_underlying)
                && self.conversion_exists(types, source_underlying, dest_underlying)
            {
                return true;
            }
        }
        // Element-wise tuple conversion.
        if let (Some(source_elements), Some(dest_elements)) =
            (tuple_elements(types, source), tuple_elements(types, dest))
            && source_elements.len() == dest_elements.len()
            && source_elements
                .iter()
                .zip(dest_elements.iter())
                .all(|(&s, &d)| self.conversion_exists(types, s, d))
        {
            return true;
        }
        // Array covariance and the array-to-interface conversions.
        if let Some((source_element, source_rank)) = array_element_info(types, source) {
            if let Some((dest_element, dest_rank)) = array_element_info(types, dest)
                && source_rank == dest_rank
                && self.reference_convertible(types, source_element, dest_element)
            {
                return true;
            }
            if source_rank == 1
                && let Some((dest_def, dest_args)) = named_parts(types, dest)
                && types.well_known().is_array_interface(dest_def)
                && dest_args.len() == 1
                && (source_element == dest_args[0]
                    || self.reference_convertible(types, source_element, dest_args[0]))
            {
                return true;
            }
        }
        // Same-definition variance conversion.
        if let (Some((source_def, source_args)), Some((dest_def, dest_args))) =
            (named_parts(types, source), named_parts(types, dest))
            && source_def == dest_def
            && self.variance_convertible(types, source_def, &source_args, &dest_args)
        {
            return true;
        }
        // Base classes and implemented interfaces.
        let mut base = base_type_of(types, source);
        while let Some(b) = base {
            if self.conversion_exists(types, b, dest) {
                return true;
            }
            base = base_type_of(types, b);
        }
        all_interfaces_of(types, source)
            .into_iter()
            .any(|iface| iface == dest || self.conversion_exists(types, iface, dest))
    }

    fn reference_convertible(&self, types: &TypeInterner, source: TypeId, dest: TypeId) -> bool {
        is_reference_type(types, source)
            && is_reference_type(types, dest)
            && self.conversion_exists(types, source, dest)
    }

    fn variance_convertible(
        &self,
        types: &TypeInterner,
        def: DefId,
        source_args: &TypeArgs,
        dest_args: &TypeArgs,
    ) -> bool {
        if source_args.len() != dest_args.len() {
            return false;
        }
        source_args
            .iter()
            .zip(dest_args.iter())
            .enumerate()
            .all(|(i, (&s, &d))| match variance_of(types, def, i) {
                Variance::Invariant => {
                    s == d || equal_ignoring_dynamic_and_tuple_names(types, s, d)
                }
                Variance::Out => s == d || self.reference_convertible(types, s, d),
                Variance::In => s == d || self.reference_convertible(types, d, s),
            })
    }

    fn signature_display(&self, types: &TypeInterner, signature: &MethodSignature) -> String {
        let params: Vec<String> = signature
            .params
            .iter()
            .map(|&p| type_to_string(types, p))
            .collect();
        format!("({})", params.join(", "))
    }
}

impl InferenceHost for DefaultHost {
    fn implicit_conversion_exists(
        &self,
        types: &TypeInterner,
        source: TypeId,
        target: TypeId,
        _diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        self.conversion_exists(types, source, target)
    }

    fn resolve_method_group(
        &self,
        types: &TypeInterner,
        group: &MethodGroup,
        parameters: &[DelegateParam],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeId> {
        let methods = self.groups.get(&group.id)?;
        let applicable: Vec<&MethodSignature> = methods
            .iter()
            .filter(|signature| {
                signature.params.len() == parameters.len()
                    && parameters
                        .iter()
                        .zip(signature.params.iter())
                        .all(|(delegate_param, &method_param)| {
                            self.conversion_exists(types, delegate_param.ty, method_param)
                        })
            })
            .collect();
        match applicable.as_slice() {
            [single] => Some(single.return_type),
            [] => None,
            [first, second, ..] => {
                diagnostics.push(Diagnostic::error_msg(
                    diagnostic_codes::AMBIGUOUS_CALL,
                    &[
                        &self.signature_display(types, first),
                        &self.signature_display(types, second),
                    ],
                ));
                None
            }
        }
    }

    fn infer_lambda_return(
        &self,
        _types: &TypeInterner,
        lambda: &UnboundLambda,
        delegate: &DelegateShape,
        _diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeId> {
        match self.lambdas.get(&lambda.id)? {
            LambdaBody::Returns(ty) => Some(*ty),
            LambdaBody::Parameter(i) => {
                // With explicit parameter types the lambda's own declaration
                // wins over the delegate's.
                if let Some(parameter_types) = &lambda.parameter_types
                    && let Some(&ty) = parameter_types.get(*i)
                {
                    return Some(ty);
                }
                delegate.params.get(*i).map(|p| p.ty)
            }
        }
    }
}
