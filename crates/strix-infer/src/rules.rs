//! The recursive inference rules: exact, lower-bound, and upper-bound.
//!
//! Each rule takes a `(source, target)` pair and either records a bound on an
//! unfixed type parameter or recurses structurally. Failure to match any rule
//! is silent; the caller simply learns nothing from that pair.

use strix_types::predicates::{
    all_interfaces_of, array_element_info, base_type_of, is_class, is_interface,
    is_reference_type, named_parts, nullable_underlying, tuple_elements, variance_of,
};
use strix_types::{DefKind, TypeId, Variance};

use crate::bounds::BoundKind;
use crate::engine::MethodTypeInferrer;
use crate::host::InferenceHost;

impl<'a, H: InferenceHost + ?Sized> MethodTypeInferrer<'a, H> {
    pub(crate) fn exact_or_bounds_inference(
        &mut self,
        kind: BoundKind,
        source: TypeId,
        target: TypeId,
    ) {
        match kind {
            BoundKind::Exact => self.exact_inference(source, target),
            BoundKind::Lower => self.lower_bound_inference(source, target),
            BoundKind::Upper => self.upper_bound_inference(source, target),
        }
    }

    // =========================================================================
    // Exact inference
    // =========================================================================

    pub(crate) fn exact_inference(&mut self, source: TypeId, target: TypeId) {
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            if self.exact_type_parameter_inference(source, target) {
                return;
            }
            if self.exact_array_inference(source, target) {
                return;
            }
            if self.exact_nullable_inference(source, target) {
                return;
            }
            if self.exact_tuple_inference(source, target) {
                return;
            }
            self.exact_constructed_inference(source, target);
        });
    }

    fn exact_type_parameter_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if let Some(index) = self.unfixed_param_index(target) {
            self.add_bound(BoundKind::Exact, index, source);
            return true;
        }
        false
    }

    fn exact_array_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let Some((source_element, source_rank)) = array_element_info(self.types, source) else {
            return false;
        };
        let Some((target_element, target_rank)) = array_element_info(self.types, target) else {
            return false;
        };
        if source_rank != target_rank {
            return false;
        }
        self.exact_inference(source_element, target_element);
        true
    }

    fn exact_nullable_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let (Some(source_underlying), Some(target_underlying)) = (
            nullable_underlying(self.types, source),
            nullable_underlying(self.types, target),
        ) else {
            return false;
        };
        self.exact_inference(source_underlying, target_underlying);
        true
    }

    fn exact_tuple_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        self.tuple_inference(BoundKind::Exact, source, target)
    }

    fn exact_constructed_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let (Some((source_def, _)), Some((target_def, _))) = (
            named_parts(self.types, source),
            named_parts(self.types, target),
        ) else {
            return false;
        };
        if source_def != target_def {
            return false;
        }
        self.exact_type_argument_inference(source, target);
        true
    }

    /// Exact inference between corresponding type arguments of two
    /// instantiations of the same definition.
    fn exact_type_argument_inference(&mut self, source: TypeId, target: TypeId) {
        let (Some((_, source_args)), Some((_, target_args))) = (
            named_parts(self.types, source),
            named_parts(self.types, target),
        ) else {
            return;
        };
        debug_assert_eq!(source_args.len(), target_args.len());
        for (&s, &t) in source_args.iter().zip(target_args.iter()) {
            self.exact_inference(s, t);
        }
    }

    // =========================================================================
    // Lower-bound inference
    // =========================================================================

    pub(crate) fn lower_bound_inference(&mut self, source: TypeId, target: TypeId) {
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            if self.lower_bound_type_parameter_inference(source, target) {
                return;
            }
            if self.lower_bound_array_inference(source, target) {
                return;
            }
            // Both sides nullable recurse on the underlyings. A lower-bound
            // rule for non-nullable source against nullable target is
            // deliberately not performed; it conflicts with downstream
            // compatibility checking.
            if self.lower_bound_nullable_inference(source, target) {
                return;
            }
            if self.lower_bound_tuple_inference(source, target) {
                return;
            }
            self.lower_bound_constructed_inference(source, target);
        });
    }

    fn lower_bound_type_parameter_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if let Some(index) = self.unfixed_param_index(target) {
            self.add_bound(BoundKind::Lower, index, source);
            return true;
        }
        false
    }

    /// Array source against an array target of the same rank, or a
    /// one-dimensional array source against one of the canonical array
    /// interfaces. Element inference is lower-bound for reference elements
    /// and exact otherwise.
    fn lower_bound_array_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let Some((source_element, source_rank)) = array_element_info(self.types, source) else {
            return false;
        };
        if let Some((target_element, target_rank)) = array_element_info(self.types, target) {
            if source_rank != target_rank {
                return false;
            }
            self.lower_bound_element_inference(source_element, target_element);
            return true;
        }
        if source_rank == 1
            && let Some((target_def, target_args)) = named_parts(self.types, target)
            && self.types.well_known().is_array_interface(target_def)
            && target_args.len() == 1
        {
            self.lower_bound_element_inference(source_element, target_args[0]);
            return true;
        }
        false
    }

    fn lower_bound_element_inference(&mut self, source_element: TypeId, target_element: TypeId) {
        if is_reference_type(self.types, source_element) {
            self.lower_bound_inference(source_element, target_element);
        } else {
            self.exact_inference(source_element, target_element);
        }
    }

    fn lower_bound_nullable_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let (Some(source_underlying), Some(target_underlying)) = (
            nullable_underlying(self.types, source),
            nullable_underlying(self.types, target),
        ) else {
            return false;
        };
        self.lower_bound_inference(source_underlying, target_underlying);
        true
    }

    fn lower_bound_tuple_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        self.tuple_inference(BoundKind::Lower, source, target)
    }

    fn lower_bound_constructed_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let Some((target_def, target_args)) = named_parts(self.types, target) else {
            return false;
        };
        if target_args.is_empty() {
            return false;
        }
        if let Some((source_def, _)) = named_parts(self.types, source)
            && source_def == target_def
        {
            let def = self.types.def(source_def);
            if matches!(def.kind, DefKind::Interface | DefKind::Delegate) {
                self.lower_bound_type_argument_inference(source, target);
            } else {
                self.exact_type_argument_inference(source, target);
            }
            return true;
        }
        if self.lower_bound_class_inference(source, target) {
            return true;
        }
        self.lower_bound_interface_inference(source, target)
    }

    /// Walk the source's base-class chain (or a type parameter's effective
    /// base) for an instantiation of the target's definition.
    fn lower_bound_class_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if !is_class(self.types, target) {
            return false;
        }
        let Some((target_def, _)) = named_parts(self.types, target) else {
            return false;
        };
        let mut source_base = base_type_of(self.types, source);
        while let Some(base) = source_base {
            if let Some((base_def, _)) = named_parts(self.types, base)
                && base_def == target_def
            {
                self.exact_type_argument_inference(base, target);
                return true;
            }
            source_base = base_type_of(self.types, base);
        }
        false
    }

    /// Search the source's interface closure for a unique instantiation of
    /// the target's definition. Two distinct instantiations mean no
    /// inference.
    fn lower_bound_interface_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if !is_interface(self.types, target) {
            return false;
        }
        let Some((target_def, _)) = named_parts(self.types, target) else {
            return false;
        };
        let Some(matching) = unique_interface_bound(self.types, source, target_def) else {
            return false;
        };
        self.lower_bound_type_argument_inference(matching, target);
        true
    }

    /// Variance-directed recursion between type arguments in a lower-bound
    /// context: covariant reference arguments recurse lower-bound,
    /// contravariant reference arguments recurse upper-bound, everything
    /// else exact.
    fn lower_bound_type_argument_inference(&mut self, source: TypeId, target: TypeId) {
        let (Some((def, source_args)), Some((_, target_args))) = (
            named_parts(self.types, source),
            named_parts(self.types, target),
        ) else {
            return;
        };
        for (i, (&s, &t)) in source_args.iter().zip(target_args.iter()).enumerate() {
            let variance = variance_of(self.types, def, i);
            if is_reference_type(self.types, s) && variance == Variance::Out {
                self.lower_bound_inference(s, t);
            } else if is_reference_type(self.types, s) && variance == Variance::In {
                self.upper_bound_inference(s, t);
            } else {
                self.exact_inference(s, t);
            }
        }
    }

    // =========================================================================
    // Upper-bound inference
    // =========================================================================

    pub(crate) fn upper_bound_inference(&mut self, source: TypeId, target: TypeId) {
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            if self.upper_bound_type_parameter_inference(source, target) {
                return;
            }
            if self.upper_bound_array_inference(source, target) {
                return;
            }
            if self.upper_bound_nullable_inference(source, target) {
                return;
            }
            if self.upper_bound_tuple_inference(source, target) {
                return;
            }
            self.upper_bound_constructed_inference(source, target);
        });
    }

    fn upper_bound_type_parameter_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if let Some(index) = self.unfixed_param_index(target) {
            self.add_bound(BoundKind::Upper, index, source);
            return true;
        }
        false
    }

    /// Mirror of the lower-bound array rule: the target is the array, and a
    /// canonical array-interface source matches a one-dimensional target.
    fn upper_bound_array_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let Some((target_element, target_rank)) = array_element_info(self.types, target) else {
            return false;
        };
        if let Some((source_element, source_rank)) = array_element_info(self.types, source) {
            if source_rank != target_rank {
                return false;
            }
            self.upper_bound_element_inference(source_element, target_element);
            return true;
        }
        if target_rank == 1
            && let Some((source_def, source_args)) = named_parts(self.types, source)
            && self.types.well_known().is_array_interface(source_def)
            && source_args.len() == 1
        {
            self.upper_bound_element_inference(source_args[0], target_element);
            return true;
        }
        false
    }

    fn upper_bound_element_inference(&mut self, source_element: TypeId, target_element: TypeId) {
        if is_reference_type(self.types, source_element) {
            self.upper_bound_inference(source_element, target_element);
        } else {
            self.exact_inference(source_element, target_element);
        }
    }

    fn upper_bound_nullable_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let (Some(source_underlying), Some(target_underlying)) = (
            nullable_underlying(self.types, source),
            nullable_underlying(self.types, target),
        ) else {
            return false;
        };
        self.upper_bound_inference(source_underlying, target_underlying);
        true
    }

    fn upper_bound_tuple_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        self.tuple_inference(BoundKind::Upper, source, target)
    }

    fn upper_bound_constructed_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        let Some((source_def, source_args)) = named_parts(self.types, source) else {
            return false;
        };
        if source_args.is_empty() {
            return false;
        }
        if let Some((target_def, _)) = named_parts(self.types, target)
            && target_def == source_def
        {
            let def = self.types.def(source_def);
            if matches!(def.kind, DefKind::Interface | DefKind::Delegate) {
                self.upper_bound_type_argument_inference(source, target);
            } else {
                self.exact_type_argument_inference(source, target);
            }
            return true;
        }
        if self.upper_bound_class_inference(source, target) {
            return true;
        }
        self.upper_bound_interface_inference(source, target)
    }

    /// Roles reversed from the lower-bound walk: search the target's
    /// base-class chain for an instantiation of the source's definition.
    fn upper_bound_class_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if !is_class(self.types, source) {
            return false;
        }
        let Some((source_def, _)) = named_parts(self.types, source) else {
            return false;
        };
        let mut target_base = base_type_of(self.types, target);
        while let Some(base) = target_base {
            if let Some((base_def, _)) = named_parts(self.types, base)
                && base_def == source_def
            {
                self.exact_type_argument_inference(source, base);
                return true;
            }
            target_base = base_type_of(self.types, base);
        }
        false
    }

    /// Roles reversed from the lower-bound walk: search the target's
    /// interface closure for a unique instantiation of the source's
    /// definition.
    fn upper_bound_interface_inference(&mut self, source: TypeId, target: TypeId) -> bool {
        if !is_interface(self.types, source) {
            return false;
        }
        let Some((source_def, _)) = named_parts(self.types, source) else {
            return false;
        };
        let Some(matching) = unique_interface_bound(self.types, target, source_def) else {
            return false;
        };
        self.upper_bound_type_argument_inference(source, matching);
        true
    }

    /// Variance-directed recursion with directions flipped relative to the
    /// lower-bound context.
    fn upper_bound_type_argument_inference(&mut self, source: TypeId, target: TypeId) {
        let (Some((def, source_args)), Some((_, target_args))) = (
            named_parts(self.types, source),
            named_parts(self.types, target),
        ) else {
            return;
        };
        for (i, (&s, &t)) in source_args.iter().zip(target_args.iter()).enumerate() {
            let variance = variance_of(self.types, def, i);
            if is_reference_type(self.types, s) && variance == Variance::Out {
                self.upper_bound_inference(s, t);
            } else if is_reference_type(self.types, s) && variance == Variance::In {
                self.lower_bound_inference(s, t);
            } else {
                self.exact_inference(s, t);
            }
        }
    }

    // =========================================================================
    // Shared tuple recursion
    // =========================================================================

    /// Element-wise recursion when both sides are tuple-compatible of equal
    /// cardinality. Covers the ambient tuple and shape-compatible nominal
    /// types on either side.
    fn tuple_inference(&mut self, kind: BoundKind, source: TypeId, target: TypeId) -> bool {
        let (Some(source_elements), Some(target_elements)) = (
            tuple_elements(self.types, source),
            tuple_elements(self.types, target),
        ) else {
            return false;
        };
        if source_elements.len() != target_elements.len() {
            return false;
        }
        for (&s, &t) in source_elements.iter().zip(target_elements.iter()) {
            self.exact_or_bounds_inference(kind, s, t);
        }
        true
    }
}

/// The unique instantiation of `wanted` in `ty`'s interface closure, if any.
/// Multiple distinct instantiations yield `None`.
fn unique_interface_bound(
    types: &strix_types::TypeInterner,
    ty: TypeId,
    wanted: strix_types::DefId,
) -> Option<TypeId> {
    let mut matching: Option<TypeId> = None;
    for iface in all_interfaces_of(types, ty) {
        if let Some((def, _)) = named_parts(types, iface)
            && def == wanted
        {
            match matching {
                None => matching = Some(iface),
                Some(existing) if existing != iface => return None,
                Some(_) => {}
            }
        }
    }
    matching
}
