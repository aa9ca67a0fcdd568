//! Shape queries over interned types.
//!
//! These are the narrow accessors the inference engine relies on: delegate
//! extraction, tuple-element extraction, array and nullable projections,
//! base-class and interface walks, and type-parameter containment.

use fixedbitset::FixedBitSet;
use indexmap::IndexSet;

use crate::intern::TypeInterner;
use crate::key::{
    DefId, DefKind, DelegateParam, DelegateShape, IntrinsicKind, TypeArgs, TypeId, TypeKey,
    TypeParamFlags, Variance,
};
use crate::subst::{TypeSubstitution, instantiate_type};

// =============================================================================
// Basic classification
// =============================================================================

/// A type inference can draw from: not missing, not an error, not void.
pub fn is_really_a_type(types: &TypeInterner, ty: TypeId) -> bool {
    if ty == TypeId::ERROR || ty == TypeId::VOID {
        return false;
    }
    !matches!(types.key(ty), TypeKey::Error(_))
}

pub fn is_reference_type(types: &TypeInterner, ty: TypeId) -> bool {
    match types.key(ty) {
        TypeKey::Intrinsic(kind) => matches!(
            kind,
            IntrinsicKind::Object | IntrinsicKind::Dynamic | IntrinsicKind::String
        ),
        TypeKey::Named { def, .. } => matches!(
            types.def(def).kind,
            DefKind::Class | DefKind::Interface | DefKind::Delegate
        ),
        TypeKey::Array { .. } => true,
        TypeKey::TypeParam(pid) => {
            let info = types.param_info(pid);
            info.flags.contains(TypeParamFlags::REFERENCE_CONSTRAINT)
                || info
                    .effective_base
                    .is_some_and(|base| is_reference_type(types, base))
        }
        TypeKey::Nullable(_) | TypeKey::Tuple(_) | TypeKey::Error(_) => false,
    }
}

pub fn is_interface(types: &TypeInterner, ty: TypeId) -> bool {
    matches!(types.key(ty), TypeKey::Named { def, .. } if types.def(def).kind == DefKind::Interface)
}

pub fn is_class(types: &TypeInterner, ty: TypeId) -> bool {
    matches!(types.key(ty), TypeKey::Named { def, .. } if types.def(def).kind == DefKind::Class)
}

// =============================================================================
// Shape projections
// =============================================================================

pub fn array_element_info(types: &TypeInterner, ty: TypeId) -> Option<(TypeId, u8)> {
    match types.key(ty) {
        TypeKey::Array { element, rank } => Some((element, rank)),
        _ => None,
    }
}

pub fn nullable_underlying(types: &TypeInterner, ty: TypeId) -> Option<TypeId> {
    match types.key(ty) {
        TypeKey::Nullable(underlying) => Some(underlying),
        _ => None,
    }
}

pub fn named_parts(types: &TypeInterner, ty: TypeId) -> Option<(DefId, TypeArgs)> {
    match types.key(ty) {
        TypeKey::Named { def, args } => Some((def, args)),
        _ => None,
    }
}

/// The delegate shape of `ty`, when `ty` is a delegate instantiation or the
/// expression-tree wrapper over one. Parameter and return types come back
/// substituted with the instantiation's type arguments.
pub fn delegate_shape_of(types: &TypeInterner, ty: TypeId) -> Option<DelegateShape> {
    let (def_id, args) = named_parts(types, ty)?;
    let def = types.def(def_id);
    if def.flags.contains(crate::key::DefFlags::EXPRESSION_WRAPPER) && args.len() == 1 {
        return delegate_shape_of(types, args[0]);
    }
    if def.kind != DefKind::Delegate {
        return None;
    }
    let shape = def.delegate?;
    if def.type_params.is_empty() {
        return Some(shape);
    }
    let subst = TypeSubstitution::from_args(types, &def.type_params, &args);
    Some(DelegateShape {
        params: shape
            .params
            .iter()
            .map(|p| DelegateParam {
                ty: instantiate_type(types, p.ty, &subst),
                ref_kind: p.ref_kind,
            })
            .collect(),
        return_type: instantiate_type(types, shape.return_type, &subst),
    })
}

/// Element types of `ty` when it is the ambient tuple or a tuple-compatible
/// nominal type, of any cardinality.
pub fn tuple_elements(types: &TypeInterner, ty: TypeId) -> Option<Vec<TypeId>> {
    match types.key(ty) {
        TypeKey::Tuple(shape) => Some(shape.elements),
        TypeKey::Named { def, args } => {
            let def = types.def(def);
            if def.flags.contains(crate::key::DefFlags::TUPLE_COMPATIBLE) {
                Some(args.to_vec())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Element types of `ty` when it is tuple-compatible with exactly the given
/// cardinality.
pub fn tuple_elements_of(
    types: &TypeInterner,
    ty: TypeId,
    cardinality: usize,
) -> Option<Vec<TypeId>> {
    tuple_elements(types, ty).filter(|elements| elements.len() == cardinality)
}

pub fn is_tuple_compatible(types: &TypeInterner, ty: TypeId, cardinality: usize) -> bool {
    tuple_elements_of(types, ty, cardinality).is_some()
}

// =============================================================================
// Hierarchy walks
// =============================================================================

/// The base class of `ty`, instantiated. For type parameters this is the
/// effective base from constraints.
pub fn base_type_of(types: &TypeInterner, ty: TypeId) -> Option<TypeId> {
    match types.key(ty) {
        TypeKey::Named { def, args } => {
            let def = types.def(def);
            let base = def.base?;
            if def.type_params.is_empty() {
                Some(base)
            } else {
                let subst = TypeSubstitution::from_args(types, &def.type_params, &args);
                Some(instantiate_type(types, base, &subst))
            }
        }
        TypeKey::TypeParam(pid) => types.param_info(pid).effective_base,
        _ => None,
    }
}

/// Every interface `ty` implements, directly or through bases, instantiated
/// and deduplicated in first-encounter order. For type parameters the walk
/// covers the effective base class and the effective interfaces.
pub fn all_interfaces_of(types: &TypeInterner, ty: TypeId) -> Vec<TypeId> {
    let mut acc: IndexSet<TypeId> = IndexSet::new();
    collect_interfaces(types, ty, &mut acc);
    acc.into_iter().collect()
}

fn collect_interfaces(types: &TypeInterner, ty: TypeId, acc: &mut IndexSet<TypeId>) {
    match types.key(ty) {
        TypeKey::Named { def, args } => {
            let def = types.def(def);
            let subst = TypeSubstitution::from_args(types, &def.type_params, &args);
            for &iface in &def.interfaces {
                let instantiated = instantiate_type(types, iface, &subst);
                if acc.insert(instantiated) {
                    collect_interfaces(types, instantiated, acc);
                }
            }
            if let Some(base) = def.base {
                collect_interfaces(types, instantiate_type(types, base, &subst), acc);
            }
        }
        TypeKey::TypeParam(pid) => {
            let info = types.param_info(pid);
            if let Some(base) = info.effective_base {
                collect_interfaces(types, base, acc);
            }
            for &iface in &info.effective_interfaces {
                if acc.insert(iface) {
                    collect_interfaces(types, iface, acc);
                }
            }
        }
        _ => {}
    }
}

// =============================================================================
// Type-parameter containment
// =============================================================================

/// Structural search for a specific type parameter.
pub fn contains_type_param(types: &TypeInterner, ty: TypeId, param: TypeId) -> bool {
    if ty == param {
        return true;
    }
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || match types.key(ty) {
        TypeKey::Named { args, .. } => {
            args.iter().any(|&a| contains_type_param(types, a, param))
        }
        TypeKey::Array { element, .. } => contains_type_param(types, element, param),
        TypeKey::Nullable(underlying) => contains_type_param(types, underlying, param),
        TypeKey::Tuple(shape) => shape
            .elements
            .iter()
            .any(|&e| contains_type_param(types, e, param)),
        _ => false,
    })
}

/// Set the bit for every `params[i]` mentioned anywhere in `ty`.
pub fn mentioned_type_params(
    types: &TypeInterner,
    ty: TypeId,
    params: &[TypeId],
    mask: &mut FixedBitSet,
) {
    for (i, &p) in params.iter().enumerate() {
        if contains_type_param(types, ty, p) {
            mask.insert(i);
        }
    }
}

// =============================================================================
// Variance
// =============================================================================

/// Declared variance of the definition's i-th type parameter.
pub fn variance_of(types: &TypeInterner, def: DefId, index: usize) -> Variance {
    let def = types.def(def);
    def.type_params
        .get(index)
        .and_then(|&p| types.as_type_param(p))
        .map(|pid| types.param_info(pid).variance)
        .unwrap_or(Variance::Invariant)
}
