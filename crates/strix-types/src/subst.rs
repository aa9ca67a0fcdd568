//! Type substitution and instantiation.

use rustc_hash::FxHashMap;

use crate::intern::TypeInterner;
use crate::key::{TupleShape, TypeArgs, TypeId, TypeKey, TypeParamId};

/// Instantiation gives up past this depth; self-referential shapes are
/// returned unchanged rather than expanded forever.
pub const MAX_INSTANTIATION_DEPTH: usize = 100;

/// Map from type parameters to their replacement types.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<TypeParamId, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn insert(&mut self, param: TypeParamId, ty: TypeId) {
        self.map.insert(param, ty);
    }

    pub fn get(&self, param: TypeParamId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    /// Build a substitution from parallel parameter/argument lists. Entries
    /// whose parameter slot is not a type parameter are skipped, as are
    /// missing arguments.
    pub fn from_args(types: &TypeInterner, params: &[TypeId], args: &[TypeId]) -> Self {
        let mut subst = TypeSubstitution::new();
        for (&param, &arg) in params.iter().zip(args.iter()) {
            if let Some(pid) = types.as_type_param(param) {
                subst.insert(pid, arg);
            }
        }
        subst
    }

    /// Extend with parallel lists, keeping existing entries.
    pub fn extend_from_args(&mut self, types: &TypeInterner, params: &[TypeId], args: &[TypeId]) {
        for (&param, &arg) in params.iter().zip(args.iter()) {
            if let Some(pid) = types.as_type_param(param) {
                self.map.entry(pid).or_insert(arg);
            }
        }
    }
}

/// Apply `subst` to `ty` by structural rebuild. Unmapped type parameters are
/// left in place.
pub fn instantiate_type(types: &TypeInterner, ty: TypeId, subst: &TypeSubstitution) -> TypeId {
    if subst.is_empty() {
        return ty;
    }
    instantiate_at_depth(types, ty, subst, 0)
}

fn instantiate_at_depth(
    types: &TypeInterner,
    ty: TypeId,
    subst: &TypeSubstitution,
    depth: usize,
) -> TypeId {
    if depth > MAX_INSTANTIATION_DEPTH {
        return ty;
    }
    stacker::maybe_grow(32 * 1024, 1024 * 1024, || match types.key(ty) {
        TypeKey::Intrinsic(_) | TypeKey::Error(_) => ty,
        TypeKey::TypeParam(pid) => subst.get(pid).unwrap_or(ty),
        TypeKey::Named { def, args } => {
            let new_args: TypeArgs = args
                .iter()
                .map(|&a| instantiate_at_depth(types, a, subst, depth + 1))
                .collect();
            if new_args == args {
                ty
            } else {
                types.named(def, new_args)
            }
        }
        TypeKey::Array { element, rank } => {
            let new_element = instantiate_at_depth(types, element, subst, depth + 1);
            if new_element == element {
                ty
            } else {
                types.array_of_rank(new_element, rank)
            }
        }
        TypeKey::Nullable(underlying) => {
            let new_underlying = instantiate_at_depth(types, underlying, subst, depth + 1);
            if new_underlying == underlying {
                ty
            } else {
                types.nullable(new_underlying)
            }
        }
        TypeKey::Tuple(shape) => {
            let new_elements: Vec<TypeId> = shape
                .elements
                .iter()
                .map(|&e| instantiate_at_depth(types, e, subst, depth + 1))
                .collect();
            if new_elements == shape.elements {
                ty
            } else {
                types.intern(TypeKey::Tuple(TupleShape {
                    elements: new_elements,
                    names: shape.names,
                }))
            }
        }
    })
}
