//! Dynamic/tuple-name equivalence and merging.
//!
//! Candidate sets during fixing dedupe and compare types while ignoring two
//! kinds of surface difference: element names on tuples, and dynamic-ness in
//! constituent positions. Two related comparisons exist:
//!
//! - the *candidate key* ignores tuple names everywhere and dynamic-ness in
//!   proper subcomponents, but keeps top-level `dynamic` distinct from
//!   `object` so both survive as candidates;
//! - the *equivalence* test ignores dynamic-ness everywhere, including at the
//!   top level.
//!
//! Merging two equivalent types keeps `dynamic` at every position where
//! either operand has it, keeps tuple element names where both agree, and
//! drops names where they differ.

use crate::intern::TypeInterner;
use crate::key::{TupleShape, TypeArgs, TypeId, TypeKey};

/// Canonical key used to dedupe fixing candidates.
pub fn candidate_key(types: &TypeInterner, ty: TypeId) -> TypeId {
    if ty == TypeId::DYNAMIC {
        return ty;
    }
    normalize(types, ty)
}

/// Whether two types differ only by dynamic-ness or tuple element names.
pub fn equal_ignoring_dynamic_and_tuple_names(
    types: &TypeInterner,
    left: TypeId,
    right: TypeId,
) -> bool {
    left == right || normalize(types, left) == normalize(types, right)
}

/// Rewrite `dynamic` to `object` and drop tuple names, everywhere.
fn normalize(types: &TypeInterner, ty: TypeId) -> TypeId {
    if ty == TypeId::DYNAMIC {
        return TypeId::OBJECT;
    }
    match types.key(ty) {
        TypeKey::Named { def, args } => {
            let new_args: TypeArgs = args.iter().map(|&a| normalize(types, a)).collect();
            if new_args == args { ty } else { types.named(def, new_args) }
        }
        TypeKey::Array { element, rank } => {
            let new_element = normalize(types, element);
            if new_element == element {
                ty
            } else {
                types.array_of_rank(new_element, rank)
            }
        }
        TypeKey::Nullable(underlying) => {
            let new_underlying = normalize(types, underlying);
            if new_underlying == underlying {
                ty
            } else {
                types.nullable(new_underlying)
            }
        }
        TypeKey::Tuple(shape) => {
            let new_elements: Vec<TypeId> =
                shape.elements.iter().map(|&e| normalize(types, e)).collect();
            if shape.names.is_empty() && new_elements == shape.elements {
                ty
            } else {
                types.tuple(new_elements)
            }
        }
        _ => ty,
    }
}

/// Merge two types that are equal ignoring dynamic-ness and tuple names.
/// `dynamic` wins positionally; tuple names are kept where the operands
/// agree and dropped where they differ. Operands that are not equivalent
/// come back as `left` unchanged.
pub fn merge_equivalent_types(types: &TypeInterner, left: TypeId, right: TypeId) -> TypeId {
    if left == right {
        return left;
    }
    if left == TypeId::DYNAMIC || right == TypeId::DYNAMIC {
        return TypeId::DYNAMIC;
    }
    match (types.key(left), types.key(right)) {
        (TypeKey::Named { def: dl, args: al }, TypeKey::Named { def: dr, args: ar })
            if dl == dr && al.len() == ar.len() =>
        {
            let merged: TypeArgs = al
                .iter()
                .zip(ar.iter())
                .map(|(&a, &b)| merge_equivalent_types(types, a, b))
                .collect();
            types.named(dl, merged)
        }
        (
            TypeKey::Array {
                element: el,
                rank: rl,
            },
            TypeKey::Array {
                element: er,
                rank: rr,
            },
        ) if rl == rr => types.array_of_rank(merge_equivalent_types(types, el, er), rl),
        (TypeKey::Nullable(ul), TypeKey::Nullable(ur)) => {
            types.nullable(merge_equivalent_types(types, ul, ur))
        }
        (TypeKey::Tuple(sl), TypeKey::Tuple(sr)) if sl.elements.len() == sr.elements.len() => {
            let elements: Vec<TypeId> = sl
                .elements
                .iter()
                .zip(sr.elements.iter())
                .map(|(&a, &b)| merge_equivalent_types(types, a, b))
                .collect();
            let names = merge_tuple_names(&sl, &sr);
            types.intern(TypeKey::Tuple(TupleShape { elements, names }))
        }
        _ => left,
    }
}

/// Element-wise name merge: identical names survive, differing names become
/// unnamed. A tuple left with no names at all takes the nameless form.
fn merge_tuple_names(left: &TupleShape, right: &TupleShape) -> Vec<Option<crate::key::NameId>> {
    let len = left.elements.len();
    let merged: Vec<_> = (0..len)
        .map(|i| {
            let l = left.name_at(i);
            if l == right.name_at(i) { l } else { None }
        })
        .collect();
    if merged.iter().all(|n| n.is_none()) {
        Vec::new()
    } else {
        merged
    }
}
