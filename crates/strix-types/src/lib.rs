//! Type system core for the strix compiler.
//!
//! This crate owns the interned type representation shared by the checker
//! crates:
//! - `intern` - `TypeInterner`, `TypeId`, string interning, the named
//!   definition registry and well-known seed types
//! - `key` - `TypeKey` variants and the shape structs they carry
//! - `subst` - `TypeSubstitution` and type instantiation
//! - `predicates` - shape queries (delegate extraction, tuple elements,
//!   base-class and interface walks, type-parameter containment)
//! - `merge` - dynamic/tuple-name equivalence and merging of equivalent types
//! - `display` - compact type rendering for diagnostics and tests

pub mod display;
pub mod intern;
pub mod key;
pub mod merge;
pub mod predicates;
pub mod subst;

pub use display::type_to_string;
pub use intern::{TypeInterner, WellKnownDefs};
pub use key::{
    DefFlags, DefId, DefKind, DelegateParam, DelegateShape, IntrinsicKind, NameId, NamedDef,
    RefKind, TupleShape, TypeArgs, TypeId, TypeKey, TypeParamFlags, TypeParamId, TypeParamInfo,
    TypeParamOwner, Variance,
};
pub use merge::{candidate_key, equal_ignoring_dynamic_and_tuple_names, merge_equivalent_types};
pub use subst::{MAX_INSTANTIATION_DEPTH, TypeSubstitution, instantiate_type};

#[cfg(test)]
mod tests;
