//! Per-parameter bound sets.
//!
//! Bound sets have set semantics under type identity and must iterate in
//! insertion order so inference stays deterministic.

use indexmap::IndexSet;
use strix_types::TypeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BoundKind {
    Exact,
    Lower,
    Upper,
}

/// Exact, lower, and upper bounds collected for one unfixed type parameter.
/// The sets are lazily created; most parameters only ever see one kind.
#[derive(Debug, Default)]
pub(crate) struct BoundSet {
    pub exact: Option<IndexSet<TypeId>>,
    pub lower: Option<IndexSet<TypeId>>,
    pub upper: Option<IndexSet<TypeId>>,
}

impl BoundSet {
    pub fn add(&mut self, kind: BoundKind, ty: TypeId) {
        let set = match kind {
            BoundKind::Exact => &mut self.exact,
            BoundKind::Lower => &mut self.lower,
            BoundKind::Upper => &mut self.upper,
        };
        set.get_or_insert_with(IndexSet::new).insert(ty);
    }

    pub fn has_any(&self) -> bool {
        fn non_empty(set: &Option<IndexSet<TypeId>>) -> bool {
            set.as_ref().is_some_and(|s| !s.is_empty())
        }
        non_empty(&self.exact) || non_empty(&self.lower) || non_empty(&self.upper)
    }
}
