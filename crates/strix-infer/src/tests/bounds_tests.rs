use strix_types::TypeId;

use crate::bounds::{BoundKind, BoundSet};

#[test]
fn test_bounds_start_empty() {
    let set = BoundSet::default();
    assert!(!set.has_any());
    assert!(set.exact.is_none());
    assert!(set.lower.is_none());
    assert!(set.upper.is_none());
}

#[test]
fn test_bounds_dedupe_by_identity() {
    let mut set = BoundSet::default();
    set.add(BoundKind::Lower, TypeId::INT);
    set.add(BoundKind::Lower, TypeId::INT);
    set.add(BoundKind::Lower, TypeId::STRING);
    assert_eq!(set.lower.as_ref().unwrap().len(), 2);
    assert!(set.has_any());
}

#[test]
fn test_bounds_preserve_insertion_order() {
    let mut set = BoundSet::default();
    set.add(BoundKind::Upper, TypeId::STRING);
    set.add(BoundKind::Upper, TypeId::OBJECT);
    set.add(BoundKind::Upper, TypeId::INT);
    let order: Vec<TypeId> = set.upper.as_ref().unwrap().iter().copied().collect();
    assert_eq!(order, vec![TypeId::STRING, TypeId::OBJECT, TypeId::INT]);
}

#[test]
fn test_bound_kinds_are_separate_sets() {
    let mut set = BoundSet::default();
    set.add(BoundKind::Exact, TypeId::INT);
    set.add(BoundKind::Lower, TypeId::INT);
    assert_eq!(set.exact.as_ref().unwrap().len(), 1);
    assert_eq!(set.lower.as_ref().unwrap().len(), 1);
    assert!(set.upper.is_none());
}
