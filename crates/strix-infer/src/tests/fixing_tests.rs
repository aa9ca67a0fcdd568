use strix_types::TypeId;

use super::*;
use crate::bounds::BoundKind;

fn fix_single(
    types: &TypeInterner,
    host: &DefaultHost,
    bounds: &[(BoundKind, TypeId)],
) -> Option<TypeId> {
    let t = method_param(types, "T", 0);
    let mut inferrer = inferrer(types, host, &[t], &[t], &[]);
    for &(kind, ty) in bounds {
        inferrer.add_bound(kind, 0, ty);
    }
    let mut diagnostics = Vec::new();
    if inferrer.fix(0, &mut diagnostics) {
        inferrer.fixed_results[0]
    } else {
        None
    }
}

#[test]
fn test_single_exact_bound_fixes_to_it() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(&types, &host, &[(BoundKind::Exact, TypeId::INT)]),
        Some(TypeId::INT)
    );
}

#[test]
fn test_conflicting_exact_bounds_fail() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Exact, TypeId::INT),
                (BoundKind::Exact, TypeId::STRING)
            ]
        ),
        None
    );
}

#[test]
fn test_exact_bound_beats_lower_bounds() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Exact, TypeId::STRING),
                (BoundKind::Lower, TypeId::STRING),
            ]
        ),
        Some(TypeId::STRING)
    );
}

#[test]
fn test_lower_bounds_pick_unique_conversion_target() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::STRING),
                (BoundKind::Lower, TypeId::OBJECT),
            ]
        ),
        Some(TypeId::OBJECT)
    );
}

#[test]
fn test_unrelated_lower_bounds_fail() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::INT),
                (BoundKind::Lower, TypeId::STRING),
            ]
        ),
        None
    );
}

#[test]
fn test_numeric_widening_gives_best_candidate() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::INT),
                (BoundKind::Lower, TypeId::LONG),
            ]
        ),
        Some(TypeId::LONG)
    );
}

#[test]
fn test_dynamic_beats_object_tie() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::OBJECT),
                (BoundKind::Lower, TypeId::DYNAMIC),
            ]
        ),
        Some(TypeId::DYNAMIC)
    );
    // Order of the bounds does not change the winner.
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::DYNAMIC),
                (BoundKind::Lower, TypeId::OBJECT),
            ]
        ),
        Some(TypeId::DYNAMIC)
    );
}

#[test]
fn test_deep_dynamic_merges_at_dedup() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let (list, _) = generic_class(&types, "List", 1);
    let list_object = types.named(list, [TypeId::OBJECT]);
    let list_dynamic = types.named(list, [TypeId::DYNAMIC]);

    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, list_object),
                (BoundKind::Lower, list_dynamic),
            ]
        ),
        Some(list_dynamic)
    );
}

#[test]
fn test_tuple_names_merge_during_fixing() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let a = types.intern_string("a");
    let b = types.intern_string("b");
    let x = types.intern_string("x");

    let left = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(a), Some(b)]);
    let right = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(x), Some(b)]);
    let merged = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![None, Some(b)]);

    assert_eq!(
        fix_single(
            &types,
            &host,
            &[(BoundKind::Lower, left), (BoundKind::Lower, right)]
        ),
        Some(merged)
    );
}

#[test]
fn test_upper_bound_prunes_candidates() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::STRING),
                (BoundKind::Upper, TypeId::OBJECT),
            ]
        ),
        Some(TypeId::OBJECT)
    );
    // Bounds that admit no candidate at all fail.
    assert_eq!(
        fix_single(
            &types,
            &host,
            &[
                (BoundKind::Lower, TypeId::STRING),
                (BoundKind::Upper, TypeId::INT),
            ]
        ),
        None
    );
}

#[test]
fn test_upper_bounds_alone_fix() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    assert_eq!(
        fix_single(&types, &host, &[(BoundKind::Upper, TypeId::STRING)]),
        Some(TypeId::STRING)
    );
}
