use super::*;
use crate::merge::*;

#[test]
fn test_candidate_key_keeps_top_level_dynamic_distinct() {
    let types = TypeInterner::new();
    assert_ne!(
        candidate_key(&types, TypeId::DYNAMIC),
        candidate_key(&types, TypeId::OBJECT)
    );
}

#[test]
fn test_candidate_key_folds_nested_dynamic() {
    let types = TypeInterner::new();
    let (list, _) = generic_class(&types, "List", 1);
    let list_dynamic = types.named(list, [TypeId::DYNAMIC]);
    let list_object = types.named(list, [TypeId::OBJECT]);
    assert_eq!(
        candidate_key(&types, list_dynamic),
        candidate_key(&types, list_object)
    );
}

#[test]
fn test_candidate_key_ignores_tuple_names() {
    let types = TypeInterner::new();
    let x = types.intern_string("x");
    let named = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(x), None]);
    let unnamed = types.tuple(vec![TypeId::INT, TypeId::STRING]);
    assert_eq!(candidate_key(&types, named), candidate_key(&types, unnamed));
}

#[test]
fn test_equal_ignoring_dynamic_covers_top_level() {
    let types = TypeInterner::new();
    assert!(equal_ignoring_dynamic_and_tuple_names(
        &types,
        TypeId::DYNAMIC,
        TypeId::OBJECT
    ));
    assert!(!equal_ignoring_dynamic_and_tuple_names(
        &types,
        TypeId::DYNAMIC,
        TypeId::STRING
    ));
}

#[test]
fn test_merge_favors_dynamic_positionally() {
    let types = TypeInterner::new();
    assert_eq!(
        merge_equivalent_types(&types, TypeId::OBJECT, TypeId::DYNAMIC),
        TypeId::DYNAMIC
    );
    assert_eq!(
        merge_equivalent_types(&types, TypeId::DYNAMIC, TypeId::OBJECT),
        TypeId::DYNAMIC
    );

    let (list, _) = generic_class(&types, "List", 1);
    let list_dynamic = types.named(list, [TypeId::DYNAMIC]);
    let list_object = types.named(list, [TypeId::OBJECT]);
    assert_eq!(
        merge_equivalent_types(&types, list_object, list_dynamic),
        list_dynamic
    );
}

#[test]
fn test_merge_names_is_idempotent() {
    let types = TypeInterner::new();
    let x = types.intern_string("x");
    let y = types.intern_string("y");
    let named = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(x), Some(y)]);
    assert_eq!(merge_equivalent_types(&types, named, named), named);
}

#[test]
fn test_merge_drops_differing_names() {
    let types = TypeInterner::new();
    let x = types.intern_string("x");
    let y = types.intern_string("y");
    let z = types.intern_string("z");

    let left = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(x), Some(y)]);
    let right = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(x), Some(z)]);
    let merged = merge_equivalent_types(&types, left, right);
    let expected = types.tuple_with_names(vec![TypeId::INT, TypeId::STRING], vec![Some(x), None]);
    assert_eq!(merged, expected);
}

#[test]
fn test_merge_fully_disagreeing_names_goes_nameless() {
    let types = TypeInterner::new();
    let x = types.intern_string("x");
    let y = types.intern_string("y");

    let left = types.tuple_with_names(vec![TypeId::INT], vec![Some(x)]);
    let right = types.tuple_with_names(vec![TypeId::INT], vec![Some(y)]);
    let merged = merge_equivalent_types(&types, left, right);
    assert_eq!(merged, types.tuple(vec![TypeId::INT]));
}
