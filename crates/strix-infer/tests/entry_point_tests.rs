//! Entry-point contracts: shape tolerance, first-argument probing, and
//! result extraction.

use strix_infer::{
    BoundArgument, DefaultHost, infer_from_first_argument, infer_type_arguments,
};
use strix_types::{
    DefId, DefKind, NamedDef, TypeId, TypeInterner, TypeParamInfo, Variance, type_to_string,
};

fn method_param(types: &TypeInterner, name: &str, ordinal: u16) -> TypeId {
    types.fresh_method_type_param(name, ordinal)
}

fn generic_class(types: &TypeInterner, name: &str, arity: u16) -> (DefId, Vec<TypeId>) {
    let name = types.intern_string(name);
    let params: Vec<TypeId> = (0..arity)
        .map(|i| {
            let param_name = types.intern_string(&format!("T{i}"));
            types.fresh_type_param(TypeParamInfo::of_type(param_name, i, Variance::Invariant))
        })
        .collect();
    let mut def = NamedDef::new(name, DefKind::Class);
    def.type_params = params.clone();
    (types.add_def(def), params)
}

#[test]
fn test_no_formals_with_type_parameters_fails_immediately() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();
    let result = infer_type_arguments(
        &types,
        &host,
        &[t],
        None,
        &[],
        &[],
        &[BoundArgument::typed(TypeId::INT)],
        &mut diagnostics,
    );
    assert!(!result.success);
    assert_eq!(result.inferred.len(), 1);
    assert_eq!(type_to_string(&types, result.inferred[0]), "T");
}

#[test]
fn test_no_type_parameters_succeeds_trivially() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let mut diagnostics = Vec::new();
    let result = infer_type_arguments(
        &types,
        &host,
        &[],
        None,
        &[TypeId::INT],
        &[],
        &[BoundArgument::typed(TypeId::INT)],
        &mut diagnostics,
    );
    assert!(result.success);
    assert!(result.inferred.is_empty());
}

#[test]
fn test_excess_arguments_are_ignored() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();
    let result = infer_type_arguments(
        &types,
        &host,
        &[t],
        None,
        &[t],
        &[],
        &[
            BoundArgument::typed(TypeId::INT),
            BoundArgument::typed(TypeId::STRING),
            BoundArgument::typed(TypeId::BOOL),
        ],
        &mut diagnostics,
    );
    assert!(result.success);
    assert_eq!(result.inferred, vec![TypeId::INT]);
}

#[test]
fn test_missing_arguments_truncate_processing() {
    // M<T>(T, T) called with one argument still fixes from what is there.
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();
    let result = infer_type_arguments(
        &types,
        &host,
        &[t],
        None,
        &[t, t],
        &[],
        &[BoundArgument::typed(TypeId::INT)],
        &mut diagnostics,
    );
    assert!(result.success);
    assert_eq!(result.inferred, vec![TypeId::INT]);
}

#[test]
fn test_untyped_argument_yields_no_bounds() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();
    let result = infer_type_arguments(
        &types,
        &host,
        &[t],
        None,
        &[t],
        &[],
        &[BoundArgument::Other],
        &mut diagnostics,
    );
    assert!(!result.success);
}

#[test]
fn test_error_typed_argument_yields_no_bounds() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();
    let result = infer_type_arguments(
        &types,
        &host,
        &[t],
        None,
        &[t],
        &[],
        &[BoundArgument::typed(TypeId::ERROR)],
        &mut diagnostics,
    );
    assert!(!result.success);
}

// =============================================================================
// First-argument probing
// =============================================================================

#[test]
fn test_first_argument_fixes_mentioned_parameters() {
    // M<T, U>(List<T>, U): probing with List<int> fixes T, leaves U open.
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let u = method_param(&types, "U", 1);
    let (list, _) = generic_class(&types, "List", 1);
    let mut diagnostics = Vec::new();

    let partial = infer_from_first_argument(
        &types,
        &host,
        &[t, u],
        None,
        &[types.named(list, [t]), u],
        &[BoundArgument::typed(types.named(list, [TypeId::INT]))],
        &mut diagnostics,
    )
    .unwrap();
    assert_eq!(partial, vec![Some(TypeId::INT), None]);
}

#[test]
fn test_first_argument_requires_every_mentioned_parameter_fixed() {
    // M<T>(List<T>) probed with an int argument: T is mentioned but gets
    // no bound, so the probe reports nothing.
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let (list, _) = generic_class(&types, "List", 1);
    let mut diagnostics = Vec::new();

    let partial = infer_from_first_argument(
        &types,
        &host,
        &[t],
        None,
        &[types.named(list, [t])],
        &[BoundArgument::typed(TypeId::INT)],
        &mut diagnostics,
    );
    assert!(partial.is_none());
}

#[test]
fn test_first_argument_rejects_empty_shapes() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();

    assert!(
        infer_from_first_argument(
            &types,
            &host,
            &[t],
            None,
            &[],
            &[BoundArgument::typed(TypeId::INT)],
            &mut diagnostics,
        )
        .is_none()
    );
    assert!(
        infer_from_first_argument(&types, &host, &[t], None, &[t], &[], &mut diagnostics)
            .is_none()
    );
}

#[test]
fn test_first_argument_ignores_later_parameters() {
    // Only the first formal drives the probe, even when later formals
    // mention other parameters.
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let u = method_param(&types, "U", 1);
    let mut diagnostics = Vec::new();

    let partial = infer_from_first_argument(
        &types,
        &host,
        &[t, u],
        None,
        &[t, u],
        &[
            BoundArgument::typed(TypeId::STRING),
            BoundArgument::typed(TypeId::INT),
        ],
        &mut diagnostics,
    )
    .unwrap();
    assert_eq!(partial, vec![Some(TypeId::STRING), None]);
}

#[test]
fn test_first_argument_untyped_probe_fails() {
    let types = TypeInterner::new();
    let host = DefaultHost::new();
    let t = method_param(&types, "T", 0);
    let mut diagnostics = Vec::new();
    assert!(
        infer_from_first_argument(
            &types,
            &host,
            &[t],
            None,
            &[t],
            &[BoundArgument::Other],
            &mut diagnostics,
        )
        .is_none()
    );
}
