mod merge_tests;

use crate::key::{DefId, DefKind, DelegateParam, DelegateShape, NamedDef, RefKind, TypeId};
use crate::intern::TypeInterner;

/// A class with no type parameters and no bases.
pub(crate) fn simple_class(types: &TypeInterner, name: &str) -> DefId {
    let name = types.intern_string(name);
    types.add_def(NamedDef::new(name, DefKind::Class))
}

/// A generic class; returns the definition and its parameter types.
pub(crate) fn generic_class(types: &TypeInterner, name: &str, arity: u16) -> (DefId, Vec<TypeId>) {
    let name = types.intern_string(name);
    let params: Vec<TypeId> = (0..arity)
        .map(|i| {
            let param_name = types.intern_string(&format!("T{i}"));
            types.fresh_type_param(crate::key::TypeParamInfo::of_type(
                param_name,
                i,
                crate::key::Variance::Invariant,
            ))
        })
        .collect();
    let mut def = NamedDef::new(name, DefKind::Class);
    def.type_params = params.clone();
    (types.add_def(def), params)
}

/// A non-generic delegate with the given invoke shape.
pub(crate) fn delegate_def(
    types: &TypeInterner,
    name: &str,
    param_types: &[TypeId],
    return_type: TypeId,
) -> DefId {
    let name = types.intern_string(name);
    let mut def = NamedDef::new(name, DefKind::Delegate);
    def.delegate = Some(DelegateShape {
        params: param_types
            .iter()
            .map(|&ty| DelegateParam {
                ty,
                ref_kind: RefKind::Value,
            })
            .collect(),
        return_type,
    });
    types.add_def(def)
}
