mod bounds_tests;
mod fixing_tests;

use strix_types::{
    DefId, DefKind, DelegateParam, DelegateShape, NamedDef, RefKind, TypeId, TypeInterner,
    TypeParamInfo, Variance,
};

use crate::argument::BoundArgument;
use crate::default_host::DefaultHost;
use crate::engine::MethodTypeInferrer;

pub(crate) fn method_param(types: &TypeInterner, name: &str, ordinal: u16) -> TypeId {
    types.fresh_method_type_param(name, ordinal)
}

pub(crate) fn simple_class(types: &TypeInterner, name: &str) -> TypeId {
    let name = types.intern_string(name);
    let def = types.add_def(NamedDef::new(name, DefKind::Class));
    types.named(def, [])
}

pub(crate) fn generic_class(types: &TypeInterner, name: &str, arity: u16) -> (DefId, Vec<TypeId>) {
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

/// A `Func`-style generic delegate: `R Name<P0..Pk-1, R>(P0, .., Pk-1)`.
pub(crate) fn func_delegate(types: &TypeInterner, name: &str, param_count: u16) -> DefId {
    let name = types.intern_string(name);
    let mut params: Vec<TypeId> = (0..param_count)
        .map(|i| {
            let param_name = types.intern_string(&format!("P{i}"));
            types.fresh_type_param(TypeParamInfo::of_type(param_name, i, Variance::In))
        })
        .collect();
    let ret = types.fresh_type_param(TypeParamInfo::of_type(
        types.intern_string("R"),
        param_count,
        Variance::Out,
    ));
    let invoke = DelegateShape {
        params: params
            .iter()
            .map(|&ty| DelegateParam {
                ty,
                ref_kind: RefKind::Value,
            })
            .collect(),
        return_type: ret,
    };
    params.push(ret);
    let mut def = NamedDef::new(name, DefKind::Delegate);
    def.type_params = params;
    def.delegate = Some(invoke);
    types.add_def(def)
}

pub(crate) fn inferrer<'a>(
    types: &'a TypeInterner,
    host: &'a DefaultHost,
    method_type_params: &[TypeId],
    formals: &[TypeId],
    arguments: &'a [BoundArgument],
) -> MethodTypeInferrer<'a, DefaultHost> {
    MethodTypeInferrer::new(types, host, method_type_params, None, formals, &[], arguments)
}
