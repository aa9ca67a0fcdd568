//! Compact type rendering for diagnostics and test assertions.

use crate::intern::TypeInterner;
use crate::key::{IntrinsicKind, TypeId, TypeKey};

pub fn type_to_string(types: &TypeInterner, ty: TypeId) -> String {
    match types.key(ty) {
        TypeKey::Intrinsic(kind) => intrinsic_name(kind).to_string(),
        TypeKey::Named { def, args } => {
            let name = types.def_name(def);
            if args.is_empty() {
                name
            } else {
                let args: Vec<String> =
                    args.iter().map(|&a| type_to_string(types, a)).collect();
                format!("{}<{}>", name, args.join(", "))
            }
        }
        TypeKey::Array { element, rank } => {
            let commas = ",".repeat(rank.saturating_sub(1) as usize);
            format!("{}[{}]", type_to_string(types, element), commas)
        }
        TypeKey::Nullable(underlying) => format!("{}?", type_to_string(types, underlying)),
        TypeKey::Tuple(shape) => {
            let parts: Vec<String> = shape
                .elements
                .iter()
                .enumerate()
                .map(|(i, &e)| {
                    let rendered = type_to_string(types, e);
                    match shape.name_at(i) {
                        Some(name) => format!("{}: {}", types.name_text(name), rendered),
                        None => rendered,
                    }
                })
                .collect();
            format!("({})", parts.join(", "))
        }
        TypeKey::TypeParam(pid) => types.name_text(types.param_info(pid).name),
        TypeKey::Error(Some(name)) => types.name_text(name),
        TypeKey::Error(None) => "<error>".to_string(),
    }
}

fn intrinsic_name(kind: IntrinsicKind) -> &'static str {
    match kind {
        IntrinsicKind::Error => "<error>",
        IntrinsicKind::Void => "void",
        IntrinsicKind::Object => "object",
        IntrinsicKind::Dynamic => "dynamic",
        IntrinsicKind::String => "string",
        IntrinsicKind::Bool => "bool",
        IntrinsicKind::Char => "char",
        IntrinsicKind::Int => "int",
        IntrinsicKind::Uint => "uint",
        IntrinsicKind::Long => "long",
        IntrinsicKind::Ulong => "ulong",
        IntrinsicKind::Float => "float",
        IntrinsicKind::Double => "double",
        IntrinsicKind::Decimal => "decimal",
    }
}
