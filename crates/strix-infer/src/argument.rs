//! Bound arguments as the inference engine sees them.
//!
//! The engine never looks at syntax. Callers lower each call argument into a
//! `BoundArgument`, and the inference rules dispatch on the variant.

use strix_types::TypeId;

/// Opaque handle to an anonymous-function body, resolved by the host's
/// lambda return analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LambdaId(pub u32);

/// Opaque handle to a method group, resolved by the host's method-group
/// resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MethodGroupId(pub u32);

/// An anonymous-function argument. `parameter_types` is present when the
/// lambda declares its parameter types explicitly.
#[derive(Clone, Debug)]
pub struct UnboundLambda {
    pub id: LambdaId,
    pub parameter_types: Option<Vec<TypeId>>,
}

impl UnboundLambda {
    pub fn implicitly_typed(id: LambdaId) -> Self {
        UnboundLambda {
            id,
            parameter_types: None,
        }
    }

    pub fn explicitly_typed(id: LambdaId, parameter_types: Vec<TypeId>) -> Self {
        UnboundLambda {
            id,
            parameter_types: Some(parameter_types),
        }
    }
}

/// A method-group argument.
#[derive(Clone, Debug)]
pub struct MethodGroup {
    pub id: MethodGroupId,
}

/// One bound call argument.
#[derive(Clone, Debug)]
pub enum BoundArgument {
    /// An expression with a type.
    Typed { ty: TypeId },
    /// An anonymous function not yet bound to a delegate.
    Lambda(UnboundLambda),
    /// A method group.
    MethodGroup(MethodGroup),
    /// A tuple literal; `ty` is its natural type when every element has one.
    TupleLiteral {
        elements: Vec<BoundArgument>,
        ty: Option<TypeId>,
    },
    /// An argument with no usable type (e.g. a null literal).
    Other,
}

impl BoundArgument {
    pub fn typed(ty: TypeId) -> Self {
        BoundArgument::Typed { ty }
    }

    /// The argument's type, when it has one.
    pub fn ty(&self) -> Option<TypeId> {
        match self {
            BoundArgument::Typed { ty } => Some(*ty),
            BoundArgument::TupleLiteral { ty, .. } => *ty,
            _ => None,
        }
    }
}
