//! Core type definitions for the strix type system.
//!
//! This module contains the interned `TypeKey` and the shape structs it
//! carries. Identity for everything here is by the interner's handles.

use bitflags::bitflags;
use serde::Serialize;
use smallvec::SmallVec;

// =============================================================================
// Handles
// =============================================================================

/// Unique identifier for a type in the interner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ERROR: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const OBJECT: TypeId = TypeId(2);
    pub const DYNAMIC: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const BOOL: TypeId = TypeId(5);
    pub const CHAR: TypeId = TypeId(6);
    pub const INT: TypeId = TypeId(7);
    pub const UINT: TypeId = TypeId(8);
    pub const LONG: TypeId = TypeId(9);
    pub const ULONG: TypeId = TypeId(10);
    pub const FLOAT: TypeId = TypeId(11);
    pub const DOUBLE: TypeId = TypeId(12);
    pub const DECIMAL: TypeId = TypeId(13);
}

/// Interned identifier name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NameId(pub u32);

/// Identifier of a named type definition in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefId(pub u32);

/// Identifier of a type parameter record. Type parameters are allocated
/// fresh, never hash-consed, so same-named parameters of different scopes
/// stay distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeParamId(pub u32);

pub type TypeArgs = SmallVec<[TypeId; 2]>;

// =============================================================================
// Type Key
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IntrinsicKind {
    Error,
    Void,
    Object,
    Dynamic,
    String,
    Bool,
    Char,
    Int,
    Uint,
    Long,
    Ulong,
    Float,
    Double,
    Decimal,
}

/// Structural key of an interned type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    /// A class, struct, interface, enum, or delegate instantiation.
    Named { def: DefId, args: TypeArgs },
    Array { element: TypeId, rank: u8 },
    /// Nullable value type `T?`.
    Nullable(TypeId),
    /// The ambient tuple type.
    Tuple(TupleShape),
    TypeParam(TypeParamId),
    /// Error placeholder, optionally retaining the name of the type
    /// parameter it stands in for.
    Error(Option<NameId>),
}

/// Elements of an ambient tuple. `names` is either empty (the nameless form)
/// or the same length as `elements`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TupleShape {
    pub elements: Vec<TypeId>,
    pub names: Vec<Option<NameId>>,
}

impl TupleShape {
    pub fn nameless(elements: Vec<TypeId>) -> Self {
        TupleShape {
            elements,
            names: Vec::new(),
        }
    }

    pub fn name_at(&self, index: usize) -> Option<NameId> {
        self.names.get(index).copied().flatten()
    }
}

// =============================================================================
// Variance and pass kinds
// =============================================================================

/// Declared variance of a type parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Variance {
    Invariant,
    /// Covariant (`out`).
    Out,
    /// Contravariant (`in`).
    In,
}

/// How a parameter is passed. Anything other than `Value` forces exact
/// inference on the corresponding argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RefKind {
    Value,
    Ref,
    Out,
    In,
}

impl RefKind {
    pub fn is_by_value(self) -> bool {
        self == RefKind::Value
    }
}

// =============================================================================
// Named definitions
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DefKind {
    Class,
    Struct,
    Interface,
    Delegate,
    Enum,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct DefFlags: u8 {
        /// A nominal type shape-compatible with the ambient tuple of its arity.
        const TUPLE_COMPATIBLE = 1 << 0;
        /// The expression-tree wrapper; its single type argument is a delegate.
        const EXPRESSION_WRAPPER = 1 << 1;
    }
}

/// One parameter of a delegate's invoke shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DelegateParam {
    pub ty: TypeId,
    pub ref_kind: RefKind,
}

/// Invoke shape of a delegate definition, stored over the definition's own
/// type parameters and substituted on query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DelegateShape {
    pub params: Vec<DelegateParam>,
    pub return_type: TypeId,
}

/// A named type definition. `base` and `interfaces` are stored instantiated
/// over the definition's own `type_params`.
#[derive(Clone, Debug)]
pub struct NamedDef {
    pub name: NameId,
    pub kind: DefKind,
    pub type_params: Vec<TypeId>,
    pub base: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub delegate: Option<DelegateShape>,
    pub flags: DefFlags,
}

impl NamedDef {
    pub fn new(name: NameId, kind: DefKind) -> Self {
        NamedDef {
            name,
            kind,
            type_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            delegate: None,
            flags: DefFlags::empty(),
        }
    }

    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}

// =============================================================================
// Type parameters
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeParamOwner {
    Method,
    Type,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct TypeParamFlags: u8 {
        /// Constrained to reference types (`where T : class`).
        const REFERENCE_CONSTRAINT = 1 << 0;
    }
}

/// Record of a declared type parameter.
#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    pub name: NameId,
    pub ordinal: u16,
    pub owner: TypeParamOwner,
    pub variance: Variance,
    pub flags: TypeParamFlags,
    /// Effective base class from constraints, used by the class-chain walks.
    pub effective_base: Option<TypeId>,
    /// Effective interfaces from constraints.
    pub effective_interfaces: Vec<TypeId>,
}

impl TypeParamInfo {
    pub fn method(name: NameId, ordinal: u16) -> Self {
        TypeParamInfo {
            name,
            ordinal,
            owner: TypeParamOwner::Method,
            variance: Variance::Invariant,
            flags: TypeParamFlags::empty(),
            effective_base: None,
            effective_interfaces: Vec::new(),
        }
    }

    pub fn of_type(name: NameId, ordinal: u16, variance: Variance) -> Self {
        TypeParamInfo {
            name,
            ordinal,
            owner: TypeParamOwner::Type,
            variance,
            flags: TypeParamFlags::empty(),
            effective_base: None,
            effective_interfaces: Vec::new(),
        }
    }
}
