//! Hash-consed type interning and the named-definition registry.
//!
//! The interner owns every `TypeKey`, interned string, type-parameter record,
//! and named definition. All handles (`TypeId`, `NameId`, `DefId`,
//! `TypeParamId`) index into its arenas. It is single-threaded; interior
//! mutability lets shared references build types on demand.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::key::{
    DefId, DefKind, IntrinsicKind, NameId, NamedDef, TupleShape, TypeArgs, TypeId, TypeKey,
    TypeParamId, TypeParamInfo, TypeParamOwner, Variance,
};

/// Definitions seeded at construction: the canonical array interfaces and the
/// expression-tree wrapper.
#[derive(Clone, Copy, Debug)]
pub struct WellKnownDefs {
    pub enumerable: DefId,
    pub collection: DefId,
    pub list: DefId,
    pub readonly_collection: DefId,
    pub readonly_list: DefId,
    pub expression: DefId,
}

impl WellKnownDefs {
    /// The definitions an array type converts to through the
    /// array-to-interface rule, in declaration order.
    pub fn array_interfaces(&self) -> [DefId; 5] {
        [
            self.enumerable,
            self.collection,
            self.list,
            self.readonly_collection,
            self.readonly_list,
        ]
    }

    pub fn is_array_interface(&self, def: DefId) -> bool {
        self.array_interfaces().contains(&def)
    }
}

pub struct TypeInterner {
    keys: RefCell<Vec<TypeKey>>,
    key_map: RefCell<FxHashMap<TypeKey, TypeId>>,
    strings: RefCell<Vec<String>>,
    string_map: RefCell<FxHashMap<String, NameId>>,
    defs: RefCell<Vec<NamedDef>>,
    params: RefCell<Vec<TypeParamInfo>>,
    well_known: WellKnownDefs,
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut seed = Seeder::default();

        for kind in [
            IntrinsicKind::Error,
            IntrinsicKind::Void,
            IntrinsicKind::Object,
            IntrinsicKind::Dynamic,
            IntrinsicKind::String,
            IntrinsicKind::Bool,
            IntrinsicKind::Char,
            IntrinsicKind::Int,
            IntrinsicKind::Uint,
            IntrinsicKind::Long,
            IntrinsicKind::Ulong,
            IntrinsicKind::Float,
            IntrinsicKind::Double,
            IntrinsicKind::Decimal,
        ] {
            seed.intern(TypeKey::Intrinsic(kind));
        }
        debug_assert_eq!(seed.keys.len(), TypeId::DECIMAL.0 as usize + 1);

        let enumerable = seed.interface("IEnumerable", Variance::Out, &[]);
        let collection = seed.interface("ICollection", Variance::Invariant, &[enumerable]);
        let list = seed.interface("IList", Variance::Invariant, &[collection]);
        let readonly_collection =
            seed.interface("IReadOnlyCollection", Variance::Out, &[enumerable]);
        let readonly_list =
            seed.interface("IReadOnlyList", Variance::Out, &[readonly_collection]);

        let expr_name = seed.intern_string("Expression");
        let t_delegate_name = seed.intern_string("TDelegate");
        let expr_param = seed.fresh_type_param(TypeParamInfo::of_type(
            t_delegate_name,
            0,
            Variance::Invariant,
        ));
        let mut expr_def = NamedDef::new(expr_name, DefKind::Class);
        expr_def.type_params = vec![expr_param];
        expr_def.flags |= crate::key::DefFlags::EXPRESSION_WRAPPER;
        let expression = seed.add_def(expr_def);

        let well_known = WellKnownDefs {
            enumerable,
            collection,
            list,
            readonly_collection,
            readonly_list,
            expression,
        };

        TypeInterner {
            keys: RefCell::new(seed.keys),
            key_map: RefCell::new(seed.key_map),
            strings: RefCell::new(seed.strings),
            string_map: RefCell::new(seed.string_map),
            defs: RefCell::new(seed.defs),
            params: RefCell::new(seed.params),
            well_known,
        }
    }

    pub fn well_known(&self) -> WellKnownDefs {
        self.well_known
    }

    // =========================================================================
    // Interning
    // =========================================================================

    pub fn intern(&self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.key_map.borrow().get(&key) {
            return id;
        }
        let mut keys = self.keys.borrow_mut();
        let id = TypeId(keys.len() as u32);
        keys.push(key.clone());
        self.key_map.borrow_mut().insert(key, id);
        id
    }

    /// The structural key of a type. Returns a clone; keys are small.
    pub fn key(&self, id: TypeId) -> TypeKey {
        self.keys.borrow()[id.0 as usize].clone()
    }

    pub fn intern_string(&self, text: &str) -> NameId {
        if let Some(&id) = self.string_map.borrow().get(text) {
            return id;
        }
        let mut strings = self.strings.borrow_mut();
        let id = NameId(strings.len() as u32);
        strings.push(text.to_string());
        self.string_map.borrow_mut().insert(text.to_string(), id);
        id
    }

    pub fn name_text(&self, id: NameId) -> String {
        self.strings.borrow()[id.0 as usize].clone()
    }

    // =========================================================================
    // Type factories
    // =========================================================================

    pub fn named(&self, def: DefId, args: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.intern(TypeKey::Named {
            def,
            args: args.into_iter().collect::<TypeArgs>(),
        })
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.array_of_rank(element, 1)
    }

    pub fn array_of_rank(&self, element: TypeId, rank: u8) -> TypeId {
        self.intern(TypeKey::Array { element, rank })
    }

    pub fn nullable(&self, underlying: TypeId) -> TypeId {
        self.intern(TypeKey::Nullable(underlying))
    }

    pub fn tuple(&self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeKey::Tuple(TupleShape::nameless(elements)))
    }

    pub fn tuple_with_names(&self, elements: Vec<TypeId>, names: Vec<Option<NameId>>) -> TypeId {
        debug_assert!(names.is_empty() || names.len() == elements.len());
        let names = if names.iter().all(|n| n.is_none()) {
            Vec::new()
        } else {
            names
        };
        self.intern(TypeKey::Tuple(TupleShape { elements, names }))
    }

    pub fn error_with_name(&self, name: NameId) -> TypeId {
        self.intern(TypeKey::Error(Some(name)))
    }

    // =========================================================================
    // Type parameters
    // =========================================================================

    /// Allocate a fresh type parameter. Never deduplicated: two parameters
    /// with identical records are still distinct types.
    pub fn fresh_type_param(&self, info: TypeParamInfo) -> TypeId {
        let mut params = self.params.borrow_mut();
        let pid = TypeParamId(params.len() as u32);
        params.push(info);
        drop(params);
        let mut keys = self.keys.borrow_mut();
        let id = TypeId(keys.len() as u32);
        let key = TypeKey::TypeParam(pid);
        keys.push(key.clone());
        self.key_map.borrow_mut().insert(key, id);
        id
    }

    pub fn fresh_method_type_param(&self, name: &str, ordinal: u16) -> TypeId {
        let name = self.intern_string(name);
        self.fresh_type_param(TypeParamInfo::method(name, ordinal))
    }

    pub fn param_info(&self, id: TypeParamId) -> TypeParamInfo {
        self.params.borrow()[id.0 as usize].clone()
    }

    pub fn update_param(&self, id: TypeParamId, f: impl FnOnce(&mut TypeParamInfo)) {
        f(&mut self.params.borrow_mut()[id.0 as usize]);
    }

    /// The `TypeParamId` behind a type, when it is a type parameter.
    pub fn as_type_param(&self, id: TypeId) -> Option<TypeParamId> {
        match self.keys.borrow().get(id.0 as usize) {
            Some(TypeKey::TypeParam(pid)) => Some(*pid),
            _ => None,
        }
    }

    // =========================================================================
    // Named definitions
    // =========================================================================

    pub fn add_def(&self, def: NamedDef) -> DefId {
        let mut defs = self.defs.borrow_mut();
        let id = DefId(defs.len() as u32);
        defs.push(def);
        id
    }

    pub fn def(&self, id: DefId) -> NamedDef {
        self.defs.borrow()[id.0 as usize].clone()
    }

    /// Patch a definition in place. Used when a definition's base or
    /// interfaces mention the definition itself.
    pub fn update_def(&self, id: DefId, f: impl FnOnce(&mut NamedDef)) {
        f(&mut self.defs.borrow_mut()[id.0 as usize]);
    }

    pub fn def_name(&self, id: DefId) -> String {
        let name = self.defs.borrow()[id.0 as usize].name;
        self.name_text(name)
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}

// =============================================================================
// Construction-time seeding
// =============================================================================

/// Plain-vector mirror of the interner used during `new()`, before the
/// arenas move into their `RefCell`s.
#[derive(Default)]
struct Seeder {
    keys: Vec<TypeKey>,
    key_map: FxHashMap<TypeKey, TypeId>,
    strings: Vec<String>,
    string_map: FxHashMap<String, NameId>,
    defs: Vec<NamedDef>,
    params: Vec<TypeParamInfo>,
}

impl Seeder {
    fn intern(&mut self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.key_map.get(&key) {
            return id;
        }
        let id = TypeId(self.keys.len() as u32);
        self.keys.push(key.clone());
        self.key_map.insert(key, id);
        id
    }

    fn intern_string(&mut self, text: &str) -> NameId {
        if let Some(&id) = self.string_map.get(text) {
            return id;
        }
        let id = NameId(self.strings.len() as u32);
        self.strings.push(text.to_string());
        self.string_map.insert(text.to_string(), id);
        id
    }

    fn fresh_type_param(&mut self, info: TypeParamInfo) -> TypeId {
        let pid = TypeParamId(self.params.len() as u32);
        self.params.push(info);
        self.intern(TypeKey::TypeParam(pid))
    }

    fn add_def(&mut self, def: NamedDef) -> DefId {
        let id = DefId(self.defs.len() as u32);
        self.defs.push(def);
        id
    }

    /// Seed a single-parameter interface, instantiating each base interface
    /// definition with this interface's own parameter.
    fn interface(&mut self, name: &str, variance: Variance, bases: &[DefId]) -> DefId {
        let name = self.intern_string(name);
        let param_name = self.intern_string("T");
        let param = self.fresh_type_param(TypeParamInfo {
            name: param_name,
            ordinal: 0,
            owner: TypeParamOwner::Type,
            variance,
            flags: crate::key::TypeParamFlags::empty(),
            effective_base: None,
            effective_interfaces: Vec::new(),
        });
        let mut def = NamedDef::new(name, DefKind::Interface);
        def.type_params = vec![param];
        def.interfaces = bases
            .iter()
            .map(|&base| {
                self.intern(TypeKey::Named {
                    def: base,
                    args: TypeArgs::from_slice(&[param]),
                })
            })
            .collect();
        self.add_def(def)
    }
}
