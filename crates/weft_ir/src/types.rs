//! Structural interface types and the interning type database.
//!
//! All types in a context are interned into a [`TypeDb`], which assigns each
//! structurally distinct [`Type`] a [`TypeId`]. Two types with the same shape
//! always share an ID, so type equality is an integer comparison.

use crate::ids::TypeId;
use std::collections::HashMap;
use weft_common::Ident;

/// A module interface type or a type-valued configuration argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The unconstrained type.
    Any,
    /// A single input bit.
    BitIn,
    /// A single output bit.
    BitOut,
    /// A fixed-length homogeneous array.
    Array {
        /// The type of each element.
        element: TypeId,
        /// The number of elements.
        len: u32,
    },
    /// A record of named fields in declaration order. Field names are unique.
    Record {
        /// Named fields with their types.
        fields: Vec<(Ident, TypeId)>,
    },
}

impl Type {
    /// Returns the kind name used for this type in documents.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::BitIn => "BitIn",
            Type::BitOut => "BitOut",
            Type::Array { .. } => "Array",
            Type::Record { .. } => "Record",
        }
    }
}

/// A record field name that appeared twice in one [`Type::Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateField(pub Ident);

/// Central type database with structural interning.
///
/// The leaf types are interned at construction and live at fixed IDs
/// ([`TypeDb::ANY`], [`TypeDb::BIT_IN`], [`TypeDb::BIT_OUT`]).
#[derive(Debug, Clone)]
pub struct TypeDb {
    types: Vec<Type>,
    index: HashMap<Type, TypeId>,
}

impl TypeDb {
    /// The ID of [`Type::Any`].
    pub const ANY: TypeId = TypeId::from_raw(0);
    /// The ID of [`Type::BitIn`].
    pub const BIT_IN: TypeId = TypeId::from_raw(1);
    /// The ID of [`Type::BitOut`].
    pub const BIT_OUT: TypeId = TypeId::from_raw(2);

    const LEAF_COUNT: usize = 3;

    /// Creates a type database holding only the leaf types.
    pub fn new() -> Self {
        let mut db = Self {
            types: Vec::new(),
            index: HashMap::new(),
        };
        db.intern(Type::Any);
        db.intern(Type::BitIn);
        db.intern(Type::BitOut);
        db
    }

    /// Interns a type, returning its [`TypeId`].
    ///
    /// If a structurally identical type already exists, returns the existing ID.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.index.get(&ty) {
            return id;
        }
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(ty.clone());
        self.index.insert(ty, id);
        id
    }

    /// Interns `Array(len, element)`.
    pub fn array(&mut self, element: TypeId, len: u32) -> TypeId {
        self.intern(Type::Array { element, len })
    }

    /// Interns a record type, rejecting repeated field names.
    pub fn record(&mut self, fields: Vec<(Ident, TypeId)>) -> Result<TypeId, DuplicateField> {
        for (i, (name, _)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(seen, _)| seen == name) {
                return Err(DuplicateField(*name));
            }
        }
        Ok(self.intern(Type::Record { fields }))
    }

    /// Returns the leaf type named `name` (`"Any"`, `"BitIn"` or `"BitOut"`).
    pub fn leaf_by_name(name: &str) -> Option<TypeId> {
        match name {
            "Any" => Some(Self::ANY),
            "BitIn" => Some(Self::BIT_IN),
            "BitOut" => Some(Self::BIT_OUT),
            _ => None,
        }
    }

    /// Returns a reference to the type with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.as_raw() as usize]
    }

    /// Drops every type interned at or after index `len`. The leaf types are
    /// never dropped.
    pub fn truncate(&mut self, len: usize) {
        let len = len.max(Self::LEAF_COUNT);
        self.types.truncate(len);
        self.index.retain(|_, id| (id.as_raw() as usize) < len);
    }

    /// Returns the number of interned types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: the leaf types are interned at construction.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_are_preinterned() {
        let db = TypeDb::new();
        assert_eq!(db.len(), 3);
        assert_eq!(*db.get(TypeDb::ANY), Type::Any);
        assert_eq!(*db.get(TypeDb::BIT_IN), Type::BitIn);
        assert_eq!(*db.get(TypeDb::BIT_OUT), Type::BitOut);
    }

    #[test]
    fn intern_deduplicates() {
        let mut db = TypeDb::new();
        let a = db.array(TypeDb::BIT_IN, 8);
        let b = db.array(TypeDb::BIT_IN, 8);
        assert_eq!(a, b);
        assert_eq!(db.len(), 4);
        assert_eq!(db.intern(Type::BitOut), TypeDb::BIT_OUT);
    }

    #[test]
    fn different_shapes_differ() {
        let mut db = TypeDb::new();
        let a = db.array(TypeDb::BIT_IN, 8);
        let b = db.array(TypeDb::BIT_IN, 16);
        let c = db.array(TypeDb::BIT_OUT, 8);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn nested_records_intern_structurally() {
        let mut db = TypeDb::new();
        let (x, y) = (Ident::from_raw(0), Ident::from_raw(1));
        let inner = db.record(vec![(x, TypeDb::BIT_IN)]).unwrap();
        let outer_a = db.record(vec![(y, inner)]).unwrap();
        let inner_again = db.record(vec![(x, TypeDb::BIT_IN)]).unwrap();
        let outer_b = db.record(vec![(y, inner_again)]).unwrap();
        assert_eq!(outer_a, outer_b);
    }

    #[test]
    fn record_field_order_matters() {
        let mut db = TypeDb::new();
        let (x, y) = (Ident::from_raw(0), Ident::from_raw(1));
        let xy = db.record(vec![(x, TypeDb::BIT_IN), (y, TypeDb::BIT_OUT)]);
        let yx = db.record(vec![(y, TypeDb::BIT_OUT), (x, TypeDb::BIT_IN)]);
        assert_ne!(xy, yx);
    }

    #[test]
    fn record_rejects_duplicate_fields() {
        let mut db = TypeDb::new();
        let x = Ident::from_raw(7);
        let err = db
            .record(vec![(x, TypeDb::BIT_IN), (x, TypeDb::BIT_OUT)])
            .unwrap_err();
        assert_eq!(err, DuplicateField(x));
        assert_eq!(db.len(), 3);
    }

    #[test]
    fn leaf_names() {
        assert_eq!(TypeDb::leaf_by_name("BitIn"), Some(TypeDb::BIT_IN));
        assert_eq!(TypeDb::leaf_by_name("Any"), Some(TypeDb::ANY));
        assert_eq!(TypeDb::leaf_by_name("Bit"), None);
        assert_eq!(Type::Array { element: TypeDb::ANY, len: 0 }.kind_name(), "Array");
    }

    #[test]
    fn truncate_forgets_new_types_but_keeps_leaves() {
        let mut db = TypeDb::new();
        let arr = db.array(TypeDb::BIT_IN, 4);
        db.truncate(0);
        assert_eq!(db.len(), 3);
        let again = db.array(TypeDb::BIT_OUT, 2);
        assert_eq!(again, arr);
        assert_eq!(*db.get(again), Type::Array { element: TypeDb::BIT_OUT, len: 2 });
    }
}
