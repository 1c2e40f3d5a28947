//! Opaque ID newtypes for context-owned IR entities.
//!
//! Each ID is a thin `u32` wrapper that is `Copy` and `Hash`. IDs are created by
//! [`Arena::alloc`](crate::arena::Arena::alloc) and are only meaningful for the
//! [`Context`](crate::Context) that created them.

use crate::arena::ArenaId;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub const fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub const fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a namespace in the context.
    NamespaceId
);

define_id!(
    /// Opaque, copyable ID for a module in the context.
    ModuleId
);

define_id!(
    /// Opaque, copyable ID for a generator in the context.
    GeneratorId
);

define_id!(
    /// Opaque, copyable ID for an interned type in the [`TypeDb`](crate::types::TypeDb).
    TypeId
);
