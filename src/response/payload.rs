//! Payload typing
//!
//! Defines the lineage used to keep a chain's payloads the same shape.

use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Identity of a payload type within a chain
#[derive(Clone, Copy)]
pub struct Lineage {
    id: TypeId,
    name: &'static str,
}

impl Lineage {
    /// Lineage of a static type
    pub fn of<V: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<V>(),
            name: std::any::type_name::<V>(),
        }
    }

    /// Human readable type name
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Lineage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Lineage {}

impl fmt::Debug for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lineage").field(&self.name).finish()
    }
}

/// A value that can ride along in a [`super::Response`]
///
/// The default lineage is the implementing type itself, which is all a
/// statically typed payload needs:
///
/// ```rust
/// use pagechain::response::Payload;
///
/// struct Cursor(Option<String>);
/// impl Payload for Cursor {}
/// ```
pub trait Payload: Any {
    /// Lineage this value establishes for its chain
    fn lineage(&self) -> Lineage {
        Lineage::of::<Self>()
    }
}

/// Dynamically typed payload
///
/// Its lineage is the type of the value it wraps, so two `AnyPayload`s holding
/// different types are rejected as a mismatch even though the chain itself is
/// `Page<AnyPayload>`.
pub struct AnyPayload {
    value: Box<dyn Any + Send + Sync>,
    lineage: Lineage,
}

impl AnyPayload {
    /// Wrap a value
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self {
            value: Box::new(value),
            lineage: Lineage::of::<V>(),
        }
    }

    /// Borrow the wrapped value if it is a `V`
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    /// Take the wrapped value if it is a `V`
    pub fn downcast<V: Any>(self) -> Result<V, Self> {
        let lineage = self.lineage;
        match self.value.downcast::<V>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { value, lineage }),
        }
    }

    /// Check the wrapped type
    pub fn is<V: Any>(&self) -> bool {
        self.value.is::<V>()
    }

    /// Name of the wrapped type
    pub fn type_name(&self) -> &'static str {
        self.lineage.type_name()
    }
}

impl fmt::Debug for AnyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyPayload")
            .field("type", &self.lineage.type_name())
            .finish_non_exhaustive()
    }
}

impl Payload for AnyPayload {
    fn lineage(&self) -> Lineage {
        self.lineage
    }
}

macro_rules! impl_payload {
    ($($ty:ty),* $(,)?) => {
        $(impl Payload for $ty {})*
    };
}

impl_payload!(
    (),
    bool,
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    f32,
    f64,
    String,
    Value,
);

impl<U: Any> Payload for Vec<U> {}

impl<U: Any> Payload for Option<U> {}

impl<K: Any, V: Any, S: Any> Payload for HashMap<K, V, S> {}
