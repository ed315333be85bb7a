use slotmap::new_key_type;

new_key_type! {
    /// Generational key of a primitive inside a [`DrawList`](super::DrawList).
    ///
    /// A released key never aliases a later primitive.
    pub struct PrimitiveKey;
}

/// Opaque, exclusively-owned handle to a submitted primitive.
///
/// Not `Clone`: whoever holds the handle owns the primitive, and giving it
/// back through [`Renderer::release`](super::Renderer::release) is the only way
/// to free it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveHandle(PrimitiveKey);

impl PrimitiveHandle {
    #[inline]
    pub fn new(key: PrimitiveKey) -> Self {
        Self(key)
    }

    #[inline]
    pub fn key(&self) -> PrimitiveKey {
        self.0
    }
}
