use penndraw_engine::scene::{PrimitiveHandle, Renderer};

/// Handles of everything drawn so far, in paint order.
///
/// The registry is the sole owner of each handle; handles leave it only
/// through [`release_all`](Self::release_all).
#[derive(Debug, Default)]
pub struct SceneRegistry {
    handles: Vec<PrimitiveHandle>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a freshly submitted primitive on top of the others.
    pub fn register(&mut self, handle: PrimitiveHandle) {
        self.handles.push(handle);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &PrimitiveHandle> {
        self.handles.iter()
    }

    /// Most recently drawn primitive.
    pub fn last(&self) -> Option<&PrimitiveHandle> {
        self.handles.last()
    }

    /// Hands every handle back to `renderer` and empties the registry.
    pub fn release_all<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for handle in self.handles.drain(..) {
            renderer.release(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use penndraw_engine::coords::Vec2;
    use penndraw_engine::paint::Rgba8;
    use penndraw_engine::scene::DrawList;

    use super::*;

    #[test]
    fn keeps_submission_order() {
        let mut list = DrawList::new();
        let mut reg = SceneRegistry::new();
        let a = list.submit_line_segment(Vec2::zero(), Vec2::new(1.0, 1.0), 1.0, Rgba8::WHITE);
        let b = list.submit_line_segment(Vec2::zero(), Vec2::new(2.0, 2.0), 1.0, Rgba8::WHITE);
        let (ka, kb) = (a.key(), b.key());
        reg.register(a);
        reg.register(b);

        let keys: Vec<_> = reg.iter().map(|h| h.key()).collect();
        assert_eq!(keys, vec![ka, kb]);
        assert_eq!(reg.last().map(|h| h.key()), Some(kb));
    }

    #[test]
    fn release_all_frees_primitives() {
        let mut list = DrawList::new();
        let mut reg = SceneRegistry::new();
        for i in 0..3 {
            let h = list.submit_filled_polygon(
                vec![Vec2::zero(), Vec2::new(i as f32 + 1.0, 0.0), Vec2::new(0.0, 1.0)],
                Rgba8::BLACK,
            );
            reg.register(h);
        }
        let keys: Vec<_> = reg.iter().map(|h| h.key()).collect();

        reg.release_all(&mut list);

        assert!(reg.is_empty());
        assert!(list.is_empty());
        assert!(keys.iter().all(|k| !list.contains_key(*k)));
    }
}
