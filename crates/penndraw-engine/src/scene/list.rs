use slotmap::SlotMap;

use crate::coords::Vec2;
use crate::paint::Rgba8;

use super::{DrawCmd, PrimitiveHandle, PrimitiveKey, Renderer, TextCmd};

/// A single retained primitive: submission order + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Submission index; lower values are painted first.
    pub order: u64,
    pub cmd: DrawCmd,
}

/// Retained primitive store and the concrete [`Renderer`] of this crate.
///
/// Performance characteristics:
/// - `push()` and `remove()` are O(1)
/// - paint-order iteration reuses an internal key buffer that is rebuilt only
///   after the list changed
///
/// Every mutation bumps [`generation`](Self::generation) so GPU-side caches can
/// tell when their tessellation is stale.
#[derive(Debug, Default)]
pub struct DrawList {
    items: SlotMap<PrimitiveKey, DrawItem>,
    next_order: u64,

    sorted_keys: Vec<PrimitiveKey>,
    sorted_dirty: bool,

    generation: u64,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the command behind `handle`, if it has not been released.
    #[inline]
    pub fn get(&self, handle: &PrimitiveHandle) -> Option<&DrawCmd> {
        self.items.get(handle.key()).map(|item| &item.cmd)
    }

    #[inline]
    pub fn contains_key(&self, key: PrimitiveKey) -> bool {
        self.items.contains_key(key)
    }

    /// Stores a command and returns its owning handle.
    pub fn push(&mut self, cmd: DrawCmd) -> PrimitiveHandle {
        let order = self.next_order;
        self.next_order += 1;

        log::trace!("draw list: push {} #{order}", cmd.kind());
        let key = self.items.insert(DrawItem { order, cmd });

        self.touch();
        PrimitiveHandle::new(key)
    }

    /// Removes the primitive behind `handle` and returns its command.
    pub fn remove(&mut self, handle: PrimitiveHandle) -> Option<DrawCmd> {
        let removed = self.items.remove(handle.key()).map(|item| item.cmd);
        if removed.is_some() {
            self.touch();
        } else {
            log::warn!("draw list: release of unknown primitive {:?}", handle.key());
        }
        removed
    }

    /// Drops every primitive. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_keys();
        }

        let items = &self.items;
        self.sorted_keys.iter().filter_map(move |&k| items.get(k))
    }

    fn touch(&mut self) {
        self.sorted_dirty = true;
        self.generation = self.generation.wrapping_add(1);
    }

    fn rebuild_sorted_keys(&mut self) {
        self.sorted_keys.clear();
        self.sorted_keys.extend(self.items.keys());

        let items = &self.items;
        self.sorted_keys.sort_by_key(|&k| items[k].order);

        self.sorted_dirty = false;
    }
}

impl Renderer for DrawList {
    fn submit_filled_polygon(&mut self, vertices: Vec<Vec2>, color: Rgba8) -> PrimitiveHandle {
        self.push_filled_polygon(vertices, color)
    }

    fn submit_stroked_loop(
        &mut self,
        vertices: Vec<Vec2>,
        thickness: f32,
        color: Rgba8,
        closed: bool,
    ) -> PrimitiveHandle {
        self.push_stroked_loop(vertices, thickness, color, closed)
    }

    fn submit_line_segment(&mut self, p1: Vec2, p2: Vec2, width: f32, color: Rgba8) -> PrimitiveHandle {
        self.push_line_segment(p1, p2, width, color)
    }

    fn submit_text(&mut self, text: TextCmd) -> PrimitiveHandle {
        self.push_text(text)
    }

    fn release(&mut self, handle: PrimitiveHandle) {
        self.remove(handle);
    }
}
