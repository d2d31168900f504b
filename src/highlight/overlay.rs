use crate::highlight::geometry::SurfaceRect;

/// Handle of a shape inserted into a [`RenderSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Rounded rectangle drawn behind one visual line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayShape<C> {
    pub rect: SurfaceRect,
    pub fill: C,
    pub corner_radius: f32,
}

/// Render tree that receives overlay shapes.
pub trait RenderSink {
    type Color: Copy;

    /// Inserts `shape` behind everything already in the tree.
    fn insert_below(&mut self, shape: OverlayShape<Self::Color>) -> ShapeId;

    /// Detaches a shape. Returns `false` if `id` is not attached.
    fn remove(&mut self, id: ShapeId) -> bool;
}

/// The shapes a surface currently has attached to its sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlaySet {
    shapes: Vec<ShapeId>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Detaches every shape from `sink` and forgets them.
    pub fn clear<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        for id in self.shapes.drain(..) {
            if !sink.remove(id) {
                log::warn!("Overlay shape {:?} was already detached from its sink.", id);
            }
        }
    }

    /// Inserts `shape` behind the sink's content and records it.
    pub fn insert<S: RenderSink + ?Sized>(&mut self, sink: &mut S, shape: OverlayShape<S::Color>) {
        let id = sink.insert_below(shape);
        self.shapes.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::geometry::{SurfacePoint, SurfaceSize};

    #[derive(Default)]
    struct Recording {
        next: u64,
        attached: Vec<ShapeId>,
    }

    impl RenderSink for Recording {
        type Color = u8;

        fn insert_below(&mut self, _shape: OverlayShape<u8>) -> ShapeId {
            self.next += 1;
            let id = ShapeId::new(self.next);
            self.attached.insert(0, id);
            id
        }

        fn remove(&mut self, id: ShapeId) -> bool {
            let before = self.attached.len();
            self.attached.retain(|attached| *attached != id);
            before != self.attached.len()
        }
    }

    fn shape() -> OverlayShape<u8> {
        OverlayShape {
            rect: SurfaceRect::new(SurfacePoint::new(0.0, 0.0), SurfaceSize::new(4.0, 4.0)),
            fill: 1,
            corner_radius: 0.0,
        }
    }

    #[test]
    fn clear_detaches_everything_it_inserted() {
        let mut sink = Recording::default();
        let mut set = OverlaySet::new();
        set.insert(&mut sink, shape());
        set.insert(&mut sink, shape());
        assert_eq!(set.len(), 2);
        assert_eq!(sink.attached.len(), 2);

        set.clear(&mut sink);

        assert!(set.is_empty());
        assert!(sink.attached.is_empty());
    }

    #[test]
    fn clear_tolerates_shapes_removed_behind_its_back() {
        let mut sink = Recording::default();
        let mut set = OverlaySet::new();
        set.insert(&mut sink, shape());
        sink.attached.clear();

        set.clear(&mut sink);

        assert!(set.is_empty());
    }
}
