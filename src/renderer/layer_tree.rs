use crate::highlight::{OverlayShape, RenderSink, ShapeId};

/// In-memory render tree holding overlay shapes in back-to-front order.
///
/// Text is drawn on top of every layer, so "below all other content" means
/// index 0 of this list.
#[derive(Clone, Debug)]
pub struct LayerTree<C> {
    next_id: u64,
    layers: Vec<(ShapeId, OverlayShape<C>)>,
}

impl<C> Default for LayerTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> LayerTree<C> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            layers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Shapes from the back-most to the front-most.
    pub fn shapes(&self) -> impl Iterator<Item = &OverlayShape<C>> {
        self.layers.iter().map(|(_, shape)| shape)
    }

    pub fn get(&self, id: ShapeId) -> Option<&OverlayShape<C>> {
        self.layers
            .iter()
            .find(|(layer_id, _)| *layer_id == id)
            .map(|(_, shape)| shape)
    }
}

impl<C: Copy> RenderSink for LayerTree<C> {
    type Color = C;

    fn insert_below(&mut self, shape: OverlayShape<C>) -> ShapeId {
        let id = ShapeId::new(self.next_id);
        self.next_id += 1;
        self.layers.insert(0, (id, shape));
        id
    }

    fn remove(&mut self, id: ShapeId) -> bool {
        match self.layers.iter().position(|(layer_id, _)| *layer_id == id) {
            Some(index) => {
                self.layers.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{SurfacePoint, SurfaceRect, SurfaceSize};

    fn shape(fill: u32) -> OverlayShape<u32> {
        OverlayShape {
            rect: SurfaceRect::new(SurfacePoint::new(0.0, 0.0), SurfaceSize::new(8.0, 8.0)),
            fill,
            corner_radius: 2.0,
        }
    }

    #[test]
    fn newest_shape_goes_to_the_back() {
        let mut tree = LayerTree::new();
        tree.insert_below(shape(1));
        tree.insert_below(shape(2));
        tree.insert_below(shape(3));

        let fills: Vec<u32> = tree.shapes().map(|shape| shape.fill).collect();
        assert_eq!(fills, [3, 2, 1]);
    }

    #[test]
    fn remove_detaches_by_id() {
        let mut tree = LayerTree::new();
        let first = tree.insert_below(shape(1));
        let second = tree.insert_below(shape(2));

        assert!(tree.remove(first));
        assert!(!tree.remove(first));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(second).map(|shape| shape.fill), Some(2));
        assert!(tree.get(first).is_none());
    }
}
