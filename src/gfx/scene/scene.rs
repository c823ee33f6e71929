use cgmath::Vector3;

use crate::error::{Result, SceneError};

use super::object::{Attribute, PrimitiveKind, SceneObject};

/// What happened to the scene. Queued by every mutating call and drained by
/// whoever renders the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneChange {
    ObjectAdded { index: usize, kind: PrimitiveKind },
    ObjectRemoved { index: usize, kind: PrimitiveKind },
    AttributeChanged { index: usize, attribute: Attribute },
    /// `count` objects appended by a load, starting at `first`.
    ObjectsLoaded { first: usize, count: usize },
    Cleared,
}

/// Ordered collection of placed primitives.
///
/// Objects are addressed by their position in insertion order; removing an
/// object shifts every later one down by one.
///
/// Every mutation also queues a [`SceneChange`]. The queue is never trimmed
/// on its own: an owner that does not care about notifications must still
/// drain it with [`Scene::take_changes`]. [`Editor`](crate::app::Editor)
/// drains it after every command.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    default_color: Vector3<f64>,
    changes: Vec<SceneChange>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::with_default_color(SceneObject::DEFAULT_COLOR)
    }

    /// Creates an empty scene whose new objects start with `color`
    pub fn with_default_color(color: Vector3<f64>) -> Self {
        Self {
            objects: Vec::new(),
            default_color: color,
            changes: Vec::new(),
        }
    }

    /// Appends a default object of `kind` and returns its index (always the
    /// new last index).
    pub fn create(&mut self, kind: PrimitiveKind) -> usize {
        let mut object = SceneObject::new(kind);
        object.color = self.default_color;
        self.objects.push(object);

        let index = self.objects.len() - 1;
        log::debug!("Created {} at index {}", kind, index);
        self.changes.push(SceneChange::ObjectAdded { index, kind });
        index
    }

    /// Deletes the object at `index`, shifting later objects down.
    pub fn remove(&mut self, index: usize) -> Result<SceneObject> {
        self.check_index(index)?;
        let removed = self.objects.remove(index);

        log::debug!("Removed {} at index {}", removed.kind, index);
        self.changes.push(SceneChange::ObjectRemoved {
            index,
            kind: removed.kind,
        });
        Ok(removed)
    }

    pub fn set_translate(&mut self, index: usize, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(index, Attribute::Translate, value)
    }

    pub fn set_rotate(&mut self, index: usize, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(index, Attribute::Rotate, value)
    }

    pub fn set_scale(&mut self, index: usize, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(index, Attribute::Scale, value)
    }

    pub fn set_color(&mut self, index: usize, value: Vector3<f64>) -> Result<()> {
        self.set_attribute(index, Attribute::Color, value)
    }

    /// Overwrites one attribute of the object at `index` in place.
    pub fn set_attribute(
        &mut self,
        index: usize,
        attribute: Attribute,
        value: Vector3<f64>,
    ) -> Result<()> {
        self.check_index(index)?;
        self.objects[index].set_attribute(attribute, value);

        log::debug!("Set {:?} of object {} to {:?}", attribute, index, value);
        self.changes
            .push(SceneChange::AttributeChanged { index, attribute });
        Ok(())
    }

    /// Returns a copy of the object at `index`.
    pub fn get(&self, index: usize) -> Result<SceneObject> {
        self.check_index(index)?;
        Ok(self.objects[index])
    }

    /// Appends already-built objects on top of the current content.
    ///
    /// This is what a load does: nothing is cleared first.
    pub fn append(&mut self, objects: impl IntoIterator<Item = SceneObject>) -> usize {
        let first = self.objects.len();
        self.objects.extend(objects);
        let count = self.objects.len() - first;

        if count > 0 {
            self.changes.push(SceneChange::ObjectsLoaded { first, count });
        }
        count
    }

    /// Removes every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.changes.push(SceneChange::Cleared);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Labels for the object list, in scene order.
    pub fn object_labels(&self) -> Vec<&'static str> {
        self.objects.iter().map(|obj| obj.kind.label()).collect()
    }

    /// True if something changed since the last [`Scene::take_changes`].
    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Hands over the queued change notifications and empties the queue.
    pub fn take_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.objects.len() {
            Ok(())
        } else {
            log::warn!(
                "Object index {} is out of range ({} objects)",
                index,
                self.objects.len()
            );
            Err(SceneError::IndexOutOfRange {
                index,
                len: self.objects.len(),
            })
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_create_returns_last_index() {
        let mut scene = Scene::new();
        assert_eq!(scene.create(PrimitiveKind::Cube), 0);
        assert_eq!(scene.get(0).unwrap().scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(scene.create(PrimitiveKind::Sphere), 1);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_remove_shifts_later_indices() {
        let mut scene = Scene::new();
        scene.create(PrimitiveKind::Plane);
        scene.create(PrimitiveKind::Sphere);

        let removed = scene.remove(0).unwrap();
        assert_eq!(removed.kind, PrimitiveKind::Plane);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(0).unwrap().kind, PrimitiveKind::Sphere);
    }

    #[test]
    fn test_out_of_range_leaves_scene_unchanged() {
        let mut scene = Scene::new();
        for _ in 0..3 {
            scene.create(PrimitiveKind::Cube);
        }
        scene.take_changes();
        let before = scene.objects().to_vec();

        let err = scene
            .set_translate(5, Vector3::new(1.0, 2.0, 3.0))
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::IndexOutOfRange { index: 5, len: 3 }
        ));
        assert!(scene.remove(3).is_err());
        assert!(scene.get(3).is_err());

        assert_eq!(scene.objects(), before.as_slice());
        assert!(!scene.has_pending_changes());
    }

    #[test]
    fn test_read_after_write() {
        let mut scene = Scene::new();
        scene.create(PrimitiveKind::Cone);
        scene.create(PrimitiveKind::Pyramid);

        let value = Vector3::new(0.25, -3.5, 1e6);
        scene.set_translate(1, value).unwrap();
        assert_eq!(scene.get(1).unwrap().translate, value);
        scene.set_rotate(1, value).unwrap();
        assert_eq!(scene.get(1).unwrap().rotate, value);
        scene.set_scale(0, value).unwrap();
        assert_eq!(scene.get(0).unwrap().scale, value);
        scene.set_color(0, Vector3::new(1.0, 0.0, 0.5)).unwrap();
        assert_eq!(scene.get(0).unwrap().color, Vector3::new(1.0, 0.0, 0.5));

        // Untouched attributes keep their defaults
        assert_eq!(scene.get(1).unwrap().scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_every_mutation_queues_a_change() {
        let mut scene = Scene::new();
        scene.create(PrimitiveKind::Cube);
        scene.set_color(0, Vector3::new(1.0, 0.0, 0.0)).unwrap();
        scene.remove(0).unwrap();
        scene.clear();

        assert_eq!(
            scene.take_changes(),
            vec![
                SceneChange::ObjectAdded {
                    index: 0,
                    kind: PrimitiveKind::Cube
                },
                SceneChange::AttributeChanged {
                    index: 0,
                    attribute: Attribute::Color
                },
                SceneChange::ObjectRemoved {
                    index: 0,
                    kind: PrimitiveKind::Cube
                },
                SceneChange::Cleared,
            ]
        );
        assert!(scene.take_changes().is_empty());
    }

    #[test]
    fn test_changes_accumulate_until_drained() {
        let mut scene = Scene::new();
        for _ in 0..100 {
            let index = scene.create(PrimitiveKind::Plane);
            scene.set_scale(index, Vector3::new(2.0, 2.0, 2.0)).unwrap();
        }
        assert!(scene.has_pending_changes());
        assert_eq!(scene.take_changes().len(), 200);
        assert!(!scene.has_pending_changes());

        // Rejected commands queue nothing
        assert!(scene.remove(100).is_err());
        assert!(!scene.has_pending_changes());
    }

    #[test]
    fn test_append_keeps_existing_objects() {
        let mut scene = Scene::new();
        scene.create(PrimitiveKind::Plane);
        scene.take_changes();

        let count = scene.append([
            SceneObject::new(PrimitiveKind::Cube),
            SceneObject::new(PrimitiveKind::Wedge),
        ]);
        assert_eq!(count, 2);
        assert_eq!(
            scene.object_labels(),
            vec!["Plane", "Cube", "Wedge"]
        );
        assert_eq!(
            scene.take_changes(),
            vec![SceneChange::ObjectsLoaded { first: 1, count: 2 }]
        );
    }

    #[test]
    fn test_custom_default_color() {
        let mut scene = Scene::with_default_color(Vector3::new(0.1, 0.2, 0.3));
        let index = scene.create(PrimitiveKind::Sphere);
        assert_eq!(scene.get(index).unwrap().color, Vector3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_length_tracks_valid_creates_and_removes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = Scene::new();
        let mut creates = 0usize;
        let mut valid_removes = 0usize;

        for _ in 0..2000 {
            if rng.random_bool(0.55) {
                let kind = PrimitiveKind::ALL[rng.random_range(0..7)];
                scene.create(kind);
                creates += 1;
            } else {
                let index = rng.random_range(0..scene.len() + 3);
                if scene.remove(index).is_ok() {
                    valid_removes += 1;
                }
            }
            assert_eq!(scene.len(), creates - valid_removes);
        }
    }
}
