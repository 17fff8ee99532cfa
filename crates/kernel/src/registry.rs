use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wormhole_common::{Color, ObjectId, Ray};

/// A clickable object: a colored bounding sphere at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub position: Vec3,
    /// Radius of the bounding sphere used for picking.
    pub radius: f32,
    pub color: Color,
}

impl InteractiveObject {
    /// Ray parameter where `ray` enters this object's bounding sphere.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_sphere(self.position, self.radius)
    }
}

/// A record of every registry mutation, drained by the frame driver so the
/// rendering side can add and drop drawables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryEvent {
    Added(InteractiveObject),
    /// Carries the object as it was when removed.
    Removed(InteractiveObject),
}

/// Nearest object hit by a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: ObjectId,
    /// Distance from the ray origin to the bounding sphere.
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("object position {0} is not finite")]
    NonFinitePosition(Vec3),
    #[error("bounding radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
}

/// The live set of interactive objects.
///
/// Ids are allocated from a counter, so the BTreeMap iterates in insertion
/// order and picking ties resolve to the earliest-added object.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    objects: BTreeMap<ObjectId, InteractiveObject>,
    next_id: u64,
    events: Vec<RegistryEvent>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Register a new object and return its id.
    pub fn add(&mut self, position: Vec3, radius: f32, color: Color) -> Result<ObjectId, RegistryError> {
        if !position.is_finite() {
            return Err(RegistryError::NonFinitePosition(position));
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(RegistryError::InvalidRadius(radius));
        }

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let object = InteractiveObject {
            id,
            position,
            radius,
            color,
        };
        self.objects.insert(id, object);
        self.events.push(RegistryEvent::Added(object));
        tracing::trace!(%id, ?position, "object added");
        Ok(id)
    }

    /// Remove an object. Returns `false` if it was not present.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.take(id).is_some()
    }

    /// Remove an object and hand back its data.
    pub fn take(&mut self, id: ObjectId) -> Option<InteractiveObject> {
        let removed = self.objects.remove(&id);
        match removed {
            Some(object) => {
                self.events.push(RegistryEvent::Removed(object));
                tracing::debug!(%id, "object removed");
            }
            None => tracing::trace!(%id, "remove ignored, object not present"),
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&InteractiveObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InteractiveObject> {
        self.objects.values()
    }

    /// Snapshot of every live object, in insertion order.
    pub fn list_all(&self) -> Vec<InteractiveObject> {
        self.objects.values().copied().collect()
    }

    /// Nearest object whose bounding sphere the ray passes through.
    ///
    /// Ties on distance go to the object added first.
    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for object in self.objects.values() {
            let Some(distance) = object.intersect(ray) else {
                continue;
            };
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Hit {
                    id: object.id,
                    distance,
                });
            }
        }
        best
    }

    /// Read-only access to pending events.
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Drain and return pending events.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_down_neg_z() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn registry_starts_empty() {
        let r = Registry::new();
        assert!(r.is_empty());
        assert!(r.list_all().is_empty());
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let mut r = Registry::new();
        let a = r.add(Vec3::ZERO, 1.0, Color::WHITE).unwrap();
        let b = r.add(Vec3::X, 1.0, Color::WHITE).unwrap();
        assert_ne!(a, b);
        assert!(a < b);
        let listed: Vec<ObjectId> = r.list_all().iter().map(|o| o.id).collect();
        assert_eq!(listed, vec![a, b]);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut r = Registry::new();
        let a = r.add(Vec3::ZERO, 1.0, Color::WHITE).unwrap();
        r.remove(a);
        let b = r.add(Vec3::ZERO, 1.0, Color::WHITE).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut r = Registry::new();
        let id = r.add(Vec3::ZERO, 1.0, Color::WHITE).unwrap();
        assert!(r.remove(id));
        assert!(!r.remove(id));
        assert!(r.is_empty());
        // add + one remove
        assert_eq!(r.events().len(), 2);
    }

    #[test]
    fn rejects_invalid_bounds() {
        let mut r = Registry::new();
        assert_eq!(
            r.add(Vec3::ZERO, 0.0, Color::WHITE).unwrap_err(),
            RegistryError::InvalidRadius(0.0)
        );
        assert!(r.add(Vec3::new(f32::INFINITY, 0.0, 0.0), 1.0, Color::WHITE).is_err());
        assert!(r.is_empty());
        assert!(r.events().is_empty());
    }

    #[test]
    fn pick_returns_nearest() {
        let mut r = Registry::new();
        let far = r.add(Vec3::new(0.0, 0.0, -10.0), 0.5, Color::WHITE).unwrap();
        let near = r.add(Vec3::new(0.0, 0.0, -4.0), 0.5, Color::WHITE).unwrap();
        let hit = r.pick(&ray_down_neg_z()).unwrap();
        assert_eq!(hit.id, near);
        assert!((hit.distance - 3.5).abs() < 1e-5);

        r.remove(near);
        assert_eq!(r.pick(&ray_down_neg_z()).unwrap().id, far);
    }

    #[test]
    fn pick_tie_goes_to_first_inserted() {
        let mut r = Registry::new();
        let first = r.add(Vec3::new(0.0, 0.0, -5.0), 1.0, Color::WHITE).unwrap();
        let _second = r.add(Vec3::new(0.0, 0.0, -5.0), 1.0, Color::from_hex(0xff0000)).unwrap();
        assert_eq!(r.pick(&ray_down_neg_z()).unwrap().id, first);
    }

    #[test]
    fn pick_misses_return_none() {
        let mut r = Registry::new();
        r.add(Vec3::new(5.0, 0.0, -5.0), 1.0, Color::WHITE).unwrap();
        r.add(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE).unwrap();
        assert!(r.pick(&ray_down_neg_z()).is_none());
    }

    #[test]
    fn removed_object_is_never_picked() {
        let mut r = Registry::new();
        let id = r.add(Vec3::new(0.0, 0.0, -5.0), 1.0, Color::WHITE).unwrap();
        r.remove(id);
        assert!(r.pick(&ray_down_neg_z()).is_none());
    }

    #[test]
    fn take_carries_object_into_event() {
        let mut r = Registry::new();
        let color = Color::from_hsl(0.3, 1.0, 0.5);
        let id = r.add(Vec3::Y, 0.25, color).unwrap();
        r.drain_events();

        let taken = r.take(id).unwrap();
        assert_eq!(taken.color, color);
        assert_eq!(r.drain_events(), vec![RegistryEvent::Removed(taken)]);
        assert!(r.events().is_empty());
    }
}
