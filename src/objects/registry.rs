//! Append-only store of accepted objects

use super::record::LunarObject;
use crate::core::types::{ObjectId, ObjectType};

/// Accepted objects, in acceptance order
///
/// Ids are derived from position in the arena (`index + 1`), so they are
/// dense, increasing and never reused. Objects cannot be updated or removed
/// once inserted.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: Vec<LunarObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an object, returning its id (`len + 1`)
    pub fn insert(&mut self, object: LunarObject) -> ObjectId {
        let id = ObjectId(self.objects.len() as u64 + 1);
        tracing::info!("Registered {} object with ID {}", object.object_type, id);
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&LunarObject> {
        let index = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.objects.get(index)
    }

    /// Iterate in id order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &LunarObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (ObjectId(i as u64 + 1), obj))
    }

    /// Whether any accepted object has this type
    pub fn contains_type(&self, object_type: &ObjectType) -> bool {
        self.objects.iter().any(|obj| &obj.object_type == object_type)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point;

    #[test]
    fn test_ids_are_sequential() {
        let mut registry = ObjectRegistry::new();
        let a = registry.insert(LunarObject::new("power", Point::new(0.0, 0.0), 1.0));
        let b = registry.insert(LunarObject::new("storage", Point::new(1.0, 0.0), 1.0));

        assert_eq!(a, ObjectId(1));
        assert_eq!(b, ObjectId(2));
        assert_eq!(registry.get(b).unwrap().object_type.as_str(), "storage");
        assert!(registry.get(ObjectId(0)).is_none());
        assert!(registry.get(ObjectId(3)).is_none());
    }

    #[test]
    fn test_iteration_in_insertion_order() {
        let mut registry = ObjectRegistry::new();
        for name in ["mining", "waste", "power"] {
            registry.insert(LunarObject::new(name, Point::default(), 1.0));
        }
        let order: Vec<_> = registry
            .iter()
            .map(|(id, obj)| (id.0, obj.object_type.to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "mining".to_string()),
                (2, "waste".to_string()),
                (3, "power".to_string())
            ]
        );
        assert!(registry.contains_type(&"waste".into()));
        assert!(!registry.contains_type(&"medical".into()));
    }
}
