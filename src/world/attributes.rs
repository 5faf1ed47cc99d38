use std::any::Any;
use std::sync::Arc;
use crate::World;

/// Number of attribute slots of a [World].
pub const MAX_ATTRIBUTES: usize = 8;

/// Attributes are shared values attached to the world itself,
/// such as the scene owning it or a time source read by systems.
impl World {
	/// Store `value` in `slot`, returning the previous value.
	pub fn set_attribute<T: Any + Send + Sync>(
		&mut self, slot: usize, value: Arc<T>,
	) -> Option<Arc<dyn Any + Send + Sync>> {
		assert!(slot < MAX_ATTRIBUTES, "Attribute slot {slot} is out of range");
		self.attributes[slot].replace(value as Arc<dyn Any + Send + Sync>)
	}

	/// Get the value in `slot`, if there is one and it has type `T`.
	pub fn get_attribute<T: Any + Send + Sync>(&self, slot: usize) -> Option<Arc<T>> {
		assert!(slot < MAX_ATTRIBUTES, "Attribute slot {slot} is out of range");
		self.attributes[slot].clone()?.downcast::<T>().ok()
	}

	pub fn remove_attribute(&mut self, slot: usize) -> Option<Arc<dyn Any + Send + Sync>> {
		assert!(slot < MAX_ATTRIBUTES, "Attribute slot {slot} is out of range");
		self.attributes[slot].take()
	}
}
