use crate::components::ComponentId;
use std::any::TypeId;
use std::mem::{align_of, size_of};

/// Plain data attached to an [entity](crate::entities::Entity).
///
/// Components are default-constructed when an entity gains them, so every component must
/// implement [Default]. Use `#[derive(Component)]` to implement this trait.
pub trait Component
where
	Self: 'static + Default + Send + Sync,
{
	/// Human readable name used in diagnostics.
	const NAME: &'static str;
}

/// A runtime representation of a registered [Component] type.
///
/// Holds everything needed to manage values of the type without knowing it statically.
#[derive(Copy, Clone, Debug)]
pub struct ComponentInfo {
	id: ComponentId,
	name: &'static str,
	type_id: TypeId,
	size: usize,
	align: usize,
	default: unsafe fn(*mut u8),
	drop: unsafe fn(*mut u8),
}

impl ComponentInfo {
	pub(crate) fn of<T: Component>(id: ComponentId) -> Self {
		Self {
			id,
			name: T::NAME,
			type_id: TypeId::of::<T>(),
			size: size_of::<T>(),
			align: align_of::<T>(),
			default: default_in_place::<T>,
			drop: drop_in_place::<T>,
		}
	}

	pub const fn id(&self) -> ComponentId {
		self.id
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	pub const fn size(&self) -> usize {
		self.size
	}

	pub const fn align(&self) -> usize {
		self.align
	}

	pub(crate) fn default_fn(&self) -> unsafe fn(*mut u8) {
		self.default
	}

	pub(crate) fn drop_fn(&self) -> unsafe fn(*mut u8) {
		self.drop
	}
}

unsafe fn default_in_place<T: Component>(ptr: *mut u8) {
	unsafe { std::ptr::write(ptr as *mut T, T::default()) }
}

unsafe fn drop_in_place<T: Component>(ptr: *mut u8) {
	unsafe { std::ptr::drop_in_place(ptr as *mut T) }
}
