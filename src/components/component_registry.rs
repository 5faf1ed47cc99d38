use crate::components::{Component, ComponentId, ComponentInfo};
use crate::archetypes::{Archetype, MAX_COMPONENTS};
use crate::queries::QueryBuilder;
use crate::error::{EcsError, EcsResult};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::TypeId;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// Assigns [ComponentIds](ComponentId) to [Component] types.
///
/// Every type a [World](crate::World) works with must be registered once, up front.
/// Ids are assigned in registration order, so a deterministic registration sequence
/// produces the same ids on every run. The registry is then shared with worlds through an
/// [Arc](std::sync::Arc) and is immutable from that point on.
#[derive(Default)]
pub struct ComponentRegistry {
	infos: Vec<ComponentInfo>,
	ids: HashMap<TypeId, ComponentId, Hasher>,
}

impl ComponentRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `T`, returning its id.
	/// Registering an already known type returns the id it was first given.
	pub fn register<T: Component>(&mut self) -> EcsResult<ComponentId> {
		if let Some(id) = self.ids.get(&TypeId::of::<T>()) {
			return Ok(*id);
		}

		if self.infos.len() >= MAX_COMPONENTS {
			return Err(EcsError::TooManyComponents { limit: MAX_COMPONENTS });
		}

		let id = ComponentId::new(self.infos.len() as u32);
		self.infos.push(ComponentInfo::of::<T>(id));
		self.ids.insert(TypeId::of::<T>(), id);

		log::debug!("registered component {} as {:?}", T::NAME, id);
		Ok(id)
	}

	/// Get the id of `T`.
	/// Panics if `T` was never registered.
	#[inline]
	pub fn id_of<T: Component>(&self) -> ComponentId {
		match self.ids.get(&TypeId::of::<T>()) {
			Some(id) => *id,
			None => panic!("Component {} is not registered", T::NAME),
		}
	}

	/// Get the id of `T`, if it was registered.
	pub fn try_id_of<T: Component>(&self) -> EcsResult<ComponentId> {
		self.ids.get(&TypeId::of::<T>()).copied().ok_or(EcsError::UnknownComponent(T::NAME))
	}

	pub fn info(&self, id: ComponentId) -> &ComponentInfo {
		&self.infos[id.index()]
	}

	pub fn infos(&self) -> &[ComponentInfo] {
		&self.infos
	}

	pub fn len(&self) -> usize {
		self.infos.len()
	}

	pub fn is_empty(&self) -> bool {
		self.infos.is_empty()
	}

	/// Build the [Archetype] made of the component types in `S`.
	pub fn archetype<S: ComponentSet>(&self) -> Archetype {
		S::archetype(self)
	}

	/// Start building a [Query](crate::queries::Query) with the given diagnostic name.
	pub fn query(&self, name: impl Into<String>) -> QueryBuilder<'_> {
		QueryBuilder::new(self, name)
	}
}

/// A tuple of [Component] types that together form an [Archetype].
pub trait ComponentSet {
	fn archetype(registry: &ComponentRegistry) -> Archetype;
}

impl ComponentSet for () {
	fn archetype(_: &ComponentRegistry) -> Archetype {
		Archetype::new()
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl <$($t: Component),*> ComponentSet for ($($t,)*) {
            fn archetype(registry: &ComponentRegistry) -> Archetype {
                Archetype::new()$(.with(registry.id_of::<$t>()))*
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
