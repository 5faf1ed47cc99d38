use crate::components::{Component, ComponentFetch, ComponentId, ComponentRegistry};
use crate::archetypes::Archetype;
use crate::data_structures::BitSet;
use std::fmt;

/// Declares which [components](Component) an operation reads, writes or excludes.
///
/// A [Query] selects archetypes: it matches every archetype containing all read and
/// written components and none of the excluded ones.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Query {
	read: BitSet,
	write: BitSet,
	exclude: BitSet,
	name: String,
}

impl Query {
	/// An empty query, matching every archetype.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Declare read access to `id`.
	#[must_use]
	pub fn with_read(mut self, id: ComponentId) -> Self {
		self.read.set(id.index(), true);
		self
	}

	/// Declare write access to `id`. Writing implies reading.
	#[must_use]
	pub fn with_write(mut self, id: ComponentId) -> Self {
		self.read.set(id.index(), true);
		self.write.set(id.index(), true);
		self
	}

	/// Only match archetypes without `id`.
	#[must_use]
	pub fn with_exclude(mut self, id: ComponentId) -> Self {
		self.exclude.set(id.index(), true);
		self
	}

	/// Whether entities of `archetype` are selected by the query.
	#[inline]
	pub fn matches(&self, archetype: &Archetype) -> bool {
		self.read.is_subset_of(archetype.bits()) && !self.exclude.intersects(archetype.bits())
	}

	/// Every component the query requires, regardless of access.
	pub fn required(&self) -> Archetype {
		Archetype::from(self.read | self.write)
	}

	pub fn reads(&self, id: ComponentId) -> bool {
		self.read.get(id.index())
	}

	pub fn writes(&self, id: ComponentId) -> bool {
		self.write.get(id.index())
	}

	pub fn excludes(&self, id: ComponentId) -> bool {
		self.exclude.get(id.index())
	}

	/// Whether every read and write of `other` is also declared by this query.
	pub fn covers(&self, other: &Query) -> bool {
		other.read.is_subset_of(&self.read) && other.write.is_subset_of(&self.write)
	}

	pub(crate) fn write_set(&self) -> BitSet {
		self.write
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl fmt::Debug for Query {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Query")
			.field("name", &self.name)
			.field("read", &self.read)
			.field("write", &self.write)
			.field("exclude", &self.exclude)
			.finish()
	}
}

/// A utility structure to build [Queries](Query) from [component](Component) types.
pub struct QueryBuilder<'r> {
	registry: &'r ComponentRegistry,
	referenced: BitSet,
	query: Query,
}

impl<'r> QueryBuilder<'r> {
	pub(crate) fn new(registry: &'r ComponentRegistry, name: impl Into<String>) -> Self {
		Self {
			registry,
			referenced: BitSet::new(),
			query: Query::new(name),
		}
	}

	/// Declare read access to `T`.
	pub fn read<T: Component>(mut self) -> Self {
		let id = self.reference::<T>();
		self.query = self.query.with_read(id);
		self
	}

	/// Declare write access to `T`.
	pub fn write<T: Component>(mut self) -> Self {
		let id = self.reference::<T>();
		self.query = self.query.with_write(id);
		self
	}

	/// Exclude archetypes containing `T`.
	pub fn exclude<T: Component>(mut self) -> Self {
		let id = self.reference::<T>();
		self.query = self.query.with_exclude(id);
		self
	}

	/// Declare every access of a typed [ComponentFetch].
	pub fn fetch<F: ComponentFetch>(self) -> Self {
		F::declare(self)
	}

	/// Construct the query from the previously specified types.
	pub fn build(self) -> Query {
		self.query
	}

	fn reference<T: Component>(&mut self) -> ComponentId {
		let id = self.registry.id_of::<T>();
		assert!(
			!self.referenced.get(id.index()),
			"Query {:?} references component {} multiple times",
			self.query.name,
			T::NAME
		);
		self.referenced.set(id.index(), true);
		id
	}
}
