use crate::archetypes::ArchetypeStorage;
use crate::components::{Component, ComponentRegistry};
use crate::queries::QueryBuilder;
use std::marker::PhantomData;
use std::ptr::NonNull;
use paste::paste;

/// Read-only access to the [Component] `T`.
pub struct Read<T: Component>(PhantomData<fn() -> T>);

/// Read-write access to the [Component] `T`.
pub struct Write<T: Component>(PhantomData<fn() -> T>);

/// A typed set of component accesses, bound to the columns of an [ArchetypeStorage].
///
/// Implemented for [Read], [Write] and tuples of up to 5 of them.
/// It declares the matching [Query](crate::queries::Query) and fetches references for a single slot.
///
/// # Safety
/// Implementations must declare every component they hand out, with the right access,
/// so that [QueryBuilder] can reject sets that would alias a component mutably.
pub unsafe trait ComponentFetch {
	/// The references handed out for a single slot.
	type Item<'a>;

	/// Column pointers resolved once per storage.
	type Columns: Copy + Send + Sync;

	/// Add the accessed components to a query.
	fn declare(builder: QueryBuilder<'_>) -> QueryBuilder<'_>;

	/// Resolve the columns of `storage`.
	/// Panics if the storage lacks one of the components.
	fn columns(storage: &ArchetypeStorage, registry: &ComponentRegistry) -> Self::Columns;

	/// # Safety
	/// - `slot` must be below the size of the storage the columns were resolved from.
	/// - No structural change may happen to that storage while the item is alive.
	/// - The caller must guarantee no other live reference aliases a written component of `slot`.
	unsafe fn fetch<'a>(columns: &Self::Columns, slot: usize) -> Self::Item<'a>;
}

/// The references a [ComponentFetch] hands out for a single slot.
pub type FetchItem<'a, F> = <F as ComponentFetch>::Item<'a>;

/// Raw pointer to the first element of a column.
pub struct ColumnPtr<T>(NonNull<T>);

impl<T> Clone for ColumnPtr<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for ColumnPtr<T> {}

// SAFETY: Components are Send + Sync, and access is coordinated by the fetch contract.
unsafe impl<T: Send + Sync> Send for ColumnPtr<T> {}
unsafe impl<T: Send + Sync> Sync for ColumnPtr<T> {}

impl<T: Component> ColumnPtr<T> {
	pub(crate) fn resolve(storage: &ArchetypeStorage, registry: &ComponentRegistry) -> Self {
		let id = registry.id_of::<T>();
		// SAFETY: Column pointers are never null, even for empty columns.
		Self(unsafe { NonNull::new_unchecked(storage.column_base::<T>(id)) })
	}

	#[inline(always)]
	pub(crate) fn at(&self, slot: usize) -> *mut T {
		// SAFETY: The caller of `fetch` guarantees `slot` is in bounds.
		unsafe { self.0.as_ptr().add(slot) }
	}
}

unsafe impl<T: Component> ComponentFetch for Read<T> {
	type Item<'a> = &'a T;
	type Columns = ColumnPtr<T>;

	fn declare(builder: QueryBuilder<'_>) -> QueryBuilder<'_> {
		builder.read::<T>()
	}

	fn columns(storage: &ArchetypeStorage, registry: &ComponentRegistry) -> Self::Columns {
		ColumnPtr::resolve(storage, registry)
	}

	#[inline(always)]
	unsafe fn fetch<'a>(columns: &Self::Columns, slot: usize) -> Self::Item<'a> {
		unsafe { &*columns.at(slot) }
	}
}

unsafe impl<T: Component> ComponentFetch for Write<T> {
	type Item<'a> = &'a mut T;
	type Columns = ColumnPtr<T>;

	fn declare(builder: QueryBuilder<'_>) -> QueryBuilder<'_> {
		builder.write::<T>()
	}

	fn columns(storage: &ArchetypeStorage, registry: &ComponentRegistry) -> Self::Columns {
		ColumnPtr::resolve(storage, registry)
	}

	#[inline(always)]
	unsafe fn fetch<'a>(columns: &Self::Columns, slot: usize) -> Self::Item<'a> {
		unsafe { &mut *columns.at(slot) }
	}
}

unsafe impl ComponentFetch for () {
	type Item<'a> = ();
	type Columns = ();

	fn declare(builder: QueryBuilder<'_>) -> QueryBuilder<'_> {
		builder
	}

	fn columns(_: &ArchetypeStorage, _: &ComponentRegistry) -> Self::Columns {}

	#[inline(always)]
	unsafe fn fetch<'a>(_: &Self::Columns, _: usize) -> Self::Item<'a> {}
}

macro_rules! impl_component_fetch {
    ($($t: ident),*) => {
        paste! {
            unsafe impl<$($t: ComponentFetch),*> ComponentFetch for ($($t,)*) {
                type Item<'a> = ($(<$t as ComponentFetch>::Item<'a>,)*);
                type Columns = ($(<$t as ComponentFetch>::Columns,)*);

                fn declare(builder: QueryBuilder<'_>) -> QueryBuilder<'_> {
                    $(let builder = <$t>::declare(builder);)*
                    builder
                }

                fn columns(storage: &ArchetypeStorage, registry: &ComponentRegistry) -> Self::Columns {
                    ($(<$t>::columns(storage, registry),)*)
                }

                #[inline(always)]
                unsafe fn fetch<'a>(columns: &Self::Columns, slot: usize) -> Self::Item<'a> {
                    let ($([<$t:lower>],)*) = columns;
                    unsafe { ($(<$t>::fetch([<$t:lower>], slot),)*) }
                }
            }
        }
    };
}

impl_component_fetch!(T0);
impl_component_fetch!(T0, T1);
impl_component_fetch!(T0, T1, T2);
impl_component_fetch!(T0, T1, T2, T3);
impl_component_fetch!(T0, T1, T2, T3, T4);
