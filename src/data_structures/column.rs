use crate::components::ComponentInfo;
use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

/// A type-erased, growable array of a single [component](crate::components::Component) type.
///
/// Every slot in `0..len` holds an initialized value. Values are created through the
/// component's default constructor and destroyed through its drop glue, both taken from
/// the [ComponentInfo] the column was created with.
pub(crate) struct Column {
	info: ComponentInfo,
	ptr: NonNull<u8>,
	len: usize,
	capacity: usize,
}

// SAFETY: Only `Send + Sync` types can be registered as components.
unsafe impl Send for Column {}
unsafe impl Sync for Column {}

impl Column {
	pub fn with_capacity(info: ComponentInfo, capacity: usize) -> Self {
		let mut this = Self {
			info,
			ptr: dangling(info.align()),
			len: 0,
			capacity: if info.size() == 0 { usize::MAX } else { 0 },
		};

		this.reserve(capacity);
		this
	}

	#[inline(always)]
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn info(&self) -> &ComponentInfo {
		&self.info
	}

	/// Make room for at least `additional` more values.
	pub fn reserve(&mut self, additional: usize) {
		let required = self.len.checked_add(additional).expect("Column capacity overflow");
		if required <= self.capacity {
			return;
		}

		let new_capacity = usize::max(usize::max(4, self.capacity * 2), required);
		let new_layout = self.layout(new_capacity);

		unsafe {
			let ptr = match self.capacity {
				0 => alloc::alloc(new_layout),
				_ => alloc::realloc(self.ptr.as_ptr(), self.layout(self.capacity), new_layout.size()),
			};

			self.ptr = match NonNull::new(ptr) {
				Some(ptr) => ptr,
				None => alloc::handle_alloc_error(new_layout),
			};
		}

		self.capacity = new_capacity;
	}

	/// Append a default-constructed value and return its slot.
	pub fn push_default(&mut self) -> usize {
		self.reserve(1);

		let slot = self.len;
		// SAFETY: The slot is within capacity and currently uninitialized.
		unsafe { (self.info.default_fn())(self.get_ptr(slot)) };
		self.len += 1;
		slot
	}

	/// Drop the value at `slot` and move the last value into its place.
	///
	/// The removed value is moved past `len` before it is dropped, so a panicking drop leaks it
	/// instead of leaving a dropped value inside the column.
	///
	/// # Safety
	/// `slot` must be smaller than `len`.
	pub unsafe fn swap_remove(&mut self, slot: usize) {
		debug_assert!(slot < self.len);

		let last = self.len - 1;
		if slot != last {
			// SAFETY: Both slots are below `len` and distinct.
			unsafe { ptr::swap_nonoverlapping(self.get_ptr(slot), self.get_ptr(last), self.info.size()) };
		}

		self.len = last;
		// SAFETY: The slot past the new `len` still holds the removed value.
		unsafe { (self.info.drop_fn())(self.get_ptr(last)) };
	}

	/// Swap the value at `slot` with the value at `other_slot` in another column of the same type.
	///
	/// # Safety
	/// Both slots must be initialized and both columns must store the same component type.
	pub unsafe fn swap_with(&mut self, slot: usize, other: &mut Column, other_slot: usize) {
		debug_assert_eq!(self.info.id(), other.info.id());
		debug_assert!(slot < self.len);
		debug_assert!(other_slot < other.len);

		unsafe {
			ptr::swap_nonoverlapping(self.get_ptr(slot), other.get_ptr(other_slot), self.info.size());
		}
	}

	/// Swap the values at two distinct slots of this column.
	///
	/// # Safety
	/// Both slots must be smaller than `len`.
	pub unsafe fn swap_slots(&mut self, a: usize, b: usize) {
		debug_assert!(a < self.len && b < self.len && a != b);
		unsafe { ptr::swap_nonoverlapping(self.get_ptr(a), self.get_ptr(b), self.info.size()) };
	}

	/// Drop all values, keeping the allocation.
	pub fn clear(&mut self) {
		let len = self.len;
		// Values are dropped after `len` is reset so that a panicking drop can't cause a double drop.
		self.len = 0;
		for slot in 0..len {
			// SAFETY: Every slot below the old `len` is initialized.
			unsafe { (self.info.drop_fn())(self.get_ptr(slot)) };
		}
	}

	/// Raw pointer to the value at `slot`.
	/// The pointer is only valid until the next structural change of the column.
	#[inline(always)]
	pub fn get_ptr(&self, slot: usize) -> *mut u8 {
		debug_assert!(self.info.size() == 0 || slot == 0 || slot < self.capacity);
		// SAFETY: The offset stays within the allocation for any slot below capacity.
		unsafe { self.ptr.as_ptr().add(slot * self.info.size()) }
	}

	fn layout(&self, capacity: usize) -> Layout {
		let bytes = self.info.size().checked_mul(capacity).expect("Column capacity overflow");
		Layout::from_size_align(bytes, self.info.align()).expect("Invalid column layout")
	}
}

impl Drop for Column {
	fn drop(&mut self) {
		self.clear();
		if self.info.size() != 0 && self.capacity != 0 {
			// SAFETY: The buffer was allocated with this exact layout.
			unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout(self.capacity)) };
		}
	}
}

fn dangling(align: usize) -> NonNull<u8> {
	// SAFETY: Alignments are never zero.
	unsafe { NonNull::new_unchecked(align as *mut u8) }
}
