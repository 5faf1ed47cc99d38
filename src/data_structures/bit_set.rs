use std::ops::{BitAnd, BitOr, Not};
use std::fmt;

const BITS: usize = 32;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// Number of bits a [BitSet] can hold.
pub const BIT_SET_CAPACITY: usize = 128;

const WORDS: usize = BIT_SET_CAPACITY / BITS;

/// A fixed-capacity bit set.
///
/// Unlike a growable bit-field, two [BitSets](BitSet) with the same bits set always
/// compare and hash equal, which makes it usable as an interning key.
#[derive(Default, Copy, Clone, Hash, Eq, PartialEq)]
pub struct BitSet {
	values: [u32; WORDS],
}

impl BitSet {
	/// Create a new, empty [BitSet].
	pub const fn new() -> Self {
		Self { values: [0; WORDS] }
	}

	/// Get the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to retrieve
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		debug_assert!(i < BIT_SET_CAPACITY, "Bit index {i} is out of range");
		let (position, shift) = Self::pos_shift(i);
		(self.values[position] & (FIRST_BIT >> shift)) != 0
	}

	/// Set the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to modify
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		assert!(i < BIT_SET_CAPACITY, "Bit index {i} is out of range");
		let (position, shift) = Self::pos_shift(i);
		let bit = FIRST_BIT >> shift;

		match value {
			true => self.values[position] |= bit,
			false => self.values[position] &= !bit,
		}
	}

	/// Returns a copy of the [BitSet] with bit `i` set.
	#[must_use]
	pub fn with(mut self, i: usize) -> Self {
		self.set(i, true);
		self
	}

	/// Returns a copy of the [BitSet] with bit `i` cleared.
	#[must_use]
	pub fn without(mut self, i: usize) -> Self {
		self.set(i, false);
		self
	}

	/// Whether at least one bit is set.
	pub fn any(&self) -> bool {
		self.values.iter().any(|v| *v != 0)
	}

	/// Number of set bits.
	pub fn count(&self) -> usize {
		self.values.iter().map(|v| v.count_ones() as usize).sum()
	}

	/// Check if every bit set in `self` is also set in `other`.
	/// The empty set is a subset of every set.
	///
	/// # Arguments
	/// * `other` - The bit set to check against
	pub fn is_subset_of(&self, other: &BitSet) -> bool {
		self.values.iter().zip(other.values.iter()).all(|(mask, bits)| (*bits & *mask) == *mask)
	}

	/// Check if the two sets share at least one bit.
	pub fn intersects(&self, other: &BitSet) -> bool {
		self.values.iter().zip(other.values.iter()).any(|(a, b)| (*a & *b) != 0)
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values.fill(0);
	}

	/// Iterate over the indices of the set bits in ascending order.
	pub fn iter_ones(&self) -> BitSetIterator<'_> {
		BitSetIterator {
			index: 0,
			current: self.values[0],
			values: &self.values,
		}
	}

	#[inline(always)]
	fn pos_shift(a: usize) -> (usize, usize) {
		(a / BITS, a % BITS)
	}
}

impl BitAnd for BitSet {
	type Output = BitSet;

	fn bitand(mut self, rhs: Self) -> Self::Output {
		for (a, b) in self.values.iter_mut().zip(rhs.values) {
			*a &= b;
		}
		self
	}
}

impl BitOr for BitSet {
	type Output = BitSet;

	fn bitor(mut self, rhs: Self) -> Self::Output {
		for (a, b) in self.values.iter_mut().zip(rhs.values) {
			*a |= b;
		}
		self
	}
}

impl Not for BitSet {
	type Output = BitSet;

	fn not(mut self) -> Self::Output {
		for a in self.values.iter_mut() {
			*a = !*a;
		}
		self
	}
}

impl FromIterator<usize> for BitSet {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		let mut set = BitSet::new();
		for i in iter {
			set.set(i, true);
		}
		set
	}
}

impl fmt::Debug for BitSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter_ones()).finish()
	}
}

/// Iterates over the indices of the set bits of a [BitSet].
pub struct BitSetIterator<'l> {
	index: usize,
	current: u32,
	values: &'l [u32; WORDS],
}

impl Iterator for BitSetIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current == 0 {
			self.index += 1;
			if self.index >= WORDS {
				return None;
			}
			self.current = self.values[self.index];
		}

		let shift = self.current.leading_zeros() as usize;
		self.current &= !(FIRST_BIT >> shift);
		Some(self.index * BITS + shift)
	}
}
