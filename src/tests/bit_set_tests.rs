use crate::data_structures::{BitSet, BIT_SET_CAPACITY};

#[test]
pub fn set_and_get() {
	let mut set = BitSet::new();
	assert!(!set.any());

	for i in [0, 31, 32, 64, 127] {
		set.set(i, true);
		assert!(set.get(i), "Bit {i} should be set");
	}

	assert_eq!(set.count(), 5);
	assert_eq!(set.iter_ones().collect::<Vec<_>>(), vec![0, 31, 32, 64, 127]);

	set.set(31, false);
	assert!(!set.get(31));
	assert_eq!(set.count(), 4);

	set.clear();
	assert!(!set.any());
}

#[test]
pub fn with_without_are_values() {
	let base = BitSet::new().with(3);
	let extended = base.with(100);

	assert!(!base.get(100), "with must not change the original");
	assert!(extended.get(3) && extended.get(100));
	assert_eq!(extended.without(3).iter_ones().collect::<Vec<_>>(), vec![100]);
}

#[test]
pub fn subset_and_intersection() {
	let small: BitSet = [1, 70].into_iter().collect();
	let large: BitSet = [1, 2, 70, 120].into_iter().collect();
	let other: BitSet = [5].into_iter().collect();

	assert!(small.is_subset_of(&large));
	assert!(!large.is_subset_of(&small));
	assert!(BitSet::new().is_subset_of(&small), "The empty set is a subset of every set");

	assert!(small.intersects(&large));
	assert!(!small.intersects(&other));
	assert_eq!(small & large, small);
	assert_eq!((small | other).count(), 3);
	assert_eq!((!BitSet::new()).count(), BIT_SET_CAPACITY);
}
