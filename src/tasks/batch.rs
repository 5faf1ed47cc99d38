/// Split `total` elements into `batch_count` contiguous batches and return `(start, count)` of batch `batch_id`.
///
/// Every batch gets `total / batch_count` elements, and the first `total % batch_count`
/// batches get one extra. The batches cover `0..total` without gaps or overlaps.
#[inline]
pub fn batch_start_count(total: usize, batch_id: usize, batch_count: usize) -> (usize, usize) {
	assert!(batch_count > 0, "Batch count must be at least 1");
	debug_assert!(batch_id < batch_count);

	let base = total / batch_count;
	let remainder = total % batch_count;

	let start = batch_id * base + usize::min(batch_id, remainder);
	let count = base + usize::from(batch_id < remainder);
	(start, count)
}
