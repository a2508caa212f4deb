//! Pure reorder of a ranked list.

use super::{PrioritizedItem, ReorderError};

/// Moves the item at `from` to `to` and reassigns dense `order_index` values.
///
/// Returns a new list; the input is not touched. `from == to` yields an
/// identical (reindexed) copy.
///
/// # Errors
///
/// - `IndexOutOfBounds` if either index is `>= items.len()`
pub fn reorder(
    items: &[PrioritizedItem],
    from: usize,
    to: usize,
) -> Result<Vec<PrioritizedItem>, ReorderError> {
    check_index(from, items.len())?;
    check_index(to, items.len())?;

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    reindex(&mut reordered);
    Ok(reordered)
}

/// Sets every item's `order_index` to its position.
pub fn reindex(items: &mut [PrioritizedItem]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.order_index = position;
    }
}

fn check_index(index: usize, len: usize) -> Result<(), ReorderError> {
    if index >= len {
        return Err(ReorderError::IndexOutOfBounds { index, len });
    }
    Ok(())
}
