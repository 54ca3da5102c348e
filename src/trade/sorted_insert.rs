use crate::error::SearchError;
use std::cmp::Ordering;

/// Inserts `add` into `items`, which is sorted by `comparator` and holds at
/// most `max_size` entries.
///
/// Equal entries keep insertion order. When the buffer is full the worst
/// entry is evicted and returned; if `add` itself would be last it is
/// returned untouched.
pub fn sorted_insert<T>(
    items: &mut Vec<T>,
    add: T,
    max_size: usize,
    comparator: impl Fn(&T, &T) -> Ordering,
) -> Result<Option<T>, SearchError> {
    if max_size == 0 {
        return Err(SearchError::InvalidMaxSize);
    }
    if items.len() > max_size {
        return Err(SearchError::MaxSizeExceeded);
    }

    let is_full = items.len() == max_size;
    if is_full
        && items
            .last()
            .is_some_and(|last| comparator(last, &add) != Ordering::Greater)
    {
        return Ok(Some(add));
    }

    let index = items.partition_point(|item| comparator(item, &add) != Ordering::Greater);
    items.insert(index, add);

    Ok(if is_full { items.pop() } else { None })
}
