use crate::event::Event;

/// A filtered batch plus what the filter removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    pub events: Vec<Event>,
    /// Events folded into an earlier event with the same target.
    pub merged: usize,
    /// Events dropped because they changed nothing.
    pub dropped_null: usize,
}

/// Merges duplicate events and removes null ones.
///
/// Every later Move of the same block, and every later Change of the same
/// `(block, element, name)`, is folded into the earliest such event, which
/// keeps its position. The scan covers the whole batch, not only adjacent
/// entries, and is quadratic in the batch length.
pub fn filter(events: Vec<Event>) -> FilterReport {
    let mut queue = events;
    let mut merged = 0;

    let mut i = 0;
    while i < queue.len() {
        let mut j = i + 1;
        while j < queue.len() {
            let (head, tail) = queue.split_at_mut(j);
            if head[i].absorb(&tail[0]) {
                queue.remove(j);
                merged += 1;
            } else {
                j += 1;
            }
        }
        i += 1;
    }

    let before = queue.len();
    queue.retain(|event| !event.is_null());
    let dropped_null = before - queue.len();

    FilterReport {
        events: queue,
        merged,
        dropped_null,
    }
}
