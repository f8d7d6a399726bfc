use crate::state::CounterState;

/// Picks the counter that frees up first; ties go to the lowest index.
///
/// `counters` must not be empty; the engine validates this before dispatching.
pub fn pick_earliest_available(counters: &[CounterState]) -> usize {
    let mut best_idx = 0;
    let mut best_time = f64::INFINITY;

    for (idx, counter) in counters.iter().enumerate() {
        if counter.next_available < best_time {
            best_time = counter.next_available;
            best_idx = idx;
        }
    }

    best_idx
}
