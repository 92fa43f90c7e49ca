//! Cyclic index arithmetic for list selections.

/// Index after `current` in a list of `len` items, wrapping past the end.
///
/// An empty list always yields `0`.
pub fn next_wrapped_index(len: usize, current: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + 1) % len
}

/// Index before `current` in a list of `len` items, wrapping past the start.
///
/// An empty list always yields `0`.
pub fn previous_wrapped_index(len: usize, current: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + len - 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_zero() {
        assert_eq!(next_wrapped_index(0, 0), 0);
        assert_eq!(previous_wrapped_index(0, 0), 0);
        assert_eq!(next_wrapped_index(0, 7), 0);
        assert_eq!(previous_wrapped_index(0, 7), 0);
    }

    #[test]
    fn test_wraps_at_both_ends() {
        assert_eq!(next_wrapped_index(3, 2), 0);
        assert_eq!(previous_wrapped_index(3, 0), 2);
        assert_eq!(next_wrapped_index(3, 0), 1);
        assert_eq!(previous_wrapped_index(3, 2), 1);
    }

    #[test]
    fn test_single_item_stays_put() {
        assert_eq!(next_wrapped_index(1, 0), 0);
        assert_eq!(previous_wrapped_index(1, 0), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for len in 1..=8 {
            for start in 0..len {
                let mut forward = start;
                let mut backward = start;
                for _ in 0..len {
                    forward = next_wrapped_index(len, forward);
                    backward = previous_wrapped_index(len, backward);
                }
                assert_eq!(forward, start, "next cycle, len {len}");
                assert_eq!(backward, start, "previous cycle, len {len}");
            }
        }
    }

    #[test]
    fn test_next_then_previous_is_identity() {
        for len in 1..=8 {
            for start in 0..len {
                let there = next_wrapped_index(len, start);
                assert_eq!(previous_wrapped_index(len, there), start);
            }
        }
    }
}
