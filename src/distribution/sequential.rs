//! Sequential block generation
//!
//! Iteration `i` always touches block slot `i` of the range. Unlike a
//! looping scanner there is no wraparound: config validation guarantees the
//! range holds every block of the run, so an index past the last slot means
//! the caller's state is broken and yields `None`.

/// Block slot for iteration `index`, or `None` past the last slot
#[inline(always)]
pub fn slot_for(index: u64, num_slots: u64) -> Option<u64> {
    if index < num_slots {
        Some(index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_basic() {
        assert_eq!(slot_for(0, 100), Some(0));
        assert_eq!(slot_for(1, 100), Some(1));
        assert_eq!(slot_for(2, 100), Some(2));
        assert_eq!(slot_for(99, 100), Some(99));
    }

    #[test]
    fn test_sequential_no_wraparound() {
        assert_eq!(slot_for(3, 3), None);
        assert_eq!(slot_for(4, 3), None);
        assert_eq!(slot_for(0, 0), None);
    }
}
