//! Work list for region growing
//!
//! A LIFO of pending pixel positions. Entries carry only the position;
//! the comparison value is the seed's and never travels with an entry.

/// LIFO work list of pixel positions `(x, y)`.
#[derive(Debug, Clone)]
pub struct GrowStack {
    entries: Vec<(u32, u32)>,
    pushes: usize,
}

impl GrowStack {
    /// Create an empty stack with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            pushes: 0,
        }
    }

    /// Push a position
    #[inline]
    pub fn push(&mut self, x: u32, y: u32) {
        self.entries.push((x, y));
        self.pushes += 1;
    }

    /// Pop the most recently pushed position
    #[inline]
    pub fn pop(&mut self) -> Option<(u32, u32)> {
        self.entries.pop()
    }

    /// Total number of pushes since creation
    pub fn pushes(&self) -> usize {
        self.pushes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = GrowStack::with_capacity(4);
        stack.push(0, 0);
        stack.push(1, 0);
        stack.push(2, 5);
        assert_eq!(stack.pop(), Some((2, 5)));
        assert_eq!(stack.pop(), Some((1, 0)));
        stack.push(7, 7);
        assert_eq!(stack.pop(), Some((7, 7)));
        assert_eq!(stack.pop(), Some((0, 0)));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.pushes(), 4);
    }

    #[test]
    fn test_push_count_survives_pops() {
        let mut stack = GrowStack::with_capacity(1);
        stack.push(1, 1);
        stack.pop();
        stack.push(2, 2);
        assert_eq!(stack.pushes(), 2);
        assert_eq!(stack.pop(), Some((2, 2)));
    }
}
