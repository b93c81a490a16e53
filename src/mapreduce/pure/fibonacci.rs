//! Memoized Fibonacci weights for document ranking

/// Largest index whose Fibonacci number fits in a `u128`
pub const MAX_FIBONACCI_INDEX: usize = 186;

/// Incrementally extended Fibonacci memo table
///
/// Each reduce worker owns its own cache; it is never shared.
#[derive(Debug, Clone)]
pub struct FibonacciCache {
    values: Vec<u128>,
}

impl FibonacciCache {
    pub fn new() -> Self {
        Self { values: vec![0, 1] }
    }

    /// Return `fib(index)`, extending the table as needed
    ///
    /// Returns `None` when the value does not fit in a `u128`.
    pub fn get(&mut self, index: usize) -> Option<u128> {
        if index > MAX_FIBONACCI_INDEX {
            return None;
        }
        while self.values.len() <= index {
            let n = self.values.len();
            let next = self.values[n - 1].checked_add(self.values[n - 2])?;
            self.values.push(next);
        }
        Some(self.values[index])
    }

}

impl Default for FibonacciCache {
    fn default() -> Self {
        Self::new()
    }
}
