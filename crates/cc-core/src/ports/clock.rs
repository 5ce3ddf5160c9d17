pub trait ClockPort: Send + Sync {
    /// Epoch milliseconds.
    fn now_ms(&self) -> i64;
}
