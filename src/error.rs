/// Errors reported by the recoverable operations of a [`FlatBst`](crate::FlatBst).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The arena cannot address another slot. No state was changed.
    #[error("arena capacity exceeded: at most {max} slots are addressable")]
    CapacityExceeded {
        /// The maximum number of slots the arena can hold.
        max: usize,
    },
    /// The handle is [`Handle::NPOS`](crate::Handle::NPOS), out of range, or refers to a slot
    /// that has since been freed, reused, cleared or rebuilt.
    #[error("handle does not refer to a live element")]
    NotFound,
}
