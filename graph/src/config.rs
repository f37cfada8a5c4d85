/// Configuration for a [crate::ReferenceWriter] or [crate::ReferenceReader].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Maximum number of distinct objects a single call may track.
    ///
    /// Bounds memory when decoding hostile graphs. Exceeding it fails the call.
    pub max_references: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_references: 100_000,
        }
    }
}

/// Configuration for an [crate::InternTable].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InternConfig {
    /// Maximum number of distinct strings to intern.
    ///
    /// Once reached, further strings are written inline rather than failing the call.
    pub max_entries: usize,
}

impl Default for InternConfig {
    fn default() -> Self {
        Self {
            max_entries: 50_000,
        }
    }
}
