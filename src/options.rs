//! Encoder configuration.

// ============================================================================
// OverflowPolicy
// ============================================================================

/// What an encoder does with a value wider than its wire field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail with `CodecError::ValueOutOfRange`.
    #[default]
    Reject,
    /// Keep only what fits: indices keep their low byte, payloads are cut to
    /// the largest length the field can carry. Each occurrence emits a
    /// `warn` event.
    Mask,
}

// ============================================================================
// EncodeOptions
// ============================================================================

/// Options shared by every section encoder and the envelope encoder.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    pub overflow: OverflowPolicy,
}

impl EncodeOptions {
    /// Strict encoding: out-of-range values are errors.
    pub fn strict() -> Self {
        Self {
            overflow: OverflowPolicy::Reject,
        }
    }

    /// Byte-compatible with legacy writers that truncate silently.
    pub fn masking() -> Self {
        Self {
            overflow: OverflowPolicy::Mask,
        }
    }
}
