//! Ambient, in-process configuration.
//!
//! This config is never loaded from a file: the core makes no filesystem,
//! network, or environment calls, so every knob here is something the
//! caller sets directly in code.

/// Behavioral knobs the core owns. `JoinConfig::default()` reproduces the
/// reference implementation's behavior exactly.
#[derive(Debug, Clone)]
pub struct JoinConfig {
    /// When `true` (default), a candidate-set row referencing a key absent
    /// from its table raises `UnknownKey`. When `false`, that row is
    /// skipped and the run continues.
    pub strict_candidate_keys: bool,

    /// When `true` (default), a duplicate key within a table raises
    /// `DuplicateKey`. Always fatal in the reference behavior; surfaced as
    /// a named flag for symmetry and must not be defaulted to `false` by a
    /// reimplementation.
    pub strict_duplicate_keys: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            strict_candidate_keys: true,
            strict_duplicate_keys: true,
        }
    }
}
