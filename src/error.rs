//! Error type shared by the saliency pipeline and its tooling.
//!
//! Every variant except `Io`/`Image`/`Config` is a contract violation: the
//! caller handed in data that does not match the region partition, and the
//! pipeline refuses to continue with undefined numeric behaviour.

/// Result alias used across the crate.
pub type SaliencyResult<T> = Result<T, SaliencyError>;

#[derive(Debug, thiserror::Error)]
pub enum SaliencyError {
    #[error("signal field is {got_w}x{got_h}, partition expects {want_w}x{want_h}")]
    SignalDimensions {
        got_w: usize,
        got_h: usize,
        want_w: usize,
        want_h: usize,
    },

    #[error("buffer holds {got} values, expected {expected}")]
    BufferLength { got: usize, expected: usize },

    #[error("region signal vector has {got} entries, expected {expected}")]
    SignalLength { got: usize, expected: usize },

    #[error("{what} holds a non-finite value at index {index}")]
    NonFiniteSignal { what: &'static str, index: usize },

    #[error("{what} matrix is {rows}x{cols}, expected {expected}x{expected}")]
    MatrixShape {
        what: &'static str,
        rows: usize,
        cols: usize,
        expected: usize,
    },

    #[error("{what} references region {index}, but only {count} regions exist")]
    RegionIndex {
        what: &'static str,
        index: usize,
        count: usize,
    },

    #[error("region {0} owns no pixels")]
    EmptyRegion(usize),

    #[error("pixel {0} is out of range or claimed by more than one region")]
    OverlappingPixel(usize),

    #[error("{0} pixels belong to no region")]
    UncoveredPixels(usize),

    #[error("partition has no regions")]
    EmptyPartition,

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("image error on {path}: {message}")]
    Image { path: String, message: String },

    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },
}
