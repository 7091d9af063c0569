//! Error types for the `colony-sim` crate.

use colony_types::Position;

/// Errors that can occur while building a simulated room.
///
/// These exist only at construction time; once a room is running, every
/// command failure is reported as a `ReturnCode`, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A grid dimension was zero.
    #[error("grid dimensions must be non-zero ({width}x{height})")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A placement referred to a cell outside the grid.
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    /// A placement referred to a blocked cell.
    #[error("position {0} is blocked")]
    Blocked(Position),

    /// The generated layout has too few walkable cells for the requested
    /// facilities and sources.
    #[error("layout has only {walkable} walkable cells, {needed} placements requested")]
    LayoutTooDense {
        /// Walkable cells available.
        walkable: usize,
        /// Placements requested.
        needed: usize,
    },
}
