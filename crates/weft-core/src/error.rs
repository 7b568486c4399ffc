//! Error types for Weft operations.

use thiserror::Error;

/// Toolkit-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error occurred while talking to the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A checked canvas access was out of range.
    ///
    /// This indicates a layout bug in the caller: painted coordinates must
    /// stay inside the region handed to the widget.
    #[error("cell out of bounds: ({x}, {y}) outside {width}x{height}")]
    CellOutOfBounds {
        /// The attempted x coordinate.
        x: i32,
        /// The attempted y coordinate.
        y: i32,
        /// The canvas width.
        width: u16,
        /// The canvas height.
        height: u16,
    },

    /// Terminal operation failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Result type alias using the toolkit [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
