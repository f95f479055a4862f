//! Crate error type

/// Errors surfaced by the frontend and the session loop
///
/// The simulation itself cannot fail; everything here comes from the
/// platform side.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Window closed or quit key pressed; unwinds out of any blocking loop.
    #[error("window closed")]
    WindowClosed,

    /// Terminal I/O failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A modal screen cannot fit its text on the canvas.
    #[error("screen too small: need {need_cols}x{need_rows}, have {cols}x{rows}")]
    ScreenTooSmall {
        need_cols: usize,
        need_rows: usize,
        cols: usize,
        rows: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
