use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::snake::Cell;

/// Internal-consistency failure while tagging segments.
///
/// The tick algorithm only ever hands the classifiers unit-adjacent,
/// non-folding neighbors, so any of these means the body is corrupt.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GeometryError {
    #[error("segments at {from} and {to} are not unit-adjacent")]
    NotAdjacent { from: Cell, to: Cell },
    #[error("segment at {at} has both neighbors on the same side")]
    Folded { at: Cell },
}

/// Rejected board dimensions or scenario parts.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SetupError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    GridTooSmall { width: u16, height: u16, min: u16 },
    #[error("snake body must contain at least one segment")]
    EmptyBody,
    #[error("cell {0} lies outside the playable interior")]
    OutsideInterior(Cell),
    #[error("cell {0} is occupied more than once")]
    Overlap(Cell),
    #[error("heading points back into the segment behind the head")]
    HeadingIntoNeck,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Failure while loading the optional settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Setup(#[from] SetupError),
}
