//! Output generation for published small population datasets.
//!
//! Two pieces: a pure renderer that turns a resolved metadata record into the
//! ordered field/value rows of the Metadata sheet, and CSV writers that emit
//! the per-dataset Data and Metadata artifacts.

mod render;
mod writer;

pub use render::{RenderOptions, render};
pub use writer::{write_data_csv, write_metadata_csv};
