//! Distribution plots for exploring marketing campaign datasets.
//!
//! Datasets are Arrow record batches wrapped in [`Dataset`]. Every plotting
//! operation in [`plots`] builds a [`Figure`] and shows it in a native window;
//! the builders under [`plots::build`] return the figure instead.

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod figure;
pub mod plots;
pub mod state;
pub mod ui;

pub use data::model::{Category, Dataset};
pub use error::{PlotError, Result};
pub use figure::Figure;
pub use plots::{DEFAULT_EXCLUDE_COL, DEFAULT_TARGET_COL, POSITIVE_LEVEL};
