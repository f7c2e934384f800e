pub mod alliance;
pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod model;
pub mod predictor;
pub mod scorer;
pub mod stats;
pub mod store;
// cmd and reports belong to the binary (main.rs).

pub use error::{ScoutError, ScoutResult, ScoutWarning};
