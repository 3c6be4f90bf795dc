// Library surface for headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod assets;
pub mod challenge;
pub mod clock;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod profile;
pub mod runtime;
pub mod scoring;
pub mod ui;
pub mod words;

pub use error::{Error, Result};
