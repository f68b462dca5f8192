//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the simulator screens:
//! - Patient form with the prediction result panel
//! - Processed feature vector as sent to the model

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
