//! UI rendering modules for the CardScope application.
//!
//! This module organizes the various UI components into logical submodules:
//!
//! - `chart` - Chart rendering with the post-layout overflow correction
//! - `controls` - Aggregation selector strip and refresh status
//! - `vote_panel` - Card selection, round validation feedback, saving
//! - `settings_panel` - Server settings window
//! - `toast` - Toast notification system

pub mod chart;
pub mod controls;
pub mod settings_panel;
pub mod toast;
pub mod vote_panel;
