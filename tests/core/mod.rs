//! Core module tests for non-UI functionality
//!
//! Tests for:
//! - Minute-series normalization and downsampling
//! - Round selection and validation rules
//! - Debounce and refresh-cycle orchestration
//! - Chart slot state and settings defaults

pub mod orchestrator_tests;
pub mod state_tests;
pub mod vote_tests;
