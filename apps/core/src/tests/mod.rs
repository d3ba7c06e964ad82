//! Test Module
//!
//! Cross-module test suite for the wellness core.
//!
//! ## Test Categories
//! - `brain_tests`: response classification priorities and intake scoring properties
//! - `storage_tests`: mood log and intake persistence over memory and file stores
//! - `integration_tests`: chat, questionnaire and persistence flows end to end

pub mod storage_tests;
