//! tmplaudit-core — Question-template audit engine.
//!
//! Classifies catalog collections by the quality of their question templates
//! and suggests curriculum-aligned replacements from a fixed template bank.

pub mod bank;
pub mod classifier;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod report;
pub mod rules;
