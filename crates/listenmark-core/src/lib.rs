//! listenmark-core — Question bank, answer sets, and scoring.
//!
//! This crate defines the quiz data model, the built-in question bank, the
//! evaluator that turns an answer snapshot into verdicts and a score, and the
//! session state machine a rendering layer drives.

pub mod answers;
pub mod bank;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod model;
pub mod parser;
pub mod session;
