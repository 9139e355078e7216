//! rpnsheet_engine - Batch solver for grids of RPN cell expressions.

pub mod engine;
