// Library target exists so integration tests can exercise the quiz core
// via `hanvoca::quiz::*` without going through the binary. Most code is
// only reached through main.rs, so suppress dead_code warnings here.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod config;
pub mod quiz;

// Private: pulled in so the tree compiles as one unit
mod app;
mod event;
mod ui;
