//! Integration tests for the waiting-room HTTP surface.

mod gate_test;
mod helpers;
mod status_test;
