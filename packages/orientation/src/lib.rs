//! Orientation and gesture detection for a 3-axis accelerometer.
//!
//! Converts right-shifted raw ADC samples into stable orientation facts:
//! a quiet/moving classification, five hysteresis-debounced tilt flags
//! (left/right/up/down/topdown), coarse angle buckets, a compass-style
//! heading per tilt axis, and an edge-triggered flip ("shake") gesture.
//!
//! All arithmetic is integer-only; the sine table is pre-scaled so no
//! floating point is needed on the hot path. The engine owns all of its
//! state and is driven from exactly one task; it provides no internal
//! locking.

#![no_std]

#[cfg(test)]
extern crate std;

mod flip;
mod table;

pub mod config;
pub mod engine;

pub use config::{Axes, EngineConfig, TiltAxis, ACC_SHIFT};
pub use engine::{OrientationEngine, SampleSource};
