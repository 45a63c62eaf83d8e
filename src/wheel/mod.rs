//! Wheel module — items, the selection engine, the spin state machine and
//! the SVG rendering of the disc.

pub mod engine;
pub mod item;
pub mod render;
pub mod spin;
