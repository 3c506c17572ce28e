//! Behavioural-rig I/O library.
//!
//! Exposes the HAL, the status client and the adapters for integration
//! testing.  Physical bindings are behind the `rpi` feature; without it every
//! resource runs simulated.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod pins;
pub mod probe;

pub use config::RigConfig;
pub use error::{HalError, Result};
pub use hal::RigIo;
pub use hal::state::{Backend, BackendReport, Input, InputState, Line, Output, Side};
