//! One-shot hardware capability probe.
//!
//! Run once per process (cached in a `OnceLock`) and handed to
//! [`RigIo::open`](crate::hal::RigIo::open) as a plain value.  Nothing else
//! in the crate asks "are we simulating?".

use std::path::Path;
use std::sync::OnceLock;

use log::info;

/// Device nodes the physical binding needs.
const GPIO_NODES: [&str; 2] = ["/dev/gpiomem", "/dev/gpiochip0"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Physical binding compiled into this build, if any.
    pub backend: Option<&'static str>,
    /// A GPIO character / memory device is present.
    pub gpio_device: bool,
    /// At least one `/dev/i2c-*` node is present.
    pub i2c_device: bool,
}

impl Capabilities {
    /// Inspect the build and the running system.
    pub fn detect() -> Self {
        let backend = if cfg!(feature = "rpi") { Some("rppal") } else { None };
        let gpio_device = GPIO_NODES.iter().any(|p| Path::new(p).exists());
        let i2c_device = std::fs::read_dir("/dev")
            .map(|entries| {
                entries
                    .filter_map(core::result::Result::ok)
                    .any(|e| e.file_name().to_string_lossy().starts_with("i2c-"))
            })
            .unwrap_or(false);

        Self {
            backend,
            gpio_device,
            i2c_device,
        }
    }

    /// No binding, no devices.
    pub const fn simulated() -> Self {
        Self {
            backend: None,
            gpio_device: false,
            i2c_device: false,
        }
    }

    /// Worth attempting physical bring-up.  Individual resources may still
    /// fall back.
    pub fn physical(&self) -> bool {
        self.backend.is_some() && (self.gpio_device || self.i2c_device)
    }
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Process-wide probe result; the first call runs [`Capabilities::detect`].
pub fn capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(|| {
        let caps = Capabilities::detect();
        if caps.physical() {
            info!(
                "probe: {} backend (gpio={}, i2c={})",
                caps.backend.unwrap_or("?"),
                caps.gpio_device,
                caps.i2c_device
            );
        } else {
            info!("probe: hardware interfaces not available, simulation mode");
        }
        caps
    })
}
