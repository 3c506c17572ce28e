//! rigio — behavioural-rig status client.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  RpiPlatform        LogEventSink      JsonConfigFile     │
//! │  (Platform)         (EventSink)       (ConfigPort)       │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  RigIo (HAL)  ◀──  MonitorService (status client)  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `rigio [CONFIG]`.  Without an argument the path comes from
//! `RIGIO_CONFIG`, then `rigio.json` in the working directory.  A missing
//! file means defaults.  Ctrl-C stops the loop; the rig is released on exit.

#![deny(unused_must_use)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use rigio::adapters::config_file::{DEFAULT_CONFIG_FILE, JsonConfigFile};
use rigio::adapters::log_sink::LogEventSink;
use rigio::app::ports::{ConfigError, ConfigPort};
use rigio::app::service::MonitorService;
use rigio::{RigConfig, RigIo, probe};

fn load_config() -> RigConfig {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RIGIO_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let store = JsonConfigFile::new(path);

    match store.load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            info!("config: {} not found, using defaults", store.path().display());
            RigConfig::default()
        }
        Err(e) => {
            warn!("config: {}: {}, using defaults", store.path().display(), e);
            RigConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("rigio v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();
    let mut io = RigIo::open(&config, probe::capabilities());

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    let mut sink = LogEventSink::new();
    let mut monitor = MonitorService::new();
    monitor.start(io.backends(), &mut sink);

    let interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    let outcome = monitor.run(&mut io, &mut sink, interval, &running);
    io.shutdown();
    Ok(outcome?)
}
