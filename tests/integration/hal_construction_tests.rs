//! Construction stages: per-resource fallback and release on drop.

use crate::mock_hw::{Faults, MockPlatform, MockRig};

use rigio::app::ports::{ActuatorPort, SensorPort};
use rigio::config::RigConfig;
use rigio::hal::RigIo;
use rigio::hal::frame::Frame;
use rigio::hal::state::{Backend, BackendReport, Output, Side};

const LEFT: u8 = 0x3C;
const RIGHT: u8 = 0x3D;

fn open(faults: Faults) -> (RigIo, crate::mock_hw::SharedRig) {
    let rig = MockRig::with_faults(faults);
    let io = RigIo::new(&RigConfig::default(), MockPlatform::boxed(&rig));
    (io, rig)
}

#[test]
fn healthy_rig_is_fully_physical() {
    let (io, rig) = open(Faults::default());
    assert_eq!(
        io.backends(),
        BackendReport {
            bus: Backend::Physical,
            left_display: Backend::Physical,
            right_display: Backend::Physical,
            lines: Backend::Physical,
        }
    );
    let rig = rig.borrow();
    assert_eq!(rig.claimed.len(), 4);
    assert!(rig.claimed.contains(&27));
}

#[test]
fn bus_failure_simulates_both_displays_only() {
    let (io, rig) = open(Faults { bus: true, ..Faults::default() });
    let b = io.backends();
    assert_eq!(b.bus, Backend::Simulated);
    assert_eq!(b.left_display, Backend::Simulated);
    assert_eq!(b.right_display, Backend::Simulated);
    // Stage 3 still runs.
    assert_eq!(b.lines, Backend::Physical);
    assert!(!rig.borrow().bus_open);
}

#[test]
fn displays_degrade_independently() {
    for (dead, live_side) in [(LEFT, Side::Right), (RIGHT, Side::Left)] {
        let (io, _rig) = open(Faults {
            displays: [dead].into(),
            ..Faults::default()
        });
        let b = io.backends();
        assert_eq!(b.bus, Backend::Physical);
        assert_eq!(b.display(live_side), Backend::Physical);
        let dead_side = if live_side == Side::Left { Side::Right } else { Side::Left };
        assert_eq!(b.display(dead_side), Backend::Simulated);
        assert_eq!(b.lines, Backend::Physical);
    }
}

#[test]
fn pin_claim_failure_is_all_or_nothing() {
    // The output is claimed last, so the three inputs are already held.
    let (mut io, rig) = open(Faults {
        pins: [27].into(),
        ..Faults::default()
    });
    assert_eq!(io.backends().lines, Backend::Simulated);
    assert!(rig.borrow().claimed.is_empty(), "partial claims must be released");

    // Displays are unaffected.
    assert_eq!(io.backends().left_display, Backend::Physical);

    // Raw levels no longer matter.
    MockRig::drive(&rig, 23, false);
    let s = io.read_inputs().unwrap();
    assert!(!s.right_lever);
    assert_eq!(s.water_port, Some(false));
}

#[test]
fn release_errors_are_swallowed() {
    let (io, rig) = open(Faults { release: true, ..Faults::default() });
    drop(io);
    let rig = rig.borrow();
    assert_eq!(rig.bus_releases, 1);
    assert_eq!(rig.chip_releases, 1);
}

#[test]
fn shutdown_releases_every_handle() {
    let (io, rig) = open(Faults::default());
    io.shutdown();
    let rig = rig.borrow();
    assert!(rig.claimed.is_empty());
    assert!(!rig.bus_open);
    assert_eq!(rig.chip_releases, 1);
}

#[test]
fn no_platform_is_fully_simulated() {
    let mut io = RigIo::new(&RigConfig::default(), None);
    assert!(io.backends().is_fully_simulated());

    let s = io.read_inputs().unwrap();
    assert!(!s.right_lever && !s.left_lever && !s.nose_poke);

    io.set_output(Output::WaterPort, true).unwrap();
    assert_eq!(io.read_inputs().unwrap().water_port, Some(true));
}

#[test]
fn unreachable_left_display_discards_frames() {
    let (mut io, rig) = open(Faults {
        displays: [LEFT].into(),
        ..Faults::default()
    });
    let left = Frame::test_pattern(Side::Left, 128, 64);
    let right = Frame::test_pattern(Side::Right, 128, 64);

    io.render(Side::Left, &left).unwrap();
    io.render(Side::Right, &right).unwrap();

    let rig = rig.borrow();
    assert!(!rig.shown.contains_key(&LEFT));
    assert_eq!(rig.shown.get(&RIGHT), Some(&right));
}

#[test]
fn invalid_config_is_fully_simulated() {
    for config in [
        RigConfig { display_height: 0, ..RigConfig::default() },
        RigConfig { display_width: 0, ..RigConfig::default() },
        RigConfig { left_lever_pin: 23, ..RigConfig::default() },
    ] {
        let rig = MockRig::with_faults(Faults::default());
        let mut io = RigIo::new(&config, MockPlatform::boxed(&rig));

        assert!(io.backends().is_fully_simulated());
        assert!(!rig.borrow().bus_open);
        assert!(rig.borrow().claimed.is_empty());
        assert!(io.read_inputs().is_ok());
        assert!(io.clear_displays().is_ok());
    }
}
