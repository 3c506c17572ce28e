//! Post-construction I/O against physical (mock) lines and panels.

use crate::mock_hw::{Faults, MockPlatform, MockRig, SharedRig};

use rigio::app::ports::{ActuatorPort, SensorPort};
use rigio::config::RigConfig;
use rigio::error::HalError;
use rigio::hal::RigIo;
use rigio::hal::frame::Frame;
use rigio::hal::state::{Input, Line, Output, Side};

fn physical(config: &RigConfig) -> (RigIo, SharedRig) {
    let rig = MockRig::with_faults(Faults::default());
    let io = RigIo::new(config, MockPlatform::boxed(&rig));
    (io, rig)
}

#[test]
fn idle_pull_up_lines_read_inactive() {
    let (mut io, _rig) = physical(&RigConfig::default());
    let s = io.read_inputs().unwrap();
    assert!(!s.right_lever && !s.left_lever && !s.nose_poke);
    assert_eq!(s.water_port, Some(false));
}

#[test]
fn raw_low_reads_active() {
    let (mut io, rig) = physical(&RigConfig::default());

    MockRig::drive(&rig, 23, false);
    let s = io.read_inputs().unwrap();
    assert!(s.right_lever);
    assert!(!s.left_lever && !s.nose_poke);

    MockRig::drive(&rig, 23, true);
    MockRig::drive(&rig, 17, false);
    let s = io.read_inputs().unwrap();
    assert!(!s.right_lever);
    assert!(s.nose_poke);
}

#[test]
fn water_port_reads_back_physical_level() {
    let (mut io, rig) = physical(&RigConfig::default());

    io.set_output(Output::WaterPort, true).unwrap();
    assert_eq!(rig.borrow().outputs.get(&27), Some(&true));
    assert_eq!(io.read_inputs().unwrap().water_port, Some(true));

    io.set_output(Output::WaterPort, false).unwrap();
    assert_eq!(rig.borrow().outputs.get(&27), Some(&false));
    assert_eq!(io.read_inputs().unwrap().water_port, Some(false));
}

#[test]
fn active_low_water_port_inverts_the_line() {
    let config = RigConfig { water_port_active_low: true, ..RigConfig::default() };
    let (mut io, rig) = physical(&config);

    // Idle is "not energised": line held high.
    assert_eq!(rig.borrow().outputs.get(&27), Some(&true));
    assert_eq!(io.read_inputs().unwrap().water_port, Some(false));

    io.set_output(Output::WaterPort, true).unwrap();
    assert_eq!(rig.borrow().outputs.get(&27), Some(&false));
    assert_eq!(io.read_inputs().unwrap().water_port, Some(true));
}

#[test]
fn display_only_rig_claims_inputs_only() {
    let config = RigConfig { water_port_pin: None, ..RigConfig::default() };
    let (mut io, rig) = physical(&config);

    assert_eq!(rig.borrow().claimed.len(), 3);
    assert!(!io.has_output(Output::WaterPort));
    assert_eq!(io.read_inputs().unwrap().water_port, None);
    assert_eq!(
        io.set_output(Output::WaterPort, true),
        Err(HalError::NoSuchOutput(Output::WaterPort))
    );
}

#[test]
fn read_failure_propagates() {
    let (mut io, rig) = physical(&RigConfig::default());
    rig.borrow_mut().faults.read = true;

    let err = io.read_inputs().unwrap_err();
    assert!(
        matches!(err, HalError::Read { line: Line::Input(Input::RightLever), .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn water_port_readback_failure_is_a_read_error() {
    let (mut io, rig) = physical(&RigConfig::default());
    rig.borrow_mut().faults.readback = true;

    let err = io.read_inputs().unwrap_err();
    assert!(
        matches!(err, HalError::Read { line: Line::Output(Output::WaterPort), .. }),
        "unexpected error: {err:?}"
    );
    // Driving the line still works.
    io.set_output(Output::WaterPort, true).unwrap();
    assert_eq!(rig.borrow().outputs.get(&27), Some(&true));
}

#[test]
fn flush_failure_propagates() {
    let (mut io, rig) = physical(&RigConfig::default());
    rig.borrow_mut().faults.flush = true;

    let err = io.render(Side::Left, &Frame::new(128, 64)).unwrap_err();
    assert!(matches!(err, HalError::Display { side: Side::Left, .. }));
}

#[test]
fn clear_is_idempotent() {
    let (mut io, rig) = physical(&RigConfig::default());
    io.render(Side::Left, &Frame::test_pattern(Side::Left, 128, 64))
        .unwrap();

    io.clear_displays().unwrap();
    io.clear_displays().unwrap();

    let rig = rig.borrow();
    for addr in [0x3C, 0x3D] {
        assert!(rig.shown[&addr].is_blank());
    }
    assert_eq!(rig.shows(0x3C), 3);
    assert_eq!(rig.shows(0x3D), 2);
    assert!(io.frame(Side::Left).is_blank());
}

#[test]
fn clear_reaches_right_panel_when_left_flush_fails() {
    let (mut io, rig) = physical(&RigConfig::default());
    for side in Side::BOTH {
        io.render(side, &Frame::test_pattern(side, 128, 64)).unwrap();
    }
    rig.borrow_mut().faults.flush_at.insert(0x3C);

    let err = io.clear_displays().unwrap_err();
    assert!(matches!(err, HalError::Display { side: Side::Left, .. }));

    assert!(rig.borrow().shown[&0x3D].is_blank());
    assert!(io.frame(Side::Left).is_blank());
    assert!(io.frame(Side::Right).is_blank());
}

#[test]
fn physical_lines_ignore_simulated_input() {
    let (mut io, _rig) = physical(&RigConfig::default());
    assert!(!io.simulate_input(Input::LeftLever, true));
    assert!(!io.read_inputs().unwrap().left_lever);
}
