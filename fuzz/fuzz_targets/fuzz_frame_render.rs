//! Fuzz target: `RigIo::render` on a simulated rig
//!
//! Arbitrary frame geometry and pixels.  Verifies:
//! - No panics for any frame size
//! - Mismatched geometry is rejected and leaves the panel untouched
//! - Matching geometry is stored verbatim
//!
//! cargo fuzz run fuzz_frame_render

#![no_main]

use libfuzzer_sys::fuzz_target;
use rigio::app::ports::ActuatorPort;
use rigio::config::RigConfig;
use rigio::hal::RigIo;
use rigio::hal::frame::Frame;
use rigio::hal::state::Side;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let width = u32::from(data[0] % 160);
    let height = u32::from(data[1] % 80);
    let mut frame = Frame::new(width, height);
    for pair in data[2..].chunks_exact(2) {
        frame.set_pixel(u32::from(pair[0]), u32::from(pair[1]), true);
    }

    let mut io = RigIo::simulated(&RigConfig::default());
    match io.render(Side::Left, &frame) {
        Ok(()) => assert_eq!(io.frame(Side::Left), &frame),
        Err(_) => {
            assert_ne!(frame.dimensions(), (128, 64));
            assert!(io.frame(Side::Left).is_blank());
        }
    }
});
