use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};
use my9221::{DriverConfig, Error, My9221, Timing};

use crate::config::DISPLAY;
use crate::infrastructure::types::SegmentDriver;

/// Create the MY9221 driver on the display's DI and DCKI pins
///
/// Both pins start low, which the IC reads as an idle bus.
///
/// # Arguments
/// * `di` - GPIO wired to DI of the first module
/// * `dcki` - GPIO wired to DCKI of the first module
pub fn init_segment_driver(
    di: impl OutputPin + 'static,
    dcki: impl OutputPin + 'static,
) -> Result<SegmentDriver, Error> {
    let di = Output::new(di, Level::Low, OutputConfig::default());
    let dcki = Output::new(dcki, Level::Low, OutputConfig::default());

    let config = DriverConfig::new(DISPLAY.digits)
        .with_timing(Timing::from_micros(DISPLAY.settle_us))
        .with_policy(DISPLAY.policy);

    My9221::new(di, dcki, Delay::new(), config)
}

pub fn init_heartbeat(pin: impl OutputPin + 'static) -> Output<'static> {
    Output::new(pin, Level::Low, OutputConfig::default())
}
