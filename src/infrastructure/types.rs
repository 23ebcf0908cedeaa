use esp_hal::delay::Delay;
use esp_hal::gpio::Output;
use my9221::My9221;

pub type SegmentDriver = My9221<Output<'static>, Output<'static>, Delay>;
