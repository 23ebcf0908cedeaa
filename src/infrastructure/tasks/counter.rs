use embassy_time::{Duration, Timer};
use esp_hal::gpio::Output;
use log::{info, warn};
use segment_display::{Counter, CounterDisplay, DISPLAY_COMMAND};

use crate::config::DISPLAY;
use crate::infrastructure::types::SegmentDriver;

/// Task counting 00 to 99 on the segment display
/// It renders the current value, shifts it out to the modules and advances,
/// toggling the heartbeat LED once per step.
#[embassy_executor::task]
pub async fn counter_task(mut driver: SegmentDriver, mut heartbeat: Output<'static>) {
    let display = CounterDisplay::default();
    let step = Duration::from_millis(DISPLAY.step_ms);
    let refresh_wait = Duration::from_millis(DISPLAY.refresh_wait_ms);

    driver.command_set(DISPLAY_COMMAND);
    info!(
        "display: counting on {} module(s), command {:#06x}",
        driver.chain_len(),
        driver.command().bits()
    );

    let mut counter = Counter::default();
    loop {
        heartbeat.toggle();

        if let Err(e) = display.render(&mut driver, counter) {
            warn!("display: render {} failed: {}", counter.value(), e);
        }

        Timer::after(refresh_wait).await;
        if let Err(e) = driver.refresh() {
            warn!("display: refresh failed: {}", e);
        }

        Timer::after(step).await;
        counter.advance();
    }
}
