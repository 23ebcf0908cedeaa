#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;

use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use log::{error, info};

use my9221_counter::config::BUILD_VERSION;
use my9221_counter::infrastructure::drivers::{init_heartbeat, init_segment_driver};
use my9221_counter::infrastructure::tasks::counter_task;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    info!("my9221-counter {}", BUILD_VERSION);

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Initialize the display and spawn the counter
    let (di, dcki, heartbeat) = my9221_counter::display_pins!(peripherals);
    let heartbeat = init_heartbeat(heartbeat);
    match init_segment_driver(di, dcki) {
        Ok(driver) => {
            spawner.spawn(counter_task(driver, heartbeat)).ok();
        }
        Err(e) => error!("display: init failed: {}", e),
    }

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
