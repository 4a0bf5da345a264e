//! Beaconview - BLE Beacon Tracker Firmware
//!
//! Main firmware binary for ESP32 boards with a 128x64 SSD1306 OLED.
//! Scans for BLE advertisements, pins one configured target at the top of
//! the screen with its time since last seen, and scrolls everything else
//! underneath.

#![no_std]
#![no_main]

extern crate alloc;

use bt_hci::controller::ExternalController;
use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;
use esp_hal::clock::CpuClock;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_wifi::ble::controller::BleConnector;
use esp_wifi::EspWifiController;
use trouble_host::prelude::*;
use {esp_backtrace as _, esp_println as _};

use beaconview_core::App;
use beaconview_drivers::display::Ssd1306;

use crate::clock::EmbassyClock;
use crate::scan::ScanHandler;

mod clock;
mod config;
mod scan;

/// HCI controller backed by the ESP32 radio
pub type BleController = ExternalController<BleConnector<'static>, 20>;

/// Heap size: 72KB (TOML parsing and the BLE stack)
const HEAP_SIZE: usize = 72 * 1024;

/// Maximum simultaneous connections (scan only)
const CONNECTIONS_MAX: usize = 1;

/// Maximum L2CAP channels (signalling only)
const L2CAP_CHANNELS_MAX: usize = 1;

/// Random static address the host scans from
const HOST_ADDRESS: [u8; 6] = [0xff, 0x8f, 0x1b, 0x05, 0xe4, 0xff];

// Static cell for the radio controller (must live forever)
static RADIO: static_cell::StaticCell<EspWifiController<'static>> = static_cell::StaticCell::new();

/// Main entry point
#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    info!("Beaconview firmware starting...");

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::heap_allocator!(size: HEAP_SIZE);
    info!("Peripherals initialized");

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let timg1 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timg1.timer0);

    let config = config::load();
    info!("Tracking target {}", config.target);

    // SSD1306 on the default ESP32 I2C pins (SDA=GPIO21, SCL=GPIO22)
    let i2c = match I2c::new(peripherals.I2C0, I2cConfig::default()) {
        Ok(i2c) => i2c
            .with_sda(peripherals.GPIO21)
            .with_scl(peripherals.GPIO22),
        Err(_) => {
            error!("I2C configuration rejected");
            halt().await
        }
    };
    let display = Ssd1306::new(i2c, config.display.i2c_address);

    let app = match App::init(&config, display, EmbassyClock) {
        Ok(app) => app,
        Err(e) => {
            error!("SSD1306 initialization failed: {}", e);
            halt().await
        }
    };
    info!("Display initialized");
    Timer::after_secs(2).await;

    let radio = match esp_wifi::init(timg0.timer0, Rng::new(peripherals.RNG), peripherals.RADIO_CLK)
    {
        Ok(radio) => RADIO.init(radio),
        Err(_) => {
            error!("Radio initialization failed");
            halt().await
        }
    };
    let connector = BleConnector::new(radio, peripherals.BT);
    let controller: BleController = ExternalController::new(connector);

    let mut resources: HostResources<DefaultPacketPool, CONNECTIONS_MAX, L2CAP_CHANNELS_MAX> =
        HostResources::new();
    let stack = trouble_host::new(controller, &mut resources)
        .set_random_address(Address::random(HOST_ADDRESS));
    let Host {
        central,
        mut runner,
        ..
    } = stack.build();
    info!("BLE host ready, scanning...");

    let handler = ScanHandler::new(app);
    let mut scanner = Scanner::new(central);

    match select(
        runner.run_with_handler(&handler),
        scan::run_cycles(&mut scanner, &handler, &config.scan),
    )
    .await
    {
        Either::First(Ok(())) => error!("BLE host runner stopped"),
        Either::First(Err(e)) => error!("BLE host runner failed: {}", Debug2Format(&e)),
        Either::Second(never) => never,
    }
    halt().await
}

/// Park the firmware after an unrecoverable failure
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
