//! BLE scan cycle
//!
//! The host runner delivers advertising reports through [`ScanHandler`],
//! which feeds them one at a time into the application. The cycle loop
//! opens a scan session for the configured duration, closes it, logs the
//! cycle summary and idles before the next one.

use core::cell::RefCell;

use bt_hci::param::LeAdvReportsIter;
use defmt::*;
use embassy_time::{Duration, Timer};
use trouble_host::prelude::*;
use trouble_host::scan::ScanConfig as RadioScanConfig;

use beaconview_core::config::ScanConfig;
use beaconview_core::traits::{Advertisement, CycleFilter};
use beaconview_core::{App, DeviceAddress, Rssi, SightingOutcome};
use beaconview_display::DisplayBackend;

use crate::clock::EmbassyClock;
use crate::BleController;

/// Receives advertising reports from the host runner
pub struct ScanHandler<B> {
    app: RefCell<App<B, EmbassyClock>>,
    filter: RefCell<CycleFilter>,
}

impl<B: DisplayBackend> ScanHandler<B> {
    /// Wrap an initialized application
    pub fn new(app: App<B, EmbassyClock>) -> Self {
        Self {
            app: RefCell::new(app),
            filter: RefCell::new(CycleFilter::new()),
        }
    }

    /// Close the current cycle and start counting the next one
    fn finish_cycle(&self) {
        let report = self.app.borrow_mut().finish_cycle();
        self.filter.borrow_mut().reset();

        info!("Devices found: {}", report.found);
        info!("Scan done!");
        if report.render_failures > 0 {
            warn!(
                "Cycle {}: {} display updates failed",
                report.cycle, report.render_failures
            );
        }
        debug!(
            "Cycle {}: {} devices known, {} sightings since boot",
            report.cycle, report.known_devices, report.sightings
        );
    }
}

impl<B: DisplayBackend> EventHandler for ScanHandler<B> {
    fn on_adv_reports(&self, mut reports: LeAdvReportsIter<'_>) {
        while let Some(Ok(report)) = reports.next() {
            let mut raw = [0u8; 6];
            raw.copy_from_slice(report.addr.raw());
            let address = DeviceAddress::from_le_bytes(raw);

            if !self.filter.borrow_mut().admit(address) {
                continue;
            }

            let adv = Advertisement::from_payload(address, Rssi::from(report.rssi), report.data);

            match self.app.borrow_mut().on_advertisement(&adv) {
                Ok(SightingOutcome::Pinned) => {
                    info!("Found target device: {}", address);
                }
                Ok(SightingOutcome::Scrolled { .. }) => {
                    trace!("Advertised device: {} {}", address, adv.rssi);
                }
                Err(e) => {
                    warn!("Display update failed: {}", e);
                }
            }
        }
    }
}

/// Translate the tracker's scan settings into radio parameters
fn radio_config(scan: &ScanConfig) -> RadioScanConfig<'static> {
    RadioScanConfig {
        active: scan.active,
        interval: Duration::from_millis(scan.interval_ms as u64),
        window: Duration::from_millis(scan.window_ms as u64),
        ..Default::default()
    }
}

/// Run scan cycles forever
pub async fn run_cycles<B: DisplayBackend>(
    scanner: &mut Scanner<'_, BleController, DefaultPacketPool>,
    handler: &ScanHandler<B>,
    scan: &ScanConfig,
) -> ! {
    let config = radio_config(scan);
    let duration = Duration::from_secs(scan.duration_s as u64);
    let idle = Duration::from_millis(scan.idle_ms as u64);

    loop {
        match scanner.scan(&config).await {
            Ok(session) => {
                Timer::after(duration).await;
                drop(session);
            }
            Err(_) => {
                error!("Failed to start scan");
            }
        }

        handler.finish_cycle();
        Timer::after(idle).await;
    }
}
