//! Application entry hooks
//!
//! [`App`] owns the tracker state and the output surface. The firmware calls
//! [`App::init`] once at boot. Each scan cycle then feeds every received
//! advertisement to [`App::on_advertisement`] and closes with
//! [`App::finish_cycle`].

use beaconview_display::{DisplayBackend, DisplayError, Screen};

use crate::config::{ConfigError, TrackerConfig};
use crate::traits::{Advertisement, Clock};
use crate::tracker::{Sighting, SightingOutcome, Tracker};
use crate::view::{self, Frame};

/// Banner shown between display bring-up and the first sighting
pub const SPLASH_TEXT: &str = "Scanning...";

/// Errors that stop the application from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Configuration failed validation
    Config(ConfigError),
    /// Display did not come up
    Display(DisplayError),
}

/// Summary of one scan cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Cycle number since boot (1-based)
    pub cycle: u32,
    /// Advertisements handled during the cycle
    pub found: usize,
    /// Renders that failed during the cycle
    pub render_failures: usize,
    /// Distinct devices known since boot
    pub known_devices: usize,
    /// Advertisements handled since boot
    pub sightings: u32,
}

/// Tracker application
pub struct App<B, C> {
    tracker: Tracker,
    backend: B,
    clock: C,
    sightings: u32,
    cycles: u32,
    cycle_found: usize,
    cycle_render_failures: usize,
}

impl<B: DisplayBackend, C: Clock> App<B, C> {
    /// Validate configuration, bring up the display and show the splash
    ///
    /// A display failure here is fatal; the caller must not retry.
    pub fn init(config: &TrackerConfig, mut backend: B, clock: C) -> Result<Self, InitError> {
        config.validate().map_err(InitError::Config)?;
        backend.init().map_err(InitError::Display)?;

        let mut splash = Screen::new();
        splash.set_line(0, SPLASH_TEXT);
        splash.present(&mut backend).map_err(InitError::Display)?;

        Ok(Self {
            tracker: Tracker::from_config(config),
            backend,
            clock,
            sightings: 0,
            cycles: 0,
            cycle_found: 0,
            cycle_render_failures: 0,
        })
    }

    /// Handle one advertisement: reduce, then redraw the full view
    ///
    /// Tracker state is updated even when the redraw fails. A failed redraw
    /// is counted in the current cycle's report.
    pub fn on_advertisement(
        &mut self,
        adv: &Advertisement<'_>,
    ) -> Result<SightingOutcome, DisplayError> {
        let now_ms = self.clock.now_ms();
        let sighting = Sighting::from_advertisement(adv);
        let outcome = self.tracker.on_sighting(&sighting, now_ms);
        self.sightings = self.sightings.wrapping_add(1);
        self.cycle_found += 1;

        if let Err(e) = view::render(&self.tracker, now_ms, &mut self.backend) {
            self.cycle_render_failures += 1;
            return Err(e);
        }
        Ok(outcome)
    }

    /// Redraw the current view without a new sighting
    pub fn render(&mut self) -> Result<Frame, DisplayError> {
        view::render(&self.tracker, self.clock.now_ms(), &mut self.backend)
    }

    /// Close a scan cycle and start counting the next one
    ///
    /// A cycle that found nothing leaves the view untouched.
    pub fn finish_cycle(&mut self) -> CycleReport {
        self.cycles = self.cycles.wrapping_add(1);
        let report = CycleReport {
            cycle: self.cycles,
            found: self.cycle_found,
            render_failures: self.cycle_render_failures,
            known_devices: self.tracker.registry().len(),
            sightings: self.sightings,
        };
        self.cycle_found = 0;
        self.cycle_render_failures = 0;
        report
    }

    /// Tracker state
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Output surface
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Total sightings handled since boot
    pub fn sightings(&self) -> u32 {
        self.sightings
    }
}
