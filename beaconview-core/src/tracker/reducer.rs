//! Sighting reducer
//!
//! All tracker state is owned by [`Tracker`] and mutated only by
//! [`Tracker::on_sighting`]. The compositor reads it through the accessors.

use crate::config::TrackerConfig;
use crate::device::{DeviceAddress, Registry};

use super::pinned::PinnedEntry;
use super::scroll::{ScrollBuffer, ScrollLine};
use super::sighting::Sighting;

/// What a sighting did to the display state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SightingOutcome {
    /// The target was seen and the pinned entry replaced
    Pinned,
    /// Another device was appended to the scroll buffer
    Scrolled {
        /// Oldest line dropped to make room, if any
        evicted: Option<ScrollLine>,
    },
}

/// Display state for one target and its surroundings
#[derive(Debug, Clone)]
pub struct Tracker {
    target: DeviceAddress,
    registry: Registry,
    pinned: Option<PinnedEntry>,
    scroll: ScrollBuffer,
}

impl Tracker {
    /// Create a tracker for `target` with a scroll region of `max_lines`
    pub fn new(target: DeviceAddress, max_lines: usize) -> Self {
        Self {
            target,
            registry: Registry::new(),
            pinned: None,
            scroll: ScrollBuffer::new(max_lines),
        }
    }

    /// Create a tracker from configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.target, config.display.max_scroll_lines as usize)
    }

    /// Apply one sighting
    ///
    /// Every sighting updates the registry. A sighting of the target replaces
    /// the pinned entry; any other device goes to the scroll buffer. Never
    /// both.
    pub fn on_sighting(&mut self, sighting: &Sighting, now_ms: u64) -> SightingOutcome {
        self.registry
            .record_sighting(&sighting.identity, sighting.rssi);

        if sighting.address == self.target {
            self.pinned = Some(PinnedEntry {
                address: sighting.address,
                rssi: sighting.rssi,
                seen_at_ms: now_ms,
            });
            SightingOutcome::Pinned
        } else {
            let line = ScrollBuffer::format_line(&sighting.identity, sighting.rssi);
            let evicted = self.scroll.push(line);
            SightingOutcome::Scrolled { evicted }
        }
    }

    /// Configured target address
    pub fn target(&self) -> DeviceAddress {
        self.target
    }

    /// Whether the target has been seen since boot
    ///
    /// Once true, stays true for the life of the tracker.
    pub fn seen(&self) -> bool {
        self.pinned.is_some()
    }

    /// Latest target sighting
    pub fn pinned(&self) -> Option<&PinnedEntry> {
        self.pinned.as_ref()
    }

    /// Recent non-target devices
    pub fn scroll(&self) -> &ScrollBuffer {
        &self.scroll
    }

    /// Every device seen since boot
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Identity, Rssi};
    use proptest::prelude::*;

    const TARGET: DeviceAddress = DeviceAddress::new([0xc1, 0x83, 0x1a, 0xc4, 0x1b, 0x09]);

    fn other(n: u8) -> DeviceAddress {
        DeviceAddress::new([0x10, 0x20, 0x30, 0x40, 0x50, n])
    }

    fn named(name: &str, n: u8, rssi: i16) -> Sighting {
        Sighting::new(Some(name), other(n), Rssi(rssi))
    }

    fn target(rssi: i16) -> Sighting {
        Sighting::new(None, TARGET, Rssi(rssi))
    }

    fn scroll_lines(tracker: &Tracker) -> Vec<String> {
        tracker.scroll().iter().map(String::from).collect()
    }

    #[test]
    fn test_mixed_sightings_scenario() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&named("Alice", 1, -40), 0);
        tracker.on_sighting(&named("Bob", 2, -55), 100);
        tracker.on_sighting(&target(-60), 200);
        tracker.on_sighting(&named("Carol", 3, -70), 300);

        assert_eq!(scroll_lines(&tracker), ["Alice -40", "Bob -55", "Carol -70"]);

        let pinned = tracker.pinned().unwrap();
        assert_eq!(pinned.address, TARGET);
        assert_eq!(pinned.rssi, Rssi(-60));
        assert_eq!(pinned.seen_at_ms, 200);
        assert!(tracker.seen());
    }

    #[test]
    fn test_seven_sightings_keep_last_six() {
        let mut tracker = Tracker::new(TARGET, 6);
        for n in 0..7u8 {
            let name = format!("dev{}", n);
            tracker.on_sighting(&named(&name, n, -50), u64::from(n));
        }

        assert_eq!(
            scroll_lines(&tracker),
            ["dev1 -50", "dev2 -50", "dev3 -50", "dev4 -50", "dev5 -50", "dev6 -50"]
        );
    }

    #[test]
    fn test_repeat_sighting_appends_but_registry_keeps_latest() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&named("Bob", 2, -55), 0);
        let outcome = tracker.on_sighting(&named("Bob", 2, -61), 10);

        assert_eq!(outcome, SightingOutcome::Scrolled { evicted: None });
        assert_eq!(scroll_lines(&tracker), ["Bob -55", "Bob -61"]);
        assert_eq!(tracker.registry().len(), 1);
        assert_eq!(
            tracker.registry().get(&Identity::from_name("Bob")),
            Some(Rssi(-61))
        );
    }

    #[test]
    fn test_target_pinned_by_address_even_with_name() {
        let mut tracker = Tracker::new(TARGET, 6);
        let sighting = Sighting::new(Some("Tag"), TARGET, Rssi(-48));

        assert_eq!(tracker.on_sighting(&sighting, 5), SightingOutcome::Pinned);
        assert!(tracker.scroll().is_empty());
        assert_eq!(tracker.pinned().unwrap().label().as_str(), "c1:83:1a:c4:1b:09");
        // Registry still records the target, under its resolved identity
        assert_eq!(
            tracker.registry().get(&Identity::from_name("Tag")),
            Some(Rssi(-48))
        );
    }

    #[test]
    fn test_target_replaced_wholesale() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&target(-60), 1_000);
        tracker.on_sighting(&target(-72), 9_000);

        let pinned = tracker.pinned().unwrap();
        assert_eq!(pinned.rssi, Rssi(-72));
        assert_eq!(pinned.seen_at_ms, 9_000);
    }

    #[test]
    fn test_eviction_reports_dropped_line() {
        let mut tracker = Tracker::new(TARGET, 2);
        tracker.on_sighting(&named("a", 1, -1), 0);
        tracker.on_sighting(&named("b", 2, -2), 0);
        let outcome = tracker.on_sighting(&named("c", 3, -3), 0);

        match outcome {
            SightingOutcome::Scrolled { evicted: Some(line) } => assert_eq!(line.as_str(), "a -1"),
            unexpected => panic!("unexpected outcome {:?}", unexpected),
        }
    }

    #[test]
    fn test_not_seen_initially() {
        let tracker = Tracker::new(TARGET, 6);
        assert!(!tracker.seen());
        assert!(tracker.pinned().is_none());
        assert!(tracker.registry().is_empty());
    }

    fn arb_sighting() -> impl Strategy<Value = (bool, u8, i16, Option<String>)> {
        (
            prop::bool::weighted(0.2),
            any::<u8>(),
            -120i16..=0,
            prop::option::of("[a-zA-Z0-9 ]{0,12}"),
        )
    }

    proptest! {
        #[test]
        fn prop_scroll_bounded_and_target_excluded(
            max_lines in 1usize..=6,
            events in prop::collection::vec(arb_sighting(), 0..64),
        ) {
            let mut tracker = Tracker::new(TARGET, max_lines);
            let mut seen = false;

            for (i, (is_target, n, rssi, name)) in events.iter().enumerate() {
                let address = if *is_target { TARGET } else { other(*n) };
                let sighting = Sighting::new(name.as_deref(), address, Rssi(*rssi));
                tracker.on_sighting(&sighting, i as u64 * 250);

                prop_assert!(tracker.scroll().len() <= max_lines);
                if *is_target {
                    seen = true;
                    let pinned = tracker.pinned().unwrap();
                    prop_assert_eq!(pinned.address, TARGET);
                    prop_assert_eq!(pinned.rssi, Rssi(*rssi));
                }
                prop_assert_eq!(tracker.seen(), seen);
            }

            let target_text = TARGET.to_text();
            for line in tracker.scroll().iter() {
                prop_assert!(!line.starts_with(target_text.as_str()));
            }
        }
    }
}
