//! Frame composition and rendering

use core::fmt::{self, Write};

use beaconview_display::{DisplayBackend, DisplayError, Screen, SCREEN_COLS};
use heapless::{String, Vec};

use crate::tracker::{ScrollLine, Tracker, MAX_SCROLL_LINES};

/// Row holding the pinned target
pub const PINNED_ROW: usize = 0;

/// Row holding the time since the target was last seen
pub const ELAPSED_ROW: usize = 1;

/// First row of the scroll region
pub const SCROLL_FIRST_ROW: usize = 2;

/// One composed line; wide enough for any scroll line
pub type FrameLine = ScrollLine;

/// One row as it fits on the panel
pub type ScreenRow = String<SCREEN_COLS>;

/// A fully composed view
///
/// Order is fixed: pinned line, elapsed line, then the scroll region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// `"<address> <rssi>"`, empty until the target is seen
    pub pinned: FrameLine,
    /// `"<n>s ago"`, empty until the target is seen
    pub elapsed: FrameLine,
    /// Recent devices, oldest first
    pub recent: Vec<FrameLine, MAX_SCROLL_LINES>,
}

impl Frame {
    /// Lay the frame out on a character screen
    ///
    /// Rows wider than the screen are clipped, never wrapped, so the row
    /// count stays fixed. Device rows lose label characters, never
    /// signal strength digits.
    pub fn to_screen(&self) -> Screen {
        let mut screen = Screen::new();
        screen.set_line(PINNED_ROW, &fit_reading(&self.pinned));
        screen.set_line(ELAPSED_ROW, &self.elapsed);
        for (i, line) in self.recent.iter().enumerate() {
            screen.set_line(SCROLL_FIRST_ROW + i, &fit_reading(line));
        }
        screen
    }

    /// Number of text lines in the frame
    pub fn line_count(&self) -> usize {
        2 + self.recent.len()
    }
}

/// The frame as one text blob: every line terminated by `\n`
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.pinned)?;
        writeln!(f, "{}", self.elapsed)?;
        for line in &self.recent {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Fit a `"<label> <rssi>"` row to the panel width
///
/// The reading after the last space is kept whole; the label is clipped on
/// a char boundary to make room for it. Width is counted in bytes, which
/// is what a screen row holds.
pub fn fit_reading(line: &str) -> ScreenRow {
    let mut row = ScreenRow::new();
    let (label, reading) = match line.rsplit_once(' ') {
        Some(parts) if line.len() > SCREEN_COLS => parts,
        _ => {
            for ch in line.chars() {
                if row.push(ch).is_err() {
                    break;
                }
            }
            return row;
        }
    };

    let room = SCREEN_COLS.saturating_sub(reading.len() + 1);
    for ch in label.chars() {
        if row.len() + ch.len_utf8() > room {
            break;
        }
        let _ = row.push(ch);
    }
    let _ = row.push(' ');
    let _ = row.push_str(reading);
    row
}

/// Compose the current view
///
/// Pure read of tracker state; composing twice at the same `now_ms` gives
/// identical frames.
pub fn compose(tracker: &Tracker, now_ms: u64) -> Frame {
    let mut pinned = FrameLine::new();
    let mut elapsed = FrameLine::new();

    if let Some(entry) = tracker.pinned() {
        let _ = write!(pinned, "{} {}", entry.label(), entry.rssi);
        let _ = write!(elapsed, "{}s ago", entry.elapsed_secs(now_ms));
    }

    let mut recent = Vec::new();
    for line in tracker.scroll().iter() {
        let mut l = String::new();
        let _ = l.push_str(line);
        // Scroll buffer never holds more than MAX_SCROLL_LINES
        let _ = recent.push(l);
    }

    Frame {
        pinned,
        elapsed,
        recent,
    }
}

/// Compose the current view and push it to the display
///
/// The display is cleared and redrawn in full every time.
pub fn render<B: DisplayBackend + ?Sized>(
    tracker: &Tracker,
    now_ms: u64,
    backend: &mut B,
) -> Result<Frame, DisplayError> {
    let frame = compose(tracker, now_ms);
    frame.to_screen().present(backend)?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceAddress, Rssi};
    use crate::tracker::Sighting;
    use proptest::prelude::*;

    const TARGET: DeviceAddress = DeviceAddress::new([0xc1, 0x83, 0x1a, 0xc4, 0x1b, 0x09]);

    fn device(name: &str, n: u8, rssi: i16) -> Sighting {
        Sighting::new(Some(name), DeviceAddress::new([1, 2, 3, 4, 5, n]), Rssi(rssi))
    }

    fn target(rssi: i16) -> Sighting {
        Sighting::new(None, TARGET, Rssi(rssi))
    }

    /// Backend that keeps the last drawn frame as rows
    struct MockDisplay {
        rows: [std::string::String; 8],
        cleared: usize,
        flushed: usize,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                rows: Default::default(),
                cleared: 0,
                flushed: 0,
            }
        }
    }

    impl DisplayBackend for MockDisplay {
        fn init(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn clear(&mut self) -> Result<(), DisplayError> {
            self.rows = Default::default();
            self.cleared += 1;
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            let slot = self
                .rows
                .get_mut(row as usize)
                .ok_or(DisplayError::InvalidCoordinates)?;
            *slot = text.into();
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushed += 1;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (21, 8)
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_empty_view_before_target_seen() {
        let tracker = Tracker::new(TARGET, 6);
        let frame = compose(&tracker, 10_000);

        assert!(frame.pinned.is_empty());
        assert!(frame.elapsed.is_empty());
        assert!(frame.recent.is_empty());
        assert_eq!(frame.to_string(), "\n\n");
    }

    #[test]
    fn test_scenario_text_blob() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&device("Alice", 1, -40), 0);
        tracker.on_sighting(&device("Bob", 2, -55), 500);
        tracker.on_sighting(&target(-60), 1_000);
        tracker.on_sighting(&device("Carol", 3, -70), 1_500);

        let frame = compose(&tracker, 4_200);
        assert_eq!(
            frame.to_string(),
            "c1:83:1a:c4:1b:09 -60\n3s ago\nAlice -40\nBob -55\nCarol -70\n"
        );
        assert_eq!(frame.line_count(), 5);
    }

    #[test]
    fn test_elapsed_resets_on_new_target_sighting() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&target(-60), 0);
        assert_eq!(compose(&tracker, 30_000).elapsed.as_str(), "30s ago");

        tracker.on_sighting(&target(-58), 30_000);
        assert_eq!(compose(&tracker, 30_000).elapsed.as_str(), "0s ago");
    }

    #[test]
    fn test_render_draws_fixed_layout() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&target(-60), 0);
        tracker.on_sighting(&device("Alice", 1, -40), 0);

        let mut display = MockDisplay::new();
        render(&tracker, 2_000, &mut display).unwrap();

        assert_eq!(display.cleared, 1);
        assert_eq!(display.flushed, 1);
        assert_eq!(display.rows[PINNED_ROW], "c1:83:1a:c4:1b:09 -60");
        assert_eq!(display.rows[ELAPSED_ROW], "2s ago");
        assert_eq!(display.rows[SCROLL_FIRST_ROW], "Alice -40");
        assert!(display.rows[SCROLL_FIRST_ROW + 1].is_empty());
    }

    #[test]
    fn test_long_name_clipped_on_screen() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&device("A-rather-long-device-name", 1, -40), 0);

        let screen = compose(&tracker, 0).to_screen();
        assert_eq!(screen.get_line(SCROLL_FIRST_ROW), Some("A-rather-long-dev -40"));
    }

    #[test]
    fn test_three_digit_rssi_survives_clipping() {
        let mut tracker = Tracker::new(TARGET, 6);
        tracker.on_sighting(&target(-105), 0);
        tracker.on_sighting(
            &Sighting::new(None, DeviceAddress::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01]), Rssi(-101)),
            0,
        );
        tracker.on_sighting(&device("Kitchen-Thermometer", 2, -87), 0);

        let frame = compose(&tracker, 0);
        // The text blob keeps the full labels
        assert_eq!(frame.pinned.as_str(), "c1:83:1a:c4:1b:09 -105");

        let screen = frame.to_screen();
        assert_eq!(screen.get_line(PINNED_ROW), Some("c1:83:1a:c4:1b:0 -105"));
        assert_eq!(screen.get_line(SCROLL_FIRST_ROW), Some("aa:bb:cc:dd:ee:0 -101"));
        assert_eq!(screen.get_line(SCROLL_FIRST_ROW + 1), Some("Kitchen-Thermomet -87"));
    }

    #[test]
    fn test_fit_reading() {
        assert_eq!(fit_reading("Alice -40").as_str(), "Alice -40");
        assert_eq!(fit_reading("").as_str(), "");
        // Exactly full width is left alone
        assert_eq!(fit_reading("abcdefghijklmnopq -40").as_str(), "abcdefghijklmnopq -40");
        // Multi-byte labels are clipped on a char boundary
        assert_eq!(fit_reading("ééééééééééééé -40").as_str(), "éééééééé -40");
        // No separator: plain clip
        assert_eq!(fit_reading("abcdefghijklmnopqrstuvwxyz").as_str(), "abcdefghijklmnopqrstu");
    }

    proptest! {
        #[test]
        fn prop_render_idempotent(
            names in prop::collection::vec("[a-z]{1,8}", 0..12),
            with_target in any::<bool>(),
            now in 0u64..1_000_000,
        ) {
            let mut tracker = Tracker::new(TARGET, 6);
            for (i, name) in names.iter().enumerate() {
                tracker.on_sighting(&device(name, i as u8, -50), 0);
            }
            if with_target {
                tracker.on_sighting(&target(-60), 0);
            }

            let mut display = MockDisplay::new();
            let first = render(&tracker, now, &mut display).unwrap();
            let rows_first = display.rows.clone();
            let second = render(&tracker, now, &mut display).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(rows_first, display.rows.clone());
        }

        #[test]
        fn prop_screen_row_keeps_whole_reading(
            name in "[A-Za-z0-9 -]{1,32}",
            rssi in -128i16..=20,
        ) {
            let mut tracker = Tracker::new(TARGET, 6);
            tracker.on_sighting(&device(&name, 1, rssi), 0);
            tracker.on_sighting(&target(rssi), 0);

            let screen = compose(&tracker, 0).to_screen();
            let reading = format!(" {}", rssi);
            let pinned = screen.get_line(PINNED_ROW).unwrap();
            let recent = screen.get_line(SCROLL_FIRST_ROW).unwrap();
            prop_assert!(pinned.ends_with(&reading), "{:?}", pinned);
            prop_assert!(recent.ends_with(&reading), "{:?}", recent);
            prop_assert!(recent.len() <= SCREEN_COLS);
        }

        #[test]
        fn prop_elapsed_monotonic_without_new_sighting(
            seen_at in 0u64..100_000,
            mut steps in prop::collection::vec(0u64..10_000, 1..16),
        ) {
            let mut tracker = Tracker::new(TARGET, 6);
            tracker.on_sighting(&target(-60), seen_at);

            steps.sort_unstable();
            let mut last = 0u64;
            for step in steps {
                let elapsed = tracker.pinned().unwrap().elapsed_secs(seen_at + step);
                prop_assert!(elapsed >= last);
                let text = compose(&tracker, seen_at + step).elapsed;
                prop_assert_eq!(text.as_str(), format!("{}s ago", elapsed));
                last = elapsed;
            }
        }
    }
}
