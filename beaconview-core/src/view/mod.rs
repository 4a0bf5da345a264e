//! Display compositor
//!
//! Builds the two-region view from tracker state:
//!
//! ```text
//! row 0      pinned target   "c1:83:1a:c4:1b:09 -60"
//! row 1      elapsed         "12s ago"
//! rows 2..7  recent devices  "Alice -40"
//! ```

pub mod compositor;

pub use compositor::{compose, render, Frame, FrameLine, ELAPSED_ROW, PINNED_ROW, SCROLL_FIRST_ROW};
