//! Clipsync Timing Model
//!
//! Defines the data contracts shared by the interaction and preview crates:
//! - **Time ranges:** Half-open `[start, end)` intervals in seconds
//! - **Captions:** Segments with word-level timing, loaded from JSON
//! - **Clip boundaries:** Trim markers bounded by min/max clip duration
//! - **Styles:** Enumerated caption style options and partial patches
//! - **Placement:** Percent-of-container caption positions
//!
//! Caption and clip data are owned by external collaborators; the editor
//! core only stages transient edits against them.

pub mod caption;
pub mod clip;
pub mod color;
pub mod placement;
pub mod range;
pub mod style;
pub mod subtitles;

pub use caption::*;
pub use clip::*;
pub use color::*;
pub use placement::*;
pub use range::*;
pub use style::*;
