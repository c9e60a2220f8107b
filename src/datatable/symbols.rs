//! Glyphs shared across the suite's table and status displays.

/// Header indicator for an ascending sort.
pub const SORT_ASCENDING: &str = "▲";
/// Header indicator for a descending sort.
pub const SORT_DESCENDING: &str = "▼";

/// A selected row marker.
pub const CHECKED: &str = "☑";
/// An unselected row marker.
pub const UNCHECKED: &str = "☐";

/// A meter that is reporting.
pub const CONNECTED: &str = "●";
/// A meter that has gone quiet.
pub const DISCONNECTED: &str = "○";
/// An alarm or questionable data flag.
pub const WARNING: &str = "⚠";

// Power-quality event classes.
pub const SAG: &str = "↧";
pub const SWELL: &str = "↥";
pub const INTERRUPTION: &str = "✕";
pub const TRANSIENT: &str = "⚡";
pub const HARMONIC: &str = "∿";
pub const OTHER_EVENT: &str = "•";
