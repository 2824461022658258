//! Instrument readout shared by all equipment.

use tl_controls::SignalValue;

/// One named instrument reading, e.g. `("LEVEL", Scalar(0.8))`.
pub type Reading = (&'static str, SignalValue);

/// Equipment that exposes instrument readings.
///
/// The process model prefixes each reading with the component name to form
/// a tag such as `T1.LEVEL` or `P1.RUN`.
pub trait Instrumented {
    /// Component name (`T1`, `P1`, ...).
    fn name(&self) -> &str;

    /// Current readings, in a stable order.
    fn readings(&self) -> Vec<Reading>;

    /// Look up one reading by its suffix (case-insensitive).
    fn reading(&self, suffix: &str) -> Option<SignalValue> {
        self.readings()
            .into_iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(suffix))
            .map(|(_, v)| v)
    }
}
