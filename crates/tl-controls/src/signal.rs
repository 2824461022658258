//! Signal value types.

use serde::{Deserialize, Serialize};

/// A single instrument reading.
///
/// Holds a value and nothing else. Components own their signals and update
/// them as part of the balance; readers copy them out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signal<T> {
    value: T,
}

/// Analog reading (level, temperature, speed, power).
pub type ScalarSignal = Signal<f64>;

/// Discrete reading (running, energised).
pub type BoolSignal = Signal<bool>;

impl<T: Copy> Signal<T> {
    /// Create a signal holding `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value
    }

    /// Overwrite the held value.
    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

/// Type-erased signal value, used where scalar and boolean readings share a
/// table (tag lookups, exports).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// Scalar floating-point reading.
    Scalar(f64),
    /// Boolean reading.
    Bool(bool),
}

impl SignalValue {
    /// Scalar value, if this is a scalar reading.
    pub fn as_scalar_opt(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Bool(_) => None,
        }
    }

    /// Boolean value, if this is a boolean reading.
    pub fn as_bool_opt(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Scalar(_) => None,
        }
    }
}

impl From<ScalarSignal> for SignalValue {
    fn from(sig: ScalarSignal) -> Self {
        Self::Scalar(sig.get())
    }
}

impl From<BoolSignal> for SignalValue {
    fn from(sig: BoolSignal) -> Self {
        Self::Bool(sig.get())
    }
}

impl std::fmt::Display for SignalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v:.3}"),
            Self::Bool(true) => f.write_str("ON"),
            Self::Bool(false) => f.write_str("OFF"),
        }
    }
}
