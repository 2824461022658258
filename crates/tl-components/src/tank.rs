//! Open tank with a bounded fluid quantity.

use crate::common::{Rect, check_finite};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{Instrumented, Reading};
use tl_controls::ScalarSignal;
use tl_core::clamp_unit;

/// Quantity at or below which a tank counts as empty.
pub const EMPTY_THRESHOLD: f64 = 0.1;

/// Open tank holding a volume of liquid at a uniform temperature.
///
/// ## Model
///
/// ```text
/// 0 <= quantity <= capacity
/// level = quantity / capacity
/// ```
///
/// Quantity only changes through [`Tank::set_quantity`], [`Tank::add`] and
/// [`Tank::remove`], all of which clamp. The level signal is refreshed on
/// every change, so it is always in `[0, 1]`.
///
/// Amounts passed to `add`/`remove` that are negative or NaN move nothing.
#[derive(Clone, Debug)]
pub struct Tank {
    name: String,
    capacity: f64,
    quantity: f64,
    level: ScalarSignal,
    temperature: ScalarSignal,
    /// Outline on the plant diagram
    pub outline: Rect,
}

impl Tank {
    /// Create an empty tank at 20 °C.
    ///
    /// # Errors
    /// Returns error if `capacity` is not finite and positive.
    pub fn new(name: impl Into<String>, capacity: f64, outline: Rect) -> ComponentResult<Self> {
        check_finite(capacity, "tank capacity")?;
        if capacity <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "tank capacity must be positive",
            });
        }
        Ok(Self {
            name: name.into(),
            capacity,
            quantity: 0.0,
            level: ScalarSignal::new(0.0),
            temperature: ScalarSignal::new(20.0),
            outline,
        })
    }

    /// Set the quantity directly, clamped to `[0, capacity]`.
    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = if quantity.is_nan() {
            0.0
        } else {
            quantity.clamp(0.0, self.capacity)
        };
        self.refresh_level();
    }

    /// Pour in up to `amount`. Returns the amount actually accepted.
    pub fn add(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let accepted = amount.min(self.free_capacity());
        self.quantity = (self.quantity + accepted).min(self.capacity);
        self.refresh_level();
        accepted
    }

    /// Draw off up to `amount`. Returns the amount actually removed.
    pub fn remove(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let removed = amount.min(self.quantity);
        self.quantity = (self.quantity - removed).max(0.0);
        self.refresh_level();
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.quantity <= EMPTY_THRESHOLD
    }

    /// Room left before the tank is full.
    pub fn free_capacity(&self) -> f64 {
        (self.capacity - self.quantity).max(0.0)
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Fill fraction in `[0, 1]`.
    pub fn level(&self) -> f64 {
        self.level.get()
    }

    /// Liquid temperature in °C.
    pub fn temperature(&self) -> f64 {
        self.temperature.get()
    }

    pub fn set_temperature(&mut self, temp_c: f64) {
        self.temperature.set(temp_c);
    }

    fn refresh_level(&mut self) {
        self.level.set(clamp_unit(self.quantity / self.capacity));
    }
}

impl Instrumented for Tank {
    fn name(&self) -> &str {
        &self.name
    }

    fn readings(&self) -> Vec<Reading> {
        vec![
            ("LEVEL", self.level.into()),
            ("TEMP", self.temperature.into()),
            ("QTY", ScalarSignal::new(self.quantity).into()),
        ]
    }
}
