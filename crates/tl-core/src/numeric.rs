//! Float guards and tolerances shared by every crate.

use crate::TlError;

/// Floating point type used throughout the plant model
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero (time steps, capacities).
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, TlError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TlError::NotPositive { what, value: v })
    }
}

/// Finite and not negative (rates, floors).
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, TlError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(TlError::OutOfRange {
            what,
            value: v,
            min: 0.0,
            max: Real::INFINITY,
        })
    }
}

/// Finite and within the closed interval `[min, max]`.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, TlError> {
    let v = ensure_finite(v, what)?;
    if (min..=max).contains(&v) {
        Ok(v)
    } else {
        Err(TlError::OutOfRange {
            what,
            value: v,
            min,
            max,
        })
    }
}

/// Clamp to `[0, 1]`, mapping NaN to zero.
pub fn clamp_unit(v: Real) -> Real {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
