//! Scientific functions.
//!
//! Every function takes a single operand (degrees for the trigonometric
//! ones) and either returns a number or fails with a [`CalcError`]. The
//! overflow thresholds keep results inside the `f64` range.

use std::f64::consts::PI;

use crate::error::CalcError;

/// Largest argument accepted by [`exp`].
pub const EXP_LIMIT: f64 = 700.0;
/// Largest argument accepted by [`pow10`].
pub const POW10_LIMIT: f64 = 300.0;
/// Largest argument accepted by [`factorial`].
pub const FACTORIAL_LIMIT: f64 = 170.0;

fn to_radians(degrees: f64) -> f64 {
    (degrees * PI) / 180.0
}

pub fn sin(degrees: f64) -> f64 {
    to_radians(degrees).sin()
}

pub fn cos(degrees: f64) -> f64 {
    to_radians(degrees).cos()
}

pub fn tan(degrees: f64) -> f64 {
    to_radians(degrees).tan()
}

/// Natural logarithm.
pub fn ln(x: f64) -> Result<f64, CalcError> {
    if x <= 0.0 {
        return Err(CalcError::Domain);
    }
    Ok(x.ln())
}

/// Base-10 logarithm.
pub fn log(x: f64) -> Result<f64, CalcError> {
    if x <= 0.0 {
        return Err(CalcError::Domain);
    }
    Ok(x.log10())
}

pub fn sqrt(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 {
        return Err(CalcError::Domain);
    }
    Ok(x.sqrt())
}

pub fn square(x: f64) -> f64 {
    x.powi(2)
}

pub fn cube(x: f64) -> f64 {
    x.powi(3)
}

pub fn power(x: f64, y: f64) -> f64 {
    x.powf(y)
}

pub fn exp(x: f64) -> Result<f64, CalcError> {
    if x > EXP_LIMIT {
        return Err(CalcError::Overflow);
    }
    Ok(x.exp())
}

/// Ten raised to `x`.
pub fn pow10(x: f64) -> Result<f64, CalcError> {
    if x > POW10_LIMIT {
        return Err(CalcError::Overflow);
    }
    Ok(10f64.powf(x))
}

/// `n!` for a non-negative integral `n`, computed as a running product.
pub fn factorial(n: f64) -> Result<f64, CalcError> {
    if n < 0.0 || !is_integer(n) {
        return Err(CalcError::InvalidFactorialArgument);
    }
    if n > FACTORIAL_LIMIT {
        return Err(CalcError::Overflow);
    }

    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

fn is_integer(n: f64) -> bool {
    n.is_finite() && n.trunc() == n
}
