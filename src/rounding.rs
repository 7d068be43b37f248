//! Rounding primitives and scalar rendering used by the trace.
//!
//! Two primitives with different semantics are used at different points of
//! the descent, and they are **not** interchangeable:
//!
//! * [`floor5`] rounds the exact decimal value of a double toward negative
//!   infinity to five fractional digits. It normalizes the initial point,
//!   every updated iterate and the displayed function value and tolerance.
//! * [`round5`] scales by 10⁵, rounds half away from zero and scales back. It
//!   rounds the gradient entering the update step and the displayed iterate.
//!
//! The two disagree on values sitting on a half step and on many negative
//! values, which is visible in the trace.

use nalgebra::DVector;

/// Number of fractional digits kept by both primitives.
pub const DIGITS: usize = 5;

const SCALE: f64 = 1e5;

// Above this magnitude the scaled value has no fractional part left.
const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Rounds toward negative infinity to five fractional digits.
///
/// The input is interpreted as the exact decimal value it represents, so
/// `floor5(0.8)` is `0.8` (the double is slightly above 0.8) while
/// `floor5(0.7)` is `0.69999` (the double is slightly below 0.7).
///
/// The result is the least double not below the truncated decimal. It thus
/// denotes that decimal exactly when read back, which makes the function
/// idempotent. Use [`raw_grid`] to print it in canonical form.
///
/// Non-finite values are returned unchanged. Zero of either sign yields
/// positive zero.
pub fn floor5(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    if value == 0.0 {
        return 0.0;
    }

    let scaled = value * SCALE;
    if scaled.abs() >= EXACT_LIMIT {
        return value;
    }

    // `SCALE` is exact, so fma recovers the rounding error of the product
    // and `scaled + err` is the exact value of `value * 10^5`.
    let err = value.mul_add(SCALE, -scaled);
    let mut floor = scaled.floor();
    if floor == scaled && err < 0.0 {
        floor -= 1.0;
    }

    let grid = floor / SCALE;
    if grid.mul_add(SCALE, -floor) < 0.0 {
        next_up(grid)
    } else {
        grid
    }
}

fn next_up(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        value
    } else if value == 0.0 {
        f64::from_bits(1)
    } else if value > 0.0 {
        f64::from_bits(value.to_bits() + 1)
    } else {
        f64::from_bits(value.to_bits() - 1)
    }
}

/// Rounds half away from zero to five fractional digits.
///
/// Unlike [`floor5`], this operates on the scaled double, so the rounding
/// error of the multiplication takes part in the decision. Values rounding to
/// zero yield positive zero.
pub fn round5(value: f64) -> f64 {
    (value * SCALE).round() / SCALE + 0.0
}

/// Applies [`floor5`] to every component in place.
pub fn floor5_mut(v: &mut DVector<f64>) {
    v.iter_mut().for_each(|vi| *vi = floor5(*vi));
}

/// Applies [`round5`] to every component in place.
pub fn round5_mut(v: &mut DVector<f64>) {
    v.iter_mut().for_each(|vi| *vi = round5(*vi));
}

/// Renders a scalar with exactly five fractional digits (`0.00000`).
pub fn fixed(value: f64) -> String {
    format!("{:.*}", DIGITS, value)
}

/// Renders a vector as [`round5`]-rounded [`fixed`] scalars, each followed by
/// a single space.
pub fn fixed_vector<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().fold(String::new(), |mut out, value| {
        out.push_str(&fixed(round5(*value)));
        out.push(' ');
        out
    })
}

/// Renders a vector as [`raw`] scalars, each followed by a single space.
pub fn raw_vector<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().fold(String::new(), |mut out, value| {
        out.push_str(&raw(*value));
        out.push(' ');
        out
    })
}

/// Renders a [`floor5`] result in canonical form.
///
/// The value is snapped to the double nearest to the decimal it denotes, so
/// the text shows the five-digit decimal rather than its upper neighbour.
pub fn raw_grid(value: f64) -> String {
    raw(round5(value))
}

/// Renders a double in its canonical textual form.
///
/// The shortest digits that round-trip are used. Magnitudes in `[1e-3, 1e7)`
/// are written positionally and always carry a fractional part (`6.0`,
/// `0.25`), others use an exponent (`1.0E-5`, `1.2345E7`).
pub fn raw(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        let mut out = format!("{}", value);
        if !out.contains('.') {
            out.push_str(".0");
        }
        out
    } else {
        let sci = format!("{:e}", value);
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{}E{}", mantissa, exponent)
        } else {
            format!("{}.0E{}", mantissa, exponent)
        }
    }
}
