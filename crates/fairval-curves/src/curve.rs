//! Discount curve snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fairval_core::types::{Currency, Date};

use crate::error::{CurveError, CurveResult};
use crate::point::CurvePoint;

/// Kind of quoted curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurveType {
    /// Zero rates quoted directly.
    #[default]
    Zero,
    /// Spread over another curve.
    Spread,
}

/// A named discount curve snapshot.
///
/// The curve date and points are fixed at construction; a new market date
/// produces a new `Curve`, never a mutation. Construction rejects points
/// whose year fractions are not strictly increasing rather than sorting a
/// copy, so a malformed upstream snapshot is surfaced instead of masked.
///
/// Zero rates are linearly interpolated between quoted points and held flat
/// outside the quoted range. Discount factors use continuous compounding:
/// `DF(t) = exp(-r(t) * t)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    /// Curve name (e.g., "USD_GOVT").
    name: String,
    /// Market date of the snapshot.
    curve_date: Date,
    /// Quotation currency.
    currency: Currency,
    /// Kind of quoted curve.
    curve_type: CurveType,
    /// Quoted points, strictly increasing by year fraction.
    points: Vec<CurvePoint>,
}

impl Curve {
    /// Creates a curve from validated points.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::EmptyCurve` if `points` is empty, or
    /// `CurveError::UnsortedCurvePoints` if year fractions are not strictly
    /// increasing.
    pub fn new(
        name: impl Into<String>,
        curve_date: Date,
        currency: Currency,
        curve_type: CurveType,
        points: Vec<CurvePoint>,
    ) -> CurveResult<Self> {
        let name = name.into();

        if points.is_empty() {
            return Err(CurveError::EmptyCurve { curve_name: name });
        }

        for (index, window) in points.windows(2).enumerate() {
            if window[1].year_fraction() <= window[0].year_fraction() {
                return Err(CurveError::UnsortedCurvePoints {
                    curve_name: name,
                    index: index + 1,
                });
            }
        }

        Ok(Self {
            name,
            curve_date,
            currency,
            curve_type,
            points,
        })
    }

    /// Returns the curve name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the market date of the snapshot.
    #[must_use]
    pub fn curve_date(&self) -> Date {
        self.curve_date
    }

    /// Returns the quotation currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the kind of quoted curve.
    #[must_use]
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Returns the quoted points.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Converts a target date to a year fraction from the curve date.
    ///
    /// Calendar days divided by 365, matching the axis used by
    /// [`CurvePoint::from_maturity`].
    #[must_use]
    pub fn year_fraction_to(&self, target: Date) -> Decimal {
        Decimal::from(self.curve_date.days_between(&target)) / Decimal::from(365)
    }

    /// Returns the zero rate at a target date.
    ///
    /// Linear interpolation between the bracketing points; flat
    /// extrapolation using the nearest endpoint outside the quoted range.
    /// The rate at a quoted point's exact position is the quoted rate.
    #[must_use]
    pub fn zero_rate(&self, target: Date) -> Decimal {
        self.zero_rate_at(self.year_fraction_to(target))
    }

    fn zero_rate_at(&self, t: Decimal) -> Decimal {
        let first = &self.points[0];
        let last = self.points.last().expect("curve is never empty");

        if t <= first.year_fraction() {
            return first.rate();
        }
        if t >= last.year_fraction() {
            return last.rate();
        }

        for window in self.points.windows(2) {
            let (lo, hi) = (&window[0], &window[1]);
            if t <= hi.year_fraction() {
                let span = hi.year_fraction() - lo.year_fraction();
                return lo.rate()
                    + (hi.rate() - lo.rate()) * (t - lo.year_fraction()) / span;
            }
        }

        last.rate()
    }

    /// Returns the discount factor at a target date.
    ///
    /// `exp(-zero_rate * t)` with continuous compounding; exactly 1 at or
    /// before the curve date.
    #[must_use]
    pub fn discount_factor(&self, target: Date) -> Decimal {
        if target <= self.curve_date {
            return Decimal::ONE;
        }

        let t = self.year_fraction_to(target);
        continuous_df(self.zero_rate_at(t), t)
    }
}

/// Continuously compounded discount factor `exp(-rate * t)`.
///
/// Evaluated through `f64`; the transcendental step dominates any decimal
/// precision loss at the magnitudes rates take.
pub(crate) fn continuous_df(rate: Decimal, t: Decimal) -> Decimal {
    let r: f64 = rate.to_string().parse().unwrap_or(0.0);
    let t: f64 = t.to_string().parse().unwrap_or(0.0);
    Decimal::from_f64_retain((-r * t).exp()).unwrap_or(Decimal::ONE)
}

/// Builder for constructing curve snapshots.
///
/// Points are kept in the order given; [`Curve::new`] still rejects
/// out-of-order year fractions at build time.
#[derive(Debug, Clone)]
pub struct CurveBuilder {
    name: String,
    curve_date: Date,
    currency: Currency,
    curve_type: CurveType,
    points: Vec<CurvePoint>,
    error: Option<CurveError>,
}

impl CurveBuilder {
    /// Creates a builder for a named curve as of a market date.
    #[must_use]
    pub fn new(name: impl Into<String>, curve_date: Date) -> Self {
        Self {
            name: name.into(),
            curve_date,
            currency: Currency::default(),
            curve_type: CurveType::default(),
            points: Vec::new(),
            error: None,
        }
    }

    /// Sets the quotation currency.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the curve type.
    #[must_use]
    pub fn curve_type(mut self, curve_type: CurveType) -> Self {
        self.curve_type = curve_type;
        self
    }

    /// Adds a point by year fraction and rate.
    #[must_use]
    pub fn add_point(mut self, year_fraction: Decimal, rate: Decimal) -> Self {
        match CurvePoint::new(year_fraction, rate) {
            Ok(point) => self.points.push(point),
            Err(e) => self.error = self.error.or(Some(e)),
        }
        self
    }

    /// Adds a point by absolute maturity date and rate.
    #[must_use]
    pub fn add_maturity(mut self, maturity: Date, rate: Decimal) -> Self {
        match CurvePoint::from_maturity(self.curve_date, maturity, rate) {
            Ok(point) => self.points.push(point),
            Err(e) => self.error = self.error.or(Some(e)),
        }
        self
    }

    /// Builds the curve.
    ///
    /// # Errors
    ///
    /// Returns the first point-construction error, or any error from
    /// [`Curve::new`] validation.
    pub fn build(self) -> CurveResult<Curve> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Curve::new(
            self.name,
            self.curve_date,
            self.currency,
            self.curve_type,
            self.points,
        )
    }
}
