//! Static series and the fields derived from them.
//!
//! Every chart reads from a [`SeriesSet`]: a comparison set whose series share
//! the same ordered periods. Indexed values and percent changes are derived
//! once when a dashboard is loaded and never recomputed during rendering.

use crate::error::{DataResult, DataShapeError};

/// One (period, value) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub period: String,
    pub value: f64,
}

impl Point {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            value,
        }
    }
}

/// An ordered sequence of observations for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    pub id: String,
    pub label: String,
    pub points: Vec<Point>,
}

impl DataSeries {
    pub fn new(id: impl Into<String>, label: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            points,
        }
    }

    /// Zip a period axis with a value column, failing if their lengths differ.
    pub fn from_values(
        id: impl Into<String>,
        label: impl Into<String>,
        periods: &[&str],
        values: &[f64],
    ) -> DataResult<Self> {
        let id = id.into();
        if periods.len() != values.len() {
            return Err(DataShapeError::LengthMismatch {
                series: id,
                periods: periods.len(),
                values: values.len(),
            });
        }
        let points = periods
            .iter()
            .zip(values)
            .map(|(period, value)| Point::new(*period, *value))
            .collect();
        Ok(Self::new(id, label, points))
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.value)
    }

    /// The non-zero, finite first observation every derivation divides by.
    fn baseline(&self) -> DataResult<&Point> {
        let first = self.first().ok_or_else(|| DataShapeError::Empty {
            series: self.id.clone(),
        })?;
        if !first.value.is_finite() {
            return Err(DataShapeError::NonFinite {
                series: self.id.clone(),
                period: first.period.clone(),
            });
        }
        if first.value == 0.0 {
            return Err(DataShapeError::ZeroBaseline {
                series: self.id.clone(),
                period: first.period.clone(),
            });
        }
        Ok(first)
    }

    fn ensure_finite(&self) -> DataResult<()> {
        match self.points.iter().find(|p| !p.value.is_finite()) {
            Some(bad) => Err(DataShapeError::NonFinite {
                series: self.id.clone(),
                period: bad.period.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Rescale a series so its first period equals 100, rounded to one decimal.
pub fn derive_indexed(series: &DataSeries) -> DataResult<Vec<Point>> {
    let base = series.baseline()?.value;
    series.ensure_finite()?;
    Ok(series
        .points
        .iter()
        .map(|p| Point::new(p.period.clone(), round_to(p.value / base * 100.0, 1)))
        .collect())
}

/// Percent change from the first to the last period, rounded to one decimal.
pub fn derive_percent_change(series: &DataSeries) -> DataResult<f64> {
    let first = series.baseline()?.value;
    series.ensure_finite()?;
    // baseline() guarantees at least one point
    let last = series.last().map_or(first, |p| p.value);
    Ok(round_to((last - first) / first * 100.0, 1))
}

/// Fields derived once per series of an indexed comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub id: String,
    pub indexed: Vec<Point>,
    pub percent_change: f64,
}

/// Series whose periods are identical and aligned in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    periods: Vec<String>,
    series: Vec<DataSeries>,
}

impl SeriesSet {
    /// Validate alignment. Any series whose periods differ from the first
    /// series' periods is rejected rather than zipped.
    pub fn new(series: Vec<DataSeries>) -> DataResult<Self> {
        let reference = series.first().ok_or(DataShapeError::NoSeries)?;
        let periods: Vec<String> = reference.points.iter().map(|p| p.period.clone()).collect();

        for s in &series {
            if s.points.len() != periods.len() {
                return Err(DataShapeError::LengthMismatch {
                    series: s.id.clone(),
                    periods: periods.len(),
                    values: s.points.len(),
                });
            }
            for (index, (point, expected)) in s.points.iter().zip(&periods).enumerate() {
                if &point.period != expected {
                    return Err(DataShapeError::MisalignedPeriods {
                        series: s.id.clone(),
                        index,
                        expected: expected.clone(),
                        found: point.period.clone(),
                    });
                }
            }
        }

        Ok(Self { periods, series })
    }

    /// Build a set from a shared period axis and `(id, label, values)` columns.
    pub fn from_columns(periods: &[&str], columns: &[(&str, &str, &[f64])]) -> DataResult<Self> {
        let series = columns
            .iter()
            .map(|(id, label, values)| DataSeries::from_values(*id, *label, periods, values))
            .collect::<DataResult<Vec<_>>>()?;
        Self::new(series)
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn get(&self, id: &str) -> Option<&DataSeries> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Periods as chart x coordinates.
    pub fn x_values(&self) -> DataResult<Vec<f64>> {
        self.periods
            .iter()
            .map(|p| {
                p.parse::<f64>()
                    .map_err(|_| DataShapeError::NonNumericPeriod {
                        series: self.series.first().map(|s| s.id.clone()).unwrap_or_default(),
                        period: p.clone(),
                    })
            })
            .collect()
    }

    /// Index every series to its first period and compute its percent change.
    pub fn derive(&self) -> DataResult<Vec<Derived>> {
        self.series
            .iter()
            .map(|s| {
                Ok(Derived {
                    id: s.id.clone(),
                    indexed: derive_indexed(s)?,
                    percent_change: derive_percent_change(s)?,
                })
            })
            .collect()
    }
}

/// Derived series ordered by percent change, largest gain first.
pub fn rank_by_change(derived: &[Derived]) -> Vec<&Derived> {
    let mut ranked: Vec<&Derived> = derived.iter().collect();
    ranked.sort_by(|a, b| b.percent_change.total_cmp(&a.percent_change));
    ranked
}
