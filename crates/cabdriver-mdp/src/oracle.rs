use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::EnvError;

/// Read-only source of travel durations between locations.
pub trait TravelTimeOracle {
    /// Whole hours needed to drive from `origin` to `destination` starting at `(hour, day)`.
    fn travel_time(
        &self,
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
    ) -> Result<u32, EnvError>;
}

/// Dimensions of a travel time matrix: `(locations, locations, hours_per_day, days_per_week)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixShape {
    pub locations: usize,
    pub hours_per_day: usize,
    pub days_per_week: usize,
}

impl MatrixShape {
    /// Shape covering `locations` origins and destinations over a full week.
    pub fn new(locations: usize, hours_per_day: usize, days_per_week: usize) -> Self {
        Self {
            locations,
            hours_per_day,
            days_per_week,
        }
    }

    /// Return the four array dimensions.
    pub fn dims(&self) -> (usize, usize, usize, usize) {
        (
            self.locations,
            self.locations,
            self.hours_per_day,
            self.days_per_week,
        )
    }

    fn len(&self) -> usize {
        self.locations * self.locations * self.hours_per_day * self.days_per_week
    }
}

/// Nested `[origin][destination][hour][day]` layout used on disk.
pub type NestedHours = Vec<Vec<Vec<Vec<f64>>>>;

/// Dense travel time table stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelTimeMatrix {
    shape: MatrixShape,
    hours: Vec<u32>,
}

impl TravelTimeMatrix {
    /// Matrix where every lookup returns `hours`.
    pub fn filled(shape: MatrixShape, hours: u32) -> Self {
        Self {
            shape,
            hours: vec![hours; shape.len()],
        }
    }

    /// Matrix with uniform random durations in `1..=max_hours`, for demos and tests.
    pub fn random<R: Rng + ?Sized>(shape: MatrixShape, max_hours: u32, rng: &mut R) -> Self {
        let max_hours = max_hours.max(1);
        let hours = (0..shape.len())
            .map(|_| rng.gen_range(1..=max_hours))
            .collect();
        Self { shape, hours }
    }

    /// Build from a nested array, checking that it is rectangular and holds whole hours that fit in `u32`.
    pub fn from_nested(nested: &NestedHours) -> Result<Self, EnvError> {
        let locations = nested.len();
        let hours_per_day = nested
            .first()
            .and_then(|row| row.first())
            .map_or(0, Vec::len);
        let days_per_week = nested
            .first()
            .and_then(|row| row.first())
            .and_then(|col| col.first())
            .map_or(0, Vec::len);
        let shape = MatrixShape::new(locations, hours_per_day, days_per_week);

        let mut hours = Vec::with_capacity(shape.len());
        for (origin, row) in nested.iter().enumerate() {
            if row.len() != locations {
                return Err(EnvError::MatrixShape {
                    expected: shape.dims(),
                    found: (locations, row.len(), hours_per_day, days_per_week),
                });
            }
            for (destination, col) in row.iter().enumerate() {
                if col.len() != hours_per_day {
                    return Err(EnvError::MatrixShape {
                        expected: shape.dims(),
                        found: (locations, locations, col.len(), days_per_week),
                    });
                }
                for (hour, days) in col.iter().enumerate() {
                    if days.len() != days_per_week {
                        return Err(EnvError::MatrixShape {
                            expected: shape.dims(),
                            found: (locations, locations, hours_per_day, days.len()),
                        });
                    }

                    for (day, value) in days.iter().copied().enumerate() {
                        if !value.is_finite()
                            || value < 0.0
                            || value.fract() != 0.0
                            || value > f64::from(u32::MAX)
                        {
                            return Err(EnvError::InvalidTravelTime {
                                origin,
                                destination,
                                hour,
                                day,
                                value,
                            });
                        }
                        hours.push(value as u32);
                    }
                }
            }
        }

        Ok(Self { shape, hours })
    }

    /// Convert back to the nested on-disk layout.
    pub fn to_nested(&self) -> NestedHours {
        let MatrixShape {
            locations,
            hours_per_day,
            days_per_week,
        } = self.shape;

        (0..locations)
            .map(|origin| {
                (0..locations)
                    .map(|destination| {
                        (0..hours_per_day)
                            .map(|hour| {
                                (0..days_per_week)
                                    .map(|day| {
                                        f64::from(
                                            self.hours[self.offset(origin, destination, hour, day)],
                                        )
                                    })
                                    .collect()
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    /// Dimensions of this matrix.
    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    /// Return whether this matrix covers every lookup an environment with `shape` can make.
    pub fn covers(&self, shape: MatrixShape) -> bool {
        self.shape == shape
    }

    /// Overwrite a single entry.
    pub fn set(
        &mut self,
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
        hours: u32,
    ) -> Result<(), EnvError> {
        let offset = self.checked_offset(origin, destination, hour, day)?;
        self.hours[offset] = hours;
        Ok(())
    }

    fn offset(&self, origin: usize, destination: usize, hour: usize, day: usize) -> usize {
        let s = &self.shape;
        ((origin * s.locations + destination) * s.hours_per_day + hour) * s.days_per_week + day
    }

    fn checked_offset(
        &self,
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
    ) -> Result<usize, EnvError> {
        let s = &self.shape;
        if origin >= s.locations
            || destination >= s.locations
            || hour >= s.hours_per_day
            || day >= s.days_per_week
        {
            return Err(EnvError::OracleLookup {
                origin,
                destination,
                hour,
                day,
            });
        }
        Ok(self.offset(origin, destination, hour, day))
    }
}

impl TravelTimeOracle for TravelTimeMatrix {
    fn travel_time(
        &self,
        origin: usize,
        destination: usize,
        hour: usize,
        day: usize,
    ) -> Result<u32, EnvError> {
        let offset = self.checked_offset(origin, destination, hour, day)?;
        Ok(self.hours[offset])
    }
}

impl Serialize for TravelTimeMatrix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TravelTimeMatrix {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nested = NestedHours::deserialize(deserializer)?;
        TravelTimeMatrix::from_nested(&nested).map_err(serde::de::Error::custom)
    }
}
