//! Input record parsing.
//!
//! One raw record is an ordered sequence of string fields: a label at field
//! 0 and three numeric measurements at fields 1–3. Extra trailing fields are
//! ignored. Malformed records are typed errors, never defaulted — a skipped
//! or guessed record would silently corrupt every downstream sum.

use thiserror::Error;

/// Field position of the label.
pub const LABEL_FIELD: usize = 0;
/// Field positions of the three measurements.
pub const MEASUREMENT_FIELDS: [usize; 3] = [1, 2, 3];
/// Minimum number of fields a record must carry.
pub const MIN_FIELDS: usize = 4;

/// Errors from parsing one raw record.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("record has {found} fields, expected at least {MIN_FIELDS}")]
    TooFewFields { found: usize },
    #[error("field {field} ({value:?}) is not a number")]
    BadMeasurement { field: usize, value: String },
    #[error("field {field} ({value:?}) is not finite")]
    NonFiniteMeasurement { field: usize, value: String },
}

/// One parsed input record: a label and three measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub label: String,
    pub values: [f64; 3],
}

impl Observation {
    /// Parse an observation from raw string fields.
    ///
    /// Measurements must parse as finite f64 values. `"NaN"` and `"inf"`
    /// are rejected even though they parse, since a single non-finite
    /// measurement poisons every cell it touches.
    pub fn from_fields(fields: &[String]) -> Result<Self, RecordError> {
        if fields.len() < MIN_FIELDS {
            return Err(RecordError::TooFewFields {
                found: fields.len(),
            });
        }

        let mut values = [0.0; 3];
        for (slot, &field) in MEASUREMENT_FIELDS.iter().enumerate() {
            let raw = &fields[field];
            let parsed: f64 = raw.trim().parse().map_err(|_| RecordError::BadMeasurement {
                field,
                value: raw.clone(),
            })?;
            if !parsed.is_finite() {
                return Err(RecordError::NonFiniteMeasurement {
                    field,
                    value: raw.clone(),
                });
            }
            values[slot] = parsed;
        }

        Ok(Self {
            label: fields[LABEL_FIELD].clone(),
            values,
        })
    }
}
