/// Measurement column registry for the weather observation pipeline.
///
/// Defines the canonical set of numeric measurement columns tracked by this
/// service, along with their units, instrument sentinel values, and physical
/// plausibility bounds. This is the single source of truth for column names —
/// other modules and the default configuration reference columns from here
/// rather than hardcoding names, sentinels, or bounds.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Plausibility bounds
// ---------------------------------------------------------------------------

/// A physically motivated value range used to discard impossible readings.
///
/// Endpoints are exclusive unless the matching `*_inclusive` flag is set;
/// the defaults match open intervals like temperature (-80, 60), while wind
/// speed uses an inclusive lower endpoint, [0, 60).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlausibleBound {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub min_inclusive: bool,
    #[serde(default)]
    pub max_inclusive: bool,
}

impl PlausibleBound {
    /// Whether `value` lies inside the bound.
    pub fn contains(&self, value: f64) -> bool {
        let above = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        let below = if self.max_inclusive {
            value <= self.max
        } else {
            value < self.max
        };
        above && below
    }
}

// ---------------------------------------------------------------------------
// Runtime column specification
// ---------------------------------------------------------------------------

/// Cleaning configuration for one tracked numeric column, as used by the
/// pipeline stages. Deserialized from `[[columns]]` tables in the config
/// file, or built from [`COLUMN_REGISTRY`] when no file overrides it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSpec {
    /// Flattened column name, e.g. "airTemperature_value".
    pub name: String,
    /// Exact values meaning "instrument reported no valid reading".
    #[serde(default)]
    pub sentinels: Vec<f64>,
    /// Plausibility bound; `None` means the column is tracked (parsed and
    /// smoothed) but never drops rows.
    #[serde(default)]
    pub bound: Option<PlausibleBound>,
}

// ---------------------------------------------------------------------------
// Column registry
// ---------------------------------------------------------------------------

/// Static metadata for one tracked measurement column.
pub struct MeasurementColumn {
    /// Flattened key as it appears after the flattener runs, e.g. the
    /// document's `airTemperature: {value: ...}` becomes "airTemperature_value".
    pub name: &'static str,
    /// Human-readable description of what the instrument measures.
    pub description: &'static str,
    /// Reporting unit.
    pub unit: &'static str,
    /// Protocol sentinel encodings for "no reading". These sit just outside
    /// the plausible range, but scrubbing matches them exactly so genuine
    /// out-of-range readings are left for the outlier filter to judge.
    pub sentinels: &'static [f64],
    /// Physical plausibility bound for the outlier filter.
    pub bound: Option<PlausibleBound>,
}

/// The measurement columns tracked by default, matching the fields reported
/// by the upstream surface-observation documents.
///
/// Sources:
///   - Sentinel encodings: ISD/NOAA surface data documentation (999.9 family)
///   - Plausibility bounds: physically realistic station ranges
pub static COLUMN_REGISTRY: &[MeasurementColumn] = &[
    MeasurementColumn {
        name: "airTemperature_value",
        description: "Air temperature at the station",
        unit: "degC",
        sentinels: &[999.9, -999.9],
        bound: Some(PlausibleBound {
            min: -80.0,
            max: 60.0,
            min_inclusive: false,
            max_inclusive: false,
        }),
    },
    MeasurementColumn {
        name: "pressure_value",
        description: "Sea-level pressure",
        unit: "hPa",
        sentinels: &[9999.0, 99999.0],
        bound: Some(PlausibleBound {
            min: 850.0,
            max: 1080.0,
            min_inclusive: false,
            max_inclusive: false,
        }),
    },
    MeasurementColumn {
        name: "wind_speed_rate",
        description: "Wind speed",
        unit: "m/s",
        sentinels: &[999.9],
        // Calm air is a legitimate reading, hence the inclusive lower end.
        bound: Some(PlausibleBound {
            min: 0.0,
            max: 60.0,
            min_inclusive: true,
            max_inclusive: false,
        }),
    },
];

/// Runtime column specs built from the registry. Used as the configuration
/// default when no `[[columns]]` overrides are present.
pub fn default_columns() -> Vec<ColumnSpec> {
    COLUMN_REGISTRY
        .iter()
        .map(|col| ColumnSpec {
            name: col.name.to_string(),
            sentinels: col.sentinels.to_vec(),
            bound: col.bound,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_flattened_keys() {
        // Tracked columns must already be composite keys (group_field form);
        // the schema normalizer looks them up after flattening.
        for col in COLUMN_REGISTRY {
            assert!(
                col.name.contains('_'),
                "column {} is not in flattened form",
                col.name
            );
        }
    }

    #[test]
    fn test_exclusive_bound_rejects_endpoints() {
        let bound = PlausibleBound {
            min: -80.0,
            max: 60.0,
            min_inclusive: false,
            max_inclusive: false,
        };
        assert!(!bound.contains(-80.0));
        assert!(!bound.contains(60.0));
        assert!(bound.contains(0.0));
        assert!(bound.contains(-79.9));
    }

    #[test]
    fn test_half_open_wind_bound_accepts_calm() {
        let wind = COLUMN_REGISTRY
            .iter()
            .find(|c| c.name == "wind_speed_rate")
            .unwrap();
        let bound = wind.bound.unwrap();
        assert!(bound.contains(0.0));
        assert!(!bound.contains(60.0));
        assert!(!bound.contains(-0.1));
    }

    #[test]
    fn test_sentinels_lie_outside_bounds() {
        // Sentinel encodings should never survive an outlier check anyway;
        // scrubbing first is about labeling them missing instead of dropped.
        for col in COLUMN_REGISTRY {
            if let Some(bound) = col.bound {
                for s in col.sentinels {
                    assert!(
                        !bound.contains(*s),
                        "sentinel {} for {} is inside its plausible range",
                        s,
                        col.name
                    );
                }
            }
        }
    }
}
