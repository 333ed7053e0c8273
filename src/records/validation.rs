use thiserror::Error;

use super::types::{Macros, SyncBatch};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} of {record} must not be negative")]
    Negative { record: String, field: &'static str },

    #[error("stressLevel of metric {record} must be between 1 and 10, got {value}")]
    StressLevel { record: String, value: i32 },

    #[error("fasting entry {record} ends before it starts")]
    FastEndsBeforeStart { record: String },
}

fn non_negative(
    record: &str,
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 0.0 => Err(ValidationError::Negative {
            record: record.to_string(),
            field,
        }),
        _ => Ok(()),
    }
}

fn check_macros(record: &str, m: &Macros) -> Result<(), ValidationError> {
    non_negative(record, "protein", Some(m.protein))?;
    non_negative(record, "netCarbs", Some(m.net_carbs))?;
    non_negative(record, "fat", Some(m.fat))?;
    non_negative(record, "calories", Some(m.calories))
}

impl SyncBatch {
    /// Checks the value ranges the client is expected to respect.
    /// Stops at the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for meal in &self.meals {
            check_macros(&meal.id, &meal.computed_totals)?;
            for usage in &meal.components {
                non_negative(&meal.id, "portionMultiplier", Some(usage.portion_multiplier))?;
                if let Some(m) = &usage.macro_override {
                    check_macros(&meal.id, m)?;
                }
            }
        }

        for ex in &self.exercises {
            non_negative(&ex.id, "distanceKm", ex.distance_km)?;
            for set in ex.exercises.iter().flatten() {
                non_negative(&ex.id, "weightKg", set.weight_kg)?;
            }
        }

        for m in &self.metrics {
            non_negative(&m.id, "weightKg", m.weight_kg)?;
            non_negative(&m.id, "waistCm", m.waist_cm)?;
            non_negative(&m.id, "sleepHours", m.sleep_hours)?;
            if let Some(level) = m.stress_level {
                if !(1..=10).contains(&level) {
                    return Err(ValidationError::StressLevel {
                        record: m.id.clone(),
                        value: level,
                    });
                }
            }
        }

        for f in &self.fasting {
            non_negative(&f.id, "durationHours", f.duration_hours)?;
            if let Some(end) = f.end_time {
                if end < f.start_time {
                    return Err(ValidationError::FastEndsBeforeStart {
                        record: f.id.clone(),
                    });
                }
            }
        }

        for b in &self.beverages {
            non_negative(&b.id, "volumeMl", b.volume_ml)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch(v: serde_json::Value) -> SyncBatch {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn empty_batch_is_valid() {
        assert_eq!(SyncBatch::default().validate(), Ok(()));
    }

    #[test]
    fn stress_level_out_of_range() {
        let b = batch(json!({
            "metrics": [{ "id": "m1", "ts": "2024-05-01T07:00:00Z", "stressLevel": 11 }]
        }));
        assert_eq!(
            b.validate(),
            Err(ValidationError::StressLevel { record: "m1".into(), value: 11 })
        );
    }

    #[test]
    fn fast_must_not_end_before_start() {
        let b = batch(json!({
            "fasting": [{
                "id": "f1",
                "ts": "2024-05-01T20:00:00Z",
                "startTime": "2024-05-01T20:00:00Z",
                "endTime": "2024-05-01T08:00:00Z"
            }]
        }));
        assert_eq!(
            b.validate(),
            Err(ValidationError::FastEndsBeforeStart { record: "f1".into() })
        );
    }

    #[test]
    fn ongoing_fast_is_valid() {
        let b = batch(json!({
            "fasting": [{ "ts": "2024-05-01T20:00:00Z", "startTime": "2024-05-01T20:00:00Z" }]
        }));
        assert!(b.validate().is_ok());
    }

    #[test]
    fn negative_volume_is_rejected() {
        let b = batch(json!({
            "beverages": [{ "id": "b1", "ts": "2024-05-01T09:00:00Z", "type": "Water", "volumeMl": -5 }]
        }));
        let err = b.validate().unwrap_err();
        assert!(err.to_string().contains("volumeMl"));
    }

    #[test]
    fn negative_override_macros_are_rejected() {
        let b = batch(json!({
            "meals": [{
                "id": "meal-1",
                "ts": "2024-05-01T12:30:00Z",
                "components": [{ "componentId": "egg", "macroOverride": { "fat": -1 } }],
                "computedTotals": {}
            }]
        }));
        assert_eq!(
            b.validate(),
            Err(ValidationError::Negative { record: "meal-1".into(), field: "fat" })
        );
    }
}
