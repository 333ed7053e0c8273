use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_portion() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardioType {
    Walk,
    Pickleball,
    Golf,
    Jogging,
    BeepTest,
    Cycling,
    Swimming,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BeverageType {
    BlackCoffee,
    DietCoke,
    SaltedLimeSoda,
    Water,
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExerciseMode {
    #[default]
    Strength,
    Cardio,
    Mixed,
}

/// Macro breakdown of a meal or component. Missing values count as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub net_carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealComponentUsage {
    pub component_id: String,
    #[serde(default = "default_portion")]
    pub portion_multiplier: f64, // 1.0 = default portion
    #[serde(default)]
    pub macro_override: Option<Macros>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMeta {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub vision_result: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    pub components: Vec<MealComponentUsage>,
    pub computed_totals: Macros,
    #[serde(default)]
    pub photo_meta: Option<PhotoMeta>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    #[serde(default)]
    pub mode: ExerciseMode,
    #[serde(default)]
    pub routine_id: Option<String>,
    #[serde(default)]
    pub exercises: Option<Vec<ExerciseSet>>,
    #[serde(default)]
    pub cardio_type: Option<CardioType>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub beep_test_level: Option<String>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub waist_cm: Option<f64>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub stress_level: Option<i32>, // 1..=10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastingEntry {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime, // log time
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>, // None while the fast is ongoing
    #[serde(default)]
    pub duration_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeverageEntry {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub ts: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: BeverageType,
    #[serde(default)]
    pub volume_ml: Option<f64>,
}

/// Everything the client uploads in one sync round-trip.
///
/// The lists are independent; nothing ties a meal to a metric or a fast.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncBatch {
    #[serde(default)]
    pub meals: Vec<MealEntry>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
    #[serde(default)]
    pub fasting: Vec<FastingEntry>,
    #[serde(default)]
    pub beverages: Vec<BeverageEntry>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_sync_timestamp: Option<OffsetDateTime>,
}

impl SyncBatch {
    pub fn record_count(&self) -> usize {
        self.meals.len()
            + self.exercises.len()
            + self.metrics.len()
            + self.fasting.len()
            + self.beverages.len()
    }
}
