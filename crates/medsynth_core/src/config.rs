use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MedsynthConfig {
    pub generation: GenerationConfig,
    pub storage: StorageConfig,
    pub live: LiveConfig,
}

impl MedsynthConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: MedsynthConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MEDSYNTH_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("MEDSYNTH_SEED") {
            if let Ok(n) = v.parse() {
                self.generation.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("MEDSYNTH_PATIENTS") {
            if let Ok(n) = v.parse() {
                self.generation.patients = n;
            }
        }
        if let Ok(v) = std::env::var("MEDSYNTH_VITALS_DAYS") {
            if let Ok(n) = v.parse() {
                self.generation.vitals_days = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Master seed. `None` draws one from entropy; the drawn seed is recorded
    /// in the run manifest so the run can be replayed.
    pub seed: Option<u64>,
    /// Identities to generate.
    pub patients: usize,
    /// Leading patients that also get vitals, reports, comments and a timeline.
    pub detailed_patients: usize,
    pub vitals_days: u32,
    pub reports_per_patient: usize,
    pub comments_per_patient: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            patients: 20,
            detailed_patients: 5,
            vitals_days: 30,
            reports_per_patient: 10,
            comments_per_patient: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Also write the flattened `patients.csv` table next to the JSON records.
    pub export_legacy_csv: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            export_legacy_csv: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    pub interval_ms: u64,
    /// Zero runs until interrupted.
    pub duration_secs: u64,
    /// Number of most recent readings kept for display.
    pub window: usize,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1500,
            duration_secs: 30,
            window: 20,
        }
    }
}

impl LiveConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn duration(&self) -> Option<Duration> {
        (self.duration_secs > 0).then(|| Duration::from_secs(self.duration_secs))
    }
}

// ============================================================================
// Tests
// ============================================================================
