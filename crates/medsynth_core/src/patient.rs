//! Patient record: identity, clinical profile and three fixed-shape
//! attribute bundles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::literal::ScalarFallback;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("Male"),
            Gender::Female => f.write_str("Female"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physician {
    pub name: String,
    pub specialty: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    pub provider: String,
    pub policy_number: String,
    pub group_number: String,
}

impl ScalarFallback for EmergencyContact {
    fn from_scalar(raw: &str) -> Self {
        Self {
            name: raw.to_string(),
            ..Self::default()
        }
    }
}

impl ScalarFallback for Physician {
    fn from_scalar(raw: &str) -> Self {
        Self {
            name: raw.to_string(),
            ..Self::default()
        }
    }
}

impl ScalarFallback for Insurance {
    fn from_scalar(raw: &str) -> Self {
        Self {
            provider: raw.to_string(),
            ..Self::default()
        }
    }
}

/// A synthetic patient. `id` is stable for the patient's lifetime and keys
/// every derived artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub blood_type: String,
    /// Centimetres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
    pub allergies: Vec<String>,
    pub emergency_contact: EmergencyContact,
    pub physician: Physician,
    pub insurance: Insurance,
    pub last_visit: NaiveDate,
    pub next_appointment: NaiveDate,
}

impl Patient {
    /// Body-mass index from the stored height (cm) and weight (kg).
    /// Returns 0 for a non-positive height.
    pub fn bmi(&self) -> f64 {
        body_mass_index(self.height, self.weight)
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.iter().any(|c| c == name)
    }

    /// Drop duplicate conditions, medications and allergies, keeping the
    /// first occurrence of each.
    pub fn normalize(&mut self) {
        dedup_in_order(&mut self.conditions);
        dedup_in_order(&mut self.medications);
        dedup_in_order(&mut self.allergies);
        if self.full_name.trim().is_empty() {
            self.full_name = format!("{} {}", self.first_name, self.last_name);
        }
    }
}

pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    if height_m <= 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
