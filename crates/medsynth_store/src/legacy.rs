//! Flattened `patients.csv` table.
//!
//! One row per patient. List fields hold literal list text (`['a', 'b']`) and
//! the three attribute bundles hold literal dict text. Reading is tolerant: a
//! cell that does not parse is kept as a best-effort scalar instead of
//! failing the row.

use chrono::NaiveDate;
use medsynth_core::literal::{decode_list_text, decode_record_text, encode_list, encode_record};
use medsynth_core::{Gender, Patient};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub blood_type: String,
    pub height: f64,
    pub weight: f64,
    pub conditions: String,
    pub medications: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub physician: String,
    pub insurance: String,
    pub last_visit: NaiveDate,
    pub next_appointment: NaiveDate,
}

impl PatientRow {
    pub fn from_patient(p: &Patient) -> Result<Self> {
        Ok(Self {
            id: p.id.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            full_name: p.full_name.clone(),
            age: p.age,
            gender: p.gender,
            blood_type: p.blood_type.clone(),
            height: p.height,
            weight: p.weight,
            conditions: encode_list(&p.conditions),
            medications: encode_list(&p.medications),
            allergies: encode_list(&p.allergies),
            emergency_contact: encode_record(&p.emergency_contact)?,
            physician: encode_record(&p.physician)?,
            insurance: encode_record(&p.insurance)?,
            last_visit: p.last_visit,
            next_appointment: p.next_appointment,
        })
    }

    /// Decode back into a structured record. Never fails.
    pub fn into_patient(self) -> Patient {
        let mut patient = Patient {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            full_name: self.full_name,
            age: self.age,
            gender: self.gender,
            blood_type: self.blood_type,
            height: self.height,
            weight: self.weight,
            conditions: decode_list_text(&self.conditions),
            medications: decode_list_text(&self.medications),
            allergies: decode_list_text(&self.allergies),
            emergency_contact: decode_record_text(&self.emergency_contact),
            physician: decode_record_text(&self.physician),
            insurance: decode_record_text(&self.insurance),
            last_visit: self.last_visit,
            next_appointment: self.next_appointment,
        };
        patient.normalize();
        patient
    }
}

/// Render patients as CSV text with a header row.
pub fn encode_patients(patients: &[Patient]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for p in patients {
        writer.serialize(PatientRow::from_patient(p)?)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| crate::StoreError::Io(e.into_error()))
}

/// Parse CSV text written by [`encode_patients`] (or by older tooling with
/// the same columns).
pub fn decode_patients(bytes: &[u8]) -> Result<Vec<Patient>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut patients = Vec::new();
    for row in reader.deserialize::<PatientRow>() {
        patients.push(row?.into_patient());
    }
    Ok(patients)
}
