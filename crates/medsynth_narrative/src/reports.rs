//! Medical report synthesis.

use chrono::{Duration, NaiveDate};
use medsynth_core::rng::{chance, pick};
use medsynth_core::vocabulary::terms_for;
use medsynth_core::walk::round_tenths;
use medsynth_core::{Patient, Report, ReportSource, ReportType};
use rand::Rng;

use crate::templates::*;

/// Report generation knobs. Defaults follow the reference data set: a one
/// year lookback, 70% chance per condition of a term, 30% abnormal findings,
/// 50% chance of a second recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSynthesizer {
    pub lookback_days: i64,
    pub term_chance: f64,
    pub abnormal_chance: f64,
    pub secondary_recommendation_chance: f64,
}

impl Default for ReportSynthesizer {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            term_chance: 0.7,
            abnormal_chance: 0.3,
            secondary_recommendation_chance: 0.5,
        }
    }
}

impl ReportSynthesizer {
    /// `count` reports dated across the lookback ending `today`. Ids follow
    /// ascending date order; the result is newest first.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, patient: &Patient, count: usize, today: NaiveDate) -> Vec<Report> {
        let start = today - Duration::days(self.lookback_days);
        let mut dates: Vec<NaiveDate> = (0..count)
            .map(|_| start + Duration::days(rng.gen_range(0..=self.lookback_days)))
            .collect();
        dates.sort();

        let mut reports: Vec<Report> = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| self.report(rng, patient, format!("R{:03}", i + 1), date))
            .collect();
        medsynth_core::documents::sort_reports_newest_first(&mut reports);

        tracing::debug!("Generated {} reports for {}", reports.len(), patient.id);
        reports
    }

    pub fn report<R: Rng + ?Sized>(&self, rng: &mut R, patient: &Patient, id: String, date: NaiveDate) -> Report {
        let source = pick(rng, ReportSource::ALL);
        let report_type = pick(rng, ReportType::ALL);
        let summary = self.summary(rng, &patient.conditions, report_type);
        let specialist = format!(
            "Dr. {} {}",
            pick(rng, &SPECIALIST_FIRST_NAMES),
            pick(rng, &SPECIALIST_LAST_NAMES)
        );
        let content = self.content(rng, patient, date, source, report_type, &summary, &specialist);
        let ai_summary = ai_summary(rng);

        Report {
            id,
            patient_id: patient.id.clone(),
            date,
            source,
            report_type,
            summary,
            content,
            ai_summary,
            specialist,
        }
    }

    /// `<parts>. <findings>.` where each part is a term from one of the
    /// patient's conditions, or the routine fallback when no condition spoke.
    pub fn summary<R: Rng + ?Sized>(&self, rng: &mut R, conditions: &[String], report_type: ReportType) -> String {
        let mut parts: Vec<String> = Vec::new();
        for condition in conditions {
            let terms = terms_for(condition);
            if !terms.is_empty() && chance(rng, self.term_chance) {
                parts.push(format!("{} assessment performed", pick(rng, terms)));
            }
        }

        let findings = if chance(rng, self.abnormal_chance) {
            format!("{} {} detected", pick(rng, &FINDING_QUALIFIERS), pick(rng, &FINDING_MEASURES))
        } else {
            NORMAL_FINDINGS.to_string()
        };

        if parts.is_empty() {
            parts.push(routine_phrase(report_type));
        }
        format!("{}. {}.", parts.join(", "), findings)
    }

    #[allow(clippy::too_many_arguments)]
    fn content<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        patient: &Patient,
        date: NaiveDate,
        source: ReportSource,
        report_type: ReportType,
        summary: &str,
        specialist: &str,
    ) -> String {
        let date = date.format("%Y-%m-%d").to_string();
        let mut lines = vec![
            format!("Patient: {} {} (ID: {})", patient.first_name, patient.last_name, patient.id),
            format!("Date: {}", date),
            format!("Provider: {}, {}", specialist, source),
            format!("Type: {}", report_type),
            String::new(),
            "SUMMARY:".to_string(),
            summary.to_string(),
            String::new(),
            "DETAILED FINDINGS:".to_string(),
        ];
        lines.extend(findings_block(rng, BodyKind::for_type(report_type), patient));

        lines.push(String::new());
        lines.push("RECOMMENDATIONS:".to_string());
        lines.push(format!("- {}", pick(rng, &PRIMARY_RECOMMENDATIONS)));
        if chance(rng, self.secondary_recommendation_chance) {
            lines.push(format!("- {}", pick(rng, &SECONDARY_RECOMMENDATIONS)));
        }

        lines.push(String::new());
        lines.push(format!("Report prepared by: {}", specialist));
        lines.push(format!("Date: {}", date));
        lines.join("\n")
    }
}

/// The summary used when no condition contributed a term.
pub fn routine_phrase(report_type: ReportType) -> String {
    format!("Routine {} performed", report_type.label().to_lowercase())
}

fn findings_block<R: Rng + ?Sized>(rng: &mut R, kind: BodyKind, patient: &Patient) -> Vec<String> {
    match kind {
        BodyKind::BloodTest => {
            let mut lines: Vec<String> = BLOOD_PANEL
                .iter()
                .map(|lab| format!("- {}: {:.1} {}", lab.label, rng.gen_range(lab.low..=lab.high), lab.unit))
                .collect();
            // Platelets are counted, not measured.
            lines.insert(
                2,
                format!("- Platelet Count: {} x10^9/L", rng.gen_range(PLATELETS.0..=PLATELETS.1)),
            );
            lines
        }
        BodyKind::Cardiology => vec![
            blood_pressure(rng),
            heart_rate(rng),
            format!("- ECG: {}", pick(rng, &ECG_FINDINGS)),
            format!("- Echocardiogram: {}", pick(rng, &ECHO_FINDINGS)),
        ],
        BodyKind::PhysicalExam => vec![
            format!("- Height: {:.1} cm", patient.height),
            format!("- Weight: {:.1} kg", patient.weight),
            format!("- BMI: {:.1}", patient.bmi()),
            blood_pressure(rng),
            heart_rate(rng),
            format!(
                "- Respiratory Rate: {} breaths/min",
                rng.gen_range(RESPIRATORY_RATE.0..=RESPIRATORY_RATE.1)
            ),
            format!(
                "- Temperature: {:.1} °C",
                round_tenths(rng.gen_range(TEMPERATURE.0..=TEMPERATURE.1))
            ),
        ],
        BodyKind::Generic => vec![
            "- Examination performed as per standard protocol".to_string(),
            format!("- Patient reports {}", pick(rng, &PATIENT_REPORTS)),
            format!("- {}", pick(rng, &GENERIC_NOTES)),
        ],
    }
}

fn blood_pressure<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "- Blood Pressure: {}/{} mmHg",
        rng.gen_range(SYSTOLIC.0..=SYSTOLIC.1),
        rng.gen_range(DIASTOLIC.0..=DIASTOLIC.1)
    )
}

fn heart_rate<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("- Heart Rate: {} bpm", rng.gen_range(HEART_RATE.0..=HEART_RATE.1))
}

/// Independent one-line analysis. Not reconciled with the report body.
fn ai_summary<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "AI Analysis: Patient shows {} {}. {}",
        pick(rng, &AI_OUTLOOKS),
        pick(rng, &AI_SUBJECTS),
        pick(rng, &AI_ACTIONS)
    )
}
