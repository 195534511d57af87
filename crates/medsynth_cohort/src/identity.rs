//! Patient identity generator.

use chrono::{Duration, NaiveDate};
use medsynth_core::rng::{distinct_picks, pick};
use medsynth_core::vocabulary::condition_names;
use medsynth_core::walk::round_tenths;
use medsynth_core::{EmergencyContact, Gender, Insurance, Patient, Physician};
use rand::Rng;

const MALE_FIRST_NAMES: [&str; 8] = [
    "John", "Michael", "David", "Robert", "James", "William", "Thomas", "Richard",
];
const FEMALE_FIRST_NAMES: [&str; 8] = [
    "Mary", "Jennifer", "Linda", "Patricia", "Elizabeth", "Susan", "Jessica", "Sarah",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Taylor", "Clark",
];
const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

const MEDICATIONS: [&str; 10] = [
    "Atorvastatin",
    "Lisinopril",
    "Levothyroxine",
    "Metformin",
    "Amlodipine",
    "Metoprolol",
    "Albuterol",
    "Omeprazole",
    "Losartan",
    "Gabapentin",
];
const ALLERGIES: [&str; 10] = [
    "Penicillin",
    "Sulfa Drugs",
    "Peanuts",
    "Shellfish",
    "Latex",
    "Aspirin",
    "Ibuprofen",
    "Eggs",
    "Milk",
    "Wheat",
];

const CONTACT_NAMES: [&str; 8] = [
    "Sarah", "Robert", "Emily", "Michael", "Jessica", "David", "Jennifer", "James",
];
const RELATIONSHIPS: [&str; 5] = ["Spouse", "Child", "Parent", "Sibling", "Friend"];
const PHYSICIAN_SURNAMES: [&str; 8] = [
    "Anderson", "Baker", "Carter", "Davis", "Edwards", "Fisher", "Garcia", "Harris",
];
const INSURERS: [&str; 6] = ["Blue Cross", "Aetna", "UnitedHealthcare", "Cigna", "Humana", "Kaiser"];
const POLICY_PREFIXES: [&str; 5] = ["ABC", "XYZ", "DEF", "GHI", "JKL"];

/// `P001`, `P002`, ... for 1-based `index`.
pub fn patient_id(index: usize) -> String {
    format!("P{:03}", index)
}

fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "({})-{}-{}",
        rng.gen_range(100..=999),
        rng.gen_range(100..=999),
        rng.gen_range(1000..=9999)
    )
}

/// A fresh identity for the `index`-th patient (1-based). Visit dates are
/// relative to `today`.
pub fn generate_identity<R: Rng + ?Sized>(rng: &mut R, index: usize, today: NaiveDate) -> Patient {
    let gender = pick(rng, &[Gender::Male, Gender::Female]);
    let first_name = match gender {
        Gender::Male => pick(rng, &MALE_FIRST_NAMES),
        Gender::Female => pick(rng, &FEMALE_FIRST_NAMES),
    };
    let last_name = pick(rng, &LAST_NAMES);
    let age = rng.gen_range(25..=85);
    let blood_type = pick(rng, &BLOOD_TYPES);

    let catalog: Vec<&str> = condition_names().collect();
    let n = rng.gen_range(0..=3);
    let conditions = distinct_picks(rng, &catalog, n);
    let n = rng.gen_range(0..=4);
    let medications = distinct_picks(rng, &MEDICATIONS, n);
    let n = rng.gen_range(0..=2);
    let allergies = distinct_picks(rng, &ALLERGIES, n);

    let emergency_contact = EmergencyContact {
        name: pick(rng, &CONTACT_NAMES).to_string(),
        relationship: pick(rng, &RELATIONSHIPS).to_string(),
        phone: phone(rng),
    };
    let physician = Physician {
        name: format!("Dr. {}", pick(rng, &PHYSICIAN_SURNAMES)),
        specialty: "Primary Care".to_string(),
        phone: phone(rng),
    };
    let insurance = Insurance {
        provider: pick(rng, &INSURERS).to_string(),
        policy_number: format!("{}-{}", pick(rng, &POLICY_PREFIXES), rng.gen_range(10000..=99999u32)),
        group_number: rng.gen_range(1000..=9999u32).to_string(),
    };

    let height = round_tenths(rng.gen_range(150.0..=190.0));
    let weight = round_tenths(rng.gen_range(50.0..=110.0));
    let last_visit = today - Duration::days(rng.gen_range(1..=90));
    let next_appointment = today + Duration::days(rng.gen_range(1..=60));

    let mut patient = Patient {
        id: patient_id(index),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        full_name: format!("{} {}", first_name, last_name),
        age,
        gender,
        blood_type: blood_type.to_string(),
        height,
        weight,
        conditions,
        medications,
        allergies,
        emergency_contact,
        physician,
        insurance,
        last_visit,
        next_appointment,
    };
    patient.normalize();
    patient
}

/// The fixed demonstration patient seeded when no data exists.
pub fn demo_patient(today: NaiveDate) -> Patient {
    Patient {
        id: patient_id(1),
        first_name: "John".into(),
        last_name: "Doe".into(),
        full_name: "John Doe".into(),
        age: 45,
        gender: Gender::Male,
        blood_type: "O+".into(),
        height: 178.5,
        weight: 80.2,
        conditions: vec!["Hypertension".into(), "Diabetes Type 2".into()],
        medications: vec!["Lisinopril".into(), "Metformin".into()],
        allergies: vec!["Penicillin".into()],
        emergency_contact: EmergencyContact {
            name: "Jane Doe".into(),
            relationship: "Spouse".into(),
            phone: "(555)-123-4567".into(),
        },
        physician: Physician {
            name: "Dr. Smith".into(),
            specialty: "Primary Care".into(),
            phone: "(555)-987-6543".into(),
        },
        insurance: Insurance {
            provider: "Blue Cross".into(),
            policy_number: "BC-12345".into(),
            group_number: "5678".into(),
        },
        last_visit: today - Duration::days(30),
        next_appointment: today + Duration::days(15),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsynth_core::rng::seeded;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_ids_are_padded() {
        assert_eq!(patient_id(1), "P001");
        assert_eq!(patient_id(20), "P020");
    }

    #[test]
    fn test_identity_ranges() {
        let mut rng = seeded(1);
        for i in 1..=200 {
            let p = generate_identity(&mut rng, i, today());
            assert_eq!(p.id, patient_id(i));
            assert!((25..=85).contains(&p.age));
            assert!((150.0..=190.0).contains(&p.height));
            assert!((50.0..=110.0).contains(&p.weight));
            assert!(p.conditions.len() <= 3);
            assert!(p.medications.len() <= 4);
            assert!(p.allergies.len() <= 2);
            assert_eq!(p.full_name, format!("{} {}", p.first_name, p.last_name));
            assert!(p.last_visit < today() && p.next_appointment > today());
            assert!(p.physician.name.starts_with("Dr. "));
            assert_eq!(p.physician.specialty, "Primary Care");
        }
    }

    #[test]
    fn test_first_name_matches_gender() {
        let mut rng = seeded(2);
        for i in 1..=100 {
            let p = generate_identity(&mut rng, i, today());
            let pool: &[&str] = match p.gender {
                Gender::Male => &MALE_FIRST_NAMES,
                Gender::Female => &FEMALE_FIRST_NAMES,
            };
            assert!(pool.contains(&p.first_name.as_str()));
        }
    }

    #[test]
    fn test_lists_have_no_duplicates() {
        let mut rng = seeded(3);
        for i in 1..=200 {
            let p = generate_identity(&mut rng, i, today());
            for list in [&p.conditions, &p.medications, &p.allergies] {
                let mut sorted = list.clone();
                sorted.sort();
                sorted.dedup();
                assert_eq!(sorted.len(), list.len());
            }
        }
    }

    #[test]
    fn test_phone_and_policy_shapes() {
        let p = generate_identity(&mut seeded(4), 1, today());
        let phone = &p.emergency_contact.phone;
        assert_eq!(phone.len(), 14);
        assert!(phone.starts_with('(') && &phone[4..6] == ")-" && &phone[9..10] == "-");
        let (prefix, number) = p.insurance.policy_number.split_once('-').unwrap();
        assert_eq!(prefix.len(), 3);
        assert_eq!(number.len(), 5);
        assert_eq!(p.insurance.group_number.len(), 4);
    }

    #[test]
    fn test_demo_patient() {
        let p = demo_patient(today());
        assert_eq!(p.id, "P001");
        assert_eq!(p.full_name, "John Doe");
        assert_eq!(p.conditions, vec!["Hypertension", "Diabetes Type 2"]);
        assert_eq!(p.last_visit, today() - Duration::days(30));
        assert_eq!(p.next_appointment, today() + Duration::days(15));
    }
}
