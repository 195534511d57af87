//! Condition vocabulary shared by identity, report and timeline generation.
//!
//! Condition names on a patient are free text; anything outside the catalog
//! is legal and simply has no report terms and the neutral color.

/// One catalogued condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionProfile {
    pub name: &'static str,
    /// Display color for timeline groups and items.
    pub color: &'static str,
    /// Terms a report may mention when the patient has this condition.
    pub terms: [&'static str; 4],
}

/// Color used when a condition has no catalog entry.
pub const NEUTRAL_COLOR: &str = "#dfe6e9";

pub static CONDITIONS: [ConditionProfile; 10] = [
    ConditionProfile {
        name: "Hypertension",
        color: "#ff6b6b",
        terms: ["blood pressure", "hypertension", "cardiovascular risk", "sodium restriction"],
    },
    ConditionProfile {
        name: "Diabetes Type 2",
        color: "#48dbfb",
        terms: ["glucose", "HbA1c", "insulin resistance", "diabetic"],
    },
    ConditionProfile {
        name: "Asthma",
        color: "#1dd1a1",
        terms: ["respiratory", "inhaler", "wheezing", "bronchial"],
    },
    ConditionProfile {
        name: "Arthritis",
        color: "#feca57",
        terms: ["joint pain", "inflammation", "mobility", "arthritis"],
    },
    ConditionProfile {
        name: "Obesity",
        color: "#5f27cd",
        terms: ["BMI", "weight management", "dietary guidelines", "exercise regimen"],
    },
    ConditionProfile {
        name: "Coronary Artery Disease",
        color: "#ee5253",
        terms: ["cardiac", "coronary", "atherosclerosis", "ischemia"],
    },
    ConditionProfile {
        name: "COPD",
        color: "#a29bfe",
        terms: ["pulmonary", "emphysema", "oxygen therapy", "bronchodilator"],
    },
    ConditionProfile {
        name: "Depression",
        color: "#54a0ff",
        terms: ["mood", "antidepressant", "therapy", "mental health"],
    },
    ConditionProfile {
        name: "Anxiety",
        color: "#ff9ff3",
        terms: ["anxiety", "stress", "panic", "anxiolytic"],
    },
    ConditionProfile {
        name: "Hypothyroidism",
        color: "#00d2d3",
        terms: ["thyroid", "TSH", "levothyroxine", "metabolism"],
    },
];

/// Catalogued condition names, in catalog order.
pub fn condition_names() -> impl Iterator<Item = &'static str> {
    CONDITIONS.iter().map(|c| c.name)
}

pub fn lookup(name: &str) -> Option<&'static ConditionProfile> {
    CONDITIONS.iter().find(|c| c.name == name)
}

pub fn color_for(name: &str) -> &'static str {
    lookup(name).map(|c| c.color).unwrap_or(NEUTRAL_COLOR)
}

/// Report terms for a condition; empty for unknown names.
pub fn terms_for(name: &str) -> &'static [&'static str] {
    match lookup(name) {
        Some(profile) => &profile.terms,
        None => &[],
    }
}

/// Every catalogued term, for checks that no condition vocabulary leaked.
pub fn all_terms() -> impl Iterator<Item = &'static str> {
    CONDITIONS.iter().flat_map(|c| c.terms.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_and_unknown() {
        assert_eq!(lookup("Asthma").map(|c| c.color), Some("#1dd1a1"));
        assert!(lookup("Gout").is_none());
        assert_eq!(color_for("Gout"), NEUTRAL_COLOR);
        assert!(terms_for("Gout").is_empty());
        assert_eq!(terms_for("COPD").len(), 4);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = condition_names().collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CONDITIONS.len());
    }
}
