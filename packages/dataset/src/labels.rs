// ABOUTME: Fixed label dictionaries for categorical survey columns
// ABOUTME: Recodes numeric codes to human labels with raw-value fallback

use crate::table::parse_number;

/// Self-perceived health (`sphus`).
pub const HEALTH_LABELS: &[(i64, &str)] = &[
    (1, "Excellent"),
    (2, "Very good"),
    (3, "Good"),
    (4, "Fair"),
    (5, "Poor"),
];

/// Vigorous physical activity frequency (`br015_`).
pub const ACTIVITY_LABELS: &[(i64, &str)] = &[
    (1, "Daily"),
    (2, "More than once a week"),
    (3, "Once a week"),
    (4, "One to three times a month"),
    (5, "Hardly ever or never"),
];

/// Current employment situation (`ep005_`).
pub const EMPLOYMENT_LABELS: &[(i64, &str)] = &[
    (1, "Employed"),
    (2, "Unemployed"),
    (3, "Retired"),
    (4, "Student"),
    (5, "Homemaker"),
    (6, "Disabled"),
    (7, "Other"),
];

/// Marital status (`mar_stat`).
pub const MARITAL_LABELS: &[(i64, &str)] = &[
    (1, "Married/Registered"),
    (2, "Separated"),
    (3, "Divorced"),
    (4, "Widowed"),
    (5, "Never married"),
];

/// Recode one raw cell against a label dictionary.
///
/// Integer codes found in the dictionary map to their label; other numeric
/// values keep their raw text as a fallback label. Blank and non-numeric
/// cells are missing and recode to `None`.
pub fn recode(raw: &str, labels: &[(i64, &str)]) -> Option<String> {
    let value = parse_number(raw)?;
    if value.fract() == 0.0 {
        let code = value as i64;
        if let Some((_, label)) = labels.iter().find(|(c, _)| *c == code) {
            return Some((*label).to_string());
        }
    }
    Some(raw.trim().to_string())
}
