// ABOUTME: Descriptive statistics and cross-tab insights over a survey table
// ABOUTME: Every statistic is an independent sub-computation rendered as one line

use std::collections::HashMap;

use crate::labels::{
    recode, ACTIVITY_LABELS, EMPLOYMENT_LABELS, HEALTH_LABELS, MARITAL_LABELS,
};
use crate::table::Table;

const AGE_BINS: &[(&str, f64, f64)] = &[
    ("<30", 0.0, 30.0),
    ("30-39", 30.0, 40.0),
    ("40-49", 40.0, 50.0),
    ("50-59", 50.0, 60.0),
    ("60-69", 60.0, 70.0),
    ("70-79", 70.0, 80.0),
    ("80+", 80.0, 120.0),
];

/// Location-like columns, first available wins.
const LOCATION_COLUMNS: &[&str] = &["location", "country", "birth_country"];

const TOP_N: usize = 5;
const OBESITY_BMI: f64 = 30.0;

/// Render the ordered summary block for a table.
///
/// The record count and average-age lines are always present (the latter as
/// `N/A` when the column is absent or unparseable); every other section is
/// omitted silently when it has no underlying data.
pub fn summarize(table: &Table) -> String {
    let mut lines = vec![
        format!("Total Records: {}", table.len()),
        average_age_line(table),
    ];
    let sections = [
        age_bins_line(table),
        location_line(table),
        gender_line(table),
        labeled_share_line(table, "sphus", HEALTH_LABELS, "Self-Perceived Health"),
        labeled_share_line(table, "br015_", ACTIVITY_LABELS, "Vigorous Activity"),
        labeled_share_line(table, "ep005_", EMPLOYMENT_LABELS, "Employment"),
        smoking_line(table),
        bmi_line(table),
        casp_line(table),
    ];
    lines.extend(sections.into_iter().flatten());

    let insights = derive_insights(table);
    let mut summary = lines.join("\n");
    if !insights.is_empty() {
        summary.push_str("\n\nDATASET INSIGHTS\n");
        summary.push_str(&insights.join("\n"));
    }
    summary
}

/// Up to three cross-tab insight sentences, in fixed order.
pub fn derive_insights(table: &Table) -> Vec<String> {
    [
        healthy_activity_insight(table),
        casp_by_marital_insight(table),
        smoking_bmi_insight(table),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn average_age_line(table: &Table) -> String {
    let avg = table
        .numeric_column("age")
        .and_then(|values| mean(values.into_iter().flatten()));
    match avg {
        Some(value) => format!("Average Age: {:.1}", value),
        None => "Average Age: N/A".to_string(),
    }
}

fn age_bins_line(table: &Table) -> Option<String> {
    let ages = table.numeric_column("age")?;
    let mut bin_counts = vec![0usize; AGE_BINS.len()];
    let mut total = 0usize;
    for age in ages.into_iter().flatten() {
        if let Some(index) = AGE_BINS
            .iter()
            .position(|(_, lo, hi)| age >= *lo && age < *hi)
        {
            bin_counts[index] += 1;
            total += 1;
        }
    }
    if total == 0 {
        return None;
    }
    let parts: Vec<String> = AGE_BINS
        .iter()
        .zip(&bin_counts)
        .map(|((label, _, _), count)| format!("{}: {}", label, pct(*count as f64 / total as f64)))
        .collect();
    Some(format!("Age Bins: {}", parts.join(", ")))
}

fn location_line(table: &Table) -> Option<String> {
    let column = LOCATION_COLUMNS
        .iter()
        .find(|name| table.has_column(name))?;
    let values = table
        .column(column)?
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);
    let counts = value_counts(values);
    if counts.is_empty() {
        return None;
    }
    let parts: Vec<String> = counts
        .iter()
        .take(TOP_N)
        .map(|(value, count)| format!("{}: {}", value, count))
        .collect();
    Some(format!("Top {}: {}", title_case(column), parts.join(", ")))
}

fn gender_line(table: &Table) -> Option<String> {
    let flags: Vec<String> = table
        .numeric_column("female")?
        .into_iter()
        .flatten()
        .map(|v| format!("female={}", v as i64))
        .collect();
    if flags.is_empty() {
        return None;
    }
    let total = flags.len();
    let counts = value_counts(flags.into_iter());
    Some(share_line("Gender Split", &counts, total))
}

fn labeled_share_line(
    table: &Table,
    column: &str,
    labels: &[(i64, &str)],
    header: &str,
) -> Option<String> {
    let recoded: Vec<String> = table
        .column(column)?
        .filter_map(|raw| recode(raw, labels))
        .collect();
    if recoded.is_empty() {
        return None;
    }
    let total = recoded.len();
    let counts = value_counts(recoded.into_iter());
    let top: Vec<(String, usize)> = counts.into_iter().take(TOP_N).collect();
    Some(share_line(header, &top, total))
}

fn smoking_line(table: &Table) -> Option<String> {
    let values: Vec<String> = table
        .column("ever_smoked")?
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| format!("ever_smoked={}", v))
        .collect();
    if values.is_empty() {
        return None;
    }
    let total = values.len();
    let counts = value_counts(values.into_iter());
    Some(share_line("Smoking History", &counts, total))
}

fn bmi_line(table: &Table) -> Option<String> {
    let values = table.numeric_column("bmi")?;
    let total_rows = values.len();
    let numeric: Vec<f64> = values.into_iter().flatten().collect();
    let mean_bmi = mean(numeric.iter().copied())?;
    // Share is over all rows; rows with an unknown BMI count against it.
    let obese = numeric.iter().filter(|v| **v >= OBESITY_BMI).count();
    let share = obese as f64 / total_rows as f64;
    Some(format!(
        "BMI Avg: {:.1}, Obesity (BMI>=30): {}",
        mean_bmi,
        pct(share)
    ))
}

fn casp_line(table: &Table) -> Option<String> {
    let avg = mean(table.numeric_column("casp")?.into_iter().flatten())?;
    Some(format!("CASP Avg: {:.1}", avg))
}

fn healthy_activity_insight(table: &Table) -> Option<String> {
    let health: Vec<Option<String>> = table
        .column("sphus")?
        .map(|raw| recode(raw, HEALTH_LABELS))
        .collect();
    let activity: Vec<Option<String>> = table
        .column("br015_")?
        .map(|raw| recode(raw, ACTIVITY_LABELS))
        .collect();

    let mut healthy_rows = 0usize;
    let mut reporting = 0usize;
    let mut vigorous = 0usize;
    for (health_label, activity_label) in health.iter().zip(activity.iter()) {
        let Some(health_label) = health_label else {
            continue;
        };
        if health_label != "Excellent" && health_label != "Very good" {
            continue;
        }
        healthy_rows += 1;
        if let Some(activity_label) = activity_label {
            reporting += 1;
            if activity_label == "More than once a week" {
                vigorous += 1;
            }
        }
    }
    if healthy_rows == 0 {
        return None;
    }
    let share = if reporting == 0 {
        0.0
    } else {
        vigorous as f64 / reporting as f64
    };
    Some(format!(
        "Among those in excellent/very good health, {:.1}% exercise >1x/week.",
        share * 100.0
    ))
}

fn casp_by_marital_insight(table: &Table) -> Option<String> {
    let casp = table.numeric_column("casp")?;
    let marital: Vec<Option<String>> = table
        .column("mar_stat")?
        .map(|raw| recode(raw, MARITAL_LABELS))
        .collect();

    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
    for (value, label) in casp.iter().zip(marital.iter()) {
        let (Some(value), Some(label)) = (value, label) else {
            continue;
        };
        let entry = groups.entry(label.clone()).or_insert((0.0, 0));
        entry.0 += *value;
        entry.1 += 1;
    }

    let mut means: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(label, (sum, count))| (label, sum / count as f64))
        .collect();
    means.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    let (best, _) = means.first()?;
    Some(format!("Highest CASP average observed in: {}.", best))
}

fn smoking_bmi_insight(table: &Table) -> Option<String> {
    let bmi = table.numeric_column("bmi")?;
    let smoked = table.numeric_column("ever_smoked")?;

    let mut ever = (0.0, 0usize);
    let mut never = (0.0, 0usize);
    for (bmi_value, smoked_value) in bmi.iter().zip(smoked.iter()) {
        let (Some(bmi_value), Some(smoked_value)) = (bmi_value, smoked_value) else {
            continue;
        };
        if *smoked_value == 1.0 {
            ever.0 += *bmi_value;
            ever.1 += 1;
        } else if *smoked_value == 0.0 {
            never.0 += *bmi_value;
            never.1 += 1;
        }
    }
    if ever.1 == 0 || never.1 == 0 {
        return None;
    }
    let delta = ever.0 / ever.1 as f64 - never.0 / never.1 as f64;
    Some(format!(
        "Average BMI difference (ever smoked vs not): {:.1}.",
        delta
    ))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Occurrence counts sorted by count descending, ties by value ascending.
fn value_counts(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

fn share_line(header: &str, counts: &[(String, usize)], total: usize) -> String {
    let parts: Vec<String> = counts
        .iter()
        .map(|(value, count)| format!("{}: {}", value, pct(*count as f64 / total as f64)))
        .collect();
    format!("{}: {}", header, parts.join(", "))
}

fn title_case(column: &str) -> String {
    column
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(csv: &str) -> Table {
        Table::from_csv_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_empty_table_summary() {
        let summary = summarize(&Table::empty());
        assert_eq!(summary, "Total Records: 0\nAverage Age: N/A");
    }

    #[test]
    fn test_average_age_placeholder_when_unparseable() {
        let summary = summarize(&table("age\nunknown\n\n"));
        assert!(summary.contains("Average Age: N/A"));
        assert!(!summary.contains("Age Bins"));
    }

    #[test]
    fn test_average_age_and_bins() {
        let summary = summarize(&table("age\n25\n35\n35\n85\n"));
        assert!(summary.contains("Average Age: 45.0"));
        assert!(summary.contains(
            "Age Bins: <30: 25.0%, 30-39: 50.0%, 40-49: 0.0%, 50-59: 0.0%, \
             60-69: 0.0%, 70-79: 0.0%, 80+: 25.0%"
        ));
    }

    #[test]
    fn test_out_of_range_ages_excluded_from_bins() {
        let summary = summarize(&table("age\n25\n150\n-5\n"));
        assert!(summary.contains("Age Bins: <30: 100.0%"));
    }

    #[test]
    fn test_location_priority_and_counts() {
        let summary = summarize(&table("country,birth_country\nDE,AT\nDE,AT\nFR,AT\n"));
        assert!(summary.contains("Top Country: DE: 2, FR: 1"));
        assert!(!summary.contains("Birth_Country"));
    }

    #[test]
    fn test_gender_split_percentages() {
        let summary = summarize(&table("female\n1\n1\n0\n1\n"));
        assert!(summary.contains("Gender Split: female=1: 75.0%, female=0: 25.0%"));
    }

    #[test]
    fn test_health_labels_with_raw_fallback() {
        let summary = summarize(&table("sphus\n1\n1\n9\n"));
        assert!(summary.contains("Self-Perceived Health: Excellent: 66.7%, 9: 33.3%"));
    }

    #[test]
    fn test_top_five_truncation() {
        let summary = summarize(&table("ep005_\n1\n1\n2\n2\n3\n3\n4\n5\n6\n7\n"));
        let employment = summary
            .lines()
            .find(|line| line.starts_with("Employment:"))
            .unwrap();
        assert_eq!(employment.matches(": ").count() - 1, 5, "five entries max");
    }

    #[test]
    fn test_smoking_and_bmi_lines() {
        let summary = summarize(&table("ever_smoked,bmi\n1,31\n0,25\n1,\n0,28\n"));
        assert!(summary.contains("Smoking History: ever_smoked=0: 50.0%, ever_smoked=1: 50.0%"));
        // Mean over known values; obesity share over all four rows.
        assert!(summary.contains("BMI Avg: 28.0, Obesity (BMI>=30): 25.0%"));
    }

    #[test]
    fn test_casp_average() {
        let summary = summarize(&table("casp\n30\n40\n"));
        assert!(summary.contains("CASP Avg: 35.0"));
    }

    #[test]
    fn test_healthy_activity_insight() {
        let csv = "sphus,br015_\n1,2\n2,2\n1,5\n4,2\n";
        let insights = derive_insights(&table(csv));
        assert_eq!(
            insights[0],
            "Among those in excellent/very good health, 66.7% exercise >1x/week."
        );
    }

    #[test]
    fn test_healthy_activity_insight_requires_healthy_rows() {
        let insights = derive_insights(&table("sphus,br015_\n4,2\n5,1\n"));
        assert!(insights
            .iter()
            .all(|i| !i.contains("excellent/very good health")));
    }

    #[test]
    fn test_casp_by_marital_insight() {
        let csv = "casp,mar_stat\n40,1\n44,1\n30,4\n";
        let insights = derive_insights(&table(csv));
        assert_eq!(
            insights[0],
            "Highest CASP average observed in: Married/Registered."
        );
    }

    #[test]
    fn test_smoking_bmi_insight_needs_both_groups() {
        let both = derive_insights(&table("bmi,ever_smoked\n30,1\n26,0\n28,1\n"));
        assert_eq!(
            both[0],
            "Average BMI difference (ever smoked vs not): 3.0."
        );

        let one_group = derive_insights(&table("bmi,ever_smoked\n30,1\n28,1\n"));
        assert!(one_group.is_empty());
    }

    #[test]
    fn test_smoking_bmi_insight_skips_rows_with_unknown_values() {
        let csv = "bmi,ever_smoked\n30,1\n,0\n26,0\n31,\n";
        let insights = derive_insights(&table(csv));
        assert_eq!(
            insights[0],
            "Average BMI difference (ever smoked vs not): 4.0."
        );
    }

    #[test]
    fn test_insights_render_after_blank_line() {
        let summary = summarize(&table("casp,mar_stat\n40,1\n30,4\n"));
        assert!(summary.contains("\n\nDATASET INSIGHTS\nHighest CASP average observed in:"));
    }

    #[test]
    fn test_value_counts_tie_break_is_deterministic() {
        let counts = value_counts(["b", "a", "a", "b"].iter().map(|s| s.to_string()));
        assert_eq!(counts[0].0, "a");
        assert_eq!(counts[1].0, "b");
    }

    #[test]
    fn test_title_case_preserves_underscores() {
        assert_eq!(title_case("birth_country"), "Birth_Country");
        assert_eq!(title_case("location"), "Location");
    }
}
