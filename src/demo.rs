use std::sync::Arc;

use anyhow::Result;
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use campaign_plots::Dataset;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Normal};

pub const CATEGORICAL_COLS: [&str; 5] = ["job", "marital", "education", "contact", "y"];
pub const NUMERIC_COLS: [&str; 5] = ["client_id", "age", "balance", "duration", "campaign"];

const JOBS: [(&str, f64); 8] = [
    ("admin", 0.22),
    ("blue-collar", 0.20),
    ("technician", 0.16),
    ("services", 0.10),
    ("management", 0.15),
    ("retired", 0.07),
    ("student", 0.04),
    ("unemployed", 0.06),
];
const MARITAL: [(&str, f64); 3] = [("married", 0.6), ("single", 0.28), ("divorced", 0.12)];
const EDUCATION: [(&str, f64); 4] = [
    ("secondary", 0.5),
    ("tertiary", 0.3),
    ("primary", 0.15),
    ("unknown", 0.05),
];
const CONTACT: [(&str, f64); 3] = [("cellular", 0.65), ("telephone", 0.07), ("unknown", 0.28)];

fn pick(rng: &mut SmallRng, choices: &[(&'static str, f64)]) -> Result<&'static str> {
    Ok(choices.choose_weighted(rng, |c| c.1)?.0)
}

/// A synthetic campaign cohort and a control cohort with a lower response rate.
pub fn campaign_and_control(rows: usize, seed: u64) -> Result<(Dataset, Dataset)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let campaign = cohort(&mut rng, rows, 0, 0.16)?;
    let control = cohort(&mut rng, rows, rows as i64, 0.06)?;
    Ok((campaign, control))
}

fn cohort(rng: &mut SmallRng, rows: usize, first_id: i64, base_rate: f64) -> Result<Dataset> {
    let age_dist = Normal::<f64>::new(41.0, 11.0)?;
    let balance_dist = LogNormal::<f64>::new(7.0, 1.2)?;
    let duration_dist = LogNormal::<f64>::new(5.3, 0.8)?;

    let mut ids = Vec::with_capacity(rows);
    let mut ages = Vec::with_capacity(rows);
    let mut jobs = Vec::with_capacity(rows);
    let mut marital = Vec::with_capacity(rows);
    let mut education = Vec::with_capacity(rows);
    let mut contact = Vec::with_capacity(rows);
    let mut balances = Vec::with_capacity(rows);
    let mut durations = Vec::with_capacity(rows);
    let mut campaign_contacts = Vec::with_capacity(rows);
    let mut outcome = Vec::with_capacity(rows);

    for i in 0..rows {
        let age = age_dist.sample(rng).clamp(18.0, 95.0).round();
        let job = if age >= 62.0 { "retired" } else { pick(rng, &JOBS)? };
        let duration = duration_dist.sample(rng).round();

        let mut p_yes = base_rate;
        if matches!(job, "student" | "retired") {
            p_yes += 0.15;
        }
        if duration > 400.0 {
            p_yes += 0.2;
        }

        ids.push(first_id + i as i64);
        ages.push(age as i64);
        jobs.push(job);
        marital.push(pick(rng, &MARITAL)?);
        education.push(pick(rng, &EDUCATION)?);
        contact.push(pick(rng, &CONTACT)?);
        balances.push((balance_dist.sample(rng) - 400.0).round());
        durations.push(duration);
        campaign_contacts.push(rng.random_range(1..=10i64));
        outcome.push(if rng.random::<f64>() < p_yes { "yes" } else { "no" });
    }

    log::debug!("generated cohort of {rows} rows starting at id {first_id}");

    let dataset = Dataset::try_from_columns(vec![
        ("client_id", Arc::new(Int64Array::from(ids)) as ArrayRef),
        ("age", Arc::new(Int64Array::from(ages)) as ArrayRef),
        ("job", Arc::new(StringArray::from(jobs)) as ArrayRef),
        ("marital", Arc::new(StringArray::from(marital)) as ArrayRef),
        ("education", Arc::new(StringArray::from(education)) as ArrayRef),
        ("contact", Arc::new(StringArray::from(contact)) as ArrayRef),
        ("balance", Arc::new(Float64Array::from(balances)) as ArrayRef),
        ("duration", Arc::new(Float64Array::from(durations)) as ArrayRef),
        ("campaign", Arc::new(Int64Array::from(campaign_contacts)) as ArrayRef),
        ("y", Arc::new(StringArray::from(outcome)) as ArrayRef),
    ])?;
    Ok(dataset)
}
