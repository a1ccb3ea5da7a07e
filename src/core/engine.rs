use super::types::{AdjustmentRule, IndexTable, RateError, Scenario, Tier, Trajectory, Year};

/// Compounds `start_value` across `years`. The first year is the base year:
/// its rate is reported but never applied, so `values[0]` is always
/// `start_value` exactly. For later years every enabled rule matching that
/// year is evaluated against the running value before the raise, and its
/// delta added to the base rate. Negative effective rates are not clamped.
pub fn compute_trajectory<F>(
    start_value: f64,
    years: &[Year],
    base_rate: F,
    rules: &[AdjustmentRule],
) -> Result<Trajectory, RateError>
where
    F: Fn(Year) -> Result<f64, RateError>,
{
    let mut values = Vec::with_capacity(years.len());
    let mut effective_rates = Vec::with_capacity(years.len());
    let mut current = start_value;

    for (i, &year) in years.iter().enumerate() {
        if i == 0 {
            values.push(current);
            effective_rates.push(base_rate(year)?);
            continue;
        }

        let mut rate = base_rate(year)?;
        for rule in rules {
            if rule.enabled && rule.year == year {
                rate += rule.kind.delta_for(current);
            }
        }

        current *= 1.0 + rate / 100.0;
        values.push(current);
        effective_rates.push(rate);
    }

    Ok(Trajectory {
        years: years.to_vec(),
        values,
        effective_rates,
    })
}

pub fn salary_trajectory(
    start_salary: f64,
    scenario: &Scenario,
    tier: Tier,
    rules: &[AdjustmentRule],
) -> Result<Trajectory, RateError> {
    let years = scenario.scale.years();
    compute_trajectory(
        start_salary,
        &years,
        |year| scenario.scale.rate(year, tier),
        rules,
    )
}

/// Pure index compounding: no adjustment rules ever apply, and the base
/// year reports the table's published rate rather than zero.
pub fn index_trajectory(
    start_value: f64,
    years: &[Year],
    index: &IndexTable,
) -> Result<Trajectory, RateError> {
    compute_trajectory(start_value, years, |year| index.rate(year), &[])
}

/// Per-year real-terms percentage change of `nominal` against `deflator`.
/// Both trajectories must share their base value. Computed as the nominal
/// over deflator ratio so a trajectory deflated by itself is 0 in every
/// year, not just within tolerance.
pub fn real_terms_change(nominal: &Trajectory, deflator: &Trajectory) -> Vec<f64> {
    let Some(&start) = nominal.values.first() else {
        return Vec::new();
    };

    nominal
        .values
        .iter()
        .zip(&deflator.values)
        .map(|(&value, &reference)| {
            let deflated = value / reference * start;
            (deflated - start) / start * 100.0
        })
        .collect()
}

/// Signed difference between two trajectories' final values.
pub fn final_gap(a: &Trajectory, b: &Trajectory) -> f64 {
    a.final_value() - b.final_value()
}
