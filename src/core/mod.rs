mod engine;
mod rates;
mod types;

pub use engine::{
    compute_trajectory, final_gap, index_trajectory, real_terms_change, salary_trajectory,
};
pub use rates::{
    CPI, DEAL_2017, DEAL_2020, DEAL_2020_FLAT, INDEXES, RPI, SCENARIOS, index_by_name,
    scenario_by_id,
};
pub use types::{
    AdjustmentKind, AdjustmentRule, Band, IndexTable, PayScale, RateError, Scenario, Tier,
    TierRates, Trajectory, Year,
};
