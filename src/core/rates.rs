use super::types::{
    AdjustmentKind, AdjustmentRule, Band, IndexTable, PayScale, Scenario, TierRates,
};

const fn tiers(top: f64, mid: f64, standard: f64) -> TierRates {
    TierRates { top, mid, standard }
}

/// 2017 pay deal. Base rates are the published awards per performance tier;
/// the 2023 "plus" element is kept out of the table and modeled as a
/// toggleable rule, since the deal text left it ambiguous whether it
/// stacked on the headline award.
pub static DEAL_2017: Scenario = Scenario {
    id: "deal-2017",
    label: "2017 pay deal (2017-2025)",
    scale: PayScale {
        name: "deal-2017",
        rows: &[
            (2017, TierRates::ZERO),
            (2018, tiers(2.25, 2.25, 2.25)),
            (2019, tiers(2.25, 2.25, 2.25)),
            (2020, tiers(2.15, 2.15, 2.15)),
            (2021, tiers(2.75, 2.30, 1.85)),
            (2022, tiers(3.75, 3.30, 2.85)),
            (2023, tiers(2.70, 2.30, 1.90)),
            (2024, tiers(2.70, 2.30, 1.90)),
            (2025, tiers(2.70, 2.30, 1.90)),
        ],
    },
    rules: &[AdjustmentRule {
        year: 2023,
        id: "plus-2023",
        label: "2023 plus award treated as additive",
        kind: AdjustmentKind::Flat(2.5),
        enabled: true,
    }],
};

const DEAL_2020_SCALE: PayScale = PayScale {
    name: "deal-2020",
    rows: &[
        (2020, TierRates::ZERO),
        (2021, tiers(2.75, 2.30, 1.85)),
        (2022, tiers(3.00, 2.50, 2.00)),
        (2023, tiers(2.70, 2.30, 1.90)),
        (2024, tiers(2.70, 2.30, 1.90)),
        (2025, tiers(2.70, 2.30, 1.90)),
    ],
};

const SUPPLEMENT_2022: AdjustmentRule = AdjustmentRule {
    year: 2022,
    id: "col-2022",
    label: "2022 cost-of-living supplement",
    kind: AdjustmentKind::Banded(&[
        Band {
            ceiling: 30_000.0,
            delta: 2.0,
        },
        Band {
            ceiling: 50_000.0,
            delta: 1.0,
        },
    ]),
    enabled: true,
};

/// 2020 settlement with salary-banded awards. Earners already above the top
/// band at the time of the raise get the base award only.
pub static DEAL_2020: Scenario = Scenario {
    id: "deal-2020",
    label: "2020 settlement, banded awards (2020-2025)",
    scale: DEAL_2020_SCALE,
    rules: &[
        SUPPLEMENT_2022,
        AdjustmentRule {
            year: 2023,
            id: "award-2023",
            label: "2023 banded award",
            kind: AdjustmentKind::Banded(&[
                Band {
                    ceiling: 30_000.0,
                    delta: 2.5,
                },
                Band {
                    ceiling: 50_000.0,
                    delta: 2.0,
                },
            ]),
            enabled: true,
        },
    ],
};

/// Same settlement as [`DEAL_2020`] but with the 2023 award read as a flat
/// uplift. The two readings circulated side by side and do not reconcile,
/// so both are kept.
pub static DEAL_2020_FLAT: Scenario = Scenario {
    id: "deal-2020-flat",
    label: "2020 settlement, flat 2023 award (2020-2025)",
    scale: DEAL_2020_SCALE,
    rules: &[
        SUPPLEMENT_2022,
        AdjustmentRule {
            year: 2023,
            id: "award-2023",
            label: "2023 flat award",
            kind: AdjustmentKind::Flat(2.0),
            enabled: true,
        },
    ],
};

/// Published CPI annual rates. The base year is 0 relative to the start of
/// the observed window.
pub static CPI: IndexTable = IndexTable {
    name: "cpi",
    label: "CPI",
    rows: &[
        (2017, 0.0),
        (2018, 2.6),
        (2019, 2.3),
        (2020, 1.7),
        (2021, 1.0),
        (2022, 2.5),
        (2023, 8.8),
        (2024, 4.2),
        (2025, 3.9),
    ],
};

/// Published RPI annual rates over the same window.
pub static RPI: IndexTable = IndexTable {
    name: "rpi",
    label: "RPI",
    rows: &[
        (2017, 0.0),
        (2018, 3.3),
        (2019, 2.6),
        (2020, 1.5),
        (2021, 1.5),
        (2022, 3.4),
        (2023, 11.3),
        (2024, 4.9),
        (2025, 4.4),
    ],
};

pub static SCENARIOS: &[&Scenario] = &[&DEAL_2017, &DEAL_2020, &DEAL_2020_FLAT];

pub static INDEXES: &[&IndexTable] = &[&CPI, &RPI];

pub fn scenario_by_id(id: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().copied().find(|scenario| scenario.id == id)
}

pub fn index_by_name(name: &str) -> Option<&'static IndexTable> {
    INDEXES.iter().copied().find(|index| index.name == name)
}
