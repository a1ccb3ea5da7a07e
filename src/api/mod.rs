use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AdjustmentRule, CPI, DEAL_2017, DEAL_2020, DEAL_2020_FLAT, IndexTable, RPI, RateError,
    Scenario, Tier, Trajectory, Year, final_gap, index_trajectory, real_terms_change,
    salary_trajectory,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliScenario {
    Deal2017,
    Deal2020,
    Deal2020Flat,
}

impl CliScenario {
    fn scenario(self) -> &'static Scenario {
        match self {
            CliScenario::Deal2017 => &DEAL_2017,
            CliScenario::Deal2020 => &DEAL_2020,
            CliScenario::Deal2020Flat => &DEAL_2020_FLAT,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliIndex {
    Cpi,
    Rpi,
}

impl CliIndex {
    fn table(self) -> &'static IndexTable {
        match self {
            CliIndex::Cpi => &CPI,
            CliIndex::Rpi => &RPI,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
enum ApiScenario {
    #[serde(rename = "deal-2017", alias = "deal2017", alias = "deal_2017")]
    Deal2017,
    #[serde(rename = "deal-2020", alias = "deal2020", alias = "deal_2020")]
    Deal2020,
    #[serde(
        rename = "deal-2020-flat",
        alias = "deal2020Flat",
        alias = "deal_2020_flat"
    )]
    Deal2020Flat,
}

impl From<ApiScenario> for CliScenario {
    fn from(value: ApiScenario) -> Self {
        match value {
            ApiScenario::Deal2017 => CliScenario::Deal2017,
            ApiScenario::Deal2020 => CliScenario::Deal2020,
            ApiScenario::Deal2020Flat => CliScenario::Deal2020Flat,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiIndex {
    Cpi,
    Rpi,
}

impl From<ApiIndex> for CliIndex {
    fn from(value: ApiIndex) -> Self {
        match value {
            ApiIndex::Cpi => CliIndex::Cpi,
            ApiIndex::Rpi => CliIndex::Rpi,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
enum SeriesKind {
    Salary,
    Index,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    start_salary: Option<f64>,
    scenario: Option<ApiScenario>,
    reference_index: Option<ApiIndex>,

    show_top: Option<bool>,
    show_mid: Option<bool>,
    show_standard: Option<bool>,

    plus_award_2023: Option<bool>,
    supplement_2022: Option<bool>,
    award_2023: Option<bool>,
}

#[derive(Parser, Debug)]
#[command(
    name = "realpay",
    about = "Real-terms salary vs inflation comparison (compiled-in pay deals and index tables)"
)]
struct Cli {
    #[arg(long, default_value_t = 40_000.0, help = "Salary in the base year of the selected deal")]
    start_salary: f64,
    #[arg(long, value_enum, default_value_t = CliScenario::Deal2017)]
    scenario: CliScenario,
    #[arg(
        long,
        value_enum,
        default_value_t = CliIndex::Cpi,
        help = "Reference index used for real-terms figures"
    )]
    reference_index: CliIndex,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    show_top: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    show_mid: bool,
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    show_standard: bool,
    #[arg(
        long,
        action = ArgAction::Set,
        help = "Override the 2023 plus award toggle (deal-2017)"
    )]
    plus_award_2023: Option<bool>,
    #[arg(
        long,
        action = ArgAction::Set,
        help = "Override the 2022 cost-of-living supplement toggle (2020 deals)"
    )]
    supplement_2022: Option<bool>,
    #[arg(
        long,
        action = ArgAction::Set,
        help = "Override the 2023 award toggle (2020 deals)"
    )]
    award_2023: Option<bool>,
}

#[derive(Debug)]
struct CompareRequest {
    start_salary: f64,
    scenario: &'static Scenario,
    reference: &'static IndexTable,
    tiers: Vec<Tier>,
    rules: Vec<AdjustmentRule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesResponse {
    id: String,
    label: String,
    kind: SeriesKind,
    values: Vec<f64>,
    effective_rates: Vec<f64>,
    final_value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErosionSeriesResponse {
    tier: String,
    percent_change: Vec<f64>,
    final_percent_change: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    scenario: String,
    scenario_label: String,
    reference_index: String,
    headline_tier: String,
    years: Vec<Year>,
    series: Vec<SeriesResponse>,
    erosion: Vec<ErosionSeriesResponse>,
    required_to_stand_still: f64,
    real_terms_gap: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn tier_id(tier: Tier) -> &'static str {
    match tier {
        Tier::Top => "top",
        Tier::Mid => "mid",
        Tier::Standard => "standard",
    }
}

fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Top => "Top tier",
        Tier::Mid => "Mid tier",
        Tier::Standard => "Standard tier",
    }
}

fn build_request(cli: Cli) -> Result<CompareRequest, String> {
    if !cli.start_salary.is_finite() || cli.start_salary <= 0.0 {
        return Err("--start-salary must be a positive number".to_string());
    }

    let mut tiers = Vec::new();
    for (selected, tier) in [
        (cli.show_top, Tier::Top),
        (cli.show_mid, Tier::Mid),
        (cli.show_standard, Tier::Standard),
    ] {
        if selected {
            tiers.push(tier);
        }
    }
    if tiers.is_empty() {
        return Err(
            "at least one of --show-top, --show-mid, --show-standard must be set".to_string(),
        );
    }

    let scenario = cli.scenario.scenario();
    let mut rules = scenario.rules.to_vec();
    let overrides = [
        ("plus-2023", cli.plus_award_2023),
        ("col-2022", cli.supplement_2022),
        ("award-2023", cli.award_2023),
    ];
    for rule in &mut rules {
        for (id, setting) in overrides {
            if rule.id == id {
                if let Some(enabled) = setting {
                    rule.enabled = enabled;
                }
            }
        }
    }

    Ok(CompareRequest {
        start_salary: cli.start_salary,
        scenario,
        reference: cli.reference_index.table(),
        tiers,
        rules,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("real-terms pay API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn compare_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    compare_handler_impl(payload).await
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    compare_handler_impl(payload).await
}

async fn compare_handler_impl(payload: ComparePayload) -> Response {
    let request = match compare_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match build_compare_response(&request) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => {
            log::error!("rate table lookup failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn build_compare_response(request: &CompareRequest) -> Result<CompareResponse, RateError> {
    let years = request.scenario.scale.years();
    let reference = index_trajectory(request.start_salary, &years, request.reference)?;

    let mut salaries: Vec<(Tier, Trajectory)> = Vec::with_capacity(request.tiers.len());
    for &tier in &request.tiers {
        let trajectory =
            salary_trajectory(request.start_salary, request.scenario, tier, &request.rules)?;
        salaries.push((tier, trajectory));
    }

    // Tiers are ordered top-first; the headline figures quote the best
    // selected tier against the reference index.
    let (headline_tier, headline) = &salaries[0];
    let real_terms_gap = final_gap(headline, &reference);
    let required_to_stand_still = reference.final_value();

    let mut series = Vec::with_capacity(salaries.len() + 1);
    let mut erosion = Vec::with_capacity(salaries.len());
    for (tier, trajectory) in &salaries {
        let percent_change = real_terms_change(trajectory, &reference);
        erosion.push(ErosionSeriesResponse {
            tier: tier_id(*tier).to_string(),
            final_percent_change: percent_change.last().copied().unwrap_or(0.0),
            percent_change,
        });
    }

    let headline_tier = tier_id(*headline_tier).to_string();
    for (tier, trajectory) in salaries {
        series.push(SeriesResponse {
            id: tier_id(tier).to_string(),
            label: tier_label(tier).to_string(),
            kind: SeriesKind::Salary,
            final_value: trajectory.final_value(),
            values: trajectory.values,
            effective_rates: trajectory.effective_rates,
        });
    }
    series.push(SeriesResponse {
        id: request.reference.name.to_string(),
        label: format!("Required to stand still ({})", request.reference.label),
        kind: SeriesKind::Index,
        final_value: reference.final_value(),
        values: reference.values,
        effective_rates: reference.effective_rates,
    });

    Ok(CompareResponse {
        scenario: request.scenario.id.to_string(),
        scenario_label: request.scenario.label.to_string(),
        reference_index: request.reference.name.to_string(),
        headline_tier,
        years,
        series,
        erosion,
        required_to_stand_still,
        real_terms_gap,
    })
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn compare_request_from_json(json: &str) -> Result<CompareRequest, String> {
    let payload = serde_json::from_str::<ComparePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    compare_request_from_payload(payload)
}

fn compare_request_from_payload(payload: ComparePayload) -> Result<CompareRequest, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.start_salary {
        cli.start_salary = v;
    }
    if let Some(v) = payload.scenario {
        cli.scenario = v.into();
    }
    if let Some(v) = payload.reference_index {
        cli.reference_index = v.into();
    }

    if let Some(v) = payload.show_top {
        cli.show_top = v;
    }
    if let Some(v) = payload.show_mid {
        cli.show_mid = v;
    }
    if let Some(v) = payload.show_standard {
        cli.show_standard = v;
    }

    if let Some(v) = payload.plus_award_2023 {
        cli.plus_award_2023 = Some(v);
    }
    if let Some(v) = payload.supplement_2022 {
        cli.supplement_2022 = Some(v);
    }
    if let Some(v) = payload.award_2023 {
        cli.award_2023 = Some(v);
    }

    build_request(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        start_salary: 40_000.0,
        scenario: CliScenario::Deal2017,
        reference_index: CliIndex::Cpi,
        show_top: true,
        show_mid: true,
        show_standard: false,
        plus_award_2023: None,
        supplement_2022: None,
        award_2023: None,
    }
}
