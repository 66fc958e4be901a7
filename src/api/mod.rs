use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::{Json, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::core::{
    Error, FinancialProfile, GenericDelta, LifeEvent, ScenarioRequest, evaluate_baseline,
    simulate_scenario,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// One profile snapshot per process: the single-session semantics of the
/// reference, held explicitly instead of as a hidden global. A multi-session
/// deployment would scope this per session instead.
#[derive(Debug, Default)]
struct AppState {
    profile: RwLock<Option<FinancialProfile>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfilePayload {
    income: i64,
    expenses: i64,
    assets: i64,
    liabilities: i64,
    goal: i64,
}

impl From<ProfilePayload> for FinancialProfile {
    fn from(payload: ProfilePayload) -> Self {
        FinancialProfile {
            income: payload.income,
            expenses: payload.expenses,
            assets: payload.assets,
            liabilities: payload.liabilities,
            goal: payload.goal,
        }
    }
}

/// Simulation request body. A present `lifeEvent` wins; otherwise the four
/// delta fields form a generic what-if, each defaulting to zero when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    life_event: Option<LifeEventPayload>,
    investment_increase: Option<i64>,
    expense_increase: Option<i64>,
    income_change: Option<i64>,
    new_loan: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum LifeEventPayload {
    #[serde(alias = "housePurchase", alias = "house-purchase")]
    House {
        #[serde(default, rename = "assetType")]
        asset_type: String,
        #[serde(default, rename = "assetPrice")]
        asset_price: i64,
        #[serde(default, rename = "downPayment")]
        down_payment: i64,
        #[serde(default)]
        emi: i64,
    },
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn scenario_from_payload(payload: SimulatePayload) -> ScenarioRequest {
    match payload.life_event {
        Some(LifeEventPayload::House {
            asset_type,
            asset_price,
            down_payment,
            emi,
        }) => ScenarioRequest::LifeEvent(LifeEvent::HousePurchase {
            asset_type,
            asset_price,
            down_payment,
            emi,
        }),
        None => ScenarioRequest::GenericDelta(GenericDelta {
            investment_increase: payload.investment_increase.unwrap_or(0),
            expense_increase: payload.expense_increase.unwrap_or(0),
            income_change: payload.income_change.unwrap_or(0),
            new_loan: payload.new_loan.unwrap_or(0),
        }),
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let state = Arc::new(AppState::default());
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/profile", post(profile_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/simulate", post(simulate_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("fintwin HTTP API listening on http://{addr}");

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

/// Stores the session snapshot and answers with its baseline evaluation,
/// mirroring the setup-then-dashboard flow of the reference.
async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfilePayload>,
) -> Response {
    let profile = FinancialProfile::from(payload);
    *state.profile.write().expect("profile lock poisoned") = Some(profile);
    tracing::info!(
        income = profile.income,
        expenses = profile.expenses,
        "profile snapshot replaced"
    );
    json_response(StatusCode::OK, evaluate_baseline(&profile))
}

async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Response {
    match current_profile(&state) {
        Ok(profile) => json_response(StatusCode::OK, evaluate_baseline(&profile)),
        Err(e) => error_response(StatusCode::CONFLICT, &e.to_string()),
    }
}

async fn simulate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SimulatePayload>,
) -> Response {
    let profile = match current_profile(&state) {
        Ok(profile) => profile,
        Err(e) => return error_response(StatusCode::CONFLICT, &e.to_string()),
    };
    let request = scenario_from_payload(payload);
    tracing::debug!(?request, "running scenario");
    json_response(StatusCode::OK, simulate_scenario(&profile, &request))
}

fn current_profile(state: &AppState) -> Result<FinancialProfile, Error> {
    let guard = state.profile.read().expect("profile lock poisoned");
    guard.as_ref().copied().ok_or(Error::MissingProfile)
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
mod tests {
    use super::*;
    use crate::core::{SimulationResult, simulate_generic, simulate_house_purchase};

    fn scenario_from_json(json: &str) -> ScenarioRequest {
        let payload =
            serde_json::from_str::<SimulatePayload>(json).expect("payload should parse");
        scenario_from_payload(payload)
    }

    fn sample_profile() -> FinancialProfile {
        FinancialProfile {
            income: 5_000,
            expenses: 3_000,
            assets: 10_000,
            liabilities: 2_000,
            goal: 20_000,
        }
    }

    #[test]
    fn empty_payload_is_a_zero_delta_generic_scenario() {
        let request = scenario_from_json("{}");
        assert_eq!(
            request,
            ScenarioRequest::GenericDelta(GenericDelta::default())
        );
    }

    #[test]
    fn generic_payload_fills_missing_fields_with_zero() {
        let request = scenario_from_json(r#"{"incomeChange": 1000, "newLoan": 5000}"#);
        assert_eq!(
            request,
            ScenarioRequest::GenericDelta(GenericDelta {
                investment_increase: 0,
                expense_increase: 0,
                income_change: 1_000,
                new_loan: 5_000,
            })
        );
    }

    #[test]
    fn life_event_payload_parses_house_purchase() {
        let request = scenario_from_json(
            r#"{
              "lifeEvent": {
                "kind": "house",
                "assetType": "apartment",
                "assetPrice": 300000,
                "downPayment": 60000,
                "emi": 1500
              }
            }"#,
        );
        assert_eq!(
            request,
            ScenarioRequest::LifeEvent(LifeEvent::HousePurchase {
                asset_type: "apartment".to_string(),
                asset_price: 300_000,
                down_payment: 60_000,
                emi: 1_500,
            })
        );
    }

    #[test]
    fn life_event_wins_over_generic_fields() {
        let request = scenario_from_json(
            r#"{"lifeEvent": {"kind": "house"}, "incomeChange": 1000}"#,
        );
        assert!(matches!(request, ScenarioRequest::LifeEvent(_)));
    }

    #[test]
    fn profile_payload_parses_camel_case_keys() {
        let payload = serde_json::from_str::<ProfilePayload>(
            r#"{"income": 5000, "expenses": 3000, "assets": 10000, "liabilities": 2000, "goal": 20000}"#,
        )
        .expect("payload should parse");
        assert_eq!(FinancialProfile::from(payload), sample_profile());
    }

    #[test]
    fn baseline_report_serializes_expected_fields() {
        let report = evaluate_baseline(&sample_profile());
        let json = serde_json::to_string(&report).expect("report should serialize");
        assert!(json.contains("\"monthlySurplus\":2000"));
        assert!(json.contains("\"netWorth\":8000"));
        assert!(json.contains("\"goalScore\":30"));
        assert!(json.contains("\"healthScore\":79"));
        assert!(json.contains("\"projection5y\":128000"));
    }

    #[test]
    fn house_result_serializes_affordability_labels_and_kind() {
        let profile = sample_profile();
        let request = scenario_from_json(
            r#"{"lifeEvent": {"kind": "house", "assetPrice": 300000, "downPayment": 60000, "emi": 900}}"#,
        );
        let result = simulate_scenario(&profile, &request);
        let json = serde_json::to_string(&result).expect("result should serialize");
        assert!(json.contains("\"kind\":\"house\""));
        assert!(json.contains("\"affordability\":\"Comfortable\""));
        assert!(json.contains("\"yearsToSave\":2.5"));
        assert!(json.contains("\"simNetWorth\":-292000"));
    }

    #[test]
    fn infeasible_years_to_save_serializes_as_sentinel_string() {
        let profile = FinancialProfile {
            income: 2_000,
            expenses: 3_000,
            assets: 0,
            liabilities: 0,
            goal: 0,
        };
        let result = simulate_house_purchase(&profile, "house", 100_000, 20_000, 500);
        let json = serde_json::to_string(&result).expect("result should serialize");
        assert!(json.contains("\"yearsToSave\":\"Not feasible\""));
        assert!(json.contains("\"affordability\":\"Not Affordable\""));
    }

    #[test]
    fn generic_result_serializes_insights_in_order() {
        let delta = GenericDelta {
            expense_increase: 500,
            new_loan: 10_000,
            ..GenericDelta::default()
        };
        let result = SimulationResult::Generic(simulate_generic(&sample_profile(), &delta));
        let json = serde_json::to_string(&result).expect("result should serialize");
        assert!(json.contains("\"kind\":\"generic\""));
        assert!(json.contains("\"baseSurplus\":2000"));
        assert!(json.contains("\"simSurplus\":1500"));
        let surplus_pos = json.find("surplus reduced").expect("surplus insight present");
        let net_worth_pos = json.find("net worth declined").expect("net worth insight present");
        assert!(surplus_pos < net_worth_pos);
    }
}
