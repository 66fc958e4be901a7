use serde::{Serialize, Serializer};

/// The baseline snapshot a session operates on. Captured once per session
/// and passed by reference into every evaluation and simulation call; the
/// engine never stores it. Zero and negative values are accepted as-is,
/// keeping ranges sane is the caller's job.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FinancialProfile {
    pub income: i64,
    pub expenses: i64,
    pub assets: i64,
    pub liabilities: i64,
    pub goal: i64,
}

/// A hypothetical to run against the baseline. Exactly one variant per
/// simulation call; extending the set of life events means adding a
/// `LifeEvent` variant and handling it in `simulate_scenario`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScenarioRequest {
    LifeEvent(LifeEvent),
    GenericDelta(GenericDelta),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LifeEvent {
    HousePurchase {
        asset_type: String,
        asset_price: i64,
        down_payment: i64,
        emi: i64,
    },
}

/// Parameter deltas for the generic what-if. Absent fields default to zero
/// at the API boundary, so the engine always sees all four.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct GenericDelta {
    pub investment_increase: i64,
    pub expense_increase: i64,
    pub income_change: i64,
    pub new_loan: i64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineReport {
    pub monthly_surplus: i64,
    pub net_worth: i64,
    pub goal_score: u32,
    pub health_score: u32,
    pub projection_5y: i64,
    pub projection_10y: i64,
    pub projection_20y: i64,
}

/// How an EMI sits against the monthly surplus.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Affordability {
    Comfortable,
    #[serde(rename = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "Not Affordable")]
    NotAffordable,
}

/// Years needed to save a down payment, or the sentinel used when the
/// surplus is non-positive. Serializes as a number or the string
/// "Not feasible" so the display layer can show either directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum YearsToSave {
    Years(f64),
    NotFeasible,
}

impl Serialize for YearsToSave {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearsToSave::Years(years) => serializer.serialize_f64(*years),
            YearsToSave::NotFeasible => serializer.serialize_str("Not feasible"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseEventResult {
    pub asset_type: String,
    pub asset_price: i64,
    pub down_payment: i64,
    pub emi: i64,
    pub affordability: Affordability,
    pub years_to_save: YearsToSave,
    pub sim_net_worth: i64,
    pub sim_goal_score: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericSimResult {
    pub base_surplus: i64,
    pub base_net_worth: i64,
    pub base_goal_score: u32,
    pub sim_surplus: i64,
    pub sim_net_worth: i64,
    pub sim_goal_score: u32,
    pub insights: Vec<String>,
}

/// Mirrors the `ScenarioRequest` variant that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SimulationResult {
    House(HouseEventResult),
    Generic(GenericSimResult),
}
