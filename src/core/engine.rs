use super::types::{
    Affordability, BaselineReport, FinancialProfile, GenericDelta, GenericSimResult,
    HouseEventResult, LifeEvent, ScenarioRequest, SimulationResult, YearsToSave,
};

const SURPLUS_UP: &str = "Your monthly surplus increased, improving savings capacity.";
const SURPLUS_DOWN: &str = "Your monthly surplus reduced, increasing financial stress.";
const NET_WORTH_UP: &str = "Your net worth improved under this scenario.";
const NET_WORTH_DOWN: &str = "Your net worth declined due to higher costs or liabilities.";
const GOAL_UP: &str = "This scenario improves your goal feasibility.";
const GOAL_DOWN: &str = "This scenario makes your financial goal harder to achieve.";

/// Coarse goal-readiness tier. Shared by the baseline evaluation and every
/// simulation so both sides score identically. The half-goal comparison is
/// done in floating point on purpose: for a negative goal, `goal * 0.5` sits
/// above `goal`, so the 60 tier is reachable with net worth below the goal.
pub fn goal_score(net_worth: i64, goal: i64) -> u32 {
    if net_worth >= goal {
        90
    } else if net_worth as f64 >= goal as f64 * 0.5 {
        60
    } else {
        30
    }
}

/// Derives the dashboard metrics from a profile: surplus, net worth, goal
/// and health scores, and linear (non-compounding) net-worth projections.
pub fn evaluate_baseline(profile: &FinancialProfile) -> BaselineReport {
    let monthly_surplus = profile.income - profile.expenses;
    let net_worth = profile.assets - profile.liabilities;

    let goal = goal_score(net_worth, profile.goal);

    // Income of zero is a valid snapshot, not an error.
    let savings_rate = if profile.income > 0 {
        monthly_surplus as f64 / profile.income as f64
    } else {
        0.0
    };

    let savings_score: u32 = if savings_rate >= 0.30 {
        40
    } else if savings_rate >= 0.15 {
        25
    } else {
        10
    };

    // Strictly positive; a net worth of exactly zero lands in the low tier.
    let net_worth_score: u32 = if net_worth > 0 { 30 } else { 10 };

    let health_score =
        (savings_score as f64 + net_worth_score as f64 + goal as f64 * 0.3) as u32;

    BaselineReport {
        monthly_surplus,
        net_worth,
        goal_score: goal,
        health_score,
        projection_5y: net_worth + monthly_surplus * 12 * 5,
        projection_10y: net_worth + monthly_surplus * 12 * 10,
        projection_20y: net_worth + monthly_surplus * 12 * 20,
    }
}

/// Runs one scenario against the baseline profile.
pub fn simulate_scenario(
    profile: &FinancialProfile,
    request: &ScenarioRequest,
) -> SimulationResult {
    match request {
        ScenarioRequest::LifeEvent(LifeEvent::HousePurchase {
            asset_type,
            asset_price,
            down_payment,
            emi,
        }) => SimulationResult::House(simulate_house_purchase(
            profile,
            asset_type,
            *asset_price,
            *down_payment,
            *emi,
        )),
        ScenarioRequest::GenericDelta(delta) => {
            SimulationResult::Generic(simulate_generic(profile, delta))
        }
    }
}

/// House-purchase life event: EMI affordability against the current surplus,
/// years to save the down payment, and the net-worth impact of swapping cash
/// for a mortgage. Input signs and magnitudes are propagated untouched.
pub fn simulate_house_purchase(
    profile: &FinancialProfile,
    asset_type: &str,
    asset_price: i64,
    down_payment: i64,
    emi: i64,
) -> HouseEventResult {
    // Base surplus is derived here rather than taken from a prior baseline
    // evaluation; simulations never depend on evaluator invocation order.
    let base_surplus = profile.income - profile.expenses;

    let affordability = if emi as f64 <= base_surplus as f64 * 0.5 {
        Affordability::Comfortable
    } else if emi <= base_surplus {
        Affordability::ModerateRisk
    } else {
        Affordability::NotAffordable
    };

    let years_to_save = if base_surplus > 0 {
        let years = down_payment as f64 / (base_surplus as f64 * 12.0);
        YearsToSave::Years((years * 10.0).round() / 10.0)
    } else {
        YearsToSave::NotFeasible
    };

    let sim_assets = profile.assets - down_payment;
    let sim_liabilities = profile.liabilities + (asset_price - down_payment);
    let sim_net_worth = sim_assets - sim_liabilities;

    HouseEventResult {
        asset_type: asset_type.to_string(),
        asset_price,
        down_payment,
        emi,
        affordability,
        years_to_save,
        sim_net_worth,
        sim_goal_score: goal_score(sim_net_worth, profile.goal),
    }
}

/// Generic what-if: applies the deltas, rescores, and compares against the
/// baseline. An investment increase counts as both an expense and an asset
/// gain; that double effect is the reference behavior and is kept verbatim.
pub fn simulate_generic(profile: &FinancialProfile, delta: &GenericDelta) -> GenericSimResult {
    let base_surplus = profile.income - profile.expenses;
    let base_net_worth = profile.assets - profile.liabilities;
    let base_goal_score = goal_score(base_net_worth, profile.goal);

    let sim_income = profile.income + delta.income_change;
    let sim_expenses = profile.expenses + delta.expense_increase + delta.investment_increase;
    let sim_assets = profile.assets + delta.investment_increase;
    let sim_liabilities = profile.liabilities + delta.new_loan;

    let sim_surplus = sim_income - sim_expenses;
    let sim_net_worth = sim_assets - sim_liabilities;
    let sim_goal_score = goal_score(sim_net_worth, profile.goal);

    // Fixed order: surplus, net worth, goal. Strict comparisons only, so an
    // unchanged metric contributes nothing.
    let mut insights = Vec::new();
    if sim_surplus > base_surplus {
        insights.push(SURPLUS_UP.to_string());
    } else if sim_surplus < base_surplus {
        insights.push(SURPLUS_DOWN.to_string());
    }
    if sim_net_worth > base_net_worth {
        insights.push(NET_WORTH_UP.to_string());
    } else if sim_net_worth < base_net_worth {
        insights.push(NET_WORTH_DOWN.to_string());
    }
    if sim_goal_score > base_goal_score {
        insights.push(GOAL_UP.to_string());
    } else if sim_goal_score < base_goal_score {
        insights.push(GOAL_DOWN.to_string());
    }

    GenericSimResult {
        base_surplus,
        base_net_worth,
        base_goal_score,
        sim_surplus,
        sim_net_worth,
        sim_goal_score,
        insights,
    }
}
