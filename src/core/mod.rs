mod engine;
mod error;
mod types;

pub use engine::{
    evaluate_baseline, goal_score, simulate_generic, simulate_house_purchase, simulate_scenario,
};
pub use error::Error;
pub use types::{
    Affordability, BaselineReport, FinancialProfile, GenericDelta, GenericSimResult,
    HouseEventResult, LifeEvent, ScenarioRequest, SimulationResult, YearsToSave,
};
