use thiserror::Error;

/// Failures surfaced to the shell around the engine. The engine functions
/// themselves are total; this exists so callers holding no profile yet have
/// a typed refusal instead of invoking the engine with absent data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no financial profile configured; complete setup first")]
    MissingProfile,
}
