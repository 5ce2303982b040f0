// ============================================================
// Layer 3 — Prediction Request / Response
// ============================================================
// PredictionForm     raw strings exactly as the browser posts them
// PredictionRequest  typed input for the inference service
// PredictionResponse decoded label, or "no prediction yet"
//
// Converting a form into a request is the only place where type
// coercion happens. A missing field or a non-numeric age becomes
// a FeatureMismatch error instead of a crash.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, PredictorResult};

/// Fields of the HTML form. All optional so that a partial post
/// still deserializes and gets a proper error message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionForm {
    pub club:          Option<String>,
    pub national_team: Option<String>,
    pub age:           Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub club:          String,
    pub national_team: String,
    pub age:           i64,
}

impl PredictionRequest {
    pub fn new(club: impl Into<String>, national_team: impl Into<String>, age: i64) -> Self {
        Self {
            club:          club.into(),
            national_team: national_team.into(),
            age,
        }
    }
}

impl TryFrom<PredictionForm> for PredictionRequest {
    type Error = PredictorError;

    fn try_from(form: PredictionForm) -> PredictorResult<Self> {
        let club          = required(form.club, "club")?;
        let national_team = required(form.national_team, "national_team")?;
        let raw_age       = required(form.age, "age")?;

        let age = raw_age.trim().parse::<i64>().map_err(|_| {
            PredictorError::FeatureMismatch(format!("age must be an integer, got '{raw_age}'"))
        })?;

        Ok(Self { club, national_team, age })
    }
}

fn required(value: Option<String>, field: &str) -> PredictorResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PredictorError::FeatureMismatch(format!("missing field '{field}'"))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PredictionResponse {
    /// The page was rendered without a submitted form.
    #[default]
    Pending,
    /// Decoded favorite player.
    Label(String),
}

impl PredictionResponse {
    pub fn label(&self) -> Option<&str> {
        match self {
            PredictionResponse::Pending  => None,
            PredictionResponse::Label(l) => Some(l),
        }
    }
}
