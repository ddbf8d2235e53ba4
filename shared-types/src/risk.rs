use serde::{Deserialize, Serialize};

/// Device risk level as reported by the device-telemetry collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceRiskLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl DeviceRiskLevel {
    /// Fixed numeric scale used by the composite score
    pub fn score(&self) -> f64 {
        match self {
            DeviceRiskLevel::VeryHigh => 1000.0,
            DeviceRiskLevel::High => 750.0,
            DeviceRiskLevel::Medium => 500.0,
            DeviceRiskLevel::Low => 300.0,
        }
    }
}

/// Component signals feeding the composite risk score. The alternate-data
/// fields come from the external risk/identity providers; the device fields
/// from decrypted device telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskInputs {
    /// Score returned by the external risk model
    pub risk_score: f64,
    pub device_risk_level: DeviceRiskLevel,
    /// Name the user claims
    pub claimed_name: String,
    /// Name according to alternate data
    pub alternate_name: String,
    /// Carrier reported by the device
    pub device_carrier: String,
    /// Carrier according to alternate data
    pub alternate_carrier: String,
    /// Apps installed on the device
    pub device_apps: Vec<String>,
    /// Apps linked to the user's accounts
    pub account_apps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskComponentScores {
    pub risk_score: f64,
    pub device_risk_score: f64,
    pub input_validation_score: f64,
    pub network_validation_score: f64,
    pub app_profile_score: f64,
}

/// Final score plus the per-component breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub final_score: f64,
    pub component_scores: RiskComponentScores,
}
