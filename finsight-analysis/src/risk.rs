use shared_types::{RiskBreakdown, RiskComponentScores, RiskInputs};

// Fixed business-calibrated weights; the composite formula is
// 0.5*risk + 0.2*device + 0.05*input + 0.10*network + 0.15*app
const RISK_WEIGHT: f64 = 0.5;
const DEVICE_WEIGHT: f64 = 0.2;
const INPUT_VALIDATION_WEIGHT: f64 = 0.05;
const NETWORK_VALIDATION_WEIGHT: f64 = 0.10;
const APP_PROFILE_WEIGHT: f64 = 0.15;

/// Penalty applied on a failed identity or network check
const MISMATCH_PENALTY: f64 = 100.0;

/// Penalty for the claimed name not appearing in the alternate-data name,
/// case-insensitive
pub fn input_validation_score(claimed_name: &str, alternate_name: &str) -> f64 {
    let claimed = claimed_name.trim().to_lowercase();
    let alternate = alternate_name.trim().to_lowercase();
    if alternate.contains(&claimed) {
        0.0
    } else {
        MISMATCH_PENALTY
    }
}

/// Vi, Vodafone and Idea are the same network post-merger and are treated
/// as interchangeable
fn is_vi_group(carrier: &str) -> bool {
    carrier == "vi" || carrier.contains("vodafone") || carrier.contains("idea")
}

/// Penalty for the device-reported carrier not matching the alternate-data
/// carrier
pub fn network_validation_score(device_carrier: &str, alternate_carrier: &str) -> f64 {
    let device = device_carrier.trim().to_lowercase();
    let alternate = alternate_carrier.trim().to_lowercase();
    if is_vi_group(&device) && is_vi_group(&alternate) {
        return 0.0;
    }
    if alternate.contains(&device) {
        0.0
    } else {
        MISMATCH_PENALTY
    }
}

/// Scaled penalty of 1000/|account apps| for each account-linked app that
/// is absent from the device's installed-app list
pub fn app_profile_score(device_apps: &[String], account_apps: &[String]) -> f64 {
    let account: std::collections::BTreeSet<String> =
        account_apps.iter().map(|a| a.trim().to_lowercase()).collect();
    if account.is_empty() {
        return 0.0;
    }
    let device: std::collections::BTreeSet<String> =
        device_apps.iter().map(|a| a.trim().to_lowercase()).collect();

    let missing = account.iter().filter(|app| !device.contains(*app)).count();
    missing as f64 * (1000.0 / account.len() as f64)
}

/// Combine the component signals into the final composite score
pub fn compute_risk_score(inputs: &RiskInputs) -> RiskBreakdown {
    let device_risk_score = inputs.device_risk_level.score();
    let input_score = input_validation_score(&inputs.claimed_name, &inputs.alternate_name);
    let network_score = network_validation_score(&inputs.device_carrier, &inputs.alternate_carrier);
    let app_score = app_profile_score(&inputs.device_apps, &inputs.account_apps);

    let final_score = RISK_WEIGHT * inputs.risk_score
        + DEVICE_WEIGHT * device_risk_score
        + INPUT_VALIDATION_WEIGHT * input_score
        + NETWORK_VALIDATION_WEIGHT * network_score
        + APP_PROFILE_WEIGHT * app_score;

    RiskBreakdown {
        final_score,
        component_scores: RiskComponentScores {
            risk_score: inputs.risk_score,
            device_risk_score,
            input_validation_score: input_score,
            network_validation_score: network_score,
            app_profile_score: app_score,
        },
    }
}
