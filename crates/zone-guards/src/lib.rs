pub mod anomaly;
pub mod demo;
pub mod envelope;
pub mod palette;
pub mod resolver;
pub mod risk;
pub mod snapshot;
pub mod status;

pub use anomaly::{
    anomaly_descriptions, assess_trip, detect_anomaly, wandering_score, TripAssessment, TripBaseline,
};
pub use demo::{demo_zones, zones_or_demo, DEFAULT_POSITION};
pub use envelope::{AnomalyEnvelope, ResolverEnvelope, RiskEnvelope};
pub use palette::{status_color, zone_color, zone_color_for_name};
pub use resolver::{calculate_zone_info, calculate_zone_info_with, ZoneInfo};
pub use risk::{
    assess_risk, compute_risk_score, is_night_hours, risk_factors, zone_exposure, GpsSignal,
    RiskAssessment, RiskInputs, RiskLevel, ZoneExposure,
};
pub use snapshot::{snapshot_patient, snapshot_patient_at, StatusSnapshot};
pub use status::{PatientStatus, StatusDisplay};
