use crate::StatusMetrics;
use geofence_core::{GeoPoint, Zone};
use zone_guards::{calculate_zone_info, PatientStatus, ZoneInfo};

/// Record `info` and report whether severity rose since `previous`.
///
/// A first observation (`previous == None`) is never an escalation.
pub fn flag_escalation(
    metrics: &StatusMetrics,
    patient_id: &str,
    previous: Option<PatientStatus>,
    info: &ZoneInfo,
) -> bool {
    metrics.observe_zone_info(patient_id, info);

    let escalated = previous.is_some_and(|prev| info.status.is_escalation_from(prev));
    if escalated {
        metrics
            .status_escalations_total
            .with_label_values(&[patient_id, info.status.as_str()])
            .inc();
        tracing::info!(
            patient_id,
            from = ?previous,
            to = %info.status,
            zone = %info.zone_display_name,
            "patient status escalated"
        );
    }
    escalated
}

pub fn resolve_and_flag(
    metrics: &StatusMetrics,
    patient_id: &str,
    position: GeoPoint,
    zones: &[Zone],
    previous: Option<PatientStatus>,
) -> (ZoneInfo, bool) {
    let info = calculate_zone_info(position, zones);
    let escalated = flag_escalation(metrics, patient_id, previous, &info);
    (info, escalated)
}
