use anyhow::Context;
use prometheus::{GaugeVec, IntCounterVec, Opts, Registry};
use zone_guards::ZoneInfo;

pub struct StatusMetrics {
    pub patient_status_severity: GaugeVec,
    pub distance_to_safe_zone_meters: GaugeVec,
    pub patient_in_safe_zone: GaugeVec,
    pub status_escalations_total: IntCounterVec,
}

impl StatusMetrics {
    pub fn register(registry: &Registry) -> anyhow::Result<Self> {
        let patient_status_severity = GaugeVec::new(
            Opts::new(
                "patient_status_severity",
                "Current patient status rank, 0 = safe through 4 = emergency",
            ),
            &["patient_id"],
        )?;
        let distance_to_safe_zone_meters = GaugeVec::new(
            Opts::new(
                "distance_to_safe_zone_meters",
                "Distance from the patient to the center of the closest safe zone",
            ),
            &["patient_id"],
        )?;
        let patient_in_safe_zone = GaugeVec::new(
            Opts::new("patient_in_safe_zone", "1 while the patient is inside a safe zone"),
            &["patient_id"],
        )?;
        let status_escalations_total = IntCounterVec::new(
            Opts::new(
                "status_escalations_total",
                "Observed increases in patient status severity",
            ),
            &["patient_id", "status"],
        )?;

        registry
            .register(Box::new(patient_status_severity.clone()))
            .context("registering patient_status_severity")?;
        registry
            .register(Box::new(distance_to_safe_zone_meters.clone()))
            .context("registering distance_to_safe_zone_meters")?;
        registry
            .register(Box::new(patient_in_safe_zone.clone()))
            .context("registering patient_in_safe_zone")?;
        registry
            .register(Box::new(status_escalations_total.clone()))
            .context("registering status_escalations_total")?;

        Ok(Self {
            patient_status_severity,
            distance_to_safe_zone_meters,
            patient_in_safe_zone,
            status_escalations_total,
        })
    }

    pub fn observe_zone_info(&self, patient_id: &str, info: &ZoneInfo) {
        self.patient_status_severity
            .with_label_values(&[patient_id])
            .set(f64::from(info.status.severity()));
        self.distance_to_safe_zone_meters
            .with_label_values(&[patient_id])
            .set(info.distance);
        self.patient_in_safe_zone
            .with_label_values(&[patient_id])
            .set(if info.is_in_safe_zone { 1.0 } else { 0.0 });
    }
}
