//! Doctors, appointments, medical records and doctor unavailability.

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::api::RequestDescriptor;
use crate::error::{ApiError, PortalError, PortalResult};
use crate::portal::Portal;

impl Portal {
    pub async fn available_doctors(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/healthcare/doctors/available/", false)
            .await
    }

    /// Profile rows of the signed-in doctor.
    pub async fn doctor_profiles(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/healthcare/doctors/", true).await
    }

    pub async fn appointments(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/healthcare/appointments/", true).await
    }

    pub async fn book_appointment(&self, appointment: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/healthcare/appointments/", appointment).authenticated())
            .await
    }

    pub async fn update_appointment(&self, id: u64, changes: Value) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::patch(format!("/healthcare/appointments/{}/", id), changes)
                .authenticated(),
        )
        .await
    }

    /// Cancel an appointment. An appointment the backend no longer knows
    /// counts as cancelled.
    pub async fn cancel_appointment(&self, id: u64) -> PortalResult<()> {
        let request =
            RequestDescriptor::delete(format!("/healthcare/appointments/{}/", id)).authenticated();

        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(PortalError::Api(ApiError::Failed { status, error }))
                if status == StatusCode::NOT_FOUND =>
            {
                tracing::debug!(appointment_id = id, %error, "Appointment already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn complete_appointment(&self, id: u64) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::post(format!("/healthcare/appointments/{}/complete/", id), json!({}))
                .authenticated(),
        )
        .await
    }

    pub async fn medical_records(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/healthcare/medical-records/", true).await
    }

    pub async fn patient_history(&self, patient_id: u64) -> PortalResult<Vec<Value>> {
        self.fetch_list(
            &format!(
                "/healthcare/medical-records/patient_history/?patient_id={}",
                patient_id
            ),
            true,
        )
        .await
    }

    pub async fn create_medical_record(&self, record: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/healthcare/medical-records/", record).authenticated())
            .await
    }

    pub async fn unavailability(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/healthcare/unavailability/", true).await
    }

    pub async fn add_unavailability(&self, period: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/healthcare/unavailability/", period).authenticated())
            .await
    }

    pub async fn remove_unavailability(&self, id: u64) -> PortalResult<()> {
        self.send(
            RequestDescriptor::delete(format!("/healthcare/unavailability/{}/", id)).authenticated(),
        )
        .await?;
        Ok(())
    }
}
