use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::appointment::{
    ActionReply, Appointment, FILTER_KEYS, NewAppointment, OwnAppointment, Reschedule,
};
use crate::domain::types::{AppointmentId, Note, PetId};
use crate::gateway::errors::GatewayResult;
use crate::gateway::{AppointmentGateway, HttpGateway};

#[derive(Serialize)]
struct ObservationBody<'a> {
    observacion: &'a str,
}

#[async_trait]
impl AppointmentGateway for HttpGateway {
    async fn list_appointments(&self) -> GatewayResult<Vec<Appointment>> {
        self.api.get("/cita/citas-completas", &[]).await
    }

    async fn filter_appointments(
        &self,
        filters: &BTreeMap<String, String>,
    ) -> GatewayResult<Vec<Appointment>> {
        let params: Vec<(&str, String)> = FILTER_KEYS
            .iter()
            .filter_map(|key| filters.get(*key).map(|value| (*key, value.clone())))
            .collect();
        self.api.get("/cita/filtrar", &params).await
    }

    async fn appointments_for_pet(&self, pet: PetId) -> GatewayResult<Vec<Appointment>> {
        self.api.get(&format!("/cita/mascota/{pet}"), &[]).await
    }

    async fn appointment_details(&self, id: AppointmentId) -> GatewayResult<Appointment> {
        self.api.get(&format!("/cita/{id}/detalles"), &[]).await
    }

    async fn reschedule_appointment(
        &self,
        id: AppointmentId,
        reschedule: &Reschedule,
    ) -> GatewayResult<ActionReply> {
        self.api
            .put(&format!("/cita/{id}/reprogramar"), reschedule)
            .await
    }

    async fn cancel_appointment(
        &self,
        id: AppointmentId,
        note: &Note,
    ) -> GatewayResult<ActionReply> {
        let body = ObservationBody {
            observacion: note.as_str(),
        };
        self.api.put(&format!("/cita/{id}/cancelar"), &body).await
    }

    async fn attend_appointment(
        &self,
        id: AppointmentId,
        note: &Note,
    ) -> GatewayResult<ActionReply> {
        let body = ObservationBody {
            observacion: note.as_str(),
        };
        self.api.put(&format!("/cita/{id}/atender"), &body).await
    }

    async fn book_appointment(&self, appointment: &NewAppointment) -> GatewayResult<()> {
        self.api.post_unit("/cita/registrar", appointment).await
    }

    async fn my_appointments(&self) -> GatewayResult<Vec<OwnAppointment>> {
        self.api.get("/cita/mis-citas", &[]).await
    }

    async fn cancel_own_appointment(&self, id: AppointmentId) -> GatewayResult<()> {
        self.api.patch_unit(&format!("/cita/{id}/cancelar")).await
    }
}
