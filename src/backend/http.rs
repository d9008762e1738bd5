//! REST-Client gegen die BuildMap-API (`/api/floor/...`, `/api/fulcrum/...`).

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::http::Response;
use ureq::{Agent, Body};

use super::dto::{ApiErrorDto, FloorDto, FloorUpdateDto, FulcrumDto, FulcrumSaveDto};
use super::{BackendError, FloorPlanBackend};
use crate::core::{
    ConnectionDraft, Floor, FloorUpdate, Fulcrum, FulcrumDraft, FulcrumWithConnections,
};
use crate::shared::EditorOptions;

/// Blockierender HTTP-Client mit Bearer-Token.
pub struct HttpBackend {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Erstellt einen Client für `base_url` mit optionalem Token.
    pub fn new(base_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Erstellt einen Client aus den Editor-Optionen; das Token kommt aus der
    /// konfigurierten Umgebungsvariable.
    pub fn from_options(options: &EditorOptions) -> Self {
        let token = std::env::var(&options.api_token_env).ok();
        if token.is_none() {
            log::warn!(
                "Kein API-Token in {} gefunden, Anfragen laufen ohne Authentifizierung",
                options.api_token_env
            );
        }
        Self::new(
            options.api_base_url.clone(),
            token,
            Duration::from_secs(options.api_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let mut request = self.agent.get(&self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", auth.as_str());
        }
        let response = request.call().map_err(transport)?;
        read_json(check_status(response)?)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: WriteMethod,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self.send_raw(method, path, body)?;
        read_json(check_status(response)?)
    }

    fn send_raw<B: Serialize>(
        &self,
        method: WriteMethod,
        path: &str,
        body: &B,
    ) -> Result<Response<Body>, BackendError> {
        let url = self.url(path);
        let mut request = match method {
            WriteMethod::Post => self.agent.post(&url),
            WriteMethod::Put => self.agent.put(&url),
        };
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", auth.as_str());
        }
        request.send_json(body).map_err(transport)
    }

    fn delete(&self, path: &str) -> Result<Response<Body>, BackendError> {
        let mut request = self.agent.delete(&self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", auth.as_str());
        }
        request.call().map_err(transport)
    }
}

#[derive(Clone, Copy)]
enum WriteMethod {
    Post,
    Put,
}

fn transport(e: ureq::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

fn read_json<T: DeserializeOwned>(mut response: Response<Body>) -> Result<T, BackendError> {
    response
        .body_mut()
        .read_json::<T>()
        .map_err(|e| BackendError::Decode(e.to_string()))
}

fn check_status(mut response: Response<Body>) -> Result<Response<Body>, BackendError> {
    let status = response.status().as_u16();
    if (200..300).contains(&status) {
        return Ok(response);
    }

    let text = response.body_mut().read_to_string().unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorDto>(&text)
        .map(|e| if e.message.is_empty() { e.error } else { e.message })
        .unwrap_or(text);

    Err(match status {
        401 | 403 => BackendError::Unauthorized,
        404 => BackendError::NotFound(message),
        _ => BackendError::Rejected { status, message },
    })
}

impl FloorPlanBackend for HttpBackend {
    fn floors_by_area(&mut self, area_id: u64) -> Result<Vec<Floor>, BackendError> {
        let floors: Vec<FloorDto> =
            self.get_json(&format!("/api/floor/area/{area_id}?deleted=false"))?;
        Ok(floors
            .into_iter()
            .filter(|f| !f.deleted)
            .map(Floor::from)
            .collect())
    }

    fn floor_by_id(&mut self, floor_id: u64) -> Result<Floor, BackendError> {
        let floor: FloorDto = self.get_json(&format!("/api/floor/{floor_id}"))?;
        Ok(floor.into())
    }

    fn update_floor(&mut self, floor_id: u64, update: &FloorUpdate) -> Result<Floor, BackendError> {
        let floor: FloorDto = self.send_json(
            WriteMethod::Put,
            &format!("/api/floor/{floor_id}"),
            &FloorUpdateDto::from(update),
        )?;
        log::info!("Stockwerk {} gespeichert", floor_id);
        Ok(floor.into())
    }

    fn fulcrums_by_floor(
        &mut self,
        floor_id: u64,
    ) -> Result<Vec<FulcrumWithConnections>, BackendError> {
        let fulcrums: Vec<FulcrumDto> = self.get_json(&format!("/api/fulcrum/floor/{floor_id}"))?;
        Ok(fulcrums.into_iter().map(Into::into).collect())
    }

    fn fulcrums_by_area(
        &mut self,
        area_id: u64,
    ) -> Result<Vec<FulcrumWithConnections>, BackendError> {
        let fulcrums: Vec<FulcrumDto> = self.get_json(&format!("/api/fulcrum/area/{area_id}"))?;
        Ok(fulcrums.into_iter().map(Into::into).collect())
    }

    fn create_fulcrum(&mut self, draft: &FulcrumDraft) -> Result<Fulcrum, BackendError> {
        let created: FulcrumDto =
            self.send_json(WriteMethod::Post, "/api/fulcrum", &FulcrumSaveDto::from(draft))?;
        Ok(created.into())
    }

    fn update_fulcrum(&mut self, id: u64, draft: &FulcrumDraft) -> Result<Fulcrum, BackendError> {
        let updated: FulcrumDto = self.send_json(
            WriteMethod::Put,
            &format!("/api/fulcrum/{id}"),
            &FulcrumSaveDto::from(draft),
        )?;
        Ok(updated.into())
    }

    fn delete_fulcrum(&mut self, id: u64) -> Result<(), BackendError> {
        check_status(self.delete(&format!("/api/fulcrum/{id}"))?)?;
        Ok(())
    }

    fn add_connection(&mut self, from: u64, draft: &ConnectionDraft) -> Result<(), BackendError> {
        let response = self.send_raw(WriteMethod::Post, &format!("/api/fulcrum/{from}/connection"), draft)?;
        match check_status(response) {
            Ok(_) => Ok(()),
            Err(BackendError::Rejected { status: 400, message })
                if message.to_ascii_lowercase().contains("already exists") =>
            {
                Err(BackendError::ConnectionAlreadyExists {
                    from,
                    to: draft.connected_fulcrum_id,
                })
            }
            Err(e) => Err(e),
        }
    }

    fn remove_connection(&mut self, from: u64, to: u64) -> Result<(), BackendError> {
        check_status(self.delete(&format!("/api/fulcrum/{from}/connection/{to}"))?)?;
        Ok(())
    }
}
