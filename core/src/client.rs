//! Stateless HTTP request builder and response parser for the expenses API.
//!
//! # Design
//! `ExpenseClient` holds only a `base_url`, so one client type serves every
//! deployment. Each operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ExpenseDraft, ExpenseId, ExpenseRecord};

/// Synchronous, stateless client for the `/expenses` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseClient {
    base_url: String,
}

impl ExpenseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_expenses(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/expenses", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_expense(&self, draft: &ExpenseDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/expenses", self.base_url),
            headers: json_headers(),
            body: Some(to_body(draft)?),
        })
    }

    pub fn build_update_expense(&self, id: ExpenseId, draft: &ExpenseDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/expenses/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_body(draft)?),
        })
    }

    pub fn build_delete_expense(&self, id: ExpenseId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/expenses/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_expenses(&self, response: HttpResponse) -> Result<Vec<ExpenseRecord>, ApiError> {
        check_status(&response, &[200])?;
        from_body(&response)
    }

    pub fn parse_create_expense(&self, response: HttpResponse) -> Result<ExpenseRecord, ApiError> {
        self.check_create_expense(&response)?;
        from_body(&response)
    }

    /// Status check alone, for callers that do not need the created record.
    /// Some backends answer with a bare acknowledgement instead.
    pub fn check_create_expense(&self, response: &HttpResponse) -> Result<(), ApiError> {
        check_status(response, &[201, 200])
    }

    pub fn parse_update_expense(&self, response: HttpResponse) -> Result<ExpenseRecord, ApiError> {
        self.check_update_expense(&response)?;
        from_body(&response)
    }

    pub fn check_update_expense(&self, response: &HttpResponse) -> Result<(), ApiError> {
        check_status(response, &[200])
    }

    pub fn parse_delete_expense(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])?;
        Ok(())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_body(draft: &ExpenseDraft) -> Result<String, ApiError> {
    serde_json::to_string(draft).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_body<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
