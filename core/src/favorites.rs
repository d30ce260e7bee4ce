//! Request builder and response parser for the favorites service.
//!
//! User and resource ids are opaque strings and are percent-encoded as path
//! segments. Every response is the `{ success, data }` envelope; a
//! `success: false` envelope becomes `ApiError::Rejected`.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{check_status, parse_json, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{FavoriteList, FavoriteStatus, FavoritesEnvelope};

const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct FavoritesClient {
    base_url: String,
}

impl FavoritesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn user_url(&self, user_id: &str) -> String {
        format!(
            "{}/favorites/{}",
            self.base_url,
            utf8_percent_encode(user_id, SEGMENT)
        )
    }

    fn pair_url(&self, user_id: &str, resource_id: &str) -> String {
        format!(
            "{}/{}",
            self.user_url(user_id),
            utf8_percent_encode(resource_id, SEGMENT)
        )
    }

    pub fn build_list_favorites(&self, user_id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.user_url(user_id))
    }

    pub fn build_add_favorite(&self, user_id: &str, resource_id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Post, self.pair_url(user_id, resource_id))
    }

    pub fn build_remove_favorite(&self, user_id: &str, resource_id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.pair_url(user_id, resource_id))
    }

    pub fn build_check_favorite(&self, user_id: &str, resource_id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.pair_url(user_id, resource_id))
    }

    pub fn parse_list_favorites(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        let list: FavoriteList = parse_envelope(&response)?;
        Ok(list.favorites)
    }

    pub fn parse_add_favorite(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_status(&response)
    }

    pub fn parse_remove_favorite(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_status(&response)
    }

    pub fn parse_check_favorite(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_status(&response)
    }
}

fn parse_status(response: &HttpResponse) -> Result<bool, ApiError> {
    let status: FavoriteStatus = parse_envelope(response)?;
    Ok(status.is_favorite)
}

fn parse_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    // A failure envelope carries a better message than the bare status.
    if response.status != 200 {
        if let Ok(FavoritesEnvelope {
            success: false,
            message: Some(message),
            ..
        }) = parse_json::<FavoritesEnvelope<T>>(response)
        {
            return Err(ApiError::Rejected(message));
        }
    }
    check_status(response, 200)?;

    let envelope: FavoritesEnvelope<T> = parse_json(response)?;
    if !envelope.success {
        return Err(ApiError::Rejected(
            envelope.message.unwrap_or_else(|| "unspecified failure".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::DeserializationError("envelope has no data".to_string()))
}
