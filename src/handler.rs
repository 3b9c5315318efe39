use crate::{error::ApiError, value_store::ValueStore};
use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Matches `/` and every path below it.
pub const VALUE_PATH: &str = "/{tail:.*}";

/// Query key that turns a GET into a write.
pub const SET_PARAM: &str = "set";

/// POST body. `value` is required: a missing or null field is rejected
/// rather than clearing the store.
#[derive(Debug, Deserialize)]
pub struct SetValue {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentValue {
    pub value: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(VALUE_PATH)
            .route(web::get().to(get_value))
            .route(web::post().to(post_value))
            .default_service(web::to(method_not_allowed)),
    );
}

async fn get_value(
    req: HttpRequest,
    store: web::Data<ValueStore>,
) -> Result<HttpResponse, ApiError> {
    match set_param(req.query_string()) {
        Some(value) => write_value(&store, value).await,
        None => read_value(&store).await,
    }
}

async fn post_value(
    body: web::Bytes,
    store: web::Data<ValueStore>,
) -> Result<HttpResponse, ApiError> {
    let payload = decode_body(&body)?;
    write_value(&store, payload.value).await
}

async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

/// The single write path behind both GET `?set=` and POST.
async fn write_value(store: &ValueStore, value: String) -> Result<HttpResponse, ApiError> {
    debug!("set value ({} bytes)", value.len());
    store.set(value).await;
    Ok(HttpResponse::NoContent().finish())
}

async fn read_value(store: &ValueStore) -> Result<HttpResponse, ApiError> {
    let current = CurrentValue {
        value: store.get().await,
    };
    trace!("get value ({} bytes)", current.value.len());
    let body = serde_json::to_string(&current).map_err(ApiError::Encode)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// First `set` pair in the query, if it carries a non-empty value.
/// Pairs containing a raw `;` are dropped. An unparsable query counts as
/// having no `set` at all.
fn set_param(query: &str) -> Option<String> {
    let query = query
        .split('&')
        .filter(|pair| !pair.contains(';'))
        .collect::<Vec<_>>()
        .join("&");
    web::Query::<Vec<(String, String)>>::from_query(&query)
        .ok()?
        .into_inner()
        .into_iter()
        .find(|(key, _)| key == SET_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Decodes the first JSON value in the body and ignores anything after it.
/// The value must be an object; serde would otherwise accept a struct
/// written as an array.
fn decode_body(body: &[u8]) -> Result<SetValue, ApiError> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<serde_json::Value>()
        .next()
        .ok_or(ApiError::InvalidJson)?
        .map_err(|_| ApiError::InvalidJson)?;
    if !value.is_object() {
        return Err(ApiError::InvalidJson);
    }
    SetValue::deserialize(value).map_err(|_| ApiError::InvalidJson)
}
