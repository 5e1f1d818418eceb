//! Socket-free request dispatch for the catalog call contracts.
//!
//! A transport hands over the method, the request target (path plus optional
//! query string) and the raw body; `dispatch` picks the catalog operation and
//! returns a status code with a text or JSON body. Query values are passed to
//! the filters verbatim: percent-decoding belongs to the transport.

use crate::catalog::{Generated, Product, SharedCatalog};
use crate::error::CatalogError;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use tracing::error;

pub const HEALTH_BODY: &str = "api-ok";
pub const DUPLICATE_PRODUCT_MESSAGE: &str = "Product already exists";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other,
}

impl Method {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("GET") {
            Method::Get
        } else if raw.eq_ignore_ascii_case("POST") {
            Method::Post
        } else {
            Method::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: ResponseBody,
}

impl Response {
    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: ResponseBody::Text(body.to_string()),
        }
    }

    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(body),
        }
    }

    fn error(status: u16, message: impl fmt::Display) -> Self {
        Self::json(status, json!({ "error": message.to_string() }))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Text(text) => f.write_str(text),
            ResponseBody::Json(value) => write!(f, "{value}"),
        }
    }
}

/// Route one request to the catalog.
pub fn dispatch(
    catalog: &SharedCatalog,
    method: &str,
    target: &str,
    body: Option<&str>,
) -> Response {
    let (path, query) = split_target(target);
    match (path.as_str(), Method::parse(method)) {
        ("/", Method::Get) => Response::text(200, HEALTH_BODY),
        ("/products", Method::Get) => {
            json_list(catalog.list_products(query_param(query, "name")))
        }
        ("/products", Method::Post) => create_product(catalog, body),
        ("/categories", Method::Get) => {
            json_list(catalog.list_categories(query_param(query, "ids")))
        }
        ("/" | "/products" | "/categories", _) => {
            Response::error(405, format!("method {method} not allowed on {path}"))
        }
        _ => Response::error(404, format!("no route for {path}")),
    }
}

fn create_product(catalog: &SharedCatalog, body: Option<&str>) -> Response {
    let Some(raw) = body.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Response::error(400, "request body must be a JSON object");
    };
    let candidate = match parse_product(raw) {
        Ok(candidate) => candidate,
        Err(message) => return Response::error(400, message),
    };
    match catalog.create_product(candidate) {
        Ok(created) => match serde_json::to_value(&created) {
            Ok(value) => Response::json(201, value),
            Err(err) => Response::error(500, err),
        },
        Err(CatalogError::DuplicateName { .. }) => {
            Response::json(400, json!({ "name": DUPLICATE_PRODUCT_MESSAGE }))
        }
        Err(CatalogError::Storage(err)) => {
            error!(error = %err, "product insert failed");
            Response::error(500, err)
        }
    }
}

fn parse_product(raw: &str) -> Result<Product, String> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| format!("invalid JSON body: {err}"))?;
    if !value.is_object() {
        return Err("request body must be a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|err| format!("invalid product: {err}"))
}

fn json_list<R: Serialize>(items: Vec<Generated<R>>) -> Response {
    match serde_json::to_value(items) {
        Ok(value) => Response::json(200, value),
        Err(err) => Response::error(500, err),
    }
}

/// Split a request target into a normalized path and the raw query string.
fn split_target(target: &str) -> (String, Option<&str>) {
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };
    let trimmed = path.trim_matches('/');
    (format!("/{trimmed}"), query)
}

/// First value for `key` in a `&`-separated query string, undecoded.
///
/// A bare key (`?name`) yields an empty value; an absent key yields `None`.
fn query_param<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
}
