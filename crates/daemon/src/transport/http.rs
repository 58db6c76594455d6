// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport (spec §6.3): GET/POST/PUT/DELETE against an arbitrary
//! resource-tree path map onto Read/Create/Update/Delete, folding the
//! query string's `name`/`description` pair back into a plain command
//! line before handing it to the same [`Dispatcher`] the line transport
//! uses. Grounded on `gstd_http.c`'s `do_get`/`do_post`/`do_put`/
//! `do_delete`, which all build a `"<verb> <path> <args>"` string and
//! hand it to the same parser the line protocol uses.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};

use crate::dispatch::Dispatcher;

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", get(root_ping))
        .route("/{*path}", any(handle))
        .with_state(dispatcher)
}

async fn root_ping() -> &'static str {
    "gstd-daemon"
}

async fn handle(
    method: axum::http::Method,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    State(dispatcher): State<Dispatcher>,
) -> Response {
    let uri = format!("/{path}");
    let line = match build_command_line(&method, &uri, &query) {
        Ok(line) => line,
        Err(()) => {
            return with_cors(
                (StatusCode::BAD_REQUEST, Json(gstd_wire::Envelope::error(gstd_core::ReturnCode::BadValue))).into_response(),
            );
        }
    };

    let envelope = dispatcher.dispatch(&line);
    let status = status_for(envelope.code);
    with_cors((status, Json(envelope)).into_response())
}

fn build_command_line(method: &axum::http::Method, uri: &str, query: &HashMap<String, String>) -> Result<String, ()> {
    match *method {
        axum::http::Method::GET => Ok(format!("read {uri}")),
        axum::http::Method::POST => {
            let name = query.get("name").ok_or(())?;
            let description = query.get("description").ok_or(())?;
            Ok(format!("create {uri} {name} {description}"))
        }
        axum::http::Method::PUT => {
            let name = query.get("name").ok_or(())?;
            Ok(format!("update {uri} {name}"))
        }
        axum::http::Method::DELETE => {
            let name = query.get("name").ok_or(())?;
            Ok(format!("delete {uri} {name}"))
        }
        _ => Err(()),
    }
}

/// Mirrors `get_status_code` in the original HTTP transport: resource
/// errors map to 404, a name collision to 409, a bad value to 204, and
/// everything else (bad grammar, unsupported verb) to 400.
fn status_for(code: i32) -> StatusCode {
    use gstd_core::ReturnCode::*;
    let code = match code {
        0 => Ok,
        6 => NoResource,
        10 => BadCommand,
        8 => ExistingResource,
        13 => BadValue,
        _ => return StatusCode::BAD_REQUEST,
    };
    match code {
        Ok => StatusCode::OK,
        NoResource | BadCommand => StatusCode::NOT_FOUND,
        ExistingResource => StatusCode::CONFLICT,
        BadValue => StatusCode::NO_CONTENT,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Methods", HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"));
    headers.insert("Access-Control-Allow-Headers", HeaderValue::from_static("Content-Type"));
    response
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
