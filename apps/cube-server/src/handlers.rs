// [apps/cube-server/src/handlers.rs]
use crate::command::{self, Command};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::instrument;

const CLIENT_NAME_HEADER: &str = "X-Client-Name";

pub async fn hello() -> &'static str {
    "Hello"
}

pub async fn not_found() -> Response {
    text_response(StatusCode::NOT_FOUND, b"Not found".to_vec())
}

#[instrument(skip(state, headers, body))]
pub async fn dispatch(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    let client_name = match headers.get(CLIENT_NAME_HEADER).and_then(|v| v.to_str().ok()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return text_response(StatusCode::BAD_REQUEST, b"ERR X-Client-Name header required".to_vec());
        }
    };

    let command = match command::parse(&body) {
        Ok(command) => command,
        Err(e) => return err_response(format!("ERR {e}")),
    };

    match command {
        Command::Get(key) => match state.transactions.get(&client_name, &key).await {
            Ok(value) => text_response(StatusCode::OK, value),
            Err(e) => err_response(format!("ERR {e}")),
        },
        Command::Set(key, value) => match state.transactions.set(&client_name, &key, value).await {
            Ok((old, new)) => {
                let mut body = old;
                body.push(b' ');
                body.extend(new);
                text_response(StatusCode::OK, body)
            }
            Err(e) => err_response(format!("ERR {e}")),
        },
        Command::Begin => match state.transactions.begin(&client_name) {
            Ok(()) => text_response(StatusCode::OK, b"OK".to_vec()),
            Err(e) => err_response(format!("ERR {e}")),
        },
        Command::Commit => match state.transactions.commit(&client_name).await {
            Ok(()) => text_response(StatusCode::OK, b"OK".to_vec()),
            Err(e) => err_response(format!("ERR {e}")),
        },
        Command::Rollback => match state.transactions.rollback(&client_name) {
            Ok(()) => text_response(StatusCode::OK, b"OK".to_vec()),
            Err(e) => err_response(format!("ERR {e}")),
        },
    }
}

fn err_response(message: String) -> Response {
    text_response(StatusCode::BAD_REQUEST, message.into_bytes())
}

fn text_response(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [("content-type", "text/plain; charset=utf-8")], body).into_response()
}
