// [apps/cube-server/src/lib.rs]
//! Cube's HTTP command surface: a single `POST /` endpoint implementing
//! the `GET`/`SET`/`BEGIN`/`COMMIT`/`ROLLBACK` grammar.

pub mod bootstrap;
pub mod command;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::Bootstrap;
pub use state::AppState;
