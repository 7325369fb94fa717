// Library root
// -----------
// This crate exposes the library surface used by the `face` binary.
//
// Module responsibilities:
// - `api`: the `FaceService` trait and the blocking HTTP client talking to
//   the Face API.
// - `cli`: clap definitions of the command-line surface.
// - `config`: endpoint, key file location and workflow delays.
// - `error`: the `FaceError` type returned by library code.
// - `key_store`: reading and writing the service key file.
// - `stream`: turning a URL or path argument into image bytes.
// - `ui`: prompts, spinners and console markers.
// - `workflows`: detect, listing and person-group commands.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod key_store;
pub mod stream;
pub mod ui;
pub mod workflows;

pub use api::{FaceApiClient, FaceService, TrainingStatus};
pub use error::{FaceError, Result};
