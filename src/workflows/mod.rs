// Command workflows. Each one takes the service by reference and writes its
// console output to the given writer.

pub mod detect;
pub mod listing;
pub mod person_group;

use crate::error::FaceError;

pub(crate) fn out_err(e: std::io::Error) -> FaceError {
    FaceError::io("<stdout>", e)
}
