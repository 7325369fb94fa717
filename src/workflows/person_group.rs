// Person-group provisioning, enrolment and training.
//
// Enrolment runs strictly forward:
//   GroupReady -> PersonsCreated -> FacesUploaded -> TrainingStarted -> Succeeded | Failed
// Nothing is rolled back; a fatal error leaves the remote group partially
// populated.

use super::out_err;
use crate::api::{FaceService, TrainingStatus};
use crate::config::Pacing;
use crate::error::{FaceError, Result};
use crate::stream::{ImageSource, StreamOpener};
use crate::ui;
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonGroupOptions {
    /// Delete (ignoring failure) and recreate the group before enrolling.
    pub recreate: bool,
    /// Report a failed face upload and move on instead of aborting.
    pub continue_on_upload_error: bool,
}

impl Default for PersonGroupOptions {
    fn default() -> Self {
        PersonGroupOptions {
            recreate: false,
            continue_on_upload_error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentSummary {
    pub persons: usize,
    pub faces_uploaded: usize,
    pub faces_failed: usize,
    pub status: TrainingStatus,
}

pub fn create_group(service: &dyn FaceService, name: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, " - creating person group {name}").map_err(out_err)?;
    service.create_person_group(name, name)
}

/// Delete group `name`. A failure is reported on `out`, not returned.
pub fn delete_group(service: &dyn FaceService, name: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, " - deleting person group {name}").map_err(out_err)?;
    if let Err(err) = service.delete_person_group(name) {
        warn!("deleting person group {name}: {err}");
        writeln!(out, "{}", ui::ERROR_MARKER).map_err(out_err)?;
    }
    Ok(())
}

/// Immediate subdirectories (`dirs == true`) or files of `dir`, sorted by name.
fn sorted_entries(dir: &Path, dirs: bool) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| FaceError::io(dir, e))? {
        let entry = entry.map_err(|e| FaceError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() == dirs {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Enrol every subfolder of `path` as a person of group `name`, upload the
/// files inside as that person's faces, then train the group and wait for
/// the training to finish.
pub fn enroll_and_train(
    service: &dyn FaceService,
    opener: &StreamOpener,
    name: &str,
    path: &Path,
    options: PersonGroupOptions,
    pacing: Pacing,
    out: &mut impl Write,
) -> Result<EnrollmentSummary> {
    let dir = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| FaceError::io(path, e))?
            .join(path)
    };

    if options.recreate {
        if let Err(err) = service.delete_person_group(name) {
            debug!("no previous person group {name} removed: {err}");
        }
        create_group(service, name, out)?;
    }

    let mut summary = EnrollmentSummary {
        persons: 0,
        faces_uploaded: 0,
        faces_failed: 0,
        status: TrainingStatus::NotStarted,
    };

    for person_dir in sorted_entries(&dir, true)? {
        let person_name = file_name(&person_dir);
        write!(out, " - Creating person {person_name}").map_err(out_err)?;
        out.flush().map_err(out_err)?;
        let person_id = service.create_person(name, &person_name)?.person_id;
        writeln!(out, " -> {person_id}").map_err(out_err)?;
        summary.persons += 1;

        for face_file in sorted_entries(&person_dir, false)? {
            write!(out, " --- uploading face {}", file_name(&face_file)).map_err(out_err)?;
            out.flush().map_err(out_err)?;
            let uploaded = opener
                .open_source(&ImageSource::File(face_file.clone()))
                .and_then(|image| service.add_person_face(name, &person_id, image));
            match uploaded {
                Ok(face) => {
                    writeln!(out, " -> {}", face.persisted_face_id).map_err(out_err)?;
                    summary.faces_uploaded += 1;
                }
                Err(err) if options.continue_on_upload_error => {
                    warn!("uploading {}: {err}", face_file.display());
                    writeln!(out, "{}", ui::ERROR_MARKER).map_err(out_err)?;
                    summary.faces_failed += 1;
                }
                Err(err) => {
                    writeln!(out, "{}", ui::ERROR_MARKER).map_err(out_err)?;
                    return Err(err);
                }
            }
            std::thread::sleep(pacing.upload_delay);
        }
    }

    writeln!(out, " - training").map_err(out_err)?;
    service.train_person_group(name)?;
    summary.status = wait_for_training(service, name, pacing)?;
    writeln!(out, " - Status={}", summary.status).map_err(out_err)?;
    info!(
        "person group {name}: {} persons, {} faces uploaded, {} failed, training {}",
        summary.persons, summary.faces_uploaded, summary.faces_failed, summary.status
    );
    Ok(summary)
}

/// Poll the training status until it is anything but `Running`. There is
/// no upper bound on the number of polls.
pub fn wait_for_training(
    service: &dyn FaceService,
    name: &str,
    pacing: Pacing,
) -> Result<TrainingStatus> {
    let spinner = ui::spinner(&format!("training person group {name}"));
    let result = loop {
        let report = match service.training_status(name) {
            Ok(report) => report,
            Err(err) => break Err(err),
        };
        debug!("training status of {name}: {}", report.status);
        if report.status != TrainingStatus::Running {
            break Ok(report.status);
        }
        std::thread::sleep(pacing.poll_interval);
    };
    spinner.finish_and_clear();
    result
}
