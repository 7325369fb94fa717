use super::out_err;
use crate::api::{DetectedFace, FaceAttributeType, FaceService};
use crate::error::Result;
use crate::stream::StreamOpener;
use std::io::Write;

pub const DETECT_ATTRIBUTES: [FaceAttributeType; 3] =
    [FaceAttributeType::Age, FaceAttributeType::Gender, FaceAttributeType::Smile];

/// Detect faces in the image at `reference` (URL or path) and print one
/// summary line per face.
pub fn detect(
    service: &dyn FaceService,
    opener: &StreamOpener,
    reference: &str,
    out: &mut impl Write,
) -> Result<Vec<DetectedFace>> {
    let image = opener.open(reference)?;
    let faces = service.detect(image, &DETECT_ATTRIBUTES)?;
    print_faces(&faces, out)?;
    Ok(faces)
}

pub fn print_faces(faces: &[DetectedFace], out: &mut impl Write) -> Result<()> {
    writeln!(out, " - faces detected: {}", faces.len()).map_err(out_err)?;
    for (i, face) in faces.iter().enumerate() {
        let attrs = &face.face_attributes;
        writeln!(
            out,
            " #{}: {}, {} years old, smile={}",
            i + 1,
            attrs.gender.as_deref().unwrap_or("unknown"),
            attrs.age.map(|a| a.to_string()).unwrap_or_else(|| "?".into()),
            attrs.smile.map(|s| s.to_string()).unwrap_or_else(|| "?".into()),
        )
        .map_err(out_err)?;
    }
    Ok(())
}
