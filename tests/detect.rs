mod common;

use common::{Call, FakeFaceService};
use face_cli::api::{DetectedFace, FaceAttributes};
use face_cli::stream::StreamOpener;
use face_cli::workflows::detect;

#[test]
fn detect_reads_local_file_and_prints_faces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portrait.jpg");
    std::fs::write(&path, b"jpeg").unwrap();
    let service = FakeFaceService {
        faces: vec![DetectedFace {
            face_id: Some("f1".into()),
            face_rectangle: Default::default(),
            face_attributes: FaceAttributes {
                age: Some(41.0),
                gender: Some("male".into()),
                smile: Some(0.5),
            },
        }],
        ..Default::default()
    };
    let opener = StreamOpener::new().unwrap();
    let mut out = Vec::new();
    let faces = detect::detect(&service, &opener, path.to_str().unwrap(), &mut out).unwrap();
    assert_eq!(faces.len(), 1);
    assert_eq!(service.calls(), vec![Call::Detect]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        " - faces detected: 1\n #1: male, 41 years old, smile=0.5\n"
    );
}

#[test]
fn detect_missing_file_never_reaches_service() {
    let service = FakeFaceService::default();
    let opener = StreamOpener::new().unwrap();
    let mut out = Vec::new();
    assert!(detect::detect(&service, &opener, "/no/such/photo.jpg", &mut out).is_err());
    assert!(service.calls().is_empty());
}
