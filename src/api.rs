// API client module: the `FaceService` trait the workflows talk to, and
// a small blocking HTTP client implementing it against the Face API
// REST endpoints.

use crate::error::{FaceError, Result};
use crate::stream::ImageStream;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceAttributeType {
    Age,
    Gender,
    Smile,
}

impl FaceAttributeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            FaceAttributeType::Age => "age",
            FaceAttributeType::Gender => "gender",
            FaceAttributeType::Smile => "smile",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRectangle {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceAttributes {
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub smile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    #[serde(default)]
    pub face_id: Option<String>,
    #[serde(default)]
    pub face_rectangle: FaceRectangle,
    #[serde(default)]
    pub face_attributes: FaceAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonGroup {
    pub person_group_id: String,
    pub name: String,
    #[serde(default)]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: String,
    pub name: String,
    #[serde(default)]
    pub persisted_face_ids: Vec<String>,
    #[serde(default)]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonResult {
    pub person_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPersistedFaceResult {
    pub persisted_face_id: String,
}

/// Training state of a person group as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrainingStatus::NotStarted => "NotStarted",
            TrainingStatus::Running => "Running",
            TrainingStatus::Succeeded => "Succeeded",
            TrainingStatus::Failed => "Failed",
            TrainingStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatusReport {
    pub status: TrainingStatus,
    #[serde(default)]
    pub created_date_time: Option<String>,
    #[serde(default)]
    pub last_action_date_time: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// The remote operations used by the workflows. `FaceApiClient` is the
/// real implementation; tests substitute a recording fake.
pub trait FaceService {
    fn detect(
        &self,
        image: ImageStream,
        attributes: &[FaceAttributeType],
    ) -> Result<Vec<DetectedFace>>;
    fn create_person_group(&self, group_id: &str, name: &str) -> Result<()>;
    fn delete_person_group(&self, group_id: &str) -> Result<()>;
    fn get_person_group(&self, group_id: &str) -> Result<PersonGroup>;
    fn list_person_groups(&self) -> Result<Vec<PersonGroup>>;
    fn create_person(&self, group_id: &str, name: &str) -> Result<CreatePersonResult>;
    fn add_person_face(
        &self,
        group_id: &str,
        person_id: &str,
        image: ImageStream,
    ) -> Result<AddPersistedFaceResult>;
    fn list_persons(&self, group_id: &str) -> Result<Vec<Person>>;
    fn train_person_group(&self, group_id: &str) -> Result<()>;
    fn training_status(&self, group_id: &str) -> Result<TrainingStatusReport>;
}

/// Blocking Face API client bound to one subscription key and endpoint.
#[derive(Clone)]
pub struct FaceApiClient {
    client: Client,
    endpoint: String,
    key: String,
}

impl FaceApiClient {
    pub fn new(endpoint: &str, key: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, endpoint, key))
    }

    fn with_client(client: Client, endpoint: &str, key: &str) -> Self {
        FaceApiClient {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key: key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// Subscription key header. An empty or malformed key is sent as-is
    /// (or left out) and rejected by the service.
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(val) = HeaderValue::from_str(&self.key) {
            headers.insert(SUBSCRIPTION_KEY_HEADER, val);
        }
        headers
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{method} {url}");
        self.client.request(method, url).headers(self.auth_headers())
    }

    fn octet_stream(&self, method: Method, path: &str, image: ImageStream) -> RequestBuilder {
        self.request(method, path)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
    }

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let res = req.send()?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            let txt = res.text().unwrap_or_default();
            return Err(remote_error(status, &txt));
        }
        Ok(res)
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let txt = self.send(req)?.text()?;
        Ok(serde_json::from_str(&txt)?)
    }
}

/// Turn a non-success response body into `FaceError::RemoteApi`, using the
/// service's `{"error": {...}}` envelope when present.
pub(crate) fn remote_error(status: u16, body: &str) -> FaceError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => FaceError::RemoteApi {
            status,
            code: env.error.code,
            message: env.error.message,
        },
        Err(_) => FaceError::RemoteApi {
            status,
            code: String::new(),
            message: body.trim().to_string(),
        },
    }
}

pub(crate) fn detect_path(attributes: &[FaceAttributeType]) -> String {
    let attrs: Vec<&str> = attributes.iter().map(|a| a.as_str()).collect();
    format!(
        "detect?returnFaceId=true&returnFaceLandmarks=false&returnFaceAttributes={}",
        attrs.join(",")
    )
}

impl FaceService for FaceApiClient {
    fn detect(
        &self,
        image: ImageStream,
        attributes: &[FaceAttributeType],
    ) -> Result<Vec<DetectedFace>> {
        let req = self.octet_stream(Method::POST, &detect_path(attributes), image);
        self.send_json(req)
    }

    fn create_person_group(&self, group_id: &str, name: &str) -> Result<()> {
        let req = self
            .request(Method::PUT, &format!("persongroups/{group_id}"))
            .json(&serde_json::json!({ "name": name }));
        self.send(req).map(drop)
    }

    fn delete_person_group(&self, group_id: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("persongroups/{group_id}"));
        self.send(req).map(drop)
    }

    fn get_person_group(&self, group_id: &str) -> Result<PersonGroup> {
        self.send_json(self.request(Method::GET, &format!("persongroups/{group_id}")))
    }

    fn list_person_groups(&self) -> Result<Vec<PersonGroup>> {
        self.send_json(self.request(Method::GET, "persongroups"))
    }

    fn create_person(&self, group_id: &str, name: &str) -> Result<CreatePersonResult> {
        let req = self
            .request(Method::POST, &format!("persongroups/{group_id}/persons"))
            .json(&serde_json::json!({ "name": name }));
        self.send_json(req)
    }

    fn add_person_face(
        &self,
        group_id: &str,
        person_id: &str,
        image: ImageStream,
    ) -> Result<AddPersistedFaceResult> {
        let path = format!("persongroups/{group_id}/persons/{person_id}/persistedFaces");
        self.send_json(self.octet_stream(Method::POST, &path, image))
    }

    fn list_persons(&self, group_id: &str) -> Result<Vec<Person>> {
        self.send_json(self.request(Method::GET, &format!("persongroups/{group_id}/persons")))
    }

    fn train_person_group(&self, group_id: &str) -> Result<()> {
        let req = self.request(Method::POST, &format!("persongroups/{group_id}/train"));
        self.send(req).map(drop)
    }

    fn training_status(&self, group_id: &str) -> Result<TrainingStatusReport> {
        self.send_json(self.request(Method::GET, &format!("persongroups/{group_id}/training")))
    }
}
