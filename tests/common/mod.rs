// Recording fake of the face service shared by the integration tests.
#![allow(dead_code)]

use face_cli::api::{
    AddPersistedFaceResult, CreatePersonResult, DetectedFace, FaceAttributeType, FaceService,
    Person, PersonGroup, TrainingStatus, TrainingStatusReport,
};
use face_cli::stream::ImageStream;
use face_cli::{FaceError, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Detect,
    CreateGroup(String),
    DeleteGroup(String),
    GetGroup(String),
    ListGroups,
    CreatePerson(String, String),
    AddFace { group: String, person_id: String, bytes: Vec<u8> },
    ListPersons(String),
    Train(String),
    Status(String),
}

pub fn remote(message: &str) -> FaceError {
    FaceError::RemoteApi {
        status: 400,
        code: "BadArgument".into(),
        message: message.into(),
    }
}

#[derive(Default)]
pub struct FakeFaceService {
    pub calls: RefCell<Vec<Call>>,
    pub groups: Vec<PersonGroup>,
    pub persons: Vec<Person>,
    pub faces: Vec<DetectedFace>,
    /// 1-based indexes of `add_person_face` calls that fail.
    pub failing_uploads: Vec<usize>,
    pub fail_delete: bool,
    pub statuses: RefCell<VecDeque<TrainingStatus>>,
    pub uploads: RefCell<usize>,
}

impl FakeFaceService {
    pub fn with_statuses(statuses: &[TrainingStatus]) -> Self {
        FakeFaceService {
            statuses: RefCell::new(statuses.iter().copied().collect()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl FaceService for FakeFaceService {
    fn detect(
        &self,
        _image: ImageStream,
        _attributes: &[FaceAttributeType],
    ) -> Result<Vec<DetectedFace>> {
        self.record(Call::Detect);
        Ok(self.faces.clone())
    }

    fn create_person_group(&self, group_id: &str, _name: &str) -> Result<()> {
        self.record(Call::CreateGroup(group_id.into()));
        Ok(())
    }

    fn delete_person_group(&self, group_id: &str) -> Result<()> {
        self.record(Call::DeleteGroup(group_id.into()));
        if self.fail_delete {
            return Err(remote("PersonGroupNotFound"));
        }
        Ok(())
    }

    fn get_person_group(&self, group_id: &str) -> Result<PersonGroup> {
        self.record(Call::GetGroup(group_id.into()));
        self.groups
            .iter()
            .find(|g| g.person_group_id == group_id)
            .cloned()
            .ok_or_else(|| remote("PersonGroupNotFound"))
    }

    fn list_person_groups(&self) -> Result<Vec<PersonGroup>> {
        self.record(Call::ListGroups);
        Ok(self.groups.clone())
    }

    fn create_person(&self, group_id: &str, name: &str) -> Result<CreatePersonResult> {
        self.record(Call::CreatePerson(group_id.into(), name.into()));
        Ok(CreatePersonResult {
            person_id: format!("id-{name}"),
        })
    }

    fn add_person_face(
        &self,
        group_id: &str,
        person_id: &str,
        mut image: ImageStream,
    ) -> Result<AddPersistedFaceResult> {
        let mut bytes = Vec::new();
        image.read_to_end(&mut bytes).unwrap();
        self.record(Call::AddFace {
            group: group_id.into(),
            person_id: person_id.into(),
            bytes,
        });
        let n = {
            let mut uploads = self.uploads.borrow_mut();
            *uploads += 1;
            *uploads
        };
        if self.failing_uploads.contains(&n) {
            return Err(remote("InvalidImage"));
        }
        Ok(AddPersistedFaceResult {
            persisted_face_id: format!("face-{n}"),
        })
    }

    fn list_persons(&self, group_id: &str) -> Result<Vec<Person>> {
        self.record(Call::ListPersons(group_id.into()));
        Ok(self.persons.clone())
    }

    fn train_person_group(&self, group_id: &str) -> Result<()> {
        self.record(Call::Train(group_id.into()));
        Ok(())
    }

    fn training_status(&self, group_id: &str) -> Result<TrainingStatusReport> {
        self.record(Call::Status(group_id.into()));
        let status = self
            .statuses
            .borrow_mut()
            .pop_front()
            .expect("training status polled after a final status");
        Ok(TrainingStatusReport {
            status,
            created_date_time: None,
            last_action_date_time: None,
            message: None,
        })
    }
}
