//! In-memory client shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use constellix_records::common::{Client, Result, StatusSnafu};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Save(String, serde_json::Value),
    Update(String, serde_json::Value),
    Delete(String),
}

enum Reply {
    Body(Vec<u8>),
    Status(u16),
}

/// Answers calls in order from a queue of canned replies and records every
/// call it receives. An empty queue answers with an empty JSON object.
#[derive(Default)]
pub struct FakeClient {
    calls: RefCell<Vec<Call>>,
    replies: RefCell<VecDeque<Reply>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(self, body: serde_json::Value) -> Self {
        self.reply_body(&body.to_string())
    }

    pub fn reply_body(self, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Body(body.as_bytes().to_vec()));
        self
    }

    pub fn reply_status(self, status: u16) -> Self {
        self.replies.borrow_mut().push_back(Reply::Status(status));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn answer(&self, call: Call) -> Result<Vec<u8>> {
        let (method, path) = match &call {
            Call::Get(path) => ("GET", path.clone()),
            Call::Save(path, _) => ("POST", path.clone()),
            Call::Update(path, _) => ("PUT", path.clone()),
            Call::Delete(path) => ("DELETE", path.clone()),
        };
        self.calls.borrow_mut().push(call);

        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => StatusSnafu {
                url: format!("https://api.example.test/{path}"),
                method,
                status,
                body: "",
            }
            .fail(),
            None => Ok(b"{}".to_vec()),
        }
    }
}

impl Client for FakeClient {
    fn get_by_id(&self, path: &str) -> Result<Vec<u8>> {
        self.answer(Call::Get(path.to_string()))
    }

    fn save(&self, body: &serde_json::Value, path: &str) -> Result<Vec<u8>> {
        self.answer(Call::Save(path.to_string(), body.clone()))
    }

    fn update_by_id(&self, body: &serde_json::Value, path: &str) -> Result<Vec<u8>> {
        self.answer(Call::Update(path.to_string(), body.clone()))
    }

    fn delete_by_id(&self, path: &str) -> Result<()> {
        self.answer(Call::Delete(path.to_string())).map(|_| ())
    }
}

/// Remote representation of the record used throughout the tests.
pub fn remote_record(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "www",
        "ttl": 300,
        "geolocation": null,
        "recordOption": "roundRobinFailover",
        "noAnswer": false,
        "note": "",
        "gtdRegion": 1,
        "type": "A",
        "contactIds": [],
        "pools": [],
        "roundRobin": [],
        "roundRobinFailover": [
            { "value": "192.0.2.2", "disableFlag": false, "sortOrder": 1, "checkId": 0 },
            { "value": "192.0.2.1", "disableFlag": false, "sortOrder": 2, "checkId": 0 },
        ],
        "recordFailover": null,
    })
}
