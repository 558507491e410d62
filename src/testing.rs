use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{
    http::{Request, Response, Transport},
    Error, Result,
};

enum Reply {
    Respond(Response),
    Fail(String),
}

#[derive(Default)]
struct State {
    replies: VecDeque<Reply>,
    requests: Vec<Request>,
}

/// Replays queued responses in order and records every request it was given
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Reply::Respond(Response::new(status, body)))
    }

    pub fn fail(self, reason: &str) -> Self {
        self.push(Reply::Fail(reason.to_string()))
    }

    fn push(self, reply: Reply) -> Self {
        self.state.lock().unwrap().replies.push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, req: &Request) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());
        match state.replies.pop_front() {
            Some(Reply::Respond(resp)) => Ok(resp),
            Some(Reply::Fail(reason)) => Err(Error::transport(reason)),
            None => panic!("unexpected request: {} {}", req.method, req.path),
        }
    }
}

/// Decodes `json` and encodes it again, checking both that the output matches the
/// input value for value and that it decodes back into the same record
pub fn assert_round_trip<T>(json: &str) -> T
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let decoded: T = crate::json::decode(json).unwrap();
    let encoded = crate::json::encode(&decoded).unwrap();

    let expected: serde_json::Value = serde_json::from_str(json).unwrap();
    let actual: serde_json::Value = serde_json::from_str(&encoded).unwrap();
    pretty_assertions::assert_eq!(actual, expected);
    pretty_assertions::assert_eq!(crate::json::decode::<T>(&encoded).unwrap(), decoded);
    decoded
}
