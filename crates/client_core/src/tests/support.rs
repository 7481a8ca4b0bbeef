use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::{
    error::RpcError,
    navigation::Navigator,
    rpc::{RpcClient, RpcTransport},
};

pub const ROOT: &str = "http://catalog.test/";
pub const TOKEN: &str = "token,1700000000";

pub enum Scripted {
    Json(Value),
    Status(u16),
}

/// Transport stub that records every call and answers from a script.
#[derive(Default)]
pub struct ScriptedTransport {
    calls: Mutex<Vec<(String, Value)>>,
    replies: Mutex<VecDeque<Scripted>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    started: Notify,
    gate: Option<Notify>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        })
    }

    /// Every call parks until [`ScriptedTransport::open_gate`] is called.
    pub fn gated(replies: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            gate: Some(Notify::new()),
            ..Self::default()
        })
    }

    pub fn ok(payload: Value) -> Scripted {
        let mut payload = payload;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("result".into(), json!(0));
        }
        Scripted::Json(payload)
    }

    pub fn code(result: u64) -> Scripted {
        Scripted::Json(json!({ "result": result }))
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn post(&self, url: &str, body: Value) -> Result<Value, RpcError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((url.to_string(), body));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;

        let reply = self.replies.lock().expect("replies lock").pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match reply {
            Some(Scripted::Json(value)) => Ok(value),
            Some(Scripted::Status(code)) => Err(RpcError::Status(code)),
            None => Err(RpcError::Status(599)),
        }
    }
}

pub fn navigator(route: &str) -> Navigator {
    Navigator::new(ROOT, route).expect("navigator")
}

pub fn client(transport: Arc<ScriptedTransport>, route: &str) -> Arc<RpcClient> {
    Arc::new(RpcClient::with_transport(navigator(route), TOKEN, transport))
}
