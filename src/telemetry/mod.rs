//! Gameplay event logging
//!
//! Events are queued in the order the game produces them and handed to a
//! [`Transport`] one at a time by a single dispatcher future. The next send
//! only starts once the previous one has finished, successfully or not, so
//! the endpoint sees login before jumps, jumps before game over, and game
//! over before the following restart.
//!
//! Enqueueing never blocks and never fails; delivery failures are logged and
//! the queue moves on. Nothing is retried.

#[cfg(target_arch = "wasm32")]
pub mod http;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;
use crate::session::Session;

/// Something worth recording about a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Login,
    Jump,
    GameOver { score: u64 },
    Restart,
}

impl GameEvent {
    /// `type` field sent to the endpoint
    pub fn label(&self) -> String {
        match self {
            GameEvent::Login => "로그인".to_string(),
            GameEvent::Jump => "점프".to_string(),
            GameEvent::GameOver { score } => format!("게임 오버, 점수 : {}점", score),
            GameEvent::Restart => "재시작".to_string(),
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Login => write!(f, "login"),
            GameEvent::Jump => write!(f, "jump"),
            GameEvent::GameOver { score } => write!(f, "game over (score {})", score),
            GameEvent::Restart => write!(f, "restart"),
        }
    }
}

/// Form fields POSTed for one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
    pub name: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
}

impl EventForm {
    pub fn new(event: &GameEvent, session: &Session) -> Self {
        Self {
            kind: event.label(),
            details: String::new(),
            name: session.name.clone(),
            student_id: session.student_id.clone(),
        }
    }

    /// Field name/value pairs in wire order
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("type", &self.kind),
            ("details", &self.details),
            ("name", &self.name),
            ("studentId", &self.student_id),
        ]
    }
}

/// JSON body returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EndpointReply {
    Success,
    Error { message: String },
}

impl EndpointReply {
    pub fn into_result(self) -> Result<(), DeliveryError> {
        match self {
            EndpointReply::Success => Ok(()),
            EndpointReply::Error { message } => Err(DeliveryError::Rejected(message)),
        }
    }
}

/// Delivers one event form to the logging endpoint
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, form: &EventForm) -> Result<EndpointReply, DeliveryError>;
}

/// Delivery counters, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Pending {
    queue: VecDeque<EventForm>,
    session: Option<Session>,
    dispatching: bool,
    stats: DeliveryStats,
}

/// In-order event queue shared between the game and its dispatcher.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Rc<RefCell<Pending>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity stamped onto every subsequent event
    pub fn set_session(&self, session: Session) {
        self.inner.borrow_mut().session = Some(session);
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.borrow().session.clone()
    }

    /// Queue an event.
    ///
    /// Returns `true` when no dispatcher is running; the caller must then
    /// start one with [`EventLog::dispatch`]. While a dispatcher is running
    /// it picks the new event up itself.
    pub fn enqueue(&self, event: &GameEvent) -> bool {
        let mut pending = self.inner.borrow_mut();
        let Some(session) = pending.session.as_ref() else {
            log::warn!("Dropping {} event logged before login", event);
            return false;
        };
        let form = EventForm::new(event, session);
        log::info!("Event queued: {}", event);
        pending.queue.push_back(form);

        if pending.dispatching {
            false
        } else {
            pending.dispatching = true;
            true
        }
    }

    /// Events waiting to be sent (excluding the one in flight)
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    pub fn is_dispatching(&self) -> bool {
        self.inner.borrow().dispatching
    }

    pub fn stats(&self) -> DeliveryStats {
        self.inner.borrow().stats
    }

    /// Send queued events one at a time until the queue is empty
    pub async fn dispatch<T: Transport>(&self, transport: &T) {
        loop {
            let form = {
                let mut pending = self.inner.borrow_mut();
                match pending.queue.pop_front() {
                    Some(form) => form,
                    None => {
                        pending.dispatching = false;
                        return;
                    }
                }
            };

            let result = match transport.send(&form).await {
                Ok(reply) => reply.into_result(),
                Err(e) => Err(e),
            };

            let mut pending = self.inner.borrow_mut();
            match result {
                Ok(()) => {
                    pending.stats.delivered += 1;
                    log::debug!("Event delivered: {}", form.kind);
                }
                Err(e) => {
                    pending.stats.failed += 1;
                    log::error!("Error processing event '{}': {}", form.kind, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every form; fails the sends whose index is listed
    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<EventForm>>,
        fail_at: Vec<usize>,
        reject_at: Vec<usize>,
        /// Event pushed into this log during the first send
        inject: Option<(EventLog, GameEvent)>,
    }

    impl Transport for RecordingTransport {
        async fn send(&self, form: &EventForm) -> Result<EndpointReply, DeliveryError> {
            let index = {
                let mut sent = self.sent.borrow_mut();
                sent.push(form.clone());
                sent.len() - 1
            };
            if index == 0 {
                if let Some((log, event)) = &self.inject {
                    assert!(!log.enqueue(event), "dispatcher already running");
                }
            }
            if self.fail_at.contains(&index) {
                return Err(DeliveryError::Network("connection reset".to_string()));
            }
            if self.reject_at.contains(&index) {
                return Ok(EndpointReply::Error {
                    message: "sheet missing".to_string(),
                });
            }
            Ok(EndpointReply::Success)
        }
    }

    fn logged_in() -> EventLog {
        let log = EventLog::new();
        log.set_session(Session::login("kim", "2024001").expect("valid login"));
        log
    }

    fn kinds(transport: &RecordingTransport) -> Vec<String> {
        transport.sent.borrow().iter().map(|f| f.kind.clone()).collect()
    }

    #[test]
    fn test_labels() {
        assert_eq!(GameEvent::Login.label(), "로그인");
        assert_eq!(GameEvent::Jump.label(), "점프");
        assert_eq!(GameEvent::GameOver { score: 42 }.label(), "게임 오버, 점수 : 42점");
        assert_eq!(GameEvent::Restart.label(), "재시작");
    }

    #[test]
    fn test_form_fields() {
        let session = Session::login("lee", "77").expect("valid login");
        let form = EventForm::new(&GameEvent::Jump, &session);
        assert_eq!(
            form.pairs(),
            [("type", "점프"), ("details", ""), ("name", "lee"), ("studentId", "77")]
        );
        let json = serde_json::to_value(&form).expect("serializable");
        assert_eq!(json["studentId"], "77");
        assert_eq!(json["type"], "점프");
    }

    #[test]
    fn test_reply_json() {
        let ok: EndpointReply = serde_json::from_str(r#"{"status":"success"}"#).expect("reply");
        assert_eq!(ok, EndpointReply::Success);
        let err: EndpointReply =
            serde_json::from_str(r#"{"status":"error","message":"boom"}"#).expect("reply");
        assert!(matches!(err.into_result(), Err(DeliveryError::Rejected(m)) if m == "boom"));
        assert!(serde_json::from_str::<EndpointReply>("[]").is_err());
    }

    #[test]
    fn test_events_before_login_are_dropped() {
        let log = EventLog::new();
        assert!(!log.enqueue(&GameEvent::Jump));
        assert_eq!(log.pending(), 0);
    }

    #[test]
    fn test_only_first_enqueue_starts_dispatcher() {
        let log = logged_in();
        assert!(log.enqueue(&GameEvent::Login));
        assert!(!log.enqueue(&GameEvent::Jump));
        assert!(!log.enqueue(&GameEvent::GameOver { score: 3 }));
        assert_eq!(log.pending(), 3);
        assert!(log.is_dispatching());
    }

    #[test]
    fn test_dispatch_preserves_order() {
        let log = logged_in();
        log.enqueue(&GameEvent::Login);
        log.enqueue(&GameEvent::Jump);
        log.enqueue(&GameEvent::Jump);
        log.enqueue(&GameEvent::GameOver { score: 12 });
        log.enqueue(&GameEvent::Restart);

        let transport = RecordingTransport::default();
        pollster::block_on(log.dispatch(&transport));

        assert_eq!(
            kinds(&transport),
            vec!["로그인", "점프", "점프", "게임 오버, 점수 : 12점", "재시작"]
        );
        assert!(transport.sent.borrow().iter().all(|f| f.name == "kim"));
        assert!(!log.is_dispatching());
        assert_eq!(log.stats(), DeliveryStats { delivered: 5, failed: 0 });
    }

    #[test]
    fn test_failures_do_not_stop_the_queue() {
        let log = logged_in();
        log.enqueue(&GameEvent::Login);
        log.enqueue(&GameEvent::Jump);
        log.enqueue(&GameEvent::GameOver { score: 1 });

        let transport = RecordingTransport {
            fail_at: vec![0],
            reject_at: vec![1],
            ..Default::default()
        };
        pollster::block_on(log.dispatch(&transport));

        assert_eq!(kinds(&transport).len(), 3);
        assert_eq!(log.pending(), 0);
        assert_eq!(log.stats(), DeliveryStats { delivered: 1, failed: 2 });
    }

    #[test]
    fn test_event_queued_mid_flight_is_sent_by_same_dispatcher() {
        let log = logged_in();
        let transport = RecordingTransport {
            inject: Some((log.clone(), GameEvent::Jump)),
            ..Default::default()
        };
        assert!(log.enqueue(&GameEvent::Login));
        pollster::block_on(log.dispatch(&transport));

        assert_eq!(kinds(&transport), vec!["로그인", "점프"]);
        assert!(!log.is_dispatching());

        // Idle again: the next event needs a new dispatcher
        assert!(log.enqueue(&GameEvent::Restart));
    }
}
