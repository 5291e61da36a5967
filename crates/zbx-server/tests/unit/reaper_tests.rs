//! Idle session reaper tests

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use zbx_server::reaper::{Reaper, SweepReport};
use zbx_server::session::{CloseReason, OutboundEvent, Session, SessionId, SessionTable};
use zbx_server::transport::{SessionAddress, TransportError};

use crate::test_utils::{StubGateway, next_event, rpc, server_with};

const IDLE: Duration = Duration::from_secs(60);
const SWEEP: Duration = Duration::from_secs(10);

fn reaper(sessions: &Arc<SessionTable>) -> Reaper {
    Reaper::new(Arc::clone(sessions), IDLE, SWEEP)
}

fn open(sessions: &SessionTable, capacity: usize) -> (Arc<Session>, mpsc::Receiver<OutboundEvent>) {
    let (session, receiver) = Session::new(SessionId::new(), capacity);
    sessions.insert(Arc::clone(&session)).unwrap();
    (session, receiver)
}

#[tokio::test]
async fn idle_sessions_are_evicted_with_a_notice() {
    let sessions = Arc::new(SessionTable::new());
    let (session, mut receiver) = open(&sessions, 4);

    let report = reaper(&sessions).sweep_at(Instant::now() + IDLE + Duration::from_secs(1));

    assert_eq!(
        report,
        SweepReport {
            examined: 1,
            evicted: 1,
            notice_failures: 0
        }
    );
    assert!(sessions.is_empty());
    assert!(!session.is_open());

    let notice = receiver.recv().await.unwrap();
    assert_eq!(notice.name, "session_closed");
    assert_eq!(notice.data["reason"], "idle_timeout");
}

#[tokio::test]
async fn evicted_sessions_are_no_longer_routable() {
    let gateway = Arc::new(StubGateway::new());
    let server = server_with(&gateway, true);
    let mut stream = server.transport().open_session().await.unwrap();
    next_event(&mut stream).await.unwrap();
    let address = SessionAddress::from_query(&stream.id().to_string());

    let reaper = server.reaper();
    let report = reaper.sweep_at(Instant::now() + reaper.idle_timeout() * 2);
    assert_eq!(report.evicted, 1);

    let notice = next_event(&mut stream).await.unwrap();
    assert_eq!(notice.data["reason"], "idle_timeout");
    assert!(matches!(
        server.transport().dispatch(&address, rpc(1, "ping", json!({}))),
        Err(TransportError::SessionNotFound(_))
    ));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn activity_postpones_eviction() {
    let sessions = Arc::new(SessionTable::new());
    let (session, _receiver) = open(&sessions, 4);
    let later = Instant::now() + IDLE;

    session.touch_at(later);
    let report = reaper(&sessions).sweep_at(later + IDLE - Duration::from_secs(1));

    assert_eq!(report.evicted, 0);
    assert_eq!(report.examined, 1);
    assert!(session.is_open());
}

#[tokio::test]
async fn full_queue_does_not_block_eviction() {
    let sessions = Arc::new(SessionTable::new());
    let (full, _receiver) = open(&sessions, 1);
    full.try_send(OutboundEvent::announcement(full.id())).unwrap();
    let (_other, _other_receiver) = open(&sessions, 4);

    let report = reaper(&sessions).sweep_at(Instant::now() + IDLE * 2);

    assert_eq!(report.evicted, 2);
    assert_eq!(report.notice_failures, 1);
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn sessions_closed_elsewhere_are_not_counted() {
    let sessions = Arc::new(SessionTable::new());
    let reaper = reaper(&sessions);
    assert_eq!(reaper.sweep(), SweepReport::default());

    let (session, _receiver) = open(&sessions, 4);
    sessions.close(&session.id(), CloseReason::Explicit);
    assert_eq!(reaper.sweep_at(Instant::now() + IDLE * 2).examined, 0);
}

#[tokio::test(start_paused = true)]
async fn background_task_sweeps_until_cancelled() {
    let sessions = Arc::new(SessionTable::new());
    let (session, _receiver) = open(&sessions, 4);
    let shutdown = CancellationToken::new();
    let handle = reaper(&sessions).spawn(shutdown.clone());

    tokio::time::sleep(IDLE + SWEEP + Duration::from_secs(1)).await;
    assert!(!session.is_open());
    assert!(sessions.is_empty());

    shutdown.cancel();
    handle.await.unwrap();
}
