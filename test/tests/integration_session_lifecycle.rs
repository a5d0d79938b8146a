use palworks_server::{dispatch, SessionRunner, SessionSlot};
use palworks_shared::{ClientMessage, PatchSet, ServerMessage};
use palworks_test::{MockEngine, MockSave, TestConnection};
use uuid::Uuid;

fn player_id() -> Uuid {
    Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
}

/// An update before any load is answered with a single ERROR envelope and
/// touches nothing.
#[tokio::test]
async fn update_before_load_is_a_single_error() {
    let engine = MockEngine::new();
    let mut session: SessionSlot<MockSave> = SessionSlot::new();
    let mut connection = TestConnection::new();

    dispatch(
        &engine,
        &mut session,
        ClientMessage::UpdateSaveFile(PatchSet::default()),
        &connection.handle,
    )
    .await
    .expect("error is reported over the open connection");

    let messages = connection.drain();
    assert_eq!(messages.len(), 1, "exactly one envelope: {:?}", messages);
    match &messages[0] {
        ServerMessage::Error(text) => {
            assert!(text.contains("No save loaded"), "unexpected text: {}", text);
        }
        other => panic!("Expected ERROR envelope, got {:?}", other),
    }
    assert!(!session.is_loaded(), "session must stay empty");
}

/// Same lifecycle rule for download.
#[tokio::test]
async fn download_before_load_is_a_single_error() {
    let engine = MockEngine::new();
    let mut session: SessionSlot<MockSave> = SessionSlot::new();
    let mut connection = TestConnection::new();

    dispatch(
        &engine,
        &mut session,
        ClientMessage::DownloadSaveFile,
        &connection.handle,
    )
    .await
    .expect("error is reported over the open connection");

    let messages = connection.drain();
    assert_eq!(messages.len(), 1, "exactly one envelope: {:?}", messages);
    match &messages[0] {
        ServerMessage::Error(text) => {
            assert!(
                text.starts_with("Error downloading file"),
                "unexpected text: {}",
                text
            );
        }
        other => panic!("Expected ERROR envelope, got {:?}", other),
    }
    assert!(!session.is_loaded());
}

/// A successful single-artifact load answers with progress lines, then the
/// save summary, then the player listing, in that order.
#[tokio::test]
async fn load_single_emits_summary_then_listing() {
    let engine = MockEngine::with_players(vec![player_id()]);
    let mut session = SessionSlot::new();
    let mut connection = TestConnection::new();
    let data = b"SAVEDATA".to_vec();

    dispatch(
        &engine,
        &mut session,
        ClientMessage::LoadSaveFile(data),
        &connection.handle,
    )
    .await
    .expect("load succeeds");

    let messages = connection.drain();
    let responses: Vec<&ServerMessage> =
        messages.iter().filter(|message| !message.is_progress()).collect();
    assert_eq!(responses.len(), 2, "summary + listing: {:?}", messages);

    match responses[0] {
        ServerMessage::LoadSaveFile(summary) => {
            assert_eq!(summary.name, "Level.sav");
            assert_eq!(summary.size, 8);
        }
        other => panic!("Expected LOAD_SAVE_FILE envelope, got {:?}", other),
    }
    match responses[1] {
        ServerMessage::GetPlayers(players) => {
            assert_eq!(players.len(), 1);
            assert_eq!(players[0].uid, player_id());
        }
        other => panic!("Expected GET_PLAYERS envelope, got {:?}", other),
    }
    assert!(session.is_loaded());
}

/// A failed load must not partially overwrite a previously good session.
#[tokio::test]
async fn failed_load_preserves_previous_session() {
    let good = MockEngine::with_players(vec![player_id()]);
    let bad = MockEngine::failing_parse("checksum mismatch");
    let mut session = SessionSlot::new();
    let mut connection = TestConnection::new();

    dispatch(
        &good,
        &mut session,
        ClientMessage::LoadSaveFile(b"FIRST".to_vec()),
        &connection.handle,
    )
    .await
    .expect("first load succeeds");
    connection.drain();

    dispatch(
        &bad,
        &mut session,
        ClientMessage::LoadSaveFile(b"SECOND-CORRUPT".to_vec()),
        &connection.handle,
    )
    .await
    .expect("failure is reported over the open connection");

    let messages = connection.drain();
    assert_eq!(messages.len(), 1);
    match &messages[0] {
        ServerMessage::Error(text) => {
            assert!(text.contains("checksum mismatch"), "unexpected: {}", text);
        }
        other => panic!("Expected ERROR envelope, got {:?}", other),
    }

    let loaded = session.current().expect("previous session survives");
    assert_eq!(loaded.summary().size, 5, "summary still from the first load");
    assert_eq!(loaded.players().len(), 1);
}

/// An update with both patch kinds empty is acknowledged without touching
/// the engine, and the listing comes back unchanged.
#[tokio::test]
async fn empty_update_is_acknowledged() {
    let engine = MockEngine::with_players(vec![player_id()]);
    let mut session = SessionSlot::new();
    let mut connection = TestConnection::new();

    dispatch(
        &engine,
        &mut session,
        ClientMessage::LoadSaveFile(b"DATA".to_vec()),
        &connection.handle,
    )
    .await
    .expect("load succeeds");
    let listing_before = match connection.drain().pop() {
        Some(ServerMessage::GetPlayers(players)) => players,
        other => panic!("Expected GET_PLAYERS envelope, got {:?}", other),
    };

    dispatch(
        &engine,
        &mut session,
        ClientMessage::UpdateSaveFile(PatchSet::default()),
        &connection.handle,
    )
    .await
    .expect("no-op update succeeds");

    let messages = connection.drain();
    assert_eq!(messages.len(), 2, "ack + listing: {:?}", messages);
    match &messages[0] {
        ServerMessage::UpdateSaveFile(ack) => assert_eq!(ack, "Changes saved"),
        other => panic!("Expected UPDATE_SAVE_FILE envelope, got {:?}", other),
    }
    match &messages[1] {
        ServerMessage::GetPlayers(players) => {
            assert_eq!(players, &listing_before, "listing unchanged by a no-op");
        }
        other => panic!("Expected GET_PLAYERS envelope, got {:?}", other),
    }

    let save = session.current().expect("still loaded").save();
    assert!(save.applied_order.is_empty(), "engine was never called");
}

/// The runner serves one connection until the inbound stream closes; the
/// session dies with its connection scope.
#[tokio::test]
async fn runner_serves_until_inbound_closes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let engine = MockEngine::with_players(vec![player_id()]);
    let runner = SessionRunner::new(engine);
    let mut connection = TestConnection::new();
    let (inbound_tx, inbound_rx) = tokio::sync::mpsc::channel(8);

    let task = tokio::spawn(runner.run(inbound_rx, connection.handle.clone()));

    inbound_tx
        .send(ClientMessage::LoadSaveFile(b"RUNNER".to_vec()))
        .await
        .expect("inbound send");
    inbound_tx
        .send(ClientMessage::DownloadSaveFile)
        .await
        .expect("inbound send");
    drop(inbound_tx);

    task.await.expect("runner task completes");

    let messages = connection.drain();
    log::info!("runner produced {} envelopes", messages.len());
    let responses: Vec<&ServerMessage> =
        messages.iter().filter(|message| !message.is_progress()).collect();
    assert_eq!(
        responses.len(),
        3,
        "load summary + listing + download: {:?}",
        messages
    );
    match responses[2] {
        ServerMessage::DownloadSaveFile(payload) => assert_eq!(payload.name, "Level.sav"),
        other => panic!("Expected DOWNLOAD_SAVE_FILE envelope, got {:?}", other),
    }
}
