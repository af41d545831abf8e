use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{
    create_frame, error_message, expect_no_outbound, join_frame, next_outbound, send_frame,
};

#[tokio::test]
async fn test_join_missing_room_reports_error() {
    init_tracing();

    let (relay_tx, mut outbound_rx, signaling) = create_test_relay();
    let phone = signaling.connect();

    send_frame(&relay_tx, phone, join_frame("ghost")).await.unwrap();

    let reply = next_outbound(&mut outbound_rx).await.expect("error reply");
    assert_eq!(reply.to, phone);
    assert!(!error_message(&reply.text).unwrap().is_empty());
    expect_no_outbound(&mut outbound_rx).await.unwrap();

    // "ghost" was not created as a side effect: a second join fails the same way
    let other = signaling.connect();
    send_frame(&relay_tx, other, join_frame("ghost")).await.unwrap();
    let reply = next_outbound(&mut outbound_rx).await.expect("error reply");
    assert_eq!(reply.to, other);
    assert!(error_message(&reply.text).is_ok());
}

#[tokio::test]
async fn test_failed_join_leaves_connection_free_to_join_later() {
    init_tracing();

    let (relay_tx, mut outbound_rx, signaling) = create_test_relay();
    let host = signaling.connect();
    let phone = signaling.connect();

    send_frame(&relay_tx, phone, join_frame("abc123")).await.unwrap();
    let reply = next_outbound(&mut outbound_rx).await.unwrap();
    assert_eq!(reply.to, phone);

    send_frame(&relay_tx, host, create_frame("abc123")).await.unwrap();
    send_frame(&relay_tx, phone, join_frame("abc123")).await.unwrap();

    let joined = next_outbound(&mut outbound_rx).await.unwrap();
    assert_eq!(joined.to, host);
    assert_eq!(joined.text, r#"{"type":"user-joined"}"#);
}
