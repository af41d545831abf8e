use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{create_frame, expect_no_outbound, join_frame, next_outbound, send_frame};

#[tokio::test]
async fn test_create_then_join_notifies_receiver() {
    init_tracing();

    let (relay_tx, mut outbound_rx, signaling) = create_test_relay();
    let host = signaling.connect();
    let phone = signaling.connect();

    send_frame(&relay_tx, host, create_frame("abc123")).await.unwrap();
    send_frame(&relay_tx, phone, join_frame("abc123")).await.unwrap();

    let joined = next_outbound(&mut outbound_rx).await.expect("user-joined");
    assert_eq!(joined.to, host);
    assert_eq!(joined.text, r#"{"type":"user-joined"}"#);

    // Nothing goes back to the joiner on success
    expect_no_outbound(&mut outbound_rx).await.unwrap();
    assert!(signaling.sent_to(&phone).await.is_empty());
}

#[tokio::test]
async fn test_create_twice_hands_room_to_last_receiver() {
    init_tracing();

    let (relay_tx, mut outbound_rx, signaling) = create_test_relay();
    let first_host = signaling.connect();
    let second_host = signaling.connect();
    let phone = signaling.connect();

    send_frame(&relay_tx, first_host, create_frame("abc123")).await.unwrap();
    send_frame(&relay_tx, second_host, create_frame("abc123")).await.unwrap();
    send_frame(&relay_tx, phone, join_frame("abc123")).await.unwrap();

    let joined = next_outbound(&mut outbound_rx).await.expect("user-joined");
    assert_eq!(joined.to, second_host);
    assert!(signaling.sent_to(&first_host).await.is_empty());
}
