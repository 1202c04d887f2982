// crates/relay-protocol/tests/json_frames.rs
//
// Exercises the exact frame shapes clients send and expect back,
// including the historical camelCase count fields.

use relay_core::{ClientEvent, HistoryEntry, ServerEvent};
use relay_protocol::{decode_input, decode_output, encode_output};
use serde_json::Value;

fn as_json(event: &ServerEvent) -> Value {
    let text = encode_output(event).expect("encode");
    serde_json::from_str(&text).expect("encoded frame must be valid JSON")
}

#[test]
fn decodes_every_inbound_frame_shape() {
    assert_eq!(
        decode_input(r#"{"type":"register","username":"alice"}"#).unwrap(),
        ClientEvent::Register {
            username: "alice".to_string()
        }
    );
    assert_eq!(
        decode_input(r#"{"type":"message","text":"hi"}"#).unwrap(),
        ClientEvent::Message {
            text: "hi".to_string()
        }
    );
    assert_eq!(decode_input(r#"{"type":"skip"}"#).unwrap(), ClientEvent::Skip);
    assert_eq!(
        decode_input(r#"{"type":"direct_message","recipient":"bob","message":"yo"}"#).unwrap(),
        ClientEvent::DirectMessage {
            recipient: "bob".to_string(),
            message: "yo".to_string()
        }
    );
    assert_eq!(
        decode_input(r#"{"type":"get_users"}"#).unwrap(),
        ClientEvent::GetUsers
    );
    assert_eq!(
        decode_input(r#"{"type":"get_conversation","with":"bob"}"#).unwrap(),
        ClientEvent::GetConversation {
            with: "bob".to_string()
        }
    );
}

#[test]
fn extra_fields_are_tolerated() {
    let event = decode_input(r#"{"type":"message","text":"hi","clientVersion":"2.1"}"#).unwrap();
    assert_eq!(
        event,
        ClientEvent::Message {
            text: "hi".to_string()
        }
    );
}

#[test]
fn garbage_frames_fail_to_decode() {
    assert!(decode_input("not json at all").is_err());
    assert!(decode_input("").is_err());
    assert!(decode_input(r#"{"username":"alice"}"#).is_err(), "missing type");
    assert!(decode_input(r#"{"type":"make_coffee"}"#).is_err(), "unknown type");
    assert!(
        decode_input(r#"{"type":"register"}"#).is_err(),
        "missing required field"
    );
    assert!(
        decode_input(r#"{"type":"direct_message","recipient":"bob"}"#).is_err(),
        "missing message field"
    );
    assert!(decode_input(r#"[1,2,3]"#).is_err());
}

#[test]
fn registered_frame_uses_camel_case_counts() {
    let json = as_json(&ServerEvent::Registered {
        username: "alice".to_string(),
        online_users: vec!["bob".to_string(), "carol".to_string()],
        total_users: 3,
    });

    assert_eq!(json["type"], "registered");
    assert_eq!(json["username"], "alice");
    assert_eq!(json["onlineUsers"], serde_json::json!(["bob", "carol"]));
    assert_eq!(json["totalUsers"], 3);
    assert!(json.get("online_users").is_none(), "no snake_case leak");
}

#[test]
fn pairing_frames_have_the_expected_tags() {
    let json = as_json(&ServerEvent::Paired {
        partner: "bob".to_string(),
    });
    assert_eq!(json["type"], "paired");
    assert_eq!(json["partner"], "bob");

    assert_eq!(as_json(&ServerEvent::Skipped)["type"], "skipped");
    assert_eq!(as_json(&ServerEvent::PartnerLeft)["type"], "partner_left");

    let json = as_json(&ServerEvent::message("alice", "hi"));
    assert_eq!(json["type"], "message");
    assert_eq!(json["from"], "alice");
    assert_eq!(json["text"], "hi");
}

#[test]
fn roster_frames_have_the_expected_fields() {
    let json = as_json(&ServerEvent::UserJoined {
        username: "dave".to_string(),
        total_users: 4,
    });
    assert_eq!(json["type"], "user_joined");
    assert_eq!(json["totalUsers"], 4);

    let json = as_json(&ServerEvent::UserLeft {
        username: "dave".to_string(),
        total_users: 3,
    });
    assert_eq!(json["type"], "user_left");

    let json = as_json(&ServerEvent::UserList {
        users: vec!["bob".to_string()],
        total_users: 2,
    });
    assert_eq!(json["type"], "user_list");
    assert_eq!(json["users"], serde_json::json!(["bob"]));
}

#[test]
fn direct_message_frames_carry_one_timestamp() {
    let ts = "2026-01-02T03:04:05.678Z";

    let json = as_json(&ServerEvent::DirectMessage {
        from: "alice".to_string(),
        message: "hi".to_string(),
        timestamp: ts.to_string(),
    });
    assert_eq!(json["type"], "direct_message");
    assert_eq!(json["timestamp"], ts);

    let json = as_json(&ServerEvent::MessageSent {
        to: "bob".to_string(),
        message: "hi".to_string(),
        timestamp: ts.to_string(),
    });
    assert_eq!(json["type"], "message_sent");
    assert_eq!(json["to"], "bob");
    assert_eq!(json["timestamp"], ts);
}

#[test]
fn conversation_history_nests_plain_entries() {
    let json = as_json(&ServerEvent::ConversationHistory {
        with: "bob".to_string(),
        history: vec![HistoryEntry {
            sender: "alice".to_string(),
            message: "hi".to_string(),
            timestamp: "2026-01-02T03:04:05.678Z".to_string(),
        }],
    });

    assert_eq!(json["type"], "conversation_history");
    assert_eq!(json["with"], "bob");
    assert_eq!(json["history"][0]["sender"], "alice");
    assert_eq!(json["history"][0]["message"], "hi");
    assert_eq!(json["history"][0]["timestamp"], "2026-01-02T03:04:05.678Z");
}

#[test]
fn error_frame_carries_the_reason() {
    let json = as_json(&ServerEvent::error("User not online"));
    assert_eq!(json["type"], "error");
    assert_eq!(json["message"], "User not online");
}

#[test]
fn client_side_decode_understands_server_frames() {
    let event = decode_output(r#"{"type":"paired","partner":"bob"}"#).unwrap();
    assert_eq!(
        event,
        ServerEvent::Paired {
            partner: "bob".to_string()
        }
    );

    let event = decode_output(
        r#"{"type":"registered","username":"a","onlineUsers":[],"totalUsers":1}"#,
    )
    .unwrap();
    assert_eq!(
        event,
        ServerEvent::Registered {
            username: "a".to_string(),
            online_users: vec![],
            total_users: 1
        }
    );
}
