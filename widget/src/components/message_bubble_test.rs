use super::*;

fn entry(sender: Sender, timestamp: Option<&str>) -> Entry {
    Entry {
        sender,
        content: "hello".to_owned(),
        timestamp: timestamp.map(ToOwned::to_owned),
        markdown: false,
    }
}

#[test]
fn bubble_class_carries_sender_modifier() {
    assert_eq!(bubble_class(Sender::User), "message message--user");
    assert_eq!(bubble_class(Sender::Bot), "message message--bot");
    assert_eq!(bubble_class(Sender::Agent), "message message--agent");
}

#[test]
fn agent_messages_show_wall_clock_time() {
    let label = agent_time_label(&entry(Sender::Agent, Some("2024-05-01 14:07:33")));
    assert_eq!(label.as_deref(), Some("14:07"));
}

#[test]
fn agent_message_without_timestamp_has_no_label() {
    assert_eq!(agent_time_label(&entry(Sender::Agent, None)), None);
    assert_eq!(agent_time_label(&entry(Sender::Agent, Some("yesterday"))), None);
}

#[test]
fn non_agent_messages_never_show_time() {
    assert_eq!(agent_time_label(&entry(Sender::Bot, Some("2024-05-01T10:15:00Z"))), None);
}
