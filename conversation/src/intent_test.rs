use super::*;

#[test]
fn intent_values_round_trip() {
    for intent in Intent::ALL {
        assert_eq!(Intent::from_value(intent.value()), Some(intent));
    }
    assert_eq!(Intent::from_value("mortgage"), None);
}

#[test]
fn pending_intent_replays_backend_value() {
    assert_eq!(PendingQuery::Intent(Intent::Emi).message(), "emi");
    assert_eq!(PendingQuery::Text("when is my next due date".to_owned()).message(), "when is my next due date");
}

#[test]
fn intent_route_defaults_to_chat() {
    assert_eq!(IntentRoute::default(), IntentRoute::Chat);
}
