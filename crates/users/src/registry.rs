use std::sync::{Arc, LazyLock};

use eventrelay_events::{Dispatcher, EventRegistry};

use crate::{UserCreated, UserDeleted, UserEvent, UserUpdated};

pub const USER_CREATED: &str = "UserCreated";
pub const USER_UPDATED: &str = "UserUpdated";
pub const USER_DELETED: &str = "UserDeleted";

static USER_EVENTS: LazyLock<Arc<EventRegistry<UserEvent>>> = LazyLock::new(|| {
    Arc::new(
        EventRegistry::new()
            .register::<UserCreated>(USER_CREATED)
            .register::<UserUpdated>(USER_UPDATED)
            .register::<UserDeleted>(USER_DELETED),
    )
});

/// Process-wide user event registry, built on first use and read-only after.
pub fn user_event_registry() -> Arc<EventRegistry<UserEvent>> {
    Arc::clone(&USER_EVENTS)
}

/// Dispatcher over [`user_event_registry`].
pub fn user_dispatcher() -> Dispatcher<UserEvent> {
    Dispatcher::new(user_event_registry())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventrelay_core::DispatchError;
    use eventrelay_events::{Envelope, EventHandler};
    use proptest::prelude::*;
    use serde_json::json;

    fn dispatch(raw: &str) -> Result<String, DispatchError> {
        user_dispatcher()
            .dispatch(raw.as_bytes())
            .map(|h| h.into_message())
    }

    #[test]
    fn registers_exactly_the_three_user_events() {
        let reg = user_event_registry();
        assert_eq!(
            reg.discriminators().collect::<Vec<_>>(),
            vec!["UserCreated", "UserDeleted", "UserUpdated"]
        );
    }

    #[test]
    fn registry_is_shared() {
        assert!(Arc::ptr_eq(&user_event_registry(), &user_event_registry()));
    }

    #[test]
    fn user_created_end_to_end() {
        assert_eq!(
            dispatch(r#"{"type":"UserCreated","data":{"email":"a@b.com","name":"Ann"}}"#).unwrap(),
            "[Handled] User Created: Ann, a@b.com"
        );
    }

    #[test]
    fn user_deleted_end_to_end() {
        assert_eq!(
            dispatch(r#"{"type":"UserDeleted","data":{"id":42}}"#).unwrap(),
            "[Handled] User with the 42 deleted"
        );
    }

    #[test]
    fn user_updated_end_to_end() {
        assert_eq!(
            dispatch(r#"{"type":"UserUpdated","data":{"id":7,"email":"a@b.com","name":"Ann"}}"#)
                .unwrap(),
            "[Handled] User Updated: Ann, a@b.com"
        );
        // id is optional
        assert_eq!(
            dispatch(r#"{"type":"UserUpdated","data":{"email":"a@b.com","name":"Ann"}}"#).unwrap(),
            "[Handled] User Updated: Ann, a@b.com"
        );
    }

    #[test]
    fn unknown_type_end_to_end() {
        assert_eq!(
            dispatch(r#"{"type":"UserArchived","data":{}}"#).unwrap_err(),
            DispatchError::UnknownEventType("UserArchived".to_string())
        );
    }

    #[test]
    fn missing_name_end_to_end() {
        match dispatch(r#"{"type":"UserCreated","data":{"email":"a@b.com"}}"#).unwrap_err() {
            DispatchError::MalformedPayload { discriminator, detail } => {
                assert_eq!(discriminator, "UserCreated");
                assert!(detail.contains("name"), "detail was {detail}");
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn invalid_bytes_end_to_end() {
        let err = user_dispatcher().dispatch(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DispatchError::EnvelopeDecode(_)));
    }

    #[test]
    fn discriminator_lookup_is_case_sensitive() {
        assert_eq!(
            dispatch(r#"{"type":"usercreated","data":{"email":"a","name":"b"}}"#).unwrap_err(),
            DispatchError::UnknownEventType("usercreated".to_string())
        );
    }

    #[test]
    fn payload_field_case_does_not_matter() {
        let dispatcher = user_dispatcher();
        let upper = dispatcher
            .factory()
            .create_handler(Envelope::new(USER_CREATED, json!({ "EMAIL": "a@b.com", "Name": "X" })))
            .unwrap();
        let lower = dispatcher
            .factory()
            .create_handler(Envelope::new(USER_CREATED, json!({ "email": "a@b.com", "name": "X" })))
            .unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn negative_id_is_malformed() {
        let err = dispatch(r#"{"type":"UserDeleted","data":{"id":-1}}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_payload");
    }

    #[test]
    fn string_id_is_malformed() {
        let err = dispatch(r#"{"type":"UserDeleted","data":{"id":"42"}}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed_payload");
    }

    #[test]
    fn deleted_shape_is_not_inferred_from_created_payload() {
        // A UserDeleted-shaped payload under UserCreated is malformed, not
        // silently routed to the deleted handler.
        let err = dispatch(r#"{"type":"UserCreated","data":{"id":42}}"#).unwrap_err();
        assert_eq!(err.discriminator(), Some("UserCreated"));
        assert_eq!(err.kind(), "malformed_payload");
    }

    #[test]
    fn concurrent_dispatch_gives_independent_outcomes() {
        let dispatcher = user_dispatcher();
        let inputs: Vec<String> = (0..32u64)
            .map(|i| match i % 4 {
                0 => format!(r#"{{"type":"UserDeleted","data":{{"id":{i}}}}}"#),
                1 => r#"{"type":"UserArchived","data":{}}"#.to_string(),
                2 => format!(r#"{{"type":"UserCreated","data":{{"email":"u{i}@x.io","name":"U{i}"}}}}"#),
                _ => "not json".to_string(),
            })
            .collect();

        let outcomes: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|raw| {
                    let d = &dispatcher;
                    s.spawn(move || d.dispatch(raw.as_bytes()))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(outcomes.len(), inputs.len());
        for (i, outcome) in outcomes.iter().enumerate() {
            let i = i as u64;
            match i % 4 {
                0 => assert_eq!(
                    outcome.as_ref().unwrap().message(),
                    format!("[Handled] User with the {i} deleted")
                ),
                1 => assert_eq!(
                    outcome.as_ref().unwrap_err(),
                    &DispatchError::UnknownEventType("UserArchived".to_string())
                ),
                2 => assert_eq!(
                    outcome.as_ref().unwrap().message(),
                    format!("[Handled] User Created: U{i}, u{i}@x.io")
                ),
                _ => assert_eq!(outcome.as_ref().unwrap_err().kind(), "envelope_decode"),
            }
        }
    }

    proptest! {
        /// Property: a valid created payload always handles to a non-empty
        /// message derived from its fields, and handling is repeatable.
        #[test]
        fn valid_created_payloads_handle_deterministically(
            email in "\\PC{0,24}",
            name in "\\PC{0,24}",
        ) {
            let env = Envelope::new(USER_CREATED, json!({ "email": email.clone(), "name": name.clone() }));
            let ev = user_dispatcher().factory().create_handler(env).unwrap();
            let first = ev.handle_event().unwrap();
            prop_assert!(!first.is_empty());
            prop_assert_eq!(&first, &format!("[Handled] User Created: {name}, {email}"));
            prop_assert_eq!(ev.handle_event().unwrap(), first);
        }

        /// Property: any deleted id round-trips into the message.
        #[test]
        fn valid_deleted_payloads_handle_deterministically(id in any::<u64>()) {
            let raw = format!(r#"{{"type":"UserDeleted","data":{{"id":{id}}}}}"#);
            let out = user_dispatcher().dispatch(raw.as_bytes()).unwrap();
            prop_assert_eq!(out.message(), format!("[Handled] User with the {id} deleted"));
        }

        /// Property: unregistered discriminators fail with exactly that discriminator.
        #[test]
        fn unregistered_discriminators_are_unknown(d in "[A-Za-z]{1,16}") {
            prop_assume!(!user_event_registry().contains(&d));
            let err = user_dispatcher()
                .dispatch_envelope(Envelope::new(d.clone(), json!({ "email": "a", "name": "b", "id": 1 })))
                .unwrap_err();
            prop_assert_eq!(err, DispatchError::UnknownEventType(d));
        }
    }
}
