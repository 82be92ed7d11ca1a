use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use eventrelay_core::HandlingError;
use eventrelay_events::{Event, EventHandler};

use crate::registry::{USER_CREATED, USER_DELETED, USER_UPDATED};

/// Event: UserCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreated {
    pub email: String,
    pub name: String,
}

/// Event: UserUpdated.
///
/// Requires the same fields as [`UserCreated`]. Producers may also send the
/// id of the updated user; it is carried but not required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub email: String,
    pub name: String,
}

/// Event: UserDeleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeleted {
    pub id: u64,
}

impl EventHandler for UserCreated {
    fn handle_event(&self) -> Result<String, HandlingError> {
        Ok(format!("[Handled] User Created: {}, {}", self.name, self.email))
    }
}

impl EventHandler for UserUpdated {
    fn handle_event(&self) -> Result<String, HandlingError> {
        Ok(format!("[Handled] User Updated: {}, {}", self.name, self.email))
    }
}

impl EventHandler for UserDeleted {
    fn handle_event(&self) -> Result<String, HandlingError> {
        Ok(format!("[Handled] User with the {} deleted", self.id))
    }
}

/// One decoded user event. The active variant is chosen by the envelope's
/// discriminator alone, never by the payload's shape.
///
/// Serializes as the bare payload of the active variant, which is what goes
/// into an envelope's `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserEvent {
    Created(UserCreated),
    Updated(UserUpdated),
    Deleted(UserDeleted),
}

impl From<UserCreated> for UserEvent {
    fn from(value: UserCreated) -> Self {
        UserEvent::Created(value)
    }
}

impl From<UserUpdated> for UserEvent {
    fn from(value: UserUpdated) -> Self {
        UserEvent::Updated(value)
    }
}

impl From<UserDeleted> for UserEvent {
    fn from(value: UserDeleted) -> Self {
        UserEvent::Deleted(value)
    }
}

impl Event for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Created(_) => USER_CREATED,
            UserEvent::Updated(_) => USER_UPDATED,
            UserEvent::Deleted(_) => USER_DELETED,
        }
    }

    fn to_payload(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl EventHandler for UserEvent {
    fn handle_event(&self) -> Result<String, HandlingError> {
        match self {
            UserEvent::Created(e) => e.handle_event(),
            UserEvent::Updated(e) => e.handle_event(),
            UserEvent::Deleted(e) => e.handle_event(),
        }
    }
}
