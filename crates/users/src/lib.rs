//! User lifecycle events.
//!
//! The three variants a user-queue consumer understands, their handling
//! behavior, and the process-wide registry that maps discriminators to them.

pub mod event;
pub mod registry;

pub use event::{UserCreated, UserDeleted, UserEvent, UserUpdated};
pub use registry::{USER_CREATED, USER_DELETED, USER_UPDATED, user_dispatcher, user_event_registry};
