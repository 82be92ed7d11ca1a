use eventrelay_core::HandlingError;

/// The single capability every decoded event exposes.
///
/// Decoding an event *is* constructing its handler: there is no separate
/// handler object, the event value carries both the fields and the behavior.
///
/// Implementations must be pure. Calling `handle_event` twice on the same
/// value yields the same result both times.
pub trait EventHandler: core::fmt::Debug + Send + Sync {
    /// Produce a human-readable outcome describing the handled action.
    fn handle_event(&self) -> Result<String, HandlingError>;
}

impl<H> EventHandler for Box<H>
where
    H: EventHandler + ?Sized,
{
    fn handle_event(&self) -> Result<String, HandlingError> {
        (**self).handle_event()
    }
}
