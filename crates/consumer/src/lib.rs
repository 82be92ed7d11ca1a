//! User-queue consumer: wires a transport to the user event dispatcher.

pub mod app;
