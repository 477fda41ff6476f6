//! The notification subsystem, as seen by the preferences.
//!
//! Rendering a volume notification is up to the main application
//! (see `MainControl::update_notify()`). The preferences only need to
//! close the current popup and ask the notification server what it
//! supports.


use crate::errors::*;



#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Display capabilities of the notification server.
pub struct NotifyCaps {
    /// The server honours a requested popup position.
    pub position: bool,
    /// The server honours a requested timeout.
    pub timeout: bool,
}

impl NotifyCaps {
    /// Both position and timeout are supported.
    pub fn all(&self) -> bool {
        return self.position && self.timeout;
    }
}



/// A notification backend, e.g. libnotify.
pub trait Notifier {
    /// Query the capabilities of the notification server.
    fn capabilities(&self) -> NotifyCaps;

    /// Close the currently shown notification, if any.
    fn close(&self) -> Result<()>;
}
