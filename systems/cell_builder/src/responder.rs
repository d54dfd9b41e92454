//! Interaction payloads and the per-entity responders that deliver them.

use std::{fmt, sync::Arc};

use glam::Vec2;

/// Minimum simulated time, in seconds, between two delivered contacts.
pub const CONTACT_INTERVAL_SECONDS: f32 = 1.0;

/// Sustained physical contact reported by the caller's physics layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Simulated time of the contact in seconds.
    pub time: f32,
    /// Contact point in viewport space.
    pub point: Vec2,
}

impl Contact {
    /// Creates a new contact payload.
    #[must_use]
    pub const fn new(time: f32, point: Vec2) -> Self {
        Self { time, point }
    }
}

/// Entry of another body into a trigger footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlap {
    /// Simulated time of the entry in seconds.
    pub time: f32,
    /// Position of the entering body in viewport space.
    pub position: Vec2,
}

impl Overlap {
    /// Creates a new overlap payload.
    #[must_use]
    pub const fn new(time: f32, position: Vec2) -> Self {
        Self { time, position }
    }
}

/// Callback invoked on sustained contact with a solid cell.
pub type ContactCallback = Arc<dyn Fn(&Contact) -> bool + Send + Sync>;

/// Callback invoked when a body enters a trigger cell.
pub type OverlapCallback = Arc<dyn Fn(&Overlap) -> bool + Send + Sync>;

/// Interaction behaviour attached to a built cell.
#[derive(Clone)]
pub enum Responder {
    /// Cell without interactions.
    Inert,
    /// Solid cell delivering rate-limited contacts.
    Contact {
        /// Callback to deliver to, or `None` for a no-op.
        callback: Option<ContactCallback>,
        /// Simulated time of the last delivered contact.
        last_delivered: Option<f32>,
    },
    /// Trigger cell delivering every overlap entry.
    Overlap {
        /// Callback to deliver to, or `None` for a no-op.
        callback: Option<OverlapCallback>,
    },
}

impl Responder {
    /// Delivers a sustained contact.
    ///
    /// Returns `None` when the cell is not solid or when the previous delivery
    /// happened no more than [`CONTACT_INTERVAL_SECONDS`] earlier. A missing
    /// callback always succeeds.
    pub fn contact(&mut self, contact: &Contact) -> Option<bool> {
        let Responder::Contact {
            callback,
            last_delivered,
        } = self
        else {
            return None;
        };

        if let Some(last) = *last_delivered {
            if contact.time <= last + CONTACT_INTERVAL_SECONDS {
                return None;
            }
        }

        *last_delivered = Some(contact.time);
        Some(callback.as_ref().map_or(true, |callback| callback(contact)))
    }

    /// Delivers an overlap entry. Returns `None` when the cell is not a trigger.
    #[must_use]
    pub fn overlap(&self, overlap: &Overlap) -> Option<bool> {
        match self {
            Responder::Overlap { callback } => {
                Some(callback.as_ref().map_or(true, |callback| callback(overlap)))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Responder::Inert => f.write_str("Inert"),
            Responder::Contact {
                callback,
                last_delivered,
            } => f
                .debug_struct("Contact")
                .field("callback", &callback.is_some())
                .field("last_delivered", last_delivered)
                .finish(),
            Responder::Overlap { callback } => f
                .debug_struct("Overlap")
                .field("callback", &callback.is_some())
                .finish(),
        }
    }
}
