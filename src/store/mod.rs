//! Document store and change notification.
//!
//! [`Document`] is the single owner of every entity. [`NotificationHub`]
//! lets observers attach to a [`DataPath`] and be told, synchronously and in
//! order, when the data at that path was replaced.

mod document;
mod notify;

pub use document::{Document, Snapshot, HEAD_SCOPE};
pub use notify::{Change, DataPath, Listener, NotificationHub, SubscriptionId};
