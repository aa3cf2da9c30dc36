// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for short-lived feedback (copy result, load warnings).
//!
//! - [`notification`]: a message with a severity and an auto-dismiss rule
//! - [`manager`]: queueing and expiry, at most a few visible at once
//! - [`toast`]: the bottom-right overlay

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
