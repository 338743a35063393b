//! Alerting System
//!
//! Provides the cooldown gate deciding whether a notification attempt is
//! permitted now, and the email notifier that dispatches alerts.

mod gate;
mod notifier;

pub use gate::CooldownGate;
pub use notifier::{EmailConfig, EmailNotifier, Notifier, NotifyError};
