//! Configuration constants for the PeriodQuiz control core
//!
//! This module contains the limits enforced on events, periods and
//! questions, along with the runtime knobs of the notification and
//! authentication collaborators.

/// Event configuration constants
pub mod event {
    /// Maximum length of an event name in characters
    pub const MAX_NAME_LENGTH: usize = 200;
    /// Maximum number of periods allowed in a single event
    pub const MAX_PERIODS: usize = 20;
}

/// Period configuration constants
pub mod period {
    /// Minimum length of a period name in characters
    pub const MIN_NAME_LENGTH: usize = 1;
    /// Maximum length of a period name in characters
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum number of questions attached to a single period
    pub const MAX_QUESTIONS: usize = 100;
}

/// Question configuration constants
pub mod question {
    /// Maximum length of a question text in characters
    pub const MAX_TEXT_LENGTH: usize = 500;
}

/// Notification channel configuration constants
pub mod notify {
    /// Number of control updates buffered per subscriber before the oldest are dropped
    pub const CHANNEL_CAPACITY: usize = 64;
}

/// Admin credential configuration
pub mod admin {
    /// Environment variable holding the admin username
    pub const USERNAME_ENV: &str = "PERIODQUIZ_ADMIN_USERNAME";
    /// Environment variable holding the admin password
    pub const PASSWORD_ENV: &str = "PERIODQUIZ_ADMIN_PASSWORD";
}
