//! Session: script time zone and the current user.

use std::cell::RefCell;
use std::rc::Rc;

/// Time zone reported for every script
pub const SCRIPT_TIME_ZONE: &str = "Asia/Taipei";

/// Email used when none is configured
pub const DEFAULT_EMAIL: &str = "test@example.com";

/// Who is running the script.
///
/// The active and effective user are always the same account.
#[derive(Debug, Clone)]
pub struct Session {
    email: Rc<RefCell<String>>,
}

impl Session {
    pub fn new<S: Into<String>>(email: S) -> Self {
        Self {
            email: Rc::new(RefCell::new(email.into())),
        }
    }

    pub fn script_time_zone(&self) -> &'static str {
        SCRIPT_TIME_ZONE
    }

    pub fn active_user_email(&self) -> String {
        self.email.borrow().clone()
    }

    pub fn effective_user_email(&self) -> String {
        self.email.borrow().clone()
    }

    /// Switch the signed-in account; every clone sees the change.
    pub fn set_email<S: Into<String>>(&self, email: S) {
        *self.email.borrow_mut() = email.into();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL)
    }
}
