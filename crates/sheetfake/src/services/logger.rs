use std::cell::RefCell;
use std::rc::Rc;

/// Script log sink.
///
/// Messages are kept for inspection and also emitted as `tracing` events.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    messages: Rc<RefCell<Vec<String>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log<S: Into<String>>(&self, message: S) {
        let message = message.into();
        tracing::info!(target: "sheetfake::logger", "{message}");
        self.messages.borrow_mut().push(message);
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }

    /// All messages so far, newline separated.
    pub fn contents(&self) -> String {
        self.messages.borrow().join("\n")
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_clear() {
        let logger = Logger::new();
        logger.log("first");
        logger.clone().log(String::from("second"));
        assert_eq!(logger.contents(), "first\nsecond");

        logger.clear();
        assert_eq!(logger.contents(), "");
        assert!(logger.messages().is_empty());
    }
}
