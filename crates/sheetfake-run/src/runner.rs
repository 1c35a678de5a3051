//! The emulated client/server boundary.
//!
//! [`ScriptRun`] plays the part of the client-side call object. Invoking an
//! operation runs it synchronously, checks that the result could survive the trip,
//! and schedules exactly one handler delivery on the [`TaskQueue`]. Nothing is
//! delivered until the queue is drained.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use sheetfake_run::{OperationRegistry, RunOptions, ScriptRun, TaskQueue, Value};
//!
//! let registry = OperationRegistry::new().with("ping", |_: &[Value]| Ok(Value::from("pong")));
//! let queue = TaskQueue::new();
//! let run = ScriptRun::new(registry, RunOptions::default(), queue.clone());
//!
//! let seen = Rc::new(RefCell::new(None));
//! let slot = seen.clone();
//! run.with_success_handler(move |v| *slot.borrow_mut() = Some(v))
//!     .invoke("ping", vec![]);
//!
//! assert!(seen.borrow().is_none()); // never inline
//! queue.run_until_idle();
//! assert_eq!(*seen.borrow(), Some(Value::from("pong")));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::check::check_serializable;
use crate::error::{Result, RunError};
use crate::queue::TaskQueue;
use crate::registry::OperationRegistry;
use crate::value::Value;

/// Handler receiving a delivered result.
pub type SuccessHandler = Rc<dyn Fn(Value)>;

/// Handler receiving a delivered error.
pub type FailureHandler = Rc<dyn Fn(RunError)>;

/// Boundary settings, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Reject non-serializable results instead of collapsing them to `null`.
    pub strict: bool,
}

impl RunOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Lifecycle of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Invoked,
    Resolved,
    Rejected,
}

impl CallState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CallState::Resolved | CallState::Rejected)
    }
}

/// What an invocation will deliver.
enum Outcome {
    Success(Value),
    Failure(RunError),
}

struct CallInner {
    name: String,
    state: CallState,
    delivered: bool,
    success: Option<SuccessHandler>,
    failure: Option<FailureHandler>,
}

/// Handle to a single invocation.
///
/// Handlers may still be replaced through the handle until the delivery runs.
#[derive(Clone)]
pub struct Call {
    inner: Rc<RefCell<CallInner>>,
}

impl Call {
    fn new(name: &str, success: Option<SuccessHandler>, failure: Option<FailureHandler>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CallInner {
                name: name.to_string(),
                state: CallState::Idle,
                delivered: false,
                success,
                failure,
            })),
        }
    }

    /// Name of the invoked operation.
    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn state(&self) -> CallState {
        self.inner.borrow().state
    }

    /// Whether a handler has already been called for this invocation.
    pub fn is_delivered(&self) -> bool {
        self.inner.borrow().delivered
    }

    /// Replace the success handler; ignored once delivered.
    pub fn with_success_handler<F: Fn(Value) + 'static>(&self, handler: F) -> &Self {
        let mut inner = self.inner.borrow_mut();
        if inner.delivered {
            tracing::debug!("{}: success handler registered after delivery", inner.name);
        } else {
            inner.success = Some(Rc::new(handler));
        }
        drop(inner);
        self
    }

    /// Replace the failure handler; ignored once delivered.
    pub fn with_failure_handler<F: Fn(RunError) + 'static>(&self, handler: F) -> &Self {
        let mut inner = self.inner.borrow_mut();
        if inner.delivered {
            tracing::debug!("{}: failure handler registered after delivery", inner.name);
        } else {
            inner.failure = Some(Rc::new(handler));
        }
        drop(inner);
        self
    }

    fn set_state(&self, state: CallState) {
        self.inner.borrow_mut().state = state;
    }

    /// Run on a later turn: hand the outcome to the matching handler, once.
    fn deliver(&self, outcome: Outcome) {
        let (name, success, failure) = {
            let mut inner = self.inner.borrow_mut();
            if inner.delivered {
                return;
            }
            inner.delivered = true;
            (inner.name.clone(), inner.success.clone(), inner.failure.clone())
        };
        // handlers run without the call borrowed so they may touch the handle
        match outcome {
            Outcome::Success(value) => match success {
                Some(handler) => handler(value),
                None => tracing::debug!("{name}: result dropped, no success handler"),
            },
            Outcome::Failure(error) => match failure {
                Some(handler) => handler(error),
                None => tracing::debug!("{name}: error dropped, no failure handler: {error}"),
            },
        }
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Call")
            .field("name", &inner.name)
            .field("state", &inner.state)
            .field("delivered", &inner.delivered)
            .finish()
    }
}

/// The client-side entry point to server operations.
#[derive(Clone)]
pub struct ScriptRun {
    registry: Rc<OperationRegistry>,
    options: RunOptions,
    queue: TaskQueue,
    diagnostics: Rc<RefCell<Vec<String>>>,
}

impl ScriptRun {
    pub fn new(registry: OperationRegistry, options: RunOptions, queue: TaskQueue) -> Self {
        Self {
            registry: Rc::new(registry),
            options,
            queue,
            diagnostics: Rc::default(),
        }
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Warnings emitted for results collapsed to `null`, oldest first.
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.borrow().clone()
    }

    /// Start a chain with a success handler.
    pub fn with_success_handler<F: Fn(Value) + 'static>(&self, handler: F) -> Runner {
        Runner::new(self.clone()).with_success_handler(handler)
    }

    /// Start a chain with a failure handler.
    pub fn with_failure_handler<F: Fn(RunError) + 'static>(&self, handler: F) -> Runner {
        Runner::new(self.clone()).with_failure_handler(handler)
    }

    /// Invoke with no handlers registered yet; attach them through the returned [`Call`].
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Call {
        self.dispatch(Call::new(name, None, None), args)
    }

    /// Invoke and drain the queue, returning whatever was delivered.
    ///
    /// Convenience for tests that want the delivered outcome directly. Other pending
    /// tasks on the queue run as well.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        let slot: Rc<RefCell<Option<Result<Value>>>> = Rc::default();
        let (ok, err) = (slot.clone(), slot.clone());
        self.with_success_handler(move |v| *ok.borrow_mut() = Some(Ok(v)))
            .with_failure_handler(move |e| *err.borrow_mut() = Some(Err(e)))
            .invoke(name, args);
        self.queue.run_until_idle();
        let delivered = slot.borrow_mut().take();
        delivered.unwrap_or_else(|| Err(RunError::Undelivered(name.to_string())))
    }

    fn dispatch(&self, call: Call, args: Vec<Value>) -> Call {
        let name = call.name();
        call.set_state(CallState::Invoked);
        tracing::debug!("invoking {name} with {} argument(s)", args.len());

        let outcome = self.execute(&name, &args);
        call.set_state(match outcome {
            Outcome::Success(_) => CallState::Resolved,
            Outcome::Failure(_) => CallState::Rejected,
        });

        let pending = call.clone();
        self.queue.schedule(move || pending.deliver(outcome));
        call
    }

    fn execute(&self, name: &str, args: &[Value]) -> Outcome {
        let Some(operation) = self.registry.get(name) else {
            return Outcome::Failure(RunError::OperationNotFound(name.to_string()));
        };

        let result = match panic::catch_unwind(AssertUnwindSafe(|| operation(args))) {
            Ok(Ok(value)) => value,
            Ok(Err(error)) => return Outcome::Failure(RunError::Operation(error)),
            Err(payload) => return Outcome::Failure(RunError::Panicked(panic_message(payload))),
        };

        match check_serializable(&result) {
            Ok(()) => Outcome::Success(result),
            Err(bad) => {
                let error = RunError::Serialization {
                    kind: bad.kind,
                    path: bad.path,
                };
                if self.options.strict {
                    Outcome::Failure(error)
                } else {
                    let message = error.to_string();
                    tracing::warn!("{name}: {message}");
                    self.diagnostics.borrow_mut().push(message);
                    Outcome::Success(Value::Null)
                }
            }
        }
    }
}

impl fmt::Debug for ScriptRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRun")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("queue", &self.queue)
            .finish()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown panic".to_string()),
    }
}

/// A [`ScriptRun`] with handlers attached, reusable for any number of invocations.
#[derive(Clone)]
pub struct Runner {
    run: ScriptRun,
    success: Option<SuccessHandler>,
    failure: Option<FailureHandler>,
}

impl Runner {
    fn new(run: ScriptRun) -> Self {
        Self {
            run,
            success: None,
            failure: None,
        }
    }

    pub fn with_success_handler<F: Fn(Value) + 'static>(mut self, handler: F) -> Self {
        self.success = Some(Rc::new(handler));
        self
    }

    pub fn with_failure_handler<F: Fn(RunError) + 'static>(mut self, handler: F) -> Self {
        self.failure = Some(Rc::new(handler));
        self
    }

    pub fn invoke(&self, name: &str, args: Vec<Value>) -> Call {
        let call = Call::new(name, self.success.clone(), self.failure.clone());
        self.run.dispatch(call, args)
    }
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("has_success_handler", &self.success.is_some())
            .field("has_failure_handler", &self.failure.is_some())
            .finish()
    }
}
