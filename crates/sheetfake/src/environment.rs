//! Test environment harness.
//!
//! An [`Environment`] wires a shared [`Spreadsheet`], the platform services and a
//! deferred task queue together from an [`EnvironmentConfig`]. Business logic under
//! test is registered as named operations that capture a [`ScriptContext`]; the test
//! then drives them through a [`ScriptRun`] the same way client code would.
//!
//! ```rust
//! use sheetfake::prelude::*;
//!
//! let env = Environment::new(
//!     EnvironmentConfig::new()
//!         .sheet("Orders", ["ID", "Item"])
//!         .locale(Locale::Iso),
//! )
//! .unwrap();
//!
//! let run = env.script_run_with(|ctx, registry| {
//!     let ctx = ctx.clone();
//!     registry.register("countOrders", move |_: &[Value]| {
//!         let rows = ctx.with_sheet("Orders", |sheet| sheet.row_count())?;
//!         Ok(Value::from(rows - 1))
//!     });
//! });
//!
//! env.context()
//!     .with_sheet_mut("Orders", |sheet| {
//!         sheet.append(["A-1", "Tea"]);
//!     })
//!     .unwrap();
//!
//! assert_eq!(run.call("countOrders", vec![]).unwrap(), Value::from(1));
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use sheetfake_core::{GridStore, Locale, Result, Spreadsheet};
use sheetfake_run::{OperationRegistry, RunOptions, ScriptRun, TaskQueue};

use crate::services::{Logger, PropertiesService, Session, Utilities, DEFAULT_EMAIL};

/// A sheet created when the environment starts and recreated by
/// [`Environment::reset_sheets`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetConfig {
    pub name: String,
    pub header: Vec<String>,
}

/// Environment settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvironmentConfig {
    /// Sheets to pre-create, in order
    pub sheets: Vec<SheetConfig>,
    /// Display locale shared by every sheet
    pub locale: Locale,
    /// Reject non-serializable results at the call boundary
    pub strict_serialization: bool,
    /// Email reported by the session
    pub email: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            locale: Locale::default(),
            strict_serialization: false,
            email: DEFAULT_EMAIL.to_string(),
        }
    }
}

impl EnvironmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet with the given header row. An empty header creates a
    /// headerless sheet.
    pub fn sheet<I, S>(mut self, name: impl Into<String>, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheets.push(SheetConfig {
            name: name.into(),
            header: header.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn strict_serialization(mut self, strict: bool) -> Self {
        self.strict_serialization = strict;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Boundary options implied by this configuration
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            strict: self.strict_serialization,
        }
    }
}

/// Shared handles handed to business operations.
///
/// Cloning is cheap and every clone sees the same spreadsheet and service state.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    spreadsheet: Rc<RefCell<Spreadsheet>>,
    utilities: Utilities,
    session: Session,
    properties: PropertiesService,
    logger: Logger,
}

impl ScriptContext {
    fn new(config: &EnvironmentConfig) -> Self {
        Self {
            spreadsheet: Rc::new(RefCell::new(Spreadsheet::new(config.locale))),
            utilities: Utilities::new(),
            session: Session::new(config.email.clone()),
            properties: PropertiesService::new(),
            logger: Logger::new(),
        }
    }

    /// The active spreadsheet.
    ///
    /// Panics if the spreadsheet is mutably borrowed, as any `RefCell` would.
    pub fn spreadsheet(&self) -> Ref<'_, Spreadsheet> {
        self.spreadsheet.borrow()
    }

    pub fn spreadsheet_mut(&self) -> RefMut<'_, Spreadsheet> {
        self.spreadsheet.borrow_mut()
    }

    /// Run `f` against the named sheet
    pub fn with_sheet<R>(&self, name: &str, f: impl FnOnce(&GridStore) -> R) -> Result<R> {
        let spreadsheet = self.spreadsheet.borrow();
        let sheet = spreadsheet.require_sheet(name)?;
        Ok(f(sheet))
    }

    /// Run `f` against the named sheet, mutably
    pub fn with_sheet_mut<R>(&self, name: &str, f: impl FnOnce(&mut GridStore) -> R) -> Result<R> {
        let mut spreadsheet = self.spreadsheet.borrow_mut();
        let sheet = spreadsheet.require_sheet_mut(name)?;
        Ok(f(sheet))
    }

    pub fn utilities(&self) -> &Utilities {
        &self.utilities
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn properties(&self) -> &PropertiesService {
        &self.properties
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

/// A configured test environment
#[derive(Debug)]
pub struct Environment {
    config: EnvironmentConfig,
    context: ScriptContext,
    queue: TaskQueue,
}

impl Environment {
    /// Build an environment and pre-create its sheets.
    ///
    /// Fails when a configured sheet name is empty or too long. A repeated name
    /// reuses the sheet created first.
    pub fn new(config: EnvironmentConfig) -> Result<Self> {
        let env = Self {
            context: ScriptContext::new(&config),
            queue: TaskQueue::new(),
            config,
        };
        env.create_sheets()?;
        tracing::debug!(
            "environment ready: {} sheet(s), locale {}, strict {}",
            env.config.sheets.len(),
            env.config.locale,
            env.config.strict_serialization
        );
        Ok(env)
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn context(&self) -> &ScriptContext {
        &self.context
    }

    /// The queue every handler delivery is scheduled on
    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    /// Drain pending deliveries; returns how many ran.
    pub fn run_until_idle(&self) -> usize {
        self.queue.run_until_idle()
    }

    /// A call boundary over `registry`, using the configured strictness.
    pub fn script_run(&self, registry: OperationRegistry) -> ScriptRun {
        ScriptRun::new(registry, self.config.run_options(), self.queue.clone())
    }

    /// Build a registry with access to this environment's handles, then wrap it.
    pub fn script_run_with<F>(&self, build: F) -> ScriptRun
    where
        F: FnOnce(&ScriptContext, &mut OperationRegistry),
    {
        let mut registry = OperationRegistry::new();
        build(&self.context, &mut registry);
        self.script_run(registry)
    }

    /// Drop every sheet and recreate the configured ones with their headers.
    pub fn reset_sheets(&self) -> Result<()> {
        self.context.spreadsheet_mut().reset();
        self.create_sheets()
    }

    fn create_sheets(&self) -> Result<()> {
        let mut spreadsheet = self.context.spreadsheet_mut();
        for sheet in &self.config.sheets {
            spreadsheet.get_or_create_sheet(&sheet.name, sheet.header.iter().cloned())?;
        }
        Ok(())
    }
}
