//! Prelude module for convenient imports
//!
//! ```rust
//! use sheetfake::prelude::*;
//! ```

pub use crate::{
    CallState, CellValue, Environment, EnvironmentConfig, Error, GridStore, Locale,
    OperationRegistry, RangeExt, Result, RunError, RunOptions, ScriptContext, ScriptRun,
    Spreadsheet, StoreOptions, TaskQueue, Temporal, Value,
};
