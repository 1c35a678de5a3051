//! Platform services available to script code.
//!
//! Each service is a cheap handle over shared state: clones observe and mutate the
//! same data, so a handle captured by a registered operation sees what the test
//! set up through its own copy.

mod logger;
mod properties;
mod session;
mod utilities;

pub use logger::Logger;
pub use properties::{PropertiesService, PropertyStore};
pub use session::{Session, DEFAULT_EMAIL, SCRIPT_TIME_ZONE};
pub use utilities::{Utilities, UUID_PREFIX};
