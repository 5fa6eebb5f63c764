//! Object records, the accepted-object registry and object-level rules

mod record;
mod registry;
mod validator;

pub use record::{LunarObject, Placement, RecordError};
pub use registry::ObjectRegistry;
pub use validator::ObjectValidator;
