pub mod config;
pub mod erd;
pub mod error;
pub mod schema;

pub use config::Config;
pub use erd::{generate_erd, DisplayMode, ErdOptions, ErdOutput, TraversalMode};
pub use error::{OrgvizError, Result};
pub use schema::{FixtureProvider, RestSchemaProvider, SchemaProvider};
