//! gym-buddy backend library.
//!
//! Hexagonal layout: [`domain`] holds entities, ports, and the use-case
//! services; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the persistence ports for PostgreSQL and in-memory storage.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
