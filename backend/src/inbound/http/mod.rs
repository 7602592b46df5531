//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod exercises;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod workouts;

pub use error::ApiResult;

/// Mount the `/api/v1` scope with every resource handler.
///
/// Handlers read [`state::HttpState`] from app data, which the caller
/// registers.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(gym_buddy::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(validation::json_config())
            .app_data(validation::path_config())
            .service(health::status)
            .configure(users::configure)
            .configure(workouts::configure)
            .configure(exercises::configure),
    );
}
