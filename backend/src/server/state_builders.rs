//! Builders wiring storage adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use gym_buddy::domain::ports::{ExercisePort, UserPort, WorkoutPort};
use gym_buddy::domain::{ExerciseService, UserService, WorkoutService};
use gym_buddy::inbound::http::state::HttpState;
use gym_buddy::outbound::memory::InMemoryStore;
use gym_buddy::outbound::persistence::{
    DieselExerciseRepository, DieselUserRepository, DieselWorkoutRepository,
};

use super::ServerConfig;

/// Build the use-case services over one set of persistence adapters.
fn build_services<U, W, E>(users: Arc<U>, workouts: Arc<W>, exercises: Arc<E>) -> HttpState
where
    U: UserPort + 'static,
    W: WorkoutPort + 'static,
    E: ExercisePort + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState::new(
        Arc::new(UserService::new(Arc::clone(&users), Arc::clone(&clock))),
        Arc::new(WorkoutService::new(Arc::clone(&workouts), users, Arc::clone(&clock))),
        Arc::new(ExerciseService::new(exercises, workouts, clock)),
    )
}

/// Build HTTP state from configuration.
///
/// Uses the Diesel repositories when a pool is available and the in-memory
/// store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            build_services(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselWorkoutRepository::new(pool.clone())),
                Arc::new(DieselExerciseRepository::new(pool.clone())),
            )
        }
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            let store = Arc::new(InMemoryStore::new());
            build_services(Arc::clone(&store), Arc::clone(&store), store)
        }
    };
    web::Data::new(state)
}
