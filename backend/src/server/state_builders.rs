//! Wiring of domain services onto outbound adapters.

use std::sync::Arc;

use actix_web::web;

use wordweave::domain::ports::{
    FixtureRoleRepository, PasswordHasher, ProfileImageStore, RoleRepository, UserRepository,
};
use wordweave::domain::{PasswordLoginService, RegistrationService};
use wordweave::inbound::http::state::HttpState;
use wordweave::outbound::images::LocalProfileImageStore;
use wordweave::outbound::memory::InMemoryUserRepository;
use wordweave::outbound::password::Argon2PasswordHasher;
use wordweave::outbound::persistence::{DieselRoleRepository, DieselUserRepository};

use super::ServerConfig;

/// Pick PostgreSQL adapters when a pool is configured, in-memory ones
/// otherwise.
fn build_repositories(config: &ServerConfig) -> (Arc<dyn UserRepository>, Arc<dyn RoleRepository>) {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselRoleRepository::new(pool.clone())),
        ),
        None => (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(FixtureRoleRepository),
        ),
    }
}

/// Build the handler state shared by every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (users, roles) = build_repositories(config);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let images: Arc<dyn ProfileImageStore> =
        Arc::new(LocalProfileImageStore::new(config.image_dir.clone()));

    let registration = RegistrationService::new(users.clone(), roles, hasher.clone(), images);
    let login = PasswordLoginService::new(users, hasher);
    web::Data::new(HttpState::new(Arc::new(registration), Arc::new(login)))
}
