//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService, TokenIssuer, TokenSettings},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        payments::{PaymentsService, SimulatedPaymentsService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
    notifications::{Notifier, NotifierError, SmtpSettings, notifier_from_settings},
};

/// Everything needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub tokens: TokenSettings,
    pub smtp: SmtpSettings,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("failed to configure notifications")]
    Notifier(#[source] NotifierError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database and wire up every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable, a migration fails,
    /// or the notifier settings are invalid.
    pub async fn new(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migration)?;

            info!("database migrations applied");
        }

        let notifier = notifier_from_settings(&settings.smtp).map_err(AppInitError::Notifier)?;

        Ok(Self::from_parts(
            Db::new(pool),
            TokenIssuer::new(&settings.tokens),
            notifier,
        ))
    }

    /// Wire the services over an existing database handle.
    #[must_use]
    pub fn from_parts(db: Db, tokens: TokenIssuer, notifier: Arc<dyn Notifier>) -> Self {
        let orders: Arc<dyn OrdersService> =
            Arc::new(PgOrdersService::new(db.clone(), Arc::clone(&notifier)));

        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), tokens, Arc::clone(&notifier))),
            users: Arc::new(PgUsersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db)),
            payments: Arc::new(SimulatedPaymentsService::new(Arc::clone(&orders), notifier)),
            orders,
        }
    }
}
