//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::passwords::{hash_password, verify_password},
    database::Db,
    domain::users::{
        data::ProfileUpdate,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
    validation::{is_valid_name, is_valid_password, is_valid_phone},
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_user(&mut tx, user)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(credentials.user)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        let update = update.normalised();

        if update
            .first_name
            .as_deref()
            .is_some_and(|name| !is_valid_name(name))
        {
            return Err(UsersServiceError::InvalidFirstName);
        }

        if update
            .last_name
            .as_deref()
            .is_some_and(|name| !is_valid_name(name))
        {
            return Err(UsersServiceError::InvalidLastName);
        }

        let mut tx = self.db.begin().await?;

        if let Some(phone) = update.phone.as_deref() {
            if !is_valid_phone(phone) {
                return Err(UsersServiceError::InvalidPhone);
            }

            if self
                .repository
                .phone_in_use(&mut tx, phone, Some(user))
                .await?
            {
                return Err(UsersServiceError::PhoneInUse);
            }
        }

        let credentials = self
            .repository
            .update_profile(&mut tx, user, &update)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user, "updated profile");

        Ok(credentials.user)
    }

    async fn change_password(
        &self,
        user: UserUuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_user(&mut tx, user)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        if !verify_password(current_password, &credentials.password_hash)? {
            return Err(UsersServiceError::IncorrectPassword);
        }

        if !is_valid_password(new_password) {
            return Err(UsersServiceError::WeakPassword);
        }

        let password_hash = hash_password(new_password)?;

        self.repository
            .update_password(&mut tx, user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user, "changed password");

        Ok(())
    }

    async fn delete_account(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self.repository.delete_account(&mut tx, user).await?;

        if deleted == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(user_uuid = %user, "deleted account");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a user's profile.
    async fn get_profile(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Change the supplied profile fields, leaving the rest untouched.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Replace the password after checking the current one.
    async fn change_password(
        &self,
        user: UserUuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), UsersServiceError>;

    /// Delete the user together with their carts, orders and reset codes.
    async fn delete_account(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::AuthService,
        domain::{carts::CartsService, orders::OrdersService, owners::Owner, products::ProductsService},
        test::{
            TestContext,
            helpers::{dec, new_product, new_user, shipping},
        },
    };

    use super::*;

    #[tokio::test]
    async fn update_profile_changes_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let session = ctx.auth.register(new_user("ana@example.com")).await?;

        let updated = ctx
            .users
            .update_profile(
                session.user.uuid,
                ProfileUpdate {
                    first_name: Some("María".to_string()),
                    last_name: Some("   ".to_string()),
                    phone: Some("300 123 4567".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.first_name, "María");
        assert_eq!(updated.last_name, session.user.last_name);
        assert_eq!(updated.phone.as_deref(), Some("300 123 4567"));

        let profile = ctx.users.get_profile(session.user.uuid).await?;

        assert_eq!(profile, updated);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_rejects_phone_of_another_user() -> TestResult {
        let ctx = TestContext::new().await;

        let mut first = new_user("ana@example.com");
        first.phone = Some("3001234567".to_string());

        let first = ctx.auth.register(first).await?;
        let second = ctx.auth.register(new_user("luis@example.com")).await?;

        let taken = ctx
            .users
            .update_profile(
                second.user.uuid,
                ProfileUpdate {
                    phone: Some("3001234567".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(taken, Err(UsersServiceError::PhoneInUse)),
            "expected PhoneInUse, got {taken:?}"
        );

        let own_phone = ctx
            .users
            .update_profile(
                first.user.uuid,
                ProfileUpdate {
                    phone: Some("3001234567".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await;

        assert!(own_phone.is_ok(), "keeping own phone failed: {own_phone:?}");

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_validates_names_and_phone() -> TestResult {
        let ctx = TestContext::new().await;
        let session = ctx.auth.register(new_user("ana@example.com")).await?;

        let bad_name = ctx
            .users
            .update_profile(
                session.user.uuid,
                ProfileUpdate {
                    last_name: Some("R2-D2".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await;

        assert!(matches!(bad_name, Err(UsersServiceError::InvalidLastName)));

        let bad_phone = ctx
            .users
            .update_profile(
                session.user.uuid,
                ProfileUpdate {
                    phone: Some("12ab".to_string()),
                    ..ProfileUpdate::default()
                },
            )
            .await;

        assert!(matches!(bad_phone, Err(UsersServiceError::InvalidPhone)));

        Ok(())
    }

    #[tokio::test]
    async fn change_password_requires_current_password() -> TestResult {
        let ctx = TestContext::new().await;
        let session = ctx.auth.register(new_user("ana@example.com")).await?;

        let wrong = ctx
            .users
            .change_password(session.user.uuid, "not-my-password", "new-password-1")
            .await;

        assert!(matches!(wrong, Err(UsersServiceError::IncorrectPassword)));

        let weak = ctx
            .users
            .change_password(session.user.uuid, "password123", "short")
            .await;

        assert!(matches!(weak, Err(UsersServiceError::WeakPassword)));

        ctx.users
            .change_password(session.user.uuid, "password123", "new-password-1")
            .await?;

        ctx.auth.login("ana@example.com", "new-password-1").await?;

        Ok(())
    }

    #[tokio::test]
    async fn delete_account_removes_owned_carts_and_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let session = ctx.auth.register(new_user("ana@example.com")).await?;
        let owner = Owner::User(session.user.uuid);

        let store = ctx.create_store("Celeste").await?;
        let product = ctx
            .products
            .upsert_product(new_product(store.uuid, "Dress", dec("10.00"), 5))
            .await?;

        let cart = ctx.carts.resolve_cart(owner.clone()).await?;
        ctx.add_to_cart(cart.uuid, product.uuid, 1, "M").await?;
        ctx.orders
            .create_from_cart(cart.uuid, owner.clone(), shipping(""))
            .await?;
        ctx.add_to_cart(cart.uuid, product.uuid, 1, "S").await?;

        ctx.users.delete_account(session.user.uuid).await?;

        let profile = ctx.users.get_profile(session.user.uuid).await;

        assert!(matches!(profile, Err(UsersServiceError::NotFound)));

        let remaining: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM orders) + (SELECT COUNT(*) FROM carts) \
             + (SELECT COUNT(*) FROM cart_items) + (SELECT COUNT(*) FROM order_items)",
        )
        .fetch_one(ctx.db.pool())
        .await?;

        assert_eq!(remaining, 0);

        let again = ctx.users.delete_account(session.user.uuid).await;

        assert!(matches!(again, Err(UsersServiceError::NotFound)));

        Ok(())
    }
}
