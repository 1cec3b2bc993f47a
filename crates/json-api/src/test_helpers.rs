//! Test helpers.

use std::{path::PathBuf, sync::Arc};

use boutique_app::{
    auth::{
        AccessClaims, MockAuthService,
        records::{AuthSession, TokenPair},
    },
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartRecord, CartUuid},
        },
        owners::Owner,
        orders::{
            MockOrdersService,
            data::ShippingDetails,
            records::{
                OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid, PaymentStatus,
            },
        },
        payments::MockPaymentsService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid, StoreUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Stands in for the auth middleware: every request is made by [`TEST_USER_UUID`].
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_claims(test_claims());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn test_claims() -> AccessClaims {
    AccessClaims {
        user_id: TEST_USER_UUID,
        email: Some("ana@example.com".to_string()),
        first_name: "Ana".to_string(),
        last_name: "Gómez".to_string(),
        exp: 0,
        iat: 0,
        nbf: 0,
    }
}

/// Service mocks; any mock left at its default fails the test when called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) payments: MockPaymentsService,
    pub(crate) upload_dir: PathBuf,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            payments: Arc::new(self.payments),
        };

        State::from_app_context(app, self.upload_dir)
    }

    /// Serve `route` anonymously.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as [`TEST_USER_UUID`].
    pub(crate) fn user_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        email: Some("ana@example.com".to_string()),
        phone: Some("+573001234567".to_string()),
        first_name: "Ana".to_string(),
        last_name: "Gómez".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_session(uuid: UserUuid) -> AuthSession {
    AuthSession {
        user: make_user(uuid),
        tokens: TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_in: 86_400,
        },
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        store_uuid: StoreUuid::from_uuid(Uuid::nil()),
        store_name: "Celeste".to_string(),
        name: "Linen Dress".to_string(),
        description: "Summer dress".to_string(),
        category: "Dresses".to_string(),
        price: Decimal::new(120_000, 0),
        available_units: 5,
        image_path: "../assets/images/celeste/linen.jpg".to_string(),
        sizes: vec!["S".to_string(), "M".to_string()],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart(uuid: CartUuid, owner: Owner) -> CartRecord {
    CartRecord {
        uuid,
        owner,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(
    uuid: CartItemUuid,
    cart: CartUuid,
    product: ProductUuid,
    quantity: i32,
) -> CartItemRecord {
    CartItemRecord {
        uuid,
        cart_uuid: cart,
        product_uuid: product,
        quantity,
        size: "M".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A pending order for two linen dresses.
pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        owner: Owner::Session("abc".to_string()),
        total_amount: Decimal::new(240_000, 0),
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        shipping: ShippingDetails {
            name: "Ana Gómez".to_string(),
            email: "ana@example.com".to_string(),
            city: "Bogotá".to_string(),
            ..ShippingDetails::default()
        },
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: "Linen Dress".to_string(),
            quantity: 2,
            size: "M".to_string(),
            unit_price: Decimal::new(120_000, 0),
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
