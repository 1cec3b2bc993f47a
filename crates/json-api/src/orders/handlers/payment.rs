//! Order Payment Handler

use std::sync::Arc;

use boutique_app::domain::payments::{data::CardDetails, records::PaymentResult};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*, observability::record_payment, orders::errors::payment_status_error,
    state::State,
};

/// Card details. Nothing here is stored or logged.
#[derive(Deserialize, ToSchema)]
pub(crate) struct PaymentRequest {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub cvv: String,
}

impl std::fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentRequest").finish_non_exhaustive()
    }
}

impl From<PaymentRequest> for CardDetails {
    fn from(request: PaymentRequest) -> Self {
        CardDetails {
            card_number: request.card_number,
            card_holder: request.card_holder,
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            cvv: request.cvv,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    pub order_id: Uuid,

    /// `completed` or `failed`
    pub payment_status: String,

    /// Present when the payment went through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    pub message: String,

    /// Present when the payment went through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_email_sent: Option<bool>,
}

impl From<PaymentResult> for PaymentResponse {
    fn from(result: PaymentResult) -> Self {
        let confirmation_email_sent = result.is_success().then_some(result.confirmation_sent);

        PaymentResponse {
            order_id: result.order_uuid.into_uuid(),
            payment_status: result.payment_status.to_string(),
            transaction_id: result.transaction_id,
            message: result.message,
            confirmation_email_sent,
        }
    }
}

/// Order Payment Handler
///
/// Charges the order through the simulated gateway. A declined card is
/// answered with 400 and the reason; the order is left untouched.
#[endpoint(
    tags("orders"),
    summary = "Pay for Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment completed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Payment declined"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<PaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let result = state
        .app
        .payments
        .process_payment(id.into_inner().into(), json.into_inner().into())
        .await
        .map_err(payment_status_error)?;

    record_payment(&result.payment_status.to_string());

    if !result.is_success() {
        res.status_code(StatusCode::BAD_REQUEST);
    }

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::{
        orders::records::{OrderUuid, PaymentStatus},
        payments::PaymentsServiceError,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("orders/{id}/payment").post(handler))
    }

    fn card() -> serde_json::Value {
        json!({
            "card_number": "4111 1111 1111 1111",
            "card_holder": "Ana Gómez",
            "expiry_month": 12,
            "expiry_year": 2099,
            "cvv": "123",
        })
    }

    #[tokio::test]
    async fn test_payment_success_returns_transaction() -> TestResult {
        let order = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_process_payment()
            .once()
            .withf(move |o, card| {
                *o == order && card.card_number == "4111 1111 1111 1111" && card.cvv == "123"
            })
            .return_once(move |_, _| {
                Ok(PaymentResult {
                    order_uuid: order,
                    payment_status: PaymentStatus::Completed,
                    transaction_id: Some(format!("TXN_{}", order.prefix(8))),
                    message: "payment processed successfully".to_string(),
                    confirmation_sent: true,
                })
            });

        let mut res = TestClient::post(format!("http://example.com/orders/{order}/payment"))
            .json(&card())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(body.order_id, order.into_uuid());
        assert_eq!(body.payment_status, "completed");
        assert_eq!(body.transaction_id, Some(format!("TXN_{}", order.prefix(8))));
        assert_eq!(body.confirmation_email_sent, Some(true));

        Ok(())
    }

    #[tokio::test]
    async fn test_declined_card_returns_400_with_reason() -> TestResult {
        let order = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_process_payment()
            .once()
            .return_once(move |_, _| {
                Ok(PaymentResult {
                    order_uuid: order,
                    payment_status: PaymentStatus::Failed,
                    transaction_id: None,
                    message: "invalid card number".to_string(),
                    confirmation_sent: false,
                })
            });

        let mut res = TestClient::post(format!("http://example.com/orders/{order}/payment"))
            .json(&card())
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(body.payment_status, "failed");
        assert_eq!(body.message, "invalid card number");
        assert_eq!(body.transaction_id, None);
        assert_eq!(body.confirmation_email_sent, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_for_unknown_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .payments
            .expect_process_payment()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::NotFound));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/payment",
            OrderUuid::new()
        ))
        .json(&card())
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
