//! Square implementation of the engine's payments gateway.
//!
//! Local items map one-to-one onto Square line items. Item discounts become order-level discounts with
//! `LINE_ITEM` scope, each referenced only by the line it belongs to, so Square computes the applied amount per line.
//! Payments are recorded as cash tenders.
use log::*;
use pos_common::{Money, Secret};
use pos_engine::{
    order_objects::NewOrderItem,
    traits::{MerchantIdentity, RemoteLineItem, RemoteOrderResult, RemoteOrderState, RemotePaymentResult, RemoteTotals},
    GatewayError,
    PaymentsGateway,
};
use square_tools::{
    helpers::{new_idempotency_key, square_quantity},
    AppliedDiscountRef,
    CreateOrderRequest,
    CreatePaymentRequest,
    NewLineItem,
    NewLineItemModifier,
    NewOrderDiscount,
    NewSquareOrder,
    OrderState,
    SquareApi,
    SquareApiError,
    SquareMoney,
    SquareOrder,
    SquarePayment,
};

#[derive(Clone)]
pub struct SquareGateway {
    api: SquareApi,
}

impl SquareGateway {
    pub fn new(api: SquareApi) -> Self {
        Self { api }
    }
}

impl PaymentsGateway for SquareGateway {
    async fn resolve_merchant(&self, token: &Secret<String>) -> Result<MerchantIdentity, GatewayError> {
        let status = self.api.retrieve_token_status(token).await.map_err(gateway_error)?;
        let merchant_id = status
            .merchant_id
            .ok_or_else(|| GatewayError::Rejected("The access token is not associated with a merchant".to_string()))?;
        let locations = self.api.list_locations(token).await.map_err(gateway_error)?;
        let location_ids = locations
            .into_iter()
            .filter(|l| l.status.as_deref() != Some("INACTIVE"))
            .map(|l| l.id)
            .collect::<Vec<String>>();
        debug!("🔄️🔑️ Merchant {merchant_id} has {} active locations", location_ids.len());
        Ok(MerchantIdentity { merchant_id, location_ids })
    }

    async fn create_remote_order(
        &self,
        token: &Secret<String>,
        location_id: &str,
        items: &[NewOrderItem],
    ) -> Result<RemoteOrderResult, GatewayError> {
        let order = new_square_order(location_id, items, self.api.currency())?;
        let request = CreateOrderRequest { idempotency_key: new_idempotency_key(), order };
        let order = self.api.create_order(token, request).await.map_err(gateway_error)?;
        debug!(
            "🔄️📦️ Square order {} created in state {:?}. Due: {}",
            order.id,
            order.state,
            order.net_amount_due()
        );
        Ok(remote_order_result(&order, items))
    }

    async fn create_remote_payment(
        &self,
        token: &Secret<String>,
        location_id: &str,
        order_id: &str,
        bill_amount: Money,
        tip_amount: Money,
        idempotency_key: &str,
    ) -> Result<RemotePaymentResult, GatewayError> {
        let request = CreatePaymentRequest::cash(
            idempotency_key.to_string(),
            location_id.to_string(),
            order_id.to_string(),
            bill_amount,
            tip_amount,
            self.api.currency(),
        )
        .ok_or_else(|| {
            GatewayError::InvalidRequest(format!("A payment of {bill_amount} plus {tip_amount} is too large"))
        })?;
        let payment = self.api.create_payment(token, request).await.map_err(gateway_error)?;
        debug!("🔄️💰️ Square payment {} for order {order_id} is {}", payment.id, payment.status);
        Ok(remote_payment_result(payment, bill_amount, tip_amount))
    }
}

/// Builds the Square order for a set of local items. Discount uids are `d-{item}-{discount}`.
pub fn new_square_order(
    location_id: &str,
    items: &[NewOrderItem],
    currency: &str,
) -> Result<NewSquareOrder, GatewayError> {
    let mut discounts = Vec::new();
    let mut line_items = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let mut applied_discounts = Vec::with_capacity(item.discounts.len());
        for (j, d) in item.discounts.iter().enumerate() {
            let uid = discount_uid(i, j);
            let discount = if d.is_percentage {
                NewOrderDiscount::percentage(uid.clone(), d.name.clone(), d.value)
            } else {
                let amount = Money::from_major_units(d.value)
                    .map_err(|e| GatewayError::InvalidRequest(format!("Discount '{}': {e}", d.name)))?;
                NewOrderDiscount::fixed_amount(uid.clone(), d.name.clone(), SquareMoney::new(amount, currency))
            };
            discounts.push(discount);
            applied_discounts.push(AppliedDiscountRef { discount_uid: uid });
        }
        let modifiers = item
            .modifiers
            .iter()
            .map(|m| NewLineItemModifier {
                name: m.name.clone(),
                base_price_money: SquareMoney::new(m.unit_price, currency),
                quantity: square_quantity(m.quantity),
            })
            .collect();
        line_items.push(NewLineItem {
            name: item.name.clone(),
            quantity: square_quantity(item.quantity),
            base_price_money: SquareMoney::new(item.unit_price, currency),
            note: item.comment.clone(),
            modifiers,
            applied_discounts,
        });
    }
    Ok(NewSquareOrder { location_id: location_id.to_string(), reference_id: None, line_items, discounts })
}

/// Extracts the amounts the engine needs from Square's view of the order. Square returns line items in the order
/// they were submitted.
pub fn remote_order_result(order: &SquareOrder, items: &[NewOrderItem]) -> RemoteOrderResult {
    let line_items = order
        .line_items
        .iter()
        .zip(items.iter())
        .enumerate()
        .map(|(i, (line, item))| RemoteLineItem {
            amount: line.total(),
            discount_amounts: (0..item.discounts.len()).map(|j| line.discount_applied(&discount_uid(i, j))).collect(),
            modifier_amounts: line.modifiers.iter().map(|m| m.total()).collect(),
        })
        .collect::<Vec<RemoteLineItem>>();
    if line_items.len() != items.len() {
        warn!(
            "🔄️📦️ Square returned {} line items for order {}, but {} were submitted",
            order.line_items.len(),
            order.id,
            items.len()
        );
    }
    let totals = RemoteTotals {
        discounts: order.total_discount(),
        due: order.net_amount_due(),
        tax: order.total_tax(),
        service_charge: order.total_service_charge(),
        tips: order.total_tip(),
        total: order.total(),
    };
    RemoteOrderResult { order_id: order.id.clone(), state: remote_state(&order.state), totals, line_items }
}

/// Square only omits the amounts on a payment it has not yet priced; the requested amounts stand in for them.
fn remote_payment_result(payment: SquarePayment, bill_amount: Money, tip_amount: Money) -> RemotePaymentResult {
    let amount = payment.amount_money.as_ref().map(SquareMoney::money).unwrap_or_else(|| {
        warn!("🔄️💰️ Square payment {} has no amount. Assuming {bill_amount}", payment.id);
        bill_amount
    });
    let tip = payment.tip_money.as_ref().map(SquareMoney::money).unwrap_or(tip_amount);
    RemotePaymentResult { payment_id: payment.id, status: payment.status, amount, tip }
}

fn discount_uid(item: usize, discount: usize) -> String {
    format!("d-{item}-{discount}")
}

fn remote_state(state: &OrderState) -> RemoteOrderState {
    match state {
        OrderState::Open => RemoteOrderState::Open,
        OrderState::Completed => RemoteOrderState::Completed,
        OrderState::Canceled => RemoteOrderState::Canceled,
        OrderState::Draft => RemoteOrderState::Draft,
        OrderState::Unknown => RemoteOrderState::Unknown,
    }
}

fn gateway_error(e: SquareApiError) -> GatewayError {
    warn!("🔄️ Square request failed. {e}");
    match e {
        SquareApiError::QueryError { status, .. } if status >= 500 => GatewayError::Unavailable(e.to_string()),
        SquareApiError::QueryError { .. } | SquareApiError::MissingAccessToken => GatewayError::Rejected(e.to_string()),
        SquareApiError::Initialization(_) | SquareApiError::RestRequestError(_) => {
            GatewayError::Unavailable(e.to_string())
        },
        SquareApiError::RestResponseError(_) | SquareApiError::JsonError(_) | SquareApiError::EmptyResponse => {
            GatewayError::InvalidResponse(e.to_string())
        },
    }
}
