use std::fmt::Debug;

use chrono::Utc;
use log::*;

use crate::{
    db_types::Order,
    order_objects::{NewOrder, PaymentRequest},
    pos_api::{errors::OrderFlowError, ledger, restaurant_api::MerchantSession},
    traits::{OrderManagement, PaymentsGateway},
};

/// `OrderFlowApi` is the primary API for the order lifecycle: creating orders on the payments platform, reading them
/// back, and reconciling payments against them.
///
/// Every call takes the caller's [`MerchantSession`]. Orders are only ever visible to the restaurant that created
/// them.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B: Clone, G: Clone> Clone for OrderFlowApi<B, G> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), gateway: self.gateway.clone() }
    }
}

impl<B, G> OrderFlowApi<B, G> {
    pub fn new(db: B, gateway: G) -> Self {
        Self { db, gateway }
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: OrderManagement,
    G: PaymentsGateway,
{
    /// Creates the order on the payments platform, then stores it locally along with the platform's totals.
    ///
    /// Nothing is stored if the platform call fails. If the platform call succeeds but the order cannot be stored,
    /// [`OrderFlowError::DanglingRemoteOrder`] carries the remote id so that the orphan can be found.
    pub async fn create_order(&self, session: &MerchantSession, order: NewOrder) -> Result<Order, OrderFlowError> {
        order.validate().map_err(OrderFlowError::InvalidInput)?;
        let restaurant = &session.restaurant;
        let remote = self
            .gateway
            .create_remote_order(&session.access_token, &restaurant.location_id, &order.items)
            .await
            .map_err(|e| {
                warn!("🔄️📦️ Could not create order for restaurant #{}. {e}", restaurant.id);
                e
            })?;
        debug!("🔄️📦️ Remote order {} created for table {}", remote.order_id, order.table_number);
        if remote.line_items.len() != order.items.len() {
            warn!(
                "🔄️📦️ Remote order {} has {} line items, but {} were submitted",
                remote.order_id,
                remote.line_items.len(),
                order.items.len()
            );
        }
        let record = ledger::build_order(restaurant.id, &order, &remote, Utc::now());
        match self.db.insert_order(&record).await {
            Ok(order) => {
                info!(
                    "🔄️📦️ Order [{}] created for restaurant #{} at table {}. Due: {}",
                    order.id, restaurant.id, order.table_number, order.totals.due
                );
                Ok(order)
            },
            Err(e) => {
                error!(
                    "🔄️📦️ Order [{}] exists on the payments platform but could not be saved for restaurant #{}. {e}",
                    remote.order_id, restaurant.id
                );
                Err(OrderFlowError::DanglingRemoteOrder { remote_order_id: remote.order_id, reason: e.to_string() })
            },
        }
    }

    /// Checks that the order store is reachable. Backs the readiness check.
    pub async fn check_storage(&self) -> Result<(), OrderFlowError> {
        self.db.ping().await?;
        Ok(())
    }

    pub async fn fetch_order(&self, session: &MerchantSession, order_id: &str) -> Result<Order, OrderFlowError> {
        let order = self.db.fetch_order(session.restaurant.id, order_id).await?;
        order.ok_or_else(|| OrderFlowError::OrderNotFound(order_id.to_string()))
    }

    pub async fn fetch_orders_for_table(
        &self,
        session: &MerchantSession,
        table_number: &str,
    ) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders_for_table(session.restaurant.id, table_number).await?;
        trace!("🔄️📦️ {} orders found for table {table_number}", orders.len());
        Ok(orders)
    }

    /// Takes a payment against an order and records it in the order's ledger.
    ///
    /// The order must belong to the session's restaurant; otherwise [`OrderFlowError::OrderNotFound`] is returned and
    /// the payments platform is never contacted. The ledger is credited with the amounts the platform confirmed, not
    /// the amounts requested. If the platform takes the payment but the ledger cannot be updated,
    /// [`OrderFlowError::UnrecordedPayment`] is returned.
    pub async fn apply_payment(
        &self,
        session: &MerchantSession,
        order_id: &str,
        payment: PaymentRequest,
    ) -> Result<Order, OrderFlowError> {
        payment.validate().map_err(OrderFlowError::InvalidInput)?;
        let order = self.fetch_order(session, order_id).await?;
        let confirmed = self
            .gateway
            .create_remote_payment(
                &session.access_token,
                &session.restaurant.location_id,
                &order.id,
                payment.bill_amount,
                payment.tip_amount,
                &payment.payment_id,
            )
            .await
            .map_err(|e| {
                warn!("🔄️💰️ Payment [{}] for order [{}] failed. {e}", payment.payment_id, order.id);
                e
            })?;
        debug!(
            "🔄️💰️ Payment [{}] ({}) confirmed for order [{}]: {} + {} tip",
            confirmed.payment_id, confirmed.status, order.id, confirmed.amount, confirmed.tip
        );
        match self.db.record_payment(&order.id, confirmed.amount, confirmed.tip).await {
            Ok(updated) => {
                if updated.is_closed && !order.is_closed {
                    info!("🔄️💰️ Order [{}] is paid in full and has been closed", updated.id);
                }
                info!(
                    "🔄️💰️ Payment [{}] recorded for order [{}]. Paid {} of {}",
                    payment.payment_id, updated.id, updated.totals.paid, updated.totals.due
                );
                Ok(updated)
            },
            Err(e) => {
                error!(
                    "🔄️💰️ Payment [{}] (remote id {}) was taken for order [{}] but could not be recorded. {e}",
                    payment.payment_id, confirmed.payment_id, order.id
                );
                Err(OrderFlowError::UnrecordedPayment {
                    order_id: order.id,
                    payment_id: payment.payment_id,
                    reason: e.to_string(),
                })
            },
        }
    }
}
