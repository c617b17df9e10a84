use mockall::mock;
use pos_common::{Money, Secret};
use pos_engine::{
    db_types::{NewRestaurant, Order, Restaurant},
    order_objects::NewOrderItem,
    traits::{MerchantIdentity, RemoteOrderResult, RemotePaymentResult},
    GatewayError,
    OrderManagement,
    PaymentsGateway,
    RestaurantManagement,
    StorageError,
};

mock! {
    pub Store {}
    impl Clone for Store {
        fn clone(&self) -> Self;
    }
    impl OrderManagement for Store {
        async fn insert_order(&self, order: &Order) -> Result<Order, StorageError>;
        async fn fetch_order(&self, restaurant_id: i64, order_id: &str) -> Result<Option<Order>, StorageError>;
        async fn fetch_orders_for_table(&self, restaurant_id: i64, table_number: &str) -> Result<Vec<Order>, StorageError>;
        async fn record_payment(&self, order_id: &str, paid: Money, tips: Money) -> Result<Order, StorageError>;
        async fn ping(&self) -> Result<(), StorageError>;
    }
    impl RestaurantManagement for Store {
        async fn fetch_restaurant_by_token_hash(&self, token_hash: &str) -> Result<Option<Restaurant>, StorageError>;
        async fn fetch_or_create_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StorageError>;
    }
}

mock! {
    pub Gateway {}
    impl Clone for Gateway {
        fn clone(&self) -> Self;
    }
    impl PaymentsGateway for Gateway {
        async fn resolve_merchant(&self, token: &Secret<String>) -> Result<MerchantIdentity, GatewayError>;
        async fn create_remote_order(
            &self,
            token: &Secret<String>,
            location_id: &str,
            items: &[NewOrderItem],
        ) -> Result<RemoteOrderResult, GatewayError>;
        async fn create_remote_payment(
            &self,
            token: &Secret<String>,
            location_id: &str,
            order_id: &str,
            bill_amount: Money,
            tip_amount: Money,
            idempotency_key: &str,
        ) -> Result<RemotePaymentResult, GatewayError>;
    }
}
