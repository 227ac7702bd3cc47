use tracing::{debug, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Order, OrderCreate};
use crate::order_actor::OrderError;

/// Client for the orders table.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError, order);

impl OrderClient {
    #[instrument(skip(self, order), fields(event_name = %order.event_name))]
    pub async fn insert_order(&self, order: OrderCreate) -> Result<String, OrderError> {
        debug!("Sending request");
        self.inner.create(order).await.map_err(|e| match e {
            FrameworkError::Rejected(reason) => OrderError::DatabaseError(reason),
            other => OrderError::ActorCommunicationError(other.to_string()),
        })
    }

    /// Orders owned by `client_id`, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders_for(&self, client_id: String) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list_orders()
            .await?
            .into_iter()
            .filter(|order| order.client_id == client_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(orders)
    }
}
