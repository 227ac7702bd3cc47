use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = (); // Orders are immutable once submitted

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order from the insert payload.
    ///
    /// # Notes
    /// The order starts as `pending`; `created_at` is stamped by [`Entity::on_create`].
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.client_id.is_empty() {
            return Err("Order has no owner".to_string());
        }
        if !params.price.is_finite() || params.price < 0.0 {
            return Err(format!("Invalid price: {}", params.price));
        }
        Ok(Self {
            id,
            client_id: params.client_id,
            event_name: params.event_name,
            software_type: params.software_type,
            dimensions: params.dimensions,
            turnaround_time: params.turnaround_time,
            has_darkroom_file: params.has_darkroom_file,
            price: params.price,
            status: OrderStatus::Pending,
            created_at: None,
        })
    }

    fn on_create(&mut self) -> Result<(), String> {
        self.created_at = Some(Utc::now());
        Ok(())
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err(format!("Order {} cannot be modified", self.id))
    }
}
