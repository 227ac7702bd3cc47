use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};
use crate::actor_framework::ResourceActor;
use crate::auth_actor::AuthService;
use crate::clients::{AuthClient, OrderClient, ProfileClient};
use crate::domain::{Order, Profile};
use crate::flows::{AccessGuard, OrderForm, ProfileManager};
use crate::pricing::PricingEngine;
use super::config::AppConfig;

fn id_generator(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The print-order application: backend actors plus the flows wired to them.
///
/// Responsible for starting the actors, wiring clients into the flows, and
/// shutting everything down. Forms handed out by [`StudioSystem::order_form`]
/// hold client handles and must be dropped before [`StudioSystem::shutdown`].
pub struct StudioSystem {
    pub auth_client: AuthClient,
    pub profile_client: ProfileClient,
    pub order_client: OrderClient,
    pub access_guard: AccessGuard,
    pub profile_manager: ProfileManager,
    pricing: Arc<PricingEngine>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StudioSystem {
    pub fn new(config: &AppConfig) -> Self {
        // 1. Identity provider
        let (auth_service, auth_client) = AuthService::new(config.channel_buffer);
        let auth_handle = tokio::spawn(auth_service.run());

        // 2. Profiles table, keyed by identity user id
        let (profile_actor, profile_resource_client) =
            ResourceActor::<Profile>::new(config.channel_buffer, id_generator("user"));
        let profile_client = ProfileClient::new(profile_resource_client);
        let profile_handle = tokio::spawn(profile_actor.run());

        // 3. Orders table
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.channel_buffer, id_generator("order"));
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Flows
        let access_guard = AccessGuard::new(auth_client.clone(), profile_client.clone());
        let profile_manager = ProfileManager::new(auth_client.clone(), profile_client.clone());
        let pricing = Arc::new(PricingEngine::new(config.pricing.clone()));

        info!(
            products = config.pricing.products.len(),
            turnarounds = config.pricing.turnarounds.len(),
            "Studio system started"
        );

        Self {
            auth_client,
            profile_client,
            order_client,
            access_guard,
            profile_manager,
            pricing,
            handles: vec![auth_handle, profile_handle, order_handle],
        }
    }

    /// A fresh new-order form sharing this system's pricing engine.
    pub fn order_form(&self) -> OrderForm {
        OrderForm::new(self.access_guard.clone(), self.order_client.clone(), self.pricing.clone())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        let Self {
            auth_client,
            profile_client,
            order_client,
            access_guard,
            profile_manager,
            pricing: _,
            handles,
        } = self;

        // Actors stop once every client handle is gone.
        drop(access_guard);
        drop(profile_manager);
        drop(auth_client);
        drop(profile_client);
        drop(order_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
