use tracing::{error, info, warn, Instrument};
use print_orders::app_system::{setup_tracing, AppConfig, StudioSystem};
use print_orders::domain::{ProfileCreate, Role, Session};
use print_orders::flows::{GuardDecision, OrderFormValues, ProfileUpdate, Requirement};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::load(None).map_err(|e| e.to_string())?;
    info!(channel_buffer = config.channel_buffer, "Starting print order studio");

    let system = StudioSystem::new(&config);

    // Signup happens outside this application; seed one client account.
    let profile = ProfileCreate {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        role: Role::Client,
    };
    let user_id = system.profile_client.create_profile(profile).await.map_err(|e| e.to_string())?;
    system
        .auth_client
        .sign_in(Session::new(user_id.clone(), "alice@example.com"))
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %user_id, "Client signed in");

    let span = tracing::info_span!("new_order");
    async {
        if let GuardDecision::Redirect(route) = system.access_guard.check(&Requirement::Role(Role::Client)).await {
            warn!(route = route.path(), "New order view redirected");
            return;
        }

        let form = system.order_form();
        let values = OrderFormValues {
            event_name: "Spring Gala".to_string(),
            software_type: "darkroom_booth_3".to_string(),
            dimensions: "4x6".to_string(),
            turnaround_time: "1d".to_string(),
            has_darkroom_file: true,
        };
        match form.submit(values).await {
            Ok(outcome) => info!(
                order_id = %outcome.order_id,
                price = outcome.price,
                navigate_to = outcome.navigate_to.path(),
                "{}", outcome.notice.description
            ),
            Err(e) => error!(error = %e, "Order submission failed"),
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("profile");
    async {
        let session = match system.auth_client.get_session().await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Session lookup failed");
                return;
            }
        };
        let Some(profile) = system.profile_manager.get_profile(&session).await else {
            warn!("No profile for session");
            return;
        };

        let update = ProfileUpdate {
            name: "Alice Liddell".to_string(),
            email: "alice.liddell@example.com".to_string(),
        };
        match system.profile_manager.update_profile(&session, &profile.id, update).await {
            Ok(updated) => info!(name = %updated.profile.name, "{}", updated.notice.description),
            Err(e) => error!("{}", e.notice().description),
        }
    }
    .instrument(span)
    .await;

    match system.order_client.list_orders_for(user_id).await {
        Ok(orders) => info!(count = orders.len(), "Client dashboard loaded"),
        Err(e) => error!(error = %e, "Failed to load orders"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
