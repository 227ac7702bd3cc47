use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use crate::clients::OrderClient;
use crate::domain::{OrderCreate, Role};
use crate::order_actor::OrderError;
use crate::pricing::{PricingEngine, PricingError, ProductType, Turnaround};
use super::access_guard::{AccessGuard, GuardDecision, Requirement};
use super::notice::{Notice, Route};

pub const EVENT_NAME: &str = "event_name";
pub const SOFTWARE_TYPE: &str = "software_type";
pub const DIMENSIONS: &str = "dimensions";
pub const TURNAROUND_TIME: &str = "turnaround_time";

const SUBMIT_FAILED: &str = "Failed to submit order. Please try again.";

/// Raw values as entered in the new-order form.
#[derive(Debug, Clone, Default)]
pub struct OrderFormValues {
    pub event_name: String,
    pub software_type: String,
    pub dimensions: String,
    pub turnaround_time: String,
    pub has_darkroom_file: bool,
}

/// Form values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub event_name: String,
    pub product_type: ProductType,
    pub dimensions: String,
    pub turnaround: Turnaround,
    pub has_darkroom_file: bool,
}

/// Field-level validation messages, keyed by form field name.
#[derive(Debug, Clone, Error, PartialEq, Default)]
#[error("Validation failed for {} field(s)", .fields.len())]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }
}

impl OrderFormValues {
    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<ValidatedOrder, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let event_name = required(&mut errors, EVENT_NAME, &self.event_name, "Event name is required");
        let dimensions = required(&mut errors, DIMENSIONS, &self.dimensions, "Dimensions are required");
        let product_type = required(&mut errors, SOFTWARE_TYPE, &self.software_type, "Software type is required")
            .and_then(|value| vocabulary::<ProductType>(&mut errors, SOFTWARE_TYPE, value, "Select a valid software type"));
        let turnaround = required(&mut errors, TURNAROUND_TIME, &self.turnaround_time, "Turnaround time is required")
            .and_then(|value| vocabulary::<Turnaround>(&mut errors, TURNAROUND_TIME, value, "Select a valid turnaround time"));

        match (event_name, product_type, dimensions, turnaround) {
            (Some(event_name), Some(product_type), Some(dimensions), Some(turnaround)) if errors.is_empty() => {
                Ok(ValidatedOrder {
                    event_name: event_name.to_string(),
                    product_type,
                    dimensions: dimensions.to_string(),
                    turnaround,
                    has_darkroom_file: self.has_darkroom_file,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required<'a>(errors: &mut ValidationErrors, field: &'static str, value: &'a str, message: &str) -> Option<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, message);
        None
    } else {
        Some(value)
    }
}

fn vocabulary<T: std::str::FromStr>(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}

/// Submission lifecycle of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("Not authorized to submit orders, redirecting to {}", .0.path())]
    Unauthorized(Route),
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),
    #[error("Failed to persist order: {0}")]
    Persistence(#[from] OrderError),
}

impl SubmitError {
    /// Generic message for failures the user can only retry. Field errors and
    /// redirects are shown through other channels.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitError::Pricing(_) | SubmitError::Persistence(_) => Some(Notice::error(SUBMIT_FAILED)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub order_id: String,
    pub price: f64,
    pub notice: Notice,
    pub navigate_to: Route,
}

/// The new-order form. Only one submission may be in flight at a time.
pub struct OrderForm {
    guard: AccessGuard,
    orders: OrderClient,
    pricing: Arc<PricingEngine>,
    state: Mutex<FormState>,
}

// Returns the form to Idle however the submission ends, including when the
// submitting future is dropped.
struct InFlight<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *lock(self.state) = FormState::Idle;
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl OrderForm {
    pub fn new(guard: AccessGuard, orders: OrderClient, pricing: Arc<PricingEngine>) -> Self {
        Self {
            guard,
            orders,
            pricing,
            state: Mutex::new(FormState::Idle),
        }
    }

    pub fn state(&self) -> FormState {
        *lock(&self.state)
    }

    pub fn cancel(&self) -> Route {
        Route::ClientDashboard
    }

    #[instrument(skip(self, values), fields(event_name = %values.event_name))]
    pub async fn submit(&self, values: OrderFormValues) -> Result<SubmitOutcome, SubmitError> {
        let _in_flight = self.begin()?;
        let result = self.run_submission(values).await;
        if let Err(e) = &result {
            match e {
                SubmitError::Pricing(_) | SubmitError::Persistence(_) => error!(error = %e, "Error submitting order"),
                _ => debug!(error = %e, "Order not submitted"),
            }
        }
        result
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        let mut state = lock(&self.state);
        if *state != FormState::Idle {
            return Err(SubmitError::AlreadySubmitting);
        }
        *state = FormState::Validating;
        Ok(InFlight { state: &self.state })
    }

    async fn run_submission(&self, values: OrderFormValues) -> Result<SubmitOutcome, SubmitError> {
        let order = values.validate()?;
        *lock(&self.state) = FormState::Submitting;

        let context = match self.guard.check(&Requirement::Role(Role::Client)).await {
            GuardDecision::Granted(context) => context,
            GuardDecision::Redirect(route) => return Err(SubmitError::Unauthorized(route)),
        };

        let price = self
            .pricing
            .compute_price(order.product_type, order.turnaround, order.has_darkroom_file)?;

        let payload = OrderCreate {
            client_id: context.session.user_id,
            event_name: order.event_name,
            software_type: order.product_type,
            dimensions: order.dimensions,
            turnaround_time: order.turnaround,
            has_darkroom_file: order.has_darkroom_file,
            price,
        };
        debug!(payload = %serde_json::to_string(&payload).unwrap_or_default(), "Inserting order");

        let order_id = self.orders.insert_order(payload).await?;
        info!(order_id = %order_id, price, "Order submitted");

        Ok(SubmitOutcome {
            order_id,
            price,
            notice: Notice::success("Your order has been submitted successfully"),
            navigate_to: Route::ClientDashboard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::Receiver;
    use crate::actor_framework::{FrameworkError, ResourceRequest};
    use crate::clients::ProfileClient;
    use crate::domain::{Order, Profile, Session, SessionState};
    use crate::messages::AuthRequest;
    use crate::mock_framework::{
        create_mock_auth_client, create_mock_client, expect_create, expect_get, expect_get_session, is_drained,
    };

    struct Mocks {
        auth: Receiver<AuthRequest>,
        profiles: Receiver<ResourceRequest<Profile>>,
        orders: Receiver<ResourceRequest<Order>>,
    }

    fn form() -> (OrderForm, Mocks) {
        let (auth, auth_rx) = create_mock_auth_client(4);
        let (profiles, profile_rx) = create_mock_client::<Profile>(4);
        let (orders, order_rx) = create_mock_client::<Order>(4);
        let guard = AccessGuard::new(auth, ProfileClient::new(profiles));
        let form = OrderForm::new(guard, OrderClient::new(orders), Arc::new(PricingEngine::default()));
        (form, Mocks { auth: auth_rx, profiles: profile_rx, orders: order_rx })
    }

    fn booth_order() -> OrderFormValues {
        OrderFormValues {
            event_name: "Spring Gala".into(),
            software_type: "darkroom_booth_3".into(),
            dimensions: "4x6".into(),
            turnaround_time: "1d".into(),
            has_darkroom_file: true,
        }
    }

    async fn grant_client(mocks: &mut Mocks) {
        expect_get_session(&mut mocks.auth).await.expect("Expected GetSession")
            .send(Ok(SessionState::Authenticated(Session::new("user_1", "ada@example.com")))).unwrap();
        let (id, responder) = expect_get(&mut mocks.profiles).await.expect("Expected profile Get");
        responder.send(Ok(Some(Profile {
            id,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::Client,
        }))).unwrap();
    }

    #[test]
    fn test_validation_reports_every_missing_field() {
        let errors = OrderFormValues::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(EVENT_NAME), Some("Event name is required"));
        assert_eq!(errors.get(SOFTWARE_TYPE), Some("Software type is required"));
        assert_eq!(errors.get(DIMENSIONS), Some("Dimensions are required"));
        assert_eq!(errors.get(TURNAROUND_TIME), Some("Turnaround time is required"));
    }

    #[test]
    fn test_validation_rejects_values_outside_vocabulary() {
        let values = OrderFormValues { turnaround_time: "24h".into(), ..booth_order() };
        let errors = values.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(TURNAROUND_TIME), Some("Select a valid turnaround time"));
    }

    #[test]
    fn test_validation_trims_values() {
        let values = OrderFormValues { event_name: "  Spring Gala ".into(), ..booth_order() };
        let order = values.validate().unwrap();
        assert_eq!(order.event_name, "Spring Gala");
        assert_eq!(order.product_type, ProductType::DarkroomBooth3);
        assert_eq!(order.turnaround, Turnaround::OneDay);
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_calls() {
        let (form, mut mocks) = form();

        let result = form.submit(OrderFormValues { dimensions: " ".into(), ..booth_order() }).await;

        let Err(SubmitError::Invalid(errors)) = result else { panic!("Expected validation failure") };
        assert_eq!(errors.get(DIMENSIONS), Some("Dimensions are required"));
        assert_eq!(form.state(), FormState::Idle);
        assert!(is_drained(&mut mocks.auth));
    }

    #[tokio::test]
    async fn test_cancel_returns_to_dashboard() {
        let (form, mut mocks) = form();
        assert_eq!(form.cancel(), Route::ClientDashboard);
        assert_eq!(form.state(), FormState::Idle);
        assert!(is_drained(&mut mocks.auth));
    }

    #[tokio::test]
    async fn test_submit_prices_with_engine_and_persists() {
        let (form, mut mocks) = form();
        let task = tokio::spawn(async move { form.submit(booth_order()).await });

        grant_client(&mut mocks).await;
        let (payload, responder) = expect_create(&mut mocks.orders).await.expect("Expected order Create");
        assert_eq!(payload.client_id, "user_1");
        assert_eq!(payload.price, 35.0);
        assert!(payload.has_darkroom_file);
        responder.send(Ok("order_1".to_string())).unwrap();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome.order_id, "order_1");
        assert_eq!(outcome.price, 35.0);
        assert_eq!(outcome.navigate_to, Route::ClientDashboard);
        assert_eq!(outcome.notice, Notice::success("Your order has been submitted successfully"));
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_is_rejected() {
        let (form, mut mocks) = form();
        let task = tokio::spawn(async move { form.submit(booth_order()).await });

        expect_get_session(&mut mocks.auth).await.unwrap()
            .send(Ok(SessionState::Unauthenticated)).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(SubmitError::Unauthorized(Route::Landing)));
        assert_eq!(result.unwrap_err().notice(), None);
        assert!(is_drained(&mut mocks.orders));
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_generic_notice() {
        let (form, mut mocks) = form();
        let task = tokio::spawn(async move {
            let result = form.submit(booth_order()).await;
            (result, form.state())
        });

        grant_client(&mut mocks).await;
        let (_, responder) = expect_create(&mut mocks.orders).await.unwrap();
        responder.send(Err(FrameworkError::Rejected("insert failed".into()))).unwrap();

        let (result, state) = task.await.unwrap();
        let error = result.unwrap_err();
        assert_eq!(error, SubmitError::Persistence(OrderError::DatabaseError("insert failed".into())));
        assert_eq!(error.notice(), Some(Notice::error(SUBMIT_FAILED)));
        assert_eq!(state, FormState::Idle);
    }

    #[tokio::test]
    async fn test_second_submit_rejected_while_in_flight() {
        let (form, mut mocks) = form();
        let form = Arc::new(form);

        let first = {
            let form = form.clone();
            tokio::spawn(async move { form.submit(booth_order()).await })
        };

        // The session lookup only happens once the form is Submitting.
        let session_responder = expect_get_session(&mut mocks.auth).await.unwrap();
        assert_eq!(form.state(), FormState::Submitting);
        assert_eq!(form.submit(booth_order()).await, Err(SubmitError::AlreadySubmitting));

        session_responder.send(Ok(SessionState::Unauthenticated)).unwrap();
        assert_eq!(first.await.unwrap(), Err(SubmitError::Unauthorized(Route::Landing)));
        assert_eq!(form.state(), FormState::Idle);
        assert!(is_drained(&mut mocks.auth));
    }
}
