//! Typed REST client for the inventory backend

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{
    BasketKind, Category, CategoryForm, Credentials, DashboardStats, DateRange, LoginResponse,
    MovementType, Product, ProductForm, Purchase, Role, Sale, StockMovement, StockMovementForm,
    SubmissionPayload, Supplier, SupplierForm, User, UserForm,
};
use validator::Validate;

use crate::endpoints::{self, ResourceKind};
use crate::envelope::{parse_body, unwrap_entity, unwrap_list, unwrap_list_with_keys};
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, ApiResponse, Method, Transport};
use crate::session::SessionContext;

/// A record type served by one backend resource
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> i64;
}

/// A resource edited through a modal form
pub trait EditableResource: Resource {
    type Form: Serialize + Validate + Send + Sync;
}

/// A resource created by submitting a basket
pub trait BasketResource: Resource {
    const BASKET: BasketKind;
}

macro_rules! resource {
    ($record:ty, $kind:expr) => {
        impl Resource for $record {
            const KIND: ResourceKind = $kind;

            fn id(&self) -> i64 {
                self.id
            }
        }
    };
    ($record:ty, $kind:expr, $form:ty) => {
        resource!($record, $kind);

        impl EditableResource for $record {
            type Form = $form;
        }
    };
}

resource!(Product, ResourceKind::Product, ProductForm);
resource!(Category, ResourceKind::Category, CategoryForm);
resource!(Supplier, ResourceKind::Supplier, SupplierForm);
resource!(User, ResourceKind::User, UserForm);
resource!(StockMovement, ResourceKind::StockMovement, StockMovementForm);
resource!(Purchase, ResourceKind::Purchase);
resource!(Sale, ResourceKind::Sale);

impl BasketResource for Purchase {
    const BASKET: BasketKind = BasketKind::Purchase;
}

impl BasketResource for Sale {
    const BASKET: BasketKind = BasketKind::Sale;
}

fn resource_for(kind: BasketKind) -> ResourceKind {
    match kind {
        BasketKind::Purchase => ResourceKind::Purchase,
        BasketKind::Sale => ResourceKind::Sale,
    }
}

/// REST client shared by every page controller
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: SessionContext,
    send_bearer_token: bool,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionContext) -> Self {
        tracing::warn!(
            legacy = endpoints::LEGACY_STOCK_MOVEMENT_DELETE,
            used = "/mouvementStock/supprimer/{id}",
            "Stock movements are deleted through their own route"
        );
        Self {
            transport,
            session,
            send_bearer_token: false,
        }
    }

    /// Attach `Authorization: Bearer <token>` while a session is open
    pub fn with_bearer_token(mut self, enabled: bool) -> Self {
        self.send_bearer_token = enabled;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fetch the full collection of a resource
    pub async fn list<R: Resource>(&self) -> ClientResult<Vec<R>> {
        self.list_from(&endpoints::list(R::KIND)).await
    }

    /// Fetch a collection of `R` from a non-default route
    pub async fn list_from<R: Resource>(&self, path: &str) -> ClientResult<Vec<R>> {
        let value = self.execute(ApiRequest::get(path)).await?;
        unwrap_list(value, R::KIND)
    }

    /// Products at or under their minimum stock
    pub async fn low_stock_alerts(&self) -> ClientResult<Vec<Product>> {
        self.list_from(endpoints::LOW_STOCK_ALERTS).await
    }

    /// Validate and send a create form.
    ///
    /// Returns the created record when the backend echoes it back.
    pub async fn create<R: EditableResource>(&self, form: &R::Form) -> ClientResult<Option<R>> {
        form.validate()?;
        let request =
            ApiRequest::new(Method::Post, endpoints::create(R::KIND)).with_body(to_body(form)?);
        let value = self.execute(request).await?;
        Ok(echoed(value))
    }

    pub async fn update<R: EditableResource>(
        &self,
        id: i64,
        form: &R::Form,
    ) -> ClientResult<Option<R>> {
        form.validate()?;
        let path = endpoints::update(R::KIND, id).ok_or_else(|| {
            ClientError::Validation(format!("{} records cannot be edited", R::KIND))
        })?;
        let request = ApiRequest::new(Method::Put, path).with_body(to_body(form)?);
        let value = self.execute(request).await?;
        Ok(echoed(value))
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> ClientResult<()> {
        let request = ApiRequest::new(Method::Delete, endpoints::delete(R::KIND, id));
        self.execute(request).await?;
        Ok(())
    }

    /// Post a basket payload to the create route of its transaction kind
    pub async fn submit(&self, payload: &SubmissionPayload) -> ClientResult<Value> {
        let kind = resource_for(payload.kind);
        let request =
            ApiRequest::new(Method::Post, endpoints::create(kind)).with_body(to_body(payload)?);
        self.execute(request).await
    }

    pub async fn submit_purchase(
        &self,
        payload: &SubmissionPayload,
    ) -> ClientResult<Option<Purchase>> {
        self.submit_as(payload).await
    }

    pub async fn submit_sale(&self, payload: &SubmissionPayload) -> ClientResult<Option<Sale>> {
        self.submit_as(payload).await
    }

    pub(crate) async fn submit_as<R: BasketResource>(
        &self,
        payload: &SubmissionPayload,
    ) -> ClientResult<Option<R>> {
        if payload.kind != R::BASKET {
            return Err(ClientError::Validation(format!(
                "A {:?} basket cannot be submitted as {}",
                payload.kind,
                R::KIND
            )));
        }
        let value = self.submit(payload).await?;
        Ok(echoed(value))
    }

    pub async fn dashboard(&self, range: Option<&DateRange>) -> ClientResult<DashboardStats> {
        let mut request = ApiRequest::get(endpoints::DASHBOARD_STATS);
        if let Some(range) = range {
            for (key, value) in range.query_pairs() {
                request = request.with_query(key, value);
            }
        }
        let value = self.execute(request).await?;
        let stats = match value {
            Value::Null => DashboardStats::default(),
            other => serde_json::from_value(other)?,
        };
        Ok(stats)
    }

    pub async fn roles(&self) -> ClientResult<Vec<Role>> {
        let value = self.execute(ApiRequest::get(endpoints::ROLES)).await?;
        unwrap_list_with_keys(value, &["roles", "role"]).map_err(ClientError::Decode)
    }

    pub async fn movement_types(&self) -> ClientResult<Vec<MovementType>> {
        let value = self.execute(ApiRequest::get(endpoints::MOVEMENT_TYPES)).await?;
        unwrap_list_with_keys(value, &["typeMvtStocks", "typeMvtStock"])
            .map_err(ClientError::Decode)
    }

    /// Exchange credentials for a token and open the session
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        credentials.validate()?;
        let request =
            ApiRequest::new(Method::Post, endpoints::LOGIN).with_body(to_body(credentials)?);
        let value = self.execute(request).await?;
        let response: LoginResponse = serde_json::from_value(value)?;
        if response.token.is_empty() {
            return Err(ClientError::Decode("login response carried an empty token".into()));
        }

        self.session.open(response.token.clone());
        tracing::info!("Logged in as {}", credentials.email);
        Ok(response)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    async fn execute(&self, request: ApiRequest) -> ClientResult<Value> {
        // Bearer mode needs a token on every route except login
        let request = if self.send_bearer_token && request.path != endpoints::LOGIN {
            let token = self.session.token().ok_or(ClientError::Unauthenticated)?;
            request.with_bearer(Some(token))
        } else {
            request
        };
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await?;
        check_status(method, &path, response)
    }
}

fn check_status(method: Method, path: &str, response: ApiResponse) -> ClientResult<Value> {
    if !response.is_success() {
        let err = ClientError::from_response(response.status, &response.body);
        tracing::debug!("{} {} failed: {}", method.as_str(), path, err);
        return Err(err);
    }
    parse_body(&response.body)
}

/// The record a successful mutation echoed back, if any.
/// Success is decided by the status code alone.
fn echoed<R: Resource>(value: Value) -> Option<R> {
    match unwrap_entity::<R>(value, R::KIND) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("{} response without a readable record: {}", R::KIND, e);
            None
        }
    }
}

fn to_body<T: Serialize>(payload: &T) -> ClientResult<Value> {
    Ok(serde_json::to_value(payload)?)
}
