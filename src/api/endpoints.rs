//! Endpoint route table and per-endpoint client methods.
//!
//! Every endpoint is a pure mapping from a JSON input object to a
//! `(method, path, payload)` triple. Placeholders in the path template
//! (`{_id}`, `{eventInstanceId}`, ...) are filled from input fields of the same
//! name, and those fields never reach the payload.

use serde::Serialize;
use serde_json::Value;

use crate::api::client::AblApiClient;
use crate::api::error::{ApiError, ApiResult};
use crate::shared::types::{Method, Payload, PayloadMode};

/// One API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Client method name, used in error messages
    pub name: &'static str,
    pub method: Method,
    /// Path relative to the prefix, e.g. `events/{eventInstanceId}/guides/{guide}`
    pub template: &'static str,
    pub payload: PayloadMode,
}

impl Endpoint {
    pub const fn new(
        name: &'static str,
        method: Method,
        template: &'static str,
        payload: PayloadMode,
    ) -> Self {
        Self {
            name,
            method,
            template,
            payload,
        }
    }

    /// Path parameter names, in template order.
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        self.template.split('/').filter_map(placeholder)
    }

    /// Split an input object into the concrete path and the payload to send.
    ///
    /// Path parameters are removed from the input. The rest becomes the payload
    /// for [`PayloadMode::Remainder`] endpoints and is dropped for
    /// [`PayloadMode::Empty`] ones.
    pub fn resolve(&self, mut input: Payload) -> ApiResult<(String, Payload)> {
        let mut segments = Vec::new();
        for segment in self.template.split('/') {
            match placeholder(segment) {
                Some(param) => {
                    let value = input.remove(param);
                    segments.push(self.render_param(param, value)?);
                }
                None => segments.push(segment.to_string()),
            }
        }

        let payload = match self.payload {
            PayloadMode::Remainder => input,
            PayloadMode::Empty => Payload::new(),
        };

        Ok((segments.join("/"), payload))
    }

    fn render_param(&self, param: &str, value: Option<Value>) -> ApiResult<String> {
        let rendered = match value {
            // URL parsers collapse dot segments, so the signed path would not be the one sent
            Some(Value::String(s)) if s == "." || s == ".." => {
                return Err(ApiError::InvalidInput(format!(
                    "{}: path parameter '{}' cannot be '{}'",
                    self.name, param, s
                )));
            }
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                return Err(ApiError::InvalidInput(format!(
                    "{}: path parameter '{}' must be a string or number",
                    self.name, param
                )));
            }
            _ => {
                return Err(ApiError::MissingPathParameter {
                    endpoint: self.name,
                    parameter: param.to_string(),
                });
            }
        };
        Ok(urlencoding::encode(&rendered).into_owned())
    }
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Convert endpoint input into a JSON object.
///
/// `null` (e.g. `()` or `None`) becomes an empty object.
pub fn to_payload<T: Serialize>(input: &T) -> ApiResult<Payload> {
    let value = serde_json::to_value(input)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize input: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Payload::new()),
        other => Err(ApiError::InvalidInput(format!(
            "Input must be a JSON object, got {}",
            other
        ))),
    }
}

// ============================================================================
// Route table
// ============================================================================

pub mod routes {
    use super::Endpoint;
    use crate::shared::types::Method::{Delete, Get, Patch, Post, Put};
    use crate::shared::types::PayloadMode::{Empty, Remainder};

    // Api keys
    pub const GET_API_KEYS: Endpoint = Endpoint::new("get_api_keys", Post, "apikeys/affiliate", Empty);

    // Activities
    pub const GET_ACTIVITIES: Endpoint = Endpoint::new("get_activities", Get, "activities", Remainder);
    pub const CREATE_ACTIVITIES: Endpoint = Endpoint::new("create_activities", Post, "activities", Remainder);
    pub const GET_ACTIVITY: Endpoint = Endpoint::new("get_activity", Get, "activities/{_id}", Empty);
    pub const EDIT_ACTIVITY: Endpoint = Endpoint::new("edit_activity", Put, "activities/{_id}", Remainder);
    pub const REMOVE_ACTIVITY: Endpoint = Endpoint::new("remove_activity", Delete, "activities/{_id}", Empty);

    // Coupons
    pub const GET_COUPON: Endpoint = Endpoint::new("get_coupon", Get, "coupons/{couponId}", Empty);
    pub const CREATE_COUPON: Endpoint = Endpoint::new("create_coupon", Post, "coupons", Remainder);
    pub const GET_COUPON_BY_ID: Endpoint = Endpoint::new("get_coupon_by_id", Get, "coupon/{couponId}", Empty);
    pub const EDIT_COUPON: Endpoint = Endpoint::new("edit_coupon", Put, "coupons/{_id}", Remainder);

    // Clients
    pub const GET_CLIENTS: Endpoint = Endpoint::new("get_clients", Get, "operators/clients", Remainder);
    pub const GET_CUSTOMERS: Endpoint = Endpoint::new("get_customers", Get, "customers", Remainder);

    // Events
    pub const GET_EVENT: Endpoint = Endpoint::new("get_event", Get, "events/{eventInstanceId}", Empty);
    pub const EDIT_EVENT: Endpoint = Endpoint::new("edit_event", Put, "events/{eventInstanceId}", Remainder);
    pub const REMOVE_EVENT: Endpoint = Endpoint::new("remove_event", Delete, "events/{eventInstanceId}", Empty);
    pub const ADD_GUIDE_TO_EVENT: Endpoint =
        Endpoint::new("add_guide_to_event", Post, "events/{eventInstanceId}/guides/{guide}", Empty);
    pub const REMOVE_GUIDE_FROM_EVENT: Endpoint =
        Endpoint::new("remove_guide_from_event", Delete, "events/{eventInstanceId}/guides/{guide}", Empty);
    pub const GET_DAILY_EVENTS: Endpoint = Endpoint::new("get_daily_events", Get, "events/daily/{date}", Remainder);
    pub const GET_EVENT_ROSTER: Endpoint =
        Endpoint::new("get_event_roster", Get, "events/{eventInstanceId}/roster", Empty);

    // Guides
    pub const GET_GUIDES: Endpoint = Endpoint::new("get_guides", Get, "operators/guide", Remainder);
    pub const CREATE_GUIDE: Endpoint = Endpoint::new("create_guide", Post, "operators/guide", Remainder);
    pub const GET_GUIDE: Endpoint = Endpoint::new("get_guide", Get, "operators/guide/{_id}", Empty);
    pub const EDIT_GUIDE: Endpoint = Endpoint::new("edit_guide", Put, "operators/guide/{_id}", Remainder);
    pub const REMOVE_GUIDE: Endpoint = Endpoint::new("remove_guide", Delete, "operators/guide/{_id}", Empty);
    pub const GET_GUIDES_EVENTS: Endpoint =
        Endpoint::new("get_guides_events", Get, "operators/guide/{_id}/events", Remainder);

    // Time slots
    pub const GET_TIME_SLOTS: Endpoint = Endpoint::new("get_time_slots", Get, "timeslots", Remainder);
    pub const ADD_GUIDE_TO_TIME_SLOT: Endpoint =
        Endpoint::new("add_guide_to_time_slot", Post, "timeslots/{eventId}/guides/{guide}", Remainder);
    pub const REMOVE_GUIDE_FROM_TIME_SLOT: Endpoint =
        Endpoint::new("remove_guide_from_time_slot", Post, "timeslots/{eventId}/guides/{guide}", Remainder);
    pub const REMOVE_TIME_SLOT: Endpoint = Endpoint::new("remove_time_slot", Delete, "timeslots/{eventId}", Empty);

    // Users
    pub const EDIT_USER: Endpoint = Endpoint::new("edit_user", Put, "users", Remainder);
    pub const LOGIN_USER: Endpoint = Endpoint::new("login_user", Post, "login", Remainder);

    // Metrics and rosters
    pub const METRICS_OVERVIEW: Endpoint = Endpoint::new("metrics_overview", Get, "metrics/overview", Remainder);
    pub const GET_ROSTER: Endpoint = Endpoint::new("get_roster", Get, "roster/{type}", Remainder);

    // Bookings
    pub const CREATE_BOOKING: Endpoint = Endpoint::new("create_booking", Post, "bookings", Remainder);
    pub const GET_OFFLINE_DATA: Endpoint =
        Endpoint::new("get_offline_data", Get, "bookings/getOfflineData", Remainder);
    pub const GET_BOOKINGS: Endpoint = Endpoint::new("get_bookings", Get, "bookings/{eventInstanceId}", Remainder);

    // Transactions
    pub const PARTIAL_REFUND: Endpoint = Endpoint::new("partial_refund", Patch, "transaction/{_id}", Remainder);

    /// Every endpoint exposed by the client.
    pub const ALL: &[Endpoint] = &[
        GET_API_KEYS,
        GET_ACTIVITIES,
        CREATE_ACTIVITIES,
        GET_ACTIVITY,
        EDIT_ACTIVITY,
        REMOVE_ACTIVITY,
        GET_COUPON,
        CREATE_COUPON,
        GET_COUPON_BY_ID,
        EDIT_COUPON,
        GET_CLIENTS,
        GET_CUSTOMERS,
        GET_EVENT,
        EDIT_EVENT,
        REMOVE_EVENT,
        ADD_GUIDE_TO_EVENT,
        REMOVE_GUIDE_FROM_EVENT,
        GET_DAILY_EVENTS,
        GET_EVENT_ROSTER,
        GET_GUIDES,
        CREATE_GUIDE,
        GET_GUIDE,
        EDIT_GUIDE,
        REMOVE_GUIDE,
        GET_GUIDES_EVENTS,
        GET_TIME_SLOTS,
        ADD_GUIDE_TO_TIME_SLOT,
        REMOVE_GUIDE_FROM_TIME_SLOT,
        REMOVE_TIME_SLOT,
        EDIT_USER,
        LOGIN_USER,
        METRICS_OVERVIEW,
        GET_ROSTER,
        CREATE_BOOKING,
        GET_OFFLINE_DATA,
        GET_BOOKINGS,
        PARTIAL_REFUND,
    ];
}

// ============================================================================
// Client methods
// ============================================================================

impl AblApiClient {
    /// Call an endpoint with a JSON input object.
    pub async fn call<T: Serialize>(&self, endpoint: &Endpoint, input: T) -> ApiResult<Value> {
        let (path, payload) = endpoint.resolve(to_payload(&input)?)?;
        self.request(endpoint.method, &path, payload).await
    }

    // =========================================================================
    // Api keys
    // =========================================================================

    pub async fn get_api_keys(&self) -> ApiResult<Value> {
        self.call(&routes::GET_API_KEYS, ()).await
    }

    // =========================================================================
    // Activity endpoints
    // =========================================================================

    pub async fn get_activities<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_ACTIVITIES, input).await
    }

    pub async fn create_activities<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::CREATE_ACTIVITIES, input).await
    }

    /// `{_id}` → GET `activities/{_id}`
    pub async fn get_activity<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_ACTIVITY, input).await
    }

    /// `{_id, ...fields}` → PUT `activities/{_id}` with `fields` as body
    pub async fn edit_activity<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::EDIT_ACTIVITY, input).await
    }

    pub async fn remove_activity<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::REMOVE_ACTIVITY, input).await
    }

    // =========================================================================
    // Coupon endpoints
    // =========================================================================

    pub async fn get_coupon<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_COUPON, input).await
    }

    pub async fn create_coupon<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::CREATE_COUPON, input).await
    }

    /// Fetches active and inactive coupons alike.
    pub async fn get_coupon_by_id<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_COUPON_BY_ID, input).await
    }

    pub async fn edit_coupon<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::EDIT_COUPON, input).await
    }

    // =========================================================================
    // Client endpoints
    // =========================================================================

    pub async fn get_clients<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_CLIENTS, input).await
    }

    pub async fn get_customers<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_CUSTOMERS, input).await
    }

    // =========================================================================
    // Event endpoints
    // =========================================================================

    pub async fn get_event<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_EVENT, input).await
    }

    pub async fn edit_event<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::EDIT_EVENT, input).await
    }

    pub async fn remove_event<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::REMOVE_EVENT, input).await
    }

    pub async fn add_guide_to_event<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::ADD_GUIDE_TO_EVENT, input).await
    }

    pub async fn remove_guide_from_event<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::REMOVE_GUIDE_FROM_EVENT, input).await
    }

    /// `{date: "YYYY-MM-DD", ...filters}` → GET `events/daily/{date}`
    pub async fn get_daily_events<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_DAILY_EVENTS, input).await
    }

    pub async fn get_event_roster<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_EVENT_ROSTER, input).await
    }

    // =========================================================================
    // Guide endpoints
    // =========================================================================

    pub async fn get_guides<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_GUIDES, input).await
    }

    pub async fn create_guide<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::CREATE_GUIDE, input).await
    }

    pub async fn get_guide<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_GUIDE, input).await
    }

    pub async fn edit_guide<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::EDIT_GUIDE, input).await
    }

    pub async fn remove_guide<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::REMOVE_GUIDE, input).await
    }

    /// `{_id, dateRange: [start, end?]}` → GET `operators/guide/{_id}/events`
    pub async fn get_guides_events<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_GUIDES_EVENTS, input).await
    }

    // =========================================================================
    // Time slot endpoints
    // =========================================================================

    pub async fn get_time_slots<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_TIME_SLOTS, input).await
    }

    pub async fn add_guide_to_time_slot<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::ADD_GUIDE_TO_TIME_SLOT, input).await
    }

    pub async fn remove_guide_from_time_slot<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::REMOVE_GUIDE_FROM_TIME_SLOT, input).await
    }

    pub async fn remove_time_slot<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::REMOVE_TIME_SLOT, input).await
    }

    // =========================================================================
    // User endpoints
    // =========================================================================

    pub async fn edit_user<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::EDIT_USER, input).await
    }

    pub async fn login_user<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::LOGIN_USER, input).await
    }

    // =========================================================================
    // Metrics and roster endpoints
    // =========================================================================

    pub async fn metrics_overview<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::METRICS_OVERVIEW, input).await
    }

    /// `{type: "pdf" | "csv", ...selection}` → GET `roster/{type}`
    ///
    /// PDF and CSV rosters are not JSON; they resolve to a JSON string.
    pub async fn get_roster<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_ROSTER, input).await
    }

    // =========================================================================
    // Booking endpoints
    // =========================================================================

    pub async fn create_booking<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::CREATE_BOOKING, input).await
    }

    pub async fn get_offline_data<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_OFFLINE_DATA, input).await
    }

    pub async fn get_bookings<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::GET_BOOKINGS, input).await
    }

    // =========================================================================
    // Transaction endpoints
    // =========================================================================

    /// `{_id, amount}` → PATCH `transaction/{_id}` with `{amount}` as body
    pub async fn partial_refund<T: Serialize>(&self, input: T) -> ApiResult<Value> {
        self.call(&routes::PARTIAL_REFUND, input).await
    }
}
