//! Single request/response exchanges for resources.
//!
//! [`Dispatcher`] turns a URL, a method and an optional JSON payload into one
//! call on its [`Transport`], then decodes the JSON answer.
//!
//! Every exchange is logged at debug level through `tracing`:
//!
//! ```text
//! POST http://localhost:3000/songs.json
//! {"artist":"Joe","title":"A Little Help"}
//!
//! 201 Created
//! {"id":1,"artist":"Joe","title":"A Little Help"}
//! ------------------------------
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::clients::{
    DataType, HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError, Transport,
};
use crate::rest::errors::DispatchError;

/// Name of the header carrying the access token.
pub const AUTHORIZATION_HEADER: &str = "AUTHORIZATION";

/// Line logged after every response.
const LOG_SEPARATOR: &str = "------------------------------";

/// Body sent with POST and PUT requests that carry no payload.
const EMPTY_OBJECT: &str = "{}";

/// Formats the `AUTHORIZATION` header value for a token.
#[must_use]
pub fn authorization_value(token: &str) -> String {
    format!("Token token={token}")
}

/// Encodes any serializable payload into a JSON value.
///
/// # Errors
///
/// Returns [`DispatchError::Encoding`] if the payload cannot be represented
/// as JSON (for example a map with non-string keys).
pub fn encode_payload<S: Serialize + ?Sized>(payload: &S) -> Result<Value, DispatchError> {
    serde_json::to_value(payload).map_err(DispatchError::Encoding)
}

/// Sends resource requests through a [`Transport`].
///
/// # Example
///
/// ```rust,ignore
/// use active_resource::clients::{HttpClient, HttpMethod};
/// use active_resource::rest::Dispatcher;
/// use serde_json::json;
///
/// let dispatcher = Dispatcher::new(HttpClient::new(None)?);
/// let song = dispatcher
///     .dispatch(
///         "http://localhost:3000/songs.json",
///         HttpMethod::Post,
///         Some(&json!({"artist": "Joe", "title": "A Little Help"})),
///         None,
///     )
///     .await;
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    transport: C,
}

impl<C: Transport> Dispatcher<C> {
    /// Creates a dispatcher over the given transport.
    #[must_use]
    pub const fn new(transport: C) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &C {
        &self.transport
    }

    /// Performs one exchange and returns the decoded body.
    ///
    /// POST and PUT send `payload` as JSON (`{}` when absent); GET and DELETE
    /// send no body. An empty response body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Encoding`] if the payload cannot be encoded
    /// - [`DispatchError::Transport`] if the transport fails or the status is not 2xx
    /// - [`DispatchError::Decoding`] if the response body is not valid JSON
    pub async fn try_dispatch(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Value>,
        access_token: Option<&str>,
    ) -> Result<Value, DispatchError> {
        let request = build_request(url, method, payload, access_token)?;

        tracing::debug!("{} {}\n{}", request.http_method, request.url, request.body_text());

        let response = self.transport.send(&request).await?;

        tracing::debug!("\n{} {}\n{}", response.code, response.reason, response.body);
        tracing::debug!("{LOG_SEPARATOR}");

        decode_response(response)
    }

    /// Performs one exchange, logging any failure instead of returning it.
    ///
    /// Returns `None` when [`try_dispatch`](Self::try_dispatch) would fail;
    /// exactly one debug entry describes the failure, including the response
    /// body when one was received.
    pub async fn dispatch(
        &self,
        url: &str,
        method: HttpMethod,
        payload: Option<&Value>,
        access_token: Option<&str>,
    ) -> Option<Value> {
        match self.try_dispatch(url, method, payload, access_token).await {
            Ok(value) => Some(value),
            Err(error) => {
                log_failure(&error);
                None
            }
        }
    }
}

pub(crate) fn log_failure(error: &DispatchError) {
    let body = error.response_body().unwrap_or_default();
    tracing::debug!("\n Exception {error} {body}");
}

fn build_request(
    url: &str,
    method: HttpMethod,
    payload: Option<&Value>,
    access_token: Option<&str>,
) -> Result<HttpRequest, DispatchError> {
    let mut builder = HttpRequest::builder(method, url);

    if method.has_body() {
        let body = match payload {
            Some(value) => serde_json::to_string(value).map_err(DispatchError::Encoding)?,
            None => EMPTY_OBJECT.to_string(),
        };
        builder = builder.body(body).body_type(DataType::Json);
    }

    if let Some(token) = access_token.filter(|token| !token.is_empty()) {
        builder = builder.header(AUTHORIZATION_HEADER, authorization_value(token));
    }

    builder
        .build()
        .map_err(|e| DispatchError::Transport(HttpError::from(e)))
}

fn decode_response(response: HttpResponse) -> Result<Value, DispatchError> {
    if !response.is_ok() {
        return Err(HttpError::Response(HttpResponseError {
            code: response.code,
            reason: response.reason,
            body: response.body,
        })
        .into());
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|source| DispatchError::Decoding {
        body: response.body,
        source,
    })
}
