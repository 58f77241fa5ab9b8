use reqwest::{
    Client, RequestBuilder, Response,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{Instrument, debug, error, info_span};
use uuid::Uuid;

use crate::{
    api::error::{ClassifiedError, Failure, classify},
    config::Config,
    model::attendance::{AttendanceRecord, DraftRecord, RecordId},
    models::{CreateAttendanceReq, DeleteResponse, ErrorBody, MessageResponse},
};

const ATTENDANCE_PATH: &str = "/api/attendance";
const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// A 200 reply can still decline the deletion; check `success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReceipt {
    pub success: bool,
    pub message: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait AttendanceRepository {
    async fn list(&self) -> Result<Vec<AttendanceRecord>, ClassifiedError>;

    async fn create(&self, draft: &DraftRecord) -> Result<Option<String>, ClassifiedError>;

    async fn remove(&self, id: &RecordId) -> Result<RemovalReceipt, ClassifiedError>;
}

#[derive(Clone)]
pub struct HttpAttendanceRepository {
    client: Client,
    base_url: String,
}

impl HttpAttendanceRepository {
    pub fn new(config: &Config) -> Result<Self, ClassifiedError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, ATTENDANCE_PATH)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}{}/{}", self.base_url, ATTENDANCE_PATH, id)
    }

    /// Sends the request and turns anything but a 2xx reply into a classified error.
    async fn dispatch(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ClassifiedError> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("attendance_request", operation, request_id = %request_id);

        async move {
            debug!("Sending request");

            let outcome = match request.header(REQUEST_ID_HEADER, &request_id).send().await {
                Ok(response) => ensure_success(response).await,
                Err(e) => Err(Failure::from(e)),
            };

            outcome.map_err(|failure| {
                let classified = classify(failure);
                error!(error = %classified, kind = ?classified.kind, "Request failed");
                classified
            })
        }
        .instrument(span)
        .await
    }
}

async fn ensure_success(response: Response) -> Result<Response, Failure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Error bodies are best effort; a missing or non-JSON body still classifies.
    let server_message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error);

    Err(Failure::Status {
        status: status.as_u16(),
        server_message,
    })
}

impl AttendanceRepository for HttpAttendanceRepository {
    async fn list(&self) -> Result<Vec<AttendanceRecord>, ClassifiedError> {
        let response = self
            .dispatch("list", self.client.get(self.collection_url()))
            .await?;

        let records: Vec<AttendanceRecord> = response.json().await?;
        debug!(count = records.len(), "Attendance fetched");
        Ok(records)
    }

    async fn create(&self, draft: &DraftRecord) -> Result<Option<String>, ClassifiedError> {
        let payload = CreateAttendanceReq::from(draft);
        let response = self
            .dispatch("create", self.client.post(self.collection_url()).json(&payload))
            .await?;

        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }

    async fn remove(&self, id: &RecordId) -> Result<RemovalReceipt, ClassifiedError> {
        let response = self
            .dispatch("remove", self.client.delete(self.record_url(id)))
            .await?;

        let body: DeleteResponse = response.json().await?;
        debug!(id = %id, success = body.success, "Delete answered");
        Ok(RemovalReceipt {
            success: body.success,
            message: body.message,
        })
    }
}
