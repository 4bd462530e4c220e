#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use openrest_core::DocumentFormat;
use openrest_exec::executor::{LiteralSource, ValueSource};
use openrest_exec::{
    build_factories, CancelSignal, HttpClient, HttpClientFactory, HttpError, OperationFactory,
    OperationRegistry, RestRequest, RestResponse, RuntimeState, ServiceContext,
};
use serde_json::Value as JsonValue;

pub const BASE_URL: &str = "http://baseURL";

pub const ORCHESTRATOR: &str = r#"
openapi: 3.0.1
info:
  title: Orchestrator.ClientAPI
  version: "1.0"
paths:
  /api/v{version}/Bags:
    get:
      operationId: Bags_Get
      summary: Lists bags.
      parameters:
        - name: Name
          in: query
          schema:
            type: string
        - name: version
          in: path
          required: true
          schema:
            type: string
            default: "1"
        - name: Custodian
          in: query
          schema:
            type: string
      responses:
        "200":
          description: Success
    post:
      operationId: Bags_Post
      parameters:
        - name: version
          in: path
          required: true
          schema:
            type: string
        - name: X-Request-Id
          in: header
          required: true
          schema:
            type: string
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
      responses:
        "200":
          description: Success
  /api/v{version}/Bags/{id}:
    parameters:
      - name: version
        in: path
        required: true
        schema:
          type: string
      - name: id
        in: path
        required: true
        schema:
          type: integer
          format: int32
    get:
      responses:
        "200":
          description: Success
    put:
      requestBody:
        content:
          application/json:
            schema:
              type: object
      responses:
        "200":
          description: Success
    patch:
      requestBody:
        content:
          application/json:
            schema:
              type: object
      responses:
        "200":
          description: Success
    delete:
      responses:
        "200":
          description: Success
  /api/v{version}/Bags/{id}/Sequences:
    get:
      operationId: Bag_Sequences
      parameters:
        - name: version
          in: path
          required: true
          schema:
            type: string
        - name: id
          in: path
          required: true
          schema:
            type: integer
      responses:
        "200":
          description: Success
"#;

pub fn factories(spec: &str, service: &str) -> Vec<OperationFactory> {
    let document = openrest_core::parse_openapi_str(spec, DocumentFormat::Auto).expect("valid spec");
    build_factories(Arc::new(document), &ServiceContext::new(service, BASE_URL))
        .expect("factories")
}

pub fn registry(spec: &str, service: &str) -> OperationRegistry {
    OperationRegistry::from_factories(factories(spec, service))
}

pub fn literal(value: JsonValue) -> Arc<dyn ValueSource> {
    Arc::new(LiteralSource::new(value))
}

#[derive(Default)]
struct MockInner {
    requests: Mutex<Vec<(String, RestRequest)>>,
    responses: Mutex<VecDeque<Result<RestResponse, HttpError>>>,
    delay: Mutex<Option<Duration>>,
}

/// Records every request and answers from a queue (200 with `{}` once it runs dry).
#[derive(Clone, Default)]
pub struct MockHttp {
    inner: Arc<MockInner>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Ok(RestResponse::new(status, body.as_bytes().to_vec())))
    }

    pub fn respond_error(self, status: u16, message: &str) -> Self {
        self.push(Ok(RestResponse::new(status, message.as_bytes().to_vec()).with_error_message(message)))
    }

    pub fn fail(self, error: HttpError) -> Self {
        self.push(Err(error))
    }

    pub fn delayed(self, delay: Duration) -> Self {
        *self.inner.delay.lock().unwrap() = Some(delay);
        self
    }

    fn push(self, response: Result<RestResponse, HttpError>) -> Self {
        self.inner.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<(String, RestRequest)> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    pub fn state(&self) -> RuntimeState {
        RuntimeState::new(Arc::new(self.clone()))
    }
}

impl HttpClientFactory for MockHttp {
    fn create_client(&self, base_url: &str) -> Arc<dyn HttpClient> {
        Arc::new(MockClient {
            base_url: base_url.to_string(),
            inner: Arc::clone(&self.inner),
        })
    }
}

struct MockClient {
    base_url: String,
    inner: Arc<MockInner>,
}

#[async_trait]
impl HttpClient for MockClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(
        &self,
        request: RestRequest,
        _cancel: &CancelSignal,
    ) -> Result<RestResponse, HttpError> {
        self.inner
            .requests
            .lock()
            .unwrap()
            .push((self.base_url.clone(), request));
        let delay = *self.inner.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.inner.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(RestResponse::new(200, b"{}".to_vec())))
    }
}
