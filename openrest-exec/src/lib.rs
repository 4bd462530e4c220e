#![forbid(unsafe_code)]

//! Runtime for operations generated from OpenAPI documents.
//!
//! Documents are parsed and typed by `openrest-core`; this crate loads them, builds one
//! [`OperationFactory`] per operation, binds call-site arguments and performs the HTTP call.

pub mod executor;
pub mod factory;
pub mod openapi;
pub mod registry;
pub mod settings;

pub use crate::executor::{
    BoundOperation, CancelHandle, CancelSignal, HttpClient, HttpClientFactory, HttpError,
    ReqwestClientFactory, RestRequest, RestResponse, RestStep, RestStepKind, RuntimeState,
    ValueSource,
};
pub use crate::factory::{FreezeData, OperationFactory};
pub use crate::openapi::{build_factories, ParameterCatalog, ServiceContext, SpecLoader, SpecSource};
pub use crate::registry::OperationRegistry;
pub use crate::settings::{ConnectorSettings, SpecificationSettings};
