//! Credit Form Library
//!
//! This library turns a credit form submission into a call to a credit score
//! prediction endpoint and renders the returned score and suggestions into
//! two output regions.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `form`: Submitted form fields and the submit event.
//! - `handlers`: HTTP handlers of the form host.
//! - `models`: Prediction result and rendered output.
//! - `page`: Output regions and the credit form page.
//! - `payload`: Coercion of form values into the JSON payload.
//! - `predict_client`: Client for the `/predict` endpoint.
//! - `render`: HTML fragments for the output regions.
//! - `submitter`: The submit handler tying it all together.

pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod page;
pub mod payload;
pub mod predict_client;
pub mod render;
pub mod submitter;
