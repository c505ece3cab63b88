//! # Chapter 1: Data Routing
//!
//! What happens to the data you pass to a call.
//!
//! ## Defaults and Required Keys
//!
//! ```
//! use quiver::{Endpoint, build_config, params};
//! use serde_json::json;
//!
//! let search = Endpoint::get("https://api.example.com/search")
//!     .default_param("per_page", 50)
//!     .required(["q"]);
//!
//! // Caller data wins over defaults
//! let config = build_config(&search, Some(params(&json!({"q": "rust", "per_page": 10})).unwrap())).unwrap();
//! assert_eq!(config.data.unwrap()["per_page"], json!(10));
//!
//! // Missing keys are rejected before anything is sent
//! let err = build_config(&search, Some(params(&json!({"page": 2})).unwrap())).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Missing some of the following required parameters: q :: Current parameters :: per_page, page"
//! );
//! ```
//!
//! Turn the check off with `.validate(false)`.
//!
//! ## Where the Data Goes
//!
//! | Endpoint                                      | Query string | Body            |
//! |-----------------------------------------------|--------------|-----------------|
//! | no method or GET, no headers                  | yes          | JSON            |
//! | POST, no headers                              | no           | JSON            |
//! | `Content-Type: application/json`              | if GET       | JSON            |
//! | `Content-Type: application/x-www-form-urlencoded` | if GET   | url-encoded     |
//! | `Content-Type: multipart/form-data`           | if GET       | multipart       |
//! | headers, but no `Content-Type`                | if GET       | none            |
//!
//! The rules add up: a GET endpoint with no headers sends the data both in the
//! query string and as a JSON body. Use [`RequestConfig::channels`](crate::RequestConfig::channels)
//! to see what a call will do.
//!
//! ## Next Steps
//!
//! - [Chapter 2: Hooks & Transports][super::chapter_2]
