//! # Chapter 0: Getting Started
//!
//! Your first quiver API in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Describe endpoints in a [`Schema`](crate::Schema)
//! - Generate an [`Api`](crate::Api) from it
//! - Call a method and read the response
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! quiver = "0.1"
//! serde_json = "1.0"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Your First API
//!
//! ```no_run
//! use quiver::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> quiver::Result<()> {
//!     let schema = Schema::new().namespace(
//!         "users",
//!         Schema::new()
//!             .endpoint("list", Endpoint::get("https://api.example.com/users"))
//!             .endpoint("create", Endpoint::post("https://api.example.com/users")),
//!     );
//!
//!     let api = Api::with_default_client(&schema);
//!
//!     let users: serde_json::Value = api.call("users.list", None).await?.json()?;
//!     println!("users: {users}");
//!
//!     let create = api.method("users.create").expect("declared above");
//!     create.call(Some(params(&json!({"name": "Ada"}))?)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Schemas as JSON
//!
//! The same schema can be loaded from JSON. An object holding the `apiSchema`
//! key is an endpoint; any other object is a namespace:
//!
//! ```text
//! {
//!   "users": {
//!     "list":   { "apiSchema": { "url": "https://api.example.com/users" } },
//!     "create": { "apiSchema": { "method": "POST", "url": "https://api.example.com/users" } }
//!   }
//! }
//! ```
//!
//! Use [`Schema::from_json`](crate::Schema::from_json); errors name the
//! offending path, such as `users.create.apiSchema.method`.
//!
//! ## Next Steps
//!
//! - [Chapter 1: Data Routing][super::chapter_1] - Defaults, required keys, channels
