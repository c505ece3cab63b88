//! # Tutorial: Schema-Driven API Clients with quiver
//!
//! Describe an API once, call it everywhere.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first schema and call
//! 2. [Data Routing][chapter_1] - Defaults, required keys, query vs body
//! 3. [Hooks & Transports][chapter_2] - `extendConfig`, custom transports, errors
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
