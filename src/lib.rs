//! # Shopify GraphQL Admin API Client
//!
//! A Rust client for the Shopify GraphQL Admin API, built around bulk query
//! execution with nested-result reassembly and cursor pagination.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and validated newtypes
//! - A GraphQL client with typed decoding of the `data` payload
//! - Bulk query execution: job submission, polling with backoff, deadline,
//!   and cancellation, and streaming reassembly of flattened JSONL results
//!   via [`bulk::BulkOperation`] and [`bulk::NestedSchema`]
//! - Cursor pagination via [`pagination::ListOptions`] and
//!   [`pagination::Page`]
//! - Typed services for orders, collections, fulfillments, and locations
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_graphql::{AccessToken, Client, ClientConfig, ShopDomain};
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_example").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = Client::new(&config);
//! ```
//!
//! ## Bulk Queries
//!
//! Large listings run as remote bulk jobs instead of paging through the
//! synchronous API. The result file flattens nested connections; a
//! [`bulk::NestedSchema`] declares how child records fold back into their
//! parents:
//!
//! ```rust,ignore
//! use shopify_graphql::bulk::NestedSchema;
//!
//! let schema = NestedSchema::new().child("LineItem", "lineItems");
//! let orders: Vec<Order> = client
//!     .bulk()
//!     .query(
//!         "{ orders { edges { node { id name lineItems { edges { node { id sku } } } } } } }",
//!         &schema,
//!     )
//!     .await?;
//! ```
//!
//! The resource services wrap the common cases, e.g.
//! `client.orders().list_all().await`.
//!
//! ## Cursor Pagination
//!
//! When a bounded page is enough, list with cursors instead:
//!
//! ```rust,ignore
//! use shopify_graphql::pagination::ListOptions;
//!
//! let mut options = ListOptions {
//!     first: Some(100),
//!     ..ListOptions::default()
//! };
//! loop {
//!     let page = client.orders().list_after_cursor(&options).await?;
//!     process(page.items);
//!     if !page.has_next_page {
//!         break;
//!     }
//!     options.after = page.last_cursor;
//! }
//! ```

pub mod bulk;
mod client;
pub mod clients;
pub mod config;
mod error;
pub mod pagination;
pub mod resources;

pub use client::Client;
pub use config::{AccessToken, ApiVersion, ClientConfig, ClientConfigBuilder, HostUrl, ShopDomain};
pub use error::ConfigError;
