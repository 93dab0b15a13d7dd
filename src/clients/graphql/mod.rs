//! GraphQL client for the checkout API.
//!
//! Built on top of [`HttpClient`](crate::clients::HttpClient), it posts
//! `{query, variables}` documents to the `graphql` endpoint.
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The query result data
//! - `errors`: Any GraphQL errors (still HTTP 200)
//!
//! [`GraphqlClient::query`] returns the raw response and leaves `errors` to
//! the caller. [`GraphqlClient::query_data`] treats a non-empty `errors`
//! array as a failure and returns only `data`.

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
