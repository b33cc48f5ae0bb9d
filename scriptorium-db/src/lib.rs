//! In-memory data store for posts, comments and users.
//!
//! Tables live in process memory behind a [`client::DbClient`]. Reads go
//! through [`query::Query`] values that are evaluated against a snapshot of
//! the table, so no query state is ever shared between callers.

pub mod client;
pub mod query;
pub mod record;
pub mod seed;
pub mod table;
