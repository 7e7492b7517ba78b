//! List pagination shapes.
//!
//! This layer holds no durable store, so list endpoints answer with empty
//! pages; the shapes exist so clients can code against the final contract.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

fn default_page() -> u32 {
	1
}

fn default_limit() -> u32 {
	10
}

/// Common list query parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PageParams {
	#[serde(default = "default_page")]
	pub page: u32,
	#[serde(default = "default_limit")]
	pub limit: u32,
	pub status: Option<String>,
	pub merchant: Option<String>,
	pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Pagination {
	pub page: u32,
	pub limit: u32,
	pub total: u64,
	pub pages: u32,
}

impl Pagination {
	/// Pagination block for an empty result set.
	pub fn empty(params: &PageParams) -> Self {
		Self {
			page: params.page,
			limit: params.limit,
			total: 0,
			pages: 0,
		}
	}
}
