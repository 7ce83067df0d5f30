//! Signed-request HTTP client for the Constellix DNS API and its Sonar companion host, with
//! reactive rate-limit throttling and uniform error normalization.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod normalize;
pub mod obs;
pub mod rate_limit;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")] pub use reqwest::Error as ReqwestError;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use ::http as http_types;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
