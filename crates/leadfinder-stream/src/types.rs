//! Wire types for the zip-code search event stream.
//!
//! ## Observed stream shape
//!
//! The backend streams one JSON object per line. Every record carries a
//! `type` discriminator:
//!
//! ```text
//! {"type":"progress","message":"Searching for car washes within 5000m radius of 90210"}
//! {"type":"warning","message":"Could not find coordinates for zip code 00000"}
//! {"type":"result","num_zip_codes":2,"num_results":5,"results":[...]}
//! ```
//!
//! The result record may carry extra fields (e.g. a closing `message`);
//! they are ignored. The region-search endpoint returns the same result
//! shape in a single response but names the elapsed time `exc_time`, hence
//! the serde alias.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One matched business. The schema is backend-defined (name, address,
/// rating, phone, …) and deliberately not fixed here; nothing in this crate
/// assumes specific keys.
pub type BusinessRecord = serde_json::Map<String, Value>;

/// Terminal payload of a search: the full result set plus counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// How many zip codes the backend actually searched. Absent from
    /// region-search payloads.
    #[serde(rename = "num_zip_codes", default)]
    pub num_zip_codes_searched: u64,

    #[serde(rename = "num_results")]
    pub num_results_found: u64,

    /// Wall-clock seconds the backend spent on the search. The region
    /// endpoint calls this `exc_time`; older streams omit it entirely.
    #[serde(default, alias = "exc_time")]
    pub elapsed_seconds: f64,

    #[serde(rename = "results")]
    pub records: Vec<BusinessRecord>,
}

/// A classified record decoded from one stream line.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Progress { message: String },
    Warning { message: String },
    Result { payload: SearchResult },
    /// Not valid JSON, no recognized `type`, or missing required fields.
    /// Carried for diagnostics; never terminates the stream.
    Malformed { raw_line: String },
}
