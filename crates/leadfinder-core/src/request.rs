use serde::Serialize;

use crate::validate::{parse_zip_codes, validate_included_types, ValidationError};

/// Business categories the backend can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessType {
    CarWash,
    CarDetailer,
}

impl BusinessType {
    /// The tag sent to the backend in `included_types`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            BusinessType::CarWash => "car_wash",
            BusinessType::CarDetailer => "car_detailer",
        }
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for BusinessType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car_wash" => Ok(BusinessType::CarWash),
            "car_detailer" => Ok(BusinessType::CarDetailer),
            other => Err(ValidationError::UnknownBusinessType(other.to_string())),
        }
    }
}

/// A validated search submission.
///
/// Field names and the `radius` rename match the backend's request schema:
/// `{ "zip_codes": [...], "included_types": [...], "radius": n }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub zip_codes: Vec<String>,
    pub included_types: Vec<String>,
    #[serde(rename = "radius")]
    pub radius_meters: u32,
}

impl SearchRequest {
    /// Build a request from raw UI input, running the full validation pass.
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] for malformed zip text, more than the
    /// allowed number of codes, or an empty business-type selection.
    pub fn from_raw(
        raw_zip_codes: &str,
        radius_meters: u32,
        included_types: &[BusinessType],
    ) -> Result<Self, ValidationError> {
        let zip_codes = parse_zip_codes(raw_zip_codes)?;
        let included_types: Vec<String> =
            included_types.iter().map(|t| t.tag().to_owned()).collect();
        validate_included_types(&included_types)?;
        Ok(Self {
            zip_codes,
            included_types,
            radius_meters,
        })
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
