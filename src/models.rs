//! Request and response records for the allocation and name endpoints.
//!
//! Every record is built fresh from a request body and dropped once the
//! response has been written. No field is validated: negative capacities,
//! duplicate ids and out-of-range coordinates are all accepted as-is.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A job to be served, located by its pickup coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub job_id: i32,
    pub customer_id: i32,
    pub start_lat: f64,
    pub start_lng: f64,
}

/// A vehicle and its carrying capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub vehicle_id: i32,
    pub capacity: i32,
}

/// A depot location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Depot {
    pub depot_id: i32,
    pub lat: f64,
    pub lng: f64,
}

/// Body of `POST /api/allocation`.
///
/// A sequence that is missing from the JSON, or present as `null`, is
/// read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    #[serde(default, deserialize_with = "objects_or_empty")]
    pub jobs: Vec<Job>,
    #[serde(default, deserialize_with = "objects_or_empty")]
    pub vehicles: Vec<Vehicle>,
    #[serde(default, deserialize_with = "objects_or_empty")]
    pub depots: Vec<Depot>,
}

/// Echo of an [`AllocationRequest`] with per-sequence counts.
///
/// Only built through `From<AllocationRequest>`, so every `received_*`
/// count matches the length of the sequence next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResponse {
    pub received_jobs: usize,
    pub received_vehicles: usize,
    pub received_depots: usize,
    pub jobs: Vec<Job>,
    pub vehicles: Vec<Vehicle>,
    pub depots: Vec<Depot>,
}

impl From<AllocationRequest> for AllocationResponse {
    fn from(request: AllocationRequest) -> Self {
        Self {
            received_jobs: request.jobs.len(),
            received_vehicles: request.vehicles.len(),
            received_depots: request.depots.len(),
            jobs: request.jobs,
            vehicles: request.vehicles,
            depots: request.depots,
        }
    }
}

/// Static description returned by `GET /api/allocation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AllocationInfo {
    pub message: String,
    pub endpoint: String,
    /// HTTP method that performs the allocation.
    pub method: String,
    /// Time the info was generated, in UTC.
    pub timestamp: DateTime<Utc>,
}

impl AllocationInfo {
    pub const MESSAGE: &'static str = "Allocation API is running and accessible";

    /// Describe the allocation endpoint mounted at `endpoint`, stamped with
    /// the current time.
    pub fn now(endpoint: &str) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            endpoint: endpoint.to_string(),
            method: "POST".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Body of `POST /name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NameRequest {
    #[serde(default)]
    pub input: Option<String>,
}

/// Read a sequence of JSON objects; `null` reads as empty.
///
/// Elements are bound one by one so that an array element (which serde
/// would otherwise map onto struct fields by position) is rejected.
fn objects_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(_) => serde_json::from_value(item)
                .map_err(|e| D::Error::custom(format!("[{}]: {}", index, e))),
            _ => Err(D::Error::custom(format!(
                "[{}]: expected a JSON object",
                index
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_missing_sequences_are_empty() {
        let request: AllocationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, AllocationRequest::default());
    }

    #[test]
    fn test_request_null_sequences_are_empty() {
        let request: AllocationRequest =
            serde_json::from_value(json!({"jobs": null, "vehicles": null, "depots": null}))
                .unwrap();
        assert!(request.jobs.is_empty());
        assert!(request.vehicles.is_empty());
        assert!(request.depots.is_empty());
    }

    #[test]
    fn test_missing_entity_fields_default_to_zero() {
        let request: AllocationRequest =
            serde_json::from_value(json!({"jobs": [{"jobId": 7}], "depots": [{}]})).unwrap();
        assert_eq!(
            request.jobs,
            vec![Job {
                job_id: 7,
                ..Job::default()
            }]
        );
        assert_eq!(request.depots, vec![Depot::default()]);
    }

    #[test]
    fn test_camel_case_keys() {
        let job = Job {
            job_id: 1,
            customer_id: 2,
            start_lat: 3.5,
            start_lng: -4.25,
        };
        assert_eq!(
            serde_json::to_value(job).unwrap(),
            json!({"jobId": 1, "customerId": 2, "startLat": 3.5, "startLng": -4.25})
        );
    }

    #[test]
    fn test_response_counts_match_sequences() {
        let request = AllocationRequest {
            jobs: vec![Job::default(); 3],
            vehicles: vec![Vehicle {
                vehicle_id: 1,
                capacity: -5,
            }],
            depots: Vec::new(),
        };
        let response = AllocationResponse::from(request.clone());

        assert_eq!(response.received_jobs, 3);
        assert_eq!(response.received_vehicles, 1);
        assert_eq!(response.received_depots, 0);
        assert_eq!(response.jobs, request.jobs);
        assert_eq!(response.vehicles, request.vehicles);
    }

    #[test]
    fn test_allocation_info_fields() {
        let info = AllocationInfo::now("/api/allocation");
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["endpoint"], "/api/allocation");
        assert_eq!(value["method"], "POST");
        assert_eq!(value["message"], AllocationInfo::MESSAGE);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_positional_entities_are_rejected() {
        let err = serde_json::from_value::<AllocationRequest>(
            json!({"jobs": [{"jobId": 1}, [2, 20, 1.5, 2.5]]}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("[1]: expected a JSON object"));

        assert!(serde_json::from_value::<AllocationRequest>(json!({"depots": [4]})).is_err());
    }

    #[test]
    fn test_out_of_range_id_is_rejected() {
        let result = serde_json::from_value::<AllocationRequest>(
            json!({"vehicles": [{"vehicleId": 3_000_000_000u64}]}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_name_request_without_input() {
        let request: NameRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.input, None);
    }
}
