//! Asynchronous fetch of the remote boundary query.
//!
//! The fetch runs on its own thread with a current-thread tokio runtime and
//! reports exactly one completion over a channel; the app thread drains that
//! channel between events, so every state write stays on the event thread.

use crossbeam_channel::Sender;
use geobound::document::SectionEnvelope;
use std::thread;
use thiserror::Error;

/// The field selection sent to the query service.
pub const SECTIONS_QUERY: &str = "{ getCoordinatesSections { geometryInFormatLatLong } }";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("boundary query transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response does not contain the expected field; a subtype of fetch
    /// failure as far as the load state machine is concerned.
    #[error("boundary query response is missing '{0}'")]
    MalformedResponse(&'static str),
}

/// One fetch completion, tagged with the load generation that started it so
/// the app can discard completions that outlive their mount.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<SectionEnvelope, FetchError>,
}

/// Spawns the single fetch of one mount. The owning view may be gone by the
/// time the request finishes; a failed send is simply dropped.
pub fn spawn_fetch(
    endpoint: String,
    generation: u64,
    tx: Sender<FetchOutcome>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .expect("failed to build fetch runtime");

        let result = rt.block_on(run_fetch(&endpoint));

        match &result {
            Ok(envelope) => {
                log::debug!("Fetched {} coordinate sections", envelope.sections.len())
            }
            Err(err) => log::debug!("Boundary fetch ended with error: {err}"),
        }

        let _ = tx.send(FetchOutcome { generation, result });
    })
}

async fn run_fetch(endpoint: &str) -> Result<SectionEnvelope, FetchError> {
    // Client lifetime is scoped to this one fetch.
    let client = reqwest::Client::new();
    let body = serde_json::json!({ "query": SECTIONS_QUERY });

    let response = client
        .post(endpoint)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    let payload: serde_json::Value = response.json().await?;
    parse_sections_response(payload)
}

/// Extracts the section envelope from the query response's `data` wrapper.
pub fn parse_sections_response(payload: serde_json::Value) -> Result<SectionEnvelope, FetchError> {
    let data = payload
        .get("data")
        .cloned()
        .ok_or(FetchError::MalformedResponse("data"))?;

    serde_json::from_value(data)
        .map_err(|_| FetchError::MalformedResponse("getCoordinatesSections"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_response_parses() {
        let envelope = parse_sections_response(json!({
            "data": { "getCoordinatesSections": [
                { "geometryInFormatLatLong": [[10, 20]] }
            ] }
        }))
        .unwrap();

        assert_eq!(envelope.sections.len(), 1);
        assert_eq!(envelope.sections[0].pairs, vec![[10.0, 20.0]]);
    }

    #[test]
    fn missing_data_wrapper_is_malformed() {
        let err = parse_sections_response(json!({ "getCoordinatesSections": [] })).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse("data")));
    }

    #[test]
    fn missing_sections_field_is_malformed() {
        let err = parse_sections_response(json!({ "data": { "somethingElse": [] } })).unwrap_err();
        assert!(matches!(
            err,
            FetchError::MalformedResponse("getCoordinatesSections")
        ));
    }
}
