//!  Amadeus Travel Tools
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! The blocking client runs the same requests from plain threads.


use anyhow::Result;
use axum::http::Method;
use mcp_amadeus::blocking;
use mcp_amadeus::flights_api::{self, FlightStatusParams};
use mock_upstream::MockUpstream;
use serde_json::json;

/// The mock needs its own runtime; the blocking client brings another.
fn start_mock() -> Result<(tokio::runtime::Runtime, MockUpstream)> {
    let rt = tokio::runtime::Runtime::new()?;
    let mock = rt.block_on(MockUpstream::start());
    Ok((rt, mock))
}

#[test]
fn blocking_calls_share_the_token() -> Result<()> {
    let (_rt, mock) = start_mock()?;
    mock.on(
        Method::GET,
        "/v1/reference-data/locations",
        200,
        json!({"data": [{"iataCode": "NCE", "name": "COTE D'AZUR", "address": {"cityName": "NICE", "countryName": "FRANCE"}}]}),
    );
    let client = blocking::AmadeusClient::new(mock.config())?;

    let token = client.get_token()?;
    assert_eq!(token.secret(), "token-1");

    let airports = client.invoke("amadeus_search_airports", json!({"keyword": "nice"}))?;
    assert_eq!(
        airports,
        json!([{"iata_code": "NCE", "name": "COTE D'AZUR", "city": "NICE", "country": "FRANCE"}])
    );
    let raw = client.get("/v1/reference-data/locations", &[("keyword", "NCE")])?;
    assert_eq!(raw["data"][0]["iataCode"], "NCE");

    assert_eq!(mock.grant_count(), 1);
    assert_eq!(client.token_refreshes(), 1);
    Ok(())
}

#[test]
fn blocking_client_runs_library_operations() -> Result<()> {
    let (_rt, mock) = start_mock()?;
    mock.on(
        Method::GET,
        "/v2/schedule/flights",
        200,
        json!({"data": []}),
    );
    let client = blocking::AmadeusClient::new(mock.config())?;

    let params = FlightStatusParams {
        carrier_code: "af".to_string(),
        flight_number: "1234".to_string(),
        departure_date: "2025-03-15".to_string(),
    };
    let status = client.block_on(|c| flights_api::get_flight_status(c, params))?;
    assert_eq!(status, json!([]));

    let call = &mock.api_requests()[0];
    assert_eq!(call.query_value("carrierCode"), Some("AF"));
    assert_eq!(call.query_value("flightNumber"), Some("1234"));
    assert_eq!(call.query_value("scheduledDepartureDate"), Some("2025-03-15"));
    Ok(())
}

#[test]
fn blocking_errors_match_async_errors() -> Result<()> {
    let (_rt, mock) = start_mock()?;
    let body = json!({"errors": [{"status": 404, "code": 1797, "title": "NOT FOUND"}]});
    mock.on(Method::GET, "/v1/booking/flight-orders/MISSING", 404, body.clone());
    let client = blocking::AmadeusClient::new(mock.config())?;

    let err = client
        .invoke("get_flight_order", json!({"order_id": "MISSING"}))
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.upstream_body(), Some(&body));

    let err = client.invoke("search_flights", json!({})).unwrap_err();
    assert_eq!(err.kind(), "validation_error");
    Ok(())
}
