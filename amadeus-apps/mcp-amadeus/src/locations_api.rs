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

//! # Airports, cities and airline reference data

use crate::client::{AmadeusClient, ApiRequest};
use crate::error::Result;
use crate::projection::{at, data, data_object};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const LOCATIONS_PATH: &str = "/v1/reference-data/locations";
const MAX_AIRPORT_RADIUS_KM: u32 = 500;

fn ten() -> u32 {
    10
}

fn fifty() -> u32 {
    50
}

fn hundred() -> u32 {
    100
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct KeywordParams {
    /// City name or airport code
    pub keyword: String,
}

async fn locations(client: &AmadeusClient, keyword: &str, sub_type: &str) -> Result<Value> {
    validate::required("keyword", keyword)?;
    let request = ApiRequest::get(LOCATIONS_PATH)
        .query("keyword", keyword)
        .query("subType", sub_type);
    client.execute(&request).await
}

/// Search for airports by city name or airport code
pub async fn search_airports(client: &AmadeusClient, params: KeywordParams) -> Result<Value> {
    let response = locations(client, &params.keyword, "AIRPORT").await?;
    let airports = data(&response)
        .iter()
        .take(10)
        .map(|loc| {
            json!({
                "iata_code": at(loc, "/iataCode"),
                "name": at(loc, "/name"),
                "city": at(loc, "/address/cityName"),
                "country": at(loc, "/address/countryName"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(airports))
}

/// Search for cities by name
pub async fn search_cities(client: &AmadeusClient, params: KeywordParams) -> Result<Value> {
    let response = locations(client, &params.keyword, "CITY").await?;
    let cities = data(&response)
        .iter()
        .take(10)
        .map(|loc| {
            json!({
                "iata_code": at(loc, "/iataCode"),
                "name": at(loc, "/name"),
                "country": at(loc, "/address/countryName"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(cities))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct AirportCodeParams {
    /// Airport IATA code
    pub airport_code: String,
}

/// Get direct flight routes from an airport
pub async fn get_airport_routes(client: &AmadeusClient, params: AirportCodeParams) -> Result<Value> {
    validate::required("airport_code", &params.airport_code)?;
    let request = ApiRequest::get("/v1/airport/direct-destinations")
        .query("departureAirportCode", params.airport_code.to_uppercase());
    let response = client.execute(&request).await?;

    let routes = data(&response)
        .iter()
        .map(|dest| json!({"destination": at(dest, "/destination"), "name": at(dest, "/name")}))
        .collect::<Vec<_>>();
    Ok(Value::Array(routes))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct NearestAirportsParams {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// Search radius in km (max 500)
    #[serde(default = "hundred")]
    pub radius: u32,
    /// Maximum airports to return
    #[serde(default = "ten")]
    pub max_results: u32,
}

/// Find nearest airports to a geographical location
pub async fn get_nearest_airports(
    client: &AmadeusClient,
    params: NearestAirportsParams,
) -> Result<Value> {
    validate::latitude("latitude", params.latitude)?;
    validate::longitude("longitude", params.longitude)?;
    validate::at_least_one("max_results", params.max_results)?;

    let request = ApiRequest::get("/v1/reference-data/locations/airports")
        .query("latitude", params.latitude)
        .query("longitude", params.longitude)
        .query("radius", params.radius.min(MAX_AIRPORT_RADIUS_KM))
        .query("page[limit]", params.max_results)
        .query("sort", "relevance");
    let response = client.execute(&request).await?;

    let airports = data(&response)
        .iter()
        .map(|airport| {
            json!({
                "iata_code": at(airport, "/iataCode"),
                "name": at(airport, "/name"),
                "city": at(airport, "/address/cityName"),
                "country": at(airport, "/address/countryName"),
                "distance_km": at(airport, "/distance/value"),
                "location": at(airport, "/geoCode"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(airports))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct AirlineDestinationsParams {
    /// IATA airline code
    pub airline_code: String,
    /// Maximum destinations
    #[serde(default = "fifty")]
    pub max_results: u32,
}

/// Get all destinations served by a specific airline
pub async fn get_airline_destinations(
    client: &AmadeusClient,
    params: AirlineDestinationsParams,
) -> Result<Value> {
    validate::required("airline_code", &params.airline_code)?;
    validate::at_least_one("max_results", params.max_results)?;

    let request = ApiRequest::get("/v1/airline/destinations")
        .query("airlineCode", params.airline_code.to_uppercase())
        .query("max", params.max_results);
    let response = client.execute(&request).await?;

    let destinations = data(&response)
        .iter()
        .map(|dest| {
            json!({
                "city": at(dest, "/name"),
                "iata_code": at(dest, "/iataCode"),
                "type": at(dest, "/subtype"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(destinations))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct OnTimePerformanceParams {
    /// IATA airport code
    pub airport_code: String,
    /// Date to check (YYYY-MM-DD)
    pub date: String,
}

/// Predict on-time performance for flights from an airport
pub async fn get_airport_on_time_performance(
    client: &AmadeusClient,
    params: OnTimePerformanceParams,
) -> Result<Value> {
    validate::required("airport_code", &params.airport_code)?;
    validate::date("date", &params.date)?;

    let airport = params.airport_code.to_uppercase();
    let request = ApiRequest::get("/v1/airport/predictions/on-time")
        .query("airportCode", &airport)
        .query("date", &params.date);
    let prediction = data_object(&client.execute(&request).await?);

    Ok(json!({
        "airport": airport,
        "date": params.date,
        "on_time_probability": at(&prediction, "/probability"),
        "result": at(&prediction, "/result"),
    }))
}
