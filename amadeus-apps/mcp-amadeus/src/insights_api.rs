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

//! # Travel insights and trip parsing
//!
//! Points of interest, destination recommendations, and the booking
//! confirmation parser.

use crate::client::{AmadeusClient, ApiRequest, path_segment};
use crate::error::Result;
use crate::projection::{at, data, data_object, list_or_empty};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const TRIP_PARSER_PATH: &str = "/v3/travel/trip-parser/pnr-documents";

#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoiCategory {
    #[default]
    #[serde(alias = "sights")]
    Sights,
    #[serde(alias = "nightlife")]
    Nightlife,
    #[serde(alias = "restaurant")]
    Restaurant,
    #[serde(alias = "shopping")]
    Shopping,
}

impl PoiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoiCategory::Sights => "SIGHTS",
            PoiCategory::Nightlife => "NIGHTLIFE",
            PoiCategory::Restaurant => "RESTAURANT",
            PoiCategory::Shopping => "SHOPPING",
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    #[default]
    #[serde(alias = "html")]
    Html,
    #[serde(alias = "eml")]
    Eml,
    #[serde(alias = "pdf")]
    Pdf,
}

fn adventure() -> String {
    "ADVENTURE".to_string()
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct TravelRecommendationsParams {
    /// City IATA code
    pub city_code: String,
    /// SIGHTS, NIGHTLIFE, RESTAURANT, SHOPPING
    #[serde(default)]
    pub category: PoiCategory,
}

/// Get travel recommendations for a city
pub async fn get_travel_recommendations(
    client: &AmadeusClient,
    params: TravelRecommendationsParams,
) -> Result<Value> {
    validate::required("city_code", &params.city_code)?;

    let request = ApiRequest::get("/v1/reference-data/locations/pois")
        .query("cityCode", params.city_code.to_uppercase())
        .query("category", params.category.as_str());
    let response = client.execute(&request).await?;

    let pois = data(&response)
        .iter()
        .take(15)
        .map(|poi| {
            json!({
                "name": at(poi, "/name"),
                "category": at(poi, "/category"),
                "tags": list_or_empty(poi, "/tags"),
                "rank": at(poi, "/rank"),
                "location": at(poi, "/geoCode"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(pois))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct RecommendedDestinationsParams {
    /// Comma-separated IATA city codes
    pub origin_cities: String,
    /// Interest category (accepted for compatibility, not sent upstream)
    #[serde(default = "adventure")]
    pub traveler_interest: String,
}

/// Get destination recommendations based on traveler interests
pub async fn get_recommended_destinations(
    client: &AmadeusClient,
    params: RecommendedDestinationsParams,
) -> Result<Value> {
    validate::required("origin_cities", &params.origin_cities)?;

    let request = ApiRequest::get("/v1/reference-data/recommended-locations")
        .query("cityCodes", params.origin_cities.to_uppercase())
        .query("travelerCountryCode", "US");
    let response = client.execute(&request).await?;

    let destinations = data(&response)
        .iter()
        .take(15)
        .map(|dest| {
            json!({
                "destination": at(dest, "/name"),
                "iata_code": at(dest, "/iataCode"),
                "country": at(dest, "/address/countryName"),
                "score": at(dest, "/score"),
                "type": at(dest, "/subType"),
                "location": at(dest, "/geoCode"),
            })
        })
        .collect::<Vec<_>>();

    Ok(json!({
        "based_on": params.origin_cities,
        "recommendations": destinations,
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct ParseTripDocumentParams {
    /// Base64-encoded document content
    pub document_content: String,
    /// HTML, EML, or PDF
    #[serde(default)]
    pub document_type: DocumentType,
}

/// Parse a booking confirmation to extract structured trip data
pub async fn parse_trip_document(
    client: &AmadeusClient,
    params: ParseTripDocumentParams,
) -> Result<Value> {
    validate::base64("document_content", &params.document_content)?;
    tracing::debug!(
        "Submitting {:?} trip document ({} base64 chars)",
        params.document_type,
        params.document_content.len()
    );

    let body = json!({
        "data": {"type": "trip-parser-job", "content": params.document_content.trim()}
    });
    let job = data_object(&client.post(TRIP_PARSER_PATH, body).await?);

    Ok(json!({
        "job_id": at(&job, "/id"),
        "status": at(&job, "/status"),
        "trips": list_or_empty(&job, "/trips"),
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct ParsedTripParams {
    /// Document ID from parse_trip_document
    pub document_id: String,
}

/// Get the parsed trip data from a previously submitted document
pub async fn get_parsed_trip(client: &AmadeusClient, params: ParsedTripParams) -> Result<Value> {
    validate::required("document_id", &params.document_id)?;
    let path = format!("{}/{}", TRIP_PARSER_PATH, path_segment(&params.document_id));
    let document = data_object(&client.get(&path, &[]).await?);

    Ok(json!({
        "document_id": at(&document, "/id"),
        "status": at(&document, "/status"),
        "trips": list_or_empty(&document, "/trips"),
    }))
}
