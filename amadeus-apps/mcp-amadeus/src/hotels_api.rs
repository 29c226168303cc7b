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

//! # Hotels
//!
//! City search with cheapest offer per hotel, details, name autocomplete,
//! sentiment ratings and booking.

use crate::client::{AmadeusClient, ApiRequest};
use crate::error::{AmadeusError, Result};
use crate::projection::{at, data, list, list_or_empty};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const SENTIMENT_CATEGORIES: [&str; 7] = [
    "location",
    "comfort",
    "service",
    "staff",
    "internet",
    "food",
    "facilities",
];

fn one() -> u32 {
    1
}

fn five() -> u32 {
    5
}

fn ten() -> u32 {
    10
}

fn twenty() -> u32 {
    20
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct SearchHotelsParams {
    /// City IATA code (e.g., 'NYC')
    pub city_code: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD)
    pub check_out: String,
    /// Number of adults
    #[serde(default = "one")]
    pub adults: u32,
    /// Number of rooms
    #[serde(default = "one")]
    pub rooms: u32,
    /// Search radius in km from city center
    #[serde(default = "five")]
    pub radius: u32,
    /// Maximum hotels to return
    #[serde(default = "ten")]
    pub max_results: u32,
}

impl SearchHotelsParams {
    pub fn validate(&self) -> Result<()> {
        validate::required("city_code", &self.city_code)?;
        let check_in = validate::date("check_in", &self.check_in)?;
        let check_out = validate::date("check_out", &self.check_out)?;
        if check_out <= check_in {
            return Err(AmadeusError::validation("check_out must be after check_in"));
        }
        validate::at_least_one("adults", self.adults)?;
        validate::at_least_one("rooms", self.rooms)?;
        validate::at_least_one("max_results", self.max_results)?;
        Ok(())
    }
}

/// Price used when picking a hotel's cheapest offer and the offer has none
const UNPRICED_OFFER: f64 = 999_999.0;

fn offer_total(offer: &Value) -> Option<f64> {
    at(offer, "/price/total")
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
}

/// Search for hotels in a city
///
/// Lists hotel IDs for the city, then fetches offers for the first
/// `max_results` of them and keeps the cheapest offer per hotel, sorted by
/// price.
pub async fn search_hotels(client: &AmadeusClient, params: SearchHotelsParams) -> Result<Value> {
    params.validate()?;

    let by_city = ApiRequest::get("/v1/reference-data/locations/hotels/by-city")
        .query("cityCode", params.city_code.to_uppercase())
        .query("radius", params.radius)
        .query("radiusUnit", "KM");
    let hotels = client.execute(&by_city).await?;

    let hotel_ids = data(&hotels)
        .iter()
        .take(params.max_results as usize)
        .filter_map(|h| h.get("hotelId").and_then(Value::as_str))
        .map(str::to_string)
        .collect::<Vec<_>>();
    if hotel_ids.is_empty() {
        tracing::debug!("No hotels listed for city {}", params.city_code);
        return Ok(json!([]));
    }

    let offers_request = ApiRequest::get("/v3/shopping/hotel-offers")
        .query_list("hotelIds", &hotel_ids)
        .query("checkInDate", &params.check_in)
        .query("checkOutDate", &params.check_out)
        .query("adults", params.adults)
        .query("roomQuantity", params.rooms)
        .query("currency", "USD");
    let offers = client.execute(&offers_request).await?;

    let mut cheapest = data(&offers)
        .iter()
        .filter_map(|hotel| {
            let best = list(hotel, "/offers")
                .iter()
                .min_by(|a, b| {
                    let a = offer_total(a).unwrap_or(UNPRICED_OFFER);
                    a.total_cmp(&offer_total(b).unwrap_or(UNPRICED_OFFER))
                })?;
            // Hotels whose best offer carries no total sort first
            Some((
                offer_total(best).unwrap_or(0.0),
                json!({
                    "hotel_id": at(hotel, "/hotel/hotelId"),
                    "name": at(hotel, "/hotel/name"),
                    "rating": at(hotel, "/hotel/rating"),
                    "latitude": at(hotel, "/hotel/latitude"),
                    "longitude": at(hotel, "/hotel/longitude"),
                    "price": {
                        "total": at(best, "/price/total"),
                        "currency": at(best, "/price/currency"),
                    },
                    "room_type": at(best, "/room/typeEstimated/category"),
                    "offer_id": at(best, "/id"),
                }),
            ))
        })
        .collect::<Vec<_>>();
    cheapest.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(Value::Array(cheapest.into_iter().map(|(_, v)| v).collect()))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct HotelDetailsParams {
    /// Hotel ID from search results
    pub hotel_id: String,
}

/// Get detailed information about a specific hotel
pub async fn get_hotel_details(client: &AmadeusClient, params: HotelDetailsParams) -> Result<Value> {
    validate::required("hotel_id", &params.hotel_id)?;

    let request = ApiRequest::get("/v3/shopping/hotel-offers").query("hotelIds", &params.hotel_id);
    let response = client.execute(&request).await?;

    let Some(hotel) = data(&response).first() else {
        return Ok(json!({"message": "Hotel not found"}));
    };

    let offers = list(hotel, "/offers")
        .iter()
        .map(|offer| {
            json!({
                "id": at(offer, "/id"),
                "check_in": at(offer, "/checkInDate"),
                "check_out": at(offer, "/checkOutDate"),
                "room": at(offer, "/room"),
                "price": at(offer, "/price"),
                "cancellation": at(offer, "/policies/cancellation"),
            })
        })
        .collect::<Vec<_>>();

    Ok(json!({
        "hotel_id": at(hotel, "/hotel/hotelId"),
        "name": at(hotel, "/hotel/name"),
        "description": at(hotel, "/hotel/description/text"),
        "rating": at(hotel, "/hotel/rating"),
        "address": at(hotel, "/hotel/address"),
        "contact": at(hotel, "/hotel/contact"),
        "amenities": list_or_empty(hotel, "/hotel/amenities"),
        "offers": offers,
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct HotelByNameParams {
    /// Hotel name or partial name
    pub keyword: String,
    /// Maximum number of results
    #[serde(default = "twenty")]
    pub max_results: u32,
}

/// Search for hotels by name (autocomplete)
pub async fn search_hotel_by_name(client: &AmadeusClient, params: HotelByNameParams) -> Result<Value> {
    validate::required("keyword", &params.keyword)?;
    validate::at_least_one("max_results", params.max_results)?;

    let request = ApiRequest::get("/v1/reference-data/locations/hotel")
        .query("keyword", &params.keyword)
        .query("subType", "HOTEL_LEISURE")
        .query("max", params.max_results);
    let response = client.execute(&request).await?;

    let hotels = data(&response)
        .iter()
        .map(|hotel| {
            json!({
                "hotel_id": at(hotel, "/hotelId"),
                "name": at(hotel, "/name"),
                "city": at(hotel, "/address/cityName"),
                "country": at(hotel, "/address/countryCode"),
                "location": at(hotel, "/geoCode"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(hotels))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct HotelRatingsParams {
    /// Comma-separated list of Amadeus hotel IDs
    pub hotel_ids: String,
}

/// Get sentiment analysis ratings for hotels
pub async fn get_hotel_ratings(client: &AmadeusClient, params: HotelRatingsParams) -> Result<Value> {
    validate::required("hotel_ids", &params.hotel_ids)?;
    let ids = params
        .hotel_ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>();

    let request =
        ApiRequest::get("/v2/e-reputation/hotel-sentiments").query_list("hotelIds", &ids);
    let response = client.execute(&request).await?;

    let ratings = data(&response)
        .iter()
        .map(|hotel| {
            let scores = SENTIMENT_CATEGORIES
                .iter()
                .map(|k| (k.to_string(), at(hotel, &format!("/sentimentScores/{k}"))))
                .collect::<serde_json::Map<_, _>>();
            json!({
                "hotel_id": at(hotel, "/hotelId"),
                "overall_rating": at(hotel, "/overallRating"),
                "number_of_reviews": at(hotel, "/numberOfReviews"),
                "sentiment_scores": scores,
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(ratings))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct BookHotelParams {
    /// Hotel offer ID
    pub offer_id: String,
    /// Guest details, JSON array (or a string holding it)
    pub guests: Value,
    /// Payment details, JSON object (or a string holding it)
    pub payment: Value,
}

/// Book a hotel room
pub async fn book_hotel(client: &AmadeusClient, params: BookHotelParams) -> Result<Value> {
    validate::required("offer_id", &params.offer_id)?;
    let guests = validate::json_array("guests", &params.guests)?;
    let payment = validate::json_object("payment", &params.payment)?;

    let body = json!({
        "data": {
            "offerId": params.offer_id,
            "guests": guests,
            "payments": [payment],
        }
    });
    let response = client.post("/v1/booking/hotel-bookings", body).await?;

    let booking = data(&response).first().cloned().unwrap_or(json!({}));
    Ok(json!({
        "booking_id": at(&booking, "/id"),
        "provider_confirmation": at(&booking, "/providerConfirmationId"),
        "status": at(&booking, "/bookingStatus"),
    }))
}
