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

//! # Flight shopping
//!
//! Offer search, pricing, inspiration, availability, branded fares, seat maps
//! and flight status.

use crate::client::{AmadeusClient, ApiRequest};
use crate::error::Result;
use crate::projection::{at, data, data_object, list, list_or_empty};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    #[default]
    #[serde(alias = "economy")]
    Economy,
    #[serde(alias = "premium_economy")]
    PremiumEconomy,
    #[serde(alias = "business")]
    Business,
    #[serde(alias = "first")]
    First,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }
}

fn one() -> u32 {
    1
}

fn ten() -> u32 {
    10
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub struct SearchFlightsParams {
    /// Origin airport IATA code (e.g., 'JFK')
    pub origin: String,
    /// Destination airport IATA code (e.g., 'LAX')
    pub destination: String,
    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,
    /// Return date for round trip (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    /// Number of adult passengers
    #[serde(default = "one")]
    pub adults: u32,
    /// ECONOMY, PREMIUM_ECONOMY, BUSINESS, FIRST
    #[serde(default)]
    pub travel_class: TravelClass,
    /// Only show nonstop flights
    #[serde(default)]
    pub nonstop: bool,
    /// Maximum number of offers to return
    #[serde(default = "ten")]
    pub max_results: u32,
}

impl SearchFlightsParams {
    pub fn new(origin: &str, destination: &str, departure_date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: departure_date.to_string(),
            return_date: None,
            adults: 1,
            travel_class: TravelClass::Economy,
            nonstop: false,
            max_results: 10,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate::required("origin", &self.origin)?;
        validate::required("destination", &self.destination)?;
        validate::date("departure_date", &self.departure_date)?;
        validate::optional_date("return_date", self.return_date.as_deref())?;
        validate::at_least_one("adults", self.adults)?;
        validate::at_least_one("max_results", self.max_results)?;
        Ok(())
    }

    pub fn to_request(&self) -> ApiRequest {
        ApiRequest::get(FLIGHT_OFFERS_PATH)
            .query("originLocationCode", self.origin.to_uppercase())
            .query("destinationLocationCode", self.destination.to_uppercase())
            .query("departureDate", &self.departure_date)
            .query("adults", self.adults)
            .query("travelClass", self.travel_class.as_str())
            .query("nonStop", self.nonstop)
            .query("max", self.max_results)
            .query("currencyCode", "USD")
            .query_opt("returnDate", self.return_date.as_deref())
    }
}

/// Search for flight offers
pub async fn search_flights(client: &AmadeusClient, params: SearchFlightsParams) -> Result<Value> {
    params.validate()?;
    let response = client.execute(&params.to_request()).await?;

    let offers = data(&response)
        .iter()
        .map(|offer| {
            let itineraries = list(offer, "/itineraries")
                .iter()
                .map(|itin| {
                    let segments = list(itin, "/segments")
                        .iter()
                        .map(|seg| {
                            json!({
                                "departure": {
                                    "airport": at(seg, "/departure/iataCode"),
                                    "time": at(seg, "/departure/at"),
                                },
                                "arrival": {
                                    "airport": at(seg, "/arrival/iataCode"),
                                    "time": at(seg, "/arrival/at"),
                                },
                                "carrier": at(seg, "/carrierCode"),
                                "flight_number": at(seg, "/number"),
                                "duration": at(seg, "/duration"),
                            })
                        })
                        .collect::<Vec<_>>();
                    json!({"duration": at(itin, "/duration"), "segments": segments})
                })
                .collect::<Vec<_>>();

            json!({
                "id": at(offer, "/id"),
                "price": {
                    "total": at(offer, "/price/total"),
                    "currency": at(offer, "/price/currency"),
                },
                "itineraries": itineraries,
                "seats_available": at(offer, "/numberOfBookableSeats"),
            })
        })
        .collect::<Vec<_>>();

    Ok(Value::Array(offers))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct FlightOfferParams {
    /// Full flight offer JSON from search results (object or JSON string)
    pub flight_offer: Value,
}

/// Confirm price for a flight offer
pub async fn get_flight_price(client: &AmadeusClient, params: FlightOfferParams) -> Result<Value> {
    let offer = validate::json_object("flight_offer", &params.flight_offer)?;
    let body = json!({
        "data": {"type": "flight-offers-pricing", "flightOffers": [offer]}
    });
    let response = client.post("/v1/shopping/flight-offers/pricing", body).await?;

    let priced = data_object(&response);
    let first = list(&priced, "/flightOffers").first().cloned();
    Ok(match first {
        Some(offer) => json!({
            "total_price": at(&offer, "/price/total"),
            "price_breakdown": list_or_empty(&offer, "/travelerPricings"),
        }),
        None => json!({"total_price": null, "price_breakdown": []}),
    })
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct FlightInspirationParams {
    /// Origin airport IATA code
    pub origin: String,
    /// Maximum price in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    /// Departure date or date range (YYYY-MM-DD or YYYY-MM-DD,YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
}

/// Get flight destination inspiration based on cheapest flights
pub async fn search_flight_inspiration(
    client: &AmadeusClient,
    params: FlightInspirationParams,
) -> Result<Value> {
    validate::required("origin", &params.origin)?;
    if let Some(range) = &params.departure_date {
        for day in range.split(',') {
            validate::date("departure_date", day.trim())?;
        }
    }

    let request = ApiRequest::get("/v1/shopping/flight-destinations")
        .query("origin", params.origin.to_uppercase())
        .query_opt("maxPrice", params.max_price.filter(|p| *p > 0))
        .query_opt("departureDate", params.departure_date.as_deref());
    let response = client.execute(&request).await?;

    let destinations = data(&response)
        .iter()
        .take(20)
        .map(|dest| {
            json!({
                "destination": at(dest, "/destination"),
                "departure_date": at(dest, "/departureDate"),
                "return_date": at(dest, "/returnDate"),
                "price": at(dest, "/price/total"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(destinations))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct FlightAvailabilityParams {
    /// Origin airport IATA code
    pub origin: String,
    /// Destination airport IATA code
    pub destination: String,
    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,
    /// Number of adult passengers
    #[serde(default = "one")]
    pub adults: u32,
}

/// Search for available seats on flights
pub async fn search_flight_availability(
    client: &AmadeusClient,
    params: FlightAvailabilityParams,
) -> Result<Value> {
    validate::required("origin", &params.origin)?;
    validate::required("destination", &params.destination)?;
    validate::date("departure_date", &params.departure_date)?;
    validate::at_least_one("adults", params.adults)?;

    let travelers = (1..=params.adults)
        .map(|i| json!({"id": i.to_string(), "travelerType": "ADULT"}))
        .collect::<Vec<_>>();
    let body = json!({
        "originDestinations": [{
            "id": "1",
            "originLocationCode": params.origin.to_uppercase(),
            "destinationLocationCode": params.destination.to_uppercase(),
            "departureDateTime": {"date": params.departure_date},
        }],
        "travelers": travelers,
        "sources": ["GDS"],
    });
    let response = client.post("/v1/shopping/flight-availabilities", body).await?;

    let availabilities = data(&response)
        .iter()
        .take(10)
        .map(|avail| {
            let segments = list(avail, "/segments")
                .iter()
                .map(|seg| {
                    json!({
                        "departure": at(seg, "/departure"),
                        "arrival": at(seg, "/arrival"),
                        "carrier": at(seg, "/carrierCode"),
                        "flight_number": at(seg, "/number"),
                        "aircraft": at(seg, "/aircraft/code"),
                        "available_classes": list_or_empty(seg, "/availabilityClasses"),
                    })
                })
                .collect::<Vec<_>>();
            json!({"id": at(avail, "/id"), "segments": segments})
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(availabilities))
}

/// Get branded fare upsell options for a flight offer
pub async fn get_branded_fares(client: &AmadeusClient, params: FlightOfferParams) -> Result<Value> {
    let offer = validate::json_object("flight_offer", &params.flight_offer)?;
    let body = json!({
        "data": {"type": "flight-offers-upselling", "flightOffers": [offer]}
    });
    let response = client.post("/v1/shopping/flight-offers/upselling", body).await?;

    let fares = data(&response)
        .iter()
        .map(|offer| {
            let fare_details = list(offer, "/travelerPricings/0/fareDetailsBySegment")
                .iter()
                .map(|segment| {
                    json!({
                        "segment_id": at(segment, "/segmentId"),
                        "cabin": at(segment, "/cabin"),
                        "fare_basis": at(segment, "/fareBasis"),
                        "branded_fare": at(segment, "/brandedFare"),
                        "included_bags": at(segment, "/includedCheckedBags"),
                        "amenities": list_or_empty(segment, "/amenities"),
                    })
                })
                .collect::<Vec<_>>();
            json!({
                "offer_id": at(offer, "/id"),
                "price": at(offer, "/price"),
                "fare_details": fare_details,
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(fares))
}

/// Get seatmap for a flight offer showing available seats
pub async fn get_seatmap(client: &AmadeusClient, params: FlightOfferParams) -> Result<Value> {
    let offer = validate::json_object("flight_offer", &params.flight_offer)?;
    let response = client
        .post("/v1/shopping/seatmaps", json!({"data": [offer]}))
        .await?;

    let seatmaps = data(&response)
        .iter()
        .map(|seatmap| {
            let decks = list(seatmap, "/decks")
                .iter()
                .map(|deck| {
                    let seats = list(deck, "/seats")
                        .iter()
                        .take(50)
                        .map(|seat| {
                            let pricing = list(seat, "/travelerPricing");
                            json!({
                                "number": at(seat, "/number"),
                                "cabin": at(seat, "/cabin"),
                                "available": seat.get("travelerPricing").is_some_and(|p| !p.is_null()),
                                "characteristics": list_or_empty(seat, "/characteristicsCodes"),
                                "price": pricing.first().map(|p| at(p, "/price")).unwrap_or(Value::Null),
                            })
                        })
                        .collect::<Vec<_>>();
                    json!({
                        "deck_type": at(deck, "/deckType"),
                        "deck_configuration": at(deck, "/deckConfiguration"),
                        "seats": seats,
                    })
                })
                .collect::<Vec<_>>();
            json!({
                "flight_id": at(seatmap, "/flightOfferId"),
                "segment_id": at(seatmap, "/segmentId"),
                "aircraft": at(seatmap, "/aircraft"),
                "decks": decks,
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(seatmaps))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct FlightStatusParams {
    /// IATA airline code (e.g., 'BA', 'AA')
    pub carrier_code: String,
    /// Flight number (e.g., '326')
    pub flight_number: String,
    /// Scheduled departure date (YYYY-MM-DD)
    pub departure_date: String,
}

/// Get real-time flight status information
pub async fn get_flight_status(client: &AmadeusClient, params: FlightStatusParams) -> Result<Value> {
    validate::required("carrier_code", &params.carrier_code)?;
    validate::required("flight_number", &params.flight_number)?;
    validate::date("departure_date", &params.departure_date)?;

    let carrier = params.carrier_code.to_uppercase();
    let request = ApiRequest::get("/v2/schedule/flights")
        .query("carrierCode", &carrier)
        .query("flightNumber", &params.flight_number)
        .query("scheduledDepartureDate", &params.departure_date);
    let response = client.execute(&request).await?;

    let flights = data(&response)
        .iter()
        .map(|flight| {
            let points = list(flight, "/flightPoints");
            let null = Value::Null;
            let departure = points.first().unwrap_or(&null);
            let arrival = if points.len() > 1 {
                points.last().unwrap_or(&null)
            } else {
                &null
            };
            json!({
                "flight": format!("{}{}", carrier, params.flight_number),
                "departure": {
                    "airport": at(departure, "/iataCode"),
                    "terminal": at(departure, "/departure/terminal"),
                    "scheduled": at(departure, "/departure/at"),
                },
                "arrival": {
                    "airport": at(arrival, "/iataCode"),
                    "terminal": at(arrival, "/arrival/terminal"),
                    "scheduled": at(arrival, "/arrival/at"),
                },
                "aircraft": at(flight, "/flightDesignator/aircraftType"),
                "duration": at(flight, "/duration"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(flights))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_carries_upper_cased_codes() {
        let mut params = SearchFlightsParams::new("jfk", "lax", "2025-03-15");
        params.nonstop = true;
        let req = params.to_request();

        assert_eq!(req.path, FLIGHT_OFFERS_PATH);
        assert!(req.query.contains(&("originLocationCode".into(), "JFK".into())));
        assert!(req.query.contains(&("destinationLocationCode".into(), "LAX".into())));
        assert!(req.query.contains(&("nonStop".into(), "true".into())));
        assert!(req.query.contains(&("travelClass".into(), "ECONOMY".into())));
        assert!(!req.query.iter().any(|(k, _)| k == "returnDate"));
    }

    #[test]
    fn search_params_defaults_from_json() {
        let params: SearchFlightsParams = serde_json::from_value(json!({
            "origin": "JFK",
            "destination": "LAX",
            "departure_date": "2025-03-15",
            "travel_class": "business"
        }))
        .unwrap();

        assert_eq!(params.adults, 1);
        assert_eq!(params.max_results, 10);
        assert_eq!(params.travel_class, TravelClass::Business);
        assert!(!params.nonstop);
    }

    #[test]
    fn search_params_reject_bad_input() {
        let mut params = SearchFlightsParams::new("", "LAX", "2025-03-15");
        assert!(params.validate().is_err());

        params.origin = "JFK".into();
        params.return_date = Some("next week".into());
        assert!(params.validate().is_err());

        params.return_date = None;
        params.adults = 0;
        assert!(params.validate().is_err());
    }
}
