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

//! # Travel analytics and predictions
//!
//! Air traffic statistics, price analysis, and the delay / choice /
//! trip-purpose prediction models.

use crate::client::{AmadeusClient, ApiRequest};
use crate::error::Result;
use crate::projection::{at, data, data_object};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    #[serde(alias = "arriving")]
    Arriving,
    #[serde(alias = "departing")]
    Departing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Arriving => "ARRIVING",
            Direction::Departing => "DEPARTING",
        }
    }
}

fn twenty() -> u32 {
    20
}

fn route(origin: &str, destination: &str) -> String {
    format!("{} -> {}", origin.to_uppercase(), destination.to_uppercase())
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct BusiestPeriodParams {
    /// IATA city code
    pub city_code: String,
    /// Year (YYYY)
    pub year: String,
    /// ARRIVING or DEPARTING
    #[serde(default)]
    pub direction: Direction,
}

/// Get the busiest travel periods for a city
pub async fn get_busiest_travel_period(
    client: &AmadeusClient,
    params: BusiestPeriodParams,
) -> Result<Value> {
    validate::required("city_code", &params.city_code)?;
    validate::year("year", &params.year)?;

    let city = params.city_code.to_uppercase();
    let request = ApiRequest::get("/v1/travel/analytics/air-traffic/busiest-period")
        .query("cityCode", &city)
        .query("period", &params.year)
        .query("direction", params.direction.as_str());
    let response = client.execute(&request).await?;

    let periods = data(&response)
        .iter()
        .map(|p| {
            json!({
                "period": at(p, "/period"),
                "traveler_percentage": at(p, "/analytics/travelers"),
            })
        })
        .collect::<Vec<_>>();

    Ok(json!({
        "city": city,
        "year": params.year,
        "direction": params.direction.as_str(),
        "periods": periods,
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct AirTrafficParams {
    /// IATA city code
    pub origin_city: String,
    /// Year (YYYY)
    pub year: String,
    /// Maximum destinations
    #[serde(default = "twenty")]
    pub max_results: u32,
}

async fn air_traffic(client: &AmadeusClient, path: &str, params: AirTrafficParams) -> Result<Value> {
    validate::required("origin_city", &params.origin_city)?;
    validate::year("year", &params.year)?;
    validate::at_least_one("max_results", params.max_results)?;

    let origin = params.origin_city.to_uppercase();
    let request = ApiRequest::get(path)
        .query("originCityCode", &origin)
        .query("period", &params.year)
        .query("max", params.max_results);
    let response = client.execute(&request).await?;

    let destinations = data(&response)
        .iter()
        .map(|d| {
            json!({
                "destination": at(d, "/destination"),
                "flights_score": at(d, "/analytics/flights"),
                "travelers_score": at(d, "/analytics/travelers"),
            })
        })
        .collect::<Vec<_>>();

    Ok(json!({
        "origin": origin,
        "year": params.year,
        "destinations": destinations,
    }))
}

/// Get most booked flight destinations from a city
pub async fn get_most_booked_destinations(
    client: &AmadeusClient,
    params: AirTrafficParams,
) -> Result<Value> {
    air_traffic(client, "/v1/travel/analytics/air-traffic/booked", params).await
}

/// Get most traveled flight destinations from a city
pub async fn get_most_traveled_destinations(
    client: &AmadeusClient,
    params: AirTrafficParams,
) -> Result<Value> {
    air_traffic(client, "/v1/travel/analytics/air-traffic/traveled", params).await
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct PriceAnalysisParams {
    /// Origin airport IATA code
    pub origin: String,
    /// Destination airport IATA code
    pub destination: String,
    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,
    /// Return date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
}

/// Analyze if a flight price is good compared to historical data
pub async fn analyze_flight_price(
    client: &AmadeusClient,
    params: PriceAnalysisParams,
) -> Result<Value> {
    validate::required("origin", &params.origin)?;
    validate::required("destination", &params.destination)?;
    validate::date("departure_date", &params.departure_date)?;
    validate::optional_date("return_date", params.return_date.as_deref())?;

    let request = ApiRequest::get("/v1/analytics/flight-price-analysis")
        .query("originLocationCode", params.origin.to_uppercase())
        .query("destinationLocationCode", params.destination.to_uppercase())
        .query("departureDate", &params.departure_date)
        .query_opt("returnDate", params.return_date.as_deref());
    let analysis = data_object(&client.execute(&request).await?);

    Ok(json!({
        "route": route(&params.origin, &params.destination),
        "departure_date": params.departure_date,
        "return_date": params.return_date,
        "average_price": at(&analysis, "/analytics/averagePrice"),
        "price_metrics": at(&analysis, "/analytics"),
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct FlightDelayParams {
    /// Origin airport IATA code
    pub origin: String,
    /// Destination airport IATA code
    pub destination: String,
    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,
    /// Departure time (HH:MM:SS)
    pub departure_time: String,
    /// Arrival date (YYYY-MM-DD)
    pub arrival_date: String,
    /// Arrival time (HH:MM:SS)
    pub arrival_time: String,
    /// IATA airline code
    pub carrier_code: String,
    /// Flight number
    pub flight_number: String,
    /// ICAO aircraft code
    pub aircraft_code: String,
    /// Duration in ISO 8601 (e.g., 'PT3H30M')
    pub duration: String,
}

impl FlightDelayParams {
    pub fn validate(&self) -> Result<()> {
        validate::required("origin", &self.origin)?;
        validate::required("destination", &self.destination)?;
        validate::date("departure_date", &self.departure_date)?;
        validate::time("departure_time", &self.departure_time)?;
        validate::date("arrival_date", &self.arrival_date)?;
        validate::time("arrival_time", &self.arrival_time)?;
        validate::required("carrier_code", &self.carrier_code)?;
        validate::required("flight_number", &self.flight_number)?;
        validate::required("aircraft_code", &self.aircraft_code)?;
        validate::required("duration", &self.duration)?;
        Ok(())
    }
}

/// Predict the probability of flight delay
pub async fn predict_flight_delay(client: &AmadeusClient, params: FlightDelayParams) -> Result<Value> {
    params.validate()?;

    let carrier = params.carrier_code.to_uppercase();
    let request = ApiRequest::get("/v1/travel/predictions/flight-delay")
        .query("originLocationCode", params.origin.to_uppercase())
        .query("destinationLocationCode", params.destination.to_uppercase())
        .query("departureDate", &params.departure_date)
        .query("departureTime", &params.departure_time)
        .query("arrivalDate", &params.arrival_date)
        .query("arrivalTime", &params.arrival_time)
        .query("carrierCode", &carrier)
        .query("flightNumber", &params.flight_number)
        .query("aircraftCode", &params.aircraft_code)
        .query("duration", &params.duration);
    let prediction = data_object(&client.execute(&request).await?);

    Ok(json!({
        "flight": format!("{}{}", carrier, params.flight_number),
        "route": route(&params.origin, &params.destination),
        "prediction_result": at(&prediction, "/result"),
        "delay_probabilities": at(&prediction, "/probability"),
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct FlightChoiceParams {
    /// Flight offers from search results, JSON array (or a string holding it)
    pub flight_offers: Value,
}

/// Predict which flight offer travelers are most likely to choose
pub async fn predict_flight_choice(client: &AmadeusClient, params: FlightChoiceParams) -> Result<Value> {
    let offers = validate::json_array("flight_offers", &params.flight_offers)?;
    let body = json!({
        "data": {"type": "flight-offers-prediction", "flightOffers": offers}
    });
    let response = client.post("/v1/shopping/flight-offers/prediction", body).await?;

    let predictions = data(&response)
        .iter()
        .map(|offer| {
            json!({
                "offer_id": at(offer, "/id"),
                "choice_probability": at(offer, "/choicePrediction/score"),
                "prediction_factors": at(offer, "/choicePrediction/predictionFactors"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(predictions))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct TripPurposeParams {
    /// Origin airport IATA code
    pub origin: String,
    /// Destination airport IATA code
    pub destination: String,
    /// Departure date (YYYY-MM-DD)
    pub departure_date: String,
    /// Return date (YYYY-MM-DD)
    pub return_date: String,
    /// Date of search (YYYY-MM-DD), defaults to today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_date: Option<String>,
}

/// Predict if a trip is for business or leisure
pub async fn predict_trip_purpose(client: &AmadeusClient, params: TripPurposeParams) -> Result<Value> {
    validate::required("origin", &params.origin)?;
    validate::required("destination", &params.destination)?;
    validate::date("departure_date", &params.departure_date)?;
    validate::date("return_date", &params.return_date)?;
    validate::optional_date("search_date", params.search_date.as_deref())?;

    let search_date = params
        .search_date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().date_naive().format("%Y-%m-%d").to_string());

    let request = ApiRequest::get("/v1/travel/trip-purpose-predictions")
        .query("originLocationCode", params.origin.to_uppercase())
        .query("destinationLocationCode", params.destination.to_uppercase())
        .query("departureDate", &params.departure_date)
        .query("returnDate", &params.return_date)
        .query("searchDate", &search_date);
    let prediction = data_object(&client.execute(&request).await?);

    Ok(json!({
        "route": route(&params.origin, &params.destination),
        "dates": format!("{} to {}", params.departure_date, params.return_date),
        "predicted_purpose": at(&prediction, "/result"),
        "business_probability": at(&prediction, "/probabilities/BUSINESS"),
        "leisure_probability": at(&prediction, "/probabilities/LEISURE"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_accepts_either_case() {
        let upper: Direction = serde_json::from_value(json!("DEPARTING")).unwrap();
        let lower: Direction = serde_json::from_value(json!("departing")).unwrap();
        assert_eq!(upper, Direction::Departing);
        assert_eq!(lower, Direction::Departing);
        assert!(serde_json::from_value::<Direction>(json!("sideways")).is_err());
    }

    #[test]
    fn delay_params_need_clock_times() {
        let mut params: FlightDelayParams = serde_json::from_value(json!({
            "origin": "NCE", "destination": "IST",
            "departure_date": "2025-08-01", "departure_time": "18:20:00",
            "arrival_date": "2025-08-01", "arrival_time": "22:15:00",
            "carrier_code": "TK", "flight_number": "1816",
            "aircraft_code": "321", "duration": "PT31H10M"
        }))
        .unwrap();
        assert!(params.validate().is_ok());

        params.arrival_time = "late evening".into();
        assert!(params.validate().is_err());
    }
}
