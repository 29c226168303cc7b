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

//! # Tool catalog
//!
//! Every API operation registered once with its name, description and JSON
//! input schema. Both the agent tool surface and the MCP server dispatch
//! through here, so argument decoding and error shaping stay identical.
//!
//! Agent frameworks see each tool as `amadeus_<name>`; the MCP server uses
//! the plain name.

use crate::client::AmadeusClient;
use crate::error::{AmadeusError, Result};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub const AGENT_TOOL_PREFIX: &str = "amadeus_";

type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;
type Dispatch = fn(&AmadeusClient, Value) -> ToolFuture<'_>;

/// Name, description and input schema of a tool.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

struct RegisteredTool {
    spec: ToolSpec,
    dispatch: Dispatch,
}

fn input_schema<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

fn decode_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    // Calls without arguments arrive as null; treat them as an empty object so
    // that missing-field errors name the field.
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| AmadeusError::validation(format!("invalid arguments for {tool}: {e}")))
}

macro_rules! register_tools {
    ($( $module:ident :: $op:ident ( $params:ty ) => $description:literal ; )*) => {
        vec![
            $(
                RegisteredTool {
                    spec: ToolSpec {
                        name: stringify!($op).to_string(),
                        description: $description.to_string(),
                        input_schema: input_schema::<$params>(),
                    },
                    dispatch: |client, args| {
                        Box::pin(async move {
                            let params: $params = decode_args(stringify!($op), args)?;
                            crate::$module::$op(client, params).await
                        })
                    },
                },
            )*
        ]
    };
}

static REGISTRY: Lazy<Vec<RegisteredTool>> = Lazy::new(|| {
    register_tools! {
        flights_api::search_flights(crate::flights_api::SearchFlightsParams)
            => "Search for flight offers between two airports. Dates are YYYY-MM-DD, airports are IATA codes.";
        flights_api::get_flight_price(crate::flights_api::FlightOfferParams)
            => "Confirm the final price of a flight offer returned by search_flights.";
        flights_api::search_flight_inspiration(crate::flights_api::FlightInspirationParams)
            => "Find the cheapest destinations reachable from an origin airport, optionally under a maximum price.";
        flights_api::search_flight_availability(crate::flights_api::FlightAvailabilityParams)
            => "Check seat availability on flights between two airports for a given date.";
        flights_api::get_branded_fares(crate::flights_api::FlightOfferParams)
            => "List branded fare upsell options (baggage, flexibility) for a flight offer.";
        flights_api::get_seatmap(crate::flights_api::FlightOfferParams)
            => "Retrieve the seat map for the segments of a flight offer.";
        flights_api::get_flight_status(crate::flights_api::FlightStatusParams)
            => "Get the scheduled status of a flight by carrier code, flight number and departure date.";
        hotels_api::search_hotels(crate::hotels_api::SearchHotelsParams)
            => "Search hotel offers in a city and return the cheapest offer per hotel, sorted by price.";
        hotels_api::get_hotel_details(crate::hotels_api::HotelDetailsParams)
            => "Get information and current offers for a hotel by its Amadeus hotel ID.";
        hotels_api::search_hotel_by_name(crate::hotels_api::HotelByNameParams)
            => "Autocomplete hotel names from a keyword.";
        hotels_api::get_hotel_ratings(crate::hotels_api::HotelRatingsParams)
            => "Get sentiment-based ratings for one or more hotels (comma-separated hotel IDs).";
        hotels_api::book_hotel(crate::hotels_api::BookHotelParams)
            => "Book a hotel offer for the given guests and payment details.";
        locations_api::search_airports(crate::locations_api::KeywordParams)
            => "Search airports by keyword or IATA code.";
        locations_api::search_cities(crate::locations_api::KeywordParams)
            => "Search cities by keyword.";
        locations_api::get_airport_routes(crate::locations_api::AirportCodeParams)
            => "List direct destinations served from an airport.";
        locations_api::get_nearest_airports(crate::locations_api::NearestAirportsParams)
            => "Find airports near a latitude/longitude, sorted by relevance.";
        locations_api::get_airline_destinations(crate::locations_api::AirlineDestinationsParams)
            => "List destinations served by an airline.";
        locations_api::get_airport_on_time_performance(crate::locations_api::OnTimePerformanceParams)
            => "Predict on-time performance of an airport for a given date.";
        analytics_api::get_busiest_travel_period(crate::analytics_api::BusiestPeriodParams)
            => "Show the busiest travel months for a city and year.";
        analytics_api::get_most_booked_destinations(crate::analytics_api::AirTrafficParams)
            => "List the most booked destinations from a city for a given year.";
        analytics_api::get_most_traveled_destinations(crate::analytics_api::AirTrafficParams)
            => "List the most traveled destinations from a city for a given year.";
        analytics_api::analyze_flight_price(crate::analytics_api::PriceAnalysisParams)
            => "Compare a route's fares against historical price metrics.";
        analytics_api::predict_flight_delay(crate::analytics_api::FlightDelayParams)
            => "Predict the delay probability of a specific flight.";
        analytics_api::predict_flight_choice(crate::analytics_api::FlightChoiceParams)
            => "Predict which of several flight offers a traveler is most likely to choose.";
        analytics_api::predict_trip_purpose(crate::analytics_api::TripPurposeParams)
            => "Predict whether a trip is for business or leisure.";
        orders_api::create_flight_order(crate::orders_api::CreateFlightOrderParams)
            => "Book a priced flight offer for the given travelers.";
        orders_api::get_flight_order(crate::orders_api::OrderIdParams)
            => "Retrieve an existing flight order.";
        orders_api::cancel_flight_order(crate::orders_api::OrderIdParams)
            => "Cancel an existing flight order.";
        activities_api::search_activities(crate::activities_api::SearchActivitiesParams)
            => "Search tours and activities around a latitude/longitude.";
        activities_api::get_activity_details(crate::activities_api::ActivityIdParams)
            => "Get details for a tour or activity.";
        transfers_api::search_transfers(crate::transfers_api::SearchTransfersParams)
            => "Search private ground transfers between two coordinates.";
        transfers_api::book_transfer(crate::transfers_api::BookTransferParams)
            => "Book a ground transfer offer.";
        transfers_api::get_transfer_order(crate::orders_api::OrderIdParams)
            => "Retrieve a transfer booking.";
        transfers_api::cancel_transfer(crate::orders_api::OrderIdParams)
            => "Cancel a transfer booking.";
        insights_api::get_travel_recommendations(crate::insights_api::TravelRecommendationsParams)
            => "List points of interest in a city by category.";
        insights_api::get_recommended_destinations(crate::insights_api::RecommendedDestinationsParams)
            => "Recommend destinations similar to the given origin cities.";
        insights_api::parse_trip_document(crate::insights_api::ParseTripDocumentParams)
            => "Submit a base64-encoded booking confirmation for trip extraction.";
        insights_api::get_parsed_trip(crate::insights_api::ParsedTripParams)
            => "Fetch the result of a trip document submitted with parse_trip_document.";
    }
});

/// Dispatch table over all registered tools.
///
/// The catalog is stateless: the client is passed to each call so one
/// catalog serves any number of clients.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToolCatalog;

impl ToolCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn len(&self) -> usize {
        REGISTRY.len()
    }

    pub fn is_empty(&self) -> bool {
        REGISTRY.is_empty()
    }

    /// Specs under their plain names, as the MCP server lists them.
    pub fn specs(&self) -> Vec<ToolSpec> {
        REGISTRY.iter().map(|t| t.spec.clone()).collect()
    }

    /// Specs under `amadeus_<name>`, for agent frameworks.
    pub fn agent_specs(&self) -> Vec<ToolSpec> {
        REGISTRY
            .iter()
            .map(|t| ToolSpec {
                name: format!("{AGENT_TOOL_PREFIX}{}", t.spec.name),
                ..t.spec.clone()
            })
            .collect()
    }

    pub fn spec(&self, name: &str) -> Option<&'static ToolSpec> {
        lookup(name).map(|t| &t.spec)
    }

    /// Run a tool by name with JSON arguments.
    ///
    /// Accepts both plain and `amadeus_`-prefixed names.
    pub async fn invoke(&self, client: &AmadeusClient, name: &str, args: Value) -> Result<Value> {
        let tool = lookup(name).ok_or_else(|| AmadeusError::UnknownTool(name.to_string()))?;
        tracing::debug!("Invoking tool {}", tool.spec.name);
        (tool.dispatch)(client, args).await
    }

    /// Like [`ToolCatalog::invoke`] but renders the result as indented JSON text.
    pub async fn invoke_text(
        &self,
        client: &AmadeusClient,
        name: &str,
        args: Value,
    ) -> Result<String> {
        let value = self.invoke(client, name, args).await?;
        serde_json::to_string_pretty(&value).map_err(|e| AmadeusError::Transport(e.to_string()))
    }
}

fn lookup(name: &str) -> Option<&'static RegisteredTool> {
    let plain = name.strip_prefix(AGENT_TOOL_PREFIX).unwrap_or(name);
    REGISTRY.iter().find(|t| t.spec.name == plain)
}
