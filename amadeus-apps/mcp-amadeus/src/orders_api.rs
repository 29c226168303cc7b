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

//! # Flight orders

use crate::client::{AmadeusClient, path_segment};
use crate::error::Result;
use crate::projection::{at, data_object, list};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const FLIGHT_ORDERS_PATH: &str = "/v1/booking/flight-orders";

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct CreateFlightOrderParams {
    /// Priced flight offer, JSON object (or a string holding it)
    pub flight_offer: Value,
    /// Traveler details, JSON array (or a string holding it)
    pub travelers: Value,
    /// Contact email
    pub contact_email: String,
    /// Contact phone with country code
    pub contact_phone: String,
}

fn booking_reference(order: &Value) -> Value {
    list(order, "/associatedRecords")
        .first()
        .map(|r| at(r, "/reference"))
        .unwrap_or(Value::Null)
}

/// Create a flight booking order
pub async fn create_flight_order(
    client: &AmadeusClient,
    params: CreateFlightOrderParams,
) -> Result<Value> {
    let offer = validate::json_object("flight_offer", &params.flight_offer)?;
    let travelers = validate::json_array("travelers", &params.travelers)?;
    validate::required("contact_email", &params.contact_email)?;
    validate::required("contact_phone", &params.contact_phone)?;

    let body = json!({
        "data": {
            "type": "flight-order",
            "flightOffers": [offer],
            "travelers": travelers,
            "remarks": {
                "general": [{"subType": "GENERAL_MISCELLANEOUS", "text": "BOOKED VIA MCP"}]
            },
            "ticketingAgreement": {"option": "DELAY_TO_QUEUE"},
            "contacts": [{
                "emailAddress": params.contact_email,
                "phones": [{"deviceType": "MOBILE", "number": params.contact_phone}],
                "purpose": "STANDARD",
            }],
        }
    });
    let order = data_object(&client.post(FLIGHT_ORDERS_PATH, body).await?);

    Ok(json!({
        "order_id": at(&order, "/id"),
        "booking_reference": booking_reference(&order),
        "creation_date": at(&order, "/creationDate"),
        "travelers": at(&order, "/travelers"),
        "flight_offers": at(&order, "/flightOffers"),
    }))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct OrderIdParams {
    /// Order ID
    pub order_id: String,
}

/// Retrieve details of an existing flight order
pub async fn get_flight_order(client: &AmadeusClient, params: OrderIdParams) -> Result<Value> {
    validate::required("order_id", &params.order_id)?;
    let path = format!("{}/{}", FLIGHT_ORDERS_PATH, path_segment(&params.order_id));
    let order = data_object(&client.get(&path, &[]).await?);

    Ok(json!({
        "order_id": at(&order, "/id"),
        "booking_reference": booking_reference(&order),
        "status": at(&order, "/status"),
        "travelers": at(&order, "/travelers"),
        "flight_offers": at(&order, "/flightOffers"),
        "ticketing": at(&order, "/ticketingAgreement"),
    }))
}

/// Cancel an existing flight order
pub async fn cancel_flight_order(client: &AmadeusClient, params: OrderIdParams) -> Result<Value> {
    validate::required("order_id", &params.order_id)?;
    let path = format!("{}/{}", FLIGHT_ORDERS_PATH, path_segment(&params.order_id));
    let response = client.delete(&path).await?;
    Ok(cancellation_message("Order", &params.order_id, response))
}

pub(crate) fn cancellation_message(what: &str, id: &str, response: Value) -> Value {
    if response.get("status").and_then(Value::as_str) == Some("success") {
        json!({"message": format!("{what} {id} cancelled successfully")})
    } else {
        json!({"message": "Cancellation processed", "response": response})
    }
}
