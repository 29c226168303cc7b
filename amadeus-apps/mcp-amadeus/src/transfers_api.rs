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

//! # Ground transfers

use crate::client::{AmadeusClient, path_segment};
use crate::error::Result;
use crate::orders_api::{OrderIdParams, cancellation_message};
use crate::projection::{at, data, data_object};
use crate::validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const TRANSFER_ORDERS_PATH: &str = "/v1/booking/transfer-orders";

fn one() -> u32 {
    1
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct SearchTransfersParams {
    /// Pickup latitude
    pub start_latitude: f64,
    /// Pickup longitude
    pub start_longitude: f64,
    /// Dropoff latitude
    pub end_latitude: f64,
    /// Dropoff longitude
    pub end_longitude: f64,
    /// Date (YYYY-MM-DD)
    pub transfer_date: String,
    /// Time (HH:MM)
    pub transfer_time: String,
    /// Number of passengers
    #[serde(default = "one")]
    pub passengers: u32,
}

impl SearchTransfersParams {
    pub fn validate(&self) -> Result<()> {
        validate::latitude("start_latitude", self.start_latitude)?;
        validate::longitude("start_longitude", self.start_longitude)?;
        validate::latitude("end_latitude", self.end_latitude)?;
        validate::longitude("end_longitude", self.end_longitude)?;
        validate::date("transfer_date", &self.transfer_date)?;
        validate::time("transfer_time", &self.transfer_time)?;
        validate::at_least_one("passengers", self.passengers)?;
        Ok(())
    }

    fn start_date_time(&self) -> String {
        // HH:MM gets seconds appended; HH:MM:SS is sent as given
        if self.transfer_time.len() == 5 {
            format!("{}T{}:00", self.transfer_date, self.transfer_time)
        } else {
            format!("{}T{}", self.transfer_date, self.transfer_time)
        }
    }
}

/// Search for ground transfer options between two locations
pub async fn search_transfers(
    client: &AmadeusClient,
    params: SearchTransfersParams,
) -> Result<Value> {
    params.validate()?;

    let body = json!({
        "startLocationCode": format!("{},{}", params.start_latitude, params.start_longitude),
        "endGeoCode": format!("{},{}", params.end_latitude, params.end_longitude),
        "transferType": "PRIVATE",
        "startDateTime": params.start_date_time(),
        "passengers": params.passengers,
    });
    let response = client.post("/v1/shopping/transfer-offers", body).await?;

    let offers = data(&response)
        .iter()
        .take(10)
        .map(|offer| {
            json!({
                "offer_id": at(offer, "/id"),
                "transfer_type": at(offer, "/transferType"),
                "vehicle": at(offer, "/vehicle"),
                "price": at(offer, "/quotation"),
                "duration": at(offer, "/duration"),
                "cancellation_policy": at(offer, "/cancellationRules"),
            })
        })
        .collect::<Vec<_>>();
    Ok(Value::Array(offers))
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
pub struct BookTransferParams {
    /// Transfer offer ID
    pub offer_id: String,
    /// Passengers, JSON array (or a string holding it)
    pub passengers: Value,
    /// Contact email
    pub contact_email: String,
    /// Contact phone
    pub contact_phone: String,
}

/// Book a ground transfer
pub async fn book_transfer(client: &AmadeusClient, params: BookTransferParams) -> Result<Value> {
    validate::required("offer_id", &params.offer_id)?;
    let passengers = validate::json_array("passengers", &params.passengers)?;
    validate::required("contact_email", &params.contact_email)?;
    validate::required("contact_phone", &params.contact_phone)?;

    let body = json!({
        "data": {
            "type": "transfer-order",
            "offerId": params.offer_id,
            "passengers": passengers,
            "contacts": [{
                "emailAddress": params.contact_email,
                "phoneNumber": params.contact_phone,
            }],
        }
    });
    let order = data_object(&client.post(TRANSFER_ORDERS_PATH, body).await?);

    Ok(json!({
        "order_id": at(&order, "/id"),
        "confirmation_number": at(&order, "/confirmationNumber"),
        "status": at(&order, "/status"),
    }))
}

/// Get details of a transfer booking
pub async fn get_transfer_order(client: &AmadeusClient, params: OrderIdParams) -> Result<Value> {
    validate::required("order_id", &params.order_id)?;
    let path = format!("{}/{}", TRANSFER_ORDERS_PATH, path_segment(&params.order_id));
    let order = data_object(&client.get(&path, &[]).await?);

    Ok(json!({
        "order_id": at(&order, "/id"),
        "confirmation_number": at(&order, "/confirmationNumber"),
        "status": at(&order, "/status"),
        "transfer_details": at(&order, "/transferDetails"),
        "passengers": at(&order, "/passengers"),
    }))
}

/// Cancel a transfer booking
pub async fn cancel_transfer(client: &AmadeusClient, params: OrderIdParams) -> Result<Value> {
    validate::required("order_id", &params.order_id)?;
    let path = format!("{}/{}", TRANSFER_ORDERS_PATH, path_segment(&params.order_id));
    let response = client.delete(&path).await?;
    Ok(cancellation_message("Transfer", &params.order_id, response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_time_gets_seconds() {
        let mut params = SearchTransfersParams {
            start_latitude: 48.8566,
            start_longitude: 2.3522,
            end_latitude: 49.0097,
            end_longitude: 2.5479,
            transfer_date: "2025-11-10".into(),
            transfer_time: "10:30".into(),
            passengers: 2,
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.start_date_time(), "2025-11-10T10:30:00");

        params.transfer_time = "10:30:15".into();
        assert_eq!(params.start_date_time(), "2025-11-10T10:30:15");
    }

    #[test]
    fn unpadded_hour_never_reaches_start_time() {
        let params = SearchTransfersParams {
            start_latitude: 48.8566,
            start_longitude: 2.3522,
            end_latitude: 49.0097,
            end_longitude: 2.5479,
            transfer_date: "2025-11-10".into(),
            transfer_time: "9:30".into(),
            passengers: 1,
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }
}
