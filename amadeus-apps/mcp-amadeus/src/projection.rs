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

// Navigation helpers for reshaping API responses. Missing fields project to
// null rather than failing; the API omits optional members freely.

use serde_json::Value;

/// Field at a JSON pointer such as `/price/total`, or null
pub(crate) fn at(value: &Value, pointer: &str) -> Value {
    value.pointer(pointer).cloned().unwrap_or(Value::Null)
}

/// Array at a JSON pointer, or an empty slice
pub(crate) fn list<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Array at a JSON pointer, or `[]` as a value
pub(crate) fn list_or_empty(value: &Value, pointer: &str) -> Value {
    Value::Array(list(value, pointer).to_vec())
}

/// The `data` array of a collection response
pub(crate) fn data(value: &Value) -> &[Value] {
    list(value, "/data")
}

/// The `data` member of a single-resource response, or an empty object
pub(crate) fn data_object(value: &Value) -> Value {
    match value.get("data") {
        Some(v @ Value::Object(_)) => v.clone(),
        _ => Value::Object(Default::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_members_project_to_null_or_empty() {
        let v = json!({"data": [{"price": {"total": "12.00"}}]});
        assert_eq!(at(&v, "/data/0/price/total"), json!("12.00"));
        assert_eq!(at(&v, "/data/0/price/currency"), Value::Null);
        assert_eq!(data(&v).len(), 1);
        assert!(list(&v, "/meta/links").is_empty());
        assert_eq!(list_or_empty(&v, "/nope"), json!([]));
        assert_eq!(data_object(&v), json!({}));
        assert_eq!(data_object(&json!({"data": {"id": "x"}})), json!({"id": "x"}));
    }
}
