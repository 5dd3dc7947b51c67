//! Vegetable request/response bodies.
//!
//! Wire names are `id`, `name`, `type` and `rotationCycle`. Unknown fields
//! are ignored; a missing `rotationCycle` is 0.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{NewVegetable, Vegetable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"id": 1, "name": "Tomatoes", "type": null, "rotationCycle": 0}))]
pub struct VegetableResponse {
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub vegetable_type: Option<String>,
    pub rotation_cycle: i32,
}

impl From<Vegetable> for VegetableResponse {
    fn from(vegetable: Vegetable) -> Self {
        Self {
            id: vegetable.id,
            name: vegetable.vegetable_name,
            vegetable_type: vegetable.vegetable_type,
            rotation_cycle: vegetable.rotation_cycle,
        }
    }
}

/// POST body. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"name": "Carrot", "type": "Root", "rotationCycle": 3}))]
pub struct CreateVegetableRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub vegetable_type: Option<String>,
    #[serde(default)]
    pub rotation_cycle: i32,
}

impl CreateVegetableRequest {
    pub fn into_new_vegetable(self) -> NewVegetable {
        NewVegetable {
            vegetable_name: self.name,
            vegetable_type: self.vegetable_type,
            rotation_cycle: self.rotation_cycle,
        }
    }
}

/// PUT body. `id` must equal the path id.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({"id": 2, "name": "Carrot", "type": "Root", "rotationCycle": 4}))]
pub struct UpdateVegetableRequest {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub vegetable_type: Option<String>,
    #[serde(default)]
    pub rotation_cycle: i32,
}

impl UpdateVegetableRequest {
    pub fn into_vegetable(self) -> Vegetable {
        Vegetable {
            id: self.id,
            vegetable_name: self.name,
            vegetable_type: self.vegetable_type,
            rotation_cycle: self.rotation_cycle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_uses_wire_names() {
        let response = VegetableResponse::from(Vegetable {
            id: 2,
            vegetable_name: Some("Carrot".to_string()),
            vegetable_type: Some("Root".to_string()),
            rotation_cycle: 3,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 2, "name": "Carrot", "type": "Root", "rotationCycle": 3})
        );
    }

    #[test]
    fn test_nulls_are_serialized() {
        let response = VegetableResponse::from(NewVegetable::default_seed().with_id(1));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 1, "name": "Tomatoes", "type": null, "rotationCycle": 0})
        );
    }

    #[test]
    fn test_create_request_ignores_id_and_defaults_cycle() {
        let request: CreateVegetableRequest =
            serde_json::from_value(json!({"id": 99, "name": "Leek", "colour": "green"})).unwrap();
        let new_vegetable = request.into_new_vegetable();

        assert_eq!(new_vegetable.vegetable_name.as_deref(), Some("Leek"));
        assert_eq!(new_vegetable.vegetable_type, None);
        assert_eq!(new_vegetable.rotation_cycle, 0);
    }

    #[test]
    fn test_update_request_missing_id_is_zero() {
        let request: UpdateVegetableRequest =
            serde_json::from_value(json!({"name": "Leek", "rotationCycle": 2})).unwrap();
        assert_eq!(request.into_vegetable().id, 0);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<CreateVegetableRequest, _> =
            serde_json::from_value(json!({"rotationCycle": "three"}));
        assert!(result.is_err());
    }
}
