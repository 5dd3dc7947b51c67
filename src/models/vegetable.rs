use diesel::prelude::*;

/// Row of the `Vegetables` table.
///
/// Also used as the changeset for full-replace updates: the `id` primary key
/// is excluded from the `SET` list and `None` writes `NULL`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = crate::schema::vegetables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct Vegetable {
    pub id: i32,
    pub vegetable_name: Option<String>,
    pub vegetable_type: Option<String>,
    pub rotation_cycle: i32,
}

/// Insert payload; the id comes from the identity column.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = crate::schema::vegetables)]
pub struct NewVegetable {
    pub vegetable_name: Option<String>,
    pub vegetable_type: Option<String>,
    pub rotation_cycle: i32,
}

impl NewVegetable {
    /// Row inserted at startup when the table is empty
    pub fn default_seed() -> Self {
        Self {
            vegetable_name: Some("Tomatoes".to_string()),
            vegetable_type: None,
            rotation_cycle: 0,
        }
    }

    pub fn with_id(self, id: i32) -> Vegetable {
        Vegetable {
            id,
            vegetable_name: self.vegetable_name,
            vegetable_type: self.vegetable_type,
            rotation_cycle: self.rotation_cycle,
        }
    }
}
