use crate::models;
use serde::Serialize;

#[derive(Debug, Serialize, Default, PartialEq)]
pub struct Relation {
    pub product: i32,
    pub like: bool,
    pub in_bookmarks: bool,
    pub rate: Option<i16>,
}

impl From<models::UserProductRelation> for Relation {
    fn from(relation: models::UserProductRelation) -> Self {
        Self {
            product: relation.product_id,
            like: relation.like,
            in_bookmarks: relation.in_bookmarks,
            rate: relation.rate,
        }
    }
}
