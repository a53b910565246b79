use serde::Serialize;

/// Per (user, product) interaction record. Created lazily on first touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct UserProductRelation {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub like: bool,
    pub in_bookmarks: bool,
    pub rate: Option<i16>, // 1..=5, None means "not rated"
}
