use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: i64,
    pub data_category: String,
    pub record_count: i64,
    /// Comma-joined field names, as stored.
    pub fields: String,
}
