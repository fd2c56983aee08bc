use bytes::Bytes;
use sqlx::FromRow;

/// Commission record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Commission {
    pub id: i64,
    pub commision_name: String,
    pub commision_desc: String,
    pub commision_image: Option<Vec<u8>>,
    pub is_taken: bool,
}

#[derive(Debug)]
pub struct NewCommission {
    pub name: String,
    pub desc: String,
    pub image: Option<Bytes>,
}
