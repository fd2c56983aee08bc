use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::commissions::repo_types::Commission;

/// Returned by create. The image bytes are not echoed back.
#[derive(Debug, Serialize)]
pub struct CreatedCommission {
    pub id: i64,
    pub commision_name: String,
    pub commision_desc: String,
    pub is_taken: bool,
    pub owner: String,
}

#[derive(Debug, Serialize)]
pub struct CommissionItem {
    pub id: i64,
    pub commision_name: String,
    pub commision_desc: String,
    pub is_taken: bool,
    pub image: Option<String>, // base64
}

impl From<Commission> for CommissionItem {
    fn from(c: Commission) -> Self {
        Self {
            id: c.id,
            commision_name: c.commision_name,
            commision_desc: c.commision_desc,
            is_taken: c.is_taken,
            image: c
                .commision_image
                .filter(|bytes| !bytes.is_empty())
                .map(|bytes| STANDARD.encode(bytes)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(image: Option<Vec<u8>>) -> Commission {
        Commission {
            id: 7,
            commision_name: "portrait".into(),
            commision_desc: "oil on canvas".into(),
            commision_image: image,
            is_taken: false,
        }
    }

    #[test]
    fn image_is_rendered_as_base64() {
        let item = CommissionItem::from(row(Some(vec![0xff, 0x00, 0x10])));
        assert_eq!(item.image.as_deref(), Some("/wAQ"));
    }

    #[test]
    fn missing_or_empty_image_is_null() {
        assert!(CommissionItem::from(row(None)).image.is_none());
        assert!(CommissionItem::from(row(Some(Vec::new()))).image.is_none());

        let json = serde_json::to_value(CommissionItem::from(row(None))).unwrap();
        assert!(json["image"].is_null());
        assert_eq!(json["is_taken"], false);
    }
}
