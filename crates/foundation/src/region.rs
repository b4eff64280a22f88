use serde::{Deserialize, Serialize};

use crate::ids::RegionCode;

/// A region as listed by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(rename = "prefCode")]
    pub code: RegionCode,
    #[serde(rename = "prefName")]
    pub name: String,
}

impl Region {
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code: RegionCode(code),
            name: name.into(),
        }
    }
}

/// Envelope shared by both upstream endpoints.
///
/// `message` is `null` on success; the upstream API fills it in on soft errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: Option<String>,
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            message: None,
            result,
        }
    }
}

pub type CatalogResponse = ApiResponse<Vec<Region>>;

#[cfg(test)]
mod tests {
    use super::{CatalogResponse, Region};
    use crate::ids::RegionCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_catalog_wire_format() {
        let body = r#"{
            "message": null,
            "result": [
                {"prefCode": 1, "prefName": "北海道"},
                {"prefCode": 2, "prefName": "青森県"}
            ]
        }"#;
        let resp: CatalogResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.message, None);
        assert_eq!(
            resp.result,
            vec![Region::new(1, "北海道"), Region::new(2, "青森県")]
        );
        assert_eq!(resp.result[1].code, RegionCode(2));
    }
}
