use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ProductError, ProductResult, validation_message};

const AVAILABLE_REQUIRED: &str = "La disponibilidad del producto es obligatoria";

/// Keeps an explicit `null` (`Some(None)`) apart from an absent field (`None`)
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Product identifier: a MongoDB ObjectId, rendered as 24 lowercase hex chars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(ObjectId);

impl ProductId {
    /// Fresh identifier (timestamp + process unique + counter)
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for ProductId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = ProductError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| ProductError::InvalidId(raw.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Product entity as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned by the store at creation
    #[schema(value_type = String, example = "665f1c2ab9d4e3a1c0ffee01")]
    pub id: ProductId,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = 9.99, minimum = 0)]
    pub price: f64,
    #[schema(example = true)]
    pub available: bool,
}

/// Fully validated fields of a product that is about to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub available: bool,
}

/// DTO for creating a new product
///
/// Every field may be missing on the wire so that absence is reported as a
/// validation failure instead of a deserialization error. Values are not
/// coerced: `"9.99"` is not a price and `42` is not a name.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    /// Surrounding whitespace is trimmed before validation
    #[validate(
        required(message = "El nombre del producto es obligatorio"),
        length(min = 1, message = "El nombre del producto es obligatorio")
    )]
    #[schema(example = "Widget")]
    pub name: Option<String>,

    #[validate(
        required(message = "El precio del producto es obligatorio"),
        range(min = 0.0, message = "El precio no puede ser negativo")
    )]
    #[schema(example = 9.99, minimum = 0)]
    pub price: Option<f64>,

    /// Defaults to `true` when omitted; an explicit `null` is rejected
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<bool>, example = true)]
    pub available: Option<Option<bool>>,
}

impl CreateProduct {
    /// Trim, validate and fill in defaults
    pub fn into_new_product(self) -> ProductResult<NewProduct> {
        let input = Self {
            name: self.name.map(|name| name.trim().to_string()),
            ..self
        };

        let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);
        if input.available == Some(None) {
            errors.add(
                "available",
                ValidationError::new("required").with_message(AVAILABLE_REQUIRED.into()),
            );
        }
        if !errors.errors().is_empty() {
            return Err(ProductError::Validation(validation_message(&errors)));
        }

        match (input.name, input.price, input.available) {
            (Some(name), Some(price), available) => Ok(NewProduct {
                name,
                price,
                available: available.flatten().unwrap_or(true),
            }),
            // rejected above
            _ => Err(ProductError::Validation(
                "Product validation failed".to_string(),
            )),
        }
    }
}

/// DTO for updating an existing product
///
/// Only the supplied fields are changed; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "El nombre del producto es obligatorio"))]
    #[schema(example = "Widget XL")]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    #[schema(example = 12.5, minimum = 0)]
    pub price: Option<f64>,

    #[schema(example = false)]
    pub available: Option<bool>,
}

impl UpdateProduct {
    /// Trim and validate the supplied fields
    pub fn normalized(self) -> ProductResult<Self> {
        let input = Self {
            name: self.name.map(|name| name.trim().to_string()),
            ..self
        };

        input
            .validate()
            .map_err(|e| ProductError::Validation(validation_message(&e)))?;

        Ok(input)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.available.is_none()
    }

    /// Apply the supplied fields onto `product`
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(ref name) = self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(available) = self.available {
            product.available = available;
        }
    }
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: Option<&str>, price: Option<f64>, available: Option<bool>) -> CreateProduct {
        CreateProduct {
            name: name.map(str::to_string),
            price,
            available: available.map(Some),
        }
    }

    #[test]
    fn test_product_id_round_trips_through_hex() {
        let id = ProductId::new();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.to_string().len(), 24);
    }

    #[test]
    fn test_product_id_rejects_garbage() {
        let err = "not-an-id".parse::<ProductId>().unwrap_err();
        assert_eq!(err, ProductError::InvalidId("not-an-id".to_string()));
    }

    #[test]
    fn test_product_serializes_id_as_hex_string() {
        let id: ProductId = "665f1c2ab9d4e3a1c0ffee01".parse().unwrap();
        let product = Product {
            id,
            name: "Widget".to_string(),
            price: 9.99,
            available: true,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "665f1c2ab9d4e3a1c0ffee01",
                "name": "Widget",
                "price": 9.99,
                "available": true
            })
        );
    }

    #[test]
    fn test_create_trims_and_defaults_available() {
        let product = create(Some("  Widget  "), Some(9.99), None)
            .into_new_product()
            .unwrap();

        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.99);
        assert!(product.available);
    }

    #[test]
    fn test_create_allows_zero_price() {
        let product = create(Some("Freebie"), Some(0.0), Some(false))
            .into_new_product()
            .unwrap();
        assert_eq!(product.price, 0.0);
        assert!(!product.available);
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let err = create(Some("Widget"), Some(-1.0), None)
            .into_new_product()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product validation failed: price: El precio no puede ser negativo"
        );
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let err = create(Some("   "), Some(1.0), None)
            .into_new_product()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product validation failed: name: El nombre del producto es obligatorio"
        );
    }

    #[test]
    fn test_create_reports_missing_fields_in_order() {
        let err = create(None, None, None).into_new_product().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product validation failed: name: El nombre del producto es obligatorio, price: El precio del producto es obligatorio"
        );
    }

    #[test]
    fn test_create_explicit_null_available_is_required() {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Widget",
            "price": 1,
            "available": null
        }))
        .unwrap();
        assert_eq!(input.available, Some(None));

        let err = input.into_new_product().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product validation failed: available: La disponibilidad del producto es obligatoria"
        );
    }

    #[test]
    fn test_create_absent_available_is_not_null() {
        let input: CreateProduct =
            serde_json::from_value(serde_json::json!({ "name": "Widget", "price": 1 })).unwrap();
        assert_eq!(input.available, None);
        assert!(input.into_new_product().unwrap().available);
    }

    #[test]
    fn test_create_does_not_coerce_types() {
        let price_as_string = serde_json::from_value::<CreateProduct>(
            serde_json::json!({ "name": "Widget", "price": "9.99" }),
        );
        assert!(price_as_string.is_err());

        let name_as_number =
            serde_json::from_value::<CreateProduct>(serde_json::json!({ "name": 42, "price": 1 }));
        assert!(name_as_number.is_err());
    }

    #[test]
    fn test_update_validates_supplied_fields_only() {
        let update = UpdateProduct {
            price: Some(5.0),
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(update.price, Some(5.0));
        assert!(update.name.is_none());

        let err = UpdateProduct {
            name: Some(" ".to_string()),
            price: Some(-2.0),
            available: None,
        }
        .normalized()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product validation failed: name: El nombre del producto es obligatorio, price: El precio no puede ser negativo"
        );
    }

    #[test]
    fn test_update_apply_to_merges() {
        let mut product = Product {
            id: ProductId::new(),
            name: "Widget".to_string(),
            price: 9.99,
            available: true,
        };

        UpdateProduct {
            available: Some(false),
            ..Default::default()
        }
        .apply_to(&mut product);

        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.99);
        assert!(!product.available);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateProduct::default().is_empty());
        assert!(
            !UpdateProduct {
                available: Some(true),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
