use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Positive, finite unit price.
///
/// The stored number is rendered as-is (no rounding, no fixed decimals).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(DomainError::validation("price must be a positive number"));
        }
        Ok(Self(value))
    }

    /// Parse a price the way a lenient decimal form field does: surrounding
    /// whitespace is ignored and trailing garbage after the leading number is
    /// dropped (`"12.5 USD"` is 12.5). No leading number at all is an error.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value = leading_decimal(raw.trim())
            .ok_or_else(|| DomainError::validation("price must be a positive number"))?;
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Longest numeric prefix of `s`, `[+-]? digits [. digits] [e [+-] digits]`.
fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Star rating, an integer in `1..=5`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(DomainError::invalid_rating(format!(
                "{value} is outside {}..={}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value as u8))
    }

    /// Parse the text of a rating input. The trimmed text must be a whole
    /// integer; fractional or non-numeric input is rejected.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| DomainError::invalid_rating(format!("{trimmed:?} is not an integer")))?;
        Self::new(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl ValueObject for Rating {}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Opaque, previewable image reference (a `data:` URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME type of a `data:` URI, if the reference is one.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end])
    }
}

impl core::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw form input for a product, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<ImageRef>,
}

impl ProductFields {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    /// Validate the raw input, returning trimmed text and a parsed price.
    pub fn validate(&self) -> DomainResult<ValidFields> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }

        let price = Price::parse(&self.price)?;

        Ok(ValidFields {
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: self.image.clone(),
        })
    }
}

/// Form input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFields {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: Option<ImageRef>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    image: Option<ImageRef>,
    rating: Option<Rating>,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: ProductId, fields: ValidFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image: fields.image,
            rating: None,
            created_at,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_rating(&mut self, rating: Rating) {
        self.rating = Some(rating);
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Turn the product back into form input (used by the edit flow).
    pub fn to_fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.to_string(),
            image: self.image.clone(),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(name: &str, description: &str, price: &str) -> DomainResult<ValidFields> {
        ProductFields::new(name, description, price).validate()
    }

    #[test]
    fn validate_trims_text_fields() {
        let fields = valid("  Mug ", "\tCeramic mug\n", " 9.99 ").unwrap();
        assert_eq!(fields.name, "Mug");
        assert_eq!(fields.description, "Ceramic mug");
        assert_eq!(fields.price.value(), 9.99);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = valid("   ", "Ceramic mug", "9.99").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn validate_rejects_blank_description() {
        let err = valid("Mug", "", "9.99").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("description")),
            _ => panic!("Expected Validation error for blank description"),
        }
    }

    #[test]
    fn validate_rejects_bad_prices() {
        for raw in ["", "abc", "0", "-1", "-0.01", ".", "e5", "inf", "NaN"] {
            let err = valid("Mug", "Ceramic mug", raw).unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(_)),
                "price {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn price_parse_takes_leading_number() {
        assert_eq!(Price::parse("12.5abc").unwrap().value(), 12.5);
        assert_eq!(Price::parse(".5").unwrap().value(), 0.5);
        assert_eq!(Price::parse("3.").unwrap().value(), 3.0);
        assert_eq!(Price::parse("1e2").unwrap().value(), 100.0);
        assert_eq!(Price::parse("2e").unwrap().value(), 2.0);
        assert_eq!(Price::parse("+7").unwrap().value(), 7.0);
    }

    #[test]
    fn price_display_keeps_stored_number() {
        assert_eq!(Price::new(9.99).unwrap().to_string(), "9.99");
        assert_eq!(Price::new(3.0).unwrap().to_string(), "3");
        assert_eq!(Price::new(1.5).unwrap().to_string(), "1.5");
    }

    #[test]
    fn price_deserialize_enforces_positivity() {
        assert!(serde_json::from_str::<Price>("4.5").is_ok());
        assert!(serde_json::from_str::<Price>("0").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn rating_parse_requires_whole_integer() {
        assert_eq!(Rating::parse(" 4 ").unwrap().value(), 4);
        for raw in ["", "4.7", "four", "9", "0"] {
            let err = Rating::parse(raw).unwrap_err();
            assert!(matches!(err, DomainError::InvalidRating(_)), "{raw:?}");
        }
    }

    #[test]
    fn image_ref_exposes_mime_type() {
        let image = ImageRef::new("data:image/png;base64,AAAA");
        assert_eq!(image.mime_type(), Some("image/png"));
        assert_eq!(ImageRef::new("https://example.com/a.png").mime_type(), None);
    }

    #[test]
    fn to_fields_round_trips_through_validation() {
        let fields = ProductFields::new("Mug", "Ceramic mug", "9.99")
            .with_image(ImageRef::new("data:image/png;base64,AAAA"));
        let product = Product::new(ProductId::new(), fields.validate().unwrap(), Utc::now());

        let back = product.to_fields();
        assert_eq!(back, fields);
        assert_eq!(product.rating(), None);
    }

    #[test]
    fn product_identity_via_entity() {
        let id = ProductId::new();
        let product = Product::new(id, valid("Mug", "Ceramic mug", "9.99").unwrap(), Utc::now());
        assert!(product.has_id(&id));
        assert_eq!(product.id_typed(), id);
    }
}
