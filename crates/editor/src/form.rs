//! Product form state.

use storefront_catalog::{AcceptedImage, ImageRef, ProductFields};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
}

/// Image attached to the form but not yet committed to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PendingImage {
    #[default]
    None,
    /// Accepted by intake; bytes are still being read.
    Loading(AcceptedImage),
    /// Loaded and previewable.
    Ready(ImageRef),
}

impl PendingImage {
    pub fn preview(&self) -> Option<&ImageRef> {
        match self {
            PendingImage::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PendingImage::Loading(_))
    }
}

/// Text typed into the form plus the pending image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: PendingImage,
}

impl FormState {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Description => self.description = value,
            FormField::Price => self.price = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Price => &self.price,
        }
    }

    /// Snapshot of the form as product input.
    pub fn to_fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            image: self.image.preview().cloned(),
        }
    }

    /// Pre-fill from an existing product's fields.
    pub fn fill(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.image = match fields.image {
            Some(image) => PendingImage::Ready(image),
            None => PendingImage::None,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
