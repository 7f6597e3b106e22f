//! Statically declared field-constraint tables.
//!
//! One table per entity, consumed by both the server-side request validator
//! and any UI layer (exported at `GET /api/meta/{entity}/fields`). Declaring
//! the constraints once keeps the form layer and the API from drifting
//! apart.
//!
//! A violated constraint is reported as `"{label} is required"`, e.g.
//! `Name is required`.

use serde::Serialize;

/// How a field's presence is judged by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Non-empty string.
    Text,
    /// String or number parsing to a strictly positive decimal.
    Decimal,
    /// Non-empty ID referencing another entity.
    Ref,
    /// Non-empty array of `{url}` objects.
    ImageList,
    /// Boolean flag; never required, defaults to `false`.
    Flag,
}

/// One field constraint: the wire name, the human label used in error
/// messages, the kind, and whether the field must be present.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// JSON body key (camelCase, matching the wire format).
    pub name: &'static str,
    /// Human-readable label, used verbatim in 400 messages.
    pub label: &'static str,
    /// Validation kind.
    pub kind: FieldKind,
    /// Whether absence or emptiness rejects the request.
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

/// Store: `name`.
pub const STORE_FIELDS: &[FieldSpec] = &[FieldSpec::required("name", "Name", FieldKind::Text)];

/// Billboard: `label`, `imageUrl`.
pub const BILLBOARD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("label", "Label", FieldKind::Text),
    FieldSpec::required("imageUrl", "Image URL", FieldKind::Text),
];

/// Category: `name`, `billboardId`.
pub const CATEGORY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("billboardId", "Billboard id", FieldKind::Ref),
];

/// Size: `name`, `value`.
pub const SIZE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("value", "Value", FieldKind::Text),
];

/// Color: `name`, `value`.
pub const COLOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("value", "Value", FieldKind::Text),
];

/// Product: scalar fields plus the image collection and display flags.
pub const PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::Text),
    FieldSpec::required("price", "Price", FieldKind::Decimal),
    FieldSpec::required("categoryId", "Category id", FieldKind::Ref),
    FieldSpec::required("sizeId", "Size id", FieldKind::Ref),
    FieldSpec::required("colorId", "Color id", FieldKind::Ref),
    FieldSpec::required("images", "Images", FieldKind::ImageList),
    FieldSpec::optional("isFeatured", "Featured", FieldKind::Flag),
    FieldSpec::optional("isArchived", "Archived", FieldKind::Flag),
];

/// Look up the constraint table for an entity by its URL path segment.
#[must_use]
pub fn for_entity(entity: &str) -> Option<&'static [FieldSpec]> {
    match entity {
        "stores" => Some(STORE_FIELDS),
        "billboards" => Some(BILLBOARD_FIELDS),
        "categories" => Some(CATEGORY_FIELDS),
        "sizes" => Some(SIZE_FIELDS),
        "colors" => Some(COLOR_FIELDS),
        "products" => Some(PRODUCT_FIELDS),
        _ => None,
    }
}
