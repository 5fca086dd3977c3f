// src/listing/form.rs
use crate::api::{Coordinates, HouseInput};

pub const MIN_BEDROOMS: i64 = 1;
pub const MAX_BEDROOMS: i64 = 10;

/// Raw fields as posted by the new-house form. The address search widget
/// fills `address`, `latitude` and `longitude`; `images` holds each selected
/// file as a data URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseFormInput {
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub bedrooms: String,
    pub images: Vec<String>,
}

impl HouseFormInput {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut input = Self::default();
        for (k, v) in pairs {
            let v: String = v.into();
            match k.as_ref() {
                "address" => input.address = v.trim().to_string(),
                "latitude" => input.latitude = v.trim().to_string(),
                "longitude" => input.longitude = v.trim().to_string(),
                "bedrooms" => input.bedrooms = v.trim().to_string(),
                "image" if !v.is_empty() => input.images.push(v),
                _ => {}
            }
        }
        input
    }

    pub fn has_address(&self) -> bool {
        !self.address.is_empty()
    }
}

/// Per-field messages shown inline under each input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub address: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub bedrooms: Option<String>,
    pub image: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.bedrooms.is_none()
            && self.image.is_none()
    }
}

/// A form that passed validation and can be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseDraft {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub bedrooms: i64,
    /// Data URL of the single selected image.
    pub image: String,
}

impl HouseDraft {
    pub fn to_input(&self, image_url: String) -> HouseInput {
        HouseInput {
            address: self.address.clone(),
            image: image_url,
            coordinates: Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            bedrooms: self.bedrooms,
        }
    }
}

/// Where the new-house form currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Empty,
    AddressChosen,
    /// `preview` is the selected image, rendered locally.
    ImageAttached { preview: String },
    Submitting(HouseDraft),
    Success { id: String },
    Failed(FormFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormFailure {
    Invalid(FieldErrors),
    Submit(String),
}

impl FormFailure {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormFailure::Invalid(errors) => Some(errors),
            FormFailure::Submit(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormFailure::Submit(msg) => Some(msg),
            FormFailure::Invalid(_) => None,
        }
    }
}

impl FormState {
    /// Stage reached by the user before pressing save.
    pub fn from_input(input: &HouseFormInput) -> Self {
        if !input.has_address() {
            return FormState::Empty;
        }
        match input.images.first() {
            Some(img) if is_image_data_url(img) => FormState::ImageAttached {
                preview: img.clone(),
            },
            _ => FormState::AddressChosen,
        }
    }

    /// Validate and move to `Submitting`, or to `Failed` with field errors.
    pub fn begin_submit(input: &HouseFormInput) -> Self {
        match validate(input) {
            Ok(draft) => FormState::Submitting(draft),
            Err(errors) => FormState::Failed(FormFailure::Invalid(errors)),
        }
    }

    /// Image and bedroom fields only appear once an address is chosen.
    pub fn shows_details(&self) -> bool {
        matches!(
            self,
            FormState::AddressChosen | FormState::ImageAttached { .. } | FormState::Submitting(_)
        )
    }

    pub fn failure(&self) -> Option<&FormFailure> {
        match self {
            FormState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&str> {
        match self {
            FormState::ImageAttached { preview } => Some(preview),
            FormState::Submitting(draft) => Some(&draft.image),
            _ => None,
        }
    }
}

fn is_image_data_url(s: &str) -> bool {
    s.starts_with("data:image/") && s.contains(";base64,")
}

fn parse_coordinate(raw: &str, min: f64, max: f64, name: &str) -> Result<f64, String> {
    if raw.is_empty() {
        return Err("Choose an address from the search results".to_string());
    }
    let v: f64 = raw
        .parse()
        .map_err(|_| format!("{name} must be a number"))?;
    if !v.is_finite() || v < min || v > max {
        return Err(format!("{name} must be between {min} and {max}"));
    }
    Ok(v)
}

fn parse_bedrooms(raw: &str) -> Result<i64, String> {
    if raw.is_empty() {
        return Err("Please enter number of bedrooms".to_string());
    }
    let n: i64 = raw
        .parse()
        .map_err(|_| "Bedrooms must be a whole number".to_string())?;
    if n > MAX_BEDROOMS {
        return Err("Wooahh, too big of a house".to_string());
    }
    if n < MIN_BEDROOMS {
        return Err("Must have at least 1 bedroom".to_string());
    }
    Ok(n)
}

/// Check every field; all messages are collected so they show together.
pub fn validate(input: &HouseFormInput) -> Result<HouseDraft, FieldErrors> {
    let mut errors = FieldErrors::default();

    if !input.has_address() {
        errors.address = Some("Please enter your address".to_string());
    }

    let latitude = parse_coordinate(&input.latitude, -90.0, 90.0, "Latitude")
        .map_err(|e| errors.latitude = Some(e))
        .ok();
    let longitude = parse_coordinate(&input.longitude, -180.0, 180.0, "Longitude")
        .map_err(|e| errors.longitude = Some(e))
        .ok();
    let bedrooms = parse_bedrooms(&input.bedrooms)
        .map_err(|e| errors.bedrooms = Some(e))
        .ok();

    let image = match input.images.as_slice() {
        [one] if is_image_data_url(one) => Some(one.clone()),
        [_] => {
            errors.image = Some("The file must be an image".to_string());
            None
        }
        _ => {
            errors.image = Some("Please upload one file".to_string());
            None
        }
    };

    match (latitude, longitude, bedrooms, image) {
        (Some(latitude), Some(longitude), Some(bedrooms), Some(image)) if errors.is_empty() => {
            Ok(HouseDraft {
                address: input.address.clone(),
                latitude,
                longitude,
                bedrooms,
                image,
            })
        }
        _ => Err(errors),
    }
}
