use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum ChecklistError {
    EmptyInput,
    UnknownPoint {
        name: String,
    },
    DuplicatePoint {
        name: String,
    },
    NonFiniteCoordinate {
        name: String,
    },
    InvalidCanvas(&'static str),
    XmlParse(quick_xml::Error),
    GeoJson(geojson::Error),
    UnsupportedGeoJson(&'static str),
}

impl std::fmt::Display for ChecklistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Cannot compute bounds of an empty point set"),
            Self::UnknownPoint { name } => write!(f, "Unknown point '{name}'"),
            Self::DuplicatePoint { name } => {
                write!(f, "Point name '{name}' appears more than once in a dataset")
            }
            Self::NonFiniteCoordinate { name } => {
                write!(f, "Point '{name}' has a non-finite coordinate")
            }
            Self::InvalidCanvas(reason) => write!(f, "Invalid canvas: {reason}"),
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::GeoJson(e) => write!(f, "GeoJSON parse error: {e}"),
            Self::UnsupportedGeoJson(kind) => {
                write!(f, "Unsupported GeoJSON object: expected a Feature or FeatureCollection, got {kind}")
            }
        }
    }
}

impl std::error::Error for ChecklistError {}

impl From<quick_xml::Error> for ChecklistError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}

impl From<geojson::Error> for ChecklistError {
    fn from(e: geojson::Error) -> Self {
        Self::GeoJson(e)
    }
}

impl From<ChecklistError> for JsValue {
    fn from(e: ChecklistError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
