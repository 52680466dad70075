pub mod bounds;
pub mod error;
pub mod loader;
pub mod options;
pub mod projector;
pub mod render;
pub mod session;
pub mod tracker;
pub mod types;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::options::SessionConfig;
use crate::session::Session;
use crate::types::FilterMode;

/// A checklist session held on the JS side.
#[wasm_bindgen]
pub struct ChecklistApp {
    session: Session,
}

#[wasm_bindgen]
impl ChecklistApp {
    /// Start a session from a `SessionConfig`-shaped object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ChecklistApp, JsValue> {
        console_error_panic_hook::set_once();

        let config: SessionConfig = parse_or_default(config)?;
        Ok(ChecklistApp {
            session: Session::new(config)?,
        })
    }

    /// Flip a point's visited flag. Returns the new flag.
    pub fn toggle(&mut self, name: &str) -> Result<bool, JsValue> {
        Ok(self.session.toggle(name, js_sys::Date::now())?)
    }

    #[wasm_bindgen(js_name = isVisited)]
    pub fn is_visited(&self, name: &str) -> bool {
        self.session.visited().is_visited(name)
    }

    /// Render model as a JS object. `filter` is `"all"`, `"visited"` or `"notVisited"`.
    pub fn render(&self, filter: JsValue) -> Result<JsValue, JsValue> {
        let filter: FilterMode = parse_or_default(filter)?;
        let model = render::render(&self.session, filter, js_sys::Date::now())?;
        serde_wasm_bindgen::to_value(&model).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render model as a JSON string.
    #[wasm_bindgen(js_name = renderString)]
    pub fn render_string(&self, filter: JsValue) -> Result<String, JsValue> {
        let filter: FilterMode = parse_or_default(filter)?;
        let model = render::render(&self.session, filter, js_sys::Date::now())?;
        serde_json::to_string(&model).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current state of every point as a GeoJSON FeatureCollection string.
    #[wasm_bindgen(js_name = toGeoJsonString)]
    pub fn to_geojson_string(&self) -> Result<String, JsValue> {
        let fc = render::to_feature_collection(&self.session);
        serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Load named points from a GeoJSON string, returned as a JS array.
#[wasm_bindgen(js_name = pointsFromGeoJson)]
pub fn points_from_geojson(geojson: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let points = loader::parse_geojson_points(geojson)?;
    serde_wasm_bindgen::to_value(&points).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Load named waypoints from a GPX string, returned as a JS array.
#[wasm_bindgen(js_name = pointsFromGpx)]
pub fn points_from_gpx(gpx: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let points = loader::parse_gpx_waypoints(gpx)?;
    serde_wasm_bindgen::to_value(&points).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_or_default<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
