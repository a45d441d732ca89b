//! Bindings to the parts of the `mapboxgl` global the client uses.

use serde_json::{Map, Value};
use shared::map::LngLat;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Map")]
    pub fn new(options: &JsValue) -> MapboxMap;

    #[wasm_bindgen(method)]
    pub fn on(this: &MapboxMap, event: &str, handler: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(
        this: &MapboxMap,
        event: &str,
        layer: &str,
        handler: &Closure<dyn FnMut(JsValue)>,
    );

    #[wasm_bindgen(method, js_name = addSource)]
    pub fn add_source(this: &MapboxMap, id: &str, source: &JsValue);

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &MapboxMap, layer: &JsValue);

    #[wasm_bindgen(method, js_name = getLayer)]
    pub fn get_layer(this: &MapboxMap, id: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = setFilter)]
    pub fn set_filter(this: &MapboxMap, layer: &str, filter: &JsValue);

    #[wasm_bindgen(method, js_name = setPaintProperty)]
    pub fn set_paint_property(this: &MapboxMap, layer: &str, name: &str, value: &JsValue);

    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &MapboxMap) -> web_sys::HtmlElement;

    #[wasm_bindgen(method)]
    pub fn resize(this: &MapboxMap);

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapboxMap);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Popup)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Popup")]
    pub fn new(options: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub fn set_lng_lat(this: &Popup, at: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setHTML)]
    pub fn set_html(this: &Popup, html: &str) -> Popup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Popup, map: &MapboxMap) -> Popup;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Popup);
}

/// Converts JSON built on the Rust side into a JS object.
pub fn to_js(value: &Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

pub fn lng_lat_to_js(at: LngLat) -> JsValue {
    js_sys::Array::of2(&at.lng.into(), &at.lat.into()).into()
}

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Properties of the first feature under a layer mouse event.
pub fn first_feature_properties(event: &JsValue) -> Option<Map<String, Value>> {
    let features: js_sys::Array = get(event, "features")?.dyn_into().ok()?;
    let properties = get(&features.get(0), "properties")?;
    let json: String = js_sys::JSON::stringify(&properties).ok()?.into();
    match serde_json::from_str(&json).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Where a mouse event happened.
pub fn event_lng_lat(event: &JsValue) -> Option<LngLat> {
    let at = get(event, "lngLat")?;
    Some(LngLat {
        lng: get(&at, "lng")?.as_f64()?,
        lat: get(&at, "lat")?.as_f64()?,
    })
}
