use log::{debug, warn};
use serde_json::json;
use shared::map::style::{LAYER_ID, SOURCE_ID};
use shared::map::{MapCamera, MapEffect, MapEvent};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use web_sys::HtmlElement;
use yew::Callback;

use super::mapbox::{
    MapboxMap, Popup, event_lng_lat, first_feature_properties, lng_lat_to_js, to_js,
};

type Listener = Closure<dyn FnMut(JsValue)>;

/// One Mapbox map with the school layer, its popups and event listeners.
///
/// Dropping the widget removes the map from the page.
pub struct SchoolMap {
    map: MapboxMap,
    selection_popup: Option<Popup>,
    hover_popup: Option<Popup>,
    _listeners: Vec<Listener>,
}

impl std::fmt::Debug for SchoolMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchoolMap")
            .field("selection_popup", &self.selection_popup.is_some())
            .field("hover_popup", &self.hover_popup.is_some())
            .finish_non_exhaustive()
    }
}

impl SchoolMap {
    /// Creates the map in `container` and forwards its events to `on_event`.
    pub fn mount(
        container: &HtmlElement,
        camera: &MapCamera,
        access_token: &str,
        on_event: &Callback<MapEvent>,
    ) -> Self {
        let options = to_js(&json!({
            "style": camera.style,
            "center": camera.center,
            "zoom": camera.zoom,
            "accessToken": access_token,
        }));
        if let Err(err) = js_sys::Reflect::set(&options, &"container".into(), container) {
            warn!("could not attach the map container: {err:?}");
        }
        let map = MapboxMap::new(&options);

        let loaded = {
            let on_event = on_event.clone();
            Listener::new(move |_| on_event.emit(MapEvent::WidgetLoaded))
        };
        map.on("load", &loaded);

        let clicked = {
            let on_event = on_event.clone();
            Listener::new(move |event: JsValue| {
                match (first_feature_properties(&event), event_lng_lat(&event)) {
                    (Some(properties), Some(at)) => {
                        on_event.emit(MapEvent::FeatureClicked { properties, at });
                    }
                    _ => debug!("click without a feature"),
                }
            })
        };
        map.on_layer("click", LAYER_ID, &clicked);

        let hovered = {
            let on_event = on_event.clone();
            Listener::new(move |event: JsValue| {
                if let (Some(properties), Some(at)) =
                    (first_feature_properties(&event), event_lng_lat(&event))
                {
                    on_event.emit(MapEvent::FeatureHovered { properties, at });
                }
            })
        };
        map.on_layer("mouseenter", LAYER_ID, &hovered);

        let left = {
            let on_event = on_event.clone();
            Listener::new(move |_| on_event.emit(MapEvent::HoverEnded))
        };
        map.on_layer("mouseleave", LAYER_ID, &left);

        Self {
            map,
            selection_popup: None,
            hover_popup: None,
            _listeners: vec![loaded, clicked, hovered, left],
        }
    }

    fn popup(&self, at: shared::map::LngLat, html: &str) -> Popup {
        let popup = Popup::new(&to_js(&json!({ "closeButton": false, "closeOnClick": false })));
        popup.set_lng_lat(&lng_lat_to_js(at));
        popup.set_html(html);
        popup.add_to(&self.map);
        popup
    }

    pub fn resize(&self) {
        self.map.resize();
    }

    /// Carries out a widget effect. Effects that are not about the widget are ignored.
    pub fn apply(&mut self, effect: &MapEffect) {
        match effect {
            MapEffect::InstallLayer { source, layer } => {
                if self.map.get_layer(LAYER_ID).is_undefined() {
                    self.map.add_source(SOURCE_ID, &to_js(source));
                    self.map.add_layer(&to_js(layer));
                }
            }
            MapEffect::SetLayerFilter(filter) => {
                let filter = filter
                    .as_ref()
                    .map_or(JsValue::NULL, |filter| to_js(filter.as_value()));
                self.map.set_filter(LAYER_ID, &filter);
            }
            MapEffect::SetCircleColor(colour) => {
                self.map
                    .set_paint_property(LAYER_ID, "circle-color", &to_js(colour.as_value()));
            }
            MapEffect::ShowSelectionPopup { at, html } => {
                self.selection_popup = Some(self.popup(*at, html));
            }
            MapEffect::RemoveSelectionPopup => {
                if let Some(popup) = self.selection_popup.take() {
                    popup.remove();
                }
            }
            MapEffect::ShowHoverPopup { at, html } => {
                if let Some(popup) = self.hover_popup.take() {
                    popup.remove();
                }
                self.hover_popup = Some(self.popup(*at, html));
            }
            MapEffect::RemoveHoverPopup => {
                if let Some(popup) = self.hover_popup.take() {
                    popup.remove();
                }
            }
            MapEffect::SetPointerCursor(pointer) => {
                let cursor = if *pointer { "pointer" } else { "" };
                if let Err(err) = self.map.get_canvas().style().set_property("cursor", cursor) {
                    debug!("could not set the map cursor: {err:?}");
                }
            }
            MapEffect::FetchPhoto { .. } | MapEffect::ResizeMap { .. } | MapEffect::Notify(_) => {}
        }
    }
}

impl Drop for SchoolMap {
    fn drop(&mut self) {
        debug!("removing map widget");
        for popup in [self.selection_popup.take(), self.hover_popup.take()].into_iter().flatten() {
            popup.remove();
        }
        self.map.remove();
    }
}
