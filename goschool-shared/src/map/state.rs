//! The map screen as a state machine.
//!
//! [`MapView`] owns everything the map screen knows: the filters, which panes
//! are open and the selected school. The widget and the page feed it
//! [`MapEvent`]s and carry out the [`MapEffect`]s it returns, so every rule of
//! the screen can be exercised without a browser.

use log::{debug, warn};
use serde_json::{Map, Value};

use super::filters::{EstablishmentStatus, PhaseFilter, PhaseOfEducation, StatusFilter};
use super::style::{self, StyleExpression};
use crate::api::ApiError;
use crate::models::School;
use crate::notice::Notice;
use crate::sequence::{RequestSequencer, Ticket};

/// Delay before resizing the map so the pane transition has finished.
pub const RESIZE_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The widget finished loading its style.
    WidgetLoaded,
    FeatureClicked {
        properties: Map<String, Value>,
        at: LngLat,
    },
    FeatureHovered {
        properties: Map<String, Value>,
        at: LngLat,
    },
    HoverEnded,
    /// The close button or the overlay was clicked.
    ClosePanes,
    ToggleRightPane,
    StatusToggled(EstablishmentStatus),
    PhaseToggled(PhaseOfEducation),
    PhotoLoaded {
        ticket: Ticket,
        photo_url: Option<String>,
    },
    PhotoFailed {
        ticket: Ticket,
        error: ApiError,
    },
}

/// Work the map page must carry out after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEffect {
    InstallLayer {
        source: Value,
        layer: Value,
    },
    FetchPhoto {
        school_id: String,
        ticket: Ticket,
    },
    /// `None` clears the filter.
    SetLayerFilter(Option<StyleExpression>),
    SetCircleColor(StyleExpression),
    ShowSelectionPopup {
        at: LngLat,
        html: String,
    },
    RemoveSelectionPopup,
    ShowHoverPopup {
        at: LngLat,
        html: String,
    },
    RemoveHoverPopup,
    SetPointerCursor(bool),
    ResizeMap {
        delay_ms: u32,
    },
    Notify(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeftPane {
    #[default]
    Closed,
    Open(Box<School>),
}

/// Not `Clone`: the photo sequencer counter would be shared between copies.
#[derive(Debug)]
pub struct MapView {
    tileset: String,
    status: StatusFilter,
    phases: PhaseFilter,
    left: LeftPane,
    right_open: bool,
    layer_ready: bool,
    photos: RequestSequencer,
}

impl MapView {
    /// A fresh view over `tileset`: default filters, left pane closed, right pane open.
    pub fn new(tileset: impl Into<String>) -> Self {
        Self {
            tileset: tileset.into(),
            status: StatusFilter::default(),
            phases: PhaseFilter::default(),
            left: LeftPane::Closed,
            right_open: true,
            layer_ready: false,
            photos: RequestSequencer::new(),
        }
    }

    pub const fn status_filter(&self) -> &StatusFilter {
        &self.status
    }

    pub const fn phase_filter(&self) -> &PhaseFilter {
        &self.phases
    }

    pub const fn left_pane(&self) -> &LeftPane {
        &self.left
    }

    pub fn selected(&self) -> Option<&School> {
        match &self.left {
            LeftPane::Open(school) => Some(&**school),
            LeftPane::Closed => None,
        }
    }

    pub const fn is_left_open(&self) -> bool {
        matches!(self.left, LeftPane::Open(_))
    }

    pub const fn is_right_open(&self) -> bool {
        self.right_open
    }

    /// Arrow shown on the right pane toggle.
    pub const fn toggle_label(&self) -> &'static str {
        if self.right_open { "→" } else { "←" }
    }

    pub fn circle_color(&self) -> StyleExpression {
        style::circle_color(&self.status, &self.phases)
    }

    pub fn handle(&mut self, event: MapEvent) -> Vec<MapEffect> {
        match event {
            MapEvent::WidgetLoaded => {
                self.layer_ready = true;
                vec![MapEffect::InstallLayer {
                    source: style::source_spec(&self.tileset),
                    layer: style::layer_spec(&self.status, &self.phases),
                }]
            }
            MapEvent::FeatureClicked { properties, at } => self.select(&properties, at),
            MapEvent::FeatureHovered { properties, at } => vec![
                MapEffect::SetPointerCursor(true),
                MapEffect::ShowHoverPopup {
                    at,
                    html: hover_html(&properties),
                },
            ],
            MapEvent::HoverEnded => vec![
                MapEffect::SetPointerCursor(false),
                MapEffect::RemoveHoverPopup,
            ],
            MapEvent::ClosePanes => self.close_left(),
            MapEvent::ToggleRightPane => {
                self.right_open = !self.right_open;
                vec![MapEffect::ResizeMap {
                    delay_ms: RESIZE_DELAY_MS,
                }]
            }
            MapEvent::StatusToggled(state) => {
                self.status.toggle(state);
                self.repaint()
            }
            MapEvent::PhaseToggled(phase) => {
                self.phases.toggle(phase);
                self.repaint()
            }
            MapEvent::PhotoLoaded { ticket, photo_url } => {
                self.apply_photo(ticket, photo_url);
                Vec::new()
            }
            MapEvent::PhotoFailed { ticket, error } => {
                if !self.photos.is_current(ticket) {
                    debug!("dropping superseded photo failure: {error}");
                    return Vec::new();
                }
                warn!("Error fetching school photo: {error}");
                vec![MapEffect::Notify(Notice::error("Failed to fetch school photo."))]
            }
        }
    }

    fn select(&mut self, properties: &Map<String, Value>, at: LngLat) -> Vec<MapEffect> {
        let projection = match School::from_feature_properties(properties) {
            Ok(projection) => projection,
            Err(err) => {
                warn!("ignoring click on unusable feature: {err}");
                return vec![MapEffect::Notify(Notice::error(
                    "Unable to show details for this school.",
                ))];
            }
        };
        if !projection.is_complete() {
            debug!(
                "feature is missing {} school fields: {:?}",
                projection.missing_fields.len(),
                projection.missing_fields
            );
        }

        let school = projection.school;
        // Projection guarantees an id.
        let school_id = school.id.clone().unwrap_or_default();
        let html = format!(
            "<div><strong>{}</strong></div>",
            escape_html(&school.establishment_name)
        );
        let ticket = self.photos.issue();
        self.left = LeftPane::Open(Box::new(school));

        vec![
            MapEffect::FetchPhoto {
                school_id: school_id.clone(),
                ticket,
            },
            MapEffect::SetLayerFilter(Some(style::selection_filter(&school_id))),
            MapEffect::RemoveSelectionPopup,
            MapEffect::ShowSelectionPopup { at, html },
        ]
    }

    fn close_left(&mut self) -> Vec<MapEffect> {
        if !self.is_left_open() {
            return Vec::new();
        }
        self.left = LeftPane::Closed;
        self.photos.invalidate();
        vec![
            MapEffect::SetLayerFilter(None),
            MapEffect::RemoveSelectionPopup,
        ]
    }

    fn repaint(&self) -> Vec<MapEffect> {
        if self.layer_ready {
            vec![MapEffect::SetCircleColor(self.circle_color())]
        } else {
            Vec::new()
        }
    }

    fn apply_photo(&mut self, ticket: Ticket, photo_url: Option<String>) {
        if !self.photos.is_current(ticket) {
            debug!("dropping superseded photo response");
            return;
        }
        let LeftPane::Open(school) = &mut self.left else {
            return;
        };
        match photo_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => school.featured_image = Some(url),
            None => warn!("No photo URL returned for the school."),
        }
    }
}

/// Escapes text for interpolation into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn property<'a>(properties: &'a Map<String, Value>, key: &str) -> std::borrow::Cow<'a, str> {
    match properties.get(key) {
        Some(Value::String(text)) => text.as_str().into(),
        Some(Value::Null) | None => "".into(),
        Some(other) => other.to_string().into(),
    }
}

/// Name, street and locality, and town of the hovered feature.
pub fn hover_html(properties: &Map<String, Value>) -> String {
    let street = format!(
        "{} {}",
        property(properties, "street"),
        property(properties, "locality")
    );
    format!(
        "<div><strong>{}</strong><br />{}<br />{}</div>",
        escape_html(&property(properties, "establishment_name")),
        escape_html(street.trim()),
        escape_html(&property(properties, "town")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AT: LngLat = LngLat {
        lng: -0.1,
        lat: 51.5,
    };

    fn click(id: &str, name: &str) -> MapEvent {
        let Value::Object(properties) = json!({
            "id": id,
            "establishment_name": name,
            "phase_of_education": "Primary",
            "establishment_status": "Open",
        }) else {
            unreachable!()
        };
        MapEvent::FeatureClicked { properties, at: AT }
    }

    fn photo_ticket(effects: &[MapEffect]) -> Ticket {
        effects
            .iter()
            .find_map(|effect| match effect {
                MapEffect::FetchPhoto { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("click should fetch a photo")
    }

    fn loaded() -> MapView {
        let mut view = MapView::new(style::DEFAULT_TILESET);
        view.handle(MapEvent::WidgetLoaded);
        view
    }

    #[test]
    fn test_initial_state() {
        let view = MapView::new(style::DEFAULT_TILESET);
        assert!(!view.is_left_open());
        assert!(view.is_right_open());
        assert_eq!(view.toggle_label(), "→");
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn test_load_installs_layer() {
        let mut view = MapView::new("mapbox://test.tiles");
        let effects = view.handle(MapEvent::WidgetLoaded);
        let [MapEffect::InstallLayer { source, layer }] = effects.as_slice() else {
            panic!("expected a single layer install, got {effects:?}");
        };
        assert_eq!(source["url"], "mapbox://test.tiles");
        assert_eq!(layer["id"], style::LAYER_ID);
    }

    #[test]
    fn test_click_opens_pane_and_fetches_photo_once() {
        let mut view = loaded();
        let effects = view.handle(click("abc", "Oakfield <Primary>"));

        assert!(view.is_left_open());
        assert_eq!(view.selected().map(|s| s.establishment_name.as_str()), Some("Oakfield <Primary>"));
        let fetches = effects
            .iter()
            .filter(|effect| matches!(effect, MapEffect::FetchPhoto { school_id, .. } if school_id == "abc"))
            .count();
        assert_eq!(fetches, 1);
        assert!(effects.contains(&MapEffect::SetLayerFilter(Some(style::selection_filter("abc")))));
        assert!(effects.contains(&MapEffect::ShowSelectionPopup {
            at: AT,
            html: "<div><strong>Oakfield &lt;Primary&gt;</strong></div>".into(),
        }));
    }

    #[test]
    fn test_views_keep_their_own_photo_tickets() {
        let mut first = loaded();
        let mut second = loaded();
        let ticket = photo_ticket(&first.handle(click("abc", "Oakfield")));
        second.handle(click("def", "Elmwood"));

        first.handle(MapEvent::PhotoLoaded {
            ticket,
            photo_url: Some("https://img/oak.jpg".into()),
        });
        assert_eq!(
            first.selected().and_then(|s| s.featured_image.as_deref()),
            Some("https://img/oak.jpg")
        );
    }

    #[test]
    fn test_close_restores_full_visibility() {
        let mut view = loaded();
        view.handle(click("abc", "Oakfield"));
        let effects = view.handle(MapEvent::ClosePanes);
        assert_eq!(
            effects,
            vec![MapEffect::SetLayerFilter(None), MapEffect::RemoveSelectionPopup]
        );
        assert!(!view.is_left_open());
        assert!(view.is_right_open());
        assert!(view.handle(MapEvent::ClosePanes).is_empty());
    }

    #[test]
    fn test_right_pane_is_independent() {
        let mut view = loaded();
        view.handle(click("abc", "Oakfield"));
        let effects = view.handle(MapEvent::ToggleRightPane);
        assert_eq!(effects, vec![MapEffect::ResizeMap { delay_ms: 300 }]);
        assert!(!view.is_right_open());
        assert!(view.is_left_open());
        assert_eq!(view.toggle_label(), "←");
    }

    #[test]
    fn test_filter_toggle_repaints() {
        let mut view = loaded();
        let effects = view.handle(MapEvent::PhaseToggled(PhaseOfEducation::Nursery));
        assert_eq!(effects, vec![MapEffect::SetCircleColor(view.circle_color())]);
        assert!(!view.phase_filter().nursery);

        let mut unloaded = MapView::new(style::DEFAULT_TILESET);
        assert!(unloaded.handle(MapEvent::StatusToggled(EstablishmentStatus::Closed)).is_empty());
        assert!(unloaded.status_filter().closed);
    }

    #[test]
    fn test_photo_fills_detail() {
        let mut view = loaded();
        let ticket = photo_ticket(&view.handle(click("abc", "Oakfield")));
        view.handle(MapEvent::PhotoLoaded {
            ticket,
            photo_url: Some("https://img/abc.jpg".into()),
        });
        assert_eq!(
            view.selected().and_then(|s| s.featured_image.as_deref()),
            Some("https://img/abc.jpg")
        );
    }

    #[test]
    fn test_stale_photo_is_dropped() {
        let mut view = loaded();
        let first = photo_ticket(&view.handle(click("abc", "Oakfield")));
        let second = photo_ticket(&view.handle(click("def", "Elmwood")));

        view.handle(MapEvent::PhotoLoaded {
            ticket: second,
            photo_url: Some("https://img/def.jpg".into()),
        });
        view.handle(MapEvent::PhotoLoaded {
            ticket: first,
            photo_url: Some("https://img/abc.jpg".into()),
        });
        assert_eq!(
            view.selected().and_then(|s| s.featured_image.as_deref()),
            Some("https://img/def.jpg")
        );

        let stale_failure = view.handle(MapEvent::PhotoFailed {
            ticket: first,
            error: ApiError::Network("offline".into()),
        });
        assert!(stale_failure.is_empty());
    }

    #[test]
    fn test_photo_failure_keeps_detail() {
        let mut view = loaded();
        let ticket = photo_ticket(&view.handle(click("abc", "Oakfield")));
        let effects = view.handle(MapEvent::PhotoFailed {
            ticket,
            error: ApiError::Network("offline".into()),
        });
        assert_eq!(
            effects,
            vec![MapEffect::Notify(Notice::error("Failed to fetch school photo."))]
        );
        assert_eq!(view.selected().map(|s| s.establishment_name.as_str()), Some("Oakfield"));
    }

    #[test]
    fn test_photo_after_close_is_ignored() {
        let mut view = loaded();
        let ticket = photo_ticket(&view.handle(click("abc", "Oakfield")));
        view.handle(MapEvent::ClosePanes);
        assert!(view
            .handle(MapEvent::PhotoFailed {
                ticket,
                error: ApiError::Unauthorized,
            })
            .is_empty());
    }

    #[test]
    fn test_unusable_feature_notifies() {
        let mut view = loaded();
        let effects = view.handle(MapEvent::FeatureClicked {
            properties: Map::new(),
            at: AT,
        });
        assert!(matches!(effects.as_slice(), [MapEffect::Notify(notice)] if notice.is_error()));
        assert!(!view.is_left_open());
    }

    #[test]
    fn test_hover_popup_is_escaped() {
        let Value::Object(properties) = json!({
            "establishment_name": "A & B",
            "street": "1 High St",
            "locality": null,
            "town": "Worthing",
        }) else {
            unreachable!()
        };
        assert_eq!(
            hover_html(&properties),
            "<div><strong>A &amp; B</strong><br />1 High St<br />Worthing</div>"
        );

        let mut view = loaded();
        let effects = view.handle(MapEvent::FeatureHovered { properties, at: AT });
        assert_eq!(effects[0], MapEffect::SetPointerCursor(true));
        assert_eq!(
            view.handle(MapEvent::HoverEnded),
            vec![MapEffect::SetPointerCursor(false), MapEffect::RemoveHoverPopup]
        );
    }
}
