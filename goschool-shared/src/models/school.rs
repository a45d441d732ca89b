//! The canonical school record.
//!
//! The directory API, the schools table, the edit form and the map's detail
//! panel all read the same [`School`]. Map features carry the same property
//! names as the API record, so [`School::from_feature_properties`] is the only
//! place a school is built from untyped data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::SubmitMode;
use super::lenient;
use crate::map::filters::{EstablishmentStatus, PhaseOfEducation};

macro_rules! school_record {
    ($($field:ident),+ $(,)?) => {
        /// A school as stored by the directory API.
        ///
        /// Apart from the identifiers and the name, every descriptive field is
        /// optional text: the API and the tileset disagree on whether numbers
        /// are strings, so they are normalised to text on the way in.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct School {
            #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
            pub school_id: Option<u64>,
            #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
            pub id: Option<String>,
            #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
            pub uprn: Option<u64>,
            #[serde(default, deserialize_with = "lenient::required_text")]
            pub establishment_name: String,
            $(
                #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
        }

        impl School {
            /// Every serialized field name, identifiers first.
            pub const FIELD_NAMES: &'static [&'static str] = &[
                "school_id",
                "id",
                "uprn",
                "establishment_name",
                $(stringify!($field),)+
            ];

            /// Looks up a descriptive text field by its wire name.
            pub fn text(&self, name: &str) -> Option<&str> {
                match name {
                    "id" => self.id.as_deref(),
                    "establishment_name" => Some(self.establishment_name.as_str()),
                    $(stringify!($field) => self.$field.as_deref(),)+
                    _ => None,
                }
            }
        }
    };
}

school_record! {
    address,
    street,
    locality,
    address3,
    town,
    county,
    postcode,
    country,
    establishment_type_group,
    phase_of_education,
    la_name,
    establishment_number,
    establishment_status,
    featured_image,
    statutory_low_age,
    statutory_high_age,
    boarders,
    nursery_provision,
    official_sixth_form,
    gender,
    religious_character,
    religious_ethos,
    admissions_policy,
    school_capacity,
    special_classes,
    census_date,
    number_of_pupils,
    number_of_boys,
    number_of_girls,
    percentage_fsm,
    trust_school_flag,
    school_sponsor_flag,
    federation_flag,
    federations,
    ukprn,
    ofsted_last_insp,
    ofsted_special_measures,
    ofsted_rating,
    last_changed_date,
    school_website,
    telephone_number,
    head_title,
    head_first_name,
    head_last_name,
    head_preferred_job_title,
    sen1,
    sen2,
    sen3,
    sen4,
    type_of_resourced_provision,
    resourced_provision_on_roll,
    resourced_provision_capacity,
    sen_unit_on_roll,
    sen_unit_capacity,
    gor,
    district_administrative,
    administrative_ward,
    parliamentary_constituency,
    urban_rural,
    easting,
    northing,
    msoa,
    lsoa,
    vote_ratio,
    vote_total,
}

/// Fields that tiles never carry; they are filled in by other lookups.
const NOT_IN_TILES: &[&str] = &["featured_image"];

/// Reasons a map feature cannot be turned into a [`School`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("feature has no school id")]
    MissingId,
    #[error("feature has no establishment name")]
    MissingName,
    #[error("feature properties are malformed: {0}")]
    Malformed(String),
}

/// A school projected from map feature properties, plus the canonical fields
/// the feature did not carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureProjection {
    pub school: School,
    pub missing_fields: Vec<&'static str>,
}

impl FeatureProjection {
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>, separator: &str) -> String {
    parts
        .into_iter()
        .filter_map(present)
        .collect::<Vec<_>>()
        .join(separator)
}

impl School {
    /// Builds a school from the properties of a clicked map feature.
    ///
    /// # Errors
    /// Fails when the feature lacks an `id` or an `establishment_name`, or when
    /// a property has a shape no school field accepts.
    pub fn from_feature_properties(
        properties: &Map<String, Value>,
    ) -> Result<FeatureProjection, ProjectionError> {
        let school: Self = serde_json::from_value(Value::Object(properties.clone()))
            .map_err(|err| ProjectionError::Malformed(err.to_string()))?;

        if present(school.id.as_deref()).is_none() {
            return Err(ProjectionError::MissingId);
        }
        if present(Some(&school.establishment_name)).is_none() {
            return Err(ProjectionError::MissingName);
        }

        let missing_fields = Self::FIELD_NAMES
            .iter()
            .copied()
            .filter(|name| !NOT_IN_TILES.contains(name))
            .filter(|name| properties.get(*name).is_none_or(Value::is_null))
            .collect();

        Ok(FeatureProjection {
            school,
            missing_fields,
        })
    }

    /// Street, locality, third address line and town, as shown in the table.
    pub fn address_line(&self) -> String {
        join_present(
            [
                self.street.as_deref(),
                self.locality.as_deref(),
                self.address3.as_deref(),
                self.town.as_deref(),
            ],
            ", ",
        )
    }

    /// The full postal address shown under the detail panel header.
    pub fn full_address(&self) -> Option<String> {
        let line = join_present(
            [
                self.street.as_deref(),
                self.address.as_deref(),
                self.address3.as_deref(),
                self.town.as_deref(),
                self.postcode.as_deref(),
                self.county.as_deref(),
                self.country.as_deref(),
            ],
            ", ",
        );
        (!line.is_empty()).then_some(line)
    }

    /// e.g. `Mrs Jane Smith - Headteacher`.
    pub fn head_teacher(&self) -> Option<String> {
        let name = join_present(
            [
                self.head_title.as_deref(),
                self.head_first_name.as_deref(),
                self.head_last_name.as_deref(),
            ],
            " ",
        );
        match (name.is_empty(), present(self.head_preferred_job_title.as_deref())) {
            (true, None) => None,
            (true, Some(title)) => Some(title.to_string()),
            (false, None) => Some(name),
            (false, Some(title)) => Some(format!("{name} - {title}")),
        }
    }

    /// Rating and last inspection date, when either is known.
    pub fn ofsted_summary(&self) -> Option<String> {
        let rating = present(self.ofsted_rating.as_deref());
        let inspected = present(self.ofsted_last_insp.as_deref());
        if rating.is_none() && inspected.is_none() {
            return None;
        }
        Some(format!(
            "{} | {}",
            rating.unwrap_or_default(),
            inspected.unwrap_or_default()
        ))
    }

    pub fn status(&self) -> Option<EstablishmentStatus> {
        EstablishmentStatus::classify(self.establishment_status.as_deref())
    }

    pub fn phase(&self) -> PhaseOfEducation {
        PhaseOfEducation::classify(self.phase_of_education.as_deref())
    }

    pub fn submit_mode(&self) -> SubmitMode {
        SubmitMode::from_id(self.id.as_deref())
    }
}

/// The school fields exposed by the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumIter)]
pub enum SchoolField {
    Name,
    Street,
    Locality,
    Address3,
    Town,
    EstablishmentTypeGroup,
}

impl SchoolField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "establishment_name",
            Self::Street => "street",
            Self::Locality => "locality",
            Self::Address3 => "address3",
            Self::Town => "town",
            Self::EstablishmentTypeGroup => "establishment_type_group",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Street => "Street",
            Self::Locality => "Locality",
            Self::Address3 => "Address Line 3",
            Self::Town => "Town",
            Self::EstablishmentTypeGroup => "Establishment Type Group",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "School name",
            Self::Street => "Street",
            Self::Locality => "Locality",
            Self::Address3 => "Address line 3",
            Self::Town => "Town",
            Self::EstablishmentTypeGroup => "e.g. Academies",
        }
    }

    pub const fn required(self) -> bool {
        matches!(self, Self::Name)
    }

    pub fn get(self, school: &School) -> &str {
        school.text(self.name()).unwrap_or_default()
    }

    pub fn set(self, school: &mut School, value: String) {
        let slot = match self {
            Self::Name => {
                school.establishment_name = value;
                return;
            }
            Self::Street => &mut school.street,
            Self::Locality => &mut school.locality,
            Self::Address3 => &mut school.address3,
            Self::Town => &mut school.town,
            Self::EstablishmentTypeGroup => &mut school.establishment_type_group,
        };
        *slot = Some(value);
    }
}

/// Client-side rejections of a school form before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("School ID is required for editing.")]
    MissingId,
    #[error("Name is required.")]
    MissingName,
}

/// A local copy of a school held by the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolDraft {
    pub school: School,
    pub editing: bool,
}

impl SchoolDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn edit(school: School) -> Self {
        Self {
            school,
            editing: true,
        }
    }

    pub fn set(&mut self, field: SchoolField, value: String) {
        field.set(&mut self.school, value);
    }

    pub fn set_image(&mut self, url: Option<String>) {
        self.school.featured_image = url;
    }

    /// Checks the draft and picks the request to send.
    ///
    /// # Errors
    /// An edit without an id, or any draft without a name, is rejected.
    pub fn submission(&self) -> Result<SubmitMode, DraftError> {
        let mode = self.school.submit_mode();
        if self.editing && !mode.is_update() {
            return Err(DraftError::MissingId);
        }
        if present(Some(&self.school.establishment_name)).is_none() {
            return Err(DraftError::MissingName);
        }
        Ok(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("feature properties must be an object"),
        }
    }

    fn full_feature() -> Map<String, Value> {
        let mut map = Map::new();
        for name in School::FIELD_NAMES {
            map.insert((*name).to_string(), json!("x"));
        }
        map.insert("school_id".into(), json!(42));
        map.insert("uprn".into(), json!("100012345"));
        map.insert("id".into(), json!("8f14e45f"));
        map.insert("establishment_name".into(), json!("Oakfield Primary"));
        map
    }

    #[test]
    fn test_field_names_cover_the_record() {
        let serialized = serde_json::to_value(School {
            establishment_name: "x".into(),
            ..School::default()
        })
        .unwrap();
        assert!(serialized.get("establishment_name").is_some());
        assert_eq!(School::FIELD_NAMES.len(), 69);
        assert!(School::FIELD_NAMES.contains(&"vote_total"));
    }

    #[test]
    fn test_projection_from_complete_feature() {
        let mut props = full_feature();
        props.remove("featured_image");
        let projection = School::from_feature_properties(&props).unwrap();
        assert!(projection.is_complete());
        assert_eq!(projection.school.school_id, Some(42));
        assert_eq!(projection.school.uprn, Some(100_012_345));
        assert_eq!(projection.school.establishment_name, "Oakfield Primary");
        assert_eq!(projection.school.lsoa.as_deref(), Some("x"));
    }

    #[test]
    fn test_projection_reports_missing_fields() {
        let props = feature(json!({
            "id": "8f14e45f",
            "establishment_name": "Oakfield Primary",
            "phase_of_education": "Primary",
            "number_of_pupils": 412,
            "lsoa": null,
        }));
        let projection = School::from_feature_properties(&props).unwrap();
        assert!(!projection.is_complete());
        assert!(projection.missing_fields.contains(&"lsoa"));
        assert!(projection.missing_fields.contains(&"street"));
        assert!(!projection.missing_fields.contains(&"featured_image"));
        assert!(!projection.missing_fields.contains(&"phase_of_education"));
        assert_eq!(projection.school.number_of_pupils.as_deref(), Some("412"));
    }

    #[test]
    fn test_projection_requires_id_and_name() {
        let no_id = feature(json!({"establishment_name": "Oakfield"}));
        assert_eq!(
            School::from_feature_properties(&no_id),
            Err(ProjectionError::MissingId)
        );

        let blank_name = feature(json!({"id": "8f14e45f", "establishment_name": "  "}));
        assert_eq!(
            School::from_feature_properties(&blank_name),
            Err(ProjectionError::MissingName)
        );
    }

    #[test]
    fn test_projection_rejects_nested_values() {
        let props = feature(json!({
            "id": "8f14e45f",
            "establishment_name": "Oakfield",
            "town": ["not", "text"],
        }));
        assert!(matches!(
            School::from_feature_properties(&props),
            Err(ProjectionError::Malformed(_))
        ));
    }

    #[test]
    fn test_address_line_skips_blanks() {
        let school = School {
            street: Some("1 High Street".into()),
            locality: Some(String::new()),
            town: Some("Worthing".into()),
            ..School::default()
        };
        assert_eq!(school.address_line(), "1 High Street, Worthing");
        assert_eq!(School::default().full_address(), None);
    }

    #[test]
    fn test_head_teacher_and_ofsted() {
        let school = School {
            head_title: Some("Mrs".into()),
            head_first_name: Some("Jane".into()),
            head_last_name: Some("Smith".into()),
            head_preferred_job_title: Some("Headteacher".into()),
            ofsted_rating: Some("Good".into()),
            ..School::default()
        };
        assert_eq!(school.head_teacher().as_deref(), Some("Mrs Jane Smith - Headteacher"));
        assert_eq!(school.ofsted_summary().as_deref(), Some("Good | "));
        assert_eq!(School::default().ofsted_summary(), None);
    }

    #[test]
    fn test_api_record_deserializes() {
        let json = r#"{"school_id":7,"id":"abc","uprn":null,"establishment_name":"Oakfield","phase_of_education":"Primary","establishment_status":"Open"}"#;
        let school: School = serde_json::from_str(json).unwrap();
        assert_eq!(school.phase(), PhaseOfEducation::Primary);
        assert_eq!(school.status(), Some(EstablishmentStatus::Open));
        assert_eq!(school.submit_mode(), SubmitMode::Update("abc".into()));
    }

    #[test]
    fn test_form_fields_round_trip_through_school() {
        use strum::IntoEnumIterator;

        let mut school = School::default();
        for field in SchoolField::iter() {
            field.set(&mut school, format!("{} value", field.label()));
        }
        assert_eq!(SchoolField::Name.get(&school), "Name value");
        assert_eq!(school.address3.as_deref(), Some("Address Line 3 value"));
        assert!(SchoolField::Name.required());
        assert!(!SchoolField::Town.required());
    }

    #[test]
    fn test_draft_submission_rules() {
        let mut draft = SchoolDraft::edit(School::default());
        draft.set(SchoolField::Name, "Oakfield".into());
        assert_eq!(draft.submission(), Err(DraftError::MissingId));

        let mut adding = SchoolDraft::blank();
        assert_eq!(adding.submission(), Err(DraftError::MissingName));
        adding.set(SchoolField::Name, "Oakfield".into());
        assert_eq!(adding.submission(), Ok(SubmitMode::Create));

        draft.school.id = Some("abc".into());
        assert_eq!(draft.submission(), Ok(SubmitMode::Update("abc".into())));
        assert_eq!(DraftError::MissingId.to_string(), "School ID is required for editing.");
    }
}
