//! Core data types for the feed sync pipeline
//! Pure data structures with no I/O

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::PathBuf;

/// Column names of the aggregator import file, in order
pub const CSV_HEADERS: [&str; 33] = [
    "externalID",
    "status",
    "internalID",
    "intakeDate",
    "name",
    "type",
    "priBreed",
    "secBreed",
    "mix",
    "sex",
    "okwithdogs",
    "okwithcats",
    "okwithkids",
    "declawed",
    "housebroken",
    "age",
    "specialNeeds",
    "altered",
    "size",
    "uptodate",
    "color",
    "pattern",
    "coatLength",
    "courtesy",
    "dsc",
    "found",
    "foundDate",
    "foundZipcode",
    "photo1",
    "photo2",
    "photo3",
    "photo4",
    "videoUrl",
];

/// Number of columns every feed row carries
pub const COLUMN_COUNT: usize = CSV_HEADERS.len();

/// One listing as returned by the records API
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    #[serde(default)]
    pub fields: PetFields,
}

/// The named fields of a listing; any of them may be missing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetFields {
    #[serde(rename = "Status", default, deserialize_with = "lenient_text")]
    pub status: Option<String>,

    #[serde(rename = "Pet Species", default, deserialize_with = "lenient_text")]
    pub species: Option<String>,

    #[serde(rename = "Pet Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(rename = "Sex", default, deserialize_with = "lenient_text")]
    pub sex: Option<String>,

    #[serde(rename = "Pet Age", default, deserialize_with = "lenient_text")]
    pub age: Option<String>,

    #[serde(rename = "Special Needs", default, deserialize_with = "lenient_text")]
    pub special_needs: Option<String>,

    #[serde(rename = "Pet Size", default, deserialize_with = "lenient_text")]
    pub size: Option<String>,

    #[serde(rename = "Coat Length", default, deserialize_with = "lenient_text")]
    pub coat_length: Option<String>,

    #[serde(rename = "Mixed Breed", default, deserialize_with = "lenient_text")]
    pub mixed_breed: Option<String>,

    #[serde(rename = "Breed - Dog", default, deserialize_with = "lenient_text")]
    pub dog_breed: Option<String>,

    #[serde(rename = "Color - Dog", default, deserialize_with = "lenient_text")]
    pub dog_color: Option<String>,

    #[serde(rename = "Breed - Cat", default, deserialize_with = "lenient_text")]
    pub cat_breed: Option<String>,

    #[serde(rename = "Color - Cat", default, deserialize_with = "lenient_text")]
    pub cat_color: Option<String>,

    #[serde(rename = "Okay with Dogs", default, deserialize_with = "lenient_text")]
    pub ok_with_dogs: Option<String>,

    #[serde(rename = "Okay with Cats", default, deserialize_with = "lenient_text")]
    pub ok_with_cats: Option<String>,

    #[serde(rename = "Okay with Kids", default, deserialize_with = "lenient_text")]
    pub ok_with_kids: Option<String>,

    #[serde(rename = "Declawed", default, deserialize_with = "lenient_text")]
    pub declawed: Option<String>,

    #[serde(rename = "Housetrained", default, deserialize_with = "lenient_text")]
    pub housetrained: Option<String>,

    #[serde(rename = "Altered", default, deserialize_with = "lenient_text")]
    pub altered: Option<String>,

    #[serde(rename = "Up-to-date on Shots etc", default, deserialize_with = "lenient_text")]
    pub up_to_date: Option<String>,

    #[serde(rename = "Public Description", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    #[serde(rename = "Pictures", default)]
    pub pictures: Vec<Picture>,
}

/// Accept whatever type the API sends for a field and keep it as cell text
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(cell_text))
}

/// Render a JSON field value as feed cell text.
/// Checkboxes become Yes/No, multi-selects are joined with ", ", null is no value.
pub fn cell_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(cell_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

/// Picture attachment; only the URL is used
#[derive(Debug, Clone, Deserialize)]
pub struct Picture {
    pub url: String,
}

/// Species the aggregator feed accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    /// Exact match on the source tag; anything else is unsupported
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Dog" => Some(Species::Dog),
            "Cat" => Some(Species::Cat),
            _ => None,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Species::Dog => write!(f, "Dog"),
            Species::Cat => write!(f, "Cat"),
        }
    }
}

/// Columns the sync populates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ExternalId,
    Status,
    Name,
    Species,
    Breed,
    Mix,
    Sex,
    OkWithDogs,
    OkWithCats,
    OkWithKids,
    Declawed,
    Housebroken,
    Age,
    SpecialNeeds,
    Altered,
    Size,
    UpToDate,
    Color,
    CoatLength,
    Courtesy,
    Description,
    Found,
    Photo1,
    Photo2,
    Photo3,
    Photo4,
}

impl Column {
    /// Photo slots in fill order
    pub const PHOTOS: [Column; 4] = [Column::Photo1, Column::Photo2, Column::Photo3, Column::Photo4];

    /// Yes/No flags where "Unknown" is reported as no data
    pub const UNKNOWN_AS_BLANK: [Column; 7] = [
        Column::UpToDate,
        Column::Altered,
        Column::Housebroken,
        Column::Declawed,
        Column::OkWithDogs,
        Column::OkWithCats,
        Column::OkWithKids,
    ];

    /// Header name this column is written under
    pub fn header(self) -> &'static str {
        CSV_HEADERS[self.index()]
    }

    /// Position in [`CSV_HEADERS`]
    pub fn index(self) -> usize {
        match self {
            Column::ExternalId => 0,
            Column::Status => 1,
            Column::Name => 4,
            Column::Species => 5,
            Column::Breed => 6,
            Column::Mix => 8,
            Column::Sex => 9,
            Column::OkWithDogs => 10,
            Column::OkWithCats => 11,
            Column::OkWithKids => 12,
            Column::Declawed => 13,
            Column::Housebroken => 14,
            Column::Age => 15,
            Column::SpecialNeeds => 16,
            Column::Altered => 17,
            Column::Size => 18,
            Column::UpToDate => 19,
            Column::Color => 20,
            Column::CoatLength => 22,
            Column::Courtesy => 23,
            Column::Description => 24,
            Column::Found => 25,
            Column::Photo1 => 28,
            Column::Photo2 => 29,
            Column::Photo3 => 30,
            Column::Photo4 => 31,
        }
    }
}

/// One output line; always exactly [`COLUMN_COUNT`] cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow([String; COLUMN_COUNT]);

impl FeedRow {
    pub fn new() -> Self {
        FeedRow(std::array::from_fn(|_| String::new()))
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.0[column.index()] = value.into();
    }

    /// Missing source values become an empty cell
    pub fn set_opt(&mut self, column: Column, value: Option<&str>) {
        self.set(column, value.unwrap_or_default());
    }

    pub fn get(&self, column: Column) -> &str {
        &self.0[column.index()]
    }

    pub fn cell_mut(&mut self, column: Column) -> &mut String {
        &mut self.0[column.index()]
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

impl Default for FeedRow {
    fn default() -> Self {
        Self::new()
    }
}

/// What to write when no record qualifies for the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyFeedPolicy {
    /// Header plus one "Deleted" placeholder row, so the aggregator sees an explicit removal
    #[default]
    Placeholder,
    /// Header row only
    HeaderOnly,
    /// Write no file and publish nothing
    Skip,
}

impl std::str::FromStr for EmptyFeedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(EmptyFeedPolicy::Placeholder),
            "header-only" | "header_only" => Ok(EmptyFeedPolicy::HeaderOnly),
            "skip" => Ok(EmptyFeedPolicy::Skip),
            other => Err(format!(
                "unknown empty feed policy '{}' (expected placeholder, header-only or skip)",
                other
            )),
        }
    }
}

impl std::fmt::Display for EmptyFeedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyFeedPolicy::Placeholder => write!(f, "placeholder"),
            EmptyFeedPolicy::HeaderOnly => write!(f, "header-only"),
            EmptyFeedPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Filtering and output choices for building a feed
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Substring of the status field marking a listing as public
    pub availability_marker: String,
    pub empty_feed_policy: EmptyFeedPolicy,
    pub output_dir: PathBuf,
    pub filename: String,
}

/// A feed file written to the local output directory
#[derive(Debug, Clone)]
pub struct FeedFile {
    pub path: PathBuf,
    /// Name used both locally and on the remote side
    pub filename: String,
    /// Data rows written, excluding the header
    pub rows: usize,
    pub placeholder: bool,
}

/// Transform statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedStats {
    pub fetched: usize,
    pub written: usize,
    pub skipped_unavailable: usize,
    pub skipped_species: usize,
}

impl std::fmt::Display for FeedStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fetched: {}, written: {}, skipped (not available): {}, skipped (species): {}",
            self.fetched, self.written, self.skipped_unavailable, self.skipped_species
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_positions_match_headers() {
        let expected = [
            (Column::ExternalId, "externalID"),
            (Column::Status, "status"),
            (Column::Name, "name"),
            (Column::Species, "type"),
            (Column::Breed, "priBreed"),
            (Column::Mix, "mix"),
            (Column::Sex, "sex"),
            (Column::OkWithDogs, "okwithdogs"),
            (Column::OkWithCats, "okwithcats"),
            (Column::OkWithKids, "okwithkids"),
            (Column::Declawed, "declawed"),
            (Column::Housebroken, "housebroken"),
            (Column::Age, "age"),
            (Column::SpecialNeeds, "specialNeeds"),
            (Column::Altered, "altered"),
            (Column::Size, "size"),
            (Column::UpToDate, "uptodate"),
            (Column::Color, "color"),
            (Column::CoatLength, "coatLength"),
            (Column::Courtesy, "courtesy"),
            (Column::Description, "dsc"),
            (Column::Found, "found"),
            (Column::Photo1, "photo1"),
            (Column::Photo2, "photo2"),
            (Column::Photo3, "photo3"),
            (Column::Photo4, "photo4"),
        ];

        for (column, header) in expected {
            assert_eq!(column.header(), header);
        }
    }

    #[test]
    fn test_new_row_is_full_width_and_blank() {
        let row = FeedRow::new();
        assert_eq!(row.cells().len(), CSV_HEADERS.len());
        assert!(row.cells().iter().all(String::is_empty));
    }

    #[test]
    fn test_species_from_tag() {
        assert_eq!(Species::from_tag("Dog"), Some(Species::Dog));
        assert_eq!(Species::from_tag("Cat"), Some(Species::Cat));
        assert_eq!(Species::from_tag("dog"), None);
        assert_eq!(Species::from_tag(""), None);
        assert_eq!(Species::from_tag("Alien"), None);
    }

    #[test]
    fn test_empty_feed_policy_parse() {
        assert_eq!("placeholder".parse::<EmptyFeedPolicy>(), Ok(EmptyFeedPolicy::Placeholder));
        assert_eq!("Header-Only".parse::<EmptyFeedPolicy>(), Ok(EmptyFeedPolicy::HeaderOnly));
        assert_eq!("skip".parse::<EmptyFeedPolicy>(), Ok(EmptyFeedPolicy::Skip));
        assert!("nothing".parse::<EmptyFeedPolicy>().is_err());
    }

    #[test]
    fn test_cell_text_renders_non_string_values() {
        use serde_json::json;

        assert_eq!(cell_text(json!("Young")), Some("Young".to_string()));
        assert_eq!(cell_text(json!(3)), Some("3".to_string()));
        assert_eq!(cell_text(json!(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(json!(true)), Some("Yes".to_string()));
        assert_eq!(cell_text(json!(false)), Some("No".to_string()));
        assert_eq!(cell_text(json!(["Black", "White"])), Some("Black, White".to_string()));
        assert_eq!(cell_text(json!(null)), None);
    }

    #[test]
    fn test_source_record_accepts_native_field_types() {
        let record: SourceRecord = serde_json::from_value(serde_json::json!({
            "id": "rec2",
            "fields": {
                "Status": "Published",
                "Pet Age": 3,
                "Declawed": true,
                "Housetrained": false,
                "Color - Cat": ["Black", "White"],
                "Pet Name": null
            }
        }))
        .unwrap();

        assert_eq!(record.fields.age.as_deref(), Some("3"));
        assert_eq!(record.fields.declawed.as_deref(), Some("Yes"));
        assert_eq!(record.fields.housetrained.as_deref(), Some("No"));
        assert_eq!(record.fields.cat_color.as_deref(), Some("Black, White"));
        assert!(record.fields.name.is_none());
        assert!(record.fields.species.is_none());
    }

    #[test]
    fn test_source_record_ignores_unknown_fields() {
        let record: SourceRecord = serde_json::from_value(serde_json::json!({
            "id": "rec1",
            "createdTime": "2024-01-01T00:00:00.000Z",
            "fields": {
                "Pet Name": "Fido",
                "Adoption Fee": "100",
                "Pictures": [{"id": "att1", "width": 10, "height": 10, "url": "https://dog.jpg"}]
            }
        }))
        .unwrap();

        assert_eq!(record.id, "rec1");
        assert_eq!(record.fields.name.as_deref(), Some("Fido"));
        assert_eq!(record.fields.pictures.len(), 1);
        assert!(record.fields.status.is_none());
    }
}
