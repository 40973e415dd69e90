//! Transform functions - map listings onto fixed-position feed rows

use crate::sync::types::{Column, FeedRow, FeedStats, PetFields, SourceRecord, Species};
use crate::sync::utils::{blank_unknown, mixed_breed_flag, normalize_line_breaks};
use tracing::{debug, info};

/// Why a listing was left out of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    NotAvailable,
    UnsupportedSpecies,
}

/// Build one row per qualifying listing, in source order
pub fn build_rows(records: &[SourceRecord], availability_marker: &str) -> (Vec<FeedRow>, FeedStats) {
    info!("Transforming {} listings", records.len());

    let mut stats = FeedStats {
        fetched: records.len(),
        ..FeedStats::default()
    };
    let mut rows = Vec::new();

    for record in records {
        match transform_record(record, availability_marker) {
            Ok(row) => {
                debug!(
                    "Adding {} ({})",
                    row.get(Column::ExternalId),
                    row.get(Column::Name)
                );
                stats.written += 1;
                rows.push(row);
            }
            Err(Skip::NotAvailable) => {
                debug!("Skipping {}: not publicly available", record.id);
                stats.skipped_unavailable += 1;
            }
            Err(Skip::UnsupportedSpecies) => {
                debug!("Skipping {}: unsupported species", record.id);
                stats.skipped_species += 1;
            }
        }
    }

    info!("Transform complete: {}", stats);

    (rows, stats)
}

/// Apply the status and species filters, then build the row
pub fn transform_record(record: &SourceRecord, availability_marker: &str) -> Result<FeedRow, Skip> {
    let fields = &record.fields;

    let status = fields.status.as_deref().unwrap_or_default();
    if !status.contains(availability_marker) {
        return Err(Skip::NotAvailable);
    }

    let species = fields
        .species
        .as_deref()
        .and_then(Species::from_tag)
        .ok_or(Skip::UnsupportedSpecies)?;

    Ok(build_row(&record.id, species, fields))
}

fn build_row(id: &str, species: Species, fields: &PetFields) -> FeedRow {
    let mut row = FeedRow::new();

    row.set(Column::ExternalId, id);
    row.set_opt(Column::Name, fields.name.as_deref());
    row.set(Column::Status, "Available");
    row.set(Column::Species, species.to_string());
    row.set_opt(Column::Sex, fields.sex.as_deref());
    row.set_opt(Column::Age, fields.age.as_deref());
    row.set_opt(Column::SpecialNeeds, fields.special_needs.as_deref());
    row.set_opt(Column::Size, fields.size.as_deref());
    row.set_opt(Column::CoatLength, fields.coat_length.as_deref());
    row.set(Column::Courtesy, "Yes");
    row.set(Column::Found, "No");
    row.set(Column::Mix, mixed_breed_flag(fields.mixed_breed.as_deref()));

    let (breed, color) = match species {
        Species::Dog => (&fields.dog_breed, &fields.dog_color),
        Species::Cat => (&fields.cat_breed, &fields.cat_color),
    };
    row.set_opt(Column::Breed, breed.as_deref());
    row.set_opt(Column::Color, color.as_deref());

    row.set_opt(Column::OkWithDogs, fields.ok_with_dogs.as_deref());
    row.set_opt(Column::OkWithCats, fields.ok_with_cats.as_deref());
    row.set_opt(Column::OkWithKids, fields.ok_with_kids.as_deref());
    row.set_opt(Column::Declawed, fields.declawed.as_deref());
    row.set_opt(Column::Housebroken, fields.housetrained.as_deref());
    row.set_opt(Column::Altered, fields.altered.as_deref());
    row.set_opt(Column::UpToDate, fields.up_to_date.as_deref());

    let description = fields.description.as_deref().unwrap_or_default();
    row.set(Column::Description, normalize_line_breaks(description));

    for (slot, picture) in Column::PHOTOS.iter().zip(&fields.pictures) {
        row.set(*slot, picture.url.as_str());
    }

    for column in Column::UNKNOWN_AS_BLANK {
        if blank_unknown(row.cell_mut(column)) {
            debug!("{}: reporting Unknown {} as blank", id, column.header());
        }
    }

    row
}

/// Row announcing that every listing was removed
pub fn placeholder_row() -> FeedRow {
    let mut row = FeedRow::new();

    row.set(Column::ExternalId, "1");
    row.set(Column::Name, "Temporary Deleted Dog");
    row.set(Column::Status, "Deleted");
    row.set(Column::Species, Species::Dog.to_string());
    row.set(Column::Breed, "Beagle");
    row.set(Column::Color, "Tan");

    row
}
