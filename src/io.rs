use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LoadError, Result};

pub type RestaurantId = u64;
pub type UserId = i64;
pub type RatingValue = f64;

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub city: String,
    pub cuisine: String,
    pub reviews: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: UserId,
    #[serde(rename = "ID", alias = "restaurant_id")]
    pub restaurant_id: RestaurantId,
    pub rating: RatingValue,
}

// Cuisine and reviews are free text that is frequently left blank in the dataset.
#[derive(Debug, Deserialize)]
struct RestaurantRow {
    #[serde(rename = "RestID", alias = "id")]
    id: RestaurantId,
    #[serde(rename = "Name", alias = "name")]
    name: String,
    #[serde(rename = "City", alias = "city")]
    city: String,
    #[serde(rename = "Cuisine", alias = "cuisine", default)]
    cuisine: Option<String>,
    #[serde(rename = "Reviews", alias = "reviews", default)]
    reviews: Option<String>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Restaurant {
            id: row.id,
            name: row.name,
            city: row.city,
            cuisine: row.cuisine.unwrap_or_default(),
            reviews: row.reviews.unwrap_or_default(),
        }
    }
}

const RESTAURANT_COLUMNS: &[(&str, &[&str])] = &[
    ("RestID", &["RestID", "id"]),
    ("Name", &["Name", "name"]),
    ("City", &["City", "city"]),
];

const RATING_COLUMNS: &[(&str, &[&str])] = &[
    ("userId", &["userId", "user_id"]),
    ("ID", &["ID", "restaurant_id"]),
    ("rating", &["rating"]),
];

pub fn read_restaurants(restaurants_path: &str) -> Result<Vec<Restaurant>> {
    let file = File::open(restaurants_path).map_err(|err| LoadError::io(restaurants_path, err))?;
    restaurants_from_reader(file, restaurants_path)
}

pub fn read_ratings(ratings_path: &str) -> Result<Vec<Rating>> {
    let file = File::open(ratings_path).map_err(|err| LoadError::io(ratings_path, err))?;
    ratings_from_reader(file, ratings_path)
}

/// Parses the restaurant table. `source` only names the input in error messages.
pub fn restaurants_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<Restaurant>> {
    let mut csv_reader = create_csv_reader(reader);
    require_columns(&mut csv_reader, source, RESTAURANT_COLUMNS)?;
    csv_reader
        .deserialize::<RestaurantRow>()
        .map(|row| {
            row.map(Restaurant::from)
                .map_err(|err| LoadError::csv(source, err))
        })
        .collect()
}

pub fn ratings_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<Rating>> {
    let mut csv_reader = create_csv_reader(reader);
    require_columns(&mut csv_reader, source, RATING_COLUMNS)?;
    csv_reader
        .deserialize::<Rating>()
        .map(|row| row.map_err(|err| LoadError::csv(source, err)))
        .collect()
}

fn create_csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn require_columns<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    source: &str,
    required: &[(&'static str, &[&str])],
) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|err| LoadError::csv(source, err))?;
    for (column, accepted_names) in required {
        if !headers.iter().any(|header| accepted_names.contains(&header)) {
            return Err(LoadError::missing_column(source, *column));
        }
    }
    Ok(())
}
