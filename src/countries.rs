use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const COUNTRIES_DATASET: &str = "countries.json";

#[derive(Debug, Error)]
pub enum LoadCountriesError {
    #[error("Unable to read the countries dataset")]
    ReadFail(#[from] std::io::Error),
    #[error("JSON deserialization failed")]
    JsonDeserializeFail(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Country {
    pub name: String,
    pub continent: String,
    // Countries without music picks yet simply omit the array in the dataset.
    #[serde(default)]
    pub music: Vec<MusicEntry>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct MusicEntry {
    // "DD-MM", recurs annually. Matched by exact string comparison, so a
    // malformed date never matches anything.
    pub date: String,
    pub artist: String,
    pub album_or_playlist: String,
    pub description: String,
    pub url: String,
}

#[tracing::instrument]
pub async fn load_countries(path: &str) -> Result<Vec<Country>, LoadCountriesError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let countries = serde_json::from_str(&raw)?;
    Ok(countries)
}
