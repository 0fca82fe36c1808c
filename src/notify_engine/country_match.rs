use serde::Serialize;

use crate::countries::{Country, MusicEntry};

const SEARCH_LINKS: [(&str, &str); 3] = [
    (
        "Discover more artists",
        "https://www.google.com/search?q=best+music+artists+from+",
    ),
    (
        "The Guardian: album of the month",
        "https://www.google.com/search?q=the+guardian+album+of+the+month+",
    ),
    (
        "Bandcamp: album of the day",
        "https://www.google.com/search?q=bandcamp+album+of+the+day+",
    ),
];

#[derive(Debug, Serialize)]
pub struct CountryMatch<'a> {
    pub country: &'a Country,
    pub entries: Vec<&'a MusicEntry>,
    pub search_links: Vec<SearchLink>,
}

#[derive(Debug, Serialize)]
pub struct SearchLink {
    pub label: String,
    pub url: String,
}

impl<'a> From<(&'a Country, Vec<&'a MusicEntry>)> for CountryMatch<'a> {
    fn from((country, entries): (&'a Country, Vec<&'a MusicEntry>)) -> Self {
        let search_links = search_links(&country.name);
        Self {
            country,
            entries,
            search_links,
        }
    }
}

fn search_links(name: &str) -> Vec<SearchLink> {
    let query = name.replace(' ', "+");
    SEARCH_LINKS
        .iter()
        .map(|(label, base)| SearchLink {
            label: (*label).to_string(),
            url: format!("{}{}", base, query),
        })
        .collect()
}
