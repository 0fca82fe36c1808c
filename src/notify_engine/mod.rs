pub mod country_match;
pub mod output_channel;
pub mod template_engine;

use anyhow::Error;
use chrono::{NaiveDate, Utc};

use crate::countries::{Country, LoadCountriesError};

use self::{
    country_match::CountryMatch,
    output_channel::OutputChannel,
    template_engine::{EmailContent, TemplateEngine},
};

#[derive(Debug, Clone)]
pub struct NotifyDate {
    day_month: String,
    readable: String,
}

impl NotifyDate {
    pub fn today() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day_month: date.format("%d-%m").to_string(),
            readable: date.format("%-d %B").to_string(),
        }
    }

    pub fn day_month(&self) -> &str {
        &self.day_month
    }

    pub fn readable(&self) -> &str {
        &self.readable
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    NoMatches,
    Matches {
        countries: Vec<String>,
        email: EmailContent,
    },
}

pub fn find_matches<'a>(countries: &'a [Country], today: &NotifyDate) -> Vec<CountryMatch<'a>> {
    countries
        .iter()
        .filter_map(|country| {
            let entries = country
                .music
                .iter()
                .filter(|entry| entry.date == today.day_month())
                .collect::<Vec<_>>();
            if entries.is_empty() {
                None
            } else {
                Some(CountryMatch::from((country, entries)))
            }
        })
        .collect()
}

pub struct NotifyEngine<GcFn, GcFnFut, Oc, Te>
where
    GcFn: Fn() -> GcFnFut,
    GcFnFut: futures::Future<Output = Result<Vec<Country>, LoadCountriesError>>,
    Oc: OutputChannel,
    Te: TemplateEngine,
{
    output_channel: Oc,
    template_engine: Te,
    get_countries: GcFn,
}

impl<GcFn, GcFnFut, Oc, Te> NotifyEngine<GcFn, GcFnFut, Oc, Te>
where
    GcFn: Fn() -> GcFnFut,
    GcFnFut: futures::Future<Output = Result<Vec<Country>, LoadCountriesError>>,
    Oc: OutputChannel,
    Te: TemplateEngine,
{
    pub fn new(get_countries: GcFn, output_channel: Oc, template_engine: Te) -> Self {
        Self {
            output_channel,
            template_engine,
            get_countries,
        }
    }

    pub fn evaluate(
        &self,
        countries: &[Country],
        today: &NotifyDate,
    ) -> Result<Outcome, Te::Error> {
        let matches = find_matches(countries, today);
        if matches.is_empty() {
            return Ok(Outcome::NoMatches);
        }
        let email = self.template_engine.generate_email(today, &matches)?;
        let countries = matches
            .iter()
            .map(|country_match| country_match.country.name.clone())
            .collect();
        Ok(Outcome::Matches { countries, email })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn run(&mut self, today: &NotifyDate) -> Result<(), Error> {
        let get_countries = &self.get_countries;
        let countries = get_countries().await?;
        let outcome = self.evaluate(&countries, today)?;

        let output_channel = &mut self.output_channel;
        match outcome {
            Outcome::NoMatches => {
                output_channel.write_value("has_matches", "false").await?;
                tracing::debug!(message = "No music entries matched", date = %today.day_month());
                println!("No music entries for today ({})", today.readable());
            }
            Outcome::Matches { countries, email } => {
                output_channel.write_value("has_matches", "true").await?;
                output_channel
                    .write_value("email_subject", &email.subject)
                    .await?;
                output_channel
                    .write_multiline("email_body", &email.body)
                    .await?;
                tracing::debug!(message = "Music entries matched", date = %today.day_month(), count = countries.len());
                println!(
                    "Found music for {} countries: {}",
                    countries.len(),
                    countries.join(", ")
                );
            }
        }
        Ok(())
    }
}
