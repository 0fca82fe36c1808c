use tera::{Context as TeraContext, Tera};

use super::{country_match::CountryMatch, NotifyDate};

#[derive(Debug, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

pub trait TemplateEngine {
    type Error: std::error::Error + Sync + Send + 'static;

    fn generate_email(
        &self,
        today: &NotifyDate,
        matches: &[CountryMatch],
    ) -> Result<EmailContent, Self::Error>;
}

pub struct TeraTemplateEngine {
    tera: Tera,
}

impl TeraTemplateEngine {
    pub fn try_init() -> Result<Self, tera::Error> {
        Ok(Self {
            tera: Self::get_tera_template()?,
        })
    }

    // The body templates are registered under ".html" names so that tera
    // escapes every interpolated dataset value; urls are built in code and
    // rendered through `safe`. The subject is plain text.
    pub fn get_tera_template() -> Result<Tera, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                "subject",
                r###"Music for {{ readable_date }}: {{ country_names | join(sep=", ") }}"###,
            ),
            (
                "body.html",
                r###"
<h1 style="margin:0;font-family:helvetica, 'helvetica neue', arial, verdana, sans-serif;color:#333333;font-size:22px">Music for {{ readable_date }}</h1>
{%- for country_match in matches -%}
    {%- include "country.html" -%}
{%- endfor -%}
"###,
            ),
            (
                "country.html",
                r###"
<h2 style="margin:0;padding-top:16px;font-family:helvetica, 'helvetica neue', arial, verdana, sans-serif;color:#333333;font-size:18px">{{ country_match.country.name }} ({{ country_match.country.continent }})</h2>
{%- for entry in country_match.entries -%}
    {%- include "entry.html" -%}
{%- endfor -%}
{%- for link in country_match.search_links %}
<p style="margin:0;padding-top:4px;font-family:helvetica, 'helvetica neue', arial, verdana, sans-serif;line-height:23px;font-size:15px"><a href="{{ link.url | safe }}" style="color:#1376c8">{{ link.label }}</a></p>
{%- endfor -%}
"###,
            ),
            (
                "entry.html",
                r###"
<div style="border-left:3px solid #6aa84f;border-right:1px solid #dddddd;border-top:1px solid #dddddd;border-bottom:1px solid #dddddd;background-color:#ffffff;border-radius:2px;padding:5px 10px;margin-top:5px">
<p style="margin:0;font-family:helvetica, 'helvetica neue', arial, verdana, sans-serif;line-height:23px;color:#555555;font-size:15px"><b>{{ entry.artist }}</b> – {{ entry.album_or_playlist }}</p>
<p style="margin:0;font-family:helvetica, 'helvetica neue', arial, verdana, sans-serif;line-height:23px;color:#555555;font-size:15px">{{ entry.description }}</p>
<p style="margin:0;font-family:helvetica, 'helvetica neue', arial, verdana, sans-serif;line-height:23px;color:#555555;font-size:15px"><a href="{{ entry.url | safe }}" style="color:#1376c8">Listen</a></p>
</div>
"###,
            ),
        ])?;
        Ok(tera)
    }
}

impl TemplateEngine for TeraTemplateEngine {
    type Error = tera::Error;

    #[tracing::instrument(level = "debug", skip(self))]
    fn generate_email(
        &self,
        today: &NotifyDate,
        matches: &[CountryMatch],
    ) -> Result<EmailContent, Self::Error> {
        let country_names = matches
            .iter()
            .map(|country_match| country_match.country.name.as_str())
            .collect::<Vec<_>>();

        let mut tera_context = TeraContext::new();
        tera_context.insert("readable_date", today.readable());
        tera_context.insert("country_names", &country_names);
        tera_context.insert("matches", &matches);

        let subject = self.tera.render("subject", &tera_context)?;
        let body = self.tera.render("body.html", &tera_context)?;
        Ok(EmailContent { subject, body })
    }
}
