//! Deterministic, offline content source.
//!
//! Produces plausible copy from the generation parameters alone. Used by
//! `generate --offline` and by tests that must not touch the network.

use super::{ContentSource, Credentials};
use crate::error::AppError;
use crate::model::{FaqEntry, GenerationParams, LandingContent};

#[derive(Debug, Clone, Copy, Default)]
pub struct MockContentSource;

impl MockContentSource {
    pub fn new() -> Self {
        Self
    }

    /// Builds the mock copy synchronously.
    pub fn compose(params: &GenerationParams) -> LandingContent {
        let city = &params.city;
        let state = &params.state;
        let primary = params.keywords.primary();
        let all = params.keywords.joined(", ");
        let either = params.keywords.joined(" or ");
        let company = params.company_name.as_deref();
        let company_text = company.unwrap_or("our business");
        let business = company.unwrap_or("your business");
        let possessive = company
            .map(|name| format!("{}'s", name))
            .unwrap_or_else(|| "your".to_string());

        let introduction = format!(
            "Welcome to {company_text}'s {all} services in {city}, {state}! We specialize in \
providing top-quality {all} services tailored to the unique needs of {city} residents. With years \
of experience serving the {city} area, we understand the local challenges and opportunities. Our \
team is committed to delivering exceptional {primary} solutions that make a difference for the \
people of {city}, {state}. Whether you're looking for {either} services, we're here to help with \
professional, reliable, and affordable options right here in {city}."
        );

        let why_us = format!(
            "When it comes to {primary} services in {city}, {state}, {company_text}'s local \
expertise sets us apart. We combine industry-leading practices with deep knowledge of {city}'s \
specific needs. Our team has been serving the {city} community for years, building strong \
relationships with local residents and businesses. We understand the unique characteristics of \
{state} and particularly {city}, allowing us to provide tailored solutions that address your \
specific challenges. Our commitment to quality, transparency, and customer satisfaction has made \
us the preferred provider of {all} services throughout {city} and surrounding areas in {state}. \
Choose {company_text} for reliable, efficient, and locally-focused {primary} services."
        );

        let things_to_do = format!(
            "{city}, {state} offers numerous attractions and activities for residents and visitors \
alike. Explore the beautiful parks and natural areas in and around {city}, where you can enjoy \
outdoor recreation all year round. The downtown area of {city} features local shops, restaurants, \
and cultural venues that showcase the unique character of this {state} community. Don't miss the \
seasonal festivals and community events that bring together the people of {city} in celebration. \
For history buffs, {city} has several historical sites and museums that highlight the rich \
heritage of this {state} region. Whether you're interested in outdoor adventures, cultural \
experiences, family activities, or culinary exploration, {city}, {state} has something special to \
offer everyone."
        );

        let faq = vec![
            FaqEntry::new(
                format!("What areas in {city}, {state} does {business} serve?"),
                format!(
                    "We proudly serve all neighborhoods and districts throughout {city}, {state}, \
including the downtown area, suburban communities, and surrounding regions. Our service area \
covers the entire {city} metropolitan area, ensuring comprehensive coverage for all your \
{primary} needs regardless of your specific location within {city}."
                ),
            ),
            FaqEntry::new(
                format!("How long has {business} been providing {all} services in {city}?"),
                format!(
                    "We've been a trusted provider of {all} services in {city}, {state} for over \
10 years, building a solid reputation based on reliability, expertise, and customer satisfaction. \
During this time, we've developed deep knowledge of {city}'s unique characteristics and \
requirements, allowing us to deliver superior {primary} services tailored to local needs."
                ),
            ),
            FaqEntry::new(
                format!("What makes {possessive} {primary} services unique in {city}, {state}?"),
                format!(
                    "Our {primary} services stand out in {city}, {state} because we combine \
industry-leading practices with deep local knowledge. We understand the specific challenges and \
opportunities in {city}, from the local regulations to the community preferences. Our team \
consists of {city} residents who are passionate about serving their community, and we regularly \
participate in local events and initiatives to stay connected with the people of {city}, {state}."
                ),
            ),
            FaqEntry::new(
                format!("Do you offer consultations for {primary} services in {city}, {state}?"),
                format!(
                    "Yes, we offer comprehensive consultations for all our {primary} services in \
{city}, {state}. Our local experts will meet with you at your {city} location to assess your \
specific needs and provide personalized recommendations. These consultations are designed to \
help {city} residents understand their options and make informed decisions about their {primary} \
requirements. Contact us today to schedule your personalized consultation in {city}, {state}."
                ),
            ),
        ];

        LandingContent {
            introduction,
            why_us,
            things_to_do,
            faq,
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for MockContentSource {
    async fn generate(
        &self,
        _credentials: &Credentials,
        params: &GenerationParams,
    ) -> Result<LandingContent, AppError> {
        log::info!(
            "Using offline content for '{}' in {}, {}",
            params.keywords.primary(),
            params.city,
            params.state
        );
        Ok(Self::compose(params))
    }
}
