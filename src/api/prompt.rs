//! Prompt construction for landing page generation.

use crate::model::GenerationParams;

/// System message steering the model toward plain, friendly copy.
pub const SYSTEM_MESSAGE: &str = "You create conversational, easy-to-read content that sounds \
natural and friendly. Use simple language, short sentences, and avoid jargon or repetition.";

/// Builds the user prompt asking for the four landing page sections as JSON.
pub fn build_prompt(params: &GenerationParams) -> String {
    let city = &params.city;
    let state = &params.state;
    let keywords = &params.keywords;
    let company = params.company_name.as_deref();

    let audience = match company {
        Some(name) => format!("for \"{}\"", name),
        None => "for a local business".to_string(),
    };
    let provider = company.unwrap_or("our services");
    let company_line = company
        .map(|name| format!("- The company name \"{}\" where it makes sense\n", name))
        .unwrap_or_default();

    format!(
        "Create conversational, easy-to-read landing page content {audience} in {city}, {state} \
focused on {all}.

Keep the content simple, friendly, and approachable. Avoid repetition, jargon, and fancy words. \
Use short paragraphs and everyday language that's easy to understand.

Use a {tone} tone throughout the content.

Include the following sections:
1. Introduction (brief welcoming section about services in {city}, {state})
2. Why Us section (straightforward benefits of using {provider} in {city})
3. Things to do in {city}, {state} section (helpful local information in a conversational style)
4. FAQ section (4 questions and answers with direct, simple responses)

For each section, naturally include:
- The main keyword \"{primary}\"
- Secondary keywords: {secondary}
- Location terms: \"{city}\", \"{state}\"
{company_line}
Format the response as JSON with the following structure:
{{
  \"introduction\": \"...\",
  \"whyUs\": \"...\",
  \"thingsToDo\": \"...\",
  \"faq\": [
    {{
      \"question\": \"...\",
      \"answer\": \"...\"
    }}
  ]
}}",
        all = keywords.joined(", "),
        tone = params.tone_or_default(),
        primary = keywords.primary(),
        secondary = keywords.secondary().join(", "),
    )
}
