//! Model prompt composition

use sitewright_domain::StyleHints;
use std::sync::LazyLock;

/// Builds the user message sent to the model
pub struct PromptBuilder {
    prompt: String,
    hints: StyleHints,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            hints: StyleHints::default(),
        }
    }

    /// Add style hints to steer the model
    pub fn with_hints(mut self, hints: StyleHints) -> Self {
        self.hints = hints;
        self
    }

    /// Build the user message
    ///
    /// The prompt is always the literal prefix. A style-guidance suffix is
    /// appended only when at least one hint is present.
    pub fn build(&self) -> String {
        let mut message = self.prompt.clone();

        if self.hints.is_empty() {
            return message;
        }

        message.push_str("\n\nStyle guidance: ");

        if let Some(industry) = &self.hints.industry {
            message.push_str(&format!("Industry: {}. ", industry));
        }

        if let Some(style) = &self.hints.style {
            message.push_str(&format!("Style preference: {}. ", style));
        }

        if let Some(colors) = self.hints.color_preferences.as_ref().filter(|c| !c.is_empty()) {
            message.push_str(&format!("Color preferences: {}. ", colors.join(", ")));
        }

        message
    }
}

/// Compose the user message for `prompt` and `hints`
pub fn compose_user_message(prompt: &str, hints: &StyleHints) -> String {
    PromptBuilder::new(prompt).with_hints(hints.clone()).build()
}

static SYSTEM_PROMPT: LazyLock<String> =
    LazyLock::new(|| format!("{}\n\n{}", SYSTEM_INSTRUCTIONS, STYLE_GUIDANCE));

/// The system message sent with every request
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT.as_str()
}

const SYSTEM_INSTRUCTIONS: &str = r##"You design websites and write their copy. Each request describes a business or project; answer with a complete website for it.

Before writing, work out from the request:
1. The industry or kind of business
2. Who the audience is
3. The voice to write in (formal, relaxed, playful, ...)
4. Which products, services or features deserve the spotlight
5. Any design wishes the request states outright

Give every site its own look. Two different requests should not come back with the same palette, fonts and layout:
- Creative work: lively colour, playful composition, artistic touches
- Professional services: restrained palettes, tidy layouts, refined type
- Technology: modern, minimal, a little experimental
- Food and hospitality: warm, welcoming, appetising
- Health and wellness: calm, fresh, natural tones

Reply with one JSON object in exactly this shape:
{
  "title": "Short, search-friendly site title",
  "description": "One or two sentences on the value proposition",
  "theme": {
    "primaryColor": "#RRGGBB hex colour suited to the brand",
    "secondaryColor": "#RRGGBB hex colour that complements it",
    "fontFamily": "Font name, e.g. 'Inter' or 'Playfair Display'",
    "style": "Design style, e.g. modern, minimalist, bold, elegant, playful"
  },
  "sections": [
    {
      "type": "hero",
      "layout": "centered | split | fullscreen | video-background",
      "heading": "Headline carrying the core promise",
      "subheading": "Supporting line on the benefit",
      "cta": "Call-to-action label",
      "image": "What the hero image shows"
    },
    {
      "type": "features",
      "layout": "grid | cards | timeline | alternating",
      "heading": "Heading for the features or services",
      "subheading": "Optional supporting line",
      "items": [
        {
          "title": "Feature or service name",
          "description": "Why it matters to the customer",
          "icon": "Icon name",
          "image": "Optional image description"
        }
      ]
    },
    {
      "type": "about",
      "layout": "text-only | image-left | image-right",
      "heading": "About heading",
      "content": "The story, mission and values of the business",
      "image": "What the image shows"
    }
  ]
}

Add further sections where they fit the business:
- "testimonials": customer quotes, as a "testimonials" array of {quote, author, role}
- "pricing": price tiers, as a "plans" array of {name, price, period, features, cta}
- "team": the people behind the business
- "gallery": image-led work such as photography or interiors, as an "items" array
- "contact": contact details in an "info" object of {address, email, phone, hours}
- "faq": common questions
- "cta-banner": a closing call to action

Every section needs a "type" and a "heading". Collections are always JSON arrays. Write specific, believable copy aimed at the audience."##;

const STYLE_GUIDANCE: &str = r#"Make the visual identity specific to this business and audience:

1. Colour: pick colours for the feeling they create
   - Technology: blues, purples, teals
   - Food and restaurants: warm reds and oranges, earth tones, fresh greens
   - Fitness and wellness: energetic blues, calm greens, motivating oranges
   - Luxury: golds, deep blues, black, rich purples
   - Creative fields: bold, unexpected combinations

2. Typography: match the brand's personality
   - Professional: clean sans-serifs such as "Inter" or "Open Sans"
   - Artistic: display faces such as "Playfair Display" or "Abril Fatface"
   - Technology: geometric sans-serifs such as "Montserrat"
   - Traditional: serifs such as "Garamond" or "Libre Baskerville"
   - Friendly: rounded faces such as "Quicksand" or "Nunito"

3. Layout: follow the purpose of the site
   - Shops and products: grids with strong imagery
   - Portfolios: asymmetric, image-first
   - Corporate: structured, with a clear hierarchy
   - Hospitality: immersive full-width imagery
   - Education: content-first with clear sections

4. Accents: suggest fitting details
   - Technology: geometric shapes, gradients, minimal icons
   - Hospitality: organic shapes, textures, appetising photography
   - Wellness: action imagery, progress markers
   - Luxury: generous spacing, subtle texture
   - Creative: playful, unusual components

Return only the JSON object."#;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hints(industry: Option<&str>, style: Option<&str>, colors: Option<&[&str]>) -> StyleHints {
        StyleHints {
            industry: industry.map(str::to_string),
            style: style.map(str::to_string),
            color_preferences: colors.map(|c| c.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_no_hints_leaves_prompt_unchanged() {
        let message = compose_user_message("A bakery site", &StyleHints::default());
        assert_eq!(message, "A bakery site");
    }

    #[test]
    fn test_all_clauses_in_fixed_order() {
        let message = compose_user_message(
            "A bakery site",
            &hints(Some("food"), Some("retro"), Some(&["brown", "gold"])),
        );
        assert_eq!(
            message,
            "A bakery site\n\nStyle guidance: Industry: food. Style preference: retro. Color preferences: brown, gold. "
        );
    }

    #[test]
    fn test_only_present_clauses_included() {
        let message = compose_user_message("Gym", &hints(None, Some("bold"), None));
        assert_eq!(message, "Gym\n\nStyle guidance: Style preference: bold. ");

        let message = compose_user_message("Gym", &hints(None, None, Some(&["red"])));
        assert_eq!(message, "Gym\n\nStyle guidance: Color preferences: red. ");
    }

    #[test]
    fn test_empty_color_list_counts_as_absent() {
        let message = compose_user_message("Gym", &hints(None, None, Some(&[])));
        assert_eq!(message, "Gym");
    }

    #[test]
    fn test_system_prompt_joins_both_blocks() {
        let system = system_prompt();
        assert_eq!(system, format!("{}\n\n{}", SYSTEM_INSTRUCTIONS, STYLE_GUIDANCE));
        assert!(system.contains("\"sections\""));
        assert!(std::ptr::eq(system, system_prompt()));
    }

    proptest! {
        /// Property: the prompt is always a literal prefix of the message
        #[test]
        fn test_prompt_is_prefix(
            prompt in ".*",
            industry in proptest::option::of("[a-z]{1,10}"),
            style in proptest::option::of("[a-z]{1,10}"),
            colors in proptest::option::of(proptest::collection::vec("[a-z]{1,6}", 0..4)),
        ) {
            let hints = StyleHints { industry, style, color_preferences: colors };
            let message = compose_user_message(&prompt, &hints);
            prop_assert!(message.starts_with(&prompt));
            prop_assert_eq!(message.len() > prompt.len(), !hints.is_empty());
        }
    }
}
