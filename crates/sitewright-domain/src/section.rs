//! Website sections - tagged by their `type` discriminator
//!
//! Models emit sections as loosely-typed objects: a `type` string plus
//! whatever optional fields that type uses. On the Rust side each known type
//! is its own variant carrying only its relevant payload, and unknown types
//! land in [`WebsiteSection::Other`] instead of failing. Payload fields are
//! read leniently (see the `lenient` module): a mistyped optional field never
//! fails deserialization.

use crate::lenient::{
    lenient_list, lenient_object, lenient_opt_bool, lenient_opt_string, lenient_string,
    lenient_string_list, FromText,
};
use serde::{Deserialize, Serialize};

/// Fields shared by every section type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFields {
    /// Section heading (required, non-empty after validation)
    #[serde(default, deserialize_with = "lenient_string")]
    pub heading: String,

    /// Layout hint (e.g. "centered", "grid", "image-left")
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    /// Supporting line under the heading
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,

    /// Free-form body text
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Call-to-action label; an object such as `{"text": "Go", "link": "#"}`
    /// keeps its label
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,

    /// Image description or URL
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Background treatment
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// A card in a features or gallery section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionItem {
    /// Card title
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    /// Card body
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    /// Icon name (features)
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Image description or URL (required by galleries in practice)
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// A bare string entry is usually a gallery image; it doubles as the title.
impl FromText for SectionItem {
    fn from_text(text: String) -> Self {
        Self {
            title: text.clone(),
            image: Some(text),
            ..Default::default()
        }
    }
}

/// A customer quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Quoted text
    #[serde(default, deserialize_with = "lenient_string")]
    pub quote: String,

    /// Who said it
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,

    /// Their role or company
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,

    /// Portrait description or URL
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FromText for Testimonial {
    fn from_text(text: String) -> Self {
        Self {
            quote: text,
            ..Default::default()
        }
    }
}

/// A pricing tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Plan name
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    /// Price label; models sometimes emit a bare number, which is kept as text
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: String,

    /// Billing period label (e.g. "month")
    #[serde(default, deserialize_with = "lenient_string")]
    pub period: String,

    /// Bullet list of included features
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub features: Vec<String>,

    /// Call-to-action label
    #[serde(default, deserialize_with = "lenient_string")]
    pub cta: String,

    /// Whether the plan is visually emphasised
    #[serde(default, deserialize_with = "lenient_opt_bool", skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
}

impl FromText for PricingPlan {
    fn from_text(text: String) -> Self {
        Self {
            name: text,
            ..Default::default()
        }
    }
}

/// Contact details for a contact section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Postal address
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,

    /// Email address
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,

    /// Phone number
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,

    /// Opening hours
    #[serde(default, deserialize_with = "lenient_string")]
    pub hours: String,
}

/// One section of a generated website, keyed by its `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SectionRecord", into = "SectionRecord")]
pub enum WebsiteSection {
    /// `hero`
    Hero(SectionFields),

    /// `features`
    Features {
        /// Common fields
        fields: SectionFields,
        /// Feature cards
        items: Option<Vec<SectionItem>>,
    },

    /// `about`
    About(SectionFields),

    /// `testimonials`
    Testimonials {
        /// Common fields
        fields: SectionFields,
        /// Customer quotes
        testimonials: Option<Vec<Testimonial>>,
    },

    /// `pricing`
    Pricing {
        /// Common fields
        fields: SectionFields,
        /// Pricing tiers
        plans: Option<Vec<PricingPlan>>,
    },

    /// `team`
    Team(SectionFields),

    /// `gallery`
    Gallery {
        /// Common fields
        fields: SectionFields,
        /// Gallery cards
        items: Option<Vec<SectionItem>>,
    },

    /// `contact`
    Contact {
        /// Common fields
        fields: SectionFields,
        /// Contact details
        info: Option<ContactInfo>,
    },

    /// `faq`
    Faq(SectionFields),

    /// `cta-banner`
    CtaBanner(SectionFields),

    /// Any other `type`, kept verbatim (e.g. the recovery `placeholder`)
    Other {
        /// The original `type` string
        kind: String,
        /// Common fields
        fields: SectionFields,
    },
}

impl WebsiteSection {
    /// The `type` discriminator as it appears on the wire
    pub fn kind(&self) -> &str {
        match self {
            WebsiteSection::Hero(_) => "hero",
            WebsiteSection::Features { .. } => "features",
            WebsiteSection::About(_) => "about",
            WebsiteSection::Testimonials { .. } => "testimonials",
            WebsiteSection::Pricing { .. } => "pricing",
            WebsiteSection::Team(_) => "team",
            WebsiteSection::Gallery { .. } => "gallery",
            WebsiteSection::Contact { .. } => "contact",
            WebsiteSection::Faq(_) => "faq",
            WebsiteSection::CtaBanner(_) => "cta-banner",
            WebsiteSection::Other { kind, .. } => kind.as_str(),
        }
    }

    /// Fields common to every section type
    pub fn fields(&self) -> &SectionFields {
        match self {
            WebsiteSection::Hero(fields)
            | WebsiteSection::About(fields)
            | WebsiteSection::Team(fields)
            | WebsiteSection::Faq(fields)
            | WebsiteSection::CtaBanner(fields)
            | WebsiteSection::Features { fields, .. }
            | WebsiteSection::Testimonials { fields, .. }
            | WebsiteSection::Pricing { fields, .. }
            | WebsiteSection::Gallery { fields, .. }
            | WebsiteSection::Contact { fields, .. }
            | WebsiteSection::Other { fields, .. } => fields,
        }
    }

    /// Section heading
    pub fn heading(&self) -> &str {
        &self.fields().heading
    }
}

/// Flat wire shape of a section
#[derive(Clone, Serialize, Deserialize)]
struct SectionRecord {
    #[serde(rename = "type")]
    kind: String,

    #[serde(flatten)]
    fields: SectionFields,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    items: Option<Vec<SectionItem>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    testimonials: Option<Vec<Testimonial>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    plans: Option<Vec<PricingPlan>>,

    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    info: Option<ContactInfo>,
}

impl From<SectionRecord> for WebsiteSection {
    fn from(record: SectionRecord) -> Self {
        let SectionRecord {
            kind,
            fields,
            items,
            testimonials,
            plans,
            info,
        } = record;

        match kind.as_str() {
            "hero" => WebsiteSection::Hero(fields),
            "features" => WebsiteSection::Features { fields, items },
            "about" => WebsiteSection::About(fields),
            "testimonials" => WebsiteSection::Testimonials { fields, testimonials },
            "pricing" => WebsiteSection::Pricing { fields, plans },
            "team" => WebsiteSection::Team(fields),
            "gallery" => WebsiteSection::Gallery { fields, items },
            "contact" => WebsiteSection::Contact { fields, info },
            "faq" => WebsiteSection::Faq(fields),
            "cta-banner" => WebsiteSection::CtaBanner(fields),
            _ => WebsiteSection::Other { kind, fields },
        }
    }
}

impl From<WebsiteSection> for SectionRecord {
    fn from(section: WebsiteSection) -> Self {
        let kind = section.kind().to_string();
        let mut record = SectionRecord {
            kind,
            fields: SectionFields::default(),
            items: None,
            testimonials: None,
            plans: None,
            info: None,
        };

        match section {
            WebsiteSection::Hero(fields)
            | WebsiteSection::About(fields)
            | WebsiteSection::Team(fields)
            | WebsiteSection::Faq(fields)
            | WebsiteSection::CtaBanner(fields)
            | WebsiteSection::Other { fields, .. } => record.fields = fields,
            WebsiteSection::Features { fields, items } | WebsiteSection::Gallery { fields, items } => {
                record.fields = fields;
                record.items = items;
            }
            WebsiteSection::Testimonials { fields, testimonials } => {
                record.fields = fields;
                record.testimonials = testimonials;
            }
            WebsiteSection::Pricing { fields, plans } => {
                record.fields = fields;
                record.plans = plans;
            }
            WebsiteSection::Contact { fields, info } => {
                record.fields = fields;
                record.info = info;
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_type_maps_to_variant() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "hero",
            "layout": "centered",
            "heading": "Fresh roasts daily",
            "cta": "Visit us"
        }))
        .unwrap();

        assert!(matches!(section, WebsiteSection::Hero(_)));
        assert_eq!(section.kind(), "hero");
        assert_eq!(section.heading(), "Fresh roasts daily");
        assert_eq!(section.fields().cta.as_deref(), Some("Visit us"));
    }

    #[test]
    fn test_unknown_type_maps_to_other() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "placeholder",
            "heading": "Content not available"
        }))
        .unwrap();

        match &section {
            WebsiteSection::Other { kind, fields } => {
                assert_eq!(kind, "placeholder");
                assert_eq!(fields.heading, "Content not available");
            }
            other => panic!("Expected Other, got {:?}", other),
        }
    }

    #[test]
    fn test_features_keep_items() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "features",
            "heading": "What we offer",
            "items": [
                {"title": "Espresso", "description": "Single origin", "icon": "cup"},
                {"title": "Pastries", "description": "Baked daily"}
            ]
        }))
        .unwrap();

        match section {
            WebsiteSection::Features { items: Some(items), .. } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].icon.as_deref(), Some("cup"));
                assert!(items[1].icon.is_none());
            }
            other => panic!("Expected Features with items, got {:?}", other),
        }
    }

    #[test]
    fn test_irrelevant_payload_is_dropped() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "about",
            "heading": "Our story",
            "plans": [{"name": "Basic"}]
        }))
        .unwrap();

        let json = serde_json::to_value(&section).unwrap();
        assert!(json.get("plans").is_none());
    }

    #[test]
    fn test_numeric_price_kept_as_text() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "pricing",
            "heading": "Plans",
            "plans": [{"name": "Pro", "price": 29, "period": "month", "features": ["All beans"], "cta": "Buy"}]
        }))
        .unwrap();

        match section {
            WebsiteSection::Pricing { plans: Some(plans), .. } => assert_eq!(plans[0].price, "29"),
            other => panic!("Expected Pricing with plans, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_type_and_flat_fields() {
        let section = WebsiteSection::CtaBanner(SectionFields {
            heading: "Order now".to_string(),
            cta: Some("Start".to_string()),
            ..Default::default()
        });

        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "cta-banner");
        assert_eq!(json["heading"], "Order now");
        assert_eq!(json["cta"], "Start");
        assert!(json.get("layout").is_none());
    }

    #[test]
    fn test_contact_info() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "contact",
            "heading": "Find us",
            "info": {"address": "1 Bean St", "email": "hi@cafe.test", "phone": 5551234, "hours": "7-19"}
        }))
        .unwrap();

        match section {
            WebsiteSection::Contact { info: Some(info), .. } => {
                assert_eq!(info.address, "1 Bean St");
                assert_eq!(info.phone, "5551234");
            }
            other => panic!("Expected Contact with info, got {:?}", other),
        }
    }

    #[test]
    fn test_cta_object_keeps_label() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "hero",
            "heading": "Coffee worth the walk",
            "cta": {"text": "Go", "link": "#"},
            "content": 42
        }))
        .unwrap();

        assert_eq!(section.fields().cta.as_deref(), Some("Go"));
        assert_eq!(section.fields().content.as_deref(), Some("42"));
    }

    #[test]
    fn test_gallery_string_entries_become_images() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "gallery",
            "heading": "Inside the shop",
            "items": ["a.png", "b.png", null]
        }))
        .unwrap();

        match section {
            WebsiteSection::Gallery { items: Some(items), .. } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].image.as_deref(), Some("a.png"));
                assert_eq!(items[1].title, "b.png");
            }
            other => panic!("Expected Gallery with items, got {:?}", other),
        }
    }

    #[test]
    fn test_mistyped_payloads_are_coerced_or_dropped() {
        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "pricing",
            "heading": "Plans",
            "plans": [
                "Starter",
                {"name": "Pro", "features": "Unlimited refills", "highlighted": "true"}
            ]
        }))
        .unwrap();

        match section {
            WebsiteSection::Pricing { plans: Some(plans), .. } => {
                assert_eq!(plans[0].name, "Starter");
                assert_eq!(plans[1].features, vec!["Unlimited refills".to_string()]);
                assert_eq!(plans[1].highlighted, Some(true));
            }
            other => panic!("Expected Pricing with plans, got {:?}", other),
        }

        let section: WebsiteSection = serde_json::from_value(json!({
            "type": "contact",
            "heading": "Find us",
            "info": "Call us any time",
            "testimonials": {"quote": "Great"}
        }))
        .unwrap();
        assert!(matches!(section, WebsiteSection::Contact { info: None, .. }));
    }
}
