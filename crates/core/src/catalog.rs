//! Fixture catalogs — the clients, predefined segments, and default plan
//! content a fresh wizard session is seeded with.

use uuid::Uuid;

use crate::types::{AudienceSegment, Channel, CreativeVariant, JourneyPath, SegmentKind};

/// Clients available in the campaign-details selector.
pub const CLIENTS: [&str; 5] = [
    "Velari Threads",
    "EcoStyle",
    "NatureCo",
    "Sustainable Lifestyle",
    "Green Fashion",
];

pub fn is_known_client(name: &str) -> bool {
    CLIENTS.iter().any(|c| *c == name)
}

/// Predefined CORE ID audience segments offered by the segment picker.
pub fn predefined_segments() -> Vec<AudienceSegment> {
    [
        ("Past High-Value Customers", 25_000),
        ("Gen Z Sustainability Seekers", 50_000),
        ("Millennial Fashion Enthusiasts", 75_000),
        ("Eco-Conscious Shoppers", 60_000),
        ("First-Time Website Visitors", 30_000),
    ]
    .into_iter()
    .map(|(name, size)| AudienceSegment {
        id: Uuid::new_v4(),
        name: name.to_string(),
        size,
        kind: SegmentKind::Predefined,
    })
    .collect()
}

/// Segments a fresh session starts with.
pub fn default_segments() -> Vec<AudienceSegment> {
    vec![
        AudienceSegment {
            id: Uuid::new_v4(),
            name: "Past High-Value Customers".to_string(),
            size: 25_000,
            kind: SegmentKind::Predefined,
        },
        AudienceSegment {
            id: Uuid::new_v4(),
            name: "Gen Z Sustainability Seekers".to_string(),
            size: 50_000,
            kind: SegmentKind::Predefined,
        },
        AudienceSegment {
            id: Uuid::new_v4(),
            name: "Dormant Email Subscribers (Earth Day Engaged)".to_string(),
            size: 15_000,
            kind: SegmentKind::Custom,
        },
    ]
}

/// Creative variants a fresh session starts with.
pub fn default_variants() -> Vec<CreativeVariant> {
    vec![
        CreativeVariant {
            id: Uuid::new_v4(),
            name: "Wear the Change".to_string(),
            approach: "Bold, Emotional".to_string(),
            description: "Focuses on emotional connection to sustainability and personal impact."
                .to_string(),
        },
        CreativeVariant {
            id: Uuid::new_v4(),
            name: "Refined, Recycled, Ready".to_string(),
            approach: "Clean, Premium".to_string(),
            description:
                "Emphasizes premium quality and refined aesthetic of sustainable products."
                    .to_string(),
        },
    ]
}

/// Journey paths a fresh session starts with.
pub fn default_paths() -> Vec<JourneyPath> {
    vec![
        JourneyPath {
            id: Uuid::new_v4(),
            name: "Gen Z Journey".to_string(),
            target_audience: "Gen Z Sustainability Seekers".to_string(),
            channels: vec![
                Channel::InfluencerInstagram,
                Channel::SocialTiktok,
                Channel::Display,
            ],
        },
        JourneyPath {
            id: Uuid::new_v4(),
            name: "High-Value Journey".to_string(),
            target_audience: "Past High-Value Customers".to_string(),
            channels: vec![Channel::SocialProof, Channel::Email, Channel::Ctv],
        },
        JourneyPath {
            id: Uuid::new_v4(),
            name: "Reactivation Journey".to_string(),
            target_audience: "Dormant Email Subscribers".to_string(),
            channels: vec![Channel::Email],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_segments_catalog() {
        let segments = predefined_segments();
        assert_eq!(segments.len(), 5);
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Predefined));
        assert!(segments.iter().all(|s| s.size > 0));
    }

    #[test]
    fn test_default_plan_content() {
        assert_eq!(default_segments().len(), 3);
        assert_eq!(default_variants().len(), 2);
        let paths = default_paths();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| !p.channels.is_empty()));
    }

    #[test]
    fn test_known_client() {
        assert!(is_known_client("Velari Threads"));
        assert!(!is_known_client("Acme Corp"));
    }
}
