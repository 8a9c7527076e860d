use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Read-only lookup of background facts about a plant condition.
pub trait KnowledgeBase: Send + Sync {
    /// Exact, case-sensitive lookup. Unknown names resolve to a generic entry.
    fn get(&self, name: &str) -> &str;
}

pub const GENERIC_ADVICE: &str = "This appears to be a plant health issue. Generally, treatment approaches include cultural practices (like proper watering and spacing), physical removal of affected parts, organic treatments (like neem oil or compost tea), and chemical controls as a last resort.";

static CONDITIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "Powdery Mildew",
            "A fungal disease that appears as white powdery spots on leaves. It thrives in humid conditions with poor air circulation. Treatment includes fungicides, neem oil, and improving air circulation.",
        ),
        (
            "Leaf Spot",
            "Caused by various fungi and bacteria, appearing as dark spots on leaves. It spreads in wet conditions. Treatment includes removing affected leaves, avoiding overhead watering, and fungicide application.",
        ),
        (
            "Blight",
            "A rapid and complete chlorosis, browning, then death of plant tissues such as leaves, branches, twigs, or floral organs. Caused by fungi or bacteria. Treatment depends on the specific type of blight.",
        ),
        (
            "Rust",
            "A fungal disease causing orange, yellow, or brown pustules on the undersides of leaves. Treatment includes fungicides, removing affected plants, and improving air circulation.",
        ),
        (
            "Bacterial Wilt",
            "A bacterial disease causing rapid wilting. Plants may not show symptoms until the disease is advanced. Treatment is difficult; prevention through resistant varieties and clean tools is best.",
        ),
        (
            "Viral Infection",
            "Causes mottling, distortion of leaves, and stunted growth. Most plant viruses are transmitted by insects. No chemical cure; affected plants should be removed to prevent spread.",
        ),
        (
            "Root Rot",
            "Caused by overwatering and fungi in the soil, leading to decaying roots. Treatment includes improved drainage, reduced watering, and fungicides in severe cases.",
        ),
        (
            "Nutrient Deficiency",
            "Not a disease but causes similar symptoms. Different deficiencies have specific symptoms. Treatment involves applying the appropriate fertilizer or adjusting soil pH.",
        ),
        (
            "Aphid Infestation",
            "Tiny insects that suck plant sap, causing yellowing and curling of leaves. They also spread viral diseases. Treatment includes insecticidal soap, neem oil, or introducing beneficial insects.",
        ),
        (
            "Spider Mite Damage",
            "Tiny pests that cause stippling on leaves and fine webbing. They thrive in hot, dry conditions. Treatment includes increasing humidity, insecticidal soap, and miticides.",
        ),
    ])
});

/// The built-in condition table.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticKnowledgeBase;

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self
    }
}

impl KnowledgeBase for StaticKnowledgeBase {
    fn get(&self, name: &str) -> &str {
        CONDITIONS.get(name).copied().unwrap_or(GENERIC_ADVICE)
    }
}
