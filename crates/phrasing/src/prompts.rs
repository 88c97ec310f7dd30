//! Prompt builders for the bartender's replies.

use crate::PhrasingRequest;
use catalog::{CatalogItem, DrinkCategory};

pub const FINAL_PERSONA: &str =
    "You are a professional friendly and fun bartender who loves recommending drinks.";
pub const INTERMEDIATE_PERSONA: &str = "You are a friendly bartender.";

pub const FINAL_TEMPERATURE: f32 = 0.7;
pub const FINAL_MAX_TOKENS: u32 = 300;
pub const INTERMEDIATE_TEMPERATURE: f32 = 0.7;
pub const INTERMEDIATE_MAX_TOKENS: u32 = 100;

/// Shown when the phrasing service is slow or failing.
pub const FALLBACK_RESPONSE: &str = "Got it! Let's keep going.";

/// Recommendation pitch for `item`, tuned to the guest's occasion.
pub fn recommendation_prompt(item: &CatalogItem, occasion: &str) -> String {
    let name = &item.name;
    let flavor = if item.flavor_profile.trim().is_empty() {
        "flavorful"
    } else {
        item.flavor_profile.as_str()
    };

    match occasion.trim().to_lowercase().as_str() {
        "hogwarts" => format!(
            "As a magical bartender, recommend {name} for someone at Hogwarts. \
             Talk about how its {flavor} flavors make it feel magical, \
             and suggest pairing it with something fun from Hogwarts cuisine. \
             Add a bit of whimsy and fun! Limit to three rows"
        ),
        "bbq" => format!(
            "Recommend {name} for a BBQ lover. \
             Talk about how its {flavor} profile complements smoky BBQ flavors, \
             and suggest pairing it with grilled meats or veggies. \
             Make it warm and friendly, perfect for an outdoor event. Limit to three rows"
        ),
        "gathering" => format!(
            "Recommend {name} for a social gathering. \
             Describe how its {flavor} flavors make it perfect for sharing with friends, \
             and suggest pairing it with finger foods or light appetizers. \
             Make it sound like the drink that brings people together. Limit to three rows"
        ),
        "celebration" => format!(
            "Suggest {name} for a celebratory occasion. \
             Talk about how its {flavor} profile makes it perfect for toasting \
             to special moments, and mention pairing it with desserts or rich foods. \
             Make it sound festive and exciting! Limit to three rows"
        ),
        "night in" => format!(
            "Recommend {name} for a cozy night in. \
             Talk about how its {flavor} flavors create a relaxing atmosphere, \
             and suggest pairing it with comfort food or a good movie. \
             Make it sound like the ultimate comfort drink. Limit to three rows"
        ),
        "by the sea" => format!(
            "Recommend {name} for enjoying by the sea. \
             Describe how its {flavor} flavors complement the salty sea air, \
             and suggest pairing it with seafood or a beach picnic. \
             Make it sound refreshing and relaxing. Limit to three rows"
        ),
        _ => format!(
            "Recommend {name} for an occasion like {occasion}. \
             Talk about its {flavor} profile and suggest a great pairing. \
             Keep it friendly and engaging! Limit to three rows"
        ),
    }
}

pub fn recommendation_request(item: &CatalogItem, occasion: &str) -> PhrasingRequest {
    PhrasingRequest {
        persona: FINAL_PERSONA.to_string(),
        prompt: recommendation_prompt(item, occasion),
        temperature: FINAL_TEMPERATURE,
        max_tokens: FINAL_MAX_TOKENS,
    }
}

/// Banter for a non-final answer.
///
/// `question_index` is the question just answered. Returns `None` when
/// there is nothing to say, e.g. a strength answer for an unknown drink.
pub fn intermediate_prompt(question_index: usize, drink: &str, answer: &str) -> Option<String> {
    match question_index {
        0 => Some(format!(
            "Be a cheeky sarcastic intelligent bartender and respond to the user's {answer} \
             drink preference. Make it fun and intelligent! Don't provide a recommendation yet. \
             no more than two lines of response"
        )),
        1 => Some(format!(
            "The user prefers flavor profile {answer}. Give a sarcastic and naughty response. \
             but don't provide a recommendation yet. no more than two lines of response"
        )),
        2 => match DrinkCategory::parse(drink)? {
            DrinkCategory::Beer => Some(format!(
                "The user prefers a beer with {answer} alcohol content. Give a sarcastic response \
                 but don't provide a recommendation yet. Don't ask any further questions. \
                 no more than two lines of response"
            )),
            DrinkCategory::RedWine | DrinkCategory::WhiteWine => Some(format!(
                "The user selected wine, and they prefer {answer} wine. Be charming and fun \
                 but don't recommend a specific drink yet. Don't ask any further questions. \
                 no more than two lines of response"
            )),
        },
        _ => None,
    }
}

pub fn intermediate_request(
    question_index: usize,
    drink: &str,
    answer: &str,
) -> Option<PhrasingRequest> {
    intermediate_prompt(question_index, drink, answer).map(|prompt| PhrasingRequest {
        persona: INTERMEDIATE_PERSONA.to_string(),
        prompt,
        temperature: INTERMEDIATE_TEMPERATURE,
        max_tokens: INTERMEDIATE_MAX_TOKENS,
    })
}
