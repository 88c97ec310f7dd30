//! The fixed question script.
//!
//! The script is immutable, process-wide data. Anything that depends on an
//! earlier answer (flavor options, strength options, the occasion prompt)
//! is computed per request by `flow::resolve_question_view`; the specs
//! below only carry the static defaults.

use catalog::DrinkCategory;

/// Condition on an earlier answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependsOn {
    pub question_index: usize,
    /// Compared case-insensitively against the earlier answer.
    pub accepted_answers: &'static [&'static str],
}

impl DependsOn {
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.trim();
        self.accepted_answers
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(answer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSpec {
    pub index: usize,
    pub prompt: &'static str,
    /// Static options; empty when they are filled in from earlier answers.
    pub answer_options: &'static [&'static str],
    pub allow_multiple: bool,
    pub required_selections: u32,
    pub depends_on: Option<DependsOn>,
    pub is_terminal: bool,
}

impl QuestionSpec {
    pub fn is_conditional(&self) -> bool {
        self.depends_on.is_some()
    }
}

const ALL_DRINKS: DependsOn = DependsOn {
    question_index: 0,
    accepted_answers: &["Beer", "White wine", "Red wine"],
};

pub const DRINK_TYPE: usize = 0;
pub const FLAVOR: usize = 1;
pub const STRENGTH: usize = 2;
pub const OCCASION: usize = 3;

/// The bartender's four questions, ordered by `index`.
pub static SCRIPT: [QuestionSpec; 4] = [
    QuestionSpec {
        index: DRINK_TYPE,
        prompt: "What type of drink do you prefer?",
        answer_options: &["Beer", "White Wine", "Red Wine"],
        allow_multiple: false,
        required_selections: 1,
        depends_on: None,
        is_terminal: false,
    },
    QuestionSpec {
        index: FLAVOR,
        prompt: "What kind of flavor are you in the mood for tonight?",
        answer_options: &[],
        allow_multiple: true,
        required_selections: 3,
        depends_on: Some(ALL_DRINKS),
        is_terminal: false,
    },
    QuestionSpec {
        index: STRENGTH,
        prompt: "How strong do you want your drink to be?",
        answer_options: &[],
        allow_multiple: false,
        required_selections: 1,
        depends_on: Some(ALL_DRINKS),
        is_terminal: false,
    },
    QuestionSpec {
        index: OCCASION,
        prompt: "Where do you prefer to drink your beer or wine?",
        answer_options: &["Gathering", "BBQ", "Night in", "Celebration", "By the sea", "Hogwarts"],
        allow_multiple: false,
        required_selections: 1,
        depends_on: None,
        is_terminal: true,
    },
];

pub fn flavor_options(category: DrinkCategory) -> &'static [&'static str] {
    match category {
        DrinkCategory::Beer => &["Light", "Fruity", "Malty", "Dark", "Sour", "Wheat beer"],
        DrinkCategory::RedWine => &["Fruity", "Spicy", "Oaked", "Tannic", "Acidic", "Earthy"],
        DrinkCategory::WhiteWine => &["Fruity", "Floral", "Mineral", "Spicy", "Acidic", "Buttery"],
    }
}

pub fn strength_options(category: DrinkCategory) -> &'static [&'static str] {
    match category {
        DrinkCategory::Beer => &["Low", "Medium", "High", "Non-alcoholic"],
        DrinkCategory::RedWine | DrinkCategory::WhiteWine => &["Low", "Medium", "High"],
    }
}

pub fn occasion_prompt(category: DrinkCategory) -> String {
    format!("Where do you prefer to drink your {}?", category.as_str())
}
