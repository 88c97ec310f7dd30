//! Question flow: condition checks, conditional skips and per-session views.
//!
//! Nothing here mutates the script. A `QuestionView` is built fresh for
//! every request from the static spec and the session's answers, so two
//! sessions with different drink choices never see each other's options.

use crate::error::{QuestionnaireError, Result};
use crate::script::{self, QuestionSpec, SCRIPT};
use crate::session::Session;
use catalog::DrinkCategory;
use serde::Serialize;
use tracing::debug;

/// A question as presented to one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    #[serde(skip)]
    pub index: usize,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "answers")]
    pub answer_options: Vec<String>,
    #[serde(rename = "requiredSelections")]
    pub required_selections: u32,
    #[serde(rename = "multiple")]
    pub allow_multiple: bool,
    #[serde(rename = "last")]
    pub is_terminal: bool,
}

/// Build the view of `spec` for a session that has given `answers`.
///
/// Flavor and strength options follow the chosen drink; the occasion
/// prompt names it. An unknown or missing drink leaves the static fields.
pub fn resolve_question_view(spec: &QuestionSpec, answers: &[String]) -> QuestionView {
    let category = answers
        .get(script::DRINK_TYPE)
        .and_then(|answer| DrinkCategory::parse(answer));

    let mut prompt = spec.prompt.to_string();
    let mut options: &[&str] = spec.answer_options;

    if let Some(category) = category {
        match spec.index {
            script::FLAVOR => options = script::flavor_options(category),
            script::STRENGTH => options = script::strength_options(category),
            script::OCCASION => prompt = script::occasion_prompt(category),
            _ => {}
        }
    }

    QuestionView {
        index: spec.index,
        prompt,
        answer_options: options.iter().map(|option| option.to_string()).collect(),
        required_selections: spec.required_selections,
        allow_multiple: spec.allow_multiple,
        is_terminal: spec.is_terminal,
    }
}

/// Whether `spec` should be asked given the answers so far.
///
/// A conditional spec whose referenced answer is missing is not satisfied.
pub fn condition_satisfied(spec: &QuestionSpec, answers: &[String]) -> bool {
    match spec.depends_on {
        None => true,
        Some(depends_on) => answers
            .get(depends_on.question_index)
            .is_some_and(|answer| depends_on.accepts(answer)),
    }
}

/// Walks the script on behalf of sessions.
#[derive(Debug, Clone, Copy)]
pub struct QuestionFlow {
    script: &'static [QuestionSpec],
}

impl QuestionFlow {
    pub fn new(script: &'static [QuestionSpec]) -> Self {
        Self { script }
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    pub fn spec(&self, index: usize) -> Option<&'static QuestionSpec> {
        self.script.get(index)
    }

    /// Find the next question to ask, skipping any whose condition fails.
    ///
    /// Returns the view with `index` set to the question actually chosen.
    /// `SessionStore::next_question` persists that index under the session lock.
    /// The walk visits each remaining spec at most once.
    pub fn next_question(&self, session: &Session) -> Result<QuestionView> {
        let mut index = session.question_index;

        while let Some(spec) = self.script.get(index) {
            if condition_satisfied(spec, &session.answers) {
                return Ok(resolve_question_view(spec, &session.answers));
            }
            debug!(
                session = %session.id,
                question = index,
                "Condition not met, skipping question"
            );
            index += 1;
        }

        Err(QuestionnaireError::NoMoreQuestions)
    }
}

impl Default for QuestionFlow {
    fn default() -> Self {
        Self::new(&SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(index: usize, answers: &[&str]) -> Session {
        let mut session = Session::new("test-session".to_string());
        session.question_index = index;
        session.answers = answers.iter().map(|s| s.to_string()).collect();
        session
    }

    #[test]
    fn test_first_question_is_static() {
        let view = QuestionFlow::default()
            .next_question(&session_with(0, &[]))
            .unwrap();

        assert_eq!(view.index, 0);
        assert_eq!(view.prompt, "What type of drink do you prefer?");
        assert_eq!(view.answer_options, vec!["Beer", "White Wine", "Red Wine"]);
        assert!(!view.is_terminal);
    }

    #[test]
    fn test_flavor_options_follow_drink_choice() {
        let flow = QuestionFlow::default();
        let beer = flow.next_question(&session_with(1, &["Beer"])).unwrap();
        let red = flow.next_question(&session_with(1, &["Red Wine"])).unwrap();

        assert_eq!(beer.answer_options[5], "Wheat beer");
        assert_eq!(red.answer_options[5], "Earthy");
        assert_eq!(beer.required_selections, 3);
        assert!(beer.allow_multiple);
    }

    #[test]
    fn test_strength_options_for_wine_have_no_non_alcoholic() {
        let view = QuestionFlow::default()
            .next_question(&session_with(2, &["White Wine", "Fruity, Floral, Mineral"]))
            .unwrap();

        assert_eq!(view.answer_options, vec!["Low", "Medium", "High"]);
    }

    #[test]
    fn test_occasion_prompt_names_the_drink() {
        let view = QuestionFlow::default()
            .next_question(&session_with(3, &["red wine", "Fruity", "High"]))
            .unwrap();

        assert_eq!(view.prompt, "Where do you prefer to drink your red wine?");
        assert!(view.is_terminal);
    }

    #[test]
    fn test_resolving_views_leaves_the_script_untouched() {
        let before = SCRIPT;
        let _ = resolve_question_view(&SCRIPT[1], &["Beer".to_string()]);
        let _ = resolve_question_view(&SCRIPT[3], &["Red Wine".to_string()]);

        assert_eq!(before, SCRIPT);
        assert!(SCRIPT[1].answer_options.is_empty());
        assert_eq!(SCRIPT[3].prompt, "Where do you prefer to drink your beer or wine?");
    }

    #[test]
    fn test_unknown_drink_skips_to_the_occasion() {
        let flow = QuestionFlow::default();
        let session = session_with(1, &["Cider"]);

        let view = flow.next_question(&session).unwrap();
        assert_eq!(view.index, 3);
        assert_eq!(view.prompt, "Where do you prefer to drink your beer or wine?");

        // Re-evaluating gives the same answer.
        assert_eq!(flow.next_question(&session).unwrap(), view);
    }

    #[test]
    fn test_missing_referenced_answer_fails_condition() {
        assert!(!condition_satisfied(&SCRIPT[1], &[]));
        assert!(condition_satisfied(&SCRIPT[0], &[]));
        assert!(condition_satisfied(&SCRIPT[3], &[]));
    }

    #[test]
    fn test_past_the_end_has_no_more_questions() {
        let flow = QuestionFlow::default();
        let session = session_with(4, &["Beer", "Light", "High", "BBQ"]);

        assert_eq!(
            flow.next_question(&session),
            Err(QuestionnaireError::NoMoreQuestions)
        );
    }

    #[test]
    fn test_view_serializes_with_api_field_names() {
        let view = resolve_question_view(&SCRIPT[1], &["Beer".to_string()]);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["question"], "What kind of flavor are you in the mood for tonight?");
        assert_eq!(json["requiredSelections"], 3);
        assert_eq!(json["multiple"], true);
        assert_eq!(json["last"], false);
        assert_eq!(json["answers"].as_array().unwrap().len(), 6);
        assert!(json.get("index").is_none());
    }
}
