use serde_json::{Value, json};

use questionnaire::{
    Answer, Operator, Prompter, Questionnaire, QuestionnaireError, QuestionnaireSpec, ScriptStep,
    ScriptedPicker,
};

fn activities() -> Questionnaire {
    QuestionnaireSpec::from_json(include_str!("fixtures/activities.json"))
        .expect("deserialize")
        .build()
        .expect("build")
}

fn run(questionnaire: &mut Questionnaire, script: &[&str]) -> (Value, ScriptedPicker) {
    let mut picker = ScriptedPicker::new(script.iter().copied());
    let answers = questionnaire.run(&mut picker).expect("run");
    assert_eq!(picker.remaining(), 0, "script not fully consumed");
    (serde_json::to_value(&answers).expect("json"), picker)
}

fn first_option(questionnaire: &Questionnaire, key: &str) -> String {
    questionnaire
        .which_question(key)
        .expect("resolve")
        .expect("variant")
        .options()[0]
        .clone()
}

#[test]
fn saturday_morning_round_trip() {
    let mut q = activities();
    let (answers, _) = run(
        &mut q,
        &["saturday", "morning", "watch footy match", "done..."],
    );
    assert_eq!(
        answers,
        json!({
            "day": "saturday",
            "time": "morning",
            "activities": ["watch footy match"],
        })
    );
}

#[test]
fn first_matching_variant_wins() {
    let mut q = activities();
    run(&mut q, &["saturday", "morning", "done..."]);
    assert_eq!(first_option(&q, "activities"), "eat barbacoa");

    run(&mut q, &["monday", "morning", "done..."]);
    assert_eq!(first_option(&q, "activities"), "eat granola");

    run(&mut q, &["saturday", "night", "done..."]);
    assert_eq!(first_option(&q, "activities"), "eat tacos de pastor");
}

#[test]
fn unconditioned_and_unknown_keys() {
    let q = activities();
    assert_eq!(first_option(&q, "day"), "monday");
    assert!(q.which_question("weather").expect("resolve").is_none());
}

#[test]
fn keys_without_a_qualifying_variant_are_skipped() {
    let mut q = Questionnaire::new();
    q.add("pet", ["cat", "dog"], Prompter::Single).expect("pet");
    q.add("walks", ["one", "two"], Prompter::Single)
        .expect("walks")
        .add_condition(["pet"], ["dog"], None)
        .expect("condition");

    let (answers, _) = run(&mut q, &["cat"]);
    assert_eq!(answers, json!({ "pet": "cat" }));
    assert!(q.which_question("walks").expect("resolve").is_none());
}

#[test]
fn back_after_answering_reasks_that_key() {
    let mut q = activities();
    let (answers, picker) = run(
        &mut q,
        &["monday", "<back>", "friday", "night", "done..."],
    );
    assert_eq!(
        answers,
        json!({ "day": "friday", "time": "night", "activities": [] })
    );
    assert_eq!(picker.transcript()[2], "\nday: ");
}

#[test]
fn back_on_first_question_stays_put() {
    let mut q = activities();
    let (answers, _) = run(&mut q, &["<back>", "monday", "night", "all"]);
    assert_eq!(
        answers,
        json!({ "day": "monday", "time": "night", "activities": ["all"] })
    );
}

#[test]
fn multi_select_back_without_picks_rewinds_previous_key() {
    let mut q = activities();
    let (answers, picker) = run(
        &mut q,
        &[
            "monday",
            "morning",
            "<back>",
            "night",
            "eat tacos de pastor",
            "done...",
        ],
    );
    assert_eq!(
        answers,
        json!({
            "day": "monday",
            "time": "night",
            "activities": ["eat tacos de pastor"],
        })
    );
    assert!(picker.transcript()[3].ends_with("\ntime: "));
}

#[test]
fn multi_select_back_with_picks_restarts_same_key() {
    let mut q = activities();
    let (answers, picker) = run(
        &mut q,
        &[
            "saturday",
            "morning",
            "eat barbacoa",
            "<back>",
            "walk the dog",
            "done...",
        ],
    );
    assert_eq!(
        answers,
        json!({
            "day": "saturday",
            "time": "morning",
            "activities": ["walk the dog"],
        })
    );
    assert!(picker.transcript()[3].ends_with("activities: ['eat barbacoa']"));
    assert!(picker.transcript()[4].ends_with("activities: []"));
}

#[test]
fn show_choices_right_aligns_keys() {
    let mut q = activities();
    run(&mut q, &["saturday", "morning", "watch footy match", "done..."]);
    let expected = format!(
        "{:>15} : saturday\n{:>15} : morning\n{:>15} : ['watch footy match']\n",
        "day", "time", "activities"
    );
    assert_eq!(q.show_choices(), expected);
}

#[test]
fn prompt_includes_previous_choices() {
    let mut q = activities();
    let (_, picker) = run(&mut q, &["friday", "night", "done..."]);
    assert_eq!(picker.transcript()[1], format!("{:>15} : friday\n\ntime: ", "day"));
}

#[test]
fn completed_pass_is_idempotent() {
    let mut q = activities();
    run(&mut q, &["friday", "morning", "go to work", "done..."]);
    let before = q.choices().clone();

    let mut picker = ScriptedPicker::new(Vec::<ScriptStep>::new());
    assert!(q.ask_questions(&mut picker).expect("pass"));
    assert_eq!(q.choices(), &before);
    assert!(picker.transcript().is_empty());
}

#[test]
fn run_resets_previous_answers() {
    let mut q = activities();
    run(&mut q, &["friday", "morning", "go to work", "done..."]);
    let (answers, _) = run(&mut q, &["monday", "night", "all"]);
    assert_eq!(answers["day"], "monday");
    assert_eq!(q.choices().len(), 3);
}

#[test]
fn go_back_drops_latest_answers() {
    let mut q = activities();
    run(&mut q, &["friday", "morning", "go to work", "done..."]);
    q.go_back(2);
    assert_eq!(q.choices().keys().collect::<Vec<_>>(), vec!["day"]);
    assert_eq!(q.choices().get("day"), Some(&Answer::from("friday")));
}

#[test]
fn custom_operator_gates_follow_up() {
    fn at_least(value: &Answer, answer: &Answer) -> bool {
        let number = |answer: &Answer| answer.as_str().and_then(|text| text.parse::<u32>().ok());
        matches!((number(value), number(answer)), (Some(min), Some(actual)) if actual >= min)
    }

    let mut q = Questionnaire::new();
    q.add("guests", ["1", "2", "3"], Prompter::Single).expect("guests");
    q.add("table", ["inside", "outside"], Prompter::Single)
        .expect("table")
        .add_condition(["guests"], ["2"], Some(vec![Operator::custom(at_least)]))
        .expect("condition");

    let (answers, _) = run(&mut q, &["3", "outside"]);
    assert_eq!(answers, json!({ "guests": "3", "table": "outside" }));

    let (answers, _) = run(&mut q, &["1"]);
    assert_eq!(answers, json!({ "guests": "1" }));
}

#[test]
fn condition_on_later_key_is_missing_answer() {
    let mut q = Questionnaire::new();
    q.add("dessert", ["cake"], Prompter::Single)
        .expect("dessert")
        .add_condition(["meal"], ["dinner"], None)
        .expect("condition");
    q.add("meal", ["lunch", "dinner"], Prompter::Single)
        .expect("meal");

    let mut picker = ScriptedPicker::new(["dinner"]);
    let err = q.run(&mut picker).unwrap_err();
    assert!(matches!(err, QuestionnaireError::MissingAnswer { key } if key == "meal"));
}
