//! Steps for `integration_editor` behavioural tests.
use cucumber::{given, then, when};
use integration_steps::StepError;

use crate::world::EditorWorld;

#[given("the integration editor is rendered")]
fn editor_rendered(world: &mut EditorWorld) { world.render_editor(); }

#[given(expr = "the integration editor is rendered after {int} milliseconds")]
fn editor_rendered_later(world: &mut EditorWorld, millis: u64) { world.render_editor_after(millis); }

#[given("an empty page")]
fn empty_page(_world: &mut EditorWorld) {}

#[given(expr = "the action {string} is listed")]
fn action_listed(world: &mut EditorWorld, title: String) { world.list_action(&title); }

#[given(expr = "the integration {string} is listed")]
fn integration_listed(world: &mut EditorWorld, name: String) { world.list_integration(&name); }

#[when(regex = r"^the step `(.+)` runs$")]
async fn step_runs(world: &mut EditorWorld, text: String) { world.run_step(&text).await; }

#[then("every step passed")]
fn all_passed(world: &mut EditorWorld) { world.assert_all_passed(); }

#[then(expr = "the step fails with {string}")]
fn fails_with(world: &mut EditorWorld, message: String) {
    assert_eq!(world.last_error().to_string(), message);
}

#[then("the step fails")]
fn fails(world: &mut EditorWorld) {
    let error = world.last_error();
    assert!(!error.is_discovery(), "step was not matched: {error}");
}

#[then("the step is undefined")]
fn undefined(world: &mut EditorWorld) {
    assert!(matches!(world.last_error(), StepError::Undefined(_)));
}

#[then(expr = "the integration name field holds {string}")]
fn name_holds(world: &mut EditorWorld, expected: String) {
    assert_eq!(world.name_value().as_deref(), Some(expected.as_str()));
}

#[then(expr = "the action {string} was clicked")]
fn action_clicked(world: &mut EditorWorld, title: String) {
    assert_eq!(world.action_clicks(), vec![world.action_index(&title)]);
}
