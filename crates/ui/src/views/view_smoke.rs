use mentor_core::model::{LessonId, MasteryState};
use storage::Storage;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Progress: 0%"), "missing progress label in {html}");
    assert!(html.contains("width: 0%"), "missing bar width in {html}");
    assert!(html.contains("In progress"), "missing lesson status in {html}");
    assert!(html.contains("Final exam not passed"), "missing final status in {html}");
    assert!(html.contains("Vectors"), "missing lesson card in {html}");
    assert!(!html.contains("quiz-modal"), "quiz should start closed: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_stored_progress() {
    let storage = Storage::in_memory();
    let mut mastery = MasteryState::default();
    mastery.mark_lesson_passed(LessonId::Kinematics1d);
    storage.mastery.save_mastery(&mastery).await.unwrap();

    let mut harness = setup_view_harness_with_storage(ViewKind::Home, storage).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Progress: 30%"), "missing progress label in {html}");
    assert!(html.contains("width: 30%"), "missing bar width in {html}");
    assert!(html.contains("Passed"), "missing passed status in {html}");
    assert_eq!(harness.context.progress().current().percent, 30);
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_renders_every_card() {
    let mut harness = setup_view_harness(ViewKind::Practice).await;
    harness.rebuild();
    let html = harness.render();

    for problem in mentor_core::practice::practice_problems() {
        let id = format!("practice-{}", problem.id);
        assert!(html.contains(&id), "missing {id} in {html}");
    }
    assert_eq!(html.matches("Check").count(), 4, "unexpected buttons in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chrome_smoke_renders_nav_and_footer() {
    let mut harness = setup_view_harness(ViewKind::Chrome).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Sign in"), "missing nav label in {html}");
    assert!(html.contains("Physics Mentor © 2023"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn account_modal_smoke_reports_disabled_accounts() {
    let mut harness = setup_view_harness(ViewKind::Account).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("auth-form"), "missing form in {html}");
    assert!(
        html.contains("Accounts are not available right now."),
        "missing disabled note in {html}"
    );
}
