use mentor_core::model::{LessonId, ProgressSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonStatusVm {
    pub id: LessonId,
    pub title: &'static str,
    pub status_label: &'static str,
    pub passed: bool,
}

/// Progress dashboard contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub label: String,
    pub bar_width: String,
    pub lessons: Vec<LessonStatusVm>,
    pub final_status: &'static str,
    pub final_passed: bool,
}

#[must_use]
pub fn map_progress(snapshot: &ProgressSnapshot) -> ProgressVm {
    let lessons = snapshot
        .lessons
        .iter()
        .map(|&(id, passed)| LessonStatusVm {
            id,
            title: id.title(),
            status_label: if passed { "Passed" } else { "In progress" },
            passed,
        })
        .collect();

    ProgressVm {
        label: format!("Progress: {}%", snapshot.percent),
        bar_width: format!("{}%", snapshot.percent),
        lessons,
        final_status: if snapshot.final_exam_passed {
            "Final exam passed"
        } else {
            "Final exam not passed"
        },
        final_passed: snapshot.final_exam_passed,
    }
}
