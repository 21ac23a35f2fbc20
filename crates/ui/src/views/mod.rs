mod account;
mod footer;
mod home;
mod nav;
mod practice;
mod progress;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use account::AccountModal;
pub use footer::Footer;
pub use home::HomeView;
pub use nav::NavButton;
pub use practice::PracticeView;
pub use progress::ProgressDashboard;
pub use quiz::QuizModal;
pub use state::{ViewError, ViewState, view_state_from_resource};
