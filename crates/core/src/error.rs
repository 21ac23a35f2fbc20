use thiserror::Error;

use crate::model::{ProfileError, UnknownIdError};
use crate::quiz::QuizError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    UnknownId(#[from] UnknownIdError),
}
