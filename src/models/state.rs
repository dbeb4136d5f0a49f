/// Screen the quiz is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Start screen, before the first question.
    Welcome,
    /// Waiting for the user to pick an option.
    Question,
    /// Option picked; showing whether it was right and the justification.
    Feedback,
    /// All questions answered; showing the score.
    Result,
    /// Walking back through every question with the choices made.
    Review,
}
