/// Aggregated view of survey progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyProgress {
    /// 0 on the welcome screen, otherwise the 1-based question position.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub is_complete: bool,
}
