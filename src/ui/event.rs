/// Events that can occur in the tracker dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Record a manual mark and open the boost window
    Mark,
    /// Quit the application
    Quit,
    /// No action
    None,
}
