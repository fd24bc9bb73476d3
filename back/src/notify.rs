use std::fmt;

/// Short-lived message for the user about something that just happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Added,
    Completed,
    Reopened,
    Deleted,
    ClearedCompleted { count: usize },
    Translated { language: String },
    TranslationFailed,
}

impl Notification {
    pub fn title(&self) -> &'static str {
        match self {
            Notification::Added => "Todo added!",
            Notification::Completed => "Task completed!",
            Notification::Reopened => "Task reopened!",
            Notification::Deleted => "Todo deleted",
            Notification::ClearedCompleted { .. } => "Completed tasks cleared!",
            Notification::Translated { .. } => "Translation complete!",
            Notification::TranslationFailed => "Translation failed",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notification::Added => String::from("Your new task has been created."),
            Notification::Completed => String::from("Great job! Keep it up!"),
            Notification::Reopened => String::from("Task marked as pending"),
            Notification::Deleted => String::from("Task has been removed from your list."),
            Notification::ClearedCompleted { count } => {
                let plural = if *count == 1 { "" } else { "s" };
                format!("Removed {count} completed task{plural}.")
            }
            Notification::Translated { language } => format!("Translated to {language}"),
            Notification::TranslationFailed => String::from("Please try again later"),
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, Notification::Deleted | Notification::TranslationFailed)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title(), self.description())
    }
}
