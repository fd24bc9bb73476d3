use super::Todo;

/// Aggregate numbers shown above the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub translated: usize,
    /// Share of completed todos, rounded to the nearest whole percent.
    pub completion_percent: u8,
}

impl Stats {
    pub fn of(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|todo| todo.is_completed()).count();
        let translated = todos.iter().filter(|todo| todo.is_translated()).count();

        let completion_percent = match total {
            0 => 0,
            // round half up, in integers
            _ => ((completed * 200 + total) / (2 * total)) as u8,
        };

        Self {
            total,
            completed,
            active: total - completed,
            translated,
            completion_percent,
        }
    }
}
