use lingo_api::v1::Todo;

const ID_WIDTH: usize = 8;

/// One todo as a row, plus a second line when it has been translated.
pub fn view(position: usize, todo: &Todo, translating: bool) -> String {
    let check = match todo.completed {
        true => 'x',
        false => ' ',
    };

    let busy = match translating {
        true => "  …",
        false => "",
    };

    let mut row = format!(
        "{position:>3}. [{check}] {}{busy}  ({})\n",
        todo.display_text(),
        short_id(todo)
    );

    if let Some(translation) = todo.translation.as_ref().filter(|_| todo.is_translated()) {
        row.push_str(&format!(
            "        {}  Original: {}\n",
            translation.target_language, translation.original_text
        ));
    }

    row
}

fn short_id(todo: &Todo) -> &str {
    let id = todo.id.as_str();

    match id.char_indices().nth(ID_WIDTH) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use lingo_api::v1::{TodoId, Translation};

    use super::*;

    #[test]
    fn renders_checkbox_and_short_id() {
        let todo = Todo {
            id: TodoId::from("0123456789abcdef"),
            completed: true,
            ..Todo::new("Buy milk")
        };

        assert_eq!(view(2, &todo, false), "  2. [x] Buy milk  (01234567)\n");
    }

    #[test]
    fn translated_todo_shows_translation_and_original() {
        let todo = Todo {
            id: TodoId::from("42"),
            translation: Some(Translation {
                original_text: String::from("Hello"),
                translated_text: String::from("Hola"),
                target_language: String::from("Spanish"),
            }),
            ..Todo::new("Hello")
        };

        assert_eq!(
            view(1, &todo, true),
            "  1. [ ] Hola  …  (42)\n        Spanish  Original: Hello\n"
        );
    }
}
