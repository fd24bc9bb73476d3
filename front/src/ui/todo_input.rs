use lingo_api::v1::{Filter, UnknownLanguage};

use super::{Intent, Target};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseIntentError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a todo number or id")]
    MissingTarget(&'static str),
    #[error("`pick` needs a language")]
    MissingLanguage,
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
}

impl Intent {
    /// Parses one line typed at the prompt. Blank lines give `None`.
    pub fn parse(line: &str) -> Result<Option<Intent>, ParseIntentError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let target = |name: &'static str| -> Result<Target, ParseIntentError> {
            match rest.split_whitespace().next().map(str::parse::<Target>) {
                Some(Ok(target)) => Ok(target),
                Some(Err(never)) => match never {},
                None => Err(ParseIntentError::MissingTarget(name)),
            }
        };

        let intent = match command.to_ascii_lowercase().as_str() {
            "add" | "a" | "+" => Intent::Add(rest.to_owned()),
            "toggle" | "t" | "check" => Intent::Toggle(target("toggle")?),
            "done" if !rest.is_empty() => Intent::Toggle(target("done")?),
            "delete" | "del" | "rm" => Intent::Delete(target("delete")?),
            "translate" | "tr" => {
                let target = target("translate")?;
                match rest.split_whitespace().nth(1) {
                    Some(language) => Intent::Translate(target, language.parse()?),
                    None => Intent::OpenTranslate(target),
                }
            }
            "pick" | "to" => match rest.split_whitespace().next() {
                Some(language) => Intent::PickLanguage(language.parse()?),
                None => return Err(ParseIntentError::MissingLanguage),
            },
            "clear" => Intent::ClearCompleted,
            "all" => Intent::Show(Filter::All),
            "active" => Intent::Show(Filter::Active),
            "done" | "completed" => Intent::Show(Filter::Completed),
            "list" | "ls" => Intent::List,
            "stats" => Intent::Stats,
            "languages" | "langs" => Intent::Languages,
            "help" | "?" => Intent::Help,
            "quit" | "exit" | "q" => Intent::Quit,
            _ => return Err(ParseIntentError::Unknown(command.to_owned())),
        };

        Ok(Some(intent))
    }
}

#[cfg(test)]
mod tests {
    use lingo_api::v1::Language;

    use super::*;

    fn parse(line: &str) -> Intent {
        Intent::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Intent::parse("   "), Ok(None));
    }

    #[test]
    fn add_keeps_the_rest_of_the_line() {
        assert_eq!(parse("add Buy  milk "), Intent::Add(String::from("Buy  milk")));
    }

    #[test]
    fn targets_are_positions_or_ids() {
        assert_eq!(parse("toggle 2"), Intent::Toggle(Target::Position(2)));
        assert_eq!(parse("rm 3f2a"), Intent::Delete(Target::Id(String::from("3f2a"))));
        assert_eq!(parse("done 1"), Intent::Toggle(Target::Position(1)));
        assert_eq!(parse("done"), Intent::Show(Filter::Completed));
    }

    #[test]
    fn translate_with_and_without_language() {
        assert_eq!(
            parse("translate 1 es"),
            Intent::Translate(Target::Position(1), Language::Spanish)
        );
        assert_eq!(parse("tr 1"), Intent::OpenTranslate(Target::Position(1)));
        assert_eq!(parse("pick French"), Intent::PickLanguage(Language::French));
    }

    #[test]
    fn errors_are_descriptive() {
        assert_eq!(
            Intent::parse("toggle"),
            Err(ParseIntentError::MissingTarget("toggle"))
        );
        assert!(matches!(
            Intent::parse("translate 1 klingon"),
            Err(ParseIntentError::Language(_))
        ));
        assert_eq!(
            Intent::parse("frobnicate"),
            Err(ParseIntentError::Unknown(String::from("frobnicate")))
        );
    }
}
