use std::borrow::Cow::{self, Borrowed, Owned};

use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline::{Completer, Helper, Hinter, Validator};

/// Line editor helper for the menu: bold green prompts and history based hints.
#[derive(Helper, Completer, Hinter, Validator)]
pub(crate) struct MenuHelper {
    #[rustyline(Hinter)]
    pub(crate) hinter: HistoryHinter,
}

impl MenuHelper {
    pub(crate) fn new() -> MenuHelper {
        MenuHelper { hinter: HistoryHinter::new() }
    }
}

impl Highlighter for MenuHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[2m".to_owned() + hint + "\x1b[m")
    }
}
