use crossterm::event::KeyEvent;
use filmshelf::MovieDraft;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, TextArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Genre,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Genre, Field::Year];

    fn label(self) -> &'static str {
        match self {
            Field::Title => " Title ",
            Field::Genre => " Genre ",
            Field::Year => " Year ",
        }
    }

    fn next(self) -> Self {
        match self {
            Field::Title => Field::Genre,
            Field::Genre => Field::Year,
            Field::Year => Field::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Title => Field::Year,
            Field::Genre => Field::Title,
            Field::Year => Field::Genre,
        }
    }
}

/// Three single-line inputs for title, genre and year.
pub struct MovieForm<'a> {
    inputs: [TextArea<'a>; 3],
    focus: Option<Field>,
}

impl<'a> MovieForm<'a> {
    pub fn new() -> Self {
        let mut form = Self {
            inputs: Field::ALL.map(|field| Self::new_input(field, String::new())),
            focus: None,
        };
        form.focus(None);
        form
    }

    /// A form holding `draft`, focused on the title.
    pub fn prefilled(draft: &MovieDraft) -> Self {
        let mut form = Self {
            inputs: [
                Self::new_input(Field::Title, draft.title.clone()),
                Self::new_input(Field::Genre, draft.genre.clone()),
                Self::new_input(Field::Year, draft.year.to_string()),
            ],
            focus: None,
        };
        form.focus(Some(Field::Title));
        form
    }

    fn new_input(field: Field, value: String) -> TextArea<'a> {
        let mut input = TextArea::new(vec![value]);
        input.set_cursor_line_style(Style::default());
        input.set_placeholder_text(field.label().trim());
        input.move_cursor(CursorMove::End);
        input
    }

    fn slot(field: Field) -> usize {
        match field {
            Field::Title => 0,
            Field::Genre => 1,
            Field::Year => 2,
        }
    }

    pub fn focused(&self) -> Option<Field> {
        self.focus
    }

    pub fn focus(&mut self, field: Option<Field>) {
        self.focus = field;
        for f in Field::ALL {
            let style = if Some(f) == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            self.inputs[Self::slot(f)].set_block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(f.label()),
            );
        }
    }

    /// Move focus forward. Returns `false` when it wraps past the year.
    pub fn focus_next(&mut self) -> bool {
        match self.focus {
            Some(Field::Year) => {
                self.focus(None);
                false
            }
            Some(field) => {
                self.focus(Some(field.next()));
                true
            }
            None => {
                self.focus(Some(Field::Title));
                true
            }
        }
    }

    pub fn focus_prev(&mut self) {
        let field = self.focus.map_or(Field::Year, Field::prev);
        self.focus(Some(field));
    }

    pub fn input(&mut self, key: KeyEvent) {
        if let Some(field) = self.focus {
            self.inputs[Self::slot(field)].input(key);
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.inputs[Self::slot(field)]
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn clear(&mut self) {
        let focus = self.focus;
        self.inputs = Field::ALL.map(|field| Self::new_input(field, String::new()));
        self.focus(focus);
    }

    pub fn textarea(&self, field: Field) -> &TextArea<'a> {
        &self.inputs[Self::slot(field)]
    }
}
