use super::form::{Field, MovieForm};
use super::ui;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use filmshelf::{
    Confirmation, Filter, Listing, MovieDraft, RecordId, RowAction, SyncOp, SyncUpdate,
    Synchronizer, project,
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::{Block, Borders},
};
use std::{error::Error, io, time::Duration};
use tracing::debug;
use tui_textarea::TextArea;

const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filter,
    CreateForm,
}

pub enum Modal<'a> {
    Edit { id: RecordId, form: MovieForm<'a> },
    ConfirmDelete { id: RecordId, title: String },
}

pub struct App<'a> {
    pub sync: Synchronizer,
    pub filter_input: TextArea<'a>,
    pub filter: Filter,
    pub create_form: MovieForm<'a>,
    pub focus: Focus,
    pub modal: Option<Modal<'a>>,
    /// Blocking message; all input goes to dismissing it.
    pub alert: Option<String>,
    pub listing: Listing,
    pub selected: usize,
    pub exit: bool,
}

impl<'a> App<'a> {
    pub fn new(sync: Synchronizer) -> Self {
        let listing = project(sync.cache(), &Filter::default());
        Self {
            sync,
            filter_input: Self::new_filter_input(),
            filter: Filter::default(),
            create_form: MovieForm::new(),
            focus: Focus::Filter,
            modal: None,
            alert: None,
            listing,
            selected: 0,
            exit: false,
        }
    }

    fn new_filter_input() -> TextArea<'a> {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(ratatui::style::Style::default());
        textarea.set_placeholder_text("Type to filter by title or genre");
        textarea.set_block(Block::default().borders(Borders::ALL).title(" Filter "));
        textarea
    }

    pub async fn run(&mut self) -> Result<(), Box<dyn Error>> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.sync.load_all();
        let res = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            println!("{:?}", err);
        }

        Ok(())
    }

    async fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            while let Some(update) = self.sync.try_next() {
                self.handle_sync(update);
            }

            terminal.draw(|f| ui::draw(f, self))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.exit {
                return Ok(());
            }
        }
    }

    pub fn handle_sync(&mut self, update: SyncUpdate) {
        match update {
            SyncUpdate::Refreshed { .. } => self.refresh_listing(),
            SyncUpdate::Created(_) => self.create_form.clear(),
            SyncUpdate::Failed(SyncOp::Create) => {
                debug!("create failed; keeping form contents for retry");
            }
            SyncUpdate::Updated(_) | SyncUpdate::Deleted(_) | SyncUpdate::Failed(_) => {}
        }
    }

    pub fn refresh_listing(&mut self) {
        self.listing = project(self.sync.cache(), &self.filter);
        self.selected = self.selected.min(self.listing.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return;
        }

        match self.modal.take() {
            Some(Modal::Edit { id, form }) => self.handle_edit_key(key, id, form),
            Some(Modal::ConfirmDelete { id, title }) => self.handle_confirm_key(key, id, title),
            None => self.handle_main_key(key),
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.exit = true,
            KeyCode::Char('c') if ctrl => self.exit = true,
            KeyCode::Char('r') if ctrl => self.sync.load_all(),
            KeyCode::Char('e') if ctrl => self.open_edit(),
            KeyCode::Char('d') if ctrl => self.open_delete(),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.listing.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter if self.focus == Focus::CreateForm => self.submit_create(),
            KeyCode::Enter => {}
            _ => match self.focus {
                Focus::Filter => {
                    self.filter_input.input(key);
                    self.update_filter();
                }
                Focus::CreateForm => self.create_form.input(key),
            },
        }
    }

    fn focus_next(&mut self) {
        match self.focus {
            Focus::Filter => {
                self.focus = Focus::CreateForm;
                self.create_form.focus(Some(Field::Title));
            }
            Focus::CreateForm => {
                if !self.create_form.focus_next() {
                    self.focus = Focus::Filter;
                }
            }
        }
    }

    fn focus_prev(&mut self) {
        match self.focus {
            Focus::Filter => {
                self.focus = Focus::CreateForm;
                self.create_form.focus(Some(Field::Year));
            }
            Focus::CreateForm if self.create_form.focused() == Some(Field::Title) => {
                self.create_form.focus(None);
                self.focus = Focus::Filter;
            }
            Focus::CreateForm => self.create_form.focus_prev(),
        }
    }

    fn update_filter(&mut self) {
        let query = self.filter_input.lines().first().cloned().unwrap_or_default();
        let filter = Filter::new(&query);
        if filter != self.filter {
            self.filter = filter;
            self.selected = 0;
            self.refresh_listing();
        }
    }

    fn submit_create(&mut self) {
        let result = self.sync.create(
            self.create_form.value(Field::Title),
            self.create_form.value(Field::Genre),
            self.create_form.value(Field::Year),
        );
        if let Err(err) = result {
            self.alert = Some(err.to_string());
        }
    }

    fn open_edit(&mut self) {
        let Some(row) = self.listing.rows().get(self.selected) else {
            return;
        };
        if let RowAction::Edit { id, draft } = row.edit.clone() {
            self.modal = Some(Modal::Edit {
                id,
                form: MovieForm::prefilled(&draft),
            });
        }
    }

    fn open_delete(&mut self) {
        let Some(row) = self.listing.rows().get(self.selected) else {
            return;
        };
        let title = row.title.clone();
        if let RowAction::Delete { id } = row.delete.clone() {
            self.modal = Some(Modal::ConfirmDelete { id, title });
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, id: RecordId, mut form: MovieForm<'a>) {
        match key.code {
            // Cancel drops the whole form; nothing is sent.
            KeyCode::Esc => {}
            KeyCode::Enter => {
                match MovieDraft::parse(
                    form.value(Field::Title),
                    form.value(Field::Genre),
                    form.value(Field::Year),
                ) {
                    Ok(draft) => self.sync.update(id, draft),
                    Err(err) => {
                        self.alert = Some(err.to_string());
                        self.modal = Some(Modal::Edit { id, form });
                    }
                }
            }
            KeyCode::Tab => {
                if !form.focus_next() {
                    form.focus(Some(Field::Title));
                }
                self.modal = Some(Modal::Edit { id, form });
            }
            KeyCode::BackTab => {
                form.focus_prev();
                self.modal = Some(Modal::Edit { id, form });
            }
            _ => {
                form.input(key);
                self.modal = Some(Modal::Edit { id, form });
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, id: RecordId, title: String) {
        let confirmation = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Confirmation::Accepted,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Declined,
            _ => {
                self.modal = Some(Modal::ConfirmDelete { id, title });
                return;
            }
        };
        self.sync.delete(id, confirmation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmshelf::api::ApiCall;
    use filmshelf::{InMemoryMovieApi, Record};
    use std::sync::Arc;

    fn record(id: i64, title: &str, genre: &str, year: i32) -> Record {
        Record {
            id: RecordId::from(id),
            title: title.to_string(),
            genre: genre.to_string(),
            year,
        }
    }

    async fn loaded_app() -> (App<'static>, Arc<InMemoryMovieApi>) {
        let api = Arc::new(InMemoryMovieApi::with_records(vec![
            record(1, "Dune", "Sci-Fi", 2021),
            record(2, "Heat", "Crime", 1995),
        ]));
        let mut app = App::new(Synchronizer::new(api.clone()));
        app.sync.load_all();
        pump(&mut app).await;
        (app, api)
    }

    async fn pump(app: &mut App<'_>) {
        for update in app.sync.settle().await {
            app.handle_sync(update);
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn titles(app: &App) -> Vec<String> {
        app.listing.rows().iter().map(|r| r.title.clone()).collect()
    }

    #[tokio::test]
    async fn filter_narrows_listing_on_each_keystroke() {
        let (mut app, api) = loaded_app().await;
        assert_eq!(titles(&app), ["Dune", "Heat"]);

        type_str(&mut app, "h");
        assert_eq!(titles(&app), ["Heat"]);

        type_str(&mut app, "x");
        assert_eq!(app.listing, Listing::Placeholder(filmshelf::view::NO_RESULTS));

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(titles(&app), ["Dune", "Heat"]);
        assert_eq!(api.calls().await, vec![ApiCall::List]);
    }

    #[tokio::test]
    async fn invalid_create_raises_alert_without_request() {
        let (mut app, api) = loaded_app().await;

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Dune");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Sci-Fi");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "abcd");
        press(&mut app, KeyCode::Enter);

        assert!(app.alert.as_deref().unwrap_or("").contains("abcd"));
        assert_eq!(app.sync.outstanding(), 0);
        assert_eq!(api.calls().await, vec![ApiCall::List]);

        // Typing is swallowed until the alert is dismissed.
        type_str(&mut app, "1");
        assert_eq!(app.create_form.value(Field::Year), "abcd");
        press(&mut app, KeyCode::Enter);
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn successful_create_clears_form_and_reloads() {
        let (mut app, _api) = loaded_app().await;

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Alien");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Horror");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1979");
        press(&mut app, KeyCode::Enter);
        pump(&mut app).await;

        assert_eq!(titles(&app), ["Dune", "Heat", "Alien"]);
        for field in Field::ALL {
            assert_eq!(app.create_form.value(field), "");
        }
    }

    #[tokio::test]
    async fn failed_create_keeps_form_contents() {
        let (mut app, api) = loaded_app().await;
        api.set_failing(true).await;

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Alien");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Horror");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1979");
        press(&mut app, KeyCode::Enter);
        pump(&mut app).await;

        assert_eq!(app.create_form.value(Field::Title), "Alien");
        assert_eq!(app.create_form.value(Field::Year), "1979");
        assert_eq!(titles(&app), ["Dune", "Heat"]);
    }

    #[tokio::test]
    async fn declined_delete_issues_no_request() {
        let (mut app, api) = loaded_app().await;

        ctrl(&mut app, 'd');
        assert!(matches!(app.modal, Some(Modal::ConfirmDelete { ref title, .. }) if title == "Dune"));
        press(&mut app, KeyCode::Char('n'));
        pump(&mut app).await;

        assert!(app.modal.is_none());
        assert_eq!(api.calls().await, vec![ApiCall::List]);
        assert_eq!(app.sync.cache().len(), 2);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_selected_row() {
        let (mut app, api) = loaded_app().await;

        press(&mut app, KeyCode::Down);
        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('y'));
        pump(&mut app).await;

        assert_eq!(titles(&app), ["Dune"]);
        assert_eq!(
            api.calls().await,
            vec![
                ApiCall::List,
                ApiCall::Delete(RecordId::from(2)),
                ApiCall::List
            ]
        );
    }

    #[tokio::test]
    async fn cancelled_edit_sends_nothing() {
        let (mut app, api) = loaded_app().await;

        ctrl(&mut app, 'e');
        type_str(&mut app, " Part Two");
        press(&mut app, KeyCode::Esc);
        pump(&mut app).await;

        assert!(app.modal.is_none());
        assert!(!app.exit);
        assert_eq!(api.calls().await, vec![ApiCall::List]);
    }

    #[tokio::test]
    async fn submitted_edit_replaces_all_fields() {
        let (mut app, api) = loaded_app().await;

        ctrl(&mut app, 'e');
        type_str(&mut app, ": Part One");
        press(&mut app, KeyCode::Enter);
        pump(&mut app).await;

        assert_eq!(
            api.calls().await[1],
            ApiCall::Update(
                RecordId::from(1),
                MovieDraft {
                    title: "Dune: Part One".to_string(),
                    genre: "Sci-Fi".to_string(),
                    year: 2021,
                }
            )
        );
        assert_eq!(titles(&app), ["Dune: Part One", "Heat"]);
    }

    #[tokio::test]
    async fn edit_on_empty_listing_is_a_no_op() {
        let api = Arc::new(InMemoryMovieApi::new());
        let mut app = App::new(Synchronizer::new(api));
        ctrl(&mut app, 'e');
        ctrl(&mut app, 'd');
        assert!(app.modal.is_none());
    }
}
