pub mod app;
pub mod event;
pub mod form;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::api::FoodApi;
use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::dashboard::{execute, Request, Response, Transition};
use crate::domain::FoodPatch;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};
use self::form::FormKind;

type Tui = Terminal<CrosstermBackend<Stdout>>;

type Completion = (Request, Result<Response>);

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs requests off the UI loop and reports back over a channel.
struct Dispatcher {
    api: Arc<dyn FoodApi + Send + Sync>,
    tx: UnboundedSender<Completion>,
}

impl Dispatcher {
    /// Start `request` in the background. A rejected request is recorded as
    /// the dashboard's last error and returned.
    fn dispatch(&self, app: &mut TuiApp, request: Request) -> Result<()> {
        app.dashboard.begin(&request)?;

        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = execute(api.as_ref(), &request).await;
            if tx.send((request, result)).is_err() {
                tracing::debug!("UI closed before a request completed");
            }
        });
        Ok(())
    }
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = ctx.config.clone();
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher {
        api: ctx.api.clone(),
        tx,
    };

    let _ = dispatcher.dispatch(&mut tui_app, Request::load_all());

    loop {
        // Responses are applied in the order they arrive
        while let Ok((request, result)) = rx.try_recv() {
            tui_app.complete(&request, result);
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => handle_key(&mut tui_app, &dispatcher, &config, key),
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut TuiApp, dispatcher: &Dispatcher, config: &Config, key: KeyEvent) {
    if let Some((food_id, food_name)) = app.pending_delete.take() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.set_status(format!("Deleting {}...", food_name));
                let _ = dispatcher.dispatch(app, Request::delete(food_id));
            }
            _ => {
                app.set_status("Delete cancelled".to_string());
            }
        }
        return;
    }

    if app.form.is_some() {
        handle_form_key(app, dispatcher, key);
        return;
    }

    app.clear_status();

    match config.keybindings.get_action(&key) {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::MoveUp => {
            app.move_up();
        }
        Action::MoveDown => {
            app.move_down();
        }
        Action::NextPage => {
            app.next_page();
        }
        Action::PrevPage => {
            app.prev_page();
        }
        Action::AddFood => {
            app.apply(Transition::ToggleAddModal);
        }
        Action::EditFood => {
            if let Some(food) = app.selected_food().cloned() {
                app.apply(Transition::BeginEdit(food));
            }
        }
        Action::DeleteFood => {
            app.pending_delete = app
                .selected_food()
                .map(|food| (food.id, food.display_name().to_string()));
        }
        Action::ToggleAvailable => {
            if let Some(food) = app.selected_food().cloned() {
                let patch = FoodPatch {
                    available: Some(!food.available),
                    ..Default::default()
                };
                app.apply(Transition::BeginEdit(food));
                let planned = app.dashboard.plan_update(&patch);
                app.apply(Transition::ToggleEditModal);
                if let Ok(request) = planned {
                    let _ = dispatcher.dispatch(app, request);
                }
            }
        }
        Action::OpenImage => {
            let image = app.selected_food().map(|food| food.image.clone());
            match image {
                Some(url) if url.trim().is_empty() => {
                    app.set_status("This food has no image URL".to_string());
                }
                Some(url) => {
                    if let Err(e) = open::that(url.trim()) {
                        app.set_status(format!("Failed to open browser: {}", e));
                    }
                }
                None => {}
            }
        }
        Action::Reload => {
            let _ = dispatcher.dispatch(app, Request::load_all());
        }
        Action::None => {}
    }
}

fn handle_form_key(app: &mut TuiApp, dispatcher: &Dispatcher, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            let close = match form.kind {
                FormKind::Add => Transition::ToggleAddModal,
                FormKind::Edit(_) => Transition::ToggleEditModal,
            };
            app.apply(close);
        }
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => submit_form(app, dispatcher),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.input(c),
        _ => {}
    }
}

fn submit_form(app: &mut TuiApp, dispatcher: &Dispatcher) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let planned: std::result::Result<Option<(Request, Transition)>, String> = match form.kind {
        FormKind::Add => form
            .to_new_food()
            .map(|candidate| Some((Request::create(candidate), Transition::ToggleAddModal))),
        FormKind::Edit(_) => match app.dashboard.editing() {
            None => Err("No food is being edited".to_string()),
            Some(original) => form.to_patch(original).and_then(|patch| {
                if patch.is_empty() {
                    return Ok(None);
                }
                app.dashboard
                    .plan_update(&patch)
                    .map(|request| Some((request, Transition::ToggleEditModal)))
                    .map_err(|e| e.to_string())
            }),
        },
    };

    match planned {
        Ok(Some((request, close))) => match dispatcher.dispatch(app, request) {
            Ok(()) => app.apply(close),
            // keep the form so nothing typed is lost
            Err(e) => {
                if let Some(form) = app.form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
        },
        Ok(None) => {
            app.apply(Transition::ToggleEditModal);
            app.set_status("No changes".to_string());
        }
        Err(message) => {
            if let Some(form) = app.form.as_mut() {
                form.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::RequestKey;
    use crate::domain::{Food, NewFood};
    use async_trait::async_trait;
    use tokio::sync::mpsc::UnboundedReceiver;

    /// Echoes every call back, or never answers when `hang` is set.
    struct StubApi {
        hang: bool,
    }

    impl StubApi {
        async fn wait(&self) {
            if self.hang {
                std::future::pending::<()>().await;
            }
        }
    }

    #[async_trait]
    impl FoodApi for StubApi {
        async fn list_foods(&self) -> Result<Vec<Food>> {
            self.wait().await;
            Ok(vec![soup()])
        }

        async fn create_food(&self, food: &NewFood) -> Result<Food> {
            self.wait().await;
            Ok(Food {
                id: 99,
                name: food.name.clone(),
                description: food.description.clone(),
                price: food.price,
                available: food.available,
                image: food.image.clone(),
            })
        }

        async fn update_food(&self, _id: i64, food: &Food) -> Result<Food> {
            self.wait().await;
            Ok(food.clone())
        }

        async fn delete_food(&self, _id: i64) -> Result<()> {
            self.wait().await;
            Ok(())
        }
    }

    fn soup() -> Food {
        Food {
            id: 3,
            name: "Soup".into(),
            description: "Hot".into(),
            price: 8.5,
            available: false,
            image: String::new(),
        }
    }

    fn setup(hang: bool) -> (TuiApp, Dispatcher, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher {
            api: Arc::new(StubApi { hang }),
            tx,
        };
        let mut app = TuiApp::new();
        app.apply(Transition::Loaded(vec![soup()]));
        (app, dispatcher, rx)
    }

    fn press(app: &mut TuiApp, dispatcher: &Dispatcher, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        handle_key(app, dispatcher, &Config::default(), key);
    }

    fn type_str(app: &mut TuiApp, dispatcher: &Dispatcher, text: &str) {
        for c in text.chars() {
            press(app, dispatcher, KeyCode::Char(c));
        }
    }

    fn fill_add_form(app: &mut TuiApp, dispatcher: &Dispatcher, name: &str, price: &str) {
        press(app, dispatcher, KeyCode::Char('a'));
        type_str(app, dispatcher, name);
        press(app, dispatcher, KeyCode::Tab);
        press(app, dispatcher, KeyCode::Tab);
        type_str(app, dispatcher, price);
    }

    #[tokio::test]
    async fn test_add_submit_closes_modal_and_creates() {
        let (mut app, dispatcher, mut rx) = setup(false);

        fill_add_form(&mut app, &dispatcher, "Pizza", "12.5");
        assert!(app.dashboard.is_add_open());
        press(&mut app, &dispatcher, KeyCode::Enter);

        assert!(app.form.is_none());
        assert!(!app.dashboard.is_add_open());
        assert!(app.dashboard.is_in_flight(RequestKey::Create));

        let (request, result) = rx.recv().await.unwrap();
        assert_eq!(
            request,
            Request::Create(NewFood {
                name: "Pizza".into(),
                description: String::new(),
                price: 12.5,
                available: true,
                image: String::new(),
            })
        );

        app.complete(&request, result);
        assert_eq!(app.foods().len(), 2);
        assert_eq!(app.foods()[1].id, 99);
        assert_eq!(app.status_message.as_deref(), Some("Added Pizza"));
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_form_open() {
        let (mut app, dispatcher, _rx) = setup(true);

        fill_add_form(&mut app, &dispatcher, "Pizza", "10");
        press(&mut app, &dispatcher, KeyCode::Enter);
        assert!(app.form.is_none());

        fill_add_form(&mut app, &dispatcher, "Soup", "5");
        press(&mut app, &dispatcher, KeyCode::Enter);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.name, "Soup");
        assert_eq!(form.price, "5");
        assert!(form.error.as_deref().unwrap().contains("already in flight"));
        assert!(app.dashboard.is_add_open());
        assert!(app.dashboard.last_error().is_some());
    }

    #[tokio::test]
    async fn test_rejected_edit_keeps_form_open() {
        let (mut app, dispatcher, _rx) = setup(true);

        // an update for the same food is still pending
        press(&mut app, &dispatcher, KeyCode::Char('t'));
        assert!(app.dashboard.is_in_flight(RequestKey::Food(3)));

        press(&mut app, &dispatcher, KeyCode::Char('e'));
        type_str(&mut app, &dispatcher, "!");
        press(&mut app, &dispatcher, KeyCode::Enter);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.name, "Soup!");
        assert!(form.error.is_some());
        assert!(app.dashboard.is_edit_open());
    }

    #[tokio::test]
    async fn test_edit_submit_sends_merged_update() {
        let (mut app, dispatcher, mut rx) = setup(false);

        press(&mut app, &dispatcher, KeyCode::Char('e'));
        press(&mut app, &dispatcher, KeyCode::Tab);
        for _ in 0.."Hot".len() {
            press(&mut app, &dispatcher, KeyCode::Backspace);
        }
        type_str(&mut app, &dispatcher, "Cold");
        press(&mut app, &dispatcher, KeyCode::Enter);

        assert!(app.form.is_none());
        assert!(app.dashboard.editing().is_none());

        let (request, result) = rx.recv().await.unwrap();
        assert_eq!(
            request,
            Request::Update {
                id: 3,
                body: Food {
                    description: "Cold".into(),
                    ..soup()
                },
            }
        );

        app.complete(&request, result);
        assert_eq!(app.foods()[0].description, "Cold");
        assert!(!app.foods()[0].available);
    }

    #[tokio::test]
    async fn test_unchanged_edit_reports_no_changes() {
        let (mut app, dispatcher, mut rx) = setup(false);

        press(&mut app, &dispatcher, KeyCode::Char('e'));
        press(&mut app, &dispatcher, KeyCode::Enter);

        assert!(app.form.is_none());
        assert_eq!(app.status_message.as_deref(), Some("No changes"));
        assert!(!app.dashboard.is_busy());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_toggle_available_flips_flag() {
        let (mut app, dispatcher, mut rx) = setup(false);

        press(&mut app, &dispatcher, KeyCode::Char('t'));
        assert!(app.form.is_none());

        let (request, result) = rx.recv().await.unwrap();
        assert_eq!(
            request,
            Request::Update {
                id: 3,
                body: Food {
                    available: true,
                    ..soup()
                },
            }
        );

        app.complete(&request, result);
        assert!(app.foods()[0].available);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let (mut app, dispatcher, mut rx) = setup(false);

        press(&mut app, &dispatcher, KeyCode::Char('d'));
        assert_eq!(app.pending_delete, Some((3, "Soup".to_string())));
        press(&mut app, &dispatcher, KeyCode::Char('n'));
        assert!(app.pending_delete.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Delete cancelled"));
        assert!(!app.dashboard.is_busy());

        press(&mut app, &dispatcher, KeyCode::Char('d'));
        press(&mut app, &dispatcher, KeyCode::Char('y'));
        assert!(app.dashboard.is_in_flight(RequestKey::Food(3)));

        let (request, result) = rx.recv().await.unwrap();
        assert_eq!(request, Request::Delete(3));
        app.complete(&request, result);
        assert!(app.foods().is_empty());
    }

    #[tokio::test]
    async fn test_escape_closes_form() {
        let (mut app, dispatcher, _rx) = setup(false);

        press(&mut app, &dispatcher, KeyCode::Char('a'));
        type_str(&mut app, &dispatcher, "Half typed");
        press(&mut app, &dispatcher, KeyCode::Esc);

        assert!(app.form.is_none());
        assert!(!app.dashboard.is_add_open());
        assert!(!app.dashboard.is_busy());
    }
}
