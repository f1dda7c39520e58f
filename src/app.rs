use crate::auth::{AuthSession, LOGIN_HINT};
use crate::calculator::ServingCalculator;
use crate::handlers::remote::{RemoteMessage, RemoteWorker};
use crate::models::{CategoryFilter, Recipe, RecipeForm, StorageManager};
use crate::notifications::NotificationQueue;
use crate::repository::RecipeRepository;
use crate::search::filter_recipes;
use crate::state::UiStore;
use crate::store::RecipeStore;
use crate::ui::{components, login, recipe_detail, recipe_form, recipe_list};
use anyhow::Result;
use ratatui::Frame;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// What keystrokes currently edit, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    /// Typing a serving count in the detail popup
    Servings,
    HelpMenu,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationState {
    None,
    DeleteRecipe { recipe_id: String, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<&'static str>,
}

impl LoginForm {
    pub fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// Main Application State Container
///
/// Owns the login session, the UI state store, the recipe repository, the
/// toast queue and the worker that runs remote calls. Key handlers and
/// renderers receive it by reference; nothing here is global.
#[derive(Debug)]
pub struct App {
    pub auth: AuthSession,
    pub ui: UiStore,
    pub repository: RecipeRepository,
    pub notifications: NotificationQueue,
    pub worker: RemoteWorker,

    pub login_form: LoginForm,
    pub input_mode: InputMode,
    pub selected_recipe: usize,
    pub recipe_form: Option<RecipeForm>,
    pub calculator: Option<ServingCalculator>,
    pub servings_input: String,
    pub confirmation_state: ConfirmationState,
    /// A create or update is in flight
    pub submitting: bool,
    /// Clear the terminal before the next draw
    pub needs_redraw: bool,
    pub store_label: String,
}

impl App {
    pub fn new(store: Arc<dyn RecipeStore>, storage: Option<StorageManager>) -> Result<Self> {
        let store_label = store.describe();
        let mut app = Self {
            auth: AuthSession::restore(storage.clone()),
            ui: UiStore::new(storage),
            repository: RecipeRepository::new(store),
            notifications: NotificationQueue::default(),
            worker: RemoteWorker::new()?,
            login_form: LoginForm::default(),
            input_mode: InputMode::Normal,
            selected_recipe: 0,
            recipe_form: None,
            calculator: None,
            servings_input: String::new(),
            confirmation_state: ConfirmationState::None,
            submitting: false,
            needs_redraw: true,
            store_label,
        };

        if app.auth.is_authenticated() {
            info!(user = app.auth.username().unwrap_or_default(), "session restored");
            app.refresh();
        }
        Ok(app)
    }

    // Derived views

    /// The list view's rows: cache narrowed by favorites-only and search
    pub fn displayed_recipes(&self) -> Vec<&Recipe> {
        filter_recipes(
            self.repository.recipes(),
            self.ui.showing_favorites(),
            self.ui.favorites(),
            self.ui.search_query(),
        )
    }

    pub fn selected(&self) -> Option<&Recipe> {
        self.displayed_recipes().get(self.selected_recipe).copied()
    }

    pub fn viewing_recipe(&self) -> Option<&Recipe> {
        self.ui
            .viewing_recipe_id()
            .and_then(|id| self.repository.find(id))
    }

    pub fn next_recipe(&mut self) {
        let len = self.displayed_recipes().len();
        if len > 0 {
            self.selected_recipe = (self.selected_recipe + 1) % len;
        }
    }

    pub fn previous_recipe(&mut self) {
        let len = self.displayed_recipes().len();
        if len > 0 {
            self.selected_recipe = (self.selected_recipe + len - 1) % len;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.displayed_recipes().len();
        self.selected_recipe = if len == 0 {
            0
        } else {
            self.selected_recipe.min(len - 1)
        };
    }

    // Login

    pub fn submit_login(&mut self) {
        let username = self.login_form.username.clone();
        let password = self.login_form.password.clone();

        if self.auth.login(&username, &password) {
            self.login_form = LoginForm::default();
            self.notifications
                .success(format!("Welcome back, {}!", username));
            self.refresh();
        } else {
            self.login_form.password.clear();
            self.login_form.error = Some(LOGIN_HINT);
        }
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.ui.reset_ui();
        self.recipe_form = None;
        self.calculator = None;
        self.confirmation_state = ConfirmationState::None;
        self.input_mode = InputMode::Normal;
        self.selected_recipe = 0;
        self.needs_redraw = true;
    }

    // Filters

    /// Issues a fetch for the selected category
    pub fn refresh(&mut self) {
        let ticket = self.repository.begin_fetch();
        let category = self.ui.selected_category();
        debug!(?category, "fetching recipes");
        self.worker.fetch(self.repository.store(), ticket, category);
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        if self.ui.selected_category() != category {
            self.ui.set_selected_category(category);
            self.selected_recipe = 0;
            self.refresh();
        }
    }

    pub fn next_category(&mut self) {
        self.select_category(self.ui.selected_category().next());
    }

    pub fn previous_category(&mut self) {
        self.select_category(self.ui.selected_category().previous());
    }

    pub fn toggle_favorites_only(&mut self) {
        self.ui.toggle_show_favorites();
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = self.ui.search_query().to_string();
        query.push(c);
        self.ui.set_search_query(query);
        self.selected_recipe = 0;
    }

    pub fn pop_search_char(&mut self) {
        let mut query = self.ui.search_query().to_string();
        query.pop();
        self.ui.set_search_query(query);
        self.clamp_selection();
    }

    pub fn clear_search(&mut self) {
        self.ui.set_search_query("");
        self.clamp_selection();
    }

    pub fn toggle_favorite(&mut self, recipe_id: &str) {
        let title = self
            .repository
            .find(recipe_id)
            .map(|r| r.title.clone())
            .unwrap_or_default();
        if self.ui.toggle_favorite(recipe_id) {
            self.notifications.info(format!("★ Added {} to favorites", title));
        } else {
            self.notifications.info(format!("Removed {} from favorites", title));
        }
        self.clamp_selection();
    }

    // Detail popup

    pub fn open_detail(&mut self, recipe_id: &str) {
        let Some(recipe) = self.repository.find(recipe_id) else {
            return;
        };
        self.calculator = Some(ServingCalculator::new(
            recipe.servings,
            recipe.ingredients.clone(),
        ));
        self.servings_input.clear();
        self.ui.open_detail_modal(recipe_id.to_string());
    }

    pub fn close_detail(&mut self) {
        self.ui.close_detail_modal();
        self.calculator = None;
        self.servings_input.clear();
        if self.input_mode == InputMode::Servings {
            self.input_mode = InputMode::Normal;
        }
        self.needs_redraw = true;
    }

    pub fn apply_servings_input(&mut self) {
        if let (Ok(servings), Some(calculator)) =
            (self.servings_input.trim().parse::<u32>(), self.calculator.as_mut())
        {
            calculator.set_servings(servings);
        }
        self.servings_input.clear();
        self.input_mode = InputMode::Normal;
    }

    // Form popup

    pub fn open_create_form(&mut self) {
        self.ui.open_form_modal(None);
        self.recipe_form = Some(RecipeForm::new());
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self, recipe_id: &str) {
        let Some(recipe) = self.repository.find(recipe_id) else {
            return;
        };
        self.recipe_form = Some(RecipeForm::from_recipe(recipe));
        self.ui.open_form_modal(Some(recipe_id.to_string()));
        self.input_mode = InputMode::Form;
    }

    /// Edit from the detail popup: the detail closes first
    pub fn edit_viewing_recipe(&mut self) {
        if let Some(id) = self.ui.viewing_recipe_id().map(str::to_string) {
            self.close_detail();
            self.open_edit_form(&id);
        }
    }

    /// Esc in the form. Ignored while a save is in flight, since its result
    /// closes or annotates whichever form is open when it lands.
    pub fn cancel_form(&mut self) {
        if self.submitting {
            return;
        }
        self.close_form();
    }

    pub fn close_form(&mut self) {
        self.ui.close_form_modal();
        self.recipe_form = None;
        self.submitting = false;
        self.input_mode = InputMode::Normal;
        self.needs_redraw = true;
    }

    /// Validates the form and hands the payload to the worker
    pub fn submit_form(&mut self) {
        if self.submitting {
            return;
        }
        let Some(form) = self.recipe_form.as_mut() else {
            return;
        };

        let data = match form.to_form_data() {
            Ok(data) => data,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };
        form.error = None;

        self.repository.begin_mutation();
        self.submitting = true;
        let store = self.repository.store();
        match self.ui.editing_recipe_id() {
            Some(id) => self.worker.update(store, id.to_string(), data),
            None => self.worker.create(store, data),
        }
    }

    // Delete confirmation

    pub fn request_delete(&mut self, recipe_id: &str) {
        if let Some(recipe) = self.repository.find(recipe_id) {
            self.confirmation_state = ConfirmationState::DeleteRecipe {
                recipe_id: recipe.id.clone(),
                title: recipe.title.clone(),
            };
        }
    }

    pub fn has_pending_action(&self) -> bool {
        self.confirmation_state != ConfirmationState::None
    }

    pub fn confirm_pending_action(&mut self) {
        let state = std::mem::replace(&mut self.confirmation_state, ConfirmationState::None);
        if let ConfirmationState::DeleteRecipe { recipe_id, .. } = state {
            self.repository.begin_mutation();
            self.worker.delete(self.repository.store(), recipe_id);
        }
    }

    pub fn cancel_pending_action(&mut self) {
        self.confirmation_state = ConfirmationState::None;
    }

    // Event loop

    /// Applies finished remote calls and expires old toasts
    pub fn tick(&mut self) {
        for message in self.worker.drain() {
            self.apply_remote(message);
        }
        self.notifications.expire(Instant::now());
    }

    pub fn apply_remote(&mut self, message: RemoteMessage) {
        match message {
            RemoteMessage::Fetched { ticket, result } => {
                self.repository.finish_fetch(ticket, result);
                self.clamp_selection();
            }
            RemoteMessage::Created(result) => {
                self.submitting = false;
                if self.repository.finish_create(result).is_some() {
                    self.notifications.success("Recipe created successfully!");
                    self.close_form();
                    self.selected_recipe = 0;
                } else {
                    self.report_form_failure("Failed to create recipe");
                }
            }
            RemoteMessage::Updated { id, result } => {
                self.submitting = false;
                if let Some(recipe) = self.repository.finish_update(&id, result) {
                    self.notifications.success("Recipe updated successfully!");
                    self.close_form();
                    if self.ui.viewing_recipe_id() == Some(recipe.id.as_str()) {
                        self.calculator =
                            Some(ServingCalculator::new(recipe.servings, recipe.ingredients));
                    }
                } else {
                    self.report_form_failure("Failed to update recipe");
                }
            }
            RemoteMessage::Deleted { id, result } => {
                if self.repository.finish_delete(&id, result) {
                    self.notifications.success("Recipe deleted successfully!");
                    if self.ui.viewing_recipe_id() == Some(id.as_str()) {
                        self.close_detail();
                    }
                    self.clamp_selection();
                } else {
                    self.notifications.error("Failed to delete recipe");
                }
            }
        }
    }

    fn report_form_failure(&mut self, message: &str) {
        self.notifications.error(message);
        if let Some(form) = self.recipe_form.as_mut() {
            form.error = self.repository.error().map(str::to_string);
        }
    }

    /// Renders the login screen or the recipe list with any open popups
    pub fn render(&mut self, frame: &mut Frame) {
        if !self.auth.is_authenticated() {
            login::render(frame, self);
            components::render_notifications(frame, self);
            return;
        }

        recipe_list::render(frame, self);
        if self.ui.is_detail_modal_open() {
            recipe_detail::render(frame, self);
        }
        if self.ui.is_form_modal_open() {
            recipe_form::render(frame, self);
        }
        if self.has_pending_action() {
            components::render_confirmation(frame, self);
        }
        if self.input_mode == InputMode::HelpMenu {
            components::render_help(frame);
        }
        components::render_notifications(frame, self);
    }
}
