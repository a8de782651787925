/// Main TUI application

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::core::{ApiClient, EndpointInfo, NewEndpoint};
use crate::screens::Dashboard;
use crate::utils::{format_response_time, REFRESH_INTERVAL_SECS};

/// Visibility of the add-endpoint form
///
/// Owned by the app, reset to Hidden on startup, flipped by `toggle`.
/// Toggling is total: there is no failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVisibility {
    Hidden,
    Shown,
}

impl FormVisibility {
    pub fn toggle(self) -> Self {
        match self {
            FormVisibility::Hidden => FormVisibility::Shown,
            FormVisibility::Shown => FormVisibility::Hidden,
        }
    }

    pub fn is_shown(self) -> bool {
        matches!(self, FormVisibility::Shown)
    }
}

/// Fields of the add-endpoint form, one input buffer per field
#[derive(Debug, Clone)]
pub struct AddForm {
    pub name: String,
    pub url: String,
    pub method: String,
    pub expected_status: String,
}

pub const FORM_FIELD_COUNT: usize = 4;

impl AddForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            url: String::new(),
            method: "GET".to_string(),
            expected_status: "200".to_string(),
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut String {
        match index {
            0 => &mut self.name,
            1 => &mut self.url,
            2 => &mut self.method,
            _ => &mut self.expected_status,
        }
    }

    /// Build the submission from the form's own fields. Field-level
    /// problems come back as one joined message for the status bar.
    pub fn to_new_endpoint(&self) -> Result<NewEndpoint, String> {
        let expected_status = self
            .expected_status
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("expected status must be a number (got {:?})", self.expected_status))?;

        let endpoint = NewEndpoint {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            method: self.method.trim().to_uppercase(),
            expected_status,
        };

        let errors = endpoint.validate();
        if !errors.is_empty() {
            return Err(errors.join("; "));
        }

        Ok(endpoint)
    }
}

pub struct App {
    dashboard: Dashboard,
    api: ApiClient,
    endpoints: Vec<EndpointInfo>,
    selected_index: usize,
    should_quit: bool,
    last_refresh: Instant,
    refresh_interval: Duration,
    status_message: Option<String>,
    show_help: bool,
    form: FormVisibility,
    add_form: AddForm,
    form_field: usize,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        let mut dashboard = Dashboard::new();
        dashboard.update_server(api.server_url().to_string());

        Self {
            dashboard,
            api,
            endpoints: Vec::new(),
            selected_index: 0,
            should_quit: false,
            last_refresh: Instant::now(),
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL_SECS),
            status_message: None,
            show_help: false,
            form: FormVisibility::Hidden,
            add_form: AddForm::new(),
            form_field: 0,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Initial data load
        self.refresh_endpoints().await;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Periodic re-fetch so the table tracks server truth
            if self.last_refresh.elapsed() >= self.refresh_interval {
                self.refresh_endpoints().await;
            }

            terminal.draw(|f| {
                self.dashboard.render(
                    f,
                    self.selected_index,
                    self.status_message.as_deref(),
                    self.form,
                    &self.add_form,
                    self.form_field,
                    self.show_help,
                )
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event.code).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        // The form owns the keyboard while visible
        if self.form.is_shown() {
            return self.handle_form_key(key).await;
        }

        // Clear status message on any key outside the form
        self.clear_status();

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('a') => {
                self.form = self.form.toggle();
            }
            KeyCode::Char('r') => {
                self.set_status("Refreshing...".to_string());
                self.refresh_endpoints().await;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.endpoints.len().saturating_sub(1);
                if self.selected_index < max {
                    self.selected_index += 1;
                }
            }
            KeyCode::Char('c') => {
                self.check_selected().await;
            }
            KeyCode::Char('d') => {
                self.delete_selected().await;
            }
            KeyCode::Char('h') => {
                self.history_selected();
            }
            _ => {}
        }

        Ok(())
    }

    async fn handle_form_key(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc => {
                // Hide without discarding input; 'a' brings it back as-is
                self.form = self.form.toggle();
            }
            KeyCode::Tab => {
                self.form_field = (self.form_field + 1) % FORM_FIELD_COUNT;
            }
            KeyCode::BackTab => {
                self.form_field = (self.form_field + FORM_FIELD_COUNT - 1) % FORM_FIELD_COUNT;
            }
            KeyCode::Enter => {
                self.submit_form().await;
            }
            KeyCode::Backspace => {
                self.add_form.field_mut(self.form_field).pop();
            }
            KeyCode::Char(c) => {
                // Expected-status field only takes digits
                if self.form_field == 3 && !c.is_ascii_digit() {
                    return Ok(());
                }
                self.add_form.field_mut(self.form_field).push(c);
            }
            _ => {}
        }

        Ok(())
    }

    /// Re-fetch the endpoint table. The server is the only source of
    /// truth; nothing survives locally across mutating actions.
    async fn refresh_endpoints(&mut self) {
        match self.api.list_endpoints().await {
            Ok(endpoints) => {
                self.endpoints = endpoints;
                let max = self.endpoints.len().saturating_sub(1);
                if self.selected_index > max {
                    self.selected_index = max;
                }
                self.dashboard.update_endpoints(self.endpoints.clone());
            }
            Err(e) => {
                self.set_status(format!("✗ Failed to fetch endpoints: {}", e));
            }
        }

        self.last_refresh = Instant::now();
    }

    async fn submit_form(&mut self) {
        let endpoint = match self.add_form.to_new_endpoint() {
            Ok(ep) => ep,
            Err(msg) => {
                self.set_status(format!("✗ {}", msg));
                return;
            }
        };

        self.set_status(format!("Adding {}...", endpoint.name));

        match self.api.create_endpoint(&endpoint).await {
            Ok(()) => {
                self.set_status(format!("✓ Endpoint '{}' added", endpoint.name));
                self.form = FormVisibility::Hidden;
                self.add_form = AddForm::new();
                self.form_field = 0;
                self.refresh_endpoints().await;
            }
            Err(e) => {
                // Form stays visible with its contents; no reload
                self.set_status(format!("✗ Failed to add endpoint: {}", e));
            }
        }
    }

    async fn check_selected(&mut self) {
        let Some(endpoint) = self.endpoints.get(self.selected_index) else {
            return;
        };
        let id = endpoint.id.clone();

        self.set_status(format!("Checking {}...", id));

        match self.api.check_endpoint(&id).await {
            Ok(report) => {
                // Surface the value first, then reload the view
                self.set_status(format!(
                    "✓ {}: response time {}",
                    id,
                    format_response_time(report.response_time)
                ));
                self.refresh_endpoints().await;
            }
            Err(e) => {
                self.set_status(format!("✗ Check of {} failed: {}", id, e));
            }
        }
    }

    async fn delete_selected(&mut self) {
        let Some(endpoint) = self.endpoints.get(self.selected_index) else {
            return;
        };
        let id = endpoint.id.clone();

        self.set_status(format!("Deleting {}...", id));

        match self.api.delete_endpoint(&id).await {
            Ok(()) => {
                self.set_status(format!("✓ Endpoint {} deleted", id));
                self.refresh_endpoints().await;
            }
            Err(e) => {
                self.set_status(format!("✗ {}", e));
            }
        }
    }

    fn history_selected(&mut self) {
        let Some(endpoint) = self.endpoints.get(self.selected_index) else {
            return;
        };

        // Navigation is delegated: the client's contract ends at the URL
        let url = self.api.history_url(&endpoint.id);
        self.set_status(format!("History: {}", url));
    }
}
