//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. Every control change calls `refresh`, which
//! re-runs the whole pipeline synchronously; the price-table memo inside the
//! dashboard makes that cheap unless the lookback window changed.

use stockboard_core::{
    Dashboard, DashboardParams, PipelineState, PriceProvider, RenderOutput, TickerRegistry,
};

/// Price slider step per key press.
pub const PRICE_STEP: f64 = 10.0;
/// Price slider step with Shift held.
pub const PRICE_STEP_LARGE: f64 = 100.0;

/// Which sidebar control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Days,
    PriceMin,
    PriceMax,
    Companies,
}

impl Focus {
    pub fn index(self) -> usize {
        match self {
            Focus::Days => 0,
            Focus::PriceMin => 1,
            Focus::PriceMax => 2,
            Focus::Companies => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Focus::Days),
            1 => Some(Focus::PriceMin),
            2 => Some(Focus::PriceMax),
            3 => Some(Focus::Companies),
            _ => None,
        }
    }

    pub fn next(self) -> Focus {
        Focus::from_index((self.index() + 1) % 4).unwrap_or(Focus::Days)
    }

    pub fn prev(self) -> Focus {
        Focus::from_index((self.index() + 3) % 4).unwrap_or(Focus::Days)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub focus: Focus,
    pub running: bool,
    pub params: DashboardParams,
    /// Cursor row in the company list (registry order).
    pub company_cursor: usize,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    /// Result of the latest render pass.
    pub output: RenderOutput,
    dashboard: Dashboard<Box<dyn PriceProvider>>,
}

impl AppState {
    /// Build the state and run the first render pass.
    pub fn new(
        provider: Box<dyn PriceProvider>,
        registry: TickerRegistry,
        params: DashboardParams,
    ) -> Self {
        let mut dashboard = Dashboard::new(provider, registry);
        let output = dashboard.render(&params);
        let mut app = Self {
            focus: Focus::Days,
            running: true,
            params,
            company_cursor: 0,
            overlay: Overlay::None,
            status_message: None,
            output,
            dashboard,
        };
        app.report_pass();
        app
    }

    pub fn registry(&self) -> &TickerRegistry {
        self.dashboard.registry()
    }

    pub fn provider_name(&self) -> &str {
        self.dashboard.provider().name()
    }

    /// Re-run the pipeline with the current parameters.
    pub fn refresh(&mut self) {
        self.output = self.dashboard.render(&self.params);
        self.report_pass();
    }

    fn report_pass(&mut self) {
        let failure = self.output.error.as_ref().map(|err| {
            if !err.is_empty_selection() {
                tracing::error!(error = %err, "render pass failed");
            }
            (err.user_message(), err.is_empty_selection())
        });
        match (failure, self.output.state()) {
            (Some((msg, true)), _) => self.set_warning(msg),
            (Some((msg, false)), _) => self.set_error(msg),
            (None, PipelineState::Filtered) if self.output.fetched() => {
                let msg = format!(
                    "Fetched {} days for {} companies from {}",
                    self.output.days,
                    self.registry().len(),
                    self.provider_name()
                );
                self.set_status(msg);
            }
            (None, _) => {
                let msg = format!("{} days (cached)", self.output.days);
                self.set_status(msg);
            }
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.params.selection.iter().any(|s| s == name)
    }

    /// Add or remove a company from the selection and re-render.
    pub fn toggle_company(&mut self, name: &str) {
        if let Some(pos) = self.params.selection.iter().position(|s| s == name) {
            self.params.selection.remove(pos);
        } else if self.registry().contains(name) {
            self.params.selection.push(name.to_string());
        }
        self.refresh();
    }

    /// Toggle the company under the cursor.
    pub fn toggle_cursor_company(&mut self) {
        let name = self
            .registry()
            .names()
            .get(self.company_cursor)
            .map(|s| s.to_string());
        if let Some(name) = name {
            self.toggle_company(&name);
        }
    }

    pub fn select_all(&mut self) {
        self.params.selection = self.registry().names().into_iter().map(String::from).collect();
        self.refresh();
    }

    pub fn clear_selection(&mut self) {
        self.params.selection.clear();
        self.refresh();
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.registry().len();
        if down {
            if self.company_cursor + 1 < len {
                self.company_cursor += 1;
            }
        } else {
            self.company_cursor = self.company_cursor.saturating_sub(1);
        }
    }

    /// Step the lookback window by `steps` days (negative = shorter).
    pub fn step_days(&mut self, steps: i32) {
        let before = self.params.days;
        for _ in 0..steps.unsigned_abs() {
            self.params.days = if steps > 0 {
                self.params.days.increment()
            } else {
                self.params.days.decrement()
            };
        }
        if self.params.days != before {
            self.refresh();
        }
    }

    pub fn shift_price_min(&mut self, delta: f64) {
        let before = self.params.price_range;
        self.params.price_range = before.shift_lo(delta);
        if self.params.price_range != before {
            self.refresh();
        }
    }

    pub fn shift_price_max(&mut self, delta: f64) {
        let before = self.params.price_range;
        self.params.price_range = before.shift_hi(delta);
        if self.params.price_range != before {
            self.refresh();
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
